//! Object-graph construction against a PDF document's object space.

pub mod embed;
pub mod objects;
