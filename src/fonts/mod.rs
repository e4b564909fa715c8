//! Font assets and per-face tables for fallback embedding.

pub mod liberation;
pub mod metrics;
pub mod provider;
pub mod tables;
