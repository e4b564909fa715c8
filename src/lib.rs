//! Fallback font embedding for PDF documents.
//!
//! When a document references a font that cannot be resolved, a viewer or
//! editor backend still has to put something renderable into the resource
//! chain. This crate builds that something: it wires the bundled
//! LiberationSans-Regular face into a document's object space as a complete
//! composite font (font-program stream, descriptor, CID-to-GID and ToUnicode
//! map streams, CIDFontType2 descendant, top-level Type0 dictionary) and
//! returns the reference a `/Resources /Font` entry can point at.
//!
//! ```no_run
//! # async fn demo() -> Result<(), pdf_font_fallback::EmbedError> {
//! use lopdf::Document;
//! use pdf_font_fallback::fonts::liberation;
//! use pdf_font_fallback::{embed_truetype_font, DocumentChanges, MemoryProvider};
//!
//! let program = std::fs::read("assets/LiberationSans-Regular.ttf").unwrap();
//! let mapping = std::fs::read("assets/LiberationSans-Regular_CidToGIDMap.bin").unwrap();
//! let provider = MemoryProvider::new(liberation::FACE_NAME, program, mapping);
//!
//! let mut document = Document::with_version("1.7");
//! let mut changes = DocumentChanges::new();
//! let font_ref =
//!     embed_truetype_font(liberation::FACE_NAME, &provider, &mut document, &mut changes)
//!         .await?;
//! changes.apply_to(&mut document);
//! # let _ = font_ref;
//! # Ok(())
//! # }
//! ```

pub mod fonts;
pub mod pdf;

use tracing_subscriber::prelude::*;

pub use fonts::metrics::{FaceMetrics, GlyphWidths, WidthRun};
pub use fonts::provider::{AssetLocations, AssetProvider, DirectoryProvider, MemoryProvider};
pub use pdf::embed::{embed_truetype_font, AssetKind, EmbedError};
pub use pdf::objects::{ChangeSet, DocumentChanges, ObjectStore};

pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}
