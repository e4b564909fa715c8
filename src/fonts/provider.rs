//! Asset lookup for embeddable faces.
//!
//! The split mirrors how the assets ship: the font program and the binary
//! CID-to-GID map are fetched per embed, while the descriptor metrics, the
//! ToUnicode CMap and the width tables are static lookups with bundled
//! defaults for LiberationSans-Regular.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::liberation;
use super::metrics::{FaceMetrics, GlyphWidths};
use super::tables;

/// Where the per-face binary assets live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLocations {
    /// Directory holding `<face>.ttf` font programs.
    pub font_dir: PathBuf,
    /// Directory holding `<face>_CidToGIDMap.bin` files; defaults to
    /// `font_dir` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph_map_dir: Option<PathBuf>,
}

/// Per-face assets needed to embed a fallback font.
///
/// The async methods fetch the two binary assets. The remaining lookups are
/// static tables; their default implementations serve the bundled face and
/// nothing else. `None` uniformly means the asset is unavailable for that
/// face.
#[allow(async_fn_in_trait)]
pub trait AssetProvider {
    async fn fetch_font_program(&self, font_name: &str) -> Option<Vec<u8>>;

    async fn fetch_glyph_index_mapping(&self, font_name: &str) -> Option<Vec<u8>>;

    fn face_metrics(&self, font_name: &str) -> Option<FaceMetrics> {
        (font_name == liberation::FACE_NAME).then_some(liberation::METRICS)
    }

    fn unicode_map(&self, font_name: &str) -> Option<Vec<u8>> {
        (font_name == liberation::FACE_NAME)
            .then(|| liberation::TO_UNICODE_CMAP.as_bytes().to_vec())
    }

    fn glyph_widths(&self, font_name: &str) -> Option<GlyphWidths> {
        (font_name == liberation::FACE_NAME).then(liberation::glyph_widths)
    }
}

/// Reads the binary assets from configured directories.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    locations: AssetLocations,
}

impl DirectoryProvider {
    pub fn new(locations: AssetLocations) -> Self {
        Self { locations }
    }

    fn font_path(&self, font_name: &str) -> PathBuf {
        self.locations.font_dir.join(format!("{font_name}.ttf"))
    }

    fn glyph_map_path(&self, font_name: &str) -> PathBuf {
        let dir = self
            .locations
            .glyph_map_dir
            .as_deref()
            .unwrap_or(&self.locations.font_dir);
        dir.join(tables::cid_to_gid_map_file(font_name))
    }
}

impl AssetProvider for DirectoryProvider {
    async fn fetch_font_program(&self, font_name: &str) -> Option<Vec<u8>> {
        read_asset(&self.font_path(font_name)).await
    }

    async fn fetch_glyph_index_mapping(&self, font_name: &str) -> Option<Vec<u8>> {
        read_asset(&self.glyph_map_path(font_name)).await
    }
}

async fn read_asset(path: &Path) -> Option<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "font asset not readable");
            None
        }
    }
}

/// Serves caller-supplied binaries for a single face, typically bytes the
/// caller compiled in or fetched ahead of time.
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    face_name: String,
    font_program: Vec<u8>,
    glyph_index_mapping: Vec<u8>,
}

impl MemoryProvider {
    pub fn new(
        face_name: impl Into<String>,
        font_program: Vec<u8>,
        glyph_index_mapping: Vec<u8>,
    ) -> Self {
        Self {
            face_name: face_name.into(),
            font_program,
            glyph_index_mapping,
        }
    }
}

impl AssetProvider for MemoryProvider {
    async fn fetch_font_program(&self, font_name: &str) -> Option<Vec<u8>> {
        (font_name == self.face_name).then(|| self.font_program.clone())
    }

    async fn fetch_glyph_index_mapping(&self, font_name: &str) -> Option<Vec<u8>> {
        (font_name == self.face_name).then(|| self.glyph_index_mapping.clone())
    }
}
