//! Build and register the fallback composite-font object cluster.
//!
//! One call produces the six objects a CID-keyed TrueType font needs in a
//! PDF: the font-program stream, the font descriptor, the ToUnicode CMap
//! stream, the CID-to-GID map stream, the CIDFontType2 descendant and the
//! top-level Type0 dictionary that resources point at.

use std::fmt;

use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream};
use thiserror::Error;
use tracing::debug;

use crate::fonts::metrics::{FaceMetrics, GlyphWidths};
use crate::fonts::provider::AssetProvider;
use crate::pdf::objects::{ChangeSet, ObjectStore};

/// Which per-face asset could not be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    FontProgram,
    GlyphIndexMapping,
    FaceMetrics,
    UnicodeMap,
    GlyphWidths,
}

impl AssetKind {
    fn as_str(self) -> &'static str {
        match self {
            AssetKind::FontProgram => "font program",
            AssetKind::GlyphIndexMapping => "CID-to-GID mapping",
            AssetKind::FaceMetrics => "face metrics",
            AssetKind::UnicodeMap => "ToUnicode CMap",
            AssetKind::GlyphWidths => "glyph widths",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum EmbedError {
    /// A required asset was missing or empty. Nothing has been allocated or
    /// registered when this is returned.
    #[error("no {kind} available for font {font_name}")]
    AssetUnavailable { kind: AssetKind, font_name: String },
}

impl EmbedError {
    fn unavailable(kind: AssetKind, font_name: &str) -> Self {
        EmbedError::AssetUnavailable {
            kind,
            font_name: font_name.to_string(),
        }
    }
}

/// Everything a face needs, gathered up front.
struct FaceAssets {
    font_program: Vec<u8>,
    glyph_index_mapping: Vec<u8>,
    metrics: FaceMetrics,
    unicode_map: Vec<u8>,
    widths: GlyphWidths,
}

/// Staged objects plus whether each one also lands in the store's
/// resolution cache at commit time.
#[derive(Default)]
struct Staging {
    entries: Vec<(ObjectId, Object, bool)>,
}

impl Staging {
    fn stage(&mut self, id: ObjectId, object: impl Into<Object>) {
        self.entries.push((id, object.into(), false));
    }

    fn stage_cached(&mut self, id: ObjectId, object: impl Into<Object>) {
        self.entries.push((id, object.into(), true));
    }

    fn commit(self, store: &mut impl ObjectStore, changes: &mut impl ChangeSet) {
        for (id, object, cached) in self.entries {
            if cached {
                store.cache(id, object.clone());
            }
            changes.register(id, object);
        }
    }
}

/// Embed the face `font_name` as a complete composite font and return the
/// reference of its top-level Type0 dictionary.
///
/// The two binary assets are fetched concurrently. The object cluster is
/// then built in dependency order and handed to `changes` only once every
/// asset is in hand, so a missing asset never leaves partially registered
/// objects, or even allocated references, behind. The returned reference
/// resolves through `store` immediately; the stream objects that only ever
/// get written out, the font program and the descriptor, are registered
/// without being cached.
pub async fn embed_truetype_font(
    font_name: &str,
    provider: &impl AssetProvider,
    store: &mut impl ObjectStore,
    changes: &mut impl ChangeSet,
) -> Result<ObjectId, EmbedError> {
    let assets = fetch_face_assets(font_name, provider).await?;
    Ok(build_font_objects(font_name, assets, store, changes))
}

async fn fetch_face_assets(
    font_name: &str,
    provider: &impl AssetProvider,
) -> Result<FaceAssets, EmbedError> {
    let (font_program, glyph_index_mapping) = tokio::join!(
        provider.fetch_font_program(font_name),
        provider.fetch_glyph_index_mapping(font_name),
    );
    // An empty payload counts as unavailable, same as a failed fetch.
    let font_program = font_program
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| EmbedError::unavailable(AssetKind::FontProgram, font_name))?;
    let glyph_index_mapping = glyph_index_mapping
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| EmbedError::unavailable(AssetKind::GlyphIndexMapping, font_name))?;
    let metrics = provider
        .face_metrics(font_name)
        .ok_or_else(|| EmbedError::unavailable(AssetKind::FaceMetrics, font_name))?;
    let unicode_map = provider
        .unicode_map(font_name)
        .ok_or_else(|| EmbedError::unavailable(AssetKind::UnicodeMap, font_name))?;
    let widths = provider
        .glyph_widths(font_name)
        .ok_or_else(|| EmbedError::unavailable(AssetKind::GlyphWidths, font_name))?;
    Ok(FaceAssets {
        font_program,
        glyph_index_mapping,
        metrics,
        unicode_map,
        widths,
    })
}

fn build_font_objects(
    font_name: &str,
    assets: FaceAssets,
    store: &mut impl ObjectStore,
    changes: &mut impl ChangeSet,
) -> ObjectId {
    let mut staged = Staging::default();

    // /Length1 is the decoded TrueType length, distinct from the stream's
    // own /Length.
    let program_len = assets.font_program.len() as i64;
    let font_stream_ref = store.allocate_ref();
    staged.stage(
        font_stream_ref,
        Stream::new(dictionary! { "Length1" => program_len }, assets.font_program),
    );

    let descriptor_ref = store.allocate_ref();
    staged.stage(
        descriptor_ref,
        dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => font_name,
            "Flags" => assets.metrics.flags,
            "FontBBox" => assets.metrics.bbox_object(),
            "Ascent" => assets.metrics.ascent,
            "Descent" => assets.metrics.descent,
            "CapHeight" => assets.metrics.cap_height,
            "StemV" => assets.metrics.stem_v,
            "ItalicAngle" => assets.metrics.italic_angle,
            "FontFile2" => font_stream_ref,
        },
    );

    let to_unicode_ref = store.allocate_ref();
    staged.stage_cached(
        to_unicode_ref,
        Stream::new(Dictionary::new(), assets.unicode_map),
    );

    let glyph_map_ref = store.allocate_ref();
    staged.stage_cached(
        glyph_map_ref,
        Stream::new(Dictionary::new(), assets.glyph_index_mapping),
    );

    let descendant_ref = store.allocate_ref();
    staged.stage_cached(
        descendant_ref,
        dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => font_name,
            "Encoding" => "Identity-H",
            "CIDToGIDMap" => glyph_map_ref,
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0i64,
            },
            "FontDescriptor" => descriptor_ref,
            "DW" => assets.widths.default_width,
            "W" => assets.widths.to_object(),
        },
    );

    let composite_ref = store.allocate_ref();
    staged.stage_cached(
        composite_ref,
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => font_name,
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(descendant_ref)],
            "ToUnicode" => to_unicode_ref,
        },
    );

    staged.commit(store, changes);
    debug!(font_name, font_ref = ?composite_ref, "embedded fallback composite font");
    composite_ref
}
