//! Face-level metric records and width tables.

use lopdf::Object;
use serde::{Deserialize, Serialize};

/// Descriptor metrics for one font face.
///
/// These feed the `/FontDescriptor` dictionary verbatim; they are fixed
/// per-face values, not something derived from the font program at embed
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceMetrics {
    pub flags: i64,
    pub font_bbox: [i64; 4],
    pub ascent: i64,
    pub descent: i64,
    pub cap_height: i64,
    pub stem_v: i64,
    pub italic_angle: i64,
}

impl FaceMetrics {
    /// `/FontBBox` as a four-element PDF array.
    pub fn bbox_object(&self) -> Object {
        Object::Array(self.font_bbox.iter().map(|v| Object::Integer(*v)).collect())
    }
}

/// Advance-width tables for a glyph-indexed font: the `/DW` default plus the
/// grouped `/W` runs covering every CID whose width differs from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphWidths {
    pub default_width: i64,
    pub runs: Vec<WidthRun>,
}

/// One `/W` array entry. CIDs equal Unicode code points under the identity
/// encoding this crate emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidthRun {
    /// `first last width`: a run of consecutive CIDs sharing one width.
    Range(u32, u32, i64),
    /// `first [w0 w1 ...]`: consecutive CIDs with individual widths.
    Seq(u32, Vec<i64>),
}

impl GlyphWidths {
    /// Flatten the runs into the `/W` array shape CID-keyed fonts declare.
    pub fn to_object(&self) -> Object {
        let mut items = Vec::new();
        for run in &self.runs {
            match run {
                WidthRun::Range(first, last, width) => {
                    items.push(Object::Integer(i64::from(*first)));
                    items.push(Object::Integer(i64::from(*last)));
                    items.push(Object::Integer(*width));
                }
                WidthRun::Seq(first, widths) => {
                    items.push(Object::Integer(i64::from(*first)));
                    items.push(Object::Array(
                        widths.iter().map(|w| Object::Integer(*w)).collect(),
                    ));
                }
            }
        }
        Object::Array(items)
    }
}
