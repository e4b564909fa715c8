//! Bundled tables for the LiberationSans-Regular fallback face.
//!
//! The ToUnicode CMap and the width runs were derived from the face with the
//! `gen-assets` subcommand and checked in; the descriptor metrics are the
//! published values for this face. The font program itself and the binary
//! CID-to-GID map stay on disk and are fetched per embed.

use super::metrics::{FaceMetrics, GlyphWidths, WidthRun};

/// The one face this crate ships static tables for.
pub const FACE_NAME: &str = "LiberationSans-Regular";

/// Identity ToUnicode CMap covering every code point the face maps.
pub const TO_UNICODE_CMAP: &str = include_str!("../../assets/LiberationSans-Regular.cmap");

/// Descriptor metrics for the face (nonsymbolic, upright).
pub const METRICS: FaceMetrics = FaceMetrics {
    flags: 32,
    font_bbox: [-416, -621, 2151, 1864],
    ascent: 1854,
    descent: -434,
    cap_height: 1409,
    stem_v: 80,
    italic_angle: 0,
};

/// Most common advance width across the face, in 1000ths of an em.
pub const DEFAULT_WIDTH: i64 = 556;

/// `/DW` plus the grouped `/W` runs for every non-default advance width.
pub fn glyph_widths() -> GlyphWidths {
    GlyphWidths {
        default_width: DEFAULT_WIDTH,
        runs: vec![
            WidthRun::Range(32, 33, 278),
            WidthRun::Seq(34, vec![355]),
            WidthRun::Seq(37, vec![889, 667, 191]),
            WidthRun::Range(40, 41, 333),
            WidthRun::Seq(42, vec![389, 584, 278, 333]),
            WidthRun::Range(46, 47, 278),
            WidthRun::Range(58, 59, 278),
            WidthRun::Range(60, 62, 584),
            WidthRun::Seq(64, vec![1015, 667, 667]),
            WidthRun::Range(67, 68, 722),
            WidthRun::Seq(69, vec![667, 611, 778, 722, 278, 500, 667]),
            WidthRun::Seq(77, vec![833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944]),
            WidthRun::Range(88, 89, 667),
            WidthRun::Seq(90, vec![611, 278]),
            WidthRun::Range(92, 93, 278),
            WidthRun::Seq(94, vec![469]),
            WidthRun::Seq(96, vec![333]),
            WidthRun::Seq(99, vec![500]),
            WidthRun::Seq(102, vec![278]),
            WidthRun::Range(105, 106, 222),
            WidthRun::Seq(107, vec![500, 222, 833]),
            WidthRun::Seq(114, vec![333, 500, 278]),
            WidthRun::Seq(118, vec![500, 722]),
            WidthRun::Range(120, 122, 500),
            WidthRun::Seq(123, vec![334, 260, 334, 584]),
            WidthRun::Seq(160, vec![278, 333]),
            WidthRun::Seq(166, vec![260]),
            WidthRun::Seq(168, vec![333, 737, 370]),
            WidthRun::Seq(172, vec![584, 333, 737, 333, 400, 584]),
            WidthRun::Range(178, 180, 333),
            WidthRun::Seq(182, vec![537, 278]),
            WidthRun::Range(184, 185, 333),
            WidthRun::Seq(186, vec![365]),
            WidthRun::Range(188, 190, 834),
            WidthRun::Seq(191, vec![611, 667]),
            WidthRun::Range(193, 197, 667),
            WidthRun::Seq(198, vec![1000, 722]),
            WidthRun::Range(200, 203, 667),
            WidthRun::Range(204, 207, 278),
            WidthRun::Range(208, 209, 722),
            WidthRun::Range(210, 214, 778),
            WidthRun::Seq(215, vec![584, 778]),
            WidthRun::Range(217, 220, 722),
            WidthRun::Range(221, 222, 667),
            WidthRun::Seq(223, vec![611]),
            WidthRun::Seq(230, vec![889, 500]),
            WidthRun::Range(236, 239, 278),
            WidthRun::Seq(247, vec![584, 611]),
            WidthRun::Seq(253, vec![500]),
            WidthRun::Seq(255, vec![500]),
        ],
    }
}
