//! Derive per-face embedding tables from a TrueType font.
//!
//! These are the Rust counterparts of the scripts that produced the bundled
//! LiberationSans-Regular assets: the binary CID-to-GID map, the grouped
//! width runs and the identity ToUnicode CMap. CIDs equal Unicode code
//! points throughout, so every table is keyed by code point.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::{anyhow, Result};
use ttf_parser::{cmap, Face, PlatformId};

use super::metrics::{GlyphWidths, WidthRun};

/// Highest CID covered by the derived tables (the UCS-2 range).
pub const CID_RANGE_END: u32 = 0xFFFF;

/// Suffix of the binary CID-to-GID map written next to a face.
pub const CID_TO_GID_MAP_SUFFIX: &str = "_CidToGIDMap.bin";

/// File name of the binary CID-to-GID map for a face stem.
pub fn cid_to_gid_map_file(stem: &str) -> String {
    format!("{stem}{CID_TO_GID_MAP_SUFFIX}")
}

/// The Windows Unicode cmap subtable, the same one the shipped tables were
/// derived from.
fn unicode_subtable<'a>(face: &Face<'a>) -> Result<cmap::Subtable<'a>> {
    let table = face
        .tables()
        .cmap
        .ok_or_else(|| anyhow!("face has no cmap table"))?;
    table
        .subtables
        .into_iter()
        .find(|subtable| {
            subtable.platform_id == PlatformId::Windows
                && matches!(subtable.encoding_id, 1 | 10)
        })
        .ok_or_else(|| anyhow!("face has no Windows Unicode cmap subtable"))
}

/// Every code point the face maps, ascending, capped at [`CID_RANGE_END`].
pub fn face_codepoints(face: &Face) -> Result<Vec<u32>> {
    let subtable = unicode_subtable(face)?;
    let mut codepoints = Vec::new();
    subtable.codepoints(|cp| {
        if cp <= CID_RANGE_END {
            codepoints.push(cp);
        }
    });
    codepoints.sort_unstable();
    codepoints.dedup();
    Ok(codepoints)
}

/// One GID per CID in `0..=cid_range_end`, with unmapped code points
/// pointing at `.notdef`.
pub fn cid_to_gid_entries(face: &Face, cid_range_end: u32) -> Result<Vec<u16>> {
    let subtable = unicode_subtable(face)?;
    let mut entries = Vec::with_capacity(cid_range_end as usize + 1);
    for cid in 0..=cid_range_end {
        entries.push(subtable.glyph_index(cid).map(|id| id.0).unwrap_or(0));
    }
    Ok(entries)
}

/// Serialize GID entries as the binary CIDToGIDMap stream payload, two
/// big-endian bytes per CID.
pub fn pack_gid_map(entries: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(entries.len() * 2);
    for gid in entries {
        bytes.extend_from_slice(&gid.to_be_bytes());
    }
    bytes
}

/// Binary CID-to-GID map for a face over `0..=cid_range_end`.
pub fn cid_to_gid_map_bytes(face: &Face, cid_range_end: u32) -> Result<Vec<u8>> {
    Ok(pack_gid_map(&cid_to_gid_entries(face, cid_range_end)?))
}

/// Scaled advance width (1000ths of an em) for every mapped code point.
/// Ties at exactly .5 round to even, matching the shipped tables.
pub fn cid_widths(face: &Face) -> Result<BTreeMap<u32, i64>> {
    let subtable = unicode_subtable(face)?;
    let upem = f64::from(face.units_per_em());
    let mut widths = BTreeMap::new();
    for cp in face_codepoints(face)? {
        let Some(gid) = subtable.glyph_index(cp) else {
            continue;
        };
        let advance = face.glyph_hor_advance(gid).unwrap_or(0);
        let scaled = (1000.0 * f64::from(advance) / upem).round_ties_even() as i64;
        widths.insert(cp, scaled);
    }
    Ok(widths)
}

/// The width shared by the most code points, used as `/DW`. Ties resolve to
/// the smaller width.
pub fn default_width(widths: &BTreeMap<u32, i64>) -> i64 {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for width in widths.values() {
        *counts.entry(*width).or_default() += 1;
    }
    let mut best = (1000, 0);
    for (width, count) in counts {
        if count > best.1 {
            best = (width, count);
        }
    }
    best.0
}

/// Group the non-default widths into `/W` runs. Consecutive CIDs sharing a
/// width become a `first last w` range; stretches of consecutive CIDs with
/// varying widths collect into `first [w ...]` sequences, closing a sequence
/// as soon as the next two widths match and could open a range.
pub fn group_widths(widths: &BTreeMap<u32, i64>, default_width: i64) -> Vec<WidthRun> {
    let cids: Vec<u32> = widths
        .iter()
        .filter(|(_, width)| **width != default_width)
        .map(|(cid, _)| *cid)
        .collect();

    let mut runs = Vec::new();
    let mut i = 0;
    while i < cids.len() {
        let mut seq = vec![cids[i]];
        i += 1;
        while i < cids.len() && cids[i] == cids[i - 1] + 1 {
            seq.push(cids[i]);
            i += 1;
        }

        let mut j = 0;
        while j < seq.len() {
            let width = widths[&seq[j]];
            let mut end = j;
            while end + 1 < seq.len() && widths[&seq[end + 1]] == width {
                end += 1;
            }
            if end - j + 1 >= 2 {
                runs.push(WidthRun::Range(seq[j], seq[end], width));
                j = end + 1;
            } else {
                let first = seq[j];
                let mut values = vec![width];
                j += 1;
                while j < seq.len() {
                    values.push(widths[&seq[j]]);
                    j += 1;
                    if j + 1 < seq.len() && widths[&seq[j]] == widths[&seq[j + 1]] {
                        break;
                    }
                }
                runs.push(WidthRun::Seq(first, values));
            }
        }
    }
    runs
}

/// `/DW` and `/W` for a face, over the code points its cmap covers.
pub fn glyph_widths(face: &Face) -> Result<GlyphWidths> {
    let widths = cid_widths(face)?;
    let default_width = default_width(&widths);
    Ok(GlyphWidths {
        default_width,
        runs: group_widths(&widths, default_width),
    })
}

/// Identity ToUnicode CMap text for the given code points, in the framing
/// CID-keyed font readers expect, with bfchar entries in blocks of 100.
pub fn unicode_cmap(cmap_name: &str, codepoints: &[u32]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "/CIDInit /ProcSet findresource begin");
    let _ = writeln!(out, "12 dict begin");
    let _ = writeln!(out, "begincmap");
    let _ = writeln!(
        out,
        "/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def"
    );
    let _ = writeln!(out, "/CMapName /{cmap_name} def");
    let _ = writeln!(out, "/CMapType 2 def");
    let _ = writeln!(out, "1 begincodespacerange");
    let _ = writeln!(out, "<0000> <FFFF>");
    let _ = writeln!(out, "endcodespacerange");
    for chunk in codepoints.chunks(100) {
        let _ = writeln!(out, "{} beginbfchar", chunk.len());
        for cp in chunk {
            let _ = writeln!(out, "<{cp:04X}> <{cp:04X}>");
        }
        let _ = writeln!(out, "endbfchar");
    }
    let _ = writeln!(out, "endcmap");
    let _ = writeln!(out, "CMapName currentdict /CMap defineresource pop");
    let _ = writeln!(out, "end");
    let _ = writeln!(out, "end");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width_map(pairs: &[(u32, i64)]) -> BTreeMap<u32, i64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn consecutive_equal_widths_become_ranges() {
        let widths = width_map(&[(32, 278), (33, 278), (34, 355)]);
        assert_eq!(
            group_widths(&widths, 556),
            vec![WidthRun::Range(32, 33, 278), WidthRun::Seq(34, vec![355])]
        );
    }

    #[test]
    fn mixed_stretch_splits_when_a_range_opens() {
        // 40..=47 with widths taken from the bundled face.
        let widths = width_map(&[
            (40, 333),
            (41, 333),
            (42, 389),
            (43, 584),
            (44, 278),
            (45, 333),
            (46, 278),
            (47, 278),
        ]);
        assert_eq!(
            group_widths(&widths, 556),
            vec![
                WidthRun::Range(40, 41, 333),
                WidthRun::Seq(42, vec![389, 584, 278, 333]),
                WidthRun::Range(46, 47, 278),
            ]
        );
    }

    #[test]
    fn default_width_entries_are_skipped_entirely() {
        let widths = width_map(&[(10, 556), (11, 400), (12, 556), (13, 400)]);
        assert_eq!(
            group_widths(&widths, 556),
            vec![WidthRun::Seq(11, vec![400]), WidthRun::Seq(13, vec![400])]
        );
    }

    #[test]
    fn gaps_between_cids_always_split_runs() {
        let widths = width_map(&[(100, 300), (102, 300), (104, 300)]);
        assert_eq!(
            group_widths(&widths, 556),
            vec![
                WidthRun::Seq(100, vec![300]),
                WidthRun::Seq(102, vec![300]),
                WidthRun::Seq(104, vec![300]),
            ]
        );
    }

    #[test]
    fn default_width_picks_the_most_common_value() {
        let widths = width_map(&[(1, 500), (2, 500), (3, 500), (4, 600), (5, 600)]);
        assert_eq!(default_width(&widths), 500);
    }

    #[test]
    fn default_width_ties_resolve_to_the_smaller_width() {
        let widths = width_map(&[(1, 600), (2, 500), (3, 600), (4, 500)]);
        assert_eq!(default_width(&widths), 500);
    }

    #[test]
    fn empty_width_map_falls_back_to_full_em() {
        assert_eq!(default_width(&BTreeMap::new()), 1000);
    }

    #[test]
    fn cmap_text_chunks_bfchar_blocks_of_one_hundred() {
        let codepoints: Vec<u32> = (0x20..0x20 + 150).collect();
        let text = unicode_cmap("TestFace", &codepoints);
        assert!(text.starts_with("/CIDInit /ProcSet findresource begin\n"));
        assert!(text.contains("/CMapName /TestFace def\n"));
        assert!(text.contains("100 beginbfchar\n"));
        assert!(text.contains("50 beginbfchar\n"));
        assert!(text.contains("<0020> <0020>\n"));
        assert_eq!(text.matches("endbfchar").count(), 2);
        assert!(text.ends_with("end\nend\n"));
    }

    #[test]
    fn cmap_entries_map_each_code_point_to_itself() {
        let text = unicode_cmap("TestFace", &[0x41, 0x1E9E]);
        assert!(text.contains("2 beginbfchar\n<0041> <0041>\n<1E9E> <1E9E>\nendbfchar\n"));
    }

    #[test]
    fn gid_map_packs_two_big_endian_bytes_per_cid() {
        assert_eq!(
            pack_gid_map(&[0, 1, 0x1234, 0xFFFF]),
            vec![0x00, 0x00, 0x00, 0x01, 0x12, 0x34, 0xFF, 0xFF]
        );
        assert!(pack_gid_map(&[]).is_empty());
    }

    #[test]
    fn map_file_name_follows_the_on_disk_convention() {
        assert_eq!(
            cid_to_gid_map_file("LiberationSans-Regular"),
            "LiberationSans-Regular_CidToGIDMap.bin"
        );
    }
}
