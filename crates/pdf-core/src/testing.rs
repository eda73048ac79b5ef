//! Test fixtures: a synthetic TrueType font and PNG images built in memory.
//!
//! Enabled for this crate's own tests and, through the `testing` feature,
//! for downstream crates that need real font and image bytes without
//! shipping binary assets.

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Units per em of fonts built by [`minimal_ttf`]
pub const TEST_UNITS_PER_EM: u16 = 1000;

/// Advance width of every glyph built by [`minimal_ttf`], in font units
pub const TEST_ADVANCE: u16 = 500;

/// Build a TrueType font with one box-shaped glyph per character.
///
/// Glyph 0 is `.notdef`; `chars[i]` gets glyph ID `i + 1`. Characters must be
/// in the Basic Multilingual Plane and must not repeat.
pub fn minimal_ttf(chars: &[char]) -> Vec<u8> {
    minimal_ttf_with_units(chars, TEST_UNITS_PER_EM)
}

/// [`minimal_ttf`] with a different em size. Glyph outlines and the
/// [`TEST_ADVANCE`] advance stay in the same font units, so glyphs get
/// narrower as `units_per_em` grows.
pub fn minimal_ttf_with_units(chars: &[char], units_per_em: u16) -> Vec<u8> {
    let num_glyphs = chars.len() as u16 + 1;

    let tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
        (b"cmap", cmap_table(chars)),
        (b"glyf", glyf_table(num_glyphs)),
        (b"head", head_table(units_per_em)),
        (b"hhea", hhea_table(num_glyphs)),
        (b"hmtx", hmtx_table(num_glyphs)),
        (b"loca", loca_table(num_glyphs)),
        (b"maxp", maxp_table(num_glyphs)),
        (b"post", post_table()),
    ];

    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;

    let mut font = Writer::default();
    font.u32(0x0001_0000);
    font.u16(num_tables);
    font.u16(search_range);
    font.u16(entry_selector);
    font.u16(num_tables * 16 - search_range);

    let mut offset = 12 + 16 * tables.len() as u32;
    for (tag, data) in &tables {
        font.bytes(*tag);
        font.u32(checksum(data));
        font.u32(offset);
        font.u32(data.len() as u32);
        offset += padded_len(data.len()) as u32;
    }
    for (_, data) in &tables {
        font.bytes(data);
        font.pad4();
    }

    font.0
}

/// Encode a solid-colour PNG of the given size
pub fn solid_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("in-memory PNG encoding");
    buffer.into_inner()
}

#[derive(Default)]
struct Writer(Vec<u8>);

impl Writer {
    fn u16(&mut self, v: u16) {
        self.0.extend_from_slice(&v.to_be_bytes());
    }

    fn i16(&mut self, v: i16) {
        self.0.extend_from_slice(&v.to_be_bytes());
    }

    fn u32(&mut self, v: u32) {
        self.0.extend_from_slice(&v.to_be_bytes());
    }

    fn bytes(&mut self, v: &[u8]) {
        self.0.extend_from_slice(v);
    }

    fn pad4(&mut self) {
        while self.0.len() % 4 != 0 {
            self.0.push(0);
        }
    }
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

// Every glyph is a single closed rectangle: 10 header + 2 endPts + 2 instructionLength
// + 4 flags + 8 x deltas + 8 y deltas.
const GLYPH_LEN: u16 = 34;

fn head_table(units_per_em: u16) -> Vec<u8> {
    let mut t = Writer::default();
    t.u16(1);
    t.u16(0);
    t.u32(0x0001_0000); // fontRevision
    t.u32(0); // checksumAdjustment
    t.u32(0x5F0F_3CF5);
    t.u16(0); // flags
    t.u16(units_per_em);
    t.bytes(&[0; 16]); // created, modified
    t.i16(50);
    t.i16(0);
    t.i16(450);
    t.i16(700);
    t.u16(0); // macStyle
    t.u16(8); // lowestRecPPEM
    t.i16(2); // fontDirectionHint
    t.i16(0); // short loca
    t.i16(0);
    t.0
}

fn hhea_table(num_glyphs: u16) -> Vec<u8> {
    let mut t = Writer::default();
    t.u32(0x0001_0000);
    t.i16(800);
    t.i16(-200);
    t.i16(0);
    t.u16(TEST_ADVANCE);
    t.i16(50); // minLeftSideBearing
    t.i16(50); // minRightSideBearing
    t.i16(450); // xMaxExtent
    t.i16(1); // caretSlopeRise
    t.i16(0);
    t.i16(0);
    t.bytes(&[0; 8]);
    t.i16(0); // metricDataFormat
    t.u16(num_glyphs);
    t.0
}

fn maxp_table(num_glyphs: u16) -> Vec<u8> {
    let mut t = Writer::default();
    t.u32(0x0001_0000);
    t.u16(num_glyphs);
    t.u16(4); // maxPoints
    t.u16(1); // maxContours
    t.u16(0);
    t.u16(0);
    t.u16(2); // maxZones
    t.bytes(&[0; 16]);
    t.0
}

fn hmtx_table(num_glyphs: u16) -> Vec<u8> {
    let mut t = Writer::default();
    for _ in 0..num_glyphs {
        t.u16(TEST_ADVANCE);
        t.i16(50);
    }
    t.0
}

fn loca_table(num_glyphs: u16) -> Vec<u8> {
    let mut t = Writer::default();
    for i in 0..=num_glyphs {
        t.u16(i * GLYPH_LEN / 2);
    }
    t.0
}

fn glyf_table(num_glyphs: u16) -> Vec<u8> {
    let mut t = Writer::default();
    for _ in 0..num_glyphs {
        t.i16(1); // numberOfContours
        t.i16(50);
        t.i16(0);
        t.i16(450);
        t.i16(700);
        t.u16(3); // endPtsOfContours
        t.u16(0); // instructionLength
        t.bytes(&[0x01; 4]); // on-curve, 16-bit deltas
        for dx in [50, 400, 0, -400] {
            t.i16(dx);
        }
        for dy in [0, 0, 700, 0] {
            t.i16(dy);
        }
    }
    t.0
}

fn cmap_table(chars: &[char]) -> Vec<u8> {
    let mut segments: Vec<(u16, u16)> = chars
        .iter()
        .enumerate()
        .map(|(i, &c)| (c as u32 as u16, i as u16 + 1))
        .collect();
    segments.sort_by_key(|&(code, _)| code);

    let seg_count = segments.len() as u16 + 1;
    let entry_selector = 15 - seg_count.leading_zeros() as u16;
    let search_range = 2 * (1u16 << entry_selector);

    let mut t = Writer::default();
    t.u16(0);
    t.u16(1);
    t.u16(3); // Windows
    t.u16(1); // Unicode BMP
    t.u32(12);

    t.u16(4);
    t.u16(16 + 8 * seg_count);
    t.u16(0);
    t.u16(seg_count * 2);
    t.u16(search_range);
    t.u16(entry_selector);
    t.u16(seg_count * 2 - search_range);
    for &(code, _) in &segments {
        t.u16(code);
    }
    t.u16(0xFFFF);
    t.u16(0); // reservedPad
    for &(code, _) in &segments {
        t.u16(code);
    }
    t.u16(0xFFFF);
    for &(code, gid) in &segments {
        t.u16(gid.wrapping_sub(code));
    }
    t.u16(1);
    for _ in 0..seg_count {
        t.u16(0); // idRangeOffset
    }
    t.0
}

fn post_table() -> Vec<u8> {
    let mut t = Writer::default();
    t.u32(0x0003_0000);
    t.bytes(&[0; 28]);
    t.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_ttf_parses() {
        let data = minimal_ttf(&['A', 'ދ']);
        let face = ttf_parser::Face::parse(&data, 0).unwrap();

        assert_eq!(face.number_of_glyphs(), 3);
        assert_eq!(face.units_per_em(), TEST_UNITS_PER_EM);
        assert_eq!(face.glyph_index('A').map(|g| g.0), Some(1));
        assert_eq!(face.glyph_index('ދ').map(|g| g.0), Some(2));
        assert_eq!(face.glyph_index('Z'), None);
        assert_eq!(
            face.glyph_hor_advance(ttf_parser::GlyphId(2)),
            Some(TEST_ADVANCE)
        );
    }

    #[test]
    fn test_minimal_ttf_with_units() {
        let data = minimal_ttf_with_units(&['ދ'], 2048);
        let face = ttf_parser::Face::parse(&data, 0).unwrap();
        assert_eq!(face.units_per_em(), 2048);
        assert_eq!(
            face.glyph_hor_advance(ttf_parser::GlyphId(1)),
            Some(TEST_ADVANCE)
        );
    }

    #[test]
    fn test_solid_png_signature() {
        let png = solid_png(4, 2, [255, 0, 0, 255]);
        assert_eq!(&png[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
