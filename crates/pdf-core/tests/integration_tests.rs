//! Integration tests for pdf-core
//!
//! These tests build complete documents and read them back with lopdf.

use lopdf::Document;
use pdf_core::testing::{minimal_ttf, minimal_ttf_with_units, solid_png};
use pdf_core::{Align, PdfDocument, PdfError, StandardFont};
use pretty_assertions::assert_eq;

fn page_content(bytes: &[u8]) -> String {
    let doc = Document::load_mem(bytes).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}

/// Bilingual label row: English label, right-aligned Dhivehi label, value box
fn draw_label_row(doc: &mut PdfDocument) -> Result<(), PdfError> {
    doc.set_font("label", 9.0)?;
    doc.insert_text("DATE", 1, 36.0, 93.6, Align::Left)?;
    doc.set_font("thaana", 9.0)?;
    doc.insert_text("ޚީރާތ", 1, 136.8, 104.4, Align::Right)?;
    doc.draw_rect(1, 144.0, 82.8, 129.6, 18.0)?;
    doc.set_font("value", 10.0)?;
    doc.insert_text("2024-03-15", 1, 147.6, 97.2, Align::Left)
}

fn ticket_document() -> PdfDocument {
    let mut doc = PdfDocument::new(504.0, 252.0);
    doc.add_standard_font("label", StandardFont::Helvetica).unwrap();
    doc.add_standard_font("value", StandardFont::HelveticaBold).unwrap();
    doc.add_font("thaana", &minimal_ttf(&['ތ', 'ާ', 'ރ', 'ީ', 'ޚ']))
        .unwrap();
    doc
}

#[test]
fn test_label_row_renders_all_parts() {
    let mut doc = ticket_document();
    draw_label_row(&mut doc).unwrap();

    let content = page_content(&doc.to_bytes().unwrap());
    assert!(content.contains("(DATE) Tj"));
    assert!(content.contains("36 158.4 Td"));
    assert!(content.contains("144 151.2 129.6 18 re"));
    assert!(content.contains("(2024-03-15) Tj"));
    assert!(content.contains("147.6 154.8 Td"));
}

#[test]
fn test_thaana_right_alignment_uses_glyph_advances() {
    let mut doc = ticket_document();
    doc.set_font("thaana", 10.0).unwrap();
    // Five glyphs, 500 units each at 1000 upem: 25pt wide
    doc.insert_text("ޚީރާތ", 1, 136.8, 104.4, Align::Right).unwrap();

    let content = page_content(&doc.to_bytes().unwrap());
    assert!(content.contains("111.8 147.6 Td"));
}

/// Advance widths written to the CIDFont /W array, keyed by glyph ID
fn cid_widths(bytes: &[u8]) -> Vec<(i64, i64)> {
    let doc = Document::load_mem(bytes).unwrap();
    let cid_font = doc
        .objects
        .values()
        .filter_map(|obj| obj.as_dict().ok())
        .find(|dict| {
            dict.get(b"Subtype").and_then(|s| s.as_name()).ok() == Some(b"CIDFontType2".as_slice())
        })
        .unwrap();
    let widths = cid_font.get(b"W").unwrap().as_array().unwrap();
    widths
        .chunks(2)
        .map(|pair| {
            let width = pair[1].as_array().unwrap()[0].as_i64().unwrap();
            (pair[0].as_i64().unwrap(), width)
        })
        .collect()
}

#[test]
fn test_right_aligned_text_ends_at_anchor_for_2048_upem_font() {
    let mut doc = PdfDocument::new(504.0, 252.0);
    doc.add_font("thaana", &minimal_ttf_with_units(&['ދ'], 2048))
        .unwrap();
    doc.set_font("thaana", 10.0).unwrap();
    doc.insert_text("ދ", 1, 100.0, 50.0, Align::Right).unwrap();

    let bytes = doc.to_bytes().unwrap();
    // 500 / 2048 * 10 = 2.441pt reserved left of the anchor
    assert!(page_content(&bytes).contains("97.559 202 Td"));

    // The viewer advances by the /W width, which must end on the anchor
    let widths = cid_widths(&bytes);
    assert_eq!(widths, vec![(1, 244)]);
    let end = 97.559 + widths[0].1 as f64 / 1000.0 * 10.0;
    assert!((end - 100.0).abs() < 0.01, "text ends at {end}");
}

#[test]
fn test_identical_drawing_gives_identical_bytes() {
    let render = || {
        let mut doc = ticket_document();
        draw_label_row(&mut doc).unwrap();
        doc.insert_image(&solid_png(6, 4, [212, 175, 55, 200]), 1, 79.2, 3.6, 28.8, 18.0)
            .unwrap();
        doc.to_bytes().unwrap()
    };

    assert_eq!(render(), render());
}

#[test]
fn test_outline_is_black_and_one_point_wide() {
    let mut doc = PdfDocument::new(504.0, 252.0);
    doc.draw_rect(1, 338.4, 86.4, 10.8, 10.8).unwrap();

    let content = page_content(&doc.to_bytes().unwrap());
    assert!(content.contains("1 w"));
    assert!(content.contains("0 0 0 RG"));
    assert!(content.contains("338.4 154.8 10.8 10.8 re"));
}

#[test]
fn test_check_mark_in_zapf_dingbats() {
    let mut doc = PdfDocument::new(504.0, 252.0);
    doc.add_standard_font("mark", StandardFont::ZapfDingbats).unwrap();
    doc.set_font("mark", 12.0).unwrap();
    doc.insert_text("✓", 1, 339.84, 114.48, Align::Left).unwrap();

    let bytes = doc.to_bytes().unwrap();
    let content = page_content(&bytes);
    assert!(content.contains("339.84 137.52 Td"));
    assert!(content.contains("(3) Tj"));

    let loaded = Document::load_mem(&bytes).unwrap();
    let base_fonts: Vec<Vec<u8>> = loaded
        .objects
        .values()
        .filter_map(|obj| obj.as_dict().ok())
        .filter_map(|dict| dict.get(b"BaseFont").ok())
        .filter_map(|name| name.as_name().ok().map(<[u8]>::to_vec))
        .collect();
    assert_eq!(base_fonts, vec![b"ZapfDingbats".to_vec()]);
}
