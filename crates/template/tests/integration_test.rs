//! Integration tests for layout rendering

use lopdf::Document;
use pdf_core::testing::{minimal_ttf, solid_png};
use serde_json::json;
use template::{parse_layout, Block, LayoutRenderer, MemoryAssets, TemplateError};

const BOARDING_PASS: &str = r#"{
    "version": "1.0",
    "page": { "width": 504, "height": 252 },
    "fonts": [
        { "id": "label", "standard": "Helvetica" },
        { "id": "bold", "standard": "Helvetica-Bold" },
        { "id": "value", "standard": "Helvetica-Bold", "fallback": ["thaana"] },
        { "id": "mark", "standard": "ZapfDingbats" },
        { "id": "thaana", "asset": "font" }
    ],
    "styles": {
        "label": { "family": "label", "size": 9 },
        "rtlLabel": { "family": "thaana", "size": 9 },
        "value": { "family": "value", "size": 10 },
        "mark": { "family": "mark", "size": 12 }
    },
    "blocks": [
        {
            "type": "text", "text": "TICKET / BOARDING PASS",
            "position": { "x": 468, "y": 14.4 },
            "font": { "family": "bold", "size": 10 },
            "align": "right"
        },
        {
            "type": "image", "asset": "emblem",
            "position": { "x": 79.2, "y": 3.6 },
            "size": { "width": 28.8, "height": 18 }
        },
        {
            "type": "field", "id": "seat",
            "label": { "en": "SEAT NO", "dv": "ސީޓް" },
            "labelPosition": { "x": 288, "y": 158.4 },
            "rtlLabelPosition": { "x": 331.2, "y": 169.2 },
            "box": { "x": 338.4, "y": 147.6, "width": 108, "height": 18 },
            "bind": "$.seat_no",
            "valuePosition": { "x": 342, "y": 162 }
        },
        {
            "type": "field", "id": "price",
            "label": { "en": "PRICE", "dv": "އަގު" },
            "labelPosition": { "x": 288, "y": 194.4 },
            "rtlLabelPosition": { "x": 331.2, "y": 205.2 },
            "box": { "x": 338.4, "y": 183.6, "width": 108, "height": 18 },
            "bind": "$.price",
            "valuePosition": { "x": 342, "y": 198 },
            "prefix": "MVR "
        }
    ]
}"#;

fn assets() -> MemoryAssets {
    MemoryAssets::new()
        .with("font", minimal_ttf(&['ސ', 'ީ', 'ޓ', 'ް', 'އ', 'ަ', 'ގ', 'ު', 'މ', 'ާ']))
        .with("emblem", solid_png(8, 5, [212, 175, 55, 128]))
}

fn render(data: serde_json::Value) -> Vec<u8> {
    let layout = parse_layout(BOARDING_PASS).unwrap();
    let mut doc = LayoutRenderer::new(&layout)
        .build_document(&assets(), &data)
        .unwrap();
    doc.to_bytes().unwrap()
}

fn page_content(bytes: &[u8]) -> String {
    let doc = Document::load_mem(bytes).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}

#[test]
fn test_parse_layout_block_types() {
    let layout = parse_layout(BOARDING_PASS).unwrap();

    assert_eq!(layout.blocks.len(), 4);
    assert!(matches!(layout.blocks[0], Block::Text(_)));
    assert!(matches!(layout.blocks[1], Block::Image(_)));
    assert!(matches!(layout.blocks[2], Block::Field(_)));
    assert_eq!(layout.blocks[3].id(), Some("price"));
}

#[test]
fn test_render_static_and_values() {
    let content = page_content(&render(json!({ "seat_no": "A12", "price": "50" })));

    assert!(content.contains("(TICKET / BOARDING PASS) Tj"));
    assert!(content.contains("(SEAT NO) Tj"));
    assert!(content.contains("(A12) Tj"));
    assert!(content.contains("(MVR 50) Tj"));
    assert!(content.contains("342 54 Td"));
    assert!(content.contains("338.4 86.4 108 18 re"));
    assert!(content.contains(" Do"));
}

#[test]
fn test_thaana_value_uses_fallback_font() {
    let content = page_content(&render(json!({ "seat_no": "ސީޓް", "price": "50" })));

    // Value font is Helvetica-Bold; Thaana glyphs come from the embedded font as hex
    assert!(content.contains("(MVR 50) Tj"));
    assert!(content.matches("> Tj").count() >= 3);
}

#[test]
fn test_render_is_deterministic() {
    let data = json!({ "seat_no": "A12", "price": "50" });
    assert_eq!(render(data.clone()), render(data));
}

#[test]
fn test_missing_emblem() {
    let layout = parse_layout(BOARDING_PASS).unwrap();
    let source = MemoryAssets::new().with("font", minimal_ttf(&['ސ']));

    let result = LayoutRenderer::new(&layout).build_document(&source, &json!({}));
    assert!(matches!(result, Err(TemplateError::Asset(_))));
}
