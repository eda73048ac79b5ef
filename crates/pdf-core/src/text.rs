//! Text rendering utilities

use crate::document::Color;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Format a number for a content stream: at most three decimals, no trailing zeros.
///
/// Keeps operands stable across platforms, so `252.0 - 114.48` prints as `137.52`.
pub fn pdf_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Generate PDF operators for text insertion
///
/// Creates the proper PDF text operators (BT, Tf, Td, Tj, ET) to render text
/// at a specific position with alignment support.
///
/// # Arguments
/// * `operand` - Encoded string operand (e.g., "<0041004200>" or "(AB)")
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    operand: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let mut ops = String::new();
    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        pdf_number(ctx.color.r as f64),
        pdf_number(ctx.color.g as f64),
        pdf_number(ctx.color.b as f64)
    ));
    ops.push_str(&format!(
        "/{} {} Tf\n",
        ctx.font_name,
        pdf_number(ctx.font_size as f64)
    ));
    ops.push_str(&format!(
        "{} {} Td\n",
        pdf_number(x + x_offset),
        pdf_number(y)
    ));
    ops.push_str(&format!("{operand} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(font_name: &str, font_size: f32, text_width: f64) -> TextRenderContext {
        TextRenderContext {
            font_name: font_name.to_string(),
            font_size,
            text_width,
            color: Color::black(),
        }
    }

    #[test]
    fn test_pdf_number() {
        assert_eq!(pdf_number(100.0), "100");
        assert_eq!(pdf_number(147.6), "147.6");
        assert_eq!(pdf_number(252.0 - 114.48), "137.52");
        assert_eq!(pdf_number(0.0004), "0");
        assert_eq!(pdf_number(-0.0), "0");
        assert_eq!(pdf_number(-12.5), "-12.5");
    }

    #[test]
    fn test_generate_text_operators_left() {
        let ops = generate_text_operators(
            "<00480065006C006C006F>",
            100.0,
            700.0,
            Align::Left,
            &ctx("F1", 12.0, 100.0),
        );
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("BT"));
        assert!(ops_str.contains("/F1 12 Tf"));
        assert!(ops_str.contains("100 700 Td")); // No offset for left align
        assert!(ops_str.contains("<00480065006C006C006F> Tj"));
        assert!(ops_str.contains("ET"));
    }

    #[test]
    fn test_generate_text_operators_center() {
        let ops = generate_text_operators(
            "<0054006500730074>",
            200.0,
            600.0,
            Align::Center,
            &ctx("F2", 14.0, 100.0),
        );
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("/F2 14 Tf"));
        assert!(ops_str.contains("150 600 Td")); // 200 - 50 (half of 100)
    }

    #[test]
    fn test_generate_text_operators_right() {
        let ops = generate_text_operators(
            "(Right)",
            300.0,
            500.0,
            Align::Right,
            &ctx("F3", 16.0, 80.0),
        );
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("/F3 16 Tf"));
        assert!(ops_str.contains("220 500 Td")); // 300 - 80
        assert!(ops_str.contains("(Right) Tj"));
    }

    #[test]
    fn test_generate_text_operators_zero_width() {
        let ops = generate_text_operators("<0041>", 100.0, 700.0, Align::Center, &ctx("F1", 12.0, 0.0));
        let ops_str = String::from_utf8(ops).unwrap();

        // With zero width, center alignment should not change X position
        assert!(ops_str.contains("100 700 Td"));
    }

    #[test]
    fn test_generate_text_operators_fractional_size() {
        let ops = generate_text_operators("(x)", 36.0, 230.4, Align::Left, &ctx("F1", 9.5, 0.0));
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("/F1 9.5 Tf"));
        assert!(ops_str.contains("36 230.4 Td"));
    }

    #[test]
    fn test_generate_text_operators_with_color() {
        let ops = generate_text_operators(
            "<0041>",
            100.0,
            700.0,
            Align::Left,
            &TextRenderContext {
                color: Color::rgb(1.0, 0.0, 0.0),
                ..ctx("F1", 12.0, 100.0)
            },
        );
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("1 0 0 rg"));
    }
}
