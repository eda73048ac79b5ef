//! Vector graphics operators

use crate::document::Color;
use crate::text::pdf_number;

/// Generate operators that stroke a rectangle outline
///
/// # Arguments
/// * `x`, `y` - Lower-left corner in PDF coordinates (from bottom)
/// * `width`, `height` - Size in points
/// * `line_width` - Stroke width in points
/// * `color` - Stroke color
pub fn generate_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    line_width: f64,
    color: Color,
) -> Vec<u8> {
    format!(
        "q\n{} w\n{} {} {} RG\n{} {} {} {} re\nS\nQ\n",
        pdf_number(line_width),
        pdf_number(color.r as f64),
        pdf_number(color.g as f64),
        pdf_number(color.b as f64),
        pdf_number(x),
        pdf_number(y),
        pdf_number(width),
        pdf_number(height),
    )
    .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_operators() {
        let ops = generate_rect_operators(144.0, 187.2, 129.6, 18.0, 1.0, Color::black());
        let ops = String::from_utf8(ops).unwrap();

        assert_eq!(ops, "q\n1 w\n0 0 0 RG\n144 187.2 129.6 18 re\nS\nQ\n");
    }

    #[test]
    fn test_rect_operators_color_and_width() {
        let ops = generate_rect_operators(0.0, 0.0, 10.0, 10.0, 0.5, Color::rgb(0.0, 0.0, 1.0));
        let ops = String::from_utf8(ops).unwrap();

        assert!(ops.contains("0.5 w"));
        assert!(ops.contains("0 0 1 RG"));
        assert!(ops.contains("0 0 10 10 re"));
    }
}
