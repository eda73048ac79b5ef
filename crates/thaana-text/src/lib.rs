//! Thaana Text - right-to-left text preparation
//!
//! PDF content streams draw glyphs strictly left to right, so right-to-left
//! text has to be put into visual order before it is drawn. This crate provides:
//! - Script classification (combining marks, RTL detection)
//! - Arabic contextual shaping into presentation forms (via `ar-reshaper`)
//! - Bidirectional reordering into visual order, keeping marks after their base
//!
//! Thaana letters never join, so shaping leaves Dhivehi untouched; only the
//! reordering step changes it.
//!
//! # Example
//!
//! ```
//! use thaana_text::to_visual;
//!
//! assert_eq!(to_visual("DECK"), "DECK");
//! assert_eq!(to_visual("ދާ ތަން"), "ންތަ ދާ");
//! ```

mod bidi;
mod script;
mod shaping;

pub use bidi::reorder_visual;
pub use script::{has_rtl, is_mark, is_rtl_char};
pub use shaping::shape_arabic;

/// Prepare logical-order text for left-to-right glyph drawing.
///
/// Runs Arabic shaping followed by visual reordering. Text without any
/// right-to-left characters is returned unchanged.
pub fn to_visual(text: &str) -> String {
    if !has_rtl(text) {
        return text.to_string();
    }
    reorder_visual(&shape_arabic(text))
}
