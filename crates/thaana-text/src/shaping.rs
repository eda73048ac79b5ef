//! Arabic contextual shaping
//!
//! Fonts used through a plain PDF text operator get no OpenType shaping, so
//! joining Arabic-script letters (including the Persian and Urdu additions)
//! are replaced by their presentation forms ahead of time. Thaana, Latin and
//! digits pass through unchanged.

use ar_reshaper::reshape_line;

/// Replace Arabic-script letters with their contextual presentation forms.
///
/// Input and output are both in logical order.
pub fn shape_arabic(text: &str) -> String {
    if !text.chars().any(is_arabic_char) {
        return text.to_string();
    }
    reshape_line(text)
}

fn is_arabic_char(c: char) -> bool {
    matches!(c, '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' | '\u{08A0}'..='\u{08FF}')
}
