//! Character classification for right-to-left scripts

use unicode_bidi::{bidi_class, BidiClass};

/// Check if a character is a combining mark that attaches to the preceding base
pub fn is_mark(c: char) -> bool {
    bidi_class(c) == BidiClass::NSM
}

/// Check if a character has strong right-to-left directionality
pub fn is_rtl_char(c: char) -> bool {
    matches!(bidi_class(c), BidiClass::R | BidiClass::AL)
}

/// Check if text contains any strong right-to-left character
pub fn has_rtl(text: &str) -> bool {
    text.chars().any(is_rtl_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_mark() {
        assert!(is_mark('ި'));
        assert!(is_mark('\u{064E}')); // Arabic fatha
        assert!(!is_mark('ދ'));
        assert!(!is_mark('a'));
    }

    #[test]
    fn test_rtl_detection() {
        assert!(is_rtl_char('ތ'));
        assert!(is_rtl_char('م'));
        assert!(!is_rtl_char('1'));
        assert!(!is_rtl_char(' '));
        assert!(has_rtl("TO / ދާ ތަން"));
        assert!(!has_rtl("MVR 150"));
    }
}
