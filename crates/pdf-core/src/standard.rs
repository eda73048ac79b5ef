//! PDF base-14 standard fonts
//!
//! These are referenced by name and never embedded, so widths come from the
//! Adobe Font Metrics tables below. The Latin faces use WinAnsiEncoding:
//! printable ASCII, Latin-1 and the Windows-1252 additions at 0x80..=0x9F.

use lopdf::{Dictionary, Object};

/// Supported base-14 fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    ZapfDingbats,
}

/// Characters at WinAnsi codes 0x80..=0x9F (None where the code is unassigned)
#[rustfmt::skip]
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Helvetica advance widths for WinAnsi codes 0x20..=0xFF (1/1000 em)
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 224] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584, 0,
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Helvetica-Bold advance widths for WinAnsi codes 0x20..=0xFF (1/1000 em)
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 224] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584, 0,
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// WinAnsi code for a character, if the encoding has one
fn win_ansi_code(c: char) -> Option<u8> {
    match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => Some(c as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|mapped| *mapped == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

/// ZapfDingbats glyphs reachable from Unicode: (char, code, width)
const DINGBATS: [(char, u8, u16); 3] = [(' ', 0x20, 278), ('✓', 0x33, 755), ('✔', 0x34, 760)];

impl StandardFont {
    /// Look up a font by its PostScript name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Helvetica" => Some(Self::Helvetica),
            "Helvetica-Bold" => Some(Self::HelveticaBold),
            "ZapfDingbats" => Some(Self::ZapfDingbats),
            _ => None,
        }
    }

    /// PostScript name written to /BaseFont
    pub fn base_font(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::ZapfDingbats => "ZapfDingbats",
        }
    }

    fn encode_char(&self, c: char) -> Option<u8> {
        match self {
            Self::Helvetica | Self::HelveticaBold => win_ansi_code(c),
            Self::ZapfDingbats => DINGBATS
                .iter()
                .find(|(ch, _, _)| *ch == c)
                .map(|(_, code, _)| *code),
        }
    }

    /// Check if the font can render the given character
    pub fn has_glyph(&self, c: char) -> bool {
        self.encode_char(c).is_some()
    }

    /// Advance width of a character in 1/1000 em
    pub fn char_width(&self, c: char) -> Option<u16> {
        let code = self.encode_char(c)?;
        match self {
            Self::Helvetica => Some(HELVETICA_WIDTHS[(code - 0x20) as usize]),
            Self::HelveticaBold => Some(HELVETICA_BOLD_WIDTHS[(code - 0x20) as usize]),
            Self::ZapfDingbats => DINGBATS
                .iter()
                .find(|(_, dingbat, _)| *dingbat == code)
                .map(|(_, _, width)| *width),
        }
    }

    /// Calculate text width in points for a given font size.
    /// Unsupported characters are skipped, matching [`encode_text_literal`](Self::encode_text_literal).
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .filter_map(|c| self.char_width(c))
            .map(u32::from)
            .sum();
        units as f32 / 1000.0 * font_size
    }

    /// Encode text as a literal string operand, e.g. `(MVR 50)`
    pub fn encode_text_literal(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('(');
        for code in text.chars().filter_map(|c| self.encode_char(c)) {
            match code {
                b'(' | b')' | b'\\' => {
                    out.push('\\');
                    out.push(code as char);
                }
                0x80..=0xFF => out.push_str(&format!("\\{:03o}", code)),
                _ => out.push(code as char),
            }
        }
        out.push(')');
        out
    }

    /// Simple font dictionary for the page resources
    pub fn to_pdf_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::from_iter(vec![
            ("Type", Object::from("Font")),
            ("Subtype", "Type1".into()),
            ("BaseFont", self.base_font().into()),
        ]);
        if *self != Self::ZapfDingbats {
            dict.set("Encoding", "WinAnsiEncoding");
        }
        dict
    }
}
