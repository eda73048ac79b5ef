//! Font handling for PDF documents

use crate::standard::StandardFont;
use crate::{PdfError, Result};
use lopdf::{Dictionary, Object, Stream};
use std::collections::{BTreeMap, BTreeSet};
use subsetter::GlyphRemapper;

/// A font registered with a document
#[derive(Debug, Clone)]
pub enum PdfFont {
    /// Embedded TrueType font (Type0 / CIDFontType2, Identity-H)
    TrueType(FontData),
    /// One of the PDF base-14 fonts, referenced by name only
    Standard(StandardFont),
}

impl PdfFont {
    /// Check if the font can render the given character
    pub fn has_glyph(&self, c: char) -> bool {
        match self {
            PdfFont::TrueType(font) => font.has_glyph(c),
            PdfFont::Standard(font) => font.has_glyph(c),
        }
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        match self {
            PdfFont::TrueType(font) => font.text_width_points(text, font_size),
            PdfFont::Standard(font) => font.text_width_points(text, font_size),
        }
    }

    /// Record characters drawn with this font. Only embedded fonts track usage.
    pub fn add_chars(&mut self, text: &str) {
        if let PdfFont::TrueType(font) = self {
            font.add_chars(text);
        }
    }

    /// Encode text as a string operand for the Tj operator
    pub fn encode_text(&self, text: &str) -> String {
        match self {
            PdfFont::TrueType(font) => font.encode_text_hex(text),
            PdfFont::Standard(font) => font.encode_text_literal(text),
        }
    }
}

/// Convert a value in font units to PDF glyph space (1/1000 em)
fn to_glyph_space(value: i32, units_per_em: u16) -> i64 {
    (f64::from(value) * 1000.0 / f64::from(units_per_em.max(1))).round() as i64
}

/// Glyph subset produced by [`FontData::create_subset`]
#[derive(Debug, Clone)]
struct FontSubset {
    /// Subsetted font program
    data: Vec<u8>,
    /// Original glyph ID -> glyph ID inside the subset
    gid_map: BTreeMap<u16, u16>,
}

/// Font data structure for embedded fonts
#[derive(Debug, Clone)]
pub struct FontData {
    /// Font name/identifier
    pub name: String,
    /// Raw TTF data
    pub ttf_data: Vec<u8>,
    /// Characters used (for subsetting)
    pub used_chars: BTreeSet<char>,
    subset: Option<FontSubset>,
}

/// PDF objects generated for font embedding
pub struct FontObjects {
    /// Type0 font dictionary
    pub type0_font: Dictionary,
    /// CIDFont Type2 dictionary
    pub cid_font: Dictionary,
    /// Font descriptor dictionary
    pub font_descriptor: Dictionary,
    /// Font file stream (TTF data)
    pub font_file_stream: Stream,
    /// ToUnicode CMap stream
    pub tounicode_stream: Stream,
}

impl FontData {
    /// Create font data from TTF bytes
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `ttf_data` - TrueType font file bytes
    pub fn from_ttf(name: &str, ttf_data: &[u8]) -> Result<Self> {
        ttf_parser::Face::parse(ttf_data, 0)
            .map_err(|e| PdfError::FontParseError(format!("{name}: {e:?}")))?;

        Ok(Self {
            name: name.to_string(),
            ttf_data: ttf_data.to_vec(),
            used_chars: BTreeSet::new(),
            subset: None,
        })
    }

    // Parsing is cheap (table directory only), so the face is not cached.
    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.ttf_data, 0).ok()
    }

    /// Add characters to the used set (for subsetting)
    pub fn add_chars(&mut self, text: &str) {
        self.used_chars.extend(text.chars());
    }

    /// Get glyph ID for a character
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face()
            .and_then(|face| face.glyph_index(c).map(|id| id.0))
    }

    /// Check if font has a glyph for the given character
    pub fn has_glyph(&self, c: char) -> bool {
        self.glyph_id(c).map(|id| id != 0).unwrap_or(false)
    }

    /// Get font units per em
    pub fn units_per_em(&self) -> u16 {
        self.face().map(|face| face.units_per_em()).unwrap_or(1000)
    }

    /// Calculate text width in font units
    pub fn text_width(&self, text: &str) -> u32 {
        let Some(face) = self.face() else {
            return 0;
        };
        text.chars()
            .filter_map(|c| face.glyph_index(c))
            .filter_map(|gid| face.glyph_hor_advance(gid))
            .map(u32::from)
            .sum()
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let width = self.text_width(text);
        let units_per_em = self.units_per_em() as f32;
        (width as f32 / units_per_em) * font_size
    }

    /// Reduce the embedded font program to the glyphs in `used_chars`.
    ///
    /// Fonts the subsetter cannot rewrite are embedded whole, keeping their
    /// original glyph IDs.
    pub fn create_subset(&mut self) {
        let gids: BTreeSet<u16> = self
            .used_chars
            .iter()
            .filter_map(|&c| self.glyph_id(c))
            .collect();

        let mut remapper = GlyphRemapper::new();
        let mut gid_map = BTreeMap::new();
        for gid in gids {
            gid_map.insert(gid, remapper.remap(gid));
        }

        self.subset = match subsetter::subset(&self.ttf_data, 0, &remapper) {
            Ok(data) => Some(FontSubset { data, gid_map }),
            Err(_) => None,
        };
    }

    /// Glyph ID as written into the content stream
    fn output_gid(&self, c: char) -> u16 {
        let gid = self.glyph_id(c).unwrap_or(0);
        match &self.subset {
            Some(subset) => subset.gid_map.get(&gid).copied().unwrap_or(0),
            None => gid,
        }
    }

    /// Generate all PDF objects needed to embed this font
    pub fn to_pdf_objects(&self) -> Result<FontObjects> {
        let face = self
            .face()
            .ok_or_else(|| PdfError::FontParseError(self.name.clone()))?;
        let font_name = Object::Name(self.name.clone().into());

        let tounicode_content = self.generate_tounicode_cmap();
        let tounicode_stream = Stream::new(
            Dictionary::from_iter(vec![
                ("Type", "CMap".into()),
                ("Length", (tounicode_content.len() as i32).into()),
            ]),
            tounicode_content.into_bytes(),
        );

        let program = match &self.subset {
            Some(subset) => subset.data.clone(),
            None => self.ttf_data.clone(),
        };
        let font_file_stream = Stream::new(
            Dictionary::from_iter(vec![("Length1", (program.len() as i32).into())]),
            program,
        );

        // Descriptor metrics are in glyph space (1/1000 em), not font units
        let units_per_em = face.units_per_em();
        let scale = |value: i16| Object::from(to_glyph_space(i32::from(value), units_per_em));
        let ascender = scale(face.ascender());
        let descender = scale(face.descender());
        let bbox = face.global_bounding_box();
        let font_bbox: Vec<Object> = if bbox.width() > 0 {
            vec![
                scale(bbox.x_min),
                scale(bbox.y_min),
                scale(bbox.x_max),
                scale(bbox.y_max),
            ]
        } else {
            vec![0.into(), descender.clone(), 1000.into(), ascender.clone()]
        };

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", "FontDescriptor".into()),
            ("FontName", font_name.clone()),
            ("Flags", 4.into()), // Symbolic font
            ("FontBBox", font_bbox.into()),
            ("ItalicAngle", 0.into()),
            ("Ascent", ascender.clone()),
            ("Descent", descender),
            ("CapHeight", ascender),
            ("StemV", 80.into()),
        ]);

        let cid_system_info = Dictionary::from_iter(vec![
            ("Registry", Object::string_literal("Adobe")),
            ("Ordering", Object::string_literal("Identity")),
            ("Supplement", 0.into()),
        ]);

        let cid_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "CIDFontType2".into()),
            ("BaseFont", font_name.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("CIDToGIDMap", "Identity".into()),
            ("W", self.generate_widths_array().into()),
            ("DW", 1000.into()),
        ]);

        let type0_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type0".into()),
            ("BaseFont", font_name),
            ("Encoding", "Identity-H".into()),
        ]);

        Ok(FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_stream,
            tounicode_stream,
        })
    }

    /// Encode text as hex string for PDF Tj operator
    pub fn encode_text_hex(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() * 4 + 2);
        result.push('<');
        for c in text.chars() {
            result.push_str(&format!("{:04X}", self.output_gid(c)));
        }
        result.push('>');
        result
    }

    /// Generate /W array for glyph widths, keyed by output glyph ID
    fn generate_widths_array(&self) -> Vec<Object> {
        let Some(face) = self.face() else {
            return Vec::new();
        };

        let units_per_em = face.units_per_em();
        let widths: BTreeMap<u16, i64> = self
            .used_chars
            .iter()
            .filter_map(|&c| {
                let gid = face.glyph_index(c)?;
                let advance = face.glyph_hor_advance(gid).unwrap_or(units_per_em);
                Some((
                    self.output_gid(c),
                    to_glyph_space(i32::from(advance), units_per_em),
                ))
            })
            .collect();

        // Individual mapping format: [gid1 [width1] gid2 [width2] ...]
        let mut array = Vec::with_capacity(widths.len() * 2);
        for (gid, advance) in widths {
            array.push(Object::from(gid as i64));
            array.push(vec![Object::from(advance)].into());
        }
        array
    }

    /// Generate ToUnicode CMap stream content
    fn generate_tounicode_cmap(&self) -> String {
        let mut cmap = String::new();

        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");
        cmap.push_str("1 begincodespacerange\n");
        cmap.push_str("<0000> <FFFF>\n");
        cmap.push_str("endcodespacerange\n");

        // Characters without a glyph all collapse onto .notdef and are skipped
        let mappings: BTreeMap<u16, char> = self
            .used_chars
            .iter()
            .filter(|&&c| self.has_glyph(c))
            .map(|&c| (self.output_gid(c), c))
            .collect();
        let mappings: Vec<(u16, char)> = mappings.into_iter().collect();

        // Limit bfchar sections to 100 entries
        for chunk in mappings.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (gid, c) in chunk {
                let mut utf16 = [0u16; 2];
                let hex: String = c
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04X}> <{hex}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");

        cmap
    }
}
