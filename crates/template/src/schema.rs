//! Layout JSON schema types

use serde::{Deserialize, Serialize};

/// Root layout structure: one fixed-size page drawn from a list of blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// Schema version
    pub version: String,

    /// Page size in points
    pub page: Size,

    /// Font definitions
    #[serde(default)]
    pub fonts: Vec<FontDef>,

    /// Fonts used by the bilingual blocks
    pub styles: Styles,

    /// Content blocks, drawn in order
    pub blocks: Vec<Block>,
}

/// Width and height in points
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Position in points, measured from the top-left corner of the page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    /// X coordinate in points
    pub x: f64,

    /// Y coordinate in points (from top)
    pub y: f64,
}

/// Rectangle with its top-left corner at (x, y)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Font definition
///
/// Exactly one of `standard` or `asset` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontDef {
    /// Font identifier (used by styles and blocks)
    pub id: String,

    /// PDF base-14 font name, e.g. "Helvetica-Bold"
    #[serde(default)]
    pub standard: Option<String>,

    /// Asset key of a TrueType font file
    #[serde(default)]
    pub asset: Option<String>,

    /// Fallback font IDs (for missing glyphs)
    #[serde(default)]
    pub fallback: Vec<String>,
}

/// Font specification for a piece of text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Font {
    /// Font ID
    pub family: String,

    /// Font size in points
    #[serde(default = "default_font_size")]
    pub size: f32,
}

fn default_font_size() -> f32 {
    12.0
}

/// Shared fonts for field and choice blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Styles {
    /// English labels
    pub label: Font,

    /// Right-to-left labels
    #[serde(rename = "rtlLabel")]
    pub rtl_label: Font,

    /// Filled-in values
    pub value: Font,

    /// Choice check mark
    pub mark: Font,
}

/// Text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// How an image fills its box
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ImageFit {
    /// Stretch to the exact box
    #[default]
    Stretch,
    /// Keep aspect ratio, fit inside the box
    FitBox,
}

/// A label in English and in Dhivehi
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bilingual {
    pub en: String,
    pub dv: String,
}

/// Content block (tagged union)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// Static text
    Text(TextBlock),

    /// Raster image from an asset
    Image(ImageBlock),

    /// Labeled field with an optional box and bound value
    Field(FieldBlock),

    /// Set of checkbox options, one of which is marked from bound data
    Choice(ChoiceBlock),
}

/// Static text block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// Block identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Text in logical order; right-to-left runs are reordered before drawing
    pub text: String,

    /// Anchor position (baseline)
    pub position: Position,

    /// Font specification (defaults to the label style)
    #[serde(default)]
    pub font: Option<Font>,

    /// Text alignment
    #[serde(default)]
    pub align: Align,
}

/// Image block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Block identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Asset key of the image file
    pub asset: String,

    /// Top-left corner
    pub position: Position,

    /// Box size in points
    pub size: Size,

    #[serde(default)]
    pub fit: ImageFit,
}

/// Labeled field
///
/// The static pass draws the English label, the right-aligned Dhivehi label
/// and the outline box. The fill pass draws the bound value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldBlock {
    /// Field identifier
    pub id: String,

    pub label: Bilingual,

    /// English label baseline (left-aligned)
    #[serde(rename = "labelPosition")]
    pub label_position: Position,

    /// Dhivehi label anchor (right-aligned)
    #[serde(rename = "rtlLabelPosition")]
    pub rtl_label_position: Position,

    /// Outline box for the value
    #[serde(rename = "box")]
    #[serde(default)]
    pub value_box: Option<Rect>,

    /// Data binding path (JSONPath-like)
    #[serde(default)]
    pub bind: Option<String>,

    /// Value baseline (left-aligned); required when `bind` is set
    #[serde(rename = "valuePosition")]
    #[serde(default)]
    pub value_position: Option<Position>,

    /// Fixed text drawn before the value, e.g. a currency code
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Choice block: checkbox rows with one mark drawn on the row matching the bound value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceBlock {
    /// Choice identifier
    pub id: String,

    /// Data binding path; compared case-insensitively with each option value
    pub bind: String,

    /// Mark glyph drawn in the selected checkbox
    #[serde(default = "default_mark")]
    pub mark: String,

    pub options: Vec<ChoiceOption>,
}

fn default_mark() -> String {
    "✓".to_string()
}

/// One checkbox row of a choice block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Value that selects this row
    pub value: String,

    pub label: Bilingual,

    /// English label baseline (left-aligned)
    #[serde(rename = "labelPosition")]
    pub label_position: Position,

    /// Dhivehi label anchor (right-aligned)
    #[serde(rename = "rtlLabelPosition")]
    pub rtl_label_position: Position,

    /// Checkbox outline
    #[serde(rename = "box")]
    pub check_box: Rect,

    /// Mark baseline when selected
    #[serde(rename = "markPosition")]
    pub mark_position: Position,
}

/// Whether a bound value selects an option: surrounding whitespace is
/// ignored and ASCII letters compare case-insensitively
pub fn choice_matches(option: &str, value: &str) -> bool {
    option.eq_ignore_ascii_case(value.trim())
}

impl ChoiceBlock {
    /// Option selected by a value, per [`choice_matches`]
    pub fn selected(&self, value: &str) -> Option<&ChoiceOption> {
        self.options
            .iter()
            .find(|option| choice_matches(&option.value, value))
    }
}

impl Block {
    /// Block identifier, if any
    pub fn id(&self) -> Option<&str> {
        match self {
            Block::Text(b) => b.id.as_deref(),
            Block::Image(b) => b.id.as_deref(),
            Block::Field(b) => Some(&b.id),
            Block::Choice(b) => Some(&b.id),
        }
    }
}
