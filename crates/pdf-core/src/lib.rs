//! PDF Core - Low-level PDF generation
//!
//! This crate provides functionality for:
//! - Creating fixed-size blank PDF documents
//! - Embedding TrueType fonts (subset to the glyphs actually drawn)
//! - Using the PDF base-14 standard fonts without embedding
//! - Inserting text at specific coordinates with alignment and font fallback
//! - Drawing outline rectangles
//! - Inserting images (JPEG, PNG with transparency)
//!
//! Output is deterministic: the same drawing calls always produce the same bytes.
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{PdfDocument, Align, StandardFont};
//!
//! let mut doc = PdfDocument::new(504.0, 252.0);
//! doc.add_standard_font("helvetica", StandardFont::Helvetica)?;
//! doc.add_font("faruma", &std::fs::read("faruma.ttf")?)?;
//! doc.set_font("helvetica", 12.0)?;
//! doc.insert_text("Hello, World!", 1, 36.0, 40.0, Align::Left)?;
//! doc.draw_rect(1, 36.0, 50.0, 120.0, 18.0)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod graphics;
mod image;
mod standard;
mod text;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use document::{Color, PdfDocument};
pub use font::{FontData, PdfFont};
pub use graphics::generate_rect_operators;
pub use image::ImageScaleMode;
pub use standard::StandardFont;
pub use text::{generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;
