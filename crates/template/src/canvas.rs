//! Drawing surface used by the renderer

use crate::schema::{Align, Font, ImageFit, Position, Rect, Size};
use crate::Result;
use pdf_core::{ImageScaleMode, PdfDocument};

/// Drawing surface with top-left origin coordinates in points
pub trait Canvas {
    /// Select the font for following text
    fn set_font(&mut self, font: &Font) -> Result<()>;

    /// Draw text, already in visual order, with its baseline at `at`
    fn draw_text(&mut self, text: &str, at: Position, align: Align) -> Result<()>;

    /// Stroke a rectangle outline
    fn draw_rect(&mut self, rect: Rect) -> Result<()>;

    /// Draw an image with its top-left corner at `at`
    fn draw_image(&mut self, data: &[u8], at: Position, size: Size, fit: ImageFit) -> Result<()>;
}

/// Canvas drawing onto one page of a [`PdfDocument`]
pub struct PdfCanvas<'a> {
    doc: &'a mut PdfDocument,
    page: usize,
}

impl<'a> PdfCanvas<'a> {
    /// Draw on `page` (1-indexed)
    pub fn new(doc: &'a mut PdfDocument, page: usize) -> Self {
        Self { doc, page }
    }
}

fn convert_align(align: Align) -> pdf_core::Align {
    match align {
        Align::Left => pdf_core::Align::Left,
        Align::Center => pdf_core::Align::Center,
        Align::Right => pdf_core::Align::Right,
    }
}

fn convert_fit(fit: ImageFit) -> ImageScaleMode {
    match fit {
        ImageFit::Stretch => ImageScaleMode::Stretch,
        ImageFit::FitBox => ImageScaleMode::FitBox,
    }
}

impl Canvas for PdfCanvas<'_> {
    fn set_font(&mut self, font: &Font) -> Result<()> {
        self.doc.set_font(&font.family, font.size)?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Position, align: Align) -> Result<()> {
        self.doc
            .insert_text(text, self.page, at.x, at.y, convert_align(align))?;
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect) -> Result<()> {
        self.doc
            .draw_rect(self.page, rect.x, rect.y, rect.width, rect.height)?;
        Ok(())
    }

    fn draw_image(&mut self, data: &[u8], at: Position, size: Size, fit: ImageFit) -> Result<()> {
        self.doc.insert_image_scaled(
            data,
            self.page,
            at.x,
            at.y,
            size.width,
            size.height,
            convert_fit(fit),
        )?;
        Ok(())
    }
}

/// A drawing call captured by [`RecordingCanvas`]
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        font: Option<Font>,
        position: Position,
        align: Align,
    },
    Rect(Rect),
    Image {
        len: usize,
        position: Position,
        size: Size,
    },
}

/// Canvas that records drawing calls instead of producing a document
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    font: Option<Font>,
    ops: Vec<DrawOp>,
}

#[cfg(any(test, feature = "testing"))]
impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Every drawn string, in drawing order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text operations drawn with the given font family
    pub fn texts_in_font(&self, family: &str) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| {
                matches!(op, DrawOp::Text { font: Some(font), .. } if font.family == family)
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Canvas for RecordingCanvas {
    fn set_font(&mut self, font: &Font) -> Result<()> {
        self.font = Some(font.clone());
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Position, align: Align) -> Result<()> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            font: self.font.clone(),
            position: at,
            align,
        });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect) -> Result<()> {
        self.ops.push(DrawOp::Rect(rect));
        Ok(())
    }

    fn draw_image(&mut self, data: &[u8], at: Position, size: Size, _fit: ImageFit) -> Result<()> {
        self.ops.push(DrawOp::Image {
            len: data.len(),
            position: at,
            size,
        });
        Ok(())
    }
}
