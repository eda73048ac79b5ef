//! Template Engine - declarative single-page layouts
//!
//! This crate provides:
//! - Layout JSON schema types
//! - Layout parsing and validation
//! - Asset lookup through the [`AssetSource`] trait
//! - Two-pass rendering (static template, then bound values) onto a [`Canvas`]
//! - Data binding via JSONPath-like expressions
//!
//! Text containing right-to-left script is shaped and reordered into visual
//! order before it reaches the canvas.
//!
//! # Example
//!
//! ```ignore
//! use template::{parse_layout, LayoutRenderer, MemoryAssets};
//!
//! let layout = parse_layout(layout_json)?;
//! let assets = MemoryAssets::new().with("font", font_bytes);
//! let data: serde_json::Value = serde_json::from_str(data_json)?;
//! let mut doc = LayoutRenderer::new(&layout).build_document(&assets, &data)?;
//! let pdf_bytes = doc.to_bytes()?;
//! ```

mod assets;
pub mod blocks;
mod canvas;
pub mod parser;
mod renderer;
mod schema;

pub use assets::{AssetError, AssetSource, LoadedAssets, MemoryAssets};
pub use canvas::{Canvas, PdfCanvas};
#[cfg(any(test, feature = "testing"))]
pub use canvas::{DrawOp, RecordingCanvas};
pub use parser::{parse_layout, validate_layout};
pub use renderer::LayoutRenderer;
pub use schema::*;

use thiserror::Error;

/// Errors that can occur during layout processing
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to parse layout: {0}")]
    ParseError(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, TemplateError>;
