//! Sea Queen ferry tickets
//!
//! Renders a bilingual (English/Dhivehi) 7 x 3.5 inch boarding pass from a
//! [`TicketRecord`] using the built-in ferry layout, and derives the
//! download filename from the passenger initials, date and route.
//!
//! # Example
//!
//! ```ignore
//! use ticket::{FsAssets, TicketGenerator, TicketRecord};
//!
//! let generator = TicketGenerator::new(FsAssets::new("faruma.ttf", "static/crown.png"))?;
//! let (ticket, path) = generator.render_to_dir(&record, Path::new("generated_tickets"))?;
//! ```

mod assets;
mod generator;
mod record;
pub mod sanitize;

pub use assets::{FsAssets, EMBLEM_KEY, FONT_KEY};
pub use generator::{RenderedTicket, TicketGenerator, FERRY_TICKET_LAYOUT};
pub use record::{Deck, TicketRecord};
pub use sanitize::{initials, sanitize_filename, ticket_filename};

use template::{AssetError, TemplateError};
use thiserror::Error;

/// Errors that can occur while producing a ticket
#[derive(Debug, Error)]
pub enum TicketError {
    /// A font or image the layout needs does not exist
    #[error("{0}")]
    ResourceNotFound(AssetError),

    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    #[error("Layout error: {0}")]
    Template(TemplateError),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<TemplateError> for TicketError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::Asset(asset @ AssetError::NotFound { .. }) => {
                TicketError::ResourceNotFound(asset)
            }
            TemplateError::PdfError(err) => TicketError::Pdf(err),
            other => TicketError::Template(other),
        }
    }
}

/// Result type for ticket operations
pub type Result<T> = std::result::Result<T, TicketError>;
