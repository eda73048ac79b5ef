//! Ticket PDF generation

use crate::assets::FsAssets;
use crate::sanitize::ticket_filename;
use crate::{Result, TicketError, TicketRecord};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use template::{parse_layout, AssetSource, Canvas, Layout, LayoutRenderer};

/// Ferry ticket layout (7 x 3.5 inch page, coordinates in points from the top-left)
pub const FERRY_TICKET_LAYOUT: &str = include_str!("../layouts/ferry_ticket.json");

/// A finished ticket document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTicket {
    /// PDF file contents
    pub bytes: Vec<u8>,
    /// Suggested download filename
    pub filename: String,
}

/// Renders ferry tickets from records
///
/// Assets are read through `S` on every render, so a font or emblem
/// replaced on disk is picked up by the next ticket.
pub struct TicketGenerator<S = FsAssets> {
    layout: Layout,
    assets: S,
}

impl<S: AssetSource> TicketGenerator<S> {
    /// Create a generator using the built-in ferry ticket layout
    pub fn new(assets: S) -> Result<Self> {
        Self::with_layout(FERRY_TICKET_LAYOUT, assets)
    }

    /// Create a generator from a layout JSON document
    pub fn with_layout(layout_json: &str, assets: S) -> Result<Self> {
        let layout = parse_layout(layout_json)?;
        Ok(Self { layout, assets })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Render a ticket to PDF bytes
    pub fn render(&self, record: &TicketRecord) -> Result<RenderedTicket> {
        let data = serde_json::to_value(record)?;
        let mut doc = LayoutRenderer::new(&self.layout).build_document(&self.assets, &data)?;
        let bytes = doc.to_bytes()?;
        let filename = ticket_filename(record);

        log::debug!("rendered {} ({} bytes)", filename, bytes.len());
        Ok(RenderedTicket { bytes, filename })
    }

    /// Draw a ticket onto any canvas
    pub fn render_to_canvas(&self, record: &TicketRecord, canvas: &mut dyn Canvas) -> Result<()> {
        let data = serde_json::to_value(record)?;
        let renderer = LayoutRenderer::new(&self.layout);
        let assets = renderer.load_assets(&self.assets)?;
        renderer.render(canvas, &data, &assets)?;
        Ok(())
    }

    /// Render a ticket and write it into `dir` under its sanitized filename.
    ///
    /// The directory is created if needed. The file is written to a temporary
    /// file in the same directory and renamed into place, replacing any
    /// earlier ticket with the same name.
    pub fn render_to_dir(&self, record: &TicketRecord, dir: &Path) -> Result<(RenderedTicket, PathBuf)> {
        let ticket = self.render(record)?;

        std::fs::create_dir_all(dir)?;
        let path = dir.join(&ticket.filename);

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&ticket.bytes)?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| TicketError::Io(e.error))?;

        log::info!("wrote ticket {}", path.display());
        Ok((ticket, path))
    }
}
