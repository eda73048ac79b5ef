//! Layout rendering

use crate::assets::{AssetSource, LoadedAssets};
use crate::blocks::BoundContent;
use crate::canvas::{Canvas, PdfCanvas};
use crate::schema::*;
use crate::{Result, TemplateError};
use pdf_core::{PdfDocument, StandardFont};
use thaana_text::to_visual;

/// Layout renderer
pub struct LayoutRenderer<'a> {
    /// The layout to render
    layout: &'a Layout,
}

impl<'a> LayoutRenderer<'a> {
    /// Create a new renderer for a layout
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    /// Asset keys referenced by fonts and image blocks, in layout order
    pub fn asset_keys(&self) -> Vec<&'a str> {
        let fonts = self
            .layout
            .fonts
            .iter()
            .filter_map(|font_def| font_def.asset.as_deref());
        let images = self.layout.blocks.iter().filter_map(|block| match block {
            Block::Image(b) => Some(b.asset.as_str()),
            _ => None,
        });
        fonts.chain(images).collect()
    }

    /// Fetch every referenced asset before anything is drawn
    pub fn load_assets<S: AssetSource + ?Sized>(&self, source: &S) -> Result<LoadedAssets> {
        let assets = LoadedAssets::load(source, self.asset_keys())?;
        log::debug!("loaded {} layout assets", assets.len());
        Ok(assets)
    }

    /// Register all layout fonts with the PDF document
    pub fn load_fonts(&self, doc: &mut PdfDocument, assets: &LoadedAssets) -> Result<()> {
        for font_def in &self.layout.fonts {
            self.load_font(doc, font_def, assets)?;
        }

        // Set up fallback chains after all fonts are loaded
        for font_def in &self.layout.fonts {
            if !font_def.fallback.is_empty() {
                doc.set_font_fallback(&font_def.id, &font_def.fallback)?;
            }
        }

        Ok(())
    }

    fn load_font(&self, doc: &mut PdfDocument, font_def: &FontDef, assets: &LoadedAssets) -> Result<()> {
        if let Some(name) = &font_def.standard {
            let font = StandardFont::from_name(name).ok_or_else(|| {
                TemplateError::FontError(format!("unknown standard font '{}'", name))
            })?;
            doc.add_standard_font(&font_def.id, font)?;
        } else if let Some(key) = &font_def.asset {
            let data = assets.get(key).ok_or_else(|| {
                TemplateError::FontError(format!("font asset '{}' was not loaded", key))
            })?;
            doc.add_font(&font_def.id, data)?;
        } else {
            return Err(TemplateError::FontError(format!(
                "Font '{}' has no source defined",
                font_def.id
            )));
        }
        Ok(())
    }

    /// Build a single-page document from the layout and data
    ///
    /// All assets are fetched first, so a missing asset fails before any
    /// drawing happens.
    pub fn build_document<S: AssetSource + ?Sized>(
        &self,
        source: &S,
        data: &serde_json::Value,
    ) -> Result<PdfDocument> {
        let assets = self.load_assets(source)?;

        let mut doc = PdfDocument::new(self.layout.page.width, self.layout.page.height);
        self.load_fonts(&mut doc, &assets)?;

        let mut canvas = PdfCanvas::new(&mut doc, 1);
        self.render(&mut canvas, data, &assets)?;

        Ok(doc)
    }

    /// Render the layout with data
    ///
    /// The static pass draws every block's fixed content; the fill pass then
    /// overlays bound values.
    pub fn render(
        &self,
        canvas: &mut dyn Canvas,
        data: &serde_json::Value,
        assets: &LoadedAssets,
    ) -> Result<()> {
        for block in &self.layout.blocks {
            self.render_static(canvas, block, assets)?;
        }
        for block in &self.layout.blocks {
            self.render_fill(canvas, block, data)?;
        }
        Ok(())
    }

    fn render_static(&self, canvas: &mut dyn Canvas, block: &Block, assets: &LoadedAssets) -> Result<()> {
        let styles = &self.layout.styles;
        match block {
            Block::Text(b) => {
                let font = b.font.as_ref().unwrap_or(&styles.label);
                draw_text(canvas, &b.text, font, b.position, b.align)
            }
            Block::Image(b) => {
                let data = assets.get(&b.asset).ok_or_else(|| {
                    TemplateError::InvalidLayout(format!("image asset '{}' was not loaded", b.asset))
                })?;
                canvas.draw_image(data, b.position, b.size, b.fit)
            }
            Block::Field(b) => {
                self.draw_label(canvas, &b.label, b.label_position, b.rtl_label_position)?;
                if let Some(rect) = b.value_box {
                    canvas.draw_rect(rect)?;
                }
                Ok(())
            }
            Block::Choice(b) => {
                for option in &b.options {
                    canvas.draw_rect(option.check_box)?;
                    self.draw_label(
                        canvas,
                        &option.label,
                        option.label_position,
                        option.rtl_label_position,
                    )?;
                }
                Ok(())
            }
        }
    }

    fn render_fill(&self, canvas: &mut dyn Canvas, block: &Block, data: &serde_json::Value) -> Result<()> {
        let styles = &self.layout.styles;
        match block {
            Block::Field(b) => {
                let (Some(text), Some(position)) = (b.resolve(data), b.value_position) else {
                    return Ok(());
                };
                draw_text(canvas, &text, &styles.value, position, Align::Left)
            }
            Block::Choice(b) => match b.resolve(data) {
                Some(option) => {
                    canvas.set_font(&styles.mark)?;
                    canvas.draw_text(&b.mark, option.mark_position, Align::Left)
                }
                None => {
                    log::debug!("{}: no option matches the bound value, nothing marked", b.id);
                    Ok(())
                }
            },
            Block::Text(_) | Block::Image(_) => Ok(()),
        }
    }

    /// English label left-aligned, Dhivehi label right-aligned at its anchor
    fn draw_label(
        &self,
        canvas: &mut dyn Canvas,
        label: &Bilingual,
        en_position: Position,
        dv_position: Position,
    ) -> Result<()> {
        let styles = &self.layout.styles;
        draw_text(canvas, &label.en, &styles.label, en_position, Align::Left)?;
        draw_text(canvas, &label.dv, &styles.rtl_label, dv_position, Align::Right)
    }
}

/// Draw logical-order text, reordering right-to-left runs first
fn draw_text(canvas: &mut dyn Canvas, text: &str, font: &Font, at: Position, align: Align) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    canvas.set_font(font)?;
    canvas.draw_text(&to_visual(text), at, align)
}
