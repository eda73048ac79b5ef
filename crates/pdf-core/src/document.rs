//! PDF Document builder

use crate::font::{FontData, PdfFont};
use crate::graphics::generate_rect_operators;
use crate::image::{
    calculate_scaled_dimensions, generate_image_operators, ImageScaleMode, ImageXObject,
};
use crate::standard::StandardFont;
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, PdfError, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// A segment of text with its associated font
struct TextSegment {
    text: String,
    font_name: String,
}

/// A buffered text operation for deferred encoding
///
/// Text is buffered during rendering and encoded during save,
/// after fonts have been subsetted and glyph IDs remapped.
#[derive(Debug, Clone)]
struct BufferedTextOp {
    text: String,
    /// Registered font name (e.g., "faruma")
    font_name: String,
    /// Font resource name (e.g., "F1")
    font_resource_name: String,
    /// X coordinate (PDF coordinates, alignment already applied)
    x: f64,
    /// Y coordinate (PDF coordinates)
    y: f64,
    font_size: f32,
}

/// One entry in a page's content stream, kept in drawing order
#[derive(Debug, Clone)]
enum ContentOp {
    /// Operators that are final as soon as they are drawn
    Raw(Vec<u8>),
    /// Text whose glyph encoding is only known after subsetting
    Text(BufferedTextOp),
}

/// Stroke width of rectangle outlines, in points
const OUTLINE_WIDTH: f64 = 1.0;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// A page of the document being built
#[derive(Debug, Clone)]
struct PageSpec {
    id: ObjectId,
    width: f64,
    height: f64,
    content: Vec<ContentOp>,
    /// Font name -> resource name
    fonts: BTreeMap<String, String>,
    /// Resource name -> image object
    images: BTreeMap<String, ObjectId>,
}

/// PDF Document builder providing high-level drawing operations
///
/// Coordinates passed to drawing methods are in points, measured from the
/// top-left corner of the page.
#[derive(Debug)]
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Reserved ID of the page tree root
    pages_id: ObjectId,
    pages: Vec<PageSpec>,
    /// Registered fonts (name -> font)
    fonts: BTreeMap<String, PdfFont>,
    current_font: Option<String>,
    current_font_size: f32,
    /// Font fallback chains (font -> list of fallback fonts)
    font_fallbacks: BTreeMap<String, Vec<String>>,
    next_font_resource: u32,
    /// Embedded images (data hash -> PDF object ID, pixel size)
    embedded_images: BTreeMap<u64, (ObjectId, u32, u32)>,
    next_image_resource: u32,
    finalized: bool,
}

impl PdfDocument {
    /// Create a document with a single blank page of the given size in points
    pub fn new(width: f64, height: f64) -> Self {
        let mut inner = Document::with_version("1.7");
        let pages_id = inner.new_object_id();
        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        let mut doc = Self {
            inner,
            pages_id,
            pages: Vec::new(),
            fonts: BTreeMap::new(),
            current_font: None,
            current_font_size: 12.0,
            font_fallbacks: BTreeMap::new(),
            next_font_resource: 1,
            embedded_images: BTreeMap::new(),
            next_image_resource: 1,
            finalized: false,
        };
        doc.add_blank_page(width, height);
        doc
    }

    /// Append a blank page
    ///
    /// # Returns
    /// New page number (1-indexed)
    fn add_blank_page(&mut self, width: f64, height: f64) -> usize {
        let id = self.inner.new_object_id();
        self.pages.push(PageSpec {
            id,
            width,
            height,
            content: Vec::new(),
            fonts: BTreeMap::new(),
            images: BTreeMap::new(),
        });
        self.pages.len()
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page size in points (width, height)
    pub fn page_size(&self, page: usize) -> Result<(f64, f64)> {
        let spec = self.page(page)?;
        Ok((spec.width, spec.height))
    }

    fn page(&self, page: usize) -> Result<&PageSpec> {
        let page_count = self.pages.len();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(&self.pages[page - 1])
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut PageSpec> {
        let page_count = self.pages.len();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(&mut self.pages[page - 1])
    }

    fn register_font(&mut self, name: &str, font: PdfFont) -> Result<()> {
        if self.fonts.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }
        self.fonts.insert(name.to_string(), font);
        Ok(())
    }

    /// Add a TrueType font to the document
    ///
    /// # Arguments
    /// * `name` - Font identifier used with `set_font`
    /// * `ttf_data` - TrueType font file bytes
    pub fn add_font(&mut self, name: &str, ttf_data: &[u8]) -> Result<()> {
        let font = FontData::from_ttf(name, ttf_data)?;
        self.register_font(name, PdfFont::TrueType(font))
    }

    /// Register one of the base-14 fonts under a name
    pub fn add_standard_font(&mut self, name: &str, font: StandardFont) -> Result<()> {
        self.register_font(name, PdfFont::Standard(font))
    }

    /// Set font fallback chain for a font
    ///
    /// Characters the primary font lacks are drawn with the first fallback that has them.
    pub fn set_font_fallback(&mut self, font: &str, fallbacks: &[String]) -> Result<()> {
        if !self.fonts.contains_key(font) {
            return Err(PdfError::FontNotFound(font.to_string()));
        }
        if let Some(missing) = fallbacks.iter().find(|f| !self.fonts.contains_key(*f)) {
            return Err(PdfError::FontNotFound(missing.clone()));
        }

        self.font_fallbacks
            .insert(font.to_string(), fallbacks.to_vec());
        Ok(())
    }

    /// Set the current font and size
    pub fn set_font(&mut self, name: &str, size: f32) -> Result<()> {
        if !self.fonts.contains_key(name) {
            return Err(PdfError::FontNotFound(name.to_string()));
        }
        self.current_font = Some(name.to_string());
        self.current_font_size = size;
        Ok(())
    }

    fn current_font_name(&self) -> Result<String> {
        self.current_font
            .clone()
            .ok_or_else(|| PdfError::FontNotFound("No font set".to_string()))
    }

    fn font(&self, name: &str) -> Result<&PdfFont> {
        self.fonts
            .get(name)
            .ok_or_else(|| PdfError::FontNotFound(name.to_string()))
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert, in visual (left-to-right drawing) order
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Text alignment relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_height = self.page(page)?.height;

        if text.is_empty() {
            return Ok(());
        }

        let font_name = self.current_font_name()?;
        let segments = if self.font_fallbacks.contains_key(&font_name) {
            self.segment_text_by_font(text, &font_name)
        } else {
            vec![TextSegment {
                text: text.to_string(),
                font_name,
            }]
        };

        let font_size = self.current_font_size;
        let mut widths = Vec::with_capacity(segments.len());
        for segment in &segments {
            let width = self.font(&segment.font_name)?.text_width_points(&segment.text, font_size);
            widths.push(width as f64);
        }
        let total_width: f64 = widths.iter().sum();

        let pdf_y = page_height - y;
        let mut current_x = match align {
            Align::Left => x,
            Align::Center => x - (total_width / 2.0),
            Align::Right => x - total_width,
        };

        for (segment, width) in segments.into_iter().zip(widths) {
            if let Some(font) = self.fonts.get_mut(&segment.font_name) {
                font.add_chars(&segment.text);
            }
            let font_resource_name = self.get_or_create_font_ref(&segment.font_name, page)?;

            let op = BufferedTextOp {
                text: segment.text,
                font_name: segment.font_name,
                font_resource_name,
                x: current_x,
                y: pdf_y,
                font_size,
            };
            self.page_mut(page)?.content.push(ContentOp::Text(op));

            current_x += width;
        }

        Ok(())
    }

    /// Segment text by font availability, using fallbacks when needed
    ///
    /// Each character goes to the primary font if it has the glyph, else to the
    /// first fallback that does, else back to the primary (rendering .notdef).
    /// Consecutive characters with the same font form one segment.
    fn segment_text_by_font(&self, text: &str, primary: &str) -> Vec<TextSegment> {
        let fallbacks = self.font_fallbacks.get(primary);
        let mut segments: Vec<TextSegment> = Vec::new();

        for c in text.chars() {
            let has = |name: &str| self.fonts.get(name).is_some_and(|f| f.has_glyph(c));
            let font_for_char = if has(primary) {
                primary
            } else {
                fallbacks
                    .and_then(|list| list.iter().find(|f| has(f.as_str())))
                    .map(String::as_str)
                    .unwrap_or(primary)
            };

            match segments.last_mut() {
                Some(last) if last.font_name == font_for_char => last.text.push(c),
                _ => segments.push(TextSegment {
                    text: c.to_string(),
                    font_name: font_for_char.to_string(),
                }),
            }
        }

        segments
    }

    /// Stroke a 1pt black rectangle outline
    ///
    /// # Arguments
    /// * `page` - Page number (1-indexed)
    /// * `x` - Left edge in points
    /// * `y` - Top edge in points (from top)
    /// * `width`, `height` - Size in points
    pub fn draw_rect(&mut self, page: usize, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        let page_height = self.page(page)?.height;
        let ops = generate_rect_operators(
            x,
            page_height - y - height,
            width,
            height,
            OUTLINE_WIDTH,
            Color::black(),
        );
        self.page_mut(page)?.content.push(ContentOp::Raw(ops));
        Ok(())
    }

    /// Insert an image stretched to the given box
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - Left edge in points
    /// * `y` - Top edge in points (from top)
    /// * `width`, `height` - Box size in points
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.insert_image_scaled(data, page, x, y, width, height, ImageScaleMode::Stretch)
    }

    /// Insert an image with scaling mode. The image is anchored at the box's top-left corner.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_scaled(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<()> {
        let page_height = self.page(page)?.height;
        let (resource_name, pixel_width, pixel_height) = self.get_or_create_image_ref(data, page)?;
        let (draw_width, draw_height) =
            calculate_scaled_dimensions(pixel_width, pixel_height, width, height, mode);

        let ops = generate_image_operators(
            &resource_name,
            x,
            page_height - y - draw_height,
            draw_width,
            draw_height,
        );
        self.page_mut(page)?.content.push(ContentOp::Raw(ops));
        Ok(())
    }

    /// Get or create an image reference for a specific page
    ///
    /// Returns the resource name (e.g., "Im1") and pixel dimensions.
    /// Images are deduplicated by hash of their data.
    fn get_or_create_image_ref(&mut self, data: &[u8], page: usize) -> Result<(String, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        let (object_id, width, height) = match self.embedded_images.get(&data_hash).copied() {
            Some(entry) => entry,
            None => {
                let xobject = ImageXObject::from_bytes(data).map_err(|e| {
                    PdfError::ImageError(format!("Failed to create image XObject: {e}"))
                })?;

                let mut stream = xobject.to_pdf_stream();
                if let Some(mask) = xobject.soft_mask_stream() {
                    let mask_id = self.inner.add_object(mask);
                    stream.dict.set("SMask", Object::Reference(mask_id));
                }
                let object_id = self.inner.add_object(stream);

                let entry = (object_id, xobject.width, xobject.height);
                self.embedded_images.insert(data_hash, entry);
                entry
            }
        };

        let next = self.next_image_resource;
        let spec = self.page_mut(page)?;
        if let Some((name, _)) = spec.images.iter().find(|(_, id)| **id == object_id) {
            return Ok((name.clone(), width, height));
        }

        let resource_name = format!("Im{next}");
        spec.images.insert(resource_name.clone(), object_id);
        self.next_image_resource += 1;

        Ok((resource_name, width, height))
    }

    /// Get or create a font reference for a specific page
    ///
    /// Returns the resource name (e.g., "F1", "F2") for use in content streams.
    /// Fonts are embedded at save time, once every drawn character is known.
    fn get_or_create_font_ref(&mut self, font_name: &str, page: usize) -> Result<String> {
        let next = self.next_font_resource;
        let spec = self.page_mut(page)?;
        if let Some(resource_name) = spec.fonts.get(font_name) {
            return Ok(resource_name.clone());
        }

        let resource_name = format!("F{next}");
        spec.fonts
            .insert(font_name.to_string(), resource_name.clone());
        self.next_font_resource += 1;

        Ok(resource_name)
    }

    /// Serialize the document to bytes
    ///
    /// The first call finalizes the document; drawing after that has no effect
    /// on the output.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        if !self.finalized {
            // 1. Subset fonts (creates subsets with only used glyphs)
            self.subset_fonts();
            // 2. Embed fonts into PDF
            let font_ids = self.embed_fonts()?;
            // 3. Encode content with remapped glyph IDs and write page objects
            self.write_pages(&font_ids)?;
            self.finalized = true;
        }

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    /// Create subsets for all embedded fonts that have been used
    fn subset_fonts(&mut self) {
        for font in self.fonts.values_mut() {
            if let PdfFont::TrueType(data) = font {
                if !data.used_chars.is_empty() {
                    data.create_subset();
                }
            }
        }
    }

    /// Embed every font referenced by a page, returning font name -> font object
    fn embed_fonts(&mut self) -> Result<BTreeMap<String, ObjectId>> {
        let used: std::collections::BTreeSet<String> = self
            .pages
            .iter()
            .flat_map(|page| page.fonts.keys().cloned())
            .collect();

        let mut ids = BTreeMap::new();
        for font_name in used {
            let id = match self.font(&font_name)?.clone() {
                PdfFont::Standard(standard) => self.inner.add_object(standard.to_pdf_dictionary()),
                PdfFont::TrueType(data) => self.embed_truetype(&data)?,
            };
            ids.insert(font_name, id);
        }
        Ok(ids)
    }

    /// Embed a single TrueType font as Type0 / CIDFontType2
    fn embed_truetype(&mut self, font_data: &FontData) -> Result<ObjectId> {
        let font_objects = font_data.to_pdf_objects()?;

        let font_file_id = self.inner.add_object(font_objects.font_file_stream);

        let mut font_descriptor = font_objects.font_descriptor;
        font_descriptor.set("FontFile2", Object::Reference(font_file_id));
        let font_descriptor_id = self.inner.add_object(font_descriptor);

        let mut cid_font = font_objects.cid_font;
        cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
        let cid_font_id = self.inner.add_object(cid_font);

        let tounicode_id = self.inner.add_object(font_objects.tounicode_stream);

        let mut type0_font = font_objects.type0_font;
        type0_font.set(
            "DescendantFonts",
            Object::Array(vec![Object::Reference(cid_font_id)]),
        );
        type0_font.set("ToUnicode", Object::Reference(tounicode_id));

        Ok(self.inner.add_object(type0_font))
    }

    /// Encode each page's content stream and write page objects plus the page tree
    fn write_pages(&mut self, font_ids: &BTreeMap<String, ObjectId>) -> Result<()> {
        let pages = std::mem::take(&mut self.pages);
        let mut kids = Vec::with_capacity(pages.len());

        for spec in &pages {
            let mut content = Vec::new();
            for op in &spec.content {
                match op {
                    ContentOp::Raw(bytes) => content.extend_from_slice(bytes),
                    ContentOp::Text(text) => content.extend(self.encode_text_op(text)?),
                }
            }
            let content_id = self.inner.add_object(Stream::new(Dictionary::new(), content));

            let mut font_dict = Dictionary::new();
            for (font_name, resource_name) in &spec.fonts {
                let id = font_ids
                    .get(font_name)
                    .ok_or_else(|| PdfError::FontNotFound(font_name.clone()))?;
                font_dict.set(resource_name.as_bytes(), Object::Reference(*id));
            }
            let mut xobject_dict = Dictionary::new();
            for (resource_name, id) in &spec.images {
                xobject_dict.set(resource_name.as_bytes(), Object::Reference(*id));
            }
            let mut resources = Dictionary::new();
            if !spec.fonts.is_empty() {
                resources.set("Font", font_dict);
            }
            if !spec.images.is_empty() {
                resources.set("XObject", xobject_dict);
            }

            let page = dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    Object::Real(spec.width as _),
                    Object::Real(spec.height as _),
                ],
                "Resources" => resources,
                "Contents" => content_id,
            };
            self.inner.objects.insert(spec.id, Object::Dictionary(page));
            kids.push(Object::Reference(spec.id));
        }

        let count = kids.len() as i64;
        self.inner.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        self.pages = pages;
        Ok(())
    }

    /// Encode a buffered text operation with the font's final glyph IDs
    fn encode_text_op(&self, op: &BufferedTextOp) -> Result<Vec<u8>> {
        let font = self.font(&op.font_name)?;
        let ctx = TextRenderContext {
            font_name: op.font_resource_name.clone(),
            font_size: op.font_size,
            text_width: font.text_width_points(&op.text, op.font_size) as f64,
            color: Color::black(),
        };
        // Alignment was applied when the text was buffered
        Ok(generate_text_operators(
            &font.encode_text(&op.text),
            op.x,
            op.y,
            Align::Left,
            &ctx,
        ))
    }
}
