//! Layout JSON parsing

use crate::{Block, Font, Layout, Result, TemplateError};
use pdf_core::StandardFont;
use std::collections::BTreeSet;

/// Parse a layout from JSON string and validate it
pub fn parse_layout(json: &str) -> Result<Layout> {
    let layout: Layout =
        serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))?;
    validate_layout(&layout)?;
    Ok(layout)
}

fn invalid(message: String) -> TemplateError {
    TemplateError::InvalidLayout(message)
}

/// Check references between fonts, styles and blocks
pub fn validate_layout(layout: &Layout) -> Result<()> {
    if layout.page.width <= 0.0 || layout.page.height <= 0.0 {
        return Err(invalid(format!(
            "page size must be positive, got {}x{}",
            layout.page.width, layout.page.height
        )));
    }

    let mut font_ids = BTreeSet::new();
    for font_def in &layout.fonts {
        if !font_ids.insert(font_def.id.as_str()) {
            return Err(invalid(format!("duplicate font id '{}'", font_def.id)));
        }
        match (&font_def.standard, &font_def.asset) {
            (Some(name), None) => {
                if StandardFont::from_name(name).is_none() {
                    return Err(TemplateError::FontError(format!(
                        "unknown standard font '{}' for '{}'",
                        name, font_def.id
                    )));
                }
            }
            (None, Some(_)) => {}
            _ => {
                return Err(TemplateError::FontError(format!(
                    "font '{}' needs exactly one of 'standard' or 'asset'",
                    font_def.id
                )))
            }
        }
    }

    for font_def in &layout.fonts {
        if let Some(missing) = font_def
            .fallback
            .iter()
            .find(|id| !font_ids.contains(id.as_str()))
        {
            return Err(TemplateError::FontError(format!(
                "fallback '{}' of font '{}' is not defined",
                missing, font_def.id
            )));
        }
    }

    let check_font = |font: &Font, used_by: &str| -> Result<()> {
        if font_ids.contains(font.family.as_str()) {
            Ok(())
        } else {
            Err(TemplateError::FontError(format!(
                "font '{}' used by {} is not defined",
                font.family, used_by
            )))
        }
    };

    check_font(&layout.styles.label, "label style")?;
    check_font(&layout.styles.rtl_label, "rtlLabel style")?;
    check_font(&layout.styles.value, "value style")?;
    check_font(&layout.styles.mark, "mark style")?;

    for (index, block) in layout.blocks.iter().enumerate() {
        let name = block
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| format!("block #{index}"));

        match block {
            Block::Text(b) => {
                if let Some(font) = &b.font {
                    check_font(font, &name)?;
                }
            }
            Block::Image(b) => {
                if b.size.width <= 0.0 || b.size.height <= 0.0 {
                    return Err(invalid(format!("{name}: image size must be positive")));
                }
            }
            Block::Field(b) => {
                if b.bind.is_some() && b.value_position.is_none() {
                    return Err(invalid(format!("{name}: 'bind' requires 'valuePosition'")));
                }
            }
            Block::Choice(b) => {
                if b.options.is_empty() {
                    return Err(invalid(format!("{name}: choice has no options")));
                }
                if b.mark.is_empty() {
                    return Err(invalid(format!("{name}: empty mark")));
                }
            }
        }
    }

    Ok(())
}

/// Resolve a JSONPath-like binding expression against data
///
/// Supports simple paths like:
/// - `$.field` - Root field
/// - `$.object.field` - Nested field
/// - `$.array[0]` - Array index
pub fn resolve_binding<'a>(
    path: &str,
    data: &'a serde_json::Value,
) -> Option<&'a serde_json::Value> {
    let path = path.strip_prefix("$.")?;
    let mut current = data;

    for segment in path.split('.') {
        if let Some(bracket_pos) = segment.find('[') {
            let field = &segment[..bracket_pos];
            let index: usize = segment[bracket_pos + 1..]
                .strip_suffix(']')?
                .parse()
                .ok()?;

            if !field.is_empty() {
                current = current.get(field)?;
            }
            current = current.get(index)?;
        } else {
            current = current.get(segment)?;
        }
    }

    Some(current)
}

/// Convert a JSON value to string for rendering
pub fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => value.to_string(),
    }
}
