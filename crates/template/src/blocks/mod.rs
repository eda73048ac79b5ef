//! Block data binding
//!
//! The renderer draws blocks; this module resolves what the fill pass of
//! each bound block draws from the supplied data.

pub use crate::schema::{Block, ChoiceBlock, ChoiceOption, FieldBlock, TextBlock};

use crate::parser::{resolve_binding, value_to_string};

/// Trait for blocks whose content comes from bound data
pub trait BoundContent {
    type Output;

    /// Resolve the content to draw, or `None` when nothing should be drawn
    fn resolve(&self, data: &serde_json::Value) -> Option<Self::Output>;
}

impl BoundContent for FieldBlock {
    type Output = String;

    /// Bound value with the field prefix applied
    fn resolve(&self, data: &serde_json::Value) -> Option<String> {
        let bind = self.bind.as_deref()?;
        let value = value_to_string(resolve_binding(bind, data)?);
        match &self.prefix {
            Some(prefix) => Some(format!("{prefix}{value}")),
            None => Some(value),
        }
    }
}

impl<'a> BoundContent for &'a ChoiceBlock {
    type Output = &'a ChoiceOption;

    /// Option whose value matches the bound data
    fn resolve(&self, data: &serde_json::Value) -> Option<&'a ChoiceOption> {
        let block: &'a ChoiceBlock = *self;
        let value = value_to_string(resolve_binding(&block.bind, data)?);
        block.selected(&value)
    }
}
