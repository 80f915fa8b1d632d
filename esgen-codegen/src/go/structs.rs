//! Go struct declaration rendering.

use super::types::render_type;
use esgen_schema::{ResolvedField, StructDef};

/// Renders resolved structure definitions as Go declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructRenderer;

impl StructRenderer {
    /// Creates a new struct renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders a structure followed by every nested structure it introduced.
    #[must_use]
    pub fn render(&self, def: &StructDef) -> String {
        let mut output = String::new();
        self.render_into(&mut output, def);
        output
    }

    fn render_into(&self, output: &mut String, def: &StructDef) {
        output.push_str(&format!("type {} struct {{\n", def.name));
        for field in &def.fields {
            output.push_str(&self.render_field(field));
        }
        output.push_str("}\n\n");

        for nested in &def.nested {
            self.render_into(output, nested);
        }
    }

    /// Renders one field line, tagged with its source key.
    fn render_field(&self, field: &ResolvedField) -> String {
        let ty = render_type(&field.emitted_type);
        match field.comment.as_deref() {
            Some(comment) if !comment.is_empty() => format!(
                "\t{} {} `json:\"{}\"` // {}\n",
                field.emitted_name, ty, field.source_key, comment
            ),
            _ => format!(
                "\t{} {} `json:\"{}\"`\n",
                field.emitted_name, ty, field.source_key
            ),
        }
    }
}
