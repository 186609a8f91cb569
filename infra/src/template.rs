//! Handlebars rendering for notification templates

use handlebars::Handlebars;

use om_core::services::TemplateRendererTrait;

/// Template renderer backed by Handlebars
///
/// Strict mode is on, so a template referencing a field missing from the
/// context fails instead of rendering an empty string.
pub struct HandlebarsTemplateRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsTemplateRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        Self { registry }
    }
}

impl Default for HandlebarsTemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRendererTrait for HandlebarsTemplateRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, String> {
        self.registry
            .render_template(template, context)
            .map_err(|e| e.to_string())
    }
}
