//! Capabilities borrowed from the hosting environment.
//!
//! The model only needs a template renderer, used to resolve a possibly
//! templated default-card target. Logging goes through `tracing`.

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Failure reported by a template renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No renderer is connected.
    #[error("template renderer unavailable")]
    Unavailable,

    /// The template referenced a variable the renderer does not know.
    #[error("unknown template variable '{0}'")]
    UnknownVariable(String),

    /// The template text is malformed.
    #[error("malformed template: {0}")]
    Malformed(String),
}

/// Renders a possibly templated configuration value.
pub trait TemplateRenderer {
    fn render_template(&self, value: &Value) -> Result<Value, RenderError>;
}

/// Returns every value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRenderer;

impl TemplateRenderer for PassthroughRenderer {
    fn render_template(&self, value: &Value) -> Result<Value, RenderError> {
        Ok(value.clone())
    }
}

/// Stands in for a host without template support; always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRenderer;

impl TemplateRenderer for UnavailableRenderer {
    fn render_template(&self, _value: &Value) -> Result<Value, RenderError> {
        Err(RenderError::Unavailable)
    }
}

/// Substitutes `{{ name }}` placeholders in string values from a variable map.
///
/// Non-string values pass through untouched.
#[derive(Debug, Clone, Default)]
pub struct ContextRenderer {
    vars: HashMap<String, String>,
}

impl ContextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable (builder pattern).
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    fn render_str(&self, template: &str) -> Result<String, RenderError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| RenderError::Malformed(template.to_string()))?;
            let name = after[..end].trim();
            let value = self
                .vars
                .get(name)
                .ok_or_else(|| RenderError::UnknownVariable(name.to_string()))?;
            out.push_str(value);
            rest = &after[end + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

impl TemplateRenderer for ContextRenderer {
    fn render_template(&self, value: &Value) -> Result<Value, RenderError> {
        match value {
            Value::String(s) => Ok(Value::String(self.render_str(s)?)),
            other => Ok(other.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_passthrough() {
        let value = json!("navigate.cardGrid_main");
        assert_eq!(PassthroughRenderer.render_template(&value).unwrap(), value);
    }

    #[test]
    fn test_unavailable() {
        let err = UnavailableRenderer.render_template(&json!("x")).unwrap_err();
        assert!(matches!(err, RenderError::Unavailable));
    }

    #[test]
    fn test_context_substitution() {
        let renderer = ContextRenderer::new().with_var("room", "kitchen");
        let rendered = renderer
            .render_template(&json!("cardGrid_{{ room }}"))
            .unwrap();
        assert_eq!(rendered, json!("cardGrid_kitchen"));
    }

    #[test]
    fn test_context_errors() {
        let renderer = ContextRenderer::new();
        assert!(matches!(
            renderer.render_template(&json!("{{ missing }}")),
            Err(RenderError::UnknownVariable(name)) if name == "missing"
        ));
        assert!(matches!(
            renderer.render_template(&json!("{{ open")),
            Err(RenderError::Malformed(_))
        ));
    }

    #[test]
    fn test_context_leaves_non_strings() {
        let renderer = ContextRenderer::new();
        assert_eq!(renderer.render_template(&json!(3)).unwrap(), json!(3));
    }
}
