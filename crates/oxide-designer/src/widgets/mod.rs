//! Input controls shared by the designer preview, the live form and the
//! properties editor.

mod bootstrap;

pub use bootstrap::{BootstrapCheckbox, BootstrapSelect, BootstrapTextInput, BootstrapTextarea};

use std::collections::BTreeMap;

/// Extra HTML attributes for a control, kept sorted so markup is stable.
///
/// `class` is appended to the control's own classes and `id` overrides the
/// default `id_{name}`; everything else is copied verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAttrs {
    attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key` only when `condition` holds.
    #[must_use]
    pub fn with_if(self, condition: bool, key: impl Into<String>, value: impl Into<String>) -> Self {
        if condition {
            self.with(key, value)
        } else {
            self
        }
    }

    /// Attributes other than `class` and `id`.
    pub fn extra(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.attrs
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "class" | "id"))
            .map(|(key, value)| (key.clone(), value.as_str()))
    }

    /// `base` followed by the extra `class`, if any.
    pub fn class_with(&self, base: &str) -> String {
        match self.get("class") {
            Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
            _ => base.to_string(),
        }
    }

    pub fn id_for(&self, name: &str) -> String {
        self.get("id")
            .map_or_else(|| format!("id_{name}"), str::to_string)
    }
}

/// An HTML control bound to one named value.
pub trait Widget: Send + Sync {
    /// Renders the control for `name`, showing `value` when present.
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String;

    /// The `type` the control submits as.
    fn input_type(&self) -> &str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_attrs() {
        let attrs = WidgetAttrs::new()
            .with("class", "is-invalid")
            .with("id", "my-input")
            .with("required", "required")
            .with_if(false, "disabled", "disabled");

        let extra: Vec<_> = attrs.extra().collect();
        assert_eq!(extra, vec![("required".to_string(), "required")]);
        assert_eq!(attrs.class_with("form-control"), "form-control is-invalid");
        assert_eq!(attrs.id_for("ignored"), "my-input");
        assert_eq!(WidgetAttrs::new().id_for("name"), "id_name");
    }

    #[test]
    fn test_values_are_escaped_by_the_builder() {
        let attrs = WidgetAttrs::new().with("data-label", r#"say "hi" <b>"#);
        let html = BootstrapTextInput::new().render("x", Some("a & b"), &attrs);
        assert!(!html.contains("<b>"));
        assert!(!html.contains(r#"value="a & b""#));
    }
}
