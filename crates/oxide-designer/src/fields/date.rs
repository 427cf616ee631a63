//! Date picker.

use std::collections::HashMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::{
    attributes_or_default, check_label, check_required, expect_attributes, property,
    property_flag, ElementInstance, ElementKind, ExtraAttributes, FieldType, PaletteButton,
    PaletteGroup,
};
use crate::properties::PropertyField;
use crate::render::{control_attrs, designer_attrs, input_group, label_properties};
use crate::validation::{DateValidator, Validator};
use crate::widgets::{BootstrapTextInput, Widget};

/// Attributes of a date picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateAttributes {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
}

impl Default for DateAttributes {
    fn default() -> Self {
        Self {
            label: "Date field".to_string(),
            helper_text: "Pick a date".to_string(),
            required: false,
        }
    }
}

/// Calendar date input.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateField;

impl FieldType for DateField {
    fn kind(&self) -> ElementKind {
        ElementKind::DateField
    }

    fn default_attributes(&self) -> ExtraAttributes {
        ExtraAttributes::Date(DateAttributes::default())
    }

    fn palette_button(&self) -> PaletteButton {
        PaletteButton {
            kind: self.kind(),
            label: "Date field",
            icon: "bi-calendar-date",
            group: PaletteGroup::Form,
        }
    }

    fn check_attributes(&self, attributes: &ExtraAttributes) -> Result<(), String> {
        let attrs = expect_attributes!(attributes, Date);
        check_label(&attrs.label, &attrs.helper_text)
    }

    fn check(&self, instance: &ElementInstance, value: &str) -> Result<(), String> {
        let attrs = expect_attributes!(instance.attributes(), Date);
        check_required(attrs.required, value)?;
        if value.is_empty() {
            return Ok(());
        }
        DateValidator::new().validate(value)
    }

    fn render_designer(&self, instance: &ElementInstance) -> String {
        let attrs: DateAttributes = attributes_or_default!(instance, Date);
        let control = BootstrapTextInput::date().render(instance.id(), None, &designer_attrs());
        input_group(&attrs.label, attrs.required, &attrs.helper_text, &control, false)
    }

    fn render_form(&self, instance: &ElementInstance, value: Option<&str>, invalid: bool) -> String {
        let attrs: DateAttributes = attributes_or_default!(instance, Date);
        let shown = value.map(date_part);
        let control = BootstrapTextInput::date().render(
            instance.id(),
            shown.as_deref(),
            &control_attrs(invalid),
        );
        input_group(&attrs.label, attrs.required, &attrs.helper_text, &control, invalid)
    }

    fn property_fields(&self, instance: &ElementInstance) -> Vec<PropertyField> {
        let attrs: DateAttributes = attributes_or_default!(instance, Date);
        label_properties(&attrs.label, &attrs.helper_text, attrs.required)
    }

    fn attributes_from_properties(&self, values: &HashMap<String, String>) -> ExtraAttributes {
        ExtraAttributes::Date(DateAttributes {
            label: property(values, "label").to_string(),
            helper_text: property(values, "helperText").to_string(),
            required: property_flag(values, "required"),
        })
    }
}

/// The `YYYY-MM-DD` a date input can show for a posted timestamp.
///
/// Values that are not a timestamp come back unchanged.
fn date_part(value: &str) -> String {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .map_or_else(
            |_| value.to_string(),
            |timestamp| timestamp.date_naive().format("%Y-%m-%d").to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_values() {
        let instance = DateField.construct("d");
        assert!(instance.validate(""));
        assert!(instance.validate("2024-02-29"));
        assert!(instance.validate("2024-05-01T00:00:00.000Z"));
        assert!(instance.validate("Wed, 01 May 2024 00:00:00 GMT"));
        assert!(!instance.validate("2023-02-29"));
        assert!(!instance.validate("yesterday"));
    }

    #[test]
    fn test_required_date() {
        let instance = ElementInstance::new(
            "d",
            ExtraAttributes::Date(DateAttributes {
                required: true,
                ..DateAttributes::default()
            }),
        );
        assert_eq!(instance.check(""), Err("This field is required.".to_string()));
        assert!(instance.validate("2024-01-01"));
        assert!(instance.validate("Wed, 01 May 2024 00:00:00 GMT"));
        assert!(!instance.validate("Wed, 01 May 2024"));
    }

    #[test]
    fn test_render_form_shows_date_part() {
        let instance = DateField.construct("d");
        let html = DateField.render_form(&instance, Some("2024-05-01T00:00:00.000Z"), false);
        assert!(html.contains(r#"value="2024-05-01""#));
        assert!(html.contains(r#"type="date""#));
        assert!(html.contains("Pick a date"));

        let html = DateField.render_form(&instance, Some("Wed, 01 May 2024 00:00:00 GMT"), false);
        assert!(html.contains(r#"value="2024-05-01""#));

        let html = DateField.render_form(&instance, Some("someday"), true);
        assert!(html.contains(r#"value="someday""#));
    }
}
