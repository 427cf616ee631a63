//! Single checkbox.

use std::collections::HashMap;

use ironhtml::html;
use ironhtml_elements::Div;
use serde::{Deserialize, Serialize};

use super::{
    attributes_or_default, check_label, check_required, expect_attributes, property,
    property_flag, ElementInstance, ElementKind, ExtraAttributes, FieldType, PaletteButton,
    PaletteGroup,
};
use crate::properties::PropertyField;
use crate::render::{control_attrs, designer_attrs, label_properties};
use crate::widgets::{BootstrapCheckbox, Widget};

/// Attributes of a checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckboxAttributes {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
}

impl Default for CheckboxAttributes {
    fn default() -> Self {
        Self {
            label: "Checkbox field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
        }
    }
}

fn render_checkbox(attrs: &CheckboxAttributes, control: &str, invalid: bool) -> String {
    let helper_text = attrs.helper_text.clone();
    let helper_class = if invalid { "form-text text-danger" } else { "form-text" };

    html! { div.class("mb-3") }
        .raw(control)
        .when(!helper_text.is_empty(), |d| {
            d.child::<Div, _>(|h| h.class(helper_class).text(&helper_text))
        })
        .render()
}

fn checkbox_label(attrs: &CheckboxAttributes) -> String {
    if attrs.required {
        format!("{} *", attrs.label)
    } else {
        attrs.label.clone()
    }
}

/// Boolean input posting `"true"` or `"false"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxField;

impl FieldType for CheckboxField {
    fn kind(&self) -> ElementKind {
        ElementKind::CheckboxField
    }

    fn default_attributes(&self) -> ExtraAttributes {
        ExtraAttributes::Checkbox(CheckboxAttributes::default())
    }

    fn palette_button(&self) -> PaletteButton {
        PaletteButton {
            kind: self.kind(),
            label: "CheckBox field",
            icon: "bi-check2-square",
            group: PaletteGroup::Form,
        }
    }

    fn check_attributes(&self, attributes: &ExtraAttributes) -> Result<(), String> {
        let attrs = expect_attributes!(attributes, Checkbox);
        check_label(&attrs.label, &attrs.helper_text)
    }

    fn check(&self, instance: &ElementInstance, value: &str) -> Result<(), String> {
        let attrs = expect_attributes!(instance.attributes(), Checkbox);
        check_required(attrs.required, value)?;
        match value {
            "" | "false" if !attrs.required => Ok(()),
            "true" => Ok(()),
            "false" => Err("This box must be checked.".to_string()),
            _ => Err("Enter true or false.".to_string()),
        }
    }

    fn render_designer(&self, instance: &ElementInstance) -> String {
        let attrs: CheckboxAttributes = attributes_or_default!(instance, Checkbox);
        let control = BootstrapCheckbox::new()
            .label(checkbox_label(&attrs))
            .render(instance.id(), None, &designer_attrs());
        render_checkbox(&attrs, &control, false)
    }

    fn render_form(&self, instance: &ElementInstance, value: Option<&str>, invalid: bool) -> String {
        let attrs: CheckboxAttributes = attributes_or_default!(instance, Checkbox);
        let control = BootstrapCheckbox::new()
            .label(checkbox_label(&attrs))
            .render(instance.id(), value, &control_attrs(invalid));
        render_checkbox(&attrs, &control, invalid)
    }

    fn property_fields(&self, instance: &ElementInstance) -> Vec<PropertyField> {
        let attrs: CheckboxAttributes = attributes_or_default!(instance, Checkbox);
        label_properties(&attrs.label, &attrs.helper_text, attrs.required)
    }

    fn attributes_from_properties(&self, values: &HashMap<String, String>) -> ExtraAttributes {
        ExtraAttributes::Checkbox(CheckboxAttributes {
            label: property(values, "label").to_string(),
            helper_text: property(values, "helperText").to_string(),
            required: property_flag(values, "required"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms() -> ElementInstance {
        ElementInstance::new(
            "c",
            ExtraAttributes::Checkbox(CheckboxAttributes {
                label: "Accept terms".to_string(),
                required: true,
                ..CheckboxAttributes::default()
            }),
        )
    }

    #[test]
    fn test_optional_checkbox_values() {
        let instance = CheckboxField.construct("c");
        assert!(instance.validate(""));
        assert!(instance.validate("true"));
        assert!(instance.validate("false"));
        assert!(!instance.validate("yes"));
    }

    #[test]
    fn test_required_checkbox_needs_true() {
        let instance = terms();
        assert!(instance.validate("true"));
        assert!(!instance.validate("false"));
        assert!(!instance.validate(""));
        assert_eq!(instance.check(""), Err("This field is required.".to_string()));
    }

    #[test]
    fn test_render_checkbox() {
        let html = CheckboxField.render_form(&terms(), Some("true"), false);
        assert!(html.contains("checked"));
        assert!(html.contains("Accept terms *"));

        let html = CheckboxField.render_form(&terms(), Some("false"), true);
        assert!(!html.contains("checked"));
        assert!(html.contains("text-danger"));
    }
}
