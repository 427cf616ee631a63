//! Drop-down select.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{
    attributes_or_default, check_label, check_length, check_required, expect_attributes,
    property, property_flag, ElementInstance, ElementKind, ExtraAttributes, FieldType,
    PaletteButton, PaletteGroup, PLACEHOLDER_MAX,
};
use crate::properties::PropertyField;
use crate::render::{control_attrs, designer_attrs, input_group, label_properties};
use crate::validation::{ChoiceValidator, MaxLengthValidator, Validator};
use crate::widgets::{BootstrapSelect, BootstrapTextInput, BootstrapTextarea, Widget};

/// Attributes of a select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectAttributes {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
    pub placeholder: String,
    pub options: Vec<String>,
}

impl Default for SelectAttributes {
    fn default() -> Self {
        Self {
            label: "Select field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            placeholder: "Value here...".to_string(),
            options: Vec::new(),
        }
    }
}

/// Drop-down choice among configured options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectField;

impl FieldType for SelectField {
    fn kind(&self) -> ElementKind {
        ElementKind::SelectField
    }

    fn default_attributes(&self) -> ExtraAttributes {
        ExtraAttributes::Select(SelectAttributes::default())
    }

    fn palette_button(&self) -> PaletteButton {
        PaletteButton {
            kind: self.kind(),
            label: "Select field",
            icon: "bi-menu-button-wide",
            group: PaletteGroup::Form,
        }
    }

    fn check_attributes(&self, attributes: &ExtraAttributes) -> Result<(), String> {
        let attrs = expect_attributes!(attributes, Select);
        check_label(&attrs.label, &attrs.helper_text)?;
        check_length("placeholder", &attrs.placeholder, 0, PLACEHOLDER_MAX)?;

        let mut seen = HashSet::new();
        for option in &attrs.options {
            if option.trim().is_empty() {
                return Err("options: Options must not be blank.".to_string());
            }
            if !seen.insert(option.as_str()) {
                return Err(format!("options: Duplicate option \"{option}\"."));
            }
        }
        Ok(())
    }

    fn check(&self, instance: &ElementInstance, value: &str) -> Result<(), String> {
        let attrs = expect_attributes!(instance.attributes(), Select);
        check_required(attrs.required, value)?;
        if value.is_empty() || attrs.options.is_empty() {
            return Ok(());
        }
        ChoiceValidator::new(attrs.options.iter().cloned()).validate(value)
    }

    fn render_designer(&self, instance: &ElementInstance) -> String {
        let attrs: SelectAttributes = attributes_or_default!(instance, Select);
        let control = BootstrapSelect::new(attrs.options.iter().cloned())
            .blank_label(&attrs.placeholder)
            .render(instance.id(), None, &designer_attrs());
        input_group(&attrs.label, attrs.required, &attrs.helper_text, &control, false)
    }

    fn render_form(&self, instance: &ElementInstance, value: Option<&str>, invalid: bool) -> String {
        let attrs: SelectAttributes = attributes_or_default!(instance, Select);
        let control = BootstrapSelect::new(attrs.options.iter().cloned())
            .blank_label(&attrs.placeholder)
            .render(instance.id(), value, &control_attrs(invalid));
        input_group(&attrs.label, attrs.required, &attrs.helper_text, &control, invalid)
    }

    fn property_fields(&self, instance: &ElementInstance) -> Vec<PropertyField> {
        let attrs: SelectAttributes = attributes_or_default!(instance, Select);
        let mut fields = label_properties(&attrs.label, &attrs.helper_text, attrs.required);
        fields.insert(
            1,
            PropertyField::new("placeholder", "Placeholder", BootstrapTextInput::new())
                .validator(MaxLengthValidator::new(PLACEHOLDER_MAX))
                .initial(&attrs.placeholder),
        );
        fields.insert(
            3,
            PropertyField::new("options", "Options", BootstrapTextarea::new(5))
                .help_text("One option per line.")
                .initial(attrs.options.join("\n")),
        );
        fields
    }

    fn attributes_from_properties(&self, values: &HashMap<String, String>) -> ExtraAttributes {
        let options = property(values, "options")
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        ExtraAttributes::Select(SelectAttributes {
            label: property(values, "label").to_string(),
            helper_text: property(values, "helperText").to_string(),
            required: property_flag(values, "required"),
            placeholder: property(values, "placeholder").to_string(),
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colours(required: bool) -> ElementInstance {
        ElementInstance::new(
            "s",
            ExtraAttributes::Select(SelectAttributes {
                required,
                options: vec!["Red".to_string(), "Green".to_string()],
                ..SelectAttributes::default()
            }),
        )
    }

    #[test]
    fn test_select_values() {
        let instance = colours(false);
        assert!(instance.validate(""));
        assert!(instance.validate("Green"));
        assert_eq!(instance.check("Blue"), Err("Select a valid choice.".to_string()));
        assert!(!colours(true).validate(""));
    }

    #[test]
    fn test_select_without_options_accepts_any_value() {
        let instance = SelectField.construct("s");
        assert!(instance.validate("anything"));
    }

    #[test]
    fn test_select_schema() {
        let duplicate = ExtraAttributes::Select(SelectAttributes {
            options: vec!["A".to_string(), "A".to_string()],
            ..SelectAttributes::default()
        });
        assert!(SelectField.check_attributes(&duplicate).is_err());

        let blank = ExtraAttributes::Select(SelectAttributes {
            options: vec![" ".to_string()],
            ..SelectAttributes::default()
        });
        assert!(SelectField.check_attributes(&blank).is_err());
    }

    #[test]
    fn test_options_property_is_one_per_line() {
        let instance = colours(false);
        let mut values = HashMap::new();
        values.insert("label".to_string(), "Colour".to_string());
        values.insert("options".to_string(), "Red\n\n  Blue \r\nGreen".to_string());

        let ExtraAttributes::Select(attrs) =
            SelectField.apply_properties(&instance, &values).unwrap()
        else {
            panic!("expected select attributes");
        };
        assert_eq!(attrs.options, vec!["Red", "Blue", "Green"]);

        let fields = SelectField.property_fields(&colours(false));
        let options = fields.iter().find(|f| f.name == "options").unwrap();
        assert_eq!(options.initial.as_deref(), Some("Red\nGreen"));
    }

    #[test]
    fn test_render_form_selects_value() {
        let html = SelectField.render_form(&colours(false), Some("Red"), false);
        assert_eq!(html.matches("selected").count(), 1);
        assert!(html.contains(r#"value="Red""#));
        assert!(html.contains("Value here..."));
        assert_eq!(html.matches("<option").count(), 3);
    }
}
