//! Free text kinds: single-line input and textarea.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    attributes_or_default, check_label, check_length, check_required, expect_attributes,
    property, property_flag, ElementInstance, ElementKind, ExtraAttributes, FieldType,
    PaletteButton, PaletteGroup, PLACEHOLDER_MAX,
};
use crate::properties::PropertyField;
use crate::render::{control_attrs, designer_attrs, input_group, label_properties};
use crate::validation::{MaxLengthValidator, RangeValidator};
use crate::widgets::{BootstrapTextInput, BootstrapTextarea, Widget};

const ROWS_MIN: u32 = 1;
const ROWS_MAX: u32 = 10;

/// Attributes of a single-line text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAttributes {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
    pub placeholder: String,
}

impl Default for TextAttributes {
    fn default() -> Self {
        Self {
            label: "Text field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            placeholder: "Value here...".to_string(),
        }
    }
}

/// Attributes of a multi-line text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAreaAttributes {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
    pub placeholder: String,
    pub rows: u32,
}

impl Default for TextAreaAttributes {
    fn default() -> Self {
        Self {
            label: "Text area".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            placeholder: "Value here...".to_string(),
            rows: 3,
        }
    }
}

fn placeholder_property(current: &str) -> PropertyField {
    PropertyField::new("placeholder", "Placeholder", BootstrapTextInput::new())
        .validator(MaxLengthValidator::new(PLACEHOLDER_MAX))
        .help_text("The placeholder of the field.")
        .initial(current)
}

/// Single-line text input.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextField;

impl FieldType for TextField {
    fn kind(&self) -> ElementKind {
        ElementKind::TextField
    }

    fn default_attributes(&self) -> ExtraAttributes {
        ExtraAttributes::Text(TextAttributes::default())
    }

    fn palette_button(&self) -> PaletteButton {
        PaletteButton {
            kind: self.kind(),
            label: "Text field",
            icon: "bi-input-cursor-text",
            group: PaletteGroup::Form,
        }
    }

    fn check_attributes(&self, attributes: &ExtraAttributes) -> Result<(), String> {
        let attrs = expect_attributes!(attributes, Text);
        check_label(&attrs.label, &attrs.helper_text)?;
        check_length("placeholder", &attrs.placeholder, 0, PLACEHOLDER_MAX)
    }

    fn check(&self, instance: &ElementInstance, value: &str) -> Result<(), String> {
        let attrs = expect_attributes!(instance.attributes(), Text);
        check_required(attrs.required, value)
    }

    fn render_designer(&self, instance: &ElementInstance) -> String {
        let attrs: TextAttributes = attributes_or_default!(instance, Text);
        let control = BootstrapTextInput::new()
            .placeholder(&attrs.placeholder)
            .render(instance.id(), None, &designer_attrs());
        input_group(&attrs.label, attrs.required, &attrs.helper_text, &control, false)
    }

    fn render_form(&self, instance: &ElementInstance, value: Option<&str>, invalid: bool) -> String {
        let attrs: TextAttributes = attributes_or_default!(instance, Text);
        let control = BootstrapTextInput::new()
            .placeholder(&attrs.placeholder)
            .render(instance.id(), value, &control_attrs(invalid));
        input_group(&attrs.label, attrs.required, &attrs.helper_text, &control, invalid)
    }

    fn property_fields(&self, instance: &ElementInstance) -> Vec<PropertyField> {
        let attrs: TextAttributes = attributes_or_default!(instance, Text);
        let mut fields = label_properties(&attrs.label, &attrs.helper_text, attrs.required);
        fields.insert(1, placeholder_property(&attrs.placeholder));
        fields
    }

    fn attributes_from_properties(&self, values: &HashMap<String, String>) -> ExtraAttributes {
        ExtraAttributes::Text(TextAttributes {
            label: property(values, "label").to_string(),
            helper_text: property(values, "helperText").to_string(),
            required: property_flag(values, "required"),
            placeholder: property(values, "placeholder").to_string(),
        })
    }
}

/// Multi-line text input.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextAreaField;

impl FieldType for TextAreaField {
    fn kind(&self) -> ElementKind {
        ElementKind::TextAreaField
    }

    fn default_attributes(&self) -> ExtraAttributes {
        ExtraAttributes::TextArea(TextAreaAttributes::default())
    }

    fn palette_button(&self) -> PaletteButton {
        PaletteButton {
            kind: self.kind(),
            label: "TextArea field",
            icon: "bi-textarea-t",
            group: PaletteGroup::Form,
        }
    }

    fn check_attributes(&self, attributes: &ExtraAttributes) -> Result<(), String> {
        let attrs = expect_attributes!(attributes, TextArea);
        check_label(&attrs.label, &attrs.helper_text)?;
        check_length("placeholder", &attrs.placeholder, 0, PLACEHOLDER_MAX)?;
        if (ROWS_MIN..=ROWS_MAX).contains(&attrs.rows) {
            Ok(())
        } else {
            Err(format!("rows: Value must be between {ROWS_MIN} and {ROWS_MAX}."))
        }
    }

    fn check(&self, instance: &ElementInstance, value: &str) -> Result<(), String> {
        let attrs = expect_attributes!(instance.attributes(), TextArea);
        check_required(attrs.required, value)
    }

    fn render_designer(&self, instance: &ElementInstance) -> String {
        let attrs: TextAreaAttributes = attributes_or_default!(instance, TextArea);
        let control = BootstrapTextarea::new(attrs.rows)
            .placeholder(&attrs.placeholder)
            .render(instance.id(), None, &designer_attrs());
        input_group(&attrs.label, attrs.required, &attrs.helper_text, &control, false)
    }

    fn render_form(&self, instance: &ElementInstance, value: Option<&str>, invalid: bool) -> String {
        let attrs: TextAreaAttributes = attributes_or_default!(instance, TextArea);
        let control = BootstrapTextarea::new(attrs.rows)
            .placeholder(&attrs.placeholder)
            .render(instance.id(), value, &control_attrs(invalid));
        input_group(&attrs.label, attrs.required, &attrs.helper_text, &control, invalid)
    }

    fn property_fields(&self, instance: &ElementInstance) -> Vec<PropertyField> {
        let attrs: TextAreaAttributes = attributes_or_default!(instance, TextArea);
        let mut fields = label_properties(&attrs.label, &attrs.helper_text, attrs.required);
        fields.insert(1, placeholder_property(&attrs.placeholder));
        fields.insert(
            3,
            PropertyField::new("rows", "Rows", BootstrapTextInput::number())
                .required()
                .validator(RangeValidator::new(
                    Some(f64::from(ROWS_MIN)),
                    Some(f64::from(ROWS_MAX)),
                ))
                .initial(attrs.rows.to_string()),
        );
        fields
    }

    fn attributes_from_properties(&self, values: &HashMap<String, String>) -> ExtraAttributes {
        let rows = property(values, "rows")
            .trim()
            .parse::<f64>()
            .map_or(TextAreaAttributes::default().rows, |r| r.round() as u32);

        ExtraAttributes::TextArea(TextAreaAttributes {
            label: property(values, "label").to_string(),
            helper_text: property(values, "helperText").to_string(),
            required: property_flag(values, "required"),
            placeholder: property(values, "placeholder").to_string(),
            rows,
        })
    }
}
