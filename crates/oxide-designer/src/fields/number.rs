//! Numeric input.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    attributes_or_default, check_label, check_length, check_required, expect_attributes,
    property, property_flag, ElementInstance, ElementKind, ExtraAttributes, FieldType,
    PaletteButton, PaletteGroup, PLACEHOLDER_MAX,
};
use crate::properties::PropertyField;
use crate::render::{control_attrs, designer_attrs, input_group, label_properties};
use crate::validation::{MaxLengthValidator, RangeValidator, Validator};
use crate::widgets::{BootstrapTextInput, Widget, WidgetAttrs};

/// Attributes of a number input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberAttributes {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
    pub placeholder: String,
    /// Smallest accepted value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Largest accepted value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Default for NumberAttributes {
    fn default() -> Self {
        Self {
            label: "Number field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            placeholder: "0".to_string(),
            min: None,
            max: None,
        }
    }
}

fn bound_attrs(attrs: &NumberAttributes, base: WidgetAttrs) -> WidgetAttrs {
    let mut base = base;
    if let Some(min) = attrs.min {
        base.set("min", min.to_string());
    }
    if let Some(max) = attrs.max {
        base.set("max", max.to_string());
    }
    base
}

fn optional_number(values: &HashMap<String, String>, name: &str) -> Option<f64> {
    property(values, name).trim().parse::<f64>().ok()
}

/// Number input with optional bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberField;

impl FieldType for NumberField {
    fn kind(&self) -> ElementKind {
        ElementKind::NumberField
    }

    fn default_attributes(&self) -> ExtraAttributes {
        ExtraAttributes::Number(NumberAttributes::default())
    }

    fn palette_button(&self) -> PaletteButton {
        PaletteButton {
            kind: self.kind(),
            label: "Number field",
            icon: "bi-123",
            group: PaletteGroup::Form,
        }
    }

    fn check_attributes(&self, attributes: &ExtraAttributes) -> Result<(), String> {
        let attrs = expect_attributes!(attributes, Number);
        check_label(&attrs.label, &attrs.helper_text)?;
        check_length("placeholder", &attrs.placeholder, 0, PLACEHOLDER_MAX)?;

        for bound in [attrs.min, attrs.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err("min/max: Enter a finite number.".to_string());
            }
        }
        match (attrs.min, attrs.max) {
            (Some(min), Some(max)) if min > max => {
                Err(format!("min ({min}) must not exceed max ({max})."))
            }
            _ => Ok(()),
        }
    }

    fn check(&self, instance: &ElementInstance, value: &str) -> Result<(), String> {
        let attrs = expect_attributes!(instance.attributes(), Number);
        check_required(attrs.required, value)?;
        if value.is_empty() {
            return Ok(());
        }
        RangeValidator::new(attrs.min, attrs.max).validate(value)
    }

    fn render_designer(&self, instance: &ElementInstance) -> String {
        let attrs: NumberAttributes = attributes_or_default!(instance, Number);
        let control = BootstrapTextInput::number()
            .placeholder(&attrs.placeholder)
            .render(instance.id(), None, &designer_attrs());
        input_group(&attrs.label, attrs.required, &attrs.helper_text, &control, false)
    }

    fn render_form(&self, instance: &ElementInstance, value: Option<&str>, invalid: bool) -> String {
        let attrs: NumberAttributes = attributes_or_default!(instance, Number);
        let control = BootstrapTextInput::number()
            .placeholder(&attrs.placeholder)
            .render(
                instance.id(),
                value,
                &bound_attrs(&attrs, control_attrs(invalid)),
            );
        input_group(&attrs.label, attrs.required, &attrs.helper_text, &control, invalid)
    }

    fn property_fields(&self, instance: &ElementInstance) -> Vec<PropertyField> {
        let attrs: NumberAttributes = attributes_or_default!(instance, Number);
        let mut fields = label_properties(&attrs.label, &attrs.helper_text, attrs.required);

        fields.insert(
            1,
            PropertyField::new("placeholder", "Placeholder", BootstrapTextInput::new())
                .validator(MaxLengthValidator::new(PLACEHOLDER_MAX))
                .initial(&attrs.placeholder),
        );

        let mut min = PropertyField::new("min", "Minimum", BootstrapTextInput::number())
            .validator(RangeValidator::new(None, None))
            .help_text("Leave empty for no lower bound.");
        if let Some(value) = attrs.min {
            min = min.initial(value.to_string());
        }
        let mut max = PropertyField::new("max", "Maximum", BootstrapTextInput::number())
            .validator(RangeValidator::new(None, None))
            .help_text("Leave empty for no upper bound.");
        if let Some(value) = attrs.max {
            max = max.initial(value.to_string());
        }
        fields.insert(3, min);
        fields.insert(4, max);
        fields
    }

    fn attributes_from_properties(&self, values: &HashMap<String, String>) -> ExtraAttributes {
        ExtraAttributes::Number(NumberAttributes {
            label: property(values, "label").to_string(),
            helper_text: property(values, "helperText").to_string(),
            required: property_flag(values, "required"),
            placeholder: property(values, "placeholder").to_string(),
            min: optional_number(values, "min"),
            max: optional_number(values, "max"),
        })
    }
}
