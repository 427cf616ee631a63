//! Spacing kinds: horizontal separator and vertical spacer.

use std::collections::HashMap;

use ironhtml::html;
use serde::{Deserialize, Serialize};

use super::{
    attributes_or_default, expect_attributes, property, ElementInstance, ElementKind,
    ExtraAttributes, FieldType, PaletteButton, PaletteGroup,
};
use crate::properties::PropertyField;
use crate::render::preview;
use crate::validation::{RangeValidator, Validator};
use crate::widgets::BootstrapTextInput;

const SPACER_MIN_HEIGHT: u32 = 5;
const SPACER_MAX_HEIGHT: u32 = 300;

/// A separator carries no configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorAttributes {}

/// Attributes of a spacer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacerAttributes {
    /// Height in pixels.
    pub height: u32,
}

impl Default for SpacerAttributes {
    fn default() -> Self {
        Self { height: 20 }
    }
}

/// Horizontal rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeparatorField;

impl FieldType for SeparatorField {
    fn kind(&self) -> ElementKind {
        ElementKind::SeparatorField
    }

    fn default_attributes(&self) -> ExtraAttributes {
        ExtraAttributes::Separator(SeparatorAttributes::default())
    }

    fn palette_button(&self) -> PaletteButton {
        PaletteButton {
            kind: self.kind(),
            label: "Separator field",
            icon: "bi-hr",
            group: PaletteGroup::Layout,
        }
    }

    fn check_attributes(&self, attributes: &ExtraAttributes) -> Result<(), String> {
        expect_attributes!(attributes, Separator);
        Ok(())
    }

    fn check(&self, _instance: &ElementInstance, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn render_designer(&self, _instance: &ElementInstance) -> String {
        preview("Separator field", &html! { hr.class("my-2") }.render())
    }

    fn render_form(&self, _instance: &ElementInstance, _value: Option<&str>, _invalid: bool) -> String {
        html! { hr.class("my-2") }.render()
    }

    fn property_fields(&self, _instance: &ElementInstance) -> Vec<PropertyField> {
        Vec::new()
    }

    fn attributes_from_properties(&self, _values: &HashMap<String, String>) -> ExtraAttributes {
        self.default_attributes()
    }
}

/// Empty vertical space of configurable height.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacerField;

impl FieldType for SpacerField {
    fn kind(&self) -> ElementKind {
        ElementKind::SpacerField
    }

    fn default_attributes(&self) -> ExtraAttributes {
        ExtraAttributes::Spacer(SpacerAttributes::default())
    }

    fn palette_button(&self) -> PaletteButton {
        PaletteButton {
            kind: self.kind(),
            label: "Spacer field",
            icon: "bi-arrows-expand",
            group: PaletteGroup::Layout,
        }
    }

    fn check_attributes(&self, attributes: &ExtraAttributes) -> Result<(), String> {
        let attrs = expect_attributes!(attributes, Spacer);
        RangeValidator::new(
            Some(f64::from(SPACER_MIN_HEIGHT)),
            Some(f64::from(SPACER_MAX_HEIGHT)),
        )
        .validate(&attrs.height.to_string())
        .map_err(|message| format!("height: {message}"))
    }

    fn check(&self, _instance: &ElementInstance, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn render_designer(&self, instance: &ElementInstance) -> String {
        let attrs: SpacerAttributes = attributes_or_default!(instance, Spacer);
        let caption = format!("Spacer field: {}px", attrs.height);
        preview(&caption, &html! { i.class("bi bi-arrows-expand") }.render())
    }

    fn render_form(&self, instance: &ElementInstance, _value: Option<&str>, _invalid: bool) -> String {
        let attrs: SpacerAttributes = attributes_or_default!(instance, Spacer);
        let style = format!("height: {}px", attrs.height);
        html! { div.class("w-100") }.attr("style", &style).render()
    }

    fn property_fields(&self, instance: &ElementInstance) -> Vec<PropertyField> {
        let attrs: SpacerAttributes = attributes_or_default!(instance, Spacer);
        vec![PropertyField::new("height", "Height (px)", BootstrapTextInput::number())
            .required()
            .validator(RangeValidator::new(
                Some(f64::from(SPACER_MIN_HEIGHT)),
                Some(f64::from(SPACER_MAX_HEIGHT)),
            ))
            .attr("min", SPACER_MIN_HEIGHT.to_string())
            .attr("max", SPACER_MAX_HEIGHT.to_string())
            .initial(attrs.height.to_string())]
    }

    fn attributes_from_properties(&self, values: &HashMap<String, String>) -> ExtraAttributes {
        let height = property(values, "height")
            .trim()
            .parse::<f64>()
            .map_or(SpacerAttributes::default().height, |h| h.round() as u32);
        ExtraAttributes::Spacer(SpacerAttributes { height })
    }
}
