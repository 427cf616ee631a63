//! Static text kinds: title, subtitle and paragraph.

use std::collections::HashMap;

use ironhtml::html;
use serde::{Deserialize, Serialize};

use super::{
    attributes_or_default, check_length, expect_attributes, property, ElementInstance,
    ElementKind, ExtraAttributes, FieldType, PaletteButton, PaletteGroup,
};
use crate::properties::PropertyField;
use crate::render::preview;
use crate::validation::{MaxLengthValidator, MinLengthValidator};
use crate::widgets::{BootstrapTextInput, BootstrapTextarea};

const TITLE_MIN: usize = 2;
const TITLE_MAX: usize = 50;
const PARAGRAPH_MIN: usize = 2;
const PARAGRAPH_MAX: usize = 500;

/// Attributes of a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleAttributes {
    pub title: String,
}

impl Default for TitleAttributes {
    fn default() -> Self {
        Self {
            title: "Title field".to_string(),
        }
    }
}

/// Attributes of a subtitle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubTitleAttributes {
    pub title: String,
}

impl Default for SubTitleAttributes {
    fn default() -> Self {
        Self {
            title: "SubTitle field".to_string(),
        }
    }
}

/// Attributes of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParagraphAttributes {
    pub text: String,
}

impl Default for ParagraphAttributes {
    fn default() -> Self {
        Self {
            text: "Text here".to_string(),
        }
    }
}

fn title_property(caption: &str, current: &str) -> PropertyField {
    PropertyField::new("title", caption, BootstrapTextInput::new())
        .required()
        .validator(MinLengthValidator::new(TITLE_MIN))
        .validator(MaxLengthValidator::new(TITLE_MAX))
        .initial(current)
}

/// Large heading.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleField;

impl FieldType for TitleField {
    fn kind(&self) -> ElementKind {
        ElementKind::TitleField
    }

    fn default_attributes(&self) -> ExtraAttributes {
        ExtraAttributes::Title(TitleAttributes::default())
    }

    fn palette_button(&self) -> PaletteButton {
        PaletteButton {
            kind: self.kind(),
            label: "Title field",
            icon: "bi-type-h1",
            group: PaletteGroup::Layout,
        }
    }

    fn check_attributes(&self, attributes: &ExtraAttributes) -> Result<(), String> {
        let attrs = expect_attributes!(attributes, Title);
        check_length("title", &attrs.title, TITLE_MIN, TITLE_MAX)
    }

    fn check(&self, _instance: &ElementInstance, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn render_designer(&self, instance: &ElementInstance) -> String {
        let attrs: TitleAttributes = attributes_or_default!(instance, Title);
        let title = attrs.title;
        preview("Title field", &html! { p.class("fs-3") { #title } }.render())
    }

    fn render_form(&self, instance: &ElementInstance, _value: Option<&str>, _invalid: bool) -> String {
        let attrs: TitleAttributes = attributes_or_default!(instance, Title);
        let title = attrs.title;
        html! { p.class("fs-3") { #title } }.render()
    }

    fn property_fields(&self, instance: &ElementInstance) -> Vec<PropertyField> {
        let attrs: TitleAttributes = attributes_or_default!(instance, Title);
        vec![title_property("Title", &attrs.title)]
    }

    fn attributes_from_properties(&self, values: &HashMap<String, String>) -> ExtraAttributes {
        ExtraAttributes::Title(TitleAttributes {
            title: property(values, "title").to_string(),
        })
    }
}

/// Smaller heading.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubTitleField;

impl FieldType for SubTitleField {
    fn kind(&self) -> ElementKind {
        ElementKind::SubTitleField
    }

    fn default_attributes(&self) -> ExtraAttributes {
        ExtraAttributes::SubTitle(SubTitleAttributes::default())
    }

    fn palette_button(&self) -> PaletteButton {
        PaletteButton {
            kind: self.kind(),
            label: "SubTitle field",
            icon: "bi-type-h2",
            group: PaletteGroup::Layout,
        }
    }

    fn check_attributes(&self, attributes: &ExtraAttributes) -> Result<(), String> {
        let attrs = expect_attributes!(attributes, SubTitle);
        check_length("title", &attrs.title, TITLE_MIN, TITLE_MAX)
    }

    fn check(&self, _instance: &ElementInstance, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn render_designer(&self, instance: &ElementInstance) -> String {
        let attrs: SubTitleAttributes = attributes_or_default!(instance, SubTitle);
        let title = attrs.title;
        preview("SubTitle field", &html! { p.class("fs-5") { #title } }.render())
    }

    fn render_form(&self, instance: &ElementInstance, _value: Option<&str>, _invalid: bool) -> String {
        let attrs: SubTitleAttributes = attributes_or_default!(instance, SubTitle);
        let title = attrs.title;
        html! { p.class("fs-5") { #title } }.render()
    }

    fn property_fields(&self, instance: &ElementInstance) -> Vec<PropertyField> {
        let attrs: SubTitleAttributes = attributes_or_default!(instance, SubTitle);
        vec![title_property("SubTitle", &attrs.title)]
    }

    fn attributes_from_properties(&self, values: &HashMap<String, String>) -> ExtraAttributes {
        ExtraAttributes::SubTitle(SubTitleAttributes {
            title: property(values, "title").to_string(),
        })
    }
}

/// Block of explanatory text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphField;

impl FieldType for ParagraphField {
    fn kind(&self) -> ElementKind {
        ElementKind::ParagraphField
    }

    fn default_attributes(&self) -> ExtraAttributes {
        ExtraAttributes::Paragraph(ParagraphAttributes::default())
    }

    fn palette_button(&self) -> PaletteButton {
        PaletteButton {
            kind: self.kind(),
            label: "Paragraph field",
            icon: "bi-text-paragraph",
            group: PaletteGroup::Layout,
        }
    }

    fn check_attributes(&self, attributes: &ExtraAttributes) -> Result<(), String> {
        let attrs = expect_attributes!(attributes, Paragraph);
        check_length("text", &attrs.text, PARAGRAPH_MIN, PARAGRAPH_MAX)
    }

    fn check(&self, _instance: &ElementInstance, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn render_designer(&self, instance: &ElementInstance) -> String {
        let attrs: ParagraphAttributes = attributes_or_default!(instance, Paragraph);
        let text = attrs.text;
        preview("Paragraph field", &html! { p.class("text-truncate") { #text } }.render())
    }

    fn render_form(&self, instance: &ElementInstance, _value: Option<&str>, _invalid: bool) -> String {
        let attrs: ParagraphAttributes = attributes_or_default!(instance, Paragraph);
        let text = attrs.text;
        html! { p { #text } }.render()
    }

    fn property_fields(&self, instance: &ElementInstance) -> Vec<PropertyField> {
        let attrs: ParagraphAttributes = attributes_or_default!(instance, Paragraph);
        vec![PropertyField::new("text", "Text", BootstrapTextarea::new(5))
            .required()
            .validator(MinLengthValidator::new(PARAGRAPH_MIN))
            .validator(MaxLengthValidator::new(PARAGRAPH_MAX))
            .initial(attrs.text)]
    }

    fn attributes_from_properties(&self, values: &HashMap<String, String>) -> ExtraAttributes {
        ExtraAttributes::Paragraph(ParagraphAttributes {
            text: property(values, "text").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_accepts_any_value() {
        let instance = TitleField.construct("1");
        assert!(instance.validate(""));
        assert!(instance.validate("anything"));
    }

    #[test]
    fn test_title_schema_bounds() {
        let short = ExtraAttributes::Title(TitleAttributes {
            title: "x".to_string(),
        });
        assert!(TitleField.check_attributes(&short).is_err());

        let long = ExtraAttributes::Title(TitleAttributes {
            title: "x".repeat(51),
        });
        assert!(TitleField.check_attributes(&long).is_err());

        let wrong_kind = ExtraAttributes::Paragraph(ParagraphAttributes::default());
        assert!(TitleField.check_attributes(&wrong_kind).is_err());
    }

    #[test]
    fn test_title_renders_escaped_text() {
        let instance = ElementInstance::new(
            "1",
            ExtraAttributes::Title(TitleAttributes {
                title: "<b>Survey</b>".to_string(),
            }),
        );
        let html = TitleField.render_form(&instance, None, false);
        assert!(html.contains("Survey"));
        assert!(!html.contains("<b>Survey"));
        assert!(TitleField.render_designer(&instance).contains("Title field"));
    }

    #[test]
    fn test_paragraph_apply_properties() {
        let instance = ParagraphField.construct("1");

        let mut values = HashMap::new();
        values.insert("text".to_string(), "Please answer honestly.".to_string());
        let attrs = ParagraphField.apply_properties(&instance, &values).unwrap();
        assert_eq!(
            attrs,
            ExtraAttributes::Paragraph(ParagraphAttributes {
                text: "Please answer honestly.".to_string()
            })
        );

        values.insert("text".to_string(), "x".to_string());
        let errors = ParagraphField.apply_properties(&instance, &values).unwrap_err();
        assert!(errors.contains("text"));
    }
}
