//! Properties editor: the inputs a designer fills in to configure the
//! selected element.
//!
//! Each kind lists its editable attributes as [`PropertyField`]s. Posted
//! values are cleaned against those fields first, then converted back into
//! attributes by the kind itself.

use std::collections::HashMap;
use std::fmt;

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Div, Form, Label};

use crate::error::ValidationErrors;
use crate::validation::{RequiredValidator, Validator};
use crate::widgets::{Widget, WidgetAttrs};

/// Key under which errors that concern no single input are reported.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// One input of the properties editor, bound to an attribute by name.
pub struct PropertyField {
    /// Attribute name in its stored casing, also the posted input name.
    pub name: String,
    pub label: String,
    pub required: bool,
    pub help_text: Option<String>,
    /// The attribute's current value.
    pub initial: Option<String>,
    widget: Box<dyn Widget>,
    validators: Vec<Box<dyn Validator>>,
    attrs: WidgetAttrs,
}

impl fmt::Debug for PropertyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyField")
            .field("name", &self.name)
            .field("widget", &self.widget.input_type())
            .field("required", &self.required)
            .field("initial", &self.initial)
            .field("validators", &self.validators.len())
            .finish_non_exhaustive()
    }
}

impl PropertyField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, widget: impl Widget + 'static) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
            help_text: None,
            initial: None,
            widget: Box::new(widget),
            validators: Vec::new(),
            attrs: WidgetAttrs::new(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Adds a check run on non-empty posted values, in insertion order.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Adds an HTML attribute to the rendered control.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// Checks one posted value, returning the first failure.
    fn clean(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            return if self.required {
                RequiredValidator::new().validate(value)
            } else {
                Ok(())
            };
        }
        self.validators
            .iter()
            .try_for_each(|validator| validator.validate(value))
    }
}

/// Checks posted values against every field, keyed by field name.
pub fn clean_properties(fields: &[PropertyField], values: &HashMap<String, String>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in fields {
        let value = values.get(&field.name).map_or("", String::as_str);
        if let Err(message) = field.clean(value) {
            errors.add(&field.name, message);
        }
    }
    errors
}

/// Renders one input with its label, error and help text.
///
/// A posted `value` wins over the field's initial value.
pub fn render_property_field(field: &PropertyField, value: Option<&str>, error: Option<&str>) -> String {
    let id = format!("prop_{}", field.name);
    let attrs = field
        .attrs
        .clone()
        .with("id", id.as_str())
        .with_if(error.is_some(), "class", "is-invalid")
        .with_if(field.required, "required", "required");
    let control = field
        .widget
        .render(&field.name, value.or(field.initial.as_deref()), &attrs);

    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };

    Element::<Div>::new()
        .class("mb-3")
        .child::<Label, _>(|l| l.class("form-label").attr("for", id.as_str()).text(label.as_str()))
        .raw(&control)
        .when(error.is_some(), |d| {
            d.child::<Div, _>(|e| e.class("invalid-feedback").text(error.unwrap_or_default()))
        })
        .when(field.help_text.is_some(), |d| {
            d.child::<Div, _>(|h| {
                h.class("form-text")
                    .text(field.help_text.as_deref().unwrap_or_default())
            })
        })
        .render()
}

/// Renders the properties editor of one element with its current values.
pub fn render_properties_form(element_id: &str, fields: &[PropertyField]) -> String {
    render_properties_form_with(element_id, fields, &HashMap::new(), &ValidationErrors::new())
}

/// Renders the properties editor after a rejected post, showing the posted
/// values and their errors.
pub fn render_properties_form_with(
    element_id: &str,
    fields: &[PropertyField],
    values: &HashMap<String, String>,
    errors: &ValidationErrors,
) -> String {
    let action = format!("/designer/elements/{element_id}/properties");
    let inputs: String = fields
        .iter()
        .map(|field| {
            render_property_field(
                field,
                values.get(&field.name).map(String::as_str),
                errors.get(&field.name),
            )
        })
        .collect();
    let non_field = errors.get(NON_FIELD_ERRORS);

    Element::<Form>::new()
        .attr("action", action.as_str())
        .attr("method", "post")
        .attr("data-element-id", element_id)
        .when(non_field.is_some(), |f| {
            f.child::<Div, _>(|d| {
                d.class("alert alert-danger")
                    .attr("role", "alert")
                    .text(non_field.unwrap_or_default())
            })
        })
        .child::<Div, _>(|d| d.raw(&inputs))
        .child::<Div, _>(|d| {
            d.raw(
                html! {
                    button.type_("submit").class("btn btn-primary w-100") { "Save" }
                }
                .render(),
            )
        })
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{MaxLengthValidator, MinLengthValidator};
    use crate::widgets::{BootstrapCheckbox, BootstrapTextInput};

    fn label_field() -> PropertyField {
        PropertyField::new("label", "Label", BootstrapTextInput::new())
            .required()
            .validator(MinLengthValidator::new(2))
            .validator(MaxLengthValidator::new(50))
            .help_text("Shown above the field.")
            .initial("Text field")
    }

    #[test]
    fn test_clean_reports_first_failure_per_field() {
        let fields = vec![
            label_field(),
            PropertyField::new("required", "Required", BootstrapCheckbox::switch()),
        ];

        let mut values = HashMap::new();
        let errors = clean_properties(&fields, &values);
        assert_eq!(errors.ids(), vec!["label"]);
        assert_eq!(errors.get("label"), Some("This field is required."));

        values.insert("label".to_string(), "x".to_string());
        assert_eq!(clean_properties(&fields, &values).len(), 1);

        values.insert("label".to_string(), "Full name".to_string());
        assert!(clean_properties(&fields, &values).is_empty());
    }

    #[test]
    fn test_render_field_uses_initial_value() {
        let html = render_property_field(&label_field(), None, None);
        assert!(html.contains("form-label"));
        assert!(html.contains("Label *"));
        assert!(html.contains("Shown above the field."));
        assert!(html.contains(r#"value="Text field""#));
        assert!(html.contains(r#"id="prop_label""#));
        assert!(!html.contains("is-invalid"));
    }

    #[test]
    fn test_render_field_with_error_keeps_posted_value() {
        let html = render_property_field(&label_field(), Some("x"), Some("Too short"));
        assert!(html.contains("is-invalid"));
        assert!(html.contains("invalid-feedback"));
        assert!(html.contains("Too short"));
        assert!(html.contains(r#"value="x""#));
    }

    #[test]
    fn test_render_form_shows_non_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add(NON_FIELD_ERRORS, "min must not exceed max");
        let html = render_properties_form_with("7", &[label_field()], &HashMap::new(), &errors);
        assert!(html.contains("/designer/elements/7/properties"));
        assert!(html.contains("alert-danger"));
        assert!(html.contains("min must not exceed max"));
        assert!(html.contains("Save"));
        assert!(html.starts_with("<form"));
        assert!(html.contains(r#"name="label""#));
        assert!(html.find("alert-danger").unwrap() < html.find(r#"name="label""#).unwrap());
    }
}
