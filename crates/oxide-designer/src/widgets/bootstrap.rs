//! Bootstrap 5 controls built on the typed element builder.

use ironhtml::typed::Element;
use ironhtml_elements::{Div, Input, Label, Option_, Select as SelectEl, Textarea};

use super::{Widget, WidgetAttrs};

/// Single-line `<input>` of a given type.
#[derive(Debug, Clone)]
pub struct BootstrapTextInput {
    input_type: &'static str,
    placeholder: Option<String>,
}

impl Default for BootstrapTextInput {
    fn default() -> Self {
        Self {
            input_type: "text",
            placeholder: None,
        }
    }
}

impl BootstrapTextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number() -> Self {
        Self {
            input_type: "number",
            ..Self::default()
        }
    }

    pub fn date() -> Self {
        Self {
            input_type: "date",
            ..Self::default()
        }
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl Widget for BootstrapTextInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let input = Element::<Input>::new()
            .attr("type", self.input_type)
            .class(attrs.class_with("form-control"))
            .id(attrs.id_for(name))
            .attr("name", name);
        let input = match value {
            Some(value) => input.attr("value", value),
            None => input,
        };
        let input = match &self.placeholder {
            Some(placeholder) => input.attr("placeholder", placeholder.as_str()),
            None => input,
        };
        attrs
            .extra()
            .fold(input, |input, (key, value)| input.attr(key, value))
            .render()
    }

    fn input_type(&self) -> &str {
        self.input_type
    }
}

/// Multi-line `<textarea>`.
#[derive(Debug, Clone)]
pub struct BootstrapTextarea {
    rows: u32,
    placeholder: Option<String>,
}

impl BootstrapTextarea {
    pub fn new(rows: u32) -> Self {
        Self {
            rows,
            placeholder: None,
        }
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl Widget for BootstrapTextarea {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let textarea = Element::<Textarea>::new()
            .class(attrs.class_with("form-control"))
            .id(attrs.id_for(name))
            .attr("name", name)
            .attr("rows", self.rows.to_string());
        let textarea = match &self.placeholder {
            Some(placeholder) => textarea.attr("placeholder", placeholder.as_str()),
            None => textarea,
        };
        attrs
            .extra()
            .fold(textarea, |textarea, (key, value)| textarea.attr(key, value))
            .text(value.unwrap_or_default())
            .render()
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// `<select>` whose option values are their labels.
#[derive(Debug, Clone)]
pub struct BootstrapSelect {
    options: Vec<String>,
    /// Label of the empty leading option.
    blank_label: Option<String>,
}

impl BootstrapSelect {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            blank_label: None,
        }
    }

    #[must_use]
    pub fn blank_label(mut self, label: impl Into<String>) -> Self {
        self.blank_label = Some(label.into());
        self
    }
}

impl Widget for BootstrapSelect {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let select = Element::<SelectEl>::new()
            .class(attrs.class_with("form-select"))
            .id(attrs.id_for(name))
            .attr("name", name);
        let select = attrs
            .extra()
            .fold(select, |select, (key, value)| select.attr(key, value));
        let select = match &self.blank_label {
            Some(blank) => select.child::<Option_, _>(|o| o.attr("value", "").text(blank.as_str())),
            None => select,
        };
        select
            .children(self.options.iter(), |option, o: Element<Option_>| {
                o.attr("value", option.as_str())
                    .when(value == Some(option.as_str()), |o| o.bool_attr("selected"))
                    .text(option.as_str())
            })
            .render()
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// Checkbox wrapped in a `form-check` container.
#[derive(Debug, Clone, Default)]
pub struct BootstrapCheckbox {
    label: Option<String>,
    is_switch: bool,
}

impl BootstrapCheckbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle-switch style.
    pub fn switch() -> Self {
        Self {
            is_switch: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Whether a raw checkbox value means "checked".
fn is_checked(value: Option<&str>) -> bool {
    matches!(value, Some("true" | "on" | "1"))
}

impl Widget for BootstrapCheckbox {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let id = attrs.id_for(name);
        let wrapper = if self.is_switch {
            "form-check form-switch"
        } else {
            "form-check"
        };

        let input = Element::<Input>::new()
            .class(attrs.class_with("form-check-input"))
            .attr("type", "checkbox")
            .id(id.as_str())
            .attr("name", name)
            .attr("value", "true")
            .when(is_checked(value), |i| i.bool_attr("checked"));
        let input = attrs
            .extra()
            .fold(input, |input, (key, value)| input.attr(key, value));

        let container = Element::<Div>::new().class(wrapper).raw(input.render());
        let container = match &self.label {
            Some(label) => container.child::<Label, _>(|l| {
                l.class("form-check-label")
                    .attr("for", id.as_str())
                    .text(label.as_str())
            }),
            None => container,
        };
        container.render()
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input() {
        let html = BootstrapTextInput::new()
            .placeholder("Enter name")
            .render("username", None, &WidgetAttrs::new());
        assert!(html.starts_with("<input"));
        assert!(html.contains(r#"class="form-control""#));
        assert!(html.contains(r#"name="username""#));
        assert!(html.contains(r#"id="id_username""#));
        assert!(html.contains(r#"placeholder="Enter name""#));
        assert!(!html.contains("value="));
    }

    #[test]
    fn test_number_and_date_inputs() {
        let html = BootstrapTextInput::number().render("n", Some("4"), &WidgetAttrs::new());
        assert!(html.contains(r#"type="number""#));
        assert!(html.contains(r#"value="4""#));

        let attrs = WidgetAttrs::new().with("disabled", "disabled");
        let html = BootstrapTextInput::date().render("d", None, &attrs);
        assert!(html.contains(r#"type="date""#));
        assert!(html.contains(r#"disabled="disabled""#));
    }

    #[test]
    fn test_textarea_escapes_content() {
        let html = BootstrapTextarea::new(6).render("content", Some("<b>Hello</b>"), &WidgetAttrs::new());
        assert!(html.contains(r#"rows="6""#));
        assert!(html.contains("&lt;b&gt;Hello&lt;/b&gt;"));
        assert!(html.ends_with("</textarea>"));
    }

    #[test]
    fn test_select_marks_current_value() {
        let html = BootstrapSelect::new(["Red", "Green"])
            .blank_label("Pick one")
            .render("choice", Some("Green"), &WidgetAttrs::new());
        assert!(html.contains(r#"class="form-select""#));
        assert!(html.contains("Pick one"));
        assert_eq!(html.matches("<option").count(), 3);
        assert_eq!(html.matches("selected").count(), 1);
    }

    #[test]
    fn test_checkbox() {
        let html = BootstrapCheckbox::new()
            .label("I agree")
            .render("agree", Some("true"), &WidgetAttrs::new());
        assert!(html.contains(r#"class="form-check""#));
        assert!(html.contains("checked"));
        assert!(html.contains(r#"for="id_agree""#));
        assert!(html.contains("I agree"));

        let html = BootstrapCheckbox::switch().render("enabled", Some("false"), &WidgetAttrs::new());
        assert!(html.contains("form-switch"));
        assert!(!html.contains("checked"));
    }

    #[test]
    fn test_extra_attrs_reach_every_control() {
        let attrs = WidgetAttrs::new()
            .with("data-field", "colour")
            .with("aria-describedby", "colour-help");
        let controls = [
            BootstrapTextInput::new().render("c", None, &attrs),
            BootstrapTextarea::new(3).render("c", None, &attrs),
            BootstrapSelect::new(["Red"]).render("c", None, &attrs),
            BootstrapCheckbox::new().render("c", None, &attrs),
        ];
        for html in controls {
            assert!(html.contains(r#"data-field="colour""#), "{html}");
            assert!(html.contains(r#"aria-describedby="colour-help""#), "{html}");
        }
    }
}
