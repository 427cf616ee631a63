//! HTML for the designer canvas, the palette, the properties panel and the
//! live form.
//!
//! Per-kind markup comes from [`FieldType`](crate::fields::FieldType); this
//! module composes it into Bootstrap 5 pages and provides the small helpers
//! the kinds share.

use std::collections::HashMap;

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Button, Div, Label, Span, I, P};

use crate::error::ValidationErrors;
use crate::fields::{ElementInstance, FieldRegistry, PaletteGroup};
use crate::layout::Layout;
use crate::properties::PropertyField;
use crate::validation::{MaxLengthValidator, MinLengthValidator};
use crate::widgets::{BootstrapCheckbox, BootstrapTextInput, WidgetAttrs};

/// Zone id of the designer canvas.
pub const CANVAS_ZONE: &str = "designer-drop-area";

/// Zone id of the side panel, where dropping an element deletes it.
pub const SIDE_PANEL_ZONE: &str = "designer-side-bar-drop-area";

/// Wraps a layout element preview with its palette caption.
pub(crate) fn preview(caption: &str, body_html: &str) -> String {
    Element::<Div>::new()
        .class("d-flex flex-column gap-2 w-100")
        .child::<Span, _>(|s| s.class("text-muted small").text(caption))
        .raw(body_html)
        .render()
}

/// Attributes of a control on the designer canvas, where nothing is fillable.
pub(crate) fn designer_attrs() -> WidgetAttrs {
    WidgetAttrs::new()
        .with("disabled", "disabled")
        .with("tabindex", "-1")
}

/// Attributes of a live form control.
pub(crate) fn control_attrs(invalid: bool) -> WidgetAttrs {
    WidgetAttrs::new()
        .with_if(invalid, "class", "is-invalid")
        .with_if(invalid, "aria-invalid", "true")
}

/// Label, control and helper text of an input kind.
pub(crate) fn input_group(
    label: &str,
    required: bool,
    helper_text: &str,
    control_html: &str,
    invalid: bool,
) -> String {
    let label_text = if required {
        format!("{label} *")
    } else {
        label.to_string()
    };
    let label_class = if invalid { "form-label text-danger" } else { "form-label" };
    let helper_class = if invalid { "form-text text-danger" } else { "form-text" };

    Element::<Div>::new()
        .class("mb-3")
        .child::<Label, _>(|l| l.class(label_class).text(&label_text))
        .raw(control_html)
        .when(!helper_text.is_empty(), |d| {
            d.child::<Div, _>(|h| h.class(helper_class).text(helper_text))
        })
        .render()
}

/// Properties shared by every input kind: label, helper text and the
/// required switch.
pub(crate) fn label_properties(label: &str, helper_text: &str, required: bool) -> Vec<PropertyField> {
    vec![
        PropertyField::new("label", "Label", BootstrapTextInput::new())
            .required()
            .validator(MinLengthValidator::new(crate::fields::LABEL_MIN))
            .validator(MaxLengthValidator::new(crate::fields::LABEL_MAX))
            .help_text("The label of the field. It will be displayed above the field.")
            .initial(label),
        PropertyField::new("helperText", "Helper text", BootstrapTextInput::new())
            .validator(MaxLengthValidator::new(crate::fields::HELPER_TEXT_MAX))
            .help_text("Shown below the field.")
            .initial(helper_text),
        PropertyField::new("required", "Required", BootstrapCheckbox::switch())
            .help_text("Submissions must fill this field.")
            .initial(required.to_string()),
    ]
}

/// Renders one placed element on the canvas, with its two drop halves and
/// the remove button.
pub fn render_designer_element(instance: &ElementInstance, selected: bool) -> String {
    let id = instance.id();
    let top = format!("{id}-top");
    let bottom = format!("{id}-bottom");
    let class = if selected {
        "designer-element position-relative border border-primary rounded p-3 mb-2"
    } else {
        "designer-element position-relative border rounded p-3 mb-2"
    };
    let body = instance.definition().render_designer(instance);

    Element::<Div>::new()
        .class(class)
        .attr("data-element-id", id)
        .attr("draggable", "true")
        .child::<Div, _>(|d| {
            d.class("drop-half drop-half-top position-absolute top-0 start-0 w-100 h-50")
                .attr("data-drop-zone", &top)
        })
        .child::<Div, _>(|d| {
            d.class("drop-half drop-half-bottom position-absolute bottom-0 start-0 w-100 h-50")
                .attr("data-drop-zone", &bottom)
        })
        .raw(&body)
        .child::<Button, _>(|b| {
            b.attr("type", "button")
                .class("btn btn-sm btn-outline-danger position-absolute top-0 end-0 m-1")
                .attr("data-action", "remove")
                .attr("data-element-id", id)
                .child::<I, _>(|i| i.class("bi bi-trash"))
        })
        .render()
}

/// Renders the designer canvas.
pub fn render_canvas(layout: &Layout) -> String {
    let mut elements_html = String::new();
    for instance in layout.elements() {
        let selected = layout.selected() == Some(instance.id());
        elements_html.push_str(&render_designer_element(instance, selected));
    }

    Element::<Div>::new()
        .class("designer-canvas bg-body-tertiary rounded p-4 min-vh-50 d-flex flex-column")
        .attr("id", CANVAS_ZONE)
        .attr("data-drop-zone", CANVAS_ZONE)
        .when(layout.is_empty(), |d| {
            d.child::<P, _>(|p| {
                p.class("text-muted fs-3 text-center my-auto").text("Drop here")
            })
        })
        .raw(&elements_html)
        .render()
}

/// Renders the palette of every kind, grouped under its heading.
pub fn render_palette() -> String {
    let registry = FieldRegistry::global();
    let mut html = String::new();

    for group in [PaletteGroup::Layout, PaletteGroup::Form] {
        let buttons = registry.palette(group);
        Element::<Div>::new()
            .class("mb-3")
            .child::<P, _>(|p| p.class("text-muted small mb-2").text(group.heading()))
            .child::<Div, _>(|grid| {
                grid.class("d-grid gap-2").children(buttons.iter(), |button, b: Element<Button>| {
                    b.attr("type", "button")
                        .class("btn btn-outline-secondary d-flex align-items-center gap-2")
                        .attr("draggable", "true")
                        .attr("data-kind", button.kind.as_str())
                        .child::<I, _>(|i| i.class(format!("bi {}", button.icon)))
                        .child::<Span, _>(|s| s.text(button.label))
                })
            })
            .render_to(&mut html);
    }

    html! { div.class("designer-palette") }.raw(&html).render()
}

/// Renders the side panel: the selected element's properties editor, or
/// the palette when nothing is selected.
pub fn render_properties_panel(layout: &Layout) -> String {
    let content = match layout.selected_element() {
        Some(instance) => {
            let properties = instance.definition().render_properties(instance);
            Element::<Div>::new()
                .child::<Div, _>(|header| {
                    header
                        .class("d-flex justify-content-between align-items-center mb-3")
                        .child::<P, _>(|p| p.class("text-muted small mb-0").text("Element properties"))
                        .child::<Button, _>(|b| {
                            b.attr("type", "button")
                                .class("btn-close")
                                .attr("data-action", "deselect")
                                .attr("aria-label", "Close")
                        })
                })
                .raw(&properties)
                .render()
        }
        None => render_palette(),
    };

    Element::<Div>::new()
        .class("designer-side-bar border-start p-3")
        .attr("id", SIDE_PANEL_ZONE)
        .attr("data-drop-zone", SIDE_PANEL_ZONE)
        .raw(&content)
        .render()
}

/// Renders the fillable form, marking each id present in `errors`.
pub fn render_live_form(
    layout: &Layout,
    values: &HashMap<String, String>,
    errors: &ValidationErrors,
) -> String {
    let mut fields_html = String::new();
    for instance in layout.elements() {
        let value = values.get(instance.id()).map(String::as_str);
        let invalid = errors.contains(instance.id());
        fields_html.push_str(&instance.definition().render_form(instance, value, invalid));
    }

    let form = html! {
        form.method("post").class("d-flex flex-column gap-3 bg-body p-4 rounded shadow-sm")
    };
    form.child::<Div, _>(|d| d.class("d-flex flex-column gap-3").raw(&fields_html))
        .child::<Div, _>(|d| {
            let btn = html! {
                button.type_("submit").class("btn btn-primary w-100") {
                    "Submit"
                }
            };
            d.raw(btn.render())
        })
        .render()
}
