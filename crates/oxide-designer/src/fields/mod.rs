//! Field kinds and the contract every kind implements.
//!
//! The set of kinds is closed: [`ElementKind`] is the discriminant and
//! [`ElementKind::definition`] maps each one to its [`FieldType`]
//! implementation. Nothing outside this module looks inside an instance's
//! attributes without going through that contract.

/// Extracts the attribute struct of the expected variant, or reports the
/// mismatch as a validation message.
macro_rules! expect_attributes {
    ($attributes:expr, $variant:ident) => {
        match $attributes {
            $crate::fields::ExtraAttributes::$variant(inner) => inner,
            other => {
                return Err(format!(
                    "expected {} attributes, got {}",
                    stringify!($variant),
                    other.kind()
                ))
            }
        }
    };
}
pub(crate) use expect_attributes;

/// Clones the attribute struct of the expected variant out of an instance,
/// falling back to the kind's defaults.
macro_rules! attributes_or_default {
    ($instance:expr, $variant:ident) => {
        match $instance.attributes() {
            $crate::fields::ExtraAttributes::$variant(inner) => inner.clone(),
            _ => Default::default(),
        }
    };
}
pub(crate) use attributes_or_default;

mod checkbox;
mod date;
mod number;
mod select;
mod spacing;
mod static_text;
mod text;

pub use checkbox::{CheckboxAttributes, CheckboxField};
pub use date::{DateAttributes, DateField};
pub use number::{NumberAttributes, NumberField};
pub use select::{SelectAttributes, SelectField};
pub use spacing::{SeparatorAttributes, SeparatorField, SpacerAttributes, SpacerField};
pub use static_text::{
    ParagraphAttributes, ParagraphField, SubTitleAttributes, SubTitleField, TitleAttributes,
    TitleField,
};
pub use text::{TextAreaAttributes, TextAreaField, TextAttributes, TextField};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DesignerError, Result, ValidationErrors};
use crate::properties::{clean_properties, render_properties_form, PropertyField, NON_FIELD_ERRORS};
use crate::validation::{MaxLengthValidator, MinLengthValidator, RequiredValidator, Validator};

/// Bounds shared by every labelled input kind.
pub(crate) const LABEL_MIN: usize = 2;
pub(crate) const LABEL_MAX: usize = 50;
pub(crate) const HELPER_TEXT_MAX: usize = 600;
pub(crate) const PLACEHOLDER_MAX: usize = 50;

/// Discriminant of a field kind.
///
/// Serialized with the tags the stored forms already use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    TitleField,
    SubTitleField,
    ParagraphField,
    SeparatorField,
    SpacerField,
    TextField,
    NumberField,
    TextAreaField,
    DateField,
    SelectField,
    CheckboxField,
}

impl ElementKind {
    /// Every kind, in palette order.
    pub const ALL: [Self; 11] = [
        Self::TitleField,
        Self::SubTitleField,
        Self::ParagraphField,
        Self::SeparatorField,
        Self::SpacerField,
        Self::TextField,
        Self::NumberField,
        Self::TextAreaField,
        Self::DateField,
        Self::SelectField,
        Self::CheckboxField,
    ];

    /// Returns the wire tag of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TitleField => "TitleField",
            Self::SubTitleField => "SubTitleField",
            Self::ParagraphField => "ParagraphField",
            Self::SeparatorField => "SeparatorField",
            Self::SpacerField => "SpacerField",
            Self::TextField => "TextField",
            Self::NumberField => "NumberField",
            Self::TextAreaField => "TextAreaField",
            Self::DateField => "DateField",
            Self::SelectField => "SelectField",
            Self::CheckboxField => "CheckboxField",
        }
    }

    /// Returns the contract implementation for this kind.
    pub fn definition(self) -> &'static dyn FieldType {
        match self {
            Self::TitleField => &TitleField,
            Self::SubTitleField => &SubTitleField,
            Self::ParagraphField => &ParagraphField,
            Self::SeparatorField => &SeparatorField,
            Self::SpacerField => &SpacerField,
            Self::TextField => &TextField,
            Self::NumberField => &NumberField,
            Self::TextAreaField => &TextAreaField,
            Self::DateField => &DateField,
            Self::SelectField => &SelectField,
            Self::CheckboxField => &CheckboxField,
        }
    }

    /// Returns whether instances of this kind collect a value on the live form.
    pub const fn collects_value(self) -> bool {
        !matches!(
            self,
            Self::TitleField
                | Self::SubTitleField
                | Self::ParagraphField
                | Self::SeparatorField
                | Self::SpacerField
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = DesignerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DesignerError::UnknownKind(s.to_string()))
    }
}

/// Palette section a button is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteGroup {
    /// Static content that collects nothing.
    Layout,
    /// Inputs that collect a value.
    Form,
}

impl PaletteGroup {
    /// Heading shown above the group.
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Layout => "Layout elements",
            Self::Form => "Form elements",
        }
    }
}

/// Palette button metadata for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteButton {
    pub kind: ElementKind,
    pub label: &'static str,
    /// Bootstrap icon class.
    pub icon: &'static str,
    pub group: PaletteGroup,
}

/// Kind-specific configuration of a placed instance.
///
/// The variant is the kind, so an instance can never carry attributes shaped
/// for another kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtraAttributes {
    Title(TitleAttributes),
    SubTitle(SubTitleAttributes),
    Paragraph(ParagraphAttributes),
    Separator(SeparatorAttributes),
    Spacer(SpacerAttributes),
    Text(TextAttributes),
    Number(NumberAttributes),
    TextArea(TextAreaAttributes),
    Date(DateAttributes),
    Select(SelectAttributes),
    Checkbox(CheckboxAttributes),
}

impl ExtraAttributes {
    /// Returns the kind these attributes belong to.
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Title(_) => ElementKind::TitleField,
            Self::SubTitle(_) => ElementKind::SubTitleField,
            Self::Paragraph(_) => ElementKind::ParagraphField,
            Self::Separator(_) => ElementKind::SeparatorField,
            Self::Spacer(_) => ElementKind::SpacerField,
            Self::Text(_) => ElementKind::TextField,
            Self::Number(_) => ElementKind::NumberField,
            Self::TextArea(_) => ElementKind::TextAreaField,
            Self::Date(_) => ElementKind::DateField,
            Self::Select(_) => ElementKind::SelectField,
            Self::Checkbox(_) => ElementKind::CheckboxField,
        }
    }

    /// Returns whether the field demands a non-empty value.
    pub const fn required(&self) -> bool {
        match self {
            Self::Text(a) => a.required,
            Self::Number(a) => a.required,
            Self::TextArea(a) => a.required,
            Self::Date(a) => a.required,
            Self::Select(a) => a.required,
            Self::Checkbox(a) => a.required,
            _ => false,
        }
    }

    /// Returns the user-facing label of input kinds.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Text(a) => Some(&a.label),
            Self::Number(a) => Some(&a.label),
            Self::TextArea(a) => Some(&a.label),
            Self::Date(a) => Some(&a.label),
            Self::Select(a) => Some(&a.label),
            Self::Checkbox(a) => Some(&a.label),
            _ => None,
        }
    }

    /// Serializes the attributes into their stored JSON object.
    pub fn to_value(&self) -> Result<Value> {
        let value = match self {
            Self::Title(a) => serde_json::to_value(a)?,
            Self::SubTitle(a) => serde_json::to_value(a)?,
            Self::Paragraph(a) => serde_json::to_value(a)?,
            Self::Separator(a) => serde_json::to_value(a)?,
            Self::Spacer(a) => serde_json::to_value(a)?,
            Self::Text(a) => serde_json::to_value(a)?,
            Self::Number(a) => serde_json::to_value(a)?,
            Self::TextArea(a) => serde_json::to_value(a)?,
            Self::Date(a) => serde_json::to_value(a)?,
            Self::Select(a) => serde_json::to_value(a)?,
            Self::Checkbox(a) => serde_json::to_value(a)?,
        };
        Ok(value)
    }

    /// Parses a stored JSON object for `kind` and checks it against the
    /// kind's schema.
    ///
    /// Missing keys take the kind's defaults; `null` means all defaults.
    pub fn from_value(kind: ElementKind, value: Value) -> Result<Self> {
        let value = if value.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            value
        };

        let attributes = match kind {
            ElementKind::TitleField => Self::Title(serde_json::from_value(value)?),
            ElementKind::SubTitleField => Self::SubTitle(serde_json::from_value(value)?),
            ElementKind::ParagraphField => Self::Paragraph(serde_json::from_value(value)?),
            ElementKind::SeparatorField => Self::Separator(serde_json::from_value(value)?),
            ElementKind::SpacerField => Self::Spacer(serde_json::from_value(value)?),
            ElementKind::TextField => Self::Text(serde_json::from_value(value)?),
            ElementKind::NumberField => Self::Number(serde_json::from_value(value)?),
            ElementKind::TextAreaField => Self::TextArea(serde_json::from_value(value)?),
            ElementKind::DateField => Self::Date(serde_json::from_value(value)?),
            ElementKind::SelectField => Self::Select(serde_json::from_value(value)?),
            ElementKind::CheckboxField => Self::Checkbox(serde_json::from_value(value)?),
        };

        attributes.check()?;
        Ok(attributes)
    }

    /// Checks the attributes against their kind's schema.
    pub fn check(&self) -> Result<()> {
        let kind = self.kind();
        kind.definition()
            .check_attributes(self)
            .map_err(|message| DesignerError::InvalidAttributes {
                kind: kind.to_string(),
                message,
            })
    }
}

/// One placed, configured occurrence of a kind.
///
/// The id is fixed at construction; attributes change only by whole-value
/// replacement through the layout store.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementInstance {
    id: String,
    attributes: ExtraAttributes,
}

impl ElementInstance {
    /// Creates an instance from an id and its attributes.
    pub fn new(id: impl Into<String>, attributes: ExtraAttributes) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    /// Returns the instance id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the instance kind.
    pub const fn kind(&self) -> ElementKind {
        self.attributes.kind()
    }

    /// Returns the instance attributes.
    pub const fn attributes(&self) -> &ExtraAttributes {
        &self.attributes
    }

    /// Returns the contract implementation for this instance's kind.
    pub fn definition(&self) -> &'static dyn FieldType {
        self.kind().definition()
    }

    /// Returns a copy carrying new attributes under the same id.
    #[must_use]
    pub fn with_attributes(&self, attributes: ExtraAttributes) -> Self {
        Self {
            id: self.id.clone(),
            attributes,
        }
    }

    /// Checks a raw submitted value, returning a message on failure.
    pub fn check(&self, value: &str) -> std::result::Result<(), String> {
        self.definition().check(self, value)
    }

    /// Returns whether a raw submitted value is acceptable.
    pub fn validate(&self, value: &str) -> bool {
        self.definition().validate(self, value)
    }
}

/// The contract every field kind satisfies.
///
/// Implementations are stateless unit types; all per-instance data lives in
/// the instance's [`ExtraAttributes`].
pub trait FieldType: Send + Sync {
    /// The kind this definition implements.
    fn kind(&self) -> ElementKind;

    /// Attributes a freshly constructed instance starts with.
    fn default_attributes(&self) -> ExtraAttributes;

    /// Produces a fresh instance with default attributes.
    fn construct(&self, id: &str) -> ElementInstance {
        ElementInstance::new(id, self.default_attributes())
    }

    /// Palette metadata.
    fn palette_button(&self) -> PaletteButton;

    /// Checks attributes against this kind's schema.
    fn check_attributes(&self, attributes: &ExtraAttributes) -> std::result::Result<(), String>;

    /// Checks a raw submitted value against the instance's configuration.
    ///
    /// Must be pure and must not panic on malformed input.
    fn check(&self, instance: &ElementInstance, value: &str) -> std::result::Result<(), String>;

    /// Returns whether a raw submitted value is acceptable.
    fn validate(&self, instance: &ElementInstance, value: &str) -> bool {
        self.check(instance, value).is_ok()
    }

    /// Designer canvas preview.
    fn render_designer(&self, instance: &ElementInstance) -> String;

    /// Live, fillable form control.
    fn render_form(&self, instance: &ElementInstance, value: Option<&str>, invalid: bool)
        -> String;

    /// Inputs of the properties editor, prefilled from the instance.
    fn property_fields(&self, instance: &ElementInstance) -> Vec<PropertyField>;

    /// Builds attributes from a posted properties form whose inputs already
    /// passed their validators.
    fn attributes_from_properties(&self, values: &HashMap<String, String>) -> ExtraAttributes;

    /// Properties editor.
    fn render_properties(&self, instance: &ElementInstance) -> String {
        render_properties_form(instance.id(), &self.property_fields(instance))
    }

    /// Turns a posted properties form into new attributes for the instance.
    ///
    /// Errors are keyed by property name.
    fn apply_properties(
        &self,
        instance: &ElementInstance,
        values: &HashMap<String, String>,
    ) -> std::result::Result<ExtraAttributes, ValidationErrors> {
        let mut errors = clean_properties(&self.property_fields(instance), values);
        if !errors.is_empty() {
            return Err(errors);
        }

        let attributes = self.attributes_from_properties(values);
        if let Err(message) = self.check_attributes(&attributes) {
            errors.add(NON_FIELD_ERRORS, message);
            return Err(errors);
        }
        Ok(attributes)
    }
}

/// Read-only table of every field definition, in palette order.
pub struct FieldRegistry {
    definitions: Vec<&'static dyn FieldType>,
}

static REGISTRY: LazyLock<FieldRegistry> = LazyLock::new(|| FieldRegistry {
    definitions: ElementKind::ALL
        .into_iter()
        .map(ElementKind::definition)
        .collect(),
});

impl FieldRegistry {
    /// Returns the process-wide registry.
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    /// Returns the definition of a kind.
    pub fn get(&self, kind: ElementKind) -> &'static dyn FieldType {
        kind.definition()
    }

    /// Looks a definition up by its wire tag.
    pub fn lookup(&self, tag: &str) -> Result<&'static dyn FieldType> {
        tag.parse::<ElementKind>().map(ElementKind::definition)
    }

    /// Iterates over all definitions in palette order.
    pub fn iter(&self) -> impl Iterator<Item = &'static dyn FieldType> + '_ {
        self.definitions.iter().copied()
    }

    /// Returns the palette buttons of a group.
    pub fn palette(&self, group: PaletteGroup) -> Vec<PaletteButton> {
        self.iter()
            .map(|definition| definition.palette_button())
            .filter(|button| button.group == group)
            .collect()
    }
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.definitions.iter().map(|d| d.kind()))
            .finish()
    }
}

/// Checks a text attribute against inclusive character bounds.
pub(crate) fn check_length(
    name: &str,
    value: &str,
    min: usize,
    max: usize,
) -> std::result::Result<(), String> {
    MinLengthValidator::new(min)
        .validate(value)
        .and_then(|()| MaxLengthValidator::new(max).validate(value))
        .map_err(|message| format!("{name}: {message}"))
}

/// Checks the label/helper text pair every input kind carries.
pub(crate) fn check_label(label: &str, helper_text: &str) -> std::result::Result<(), String> {
    check_length("label", label, LABEL_MIN, LABEL_MAX)?;
    check_length("helperText", helper_text, 0, HELPER_TEXT_MAX)
}

/// Applies the shared `required` rule to a raw value.
pub(crate) fn check_required(required: bool, value: &str) -> std::result::Result<(), String> {
    if required {
        RequiredValidator::new().validate(value)
    } else {
        Ok(())
    }
}

/// Reads a posted property, falling back to an empty string.
pub(crate) fn property<'a>(values: &'a HashMap<String, String>, name: &str) -> &'a str {
    values.get(name).map_or("", String::as_str)
}

/// Reads a posted switch; unchecked switches are absent from the form.
pub(crate) fn property_flag(values: &HashMap<String, String>, name: &str) -> bool {
    matches!(property(values, name), "true" | "on" | "1")
}
