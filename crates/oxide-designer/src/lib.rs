//! # oxide-designer
//!
//! Layout engine of a drag-and-drop form builder.
//!
//! This crate provides:
//! - A closed registry of field kinds, each with default attributes, an
//!   attribute schema, value validation and three HTML renderings
//! - The layout store: ordered element instances plus the selection
//! - The drag-and-drop reorder engine that turns gestures into layout edits
//! - Submission validation over a whole layout
//! - Reference collaborators: an in-memory form repository, notifiers and
//!   the create/save/publish/submit actions
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use oxide_designer::{
//!     validate_submission, DragEngine, DragSource, DropHalf, DropTarget, ElementKind,
//!     IdGenerator, Layout,
//! };
//!
//! let mut layout = Layout::new();
//! let mut engine = DragEngine::with_ids(IdGenerator::sequential(1));
//!
//! // Drop a title on the empty canvas, then a text input below it.
//! engine.start_drag(&mut layout, DragSource::Palette(ElementKind::TitleField)).unwrap();
//! engine.end_drag(&mut layout, &[DropTarget::Canvas]).unwrap();
//! engine.start_drag(&mut layout, DragSource::Palette(ElementKind::TextField)).unwrap();
//! engine
//!     .end_drag(&mut layout, &[DropTarget::half("1", DropHalf::Bottom)])
//!     .unwrap();
//!
//! let kinds: Vec<ElementKind> = layout.elements().iter().map(|e| e.kind()).collect();
//! assert_eq!(kinds, vec![ElementKind::TitleField, ElementKind::TextField]);
//!
//! // The text input is optional, so an empty submission is accepted.
//! let report = validate_submission(&layout, &HashMap::new());
//! assert!(report.is_accepted());
//! ```
//!
//! ## Editing Properties
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use oxide_designer::{ElementKind, Layout};
//!
//! let mut layout = Layout::new();
//! layout
//!     .add_element(0, ElementKind::TextField.definition().construct("name"))
//!     .unwrap();
//!
//! let instance = layout.get("name").unwrap().clone();
//! let mut posted = HashMap::new();
//! posted.insert("label".to_string(), "Full name".to_string());
//! posted.insert("required".to_string(), "on".to_string());
//!
//! let attributes = instance.definition().apply_properties(&instance, &posted).unwrap();
//! layout
//!     .update_element("name", instance.with_attributes(attributes))
//!     .unwrap();
//!
//! assert!(!layout.get("name").unwrap().validate(""));
//! ```
//!
//! ## Field Kinds
//!
//! Layout elements collect nothing:
//! - `TitleField`, `SubTitleField`, `ParagraphField`
//! - `SeparatorField`, `SpacerField`
//!
//! Form elements collect one value each, keyed by element id:
//! - `TextField`, `TextAreaField`, `NumberField`
//! - `DateField`, `SelectField`, `CheckboxField`

pub mod actions;
pub mod dnd;
mod error;
pub mod fields;
pub mod layout;
pub mod notify;
pub mod properties;
pub mod render;
pub mod repository;
pub mod submission;
pub mod validation;
pub mod widgets;

pub use dnd::{DragEngine, DragSource, DragState, DropHalf, DropOutcome, DropTarget, Gesture, IdGenerator};
pub use error::{DesignerError, Result, ValidationErrors};
pub use fields::{ElementInstance, ElementKind, ExtraAttributes, FieldRegistry, FieldType};
pub use layout::{ElementRecord, FormSnapshot, Layout};
pub use submission::{validate_submission, FormSubmission, SubmissionReport};
