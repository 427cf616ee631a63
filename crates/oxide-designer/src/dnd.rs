//! Drag-and-drop reorder engine.
//!
//! A gesture moves the engine from idle to dragging and back. Dragging an
//! element that is already placed lifts it first: it is removed and
//! re-appended so it renders above everything else while it moves. The drop
//! then resolves, in order of precedence:
//!
//! 1. palette button over the canvas: append a new instance;
//! 2. palette button over an element half: insert before or after it;
//! 3. element over another element's half: move it there;
//! 4. element over the side panel: delete it;
//! 5. anything else: put a lifted element back where it was.

use std::fmt;

use rand::RngExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{DesignerError, Result};
use crate::fields::{ElementInstance, ElementKind, ExtraAttributes};
use crate::layout::Layout;
use crate::render::{CANVAS_ZONE, SIDE_PANEL_ZONE};

const RANDOM_ID_MAX: u32 = 10_000_000;

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragSource {
    /// A palette button of a kind; dropping it creates a new instance.
    Palette(ElementKind),
    /// An element already placed in the layout.
    Element(String),
}

/// Half of an element's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropHalf {
    Top,
    Bottom,
}

/// A zone the pointer is over when the gesture ends.
///
/// Serialized as the zone id the designer markup carries in its
/// `data-drop-zone` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DropTarget {
    Canvas,
    ElementHalf { id: String, half: DropHalf },
    SidePanel,
}

impl DropTarget {
    /// Parses a drop-zone id.
    pub fn from_zone_id(zone: &str) -> Option<Self> {
        match zone {
            CANVAS_ZONE => Some(Self::Canvas),
            SIDE_PANEL_ZONE => Some(Self::SidePanel),
            _ => {
                let (id, half) = if let Some(id) = zone.strip_suffix("-top") {
                    (id, DropHalf::Top)
                } else {
                    (zone.strip_suffix("-bottom")?, DropHalf::Bottom)
                };
                (!id.is_empty()).then(|| Self::ElementHalf {
                    id: id.to_string(),
                    half,
                })
            }
        }
    }

    /// Returns the drop-zone id.
    pub fn zone_id(&self) -> String {
        match self {
            Self::Canvas => CANVAS_ZONE.to_string(),
            Self::SidePanel => SIDE_PANEL_ZONE.to_string(),
            Self::ElementHalf { id, half: DropHalf::Top } => format!("{id}-top"),
            Self::ElementHalf { id, half: DropHalf::Bottom } => format!("{id}-bottom"),
        }
    }

    /// Shorthand for an element half target.
    pub fn half(id: impl Into<String>, half: DropHalf) -> Self {
        Self::ElementHalf { id: id.into(), half }
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.zone_id())
    }
}

impl TryFrom<String> for DropTarget {
    type Error = String;

    fn try_from(zone: String) -> std::result::Result<Self, Self::Error> {
        Self::from_zone_id(&zone).ok_or_else(|| format!("unknown drop zone: {zone}"))
    }
}

impl From<DropTarget> for String {
    fn from(target: DropTarget) -> Self {
        target.zone_id()
    }
}

/// Where the engine is within a gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: DragSource,
        /// The lifted element and the index it was lifted from.
        lifted: Option<(ElementInstance, usize)>,
    },
}

/// What a gesture did to the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// An element was lifted to the end of the layout for dragging.
    Lifted { id: String, from: usize },
    /// A new instance was created from the palette.
    Added { id: String, index: usize },
    /// A placed element moved.
    Moved { id: String, from: usize, to: usize },
    /// A placed element was deleted.
    Removed { id: String },
    /// A lifted element was put back at its original position.
    Restored { id: String, index: usize },
    /// A placed element received new attributes.
    Updated { id: String },
    /// Nothing in the layout changed.
    Unchanged,
}

/// Source of ids for newly created instances.
#[derive(Debug, Clone, Default)]
pub enum IdGenerator {
    /// Random numeric ids.
    #[default]
    Random,
    /// Increasing numeric ids, for reproducible scripts.
    Sequential { next: u64 },
}

impl IdGenerator {
    pub fn random() -> Self {
        Self::Random
    }

    pub fn sequential(start: u64) -> Self {
        Self::Sequential { next: start }
    }

    /// Returns an id no element of `layout` uses yet.
    pub fn next_id(&mut self, layout: &Layout) -> String {
        loop {
            let candidate = match self {
                Self::Random => rand::rng().random_range(1..=RANDOM_ID_MAX).to_string(),
                Self::Sequential { next } => {
                    let id = next.to_string();
                    *next += 1;
                    id
                }
            };
            if !layout.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// One step of a recorded designer session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Gesture {
    DragStart {
        source: DragSource,
    },
    DragEnd {
        #[serde(default)]
        targets: Vec<DropTarget>,
    },
    Cancel,
    Select {
        id: String,
    },
    Deselect,
    Remove {
        id: String,
    },
    Update {
        id: String,
        #[serde(rename = "extraAttributes")]
        extra_attributes: Value,
    },
}

/// Removes `lifted`'s id and inserts the instance at the index `resolve`
/// computes on the shortened layout. The selection survives the move.
///
/// If the element is no longer placed, `lifted` is inserted instead.
fn reinsert(
    layout: &mut Layout,
    lifted: ElementInstance,
    resolve: impl FnOnce(&Layout) -> usize,
) -> Result<usize> {
    let id = lifted.id().to_string();
    let was_selected = layout.selected() == Some(id.as_str());
    let instance = layout.remove_element(&id).unwrap_or(lifted);

    let index = resolve(layout).min(layout.len());
    layout.add_element(index, instance)?;
    if was_selected {
        layout.set_selected(Some(&id));
    }
    Ok(index)
}

/// First element half among `targets` that names a placed element.
fn element_half<'a>(layout: &Layout, targets: &'a [DropTarget]) -> Option<(&'a str, DropHalf)> {
    targets.iter().find_map(|target| match target {
        DropTarget::ElementHalf { id, half } if layout.contains(id) => Some((id.as_str(), *half)),
        _ => None,
    })
}

fn insertion_index(layout: &Layout, target_id: &str, half: DropHalf) -> usize {
    let index = layout.index_of(target_id).unwrap_or(layout.len());
    match half {
        DropHalf::Top => index,
        DropHalf::Bottom => index + 1,
    }
}

/// Translates drag gestures into layout operations.
#[derive(Debug, Default)]
pub struct DragEngine {
    state: DragState,
    ids: IdGenerator,
}

impl DragEngine {
    /// Creates an idle engine issuing random ids.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle engine with its own id source.
    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            state: DragState::Idle,
            ids,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Begins a gesture, lifting a placed element to the end of the layout.
    ///
    /// A stale element id leaves the engine idle.
    pub fn start_drag(&mut self, layout: &mut Layout, source: DragSource) -> Result<DropOutcome> {
        if self.is_dragging() {
            return Err(DesignerError::DragInProgress);
        }

        let lifted = match &source {
            DragSource::Palette(kind) => {
                debug!(%kind, "drag start from palette");
                None
            }
            DragSource::Element(id) => {
                let (Some(from), Some(instance)) = (layout.index_of(id), layout.get(id).cloned())
                else {
                    debug!(id = %id, "drag start on a stale element ignored");
                    return Ok(DropOutcome::Unchanged);
                };
                reinsert(layout, instance.clone(), Layout::len)?;
                debug!(id = %id, from, "element lifted");
                Some((instance, from))
            }
        };

        let outcome = match &lifted {
            Some((instance, from)) => DropOutcome::Lifted {
                id: instance.id().to_string(),
                from: *from,
            },
            None => DropOutcome::Unchanged,
        };
        self.state = DragState::Dragging { source, lifted };
        Ok(outcome)
    }

    /// Ends the gesture over `targets`, the zones under the pointer.
    ///
    /// No targets means the pointer was released outside every zone, which
    /// is a cancellation.
    pub fn end_drag(&mut self, layout: &mut Layout, targets: &[DropTarget]) -> Result<DropOutcome> {
        let DragState::Dragging { source, lifted } = std::mem::take(&mut self.state) else {
            return Err(DesignerError::NoActiveDrag);
        };
        debug!(targets = ?targets, "drag end");

        let outcome = match (source, lifted) {
            (DragSource::Palette(kind), _) => self.drop_new(layout, kind, targets)?,
            (DragSource::Element(_), Some((instance, from))) => {
                Self::drop_placed(layout, instance, from, targets)?
            }
            (DragSource::Element(_), None) => DropOutcome::Unchanged,
        };
        debug!(outcome = ?outcome, "drop resolved");
        Ok(outcome)
    }

    /// Abandons the gesture, putting a lifted element back.
    pub fn cancel(&mut self, layout: &mut Layout) -> Result<DropOutcome> {
        let DragState::Dragging { lifted, .. } = std::mem::take(&mut self.state) else {
            return Err(DesignerError::NoActiveDrag);
        };
        match lifted {
            Some((instance, from)) => Self::restore(layout, instance, from),
            None => Ok(DropOutcome::Unchanged),
        }
    }

    /// Applies one recorded gesture.
    pub fn apply(&mut self, layout: &mut Layout, gesture: Gesture) -> Result<DropOutcome> {
        match gesture {
            Gesture::DragStart { source } => self.start_drag(layout, source),
            Gesture::DragEnd { targets } => self.end_drag(layout, &targets),
            Gesture::Cancel => self.cancel(layout),
            Gesture::Select { id } => {
                layout.set_selected(Some(&id));
                Ok(DropOutcome::Unchanged)
            }
            Gesture::Deselect => {
                layout.set_selected(None);
                Ok(DropOutcome::Unchanged)
            }
            Gesture::Remove { id } => Ok(layout
                .remove_element(&id)
                .map_or(DropOutcome::Unchanged, |removed| DropOutcome::Removed {
                    id: removed.id().to_string(),
                })),
            Gesture::Update {
                id,
                extra_attributes,
            } => {
                let Some(kind) = layout.get(&id).map(ElementInstance::kind) else {
                    return Ok(DropOutcome::Unchanged);
                };
                let attributes = ExtraAttributes::from_value(kind, extra_attributes)?;
                let updated = layout.update_element(&id, ElementInstance::new(id.as_str(), attributes))?;
                Ok(if updated {
                    DropOutcome::Updated { id }
                } else {
                    DropOutcome::Unchanged
                })
            }
        }
    }

    fn drop_new(
        &mut self,
        layout: &mut Layout,
        kind: ElementKind,
        targets: &[DropTarget],
    ) -> Result<DropOutcome> {
        let index = if targets.contains(&DropTarget::Canvas) {
            layout.len()
        } else if let Some((target_id, half)) = element_half(layout, targets) {
            insertion_index(layout, target_id, half)
        } else {
            return Ok(DropOutcome::Unchanged);
        };

        let id = self.ids.next_id(layout);
        layout.add_element(index, kind.definition().construct(&id))?;
        let index = layout.index_of(&id).unwrap_or(index);
        Ok(DropOutcome::Added { id, index })
    }

    fn drop_placed(
        layout: &mut Layout,
        instance: ElementInstance,
        from: usize,
        targets: &[DropTarget],
    ) -> Result<DropOutcome> {
        let id = instance.id().to_string();

        if let Some((target_id, half)) = element_half(layout, targets) {
            if target_id == id {
                return Self::restore(layout, instance, from);
            }
            let target_id = target_id.to_string();
            let to = reinsert(layout, instance, |shortened| {
                insertion_index(shortened, &target_id, half)
            })?;
            return Ok(DropOutcome::Moved { id, from, to });
        }

        if targets.contains(&DropTarget::SidePanel) {
            return Ok(match layout.remove_element(&id) {
                Some(_) => DropOutcome::Removed { id },
                None => DropOutcome::Unchanged,
            });
        }

        Self::restore(layout, instance, from)
    }

    fn restore(layout: &mut Layout, instance: ElementInstance, from: usize) -> Result<DropOutcome> {
        let id = instance.id().to_string();
        let index = reinsert(layout, instance, |_| from)?;
        debug!(id = %id, index, "lifted element restored");
        Ok(DropOutcome::Restored { id, index })
    }
}
