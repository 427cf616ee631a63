#![allow(dead_code)]

use std::collections::HashMap;

use oxide_designer::{
    DragEngine, DragSource, DropHalf, DropOutcome, DropTarget, ElementKind, FormSnapshot,
    IdGenerator, Layout,
};

/// Engine handing out ids "1", "2", ... in order.
pub fn engine() -> DragEngine {
    DragEngine::with_ids(IdGenerator::sequential(1))
}

/// Builds a layout of `kind` instances with the given ids.
pub fn layout_of(kind: ElementKind, ids: &[&str]) -> Layout {
    let mut layout = Layout::new();
    for (index, id) in ids.iter().enumerate() {
        layout
            .add_element(index, kind.definition().construct(id))
            .unwrap_or_else(|e| panic!("Failed to add {id}: {e}"));
    }
    layout
}

pub fn ids(layout: &Layout) -> Vec<&str> {
    layout.elements().iter().map(|e| e.id()).collect()
}

pub fn kinds(layout: &Layout) -> Vec<ElementKind> {
    layout.elements().iter().map(|e| e.kind()).collect()
}

pub fn top(id: &str) -> DropTarget {
    DropTarget::half(id, DropHalf::Top)
}

pub fn bottom(id: &str) -> DropTarget {
    DropTarget::half(id, DropHalf::Bottom)
}

/// Drags a palette button and drops it over `targets`.
pub fn drop_new(
    engine: &mut DragEngine,
    layout: &mut Layout,
    kind: ElementKind,
    targets: &[DropTarget],
) -> DropOutcome {
    engine
        .start_drag(layout, DragSource::Palette(kind))
        .unwrap_or_else(|e| panic!("Failed to start drag of {kind}: {e}"));
    engine
        .end_drag(layout, targets)
        .unwrap_or_else(|e| panic!("Failed to drop {kind}: {e}"))
}

/// Drags a placed element and drops it over `targets`.
pub fn drop_placed(
    engine: &mut DragEngine,
    layout: &mut Layout,
    id: &str,
    targets: &[DropTarget],
) -> DropOutcome {
    engine
        .start_drag(layout, DragSource::Element(id.to_string()))
        .unwrap_or_else(|e| panic!("Failed to start drag of {id}: {e}"));
    engine
        .end_drag(layout, targets)
        .unwrap_or_else(|e| panic!("Failed to drop {id}: {e}"))
}

pub fn load(json: &str) -> Layout {
    let snapshot = FormSnapshot::from_json(json)
        .unwrap_or_else(|e| panic!("Failed to parse snapshot: {e}\n{json}"));
    Layout::from_snapshot(snapshot).unwrap_or_else(|e| panic!("Failed to load snapshot: {e}"))
}

pub fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(id, value)| ((*id).to_string(), (*value).to_string()))
        .collect()
}
