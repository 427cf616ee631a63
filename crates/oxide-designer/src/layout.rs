//! The ordered collection of placed elements and the current selection.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{DesignerError, Result};
use crate::fields::{ElementInstance, ElementKind, ExtraAttributes};

/// Ordered element instances plus the selected id.
///
/// Ids are pairwise distinct and the selection, when set, always names a
/// present element. Every mutation goes through the methods below, each of
/// which either completes or leaves the layout untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    elements: Vec<ElementInstance>,
    selected: Option<String>,
}

impl Layout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an instance at `index`, clamped into `0..=len`.
    pub fn add_element(&mut self, index: usize, instance: ElementInstance) -> Result<()> {
        if self.index_of(instance.id()).is_some() {
            return Err(DesignerError::DuplicateId(instance.id().to_string()));
        }
        instance.attributes().check()?;

        let index = index.min(self.elements.len());
        debug!(id = instance.id(), kind = %instance.kind(), index, "add element");
        self.elements.insert(index, instance);
        Ok(())
    }

    /// Removes the instance with `id`, clearing the selection if it pointed
    /// at it. A stale id returns `None`.
    pub fn remove_element(&mut self, id: &str) -> Option<ElementInstance> {
        let index = self.index_of(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        debug!(id, index, "remove element");
        Some(self.elements.remove(index))
    }

    /// Replaces the attributes of the instance with `id` in place.
    ///
    /// Returns `Ok(false)` for a stale id. The kind of a placed instance
    /// never changes.
    pub fn update_element(&mut self, id: &str, instance: ElementInstance) -> Result<bool> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };

        let current = &self.elements[index];
        if current.kind() != instance.kind() {
            return Err(DesignerError::KindMismatch {
                id: id.to_string(),
                expected: current.kind().to_string(),
                found: instance.kind().to_string(),
            });
        }
        instance.attributes().check()?;

        let replaced = current.with_attributes(instance.attributes().clone());
        debug!(id, index, "update element");
        self.elements[index] = replaced;
        Ok(true)
    }

    /// Selects the instance with `id`, or clears the selection with `None`.
    ///
    /// Ids that are not present are ignored.
    pub fn set_selected(&mut self, id: Option<&str>) {
        match id {
            Some(id) if self.index_of(id).is_some() => self.selected = Some(id.to_string()),
            Some(_) => {}
            None => self.selected = None,
        }
    }

    pub fn elements(&self) -> &[ElementInstance] {
        &self.elements
    }

    pub fn get(&self, id: &str) -> Option<&ElementInstance> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_element(&self) -> Option<&ElementInstance> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns whether an instance with `id` is placed.
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Captures the elements in their persisted shape.
    pub fn snapshot(&self) -> Result<FormSnapshot> {
        let records = self
            .elements
            .iter()
            .map(|element| {
                Ok(ElementRecord {
                    id: element.id().to_string(),
                    kind: element.kind(),
                    extra_attributes: element.attributes().to_value()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FormSnapshot(records))
    }

    /// Rebuilds a layout from a snapshot, re-checking every schema and id.
    pub fn from_snapshot(snapshot: FormSnapshot) -> Result<Self> {
        let mut layout = Self::new();
        for record in snapshot.0 {
            let attributes = ExtraAttributes::from_value(record.kind, record.extra_attributes)?;
            let index = layout.len();
            layout.add_element(index, ElementInstance::new(record.id, attributes))?;
        }
        Ok(layout)
    }
}

/// One persisted element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    pub id: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: ElementKind,
    #[serde(default)]
    pub extra_attributes: Value,
}

/// Persisted form content: a JSON array of element records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot(pub Vec<ElementRecord>);

impl FormSnapshot {
    /// Parses a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the snapshot to JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the snapshot to indented JSON text.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn records(&self) -> &[ElementRecord] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{SpacerAttributes, TextAttributes, TitleAttributes};

    fn construct(kind: ElementKind, id: &str) -> ElementInstance {
        kind.definition().construct(id)
    }

    fn ids(layout: &Layout) -> Vec<&str> {
        layout.elements().iter().map(ElementInstance::id).collect()
    }

    #[test]
    fn test_add_clamps_index() {
        let mut layout = Layout::new();
        layout.add_element(5, construct(ElementKind::TitleField, "a")).unwrap();
        layout.add_element(0, construct(ElementKind::TextField, "b")).unwrap();
        layout.add_element(usize::MAX, construct(ElementKind::DateField, "c")).unwrap();
        assert_eq!(ids(&layout), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut layout = Layout::new();
        layout.add_element(0, construct(ElementKind::TitleField, "a")).unwrap();

        let err = layout
            .add_element(0, construct(ElementKind::TextField, "a"))
            .unwrap_err();
        assert!(matches!(err, DesignerError::DuplicateId(id) if id == "a"));
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.elements()[0].kind(), ElementKind::TitleField);
    }

    #[test]
    fn test_add_rejects_invalid_attributes() {
        let mut layout = Layout::new();
        let instance = ElementInstance::new(
            "s",
            ExtraAttributes::Spacer(SpacerAttributes { height: 2 }),
        );
        assert!(matches!(
            layout.add_element(0, instance),
            Err(DesignerError::InvalidAttributes { .. })
        ));
        assert!(layout.is_empty());
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut layout = Layout::new();
        layout.add_element(0, construct(ElementKind::TitleField, "a")).unwrap();
        layout.add_element(1, construct(ElementKind::TextField, "b")).unwrap();
        layout.set_selected(Some("a"));

        let removed = layout.remove_element("a").unwrap();
        assert_eq!(removed.id(), "a");
        assert_eq!(layout.selected(), None);
        assert_eq!(ids(&layout), vec!["b"]);
    }

    #[test]
    fn test_remove_keeps_other_selection() {
        let mut layout = Layout::new();
        layout.add_element(0, construct(ElementKind::TitleField, "a")).unwrap();
        layout.add_element(1, construct(ElementKind::TextField, "b")).unwrap();
        layout.set_selected(Some("b"));

        layout.remove_element("a");
        assert_eq!(layout.selected(), Some("b"));
    }

    #[test]
    fn test_stale_ids_are_no_ops() {
        let mut layout = Layout::new();
        layout.add_element(0, construct(ElementKind::TitleField, "a")).unwrap();
        let before = layout.clone();

        assert!(layout.remove_element("zzz").is_none());
        assert!(!layout
            .update_element("zzz", construct(ElementKind::TitleField, "zzz"))
            .unwrap());
        layout.set_selected(Some("zzz"));
        assert_eq!(layout, before);
    }

    #[test]
    fn test_update_replaces_attributes_in_place() {
        let mut layout = Layout::new();
        layout.add_element(0, construct(ElementKind::TitleField, "a")).unwrap();
        layout.add_element(1, construct(ElementKind::TextField, "b")).unwrap();

        let updated = ElementInstance::new(
            "b",
            ExtraAttributes::Text(TextAttributes {
                label: "Email".to_string(),
                ..TextAttributes::default()
            }),
        );
        assert!(layout.update_element("b", updated).unwrap());
        assert_eq!(layout.index_of("b"), Some(1));
        assert_eq!(layout.get("b").unwrap().attributes().label(), Some("Email"));
    }

    #[test]
    fn test_update_rejects_kind_change() {
        let mut layout = Layout::new();
        layout.add_element(0, construct(ElementKind::TitleField, "a")).unwrap();

        let err = layout
            .update_element("a", construct(ElementKind::TextField, "a"))
            .unwrap_err();
        assert!(matches!(err, DesignerError::KindMismatch { .. }));

        let err = layout
            .update_element(
                "a",
                ElementInstance::new(
                    "a",
                    ExtraAttributes::Title(TitleAttributes {
                        title: String::new(),
                    }),
                ),
            )
            .unwrap_err();
        assert!(matches!(err, DesignerError::InvalidAttributes { .. }));
        assert_eq!(
            layout.get("a").unwrap().attributes(),
            &ExtraAttributes::Title(TitleAttributes::default())
        );
    }

    #[test]
    fn test_selected_element() {
        let mut layout = Layout::new();
        layout.add_element(0, construct(ElementKind::TextField, "a")).unwrap();
        assert!(layout.selected_element().is_none());

        layout.set_selected(Some("a"));
        assert_eq!(layout.selected_element().map(ElementInstance::id), Some("a"));

        layout.set_selected(None);
        assert!(layout.selected().is_none());
    }

    #[test]
    fn test_snapshot_uses_stored_keys() {
        let mut layout = Layout::new();
        layout.add_element(0, construct(ElementKind::SpacerField, "7")).unwrap();

        let json = layout.snapshot().unwrap().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], "7");
        assert_eq!(value[0]["type"], "SpacerField");
        assert_eq!(value[0]["extraAttributes"]["height"], 20);
    }

    #[test]
    fn test_from_snapshot_accepts_kind_alias_and_missing_attributes() {
        let snapshot = FormSnapshot::from_json(
            r#"[{"id":"1","kind":"TitleField","extraAttributes":{"title":"Survey"}},
                {"id":"2","type":"SeparatorField"}]"#,
        )
        .unwrap();
        let layout = Layout::from_snapshot(snapshot).unwrap();

        assert_eq!(ids(&layout), vec!["1", "2"]);
        assert_eq!(
            layout.get("1").unwrap().attributes(),
            &ExtraAttributes::Title(TitleAttributes {
                title: "Survey".to_string()
            })
        );
    }

    #[test]
    fn test_from_snapshot_keeps_long_helper_text() {
        let records = serde_json::json!([{
            "id": "d",
            "type": "DateField",
            "extraAttributes": {"label": "Start", "helperText": "h".repeat(300)},
        }]);
        let snapshot = FormSnapshot::from_json(&records.to_string()).unwrap();
        let layout = Layout::from_snapshot(snapshot).unwrap();
        assert_eq!(ids(&layout), vec!["d"]);
    }

    #[test]
    fn test_from_snapshot_rejects_bad_content() {
        let unknown = FormSnapshot::from_json(r#"[{"id":"1","type":"RatingField"}]"#);
        assert!(matches!(unknown, Err(DesignerError::Serialization(_))));

        let duplicate = FormSnapshot::from_json(
            r#"[{"id":"1","type":"TitleField"},{"id":"1","type":"TextField"}]"#,
        )
        .unwrap();
        assert!(matches!(
            Layout::from_snapshot(duplicate),
            Err(DesignerError::DuplicateId(_))
        ));
    }
}
