//! Error types for the designer core.

use thiserror::Error;

/// Structural errors raised by the layout store and the reorder engine.
///
/// These indicate a programming error upstream (a duplicate id, a kind that
/// is not part of the registry) and stop the operation before the layout is
/// touched. Stale references and rejected submissions are not errors.
#[derive(Debug, Error)]
pub enum DesignerError {
    /// A kind tag that is not part of the registry.
    #[error("unknown element kind: {0}")]
    UnknownKind(String),

    /// An instance with this id is already placed in the layout.
    #[error("duplicate element id: {0}")]
    DuplicateId(String),

    /// An update tried to change the kind of a placed instance.
    #[error("element {id} is a {expected}, got attributes for {found}")]
    KindMismatch {
        id: String,
        expected: String,
        found: String,
    },

    /// Attributes do not satisfy the kind's schema.
    #[error("invalid attributes for {kind}: {message}")]
    InvalidAttributes { kind: String, message: String },

    /// A drag gesture was started while another one is still active.
    #[error("a drag gesture is already in progress")]
    DragInProgress,

    /// A drop or cancel arrived without a matching drag start.
    #[error("no drag gesture in progress")]
    NoActiveDrag,

    /// Snapshot (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Per-instance validation failures, in layout order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Failed instance ids paired with their messages.
    pub errors: Vec<(String, String)>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records a failure for an instance.
    pub fn add(&mut self, id: &str, message: impl Into<String>) {
        self.errors.push((id.to_string(), message.into()));
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of failed entries.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the message recorded for an instance.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(failed, _)| failed == id)
            .map(|(_, message)| message.as_str())
    }

    /// Returns whether the instance failed validation.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Returns the failed ids in order.
    pub fn ids(&self) -> Vec<&str> {
        self.errors.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Drops the entry recorded for an instance.
    pub fn clear(&mut self, id: &str) {
        self.errors.retain(|(failed, _)| failed != id);
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (id, message) in &self.errors {
            writeln!(f, "{id}: {message}")?;
        }
        Ok(())
    }
}

/// Result type alias for designer operations.
pub type Result<T> = std::result::Result<T, DesignerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_order() {
        let mut errors = ValidationErrors::new();
        errors.add("b", "This field is required.");
        errors.add("a", "Enter a valid number.");

        assert_eq!(errors.ids(), vec!["b", "a"]);
        assert_eq!(errors.get("a"), Some("Enter a valid number."));
        assert!(!errors.contains("c"));

        errors.clear("b");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.to_string(), "a: Enter a valid number.\n");
    }
}
