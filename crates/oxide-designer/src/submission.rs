//! Submission-time validation.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ValidationErrors};
use crate::layout::Layout;

/// Result of validating a whole submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    errors: ValidationErrors,
}

impl SubmissionReport {
    /// Returns whether every element accepted its value.
    pub fn is_accepted(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the failures, in layout order.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Returns the ids that failed, in layout order.
    pub fn failed_ids(&self) -> Vec<&str> {
        self.errors.ids()
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

/// Validates `values` against every element of `layout`, in order.
///
/// An element without a value is checked against `""`. All failures are
/// collected; the layout is never touched.
pub fn validate_submission(layout: &Layout, values: &HashMap<String, String>) -> SubmissionReport {
    let mut errors = ValidationErrors::new();
    for element in layout.elements() {
        let value = values.get(element.id()).map_or("", String::as_str);
        if let Err(message) = element.check(value) {
            errors.add(element.id(), message);
        }
    }
    debug!(
        elements = layout.len(),
        failed = errors.len(),
        "submission validated"
    );
    SubmissionReport { errors }
}

/// State of a live form being filled in.
#[derive(Debug, Clone)]
pub struct FormSubmission<'a> {
    layout: &'a Layout,
    values: HashMap<String, String>,
    errors: ValidationErrors,
}

impl<'a> FormSubmission<'a> {
    /// Starts an empty submission for `layout`.
    pub fn new(layout: &'a Layout) -> Self {
        Self {
            layout,
            values: HashMap::new(),
            errors: ValidationErrors::new(),
        }
    }

    /// Records the value of one field and re-checks that field alone.
    ///
    /// Ids that name no element are ignored.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) {
        let Some(element) = self.layout.get(id) else {
            return;
        };
        let value = value.into();

        self.errors.clear(id);
        if let Err(message) = element.check(&value) {
            self.errors.add(id, message);
        }
        self.values.insert(id.to_string(), value);
    }

    /// Validates every field, replacing the recorded errors.
    ///
    /// Returns whether the submission is accepted.
    pub fn validate(&mut self) -> bool {
        let report = validate_submission(self.layout, &self.values);
        let accepted = report.is_accepted();
        self.errors = report.into_errors();
        accepted
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_invalid(&self, id: &str) -> bool {
        self.errors.contains(id)
    }

    /// Serializes the collected values as a JSON object keyed by element id.
    ///
    /// Keys are sorted so the same values always produce the same text.
    pub fn content_json(&self) -> Result<String> {
        let content: BTreeMap<&str, Value> = self
            .values
            .iter()
            .map(|(id, value)| (id.as_str(), Value::String(value.clone())))
            .collect();
        Ok(serde_json::to_string(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{
        CheckboxAttributes, ElementInstance, ElementKind, ExtraAttributes, NumberAttributes,
        TextAttributes,
    };

    fn survey() -> Layout {
        let mut layout = Layout::new();
        layout
            .add_element(0, ElementKind::TitleField.definition().construct("t"))
            .unwrap();
        layout
            .add_element(
                1,
                ElementInstance::new(
                    "name",
                    ExtraAttributes::Text(TextAttributes {
                        required: true,
                        ..TextAttributes::default()
                    }),
                ),
            )
            .unwrap();
        layout
            .add_element(
                2,
                ElementInstance::new(
                    "age",
                    ExtraAttributes::Number(NumberAttributes {
                        min: Some(0.0),
                        max: Some(130.0),
                        ..NumberAttributes::default()
                    }),
                ),
            )
            .unwrap();
        layout
            .add_element(
                3,
                ElementInstance::new(
                    "terms",
                    ExtraAttributes::Checkbox(CheckboxAttributes {
                        required: true,
                        ..CheckboxAttributes::default()
                    }),
                ),
            )
            .unwrap();
        layout
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_empty_submission_collects_every_failure_in_order() {
        let layout = survey();
        let report = validate_submission(&layout, &HashMap::new());
        assert!(!report.is_accepted());
        assert_eq!(report.failed_ids(), vec!["name", "terms"]);
    }

    #[test]
    fn test_valid_submission_is_accepted() {
        let layout = survey();
        let report = validate_submission(
            &layout,
            &values(&[("name", "Ada"), ("age", "36"), ("terms", "true")]),
        );
        assert!(report.is_accepted());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn test_kind_checks_apply_to_optional_fields() {
        let layout = survey();
        let report = validate_submission(
            &layout,
            &values(&[("name", "Ada"), ("age", "200"), ("terms", "true")]),
        );
        assert_eq!(report.failed_ids(), vec!["age"]);
    }

    #[test]
    fn test_validation_does_not_mutate_layout() {
        let layout = survey();
        let before = layout.clone();
        validate_submission(&layout, &values(&[("name", "")]));
        assert_eq!(layout, before);
    }

    #[test]
    fn test_set_value_rechecks_one_field() {
        let layout = survey();
        let mut submission = FormSubmission::new(&layout);

        submission.set_value("name", "");
        assert!(submission.is_invalid("name"));
        assert!(!submission.is_invalid("terms"));

        submission.set_value("name", "Ada");
        assert!(!submission.is_invalid("name"));

        submission.set_value("ghost", "boo");
        assert!(submission.values().get("ghost").is_none());
    }

    #[test]
    fn test_validate_and_content_json() {
        let layout = survey();
        let mut submission = FormSubmission::new(&layout);
        submission.set_value("name", "Ada");
        assert!(!submission.validate());
        assert_eq!(submission.errors().ids(), vec!["terms"]);

        submission.set_value("terms", "true");
        assert!(submission.validate());
        assert_eq!(
            submission.content_json().unwrap(),
            r#"{"name":"Ada","terms":"true"}"#
        );
    }
}
