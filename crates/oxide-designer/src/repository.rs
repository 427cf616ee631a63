//! Form persistence collaborator.
//!
//! The designer core never awaits storage itself; the actions in
//! [`crate::actions`] call a [`FormRepository`] at request boundaries.
//! [`MemoryRepository`] keeps everything in process memory and is meant for
//! tests and local replay.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use rand::RngExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::error::ValidationErrors;
use crate::layout::FormSnapshot;
use crate::validation::{MaxLengthValidator, MinLengthValidator, Validator};

/// A boxed future for async repository operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

const NAME_MIN: usize = 4;
const NAME_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 1000;

/// Identifier of a stored form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(pub u64);

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised by a form repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("form {0} not found")]
    FormNotFound(FormId),

    /// Published forms are read-only.
    #[error("form {0} is already published")]
    AlreadyPublished(FormId),

    #[error("no published form at {0}")]
    NotPublished(String),

    #[error("invalid form: {0}")]
    InvalidForm(String),

    /// The backing store could not be reached.
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Data needed to create a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Checks the name and description, keyed by field name.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(message) = MinLengthValidator::new(NAME_MIN)
            .validate(&self.name)
            .and_then(|()| MaxLengthValidator::new(NAME_MAX).validate(&self.name))
        {
            errors.add("name", message);
        }
        if let Err(message) = MaxLengthValidator::new(DESCRIPTION_MAX).validate(&self.description)
        {
            errors.add("description", message);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A form as the repository stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredForm {
    pub id: FormId,
    pub name: String,
    pub description: String,
    pub content: FormSnapshot,
    pub published: bool,
    /// Opaque token the public form is reachable under.
    pub share_url: String,
    pub visits: u64,
    /// Accepted submissions, each a JSON object keyed by element id.
    pub submissions: Vec<String>,
}

/// Storage for forms and their submissions.
pub trait FormRepository: Send + Sync {
    /// Creates an empty, unpublished form.
    fn create_form<'a>(&'a self, form: NewForm) -> BoxFuture<'a, Result<FormId, RepositoryError>>;

    /// Replaces the content of an unpublished form.
    fn update_content<'a>(
        &'a self,
        id: FormId,
        content: FormSnapshot,
    ) -> BoxFuture<'a, Result<(), RepositoryError>>;

    /// Publishes a form and returns its share url.
    fn publish<'a>(&'a self, id: FormId) -> BoxFuture<'a, Result<String, RepositoryError>>;

    /// Records a submission against a published form.
    fn submit<'a>(
        &'a self,
        share_url: &'a str,
        content: String,
    ) -> BoxFuture<'a, Result<(), RepositoryError>>;

    /// Loads a form.
    fn form<'a>(&'a self, id: FormId) -> BoxFuture<'a, Result<StoredForm, RepositoryError>>;

    /// Loads the content of a published form, counting the visit.
    fn published_content<'a>(
        &'a self,
        share_url: &'a str,
    ) -> BoxFuture<'a, Result<FormSnapshot, RepositoryError>>;
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    forms: HashMap<FormId, StoredForm>,
}

impl MemoryState {
    fn by_share_url(&mut self, share_url: &str) -> Result<&mut StoredForm, RepositoryError> {
        self.forms
            .values_mut()
            .find(|form| form.published && form.share_url == share_url)
            .ok_or_else(|| RepositoryError::NotPublished(share_url.to_string()))
    }
}

/// Process-local repository.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<MemoryState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Generates an unguessable share token.
fn generate_share_url() -> String {
    let mut rng = rand::rng();
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

impl FormRepository for MemoryRepository {
    fn create_form<'a>(&'a self, form: NewForm) -> BoxFuture<'a, Result<FormId, RepositoryError>> {
        Box::pin(async move {
            form.validate()
                .map_err(|errors| RepositoryError::InvalidForm(errors.to_string().trim().to_string()))?;

            let mut state = self.state.write().await;
            state.next_id += 1;
            let id = FormId(state.next_id);
            state.forms.insert(
                id,
                StoredForm {
                    id,
                    name: form.name,
                    description: form.description,
                    content: FormSnapshot::default(),
                    published: false,
                    share_url: generate_share_url(),
                    visits: 0,
                    submissions: Vec::new(),
                },
            );
            Ok(id)
        })
    }

    fn update_content<'a>(
        &'a self,
        id: FormId,
        content: FormSnapshot,
    ) -> BoxFuture<'a, Result<(), RepositoryError>> {
        Box::pin(async move {
            let mut state = self.state.write().await;
            let form = state
                .forms
                .get_mut(&id)
                .ok_or(RepositoryError::FormNotFound(id))?;
            if form.published {
                return Err(RepositoryError::AlreadyPublished(id));
            }
            form.content = content;
            Ok(())
        })
    }

    fn publish<'a>(&'a self, id: FormId) -> BoxFuture<'a, Result<String, RepositoryError>> {
        Box::pin(async move {
            let mut state = self.state.write().await;
            let form = state
                .forms
                .get_mut(&id)
                .ok_or(RepositoryError::FormNotFound(id))?;
            if form.published {
                return Err(RepositoryError::AlreadyPublished(id));
            }
            form.published = true;
            Ok(form.share_url.clone())
        })
    }

    fn submit<'a>(
        &'a self,
        share_url: &'a str,
        content: String,
    ) -> BoxFuture<'a, Result<(), RepositoryError>> {
        Box::pin(async move {
            let mut state = self.state.write().await;
            state.by_share_url(share_url)?.submissions.push(content);
            Ok(())
        })
    }

    fn form<'a>(&'a self, id: FormId) -> BoxFuture<'a, Result<StoredForm, RepositoryError>> {
        Box::pin(async move {
            let state = self.state.read().await;
            state
                .forms
                .get(&id)
                .cloned()
                .ok_or(RepositoryError::FormNotFound(id))
        })
    }

    fn published_content<'a>(
        &'a self,
        share_url: &'a str,
    ) -> BoxFuture<'a, Result<FormSnapshot, RepositoryError>> {
        Box::pin(async move {
            let mut state = self.state.write().await;
            let form = state.by_share_url(share_url)?;
            form.visits += 1;
            Ok(form.content.clone())
        })
    }
}
