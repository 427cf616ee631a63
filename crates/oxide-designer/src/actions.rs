//! Create, save, publish and submit, wired to the repository and notifier.
//!
//! Each action reports its outcome to the user through the notifier and
//! returns it to the caller. Failures never touch the layout.

use tracing::{info, warn};

use crate::layout::Layout;
use crate::notify::{Notification, Notifier};
use crate::repository::{FormId, FormRepository, NewForm, RepositoryError};
use crate::submission::FormSubmission;

/// Creates a form and returns its id.
pub async fn create_form(
    repo: &dyn FormRepository,
    notifier: &dyn Notifier,
    form: NewForm,
) -> Result<FormId, RepositoryError> {
    match repo.create_form(form).await {
        Ok(id) => {
            info!(%id, "form created");
            notifier.notify(Notification::success("Form created successfully"));
            Ok(id)
        }
        Err(e) => {
            warn!(error = %e, "form creation failed");
            notifier.notify(Notification::error(
                "Something went wrong, please try again later",
            ));
            Err(e)
        }
    }
}

/// Stores the current layout as the content of form `id`.
pub async fn save_form(
    repo: &dyn FormRepository,
    notifier: &dyn Notifier,
    id: FormId,
    layout: &Layout,
) -> Result<(), RepositoryError> {
    let result = match layout.snapshot() {
        Ok(snapshot) => repo.update_content(id, snapshot).await,
        Err(e) => Err(RepositoryError::InvalidForm(e.to_string())),
    };

    match &result {
        Ok(()) => {
            info!(%id, elements = layout.len(), "form saved");
            notifier.notify(Notification::success("Your form has been saved"));
        }
        Err(e) => {
            warn!(%id, error = %e, "form save failed");
            notifier.notify(Notification::error("Something went wrong"));
        }
    }
    result
}

/// Publishes form `id` and returns its share url.
pub async fn publish_form(
    repo: &dyn FormRepository,
    notifier: &dyn Notifier,
    id: FormId,
) -> Result<String, RepositoryError> {
    match repo.publish(id).await {
        Ok(share_url) => {
            info!(%id, %share_url, "form published");
            notifier.notify(Notification::success(
                "Your form is now available to the public.",
            ));
            Ok(share_url)
        }
        Err(e) => {
            warn!(%id, error = %e, "form publish failed");
            notifier.notify(Notification::error("Something went wrong"));
            Err(e)
        }
    }
}

/// Validates a live form and records it when every field accepts its value.
///
/// Returns `Ok(false)` when validation rejects the submission; the failing
/// fields are then marked on `submission`.
pub async fn submit_form(
    repo: &dyn FormRepository,
    notifier: &dyn Notifier,
    share_url: &str,
    submission: &mut FormSubmission<'_>,
) -> Result<bool, RepositoryError> {
    if !submission.validate() {
        info!(failed = submission.errors().len(), "submission rejected");
        notifier.notify(Notification::error("Please check the form for errors"));
        return Ok(false);
    }

    let result = match submission.content_json() {
        Ok(content) => repo.submit(share_url, content).await,
        Err(e) => Err(RepositoryError::InvalidForm(e.to_string())),
    };

    match result {
        Ok(()) => {
            info!(%share_url, "submission recorded");
            notifier.notify(Notification::success(
                "Thank you for submitting the form, you can close this page now.",
            ));
            Ok(true)
        }
        Err(e) => {
            warn!(%share_url, error = %e, "submission failed");
            notifier.notify(Notification::error("Something went wrong"));
            Err(e)
        }
    }
}
