//! Form state and its transitions. Only the UI thread owns a `FormController`.

use chrono::Local;
use shared::{
    domain::{ErrorSet, ProfileField, ProfileRecord, SubmissionId},
    protocol::SubmitResponse,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

pub const STATUS_READY: &str = "Ready";
pub const STATUS_SAVING: &str = "Saving…";
pub const STATUS_REJECTED: &str = "Please fix the highlighted fields";

#[derive(Debug, Clone)]
pub struct FormController {
    values: ProfileRecord,
    errors: Option<ErrorSet>,
    pending: Option<SubmissionId>,
    last_submission: SubmissionId,
    status: String,
    banner: Option<UiError>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(ProfileRecord::default())
    }
}

impl FormController {
    pub fn new(values: ProfileRecord) -> Self {
        Self {
            values,
            errors: None,
            pending: None,
            last_submission: SubmissionId(0),
            status: STATUS_READY.to_string(),
            banner: None,
        }
    }

    pub fn values(&self) -> &ProfileRecord {
        &self.values
    }

    pub fn errors(&self) -> Option<&ErrorSet> {
        self.errors.as_ref()
    }

    pub fn error_message(&self, field: ProfileField) -> Option<&str> {
        self.errors.as_ref().and_then(|errors| errors.message(field))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn banner(&self) -> Option<&UiError> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Stale errors stay visible until the next submit.
    pub fn edit_text(&mut self, field: ProfileField, value: impl Into<String>) {
        self.values.set_text(field, value);
    }

    pub fn edit_checkbox(&mut self, checked: bool) {
        self.values.receive_newsletter = checked;
    }

    /// Clears errors and produces the command for the backend, or `None` when
    /// a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<BackendCommand> {
        if let Some(pending) = self.pending {
            tracing::debug!(%pending, "submit ignored; previous submission still pending");
            return None;
        }

        self.errors = None;
        self.banner = None;
        let submission = self.last_submission.next();
        self.last_submission = submission;
        self.pending = Some(submission);
        self.status = STATUS_SAVING.to_string();

        tracing::info!(%submission, profile = ?self.values, "submitting profile");
        Some(BackendCommand::SubmitProfile {
            submission,
            profile: self.values.clone(),
        })
    }

    pub fn submit_not_queued(&mut self, err: UiError) {
        self.pending = None;
        self.report(err);
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                if self.pending.is_none() {
                    self.status = message;
                }
            }
            UiEvent::Error(err) => {
                self.pending = None;
                self.report(err);
            }
            UiEvent::SubmitResolved {
                submission,
                response,
            } => self.resolve(submission, response),
        }
    }

    fn resolve(&mut self, submission: SubmissionId, response: SubmitResponse) {
        if self.pending != Some(submission) {
            tracing::debug!(%submission, pending = ?self.pending, "dropping stale submit response");
            return;
        }
        self.pending = None;

        match response {
            SubmitResponse::Errors(errors) => {
                tracing::info!(%submission, count = errors.len(), "profile rejected");
                self.errors = Some(errors);
                self.status = STATUS_REJECTED.to_string();
            }
            SubmitResponse::Profile(profile) => {
                tracing::info!(%submission, ?profile, "profile saved");
                self.values = profile;
                self.status = format!("Saved at {}", Local::now().format("%H:%M:%S"));
            }
        }
    }

    fn report(&mut self, err: UiError) {
        tracing::warn!(context = ?err.context(), "{}", err.message());
        self.status = err.message().to_string();
        self.banner = Some(err);
    }
}
