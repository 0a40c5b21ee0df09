//! Backend commands queued from UI to backend worker.

use shared::domain::{ProfileRecord, SubmissionId};

pub enum BackendCommand {
    SubmitProfile {
        submission: SubmissionId,
        profile: ProfileRecord,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SubmitProfile { .. } => "submit_profile",
        }
    }
}
