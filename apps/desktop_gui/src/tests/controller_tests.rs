use crossbeam_channel::bounded;
use mock_server::{evaluate_submission, PhoneDigitPolicy, MISSING_FIRST_NAME};
use shared::{
    domain::{ProfileField, ProfileRecord, SubmissionId},
    protocol::SubmitResponse,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorCategory, UiErrorContext, UiEvent},
    orchestration::submit_form,
    reducer::{FormController, STATUS_READY, STATUS_REJECTED, STATUS_SAVING},
};

fn lee_without_first_name() -> ProfileRecord {
    ProfileRecord {
        first_name: String::new(),
        last_name: "Lee".to_string(),
        phone_number: "99882233".to_string(),
        receive_newsletter: false,
    }
}

/// Runs the queued command through the validator the way the backend
/// worker would and feeds the result back into the controller.
fn resolve_next(form: &mut FormController, cmd: BackendCommand) {
    let BackendCommand::SubmitProfile {
        submission,
        profile,
    } = cmd;
    let response = evaluate_submission(profile, PhoneDigitPolicy::AllNonDigits);
    form.apply(UiEvent::SubmitResolved {
        submission,
        response,
    });
}

#[test]
fn starts_with_empty_values_and_no_errors() {
    let form = FormController::default();
    assert_eq!(form.values(), &ProfileRecord::default());
    assert!(form.errors().is_none());
    assert!(!form.is_pending());
    assert_eq!(form.status(), STATUS_READY);
}

#[test]
fn edits_replace_single_fields() {
    let mut form = FormController::default();
    form.edit_text(ProfileField::FirstName, "Ann");
    form.edit_text(ProfileField::PhoneNumber, "9988");
    form.edit_checkbox(true);

    assert_eq!(form.values().first_name, "Ann");
    assert_eq!(form.values().last_name, "");
    assert_eq!(form.values().phone_number, "9988");
    assert!(form.values().receive_newsletter);
}

#[test]
fn rejected_submit_sets_errors_and_keeps_values() {
    let mut form = FormController::new(lee_without_first_name());
    let cmd = form.begin_submit().expect("submit command");
    assert!(form.is_pending());
    assert_eq!(form.status(), STATUS_SAVING);

    resolve_next(&mut form, cmd);

    assert!(!form.is_pending());
    assert_eq!(form.values(), &lee_without_first_name());
    let errors = form.errors().expect("errors");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.message(ProfileField::FirstName), Some(MISSING_FIRST_NAME));
    assert_eq!(form.status(), STATUS_REJECTED);
}

#[test]
fn stale_errors_survive_edits_until_next_submit() {
    let mut form = FormController::new(lee_without_first_name());
    let cmd = form.begin_submit().expect("first submit");
    resolve_next(&mut form, cmd);

    form.edit_text(ProfileField::FirstName, "Ann");
    assert_eq!(
        form.error_message(ProfileField::FirstName),
        Some(MISSING_FIRST_NAME)
    );

    let cmd = form.begin_submit().expect("second submit");
    assert!(form.errors().is_none(), "errors are cleared when submit starts");

    resolve_next(&mut form, cmd);
    assert!(form.errors().is_none());
    assert_eq!(
        form.values(),
        &ProfileRecord {
            first_name: "Ann".to_string(),
            ..lee_without_first_name()
        }
    );
    assert!(form.status().starts_with("Saved at "));
}

#[test]
fn second_submit_is_ignored_while_pending() {
    let mut form = FormController::new(lee_without_first_name());
    assert!(form.begin_submit().is_some());
    assert!(form.begin_submit().is_none());
}

#[test]
fn responses_for_other_submissions_are_dropped() {
    let mut form = FormController::new(lee_without_first_name());
    let _cmd = form.begin_submit().expect("submit");

    let mut replacement = lee_without_first_name();
    replacement.first_name = "Mallory".to_string();
    form.apply(UiEvent::SubmitResolved {
        submission: SubmissionId(42),
        response: SubmitResponse::Profile(replacement),
    });

    assert!(form.is_pending());
    assert_eq!(form.values().first_name, "");
}

#[test]
fn info_does_not_override_saving_status() {
    let mut form = FormController::default();
    form.apply(UiEvent::Info("Ready".to_string()));
    assert_eq!(form.status(), STATUS_READY);

    let _cmd = form.begin_submit().expect("submit");
    form.apply(UiEvent::Info("Ready".to_string()));
    assert_eq!(form.status(), STATUS_SAVING);
}

#[test]
fn submit_form_queues_command_on_channel() {
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
    let mut form = FormController::new(lee_without_first_name());

    assert!(submit_form(&mut form, &cmd_tx));
    let BackendCommand::SubmitProfile {
        submission,
        profile,
    } = cmd_rx.try_recv().expect("queued command");
    assert_eq!(submission, SubmissionId(1));
    assert_eq!(profile, lee_without_first_name());
}

#[test]
fn disconnected_queue_clears_pending_and_raises_banner() {
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
    drop(cmd_rx);
    let mut form = FormController::default();

    assert!(!submit_form(&mut form, &cmd_tx));
    assert!(!form.is_pending());
    let banner = form.banner().expect("banner");
    assert_eq!(banner.category(), UiErrorCategory::Transport);
    assert_eq!(banner.context(), UiErrorContext::Submit);

    form.dismiss_banner();
    assert!(form.banner().is_none());
}

#[test]
fn backend_startup_error_is_surfaced() {
    let mut form = FormController::default();
    form.apply(UiEvent::Error(UiError::from_message(
        UiErrorContext::BackendStartup,
        "backend worker startup failure: failed to build runtime: no threads",
    )));
    let banner = form.banner().expect("banner");
    assert_eq!(banner.category(), UiErrorCategory::Transport);
    assert!(banner.banner_text().starts_with("Transport error: backend worker"));
}

#[test]
fn field_wording_in_infrastructure_errors_is_unexpected() {
    let err = UiError::from_message(UiErrorContext::Submit, "missing response body");
    assert_eq!(err.category(), UiErrorCategory::Unknown);
    assert!(err.banner_text().starts_with("Unexpected error: missing"));
}
