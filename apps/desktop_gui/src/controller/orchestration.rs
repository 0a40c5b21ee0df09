//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext},
    reducer::FormController,
};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();
    tracing::debug!(command = cmd_name, "queueing ui->backend command");

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err(UiError::from_message(
                UiErrorContext::Submit,
                "UI command queue is full; please retry",
            ))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err(UiError::from_message(
                UiErrorContext::Submit,
                "Backend command processor disconnected (possible startup/runtime failure); restart the app",
            ))
        }
    }
}

/// Starts a submission if none is pending and hands it to the backend.
/// Returns whether a command was queued.
pub fn submit_form(form: &mut FormController, cmd_tx: &Sender<BackendCommand>) -> bool {
    let Some(cmd) = form.begin_submit() else {
        return false;
    };

    match dispatch_backend_command(cmd_tx, cmd) {
        Ok(()) => true,
        Err(err) => {
            form.submit_not_queued(err);
            false
        }
    }
}
