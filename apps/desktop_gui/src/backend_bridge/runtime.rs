//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use mock_server::ProfileSubmitter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the backend worker. The thread exits once every command sender has
/// been dropped.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    submitter: Arc<dyn ProfileSubmitter>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            forward_info(&ui_tx, "Ready");
            tracing::debug!("backend worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SubmitProfile {
                        submission,
                        profile,
                    } => {
                        tracing::debug!(%submission, "submitting profile to mock server");
                        let response = submitter.submit(profile).await;
                        deliver_resolution(
                            &ui_tx,
                            UiEvent::SubmitResolved {
                                submission,
                                response,
                            },
                        );
                    }
                }
            }

            tracing::debug!("command queue closed; backend worker stopping");
        });
    })
}

/// Status updates are best-effort; a full queue drops them.
fn forward_info(ui_tx: &Sender<UiEvent>, message: &str) {
    match ui_tx.try_send(UiEvent::Info(message.to_string())) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            tracing::debug!("backend->ui event queue is full; dropping status update");
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event receiver is gone; dropping status update");
        }
    }
}

/// The controller stays pending until it sees the resolution, so this waits
/// for queue space instead of dropping.
fn deliver_resolution(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if ui_tx.send(event).is_err() {
        tracing::debug!("ui event receiver is gone; dropping submit resolution");
    }
}
