use std::{sync::Arc, time::Duration};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use mock_server::{load_settings, MockProfileServer, PhoneDigitPolicy};
use shared::domain::ProfileRecord;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, reducer::FormController};
use crate::ui::ProfileFormApp;

#[derive(Parser, Debug)]
#[command(about = "Profile edit form backed by a mock submit handler")]
struct Args {
    /// Simulated server latency in milliseconds.
    #[arg(long)]
    latency_ms: Option<u64>,
    /// `all_non_digits` or `first_non_digit`.
    #[arg(long)]
    phone_digit_policy: Option<PhoneDigitPolicy>,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    phone_number: String,
    #[arg(long)]
    receive_newsletter: bool,
}

impl Args {
    fn initial_profile(&self) -> ProfileRecord {
        ProfileRecord {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            receive_newsletter: self.receive_newsletter,
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings().context("failed to load profile form settings")?;
    if let Some(ms) = args.latency_ms {
        settings.mock_latency = Duration::from_millis(ms);
    }
    if let Some(policy) = args.phone_digit_policy {
        settings.phone_digit_policy = policy;
    }

    init_tracing(&settings.log_filter);
    for rejected in &settings.rejected {
        tracing::warn!("ignored setting: {rejected}");
    }
    tracing::info!(
        latency_ms = settings.mock_latency.as_millis() as u64,
        policy = %settings.phone_digit_policy,
        "starting profile form"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let submitter = Arc::new(MockProfileServer::from_settings(&settings));
    backend_bridge::runtime::launch(cmd_rx, ui_tx, submitter);

    let form = FormController::new(args.initial_profile());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Edit profile")
            .with_inner_size([520.0, 600.0])
            .with_min_inner_size([400.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Profile form",
        options,
        Box::new(|_cc| Ok(Box::new(ProfileFormApp::new(cmd_tx, ui_rx, form)))),
    )
    .map_err(|err| anyhow::anyhow!("profile form window failed: {err}"))
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;

#[cfg(test)]
#[path = "tests/bridge_tests.rs"]
mod bridge_tests;
