use std::{process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use mock_server::{load_settings, MockProfileServer, PhoneDigitPolicy, ProfileSubmitter};
use shared::{domain::ProfileRecord, protocol::SubmitResponse};
use tracing_subscriber::EnvFilter;

const EXIT_REJECTED: u8 = 2;

/// Submits one profile to the mock handler and prints the response as JSON.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    phone_number: String,
    #[arg(long)]
    receive_newsletter: bool,
    #[arg(long)]
    latency_ms: Option<u64>,
    #[arg(long)]
    phone_digit_policy: Option<PhoneDigitPolicy>,
}

impl Args {
    fn profile(&self) -> ProfileRecord {
        ProfileRecord {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            receive_newsletter: self.receive_newsletter,
        }
    }
}

fn render_response(response: &SubmitResponse) -> Result<(String, u8)> {
    let json = serde_json::to_string_pretty(response).context("failed to encode response")?;
    let status = if response.is_accepted() { 0 } else { EXIT_REJECTED };
    Ok((json, status))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings().context("failed to load profile form settings")?;
    if let Some(ms) = args.latency_ms {
        settings.mock_latency = Duration::from_millis(ms);
    }
    if let Some(policy) = args.phone_digit_policy {
        settings.phone_digit_policy = policy;
    }

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    for rejected in &settings.rejected {
        tracing::warn!("ignored setting: {rejected}");
    }

    let server = MockProfileServer::from_settings(&settings);
    tracing::debug!(
        policy = %server.policy(),
        latency_ms = server.latency().as_millis() as u64,
        "submitting profile"
    );
    let response = server.submit(args.profile()).await;

    let (json, status) = render_response(&response)?;
    println!("{json}");
    Ok(ExitCode::from(status))
}
