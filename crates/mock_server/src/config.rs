use std::{collections::HashMap, fs, io, path::Path, time::Duration};

use anyhow::Context;

use crate::PhoneDigitPolicy;

pub const SETTINGS_FILE: &str = "profile_form.toml";

#[derive(Debug, Clone)]
pub struct Settings {
    pub mock_latency: Duration,
    pub phone_digit_policy: PhoneDigitPolicy,
    pub log_filter: String,
    /// Values that were present but could not be applied, in the order they
    /// were seen. Callers log these once tracing is up.
    pub rejected: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mock_latency: Duration::from_millis(300),
            phone_digit_policy: PhoneDigitPolicy::AllNonDigits,
            log_filter: "info".into(),
            rejected: Vec::new(),
        }
    }
}

const ENV_OVERRIDES: [(&str, &str); 3] = [
    ("APP__MOCK_LATENCY_MS", "mock_latency_ms"),
    ("APP__PHONE_DIGIT_POLICY", "phone_digit_policy"),
    ("APP__LOG_FILTER", "log_filter"),
];

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the TOML file at `path` (if it exists), then environment
/// overrides looked up through `env`.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(log_filter) = env("RUST_LOG").filter(|v| !v.trim().is_empty()) {
        settings.log_filter = log_filter;
    }

    if let Some(file_cfg) = read_settings_file(path)? {
        let mut keys: Vec<_> = file_cfg.keys().cloned().collect();
        keys.sort();
        for key in keys {
            if let Some(value) = file_cfg.get(&key) {
                settings.apply(&key, value, &path.display().to_string());
            }
        }
    }

    for (name, key) in ENV_OVERRIDES {
        match env(name) {
            Some(value) if value.trim().is_empty() => {
                settings.rejected.push(format!("{name} was set but empty"));
            }
            Some(value) => settings.apply(key, &value, name),
            None => {}
        }
    }

    Ok(settings)
}

impl Settings {
    fn apply(&mut self, key: &str, value: &str, source: &str) {
        match key {
            "mock_latency_ms" => match value.trim().parse::<u64>() {
                Ok(ms) => self.mock_latency = Duration::from_millis(ms),
                Err(err) => self.rejected.push(format!(
                    "{source}: mock_latency_ms '{value}' is not a millisecond count: {err}"
                )),
            },
            "phone_digit_policy" => match value.parse::<PhoneDigitPolicy>() {
                Ok(policy) => self.phone_digit_policy = policy,
                Err(err) => self.rejected.push(format!("{source}: {err}")),
            },
            "log_filter" => self.log_filter = value.trim().to_string(),
            other => self
                .rejected
                .push(format!("{source}: unknown setting '{other}'")),
        }
    }
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<HashMap<String, String>>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| {
                format!("failed to read settings file '{}'", path.display())
            })
        }
    };

    let table = toml::from_str::<HashMap<String, toml::Value>>(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;

    Ok(Some(
        table
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect(),
    ))
}
