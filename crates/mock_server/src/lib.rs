//! In-process stand-in for the profile endpoint: validation rules plus an
//! async submitter that resolves with either the accepted profile or the
//! field errors.

use std::{fmt, str::FromStr, time::Duration};

use async_trait::async_trait;
use shared::{
    domain::{ErrorSet, FieldError, ProfileField, ProfileRecord},
    protocol::SubmitResponse,
};
use tracing::{debug, info};

pub mod config;
pub mod error;

pub use config::{load_settings, Settings};
pub use error::UnknownPhoneDigitPolicy;

pub const REQUIRED_PHONE_DIGITS: usize = 8;

pub const MISSING_FIRST_NAME: &str = "Missing first name!";
pub const MISSING_LAST_NAME: &str = "Missing last name!";
pub const MISSING_PHONE_NUMBER: &str = "Missing phone number!";
pub const PHONE_NUMBER_LENGTH: &str = "Phone number must be 8 digits";

/// How non-digit characters are removed from a phone number before the
/// digits are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhoneDigitPolicy {
    /// Every character outside `0-9` is dropped.
    #[default]
    AllNonDigits,
    /// Only the first UTF-16 code unit outside `0-9` is dropped and the rest
    /// are counted as UTF-16 code units, so later separators (and the second
    /// half of a surrogate pair) still count towards the length.
    FirstNonDigit,
}

impl PhoneDigitPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            PhoneDigitPolicy::AllNonDigits => "all_non_digits",
            PhoneDigitPolicy::FirstNonDigit => "first_non_digit",
        }
    }

    pub fn digit_count(self, phone_number: &str) -> usize {
        match self {
            PhoneDigitPolicy::AllNonDigits => phone_number
                .chars()
                .filter(|c| c.is_ascii_digit())
                .count(),
            PhoneDigitPolicy::FirstNonDigit => {
                let units = phone_number.encode_utf16().count();
                let has_non_digit = phone_number
                    .encode_utf16()
                    .any(|unit| !(u16::from(b'0')..=u16::from(b'9')).contains(&unit));
                if has_non_digit {
                    units - 1
                } else {
                    units
                }
            }
        }
    }
}

impl fmt::Display for PhoneDigitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhoneDigitPolicy {
    type Err = UnknownPhoneDigitPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all_non_digits" | "all" => Ok(PhoneDigitPolicy::AllNonDigits),
            "first_non_digit" | "first" => Ok(PhoneDigitPolicy::FirstNonDigit),
            _ => Err(UnknownPhoneDigitPolicy(s.to_string())),
        }
    }
}

/// Checks every rule independently; an empty result means the profile is
/// accepted. `receive_newsletter` is never inspected.
pub fn validate_profile(profile: &ProfileRecord, policy: PhoneDigitPolicy) -> ErrorSet {
    let mut errors = ErrorSet::default();

    if profile.first_name.is_empty() {
        errors.insert(ProfileField::FirstName, FieldError::new(MISSING_FIRST_NAME));
    }
    if profile.last_name.is_empty() {
        errors.insert(ProfileField::LastName, FieldError::new(MISSING_LAST_NAME));
    }
    if profile.phone_number.is_empty() {
        errors.insert(
            ProfileField::PhoneNumber,
            FieldError::new(MISSING_PHONE_NUMBER),
        );
    } else if policy.digit_count(&profile.phone_number) != REQUIRED_PHONE_DIGITS {
        errors.insert(
            ProfileField::PhoneNumber,
            FieldError::new(PHONE_NUMBER_LENGTH),
        );
    }

    errors
}

pub fn evaluate_submission(profile: ProfileRecord, policy: PhoneDigitPolicy) -> SubmitResponse {
    let errors = validate_profile(&profile, policy);
    if errors.is_empty() {
        SubmitResponse::Profile(profile)
    } else {
        SubmitResponse::Errors(errors)
    }
}

/// Anything that can take a profile and answer with the profile/errors
/// duality. Implementations must not fail.
#[async_trait]
pub trait ProfileSubmitter: Send + Sync {
    async fn submit(&self, profile: ProfileRecord) -> SubmitResponse;
}

#[derive(Debug, Clone)]
pub struct MockProfileServer {
    policy: PhoneDigitPolicy,
    latency: Duration,
}

impl MockProfileServer {
    pub fn new(policy: PhoneDigitPolicy, latency: Duration) -> Self {
        Self { policy, latency }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.phone_digit_policy, settings.mock_latency)
    }

    pub fn instant(policy: PhoneDigitPolicy) -> Self {
        Self::new(policy, Duration::ZERO)
    }

    pub fn policy(&self) -> PhoneDigitPolicy {
        self.policy
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for MockProfileServer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[async_trait]
impl ProfileSubmitter for MockProfileServer {
    async fn submit(&self, profile: ProfileRecord) -> SubmitResponse {
        info!(?profile, "mock server received profile");

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let response = evaluate_submission(profile, self.policy);
        match &response {
            SubmitResponse::Profile(profile) => {
                info!(?profile, "mock server accepted profile");
            }
            SubmitResponse::Errors(errors) => {
                let fields: Vec<&str> = errors.iter().map(|(field, _)| field.key()).collect();
                debug!(?fields, policy = %self.policy, "mock server rejected profile");
            }
        }
        response
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
