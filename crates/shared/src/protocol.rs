use serde::{Deserialize, Serialize};

use crate::{
    domain::{ErrorSet, ProfileRecord},
    error::EmptyErrorSet,
};

/// Outcome of a profile submission. Serializes as `{"profile": {...}}` or
/// `{"errors": {...}}`; exactly one of the two is ever present, and an
/// `errors` payload without entries is refused when parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "RawSubmitResponse")]
pub enum SubmitResponse {
    Profile(ProfileRecord),
    Errors(ErrorSet),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawSubmitResponse {
    Profile(ProfileRecord),
    Errors(ErrorSet),
}

impl TryFrom<RawSubmitResponse> for SubmitResponse {
    type Error = EmptyErrorSet;

    fn try_from(raw: RawSubmitResponse) -> Result<Self, Self::Error> {
        match raw {
            RawSubmitResponse::Profile(profile) => Ok(SubmitResponse::Profile(profile)),
            RawSubmitResponse::Errors(errors) if errors.is_empty() => Err(EmptyErrorSet),
            RawSubmitResponse::Errors(errors) => Ok(SubmitResponse::Errors(errors)),
        }
    }
}

impl SubmitResponse {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitResponse::Profile(_))
    }

    pub fn errors(&self) -> Option<&ErrorSet> {
        match self {
            SubmitResponse::Errors(errors) => Some(errors),
            SubmitResponse::Profile(_) => None,
        }
    }

    pub fn profile(&self) -> Option<&ProfileRecord> {
        match self {
            SubmitResponse::Profile(profile) => Some(profile),
            SubmitResponse::Errors(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldError, ProfileField};

    #[test]
    fn rejected_response_is_keyed_by_errors() {
        let mut errors = ErrorSet::default();
        errors.insert(
            ProfileField::PhoneNumber,
            FieldError::new("Phone number must be 8 digits"),
        );
        let json = serde_json::to_string(&SubmitResponse::Errors(errors)).expect("serialize");
        assert_eq!(
            json,
            r#"{"errors":{"phoneNumber":{"message":"Phone number must be 8 digits"}}}"#
        );
    }

    #[test]
    fn accepted_response_parses_from_profile_key() {
        let response: SubmitResponse = serde_json::from_str(
            r#"{"profile":{"firstName":"Ann","lastName":"Lee","phoneNumber":"99882233","receiveNewsletter":false}}"#,
        )
        .expect("parse");
        assert!(response.is_accepted());
        assert_eq!(response.profile().map(|p| p.first_name.as_str()), Some("Ann"));
        assert!(response.errors().is_none());
    }

    #[test]
    fn errors_payload_without_entries_is_refused() {
        let err = serde_json::from_str::<SubmitResponse>(r#"{"errors":{}}"#).unwrap_err();
        assert!(err
            .to_string()
            .contains("rejected submit response carries no field errors"));
    }
}
