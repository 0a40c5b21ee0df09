use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown phone digit policy '{0}' (expected 'all_non_digits' or 'first_non_digit')")]
pub struct UnknownPhoneDigitPolicy(pub String);
