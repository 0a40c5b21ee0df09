use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown profile field '{0}'")]
pub struct UnknownProfileField(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rejected submit response carries no field errors")]
pub struct EmptyErrorSet;
