//! Format rules for client-supplied user fields.

use thiserror::Error;

use crate::domain::entities::UserInput;

/// Only addresses under this domain are accepted.
pub const EMAIL_SUFFIX: &str = "@gmail.com";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email is invalid and empty")]
    EmptyEmail,
    #[error("name is invalid and empty")]
    EmptyName,
    #[error("email is invalid and does not contain @gmail.com")]
    ForeignDomain,
    #[error("email must contain a prefix before the @gmail.com")]
    MissingLocalPart,
}

/// Checks name and email; rules run in order and the first failure wins.
pub fn validate_user(input: &UserInput) -> Result<(), ValidationError> {
    if input.email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if input.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let Some(local_part) = input.email.strip_suffix(EMAIL_SUFFIX) else {
        return Err(ValidationError::ForeignDomain);
    };
    if local_part.is_empty() {
        return Err(ValidationError::MissingLocalPart);
    }
    Ok(())
}
