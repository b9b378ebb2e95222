//! Error types for identity domain validation and lifecycle rules.

use super::AccountId;
use thiserror::Error;

/// Errors returned while constructing or mutating identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The account identifier is empty after trimming.
    #[error("account id must not be empty")]
    EmptyAccountId,

    /// The company name is empty after trimming.
    #[error("company name must not be empty")]
    EmptyCompanyName,

    /// The company domain is empty after trimming.
    #[error("company domain must not be empty")]
    EmptyCompanyDomain,

    /// The caller is not the account that created the registration.
    #[error("caller {0} is not the registrant")]
    NotRegistrant(AccountId),

    /// The registration has already been retired.
    #[error("registration is not active")]
    RegistrationInactive,
}

/// Error returned while parsing registration status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown registration status: {0}")]
pub struct ParseRegistrationStatusError(pub String);
