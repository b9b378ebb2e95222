//! Registration aggregate roots for companies and workers.

use super::{AccountId, CompanyId, CompanyProfile, IdentityDomainError, RegistrationStatus, WorkerId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Company registration aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRegistration {
    id: CompanyId,
    account: AccountId,
    profile: CompanyProfile,
    status: RegistrationStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CompanyRegistration {
    /// Creates a new company registration with `Active` status.
    #[must_use]
    pub fn new(
        id: CompanyId,
        account: AccountId,
        profile: CompanyProfile,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            account,
            profile,
            status: RegistrationStatus::Active,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the registration identifier.
    #[must_use]
    pub const fn id(&self) -> CompanyId {
        self.id
    }

    /// Returns the registered account.
    #[must_use]
    pub const fn account(&self) -> &AccountId {
        &self.account
    }

    /// Returns the company profile.
    #[must_use]
    pub const fn profile(&self) -> &CompanyProfile {
        &self.profile
    }

    /// Returns the registration lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RegistrationStatus {
        self.status
    }

    /// Returns whether the registration is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RegistrationStatus::Active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Retires the registration, setting status to
    /// [`RegistrationStatus::Inactive`].
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::NotRegistrant`] when the caller is not
    /// the registered account, or [`IdentityDomainError::RegistrationInactive`]
    /// when the registration has already been retired.
    pub fn disable(
        &mut self,
        caller: &AccountId,
        clock: &impl Clock,
    ) -> Result<(), IdentityDomainError> {
        disable_registration(&self.account, &mut self.status, caller)?;
        self.updated_at = clock.utc();
        Ok(())
    }
}

/// Worker registration aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRegistration {
    id: WorkerId,
    account: AccountId,
    status: RegistrationStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WorkerRegistration {
    /// Creates a new worker registration with `Active` status.
    #[must_use]
    pub fn new(id: WorkerId, account: AccountId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            account,
            status: RegistrationStatus::Active,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the registration identifier.
    #[must_use]
    pub const fn id(&self) -> WorkerId {
        self.id
    }

    /// Returns the registered account.
    #[must_use]
    pub const fn account(&self) -> &AccountId {
        &self.account
    }

    /// Returns the registration lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RegistrationStatus {
        self.status
    }

    /// Returns whether the registration is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RegistrationStatus::Active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Retires the registration, setting status to
    /// [`RegistrationStatus::Inactive`].
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::NotRegistrant`] when the caller is not
    /// the registered account, or [`IdentityDomainError::RegistrationInactive`]
    /// when the registration has already been retired.
    pub fn disable(
        &mut self,
        caller: &AccountId,
        clock: &impl Clock,
    ) -> Result<(), IdentityDomainError> {
        disable_registration(&self.account, &mut self.status, caller)?;
        self.updated_at = clock.utc();
        Ok(())
    }
}

/// Shared retirement rule: only the registrant may disable, and only once.
fn disable_registration(
    account: &AccountId,
    status: &mut RegistrationStatus,
    caller: &AccountId,
) -> Result<(), IdentityDomainError> {
    if caller != account {
        return Err(IdentityDomainError::NotRegistrant(caller.clone()));
    }
    if *status != RegistrationStatus::Active {
        return Err(IdentityDomainError::RegistrationInactive);
    }
    *status = RegistrationStatus::Inactive;
    Ok(())
}
