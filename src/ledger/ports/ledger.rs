//! Ledger port for account balances.

use crate::identity::domain::AccountId;
use crate::ledger::domain::Funds;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Account balance bookkeeping contract.
///
/// Balances default to zero for unknown accounts. Implementations must
/// apply each call atomically and leave every balance unchanged when a call
/// fails; a `transfer` either moves the full amount or nothing.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Credits an account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::BalanceOverflow`] when the credit would
    /// overflow the account's balance.
    async fn deposit(&self, account: &AccountId, amount: Funds) -> LedgerResult<()>;

    /// Debits an account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] when the account balance
    /// is smaller than the requested amount.
    async fn withdraw(&self, account: &AccountId, amount: Funds) -> LedgerResult<()>;

    /// Moves funds between two accounts atomically.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] when the source balance
    /// is smaller than the amount, or [`LedgerError::BalanceOverflow`] when
    /// the destination balance would overflow; in both cases neither
    /// balance changes.
    async fn transfer(&self, from: &AccountId, to: &AccountId, amount: Funds) -> LedgerResult<()>;

    /// Returns the current balance of an account.
    async fn balance_of(&self, account: &AccountId) -> LedgerResult<Funds>;
}

/// Errors returned by ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// The account balance is smaller than the requested amount.
    #[error("account {account} holds {available}, cannot cover {required}")]
    InsufficientFunds {
        /// The account being debited.
        account: AccountId,
        /// The amount the operation required.
        required: Funds,
        /// The balance actually available.
        available: Funds,
    },

    /// Crediting the account would overflow its balance.
    #[error("balance overflow on account {0}")]
    BalanceOverflow(AccountId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LedgerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
