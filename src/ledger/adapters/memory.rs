//! In-memory ledger for tests and embedders without a banking backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::AccountId;
use crate::ledger::{
    domain::Funds,
    ports::{Ledger, LedgerError, LedgerResult},
};

/// Thread-safe in-memory ledger.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: Arc<RwLock<HashMap<AccountId, Funds>>>,
}

impl InMemoryLedger {
    /// Creates a ledger with all balances at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poison(err: impl std::fmt::Display) -> LedgerError {
    LedgerError::persistence(std::io::Error::other(err.to_string()))
}

fn credit(
    balances: &mut HashMap<AccountId, Funds>,
    account: &AccountId,
    amount: Funds,
) -> LedgerResult<()> {
    let current = balances.get(account).copied().unwrap_or_default();
    let updated = current
        .checked_add(amount)
        .ok_or_else(|| LedgerError::BalanceOverflow(account.clone()))?;
    balances.insert(account.clone(), updated);
    Ok(())
}

fn debit(
    balances: &mut HashMap<AccountId, Funds>,
    account: &AccountId,
    amount: Funds,
) -> LedgerResult<()> {
    let current = balances.get(account).copied().unwrap_or_default();
    let updated = current
        .checked_sub(amount)
        .ok_or_else(|| LedgerError::InsufficientFunds {
            account: account.clone(),
            required: amount,
            available: current,
        })?;
    balances.insert(account.clone(), updated);
    Ok(())
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn deposit(&self, account: &AccountId, amount: Funds) -> LedgerResult<()> {
        let mut balances = self.balances.write().map_err(poison)?;
        credit(&mut balances, account, amount)
    }

    async fn withdraw(&self, account: &AccountId, amount: Funds) -> LedgerResult<()> {
        let mut balances = self.balances.write().map_err(poison)?;
        debit(&mut balances, account, amount)
    }

    async fn transfer(&self, from: &AccountId, to: &AccountId, amount: Funds) -> LedgerResult<()> {
        let mut balances = self.balances.write().map_err(poison)?;

        // Validate the credit side before committing the debit so a failed
        // transfer leaves both balances untouched.
        let destination = balances.get(to).copied().unwrap_or_default();
        if destination.checked_add(amount).is_none() {
            return Err(LedgerError::BalanceOverflow(to.clone()));
        }

        debit(&mut balances, from, amount)?;
        credit(&mut balances, to, amount)
    }

    async fn balance_of(&self, account: &AccountId) -> LedgerResult<Funds> {
        let balances = self.balances.read().map_err(poison)?;
        Ok(balances.get(account).copied().unwrap_or_default())
    }
}
