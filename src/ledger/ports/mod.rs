//! Port contracts for account balance bookkeeping.

pub mod ledger;

pub use ledger::{Ledger, LedgerError, LedgerResult};
