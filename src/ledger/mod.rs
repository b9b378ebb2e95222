//! Account balances for Taskpay.
//!
//! The ledger is the funds substrate beneath job escrow: companies fund
//! task escrow out of their ledger balance and approved work pays into the
//! assignee's balance. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
