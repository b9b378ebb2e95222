//! Adapter implementations of the ledger port.

pub mod memory;

pub use memory::InMemoryLedger;
