//! Unit tests for the ledger.
