//! Company and worker registration for Taskpay.
//!
//! This module implements the two identity registries the marketplace
//! consumes: companies (who post jobs) and workers (who apply for tasks).
//! Each registry maps a calling account to an append-only registration
//! record with a monotonically assigned identifier and an active flag that
//! only the registrant may clear. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
