//! The task registry for Taskpay.
//!
//! This module owns every task record in the marketplace: creation under an
//! owning job, candidacy, assignment and reassignment, evidence submission,
//! approval and rejection, and the queries other components build on. Every
//! mutating operation re-checks that the caller is the job that created the
//! task, which makes cross-job interference structurally impossible even
//! though all tasks share one namespace. The module follows hexagonal
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

#[cfg(test)]
mod tests;
