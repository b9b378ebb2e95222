//! Job postings and escrow orchestration for Taskpay.
//!
//! A job is one posted body of work owned by a company identity. The job
//! holds the escrow for its tasks and is the only component that moves it:
//! funds are captured when a task is added and released to the assignee
//! when the task is approved, never anywhere else. The module follows
//! hexagonal architecture:
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
