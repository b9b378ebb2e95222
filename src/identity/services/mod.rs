//! Orchestration services for identity registration.

pub mod registry;

pub use registry::{
    CompanyRegistry, CompanyRegistryError, CompanyRegistryResult, WorkerRegistry,
    WorkerRegistryError, WorkerRegistryResult,
};
