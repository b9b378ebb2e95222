//! Orchestration services for the task registry.

pub mod registry;

pub use registry::{
    CreateTaskRequest, Reassignment, TaskRegistry, TaskRegistryError, TaskRegistryResult,
};
