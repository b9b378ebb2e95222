//! Port contracts for identity registration persistence.

pub mod repository;

pub use repository::{
    CompanyRepository, IdentityRepositoryError, IdentityRepositoryResult, WorkerRepository,
};
