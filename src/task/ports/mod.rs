//! Port contracts consumed by the task registry.

pub mod event_log;
pub mod repository;
pub mod worker_directory;

pub use event_log::{TaskEventLog, TaskEventLogError, TaskEventLogResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use worker_directory::{WorkerDirectory, WorkerDirectoryError, WorkerDirectoryResult};
