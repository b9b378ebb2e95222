//! In-memory repository and event log for task registry tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::AccountId;
use crate::job::domain::JobId;
use crate::task::{
    domain::{Task, TaskEvent, TaskId},
    ports::{
        TaskEventLog, TaskEventLogError, TaskEventLogResult, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult,
    },
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    last_id: u64,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poison(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted_by_id(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(Task::id);
    tasks
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn allocate_id(&self) -> TaskRepositoryResult<TaskId> {
        let mut state = self.state.write().map_err(poison)?;
        state.last_id += 1;
        Ok(TaskId::new(state.last_id))
    }

    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poison)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poison)?;
        let stored = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        // The conditional-update contract: commit only when the caller read
        // the latest revision.
        if stored.revision() != task.revision() {
            return Err(TaskRepositoryError::RevisionConflict(task.id()));
        }

        let mut committed = task.clone();
        committed.advance_revision();
        state.tasks.insert(committed.id(), committed);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poison)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_owning_job(&self, job: JobId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poison)?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| task.owning_job() == job)
            .cloned()
            .collect();
        Ok(sorted_by_id(tasks))
    }

    async fn find_active_by_assignee(
        &self,
        worker: &AccountId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poison)?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| !task.is_complete() && task.assignee() == Some(worker))
            .cloned()
            .collect();
        Ok(sorted_by_id(tasks))
    }
}

/// Thread-safe in-memory task event log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskEventLog {
    events: Arc<RwLock<Vec<TaskEvent>>>,
}

impl InMemoryTaskEventLog {
    /// Creates an empty in-memory event log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn log_poison(err: impl std::fmt::Display) -> TaskEventLogError {
    TaskEventLogError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskEventLog for InMemoryTaskEventLog {
    async fn record(&self, event: TaskEvent) -> TaskEventLogResult<()> {
        let mut events = self.events.write().map_err(log_poison)?;
        events.push(event);
        Ok(())
    }

    async fn for_task(&self, task_id: TaskId) -> TaskEventLogResult<Vec<TaskEvent>> {
        let events = self.events.read().map_err(log_poison)?;
        Ok(events
            .iter()
            .filter(|event| event.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn all(&self) -> TaskEventLogResult<Vec<TaskEvent>> {
        let events = self.events.read().map_err(log_poison)?;
        Ok(events.clone())
    }
}
