use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use taskboard::api::{ApiError, TaskApi};
use taskboard_shared::{Task, TaskId, TaskStatus};

/// In-memory stand-in for the tarefas API with soft delete.
#[derive(Default)]
pub struct MemoryApi {
    rows: Mutex<Vec<(Task, bool)>>,
    calls: AtomicUsize,
    pub fail_trashed: AtomicBool,
    pub fail_mutations: AtomicBool,
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        message: "unavailable".into(),
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Tarefa não encontrada".into(),
    }
}

impl MemoryApi {
    /// Requests seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn list(&self, active: bool) -> Vec<Task> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, a)| *a == active)
            .map(|(t, _)| t.clone())
            .collect()
    }

    fn mutate(&self, id: TaskId, f: impl FnOnce(&mut Task, &mut bool)) -> Result<(), ApiError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut rows = self.rows.lock().unwrap();
        let (task, active) = rows
            .iter_mut()
            .find(|(t, _)| t.id == id)
            .ok_or_else(not_found)?;
        f(task, active);
        Ok(())
    }
}

#[async_trait]
impl TaskApi for MemoryApi {
    async fn list_active(&self) -> Result<Vec<Task>, ApiError> {
        self.hit();
        Ok(self.list(true))
    }

    async fn list_trashed(&self) -> Result<Vec<Task>, ApiError> {
        self.hit();
        if self.fail_trashed.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.list(false))
    }

    async fn create(&self, text: &str) -> Result<(), ApiError> {
        self.hit();
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as TaskId + 1;
        rows.push((
            Task {
                id,
                title: text.to_string(),
                status: TaskStatus::Pending,
            },
            true,
        ));
        Ok(())
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> Result<(), ApiError> {
        self.hit();
        self.mutate(id, |task, _| task.status = status)
    }

    async fn move_to_trash(&self, id: TaskId) -> Result<(), ApiError> {
        self.hit();
        self.mutate(id, |_, active| *active = false)
    }

    async fn restore(&self, id: TaskId) -> Result<(), ApiError> {
        self.hit();
        self.mutate(id, |_, active| *active = true)
    }
}
