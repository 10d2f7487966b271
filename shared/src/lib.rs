use serde::{Deserialize, Serialize};
use std::fmt;

pub type TaskId = u64;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum TaskStatus {
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "fazendo")]
    Doing,
    #[serde(rename = "concluída")]
    Done,
}

impl TaskStatus {
    /// Selector order.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::Doing, TaskStatus::Done];

    /// The literal string the API sends and expects.
    pub fn as_wire(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pendente",
            TaskStatus::Doing => "fazendo",
            TaskStatus::Done => "concluída",
        }
    }

    /// Label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pendente",
            TaskStatus::Doing => "Fazendo",
            TaskStatus::Done => "Concluída",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "titulo", alias = "title")]
    pub title: String,
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateTaskRequest {
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

/// Paths of the task endpoints, relative to the API base URL.
pub mod routes {
    use super::TaskId;

    pub const TASKS: &str = "/tarefas";
    pub const TRASHED_TASKS: &str = "/tarefas/excluidas";

    pub fn task(id: TaskId) -> String {
        format!("{TASKS}/{id}")
    }

    pub fn restore(id: TaskId) -> String {
        format!("{TASKS}/{id}/recuperar")
    }

    pub fn status(id: TaskId) -> String {
        format!("{TASKS}/{id}/status")
    }
}
