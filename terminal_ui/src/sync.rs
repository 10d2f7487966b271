//! Request → refetch-all round trips against the task API.

use futures_util::future::try_join;
use taskboard_shared::{Task, TaskId, TaskStatus};
use tracing::{error, info};

use crate::api::{ApiError, TaskApi};

/// A user action that goes to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Reload,
    Create(String),
    UpdateStatus(TaskId, TaskStatus),
    MoveToTrash(TaskId),
    Restore(TaskId),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Reload => "reload",
            Action::Create(_) => "create",
            Action::UpdateStatus(..) => "update status",
            Action::MoveToTrash(_) => "move to trash",
            Action::Restore(_) => "restore",
        }
    }
}

/// Both collections as returned by one reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub active: Vec<Task>,
    /// `None` when the board runs without trash support.
    pub trashed: Option<Vec<Task>>,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{action} failed: {source}")]
    Action {
        action: &'static str,
        #[source]
        source: ApiError,
    },
    #[error("reload failed: {0}")]
    Reload(#[source] ApiError),
}

impl SyncError {
    /// Message for the blocking alert.
    pub fn user_message(&self) -> &'static str {
        match self {
            SyncError::Action { .. } => {
                "Não foi possível concluir a operação. Verifique a conexão com a API."
            }
            SyncError::Reload(_) => {
                "Não foi possível carregar os dados. Verifique a conexão com a API."
            }
        }
    }
}

pub type Outcome = Result<Snapshot, SyncError>;

/// Fetch the active and, if requested, trashed tasks. The two requests run
/// together and either failure fails the whole load.
pub async fn fetch_snapshot(api: &dyn TaskApi, supports_trash: bool) -> Result<Snapshot, ApiError> {
    if supports_trash {
        let (active, trashed) = try_join(api.list_active(), api.list_trashed()).await?;
        Ok(Snapshot {
            active,
            trashed: Some(trashed),
        })
    } else {
        Ok(Snapshot {
            active: api.list_active().await?,
            trashed: None,
        })
    }
}

/// Run the action's request, then reload everything.
pub async fn perform(api: &dyn TaskApi, action: Action, supports_trash: bool) -> Outcome {
    info!(action = action.name(), "dispatching");
    let mutation = match &action {
        Action::Reload => Ok(()),
        Action::Create(text) => api.create(text).await,
        Action::UpdateStatus(id, status) => api.update_status(*id, *status).await,
        Action::MoveToTrash(id) => api.move_to_trash(*id).await,
        Action::Restore(id) => api.restore(*id).await,
    };
    if let Err(source) = mutation {
        let err = SyncError::Action {
            action: action.name(),
            source,
        };
        error!("{err}");
        return Err(err);
    }

    fetch_snapshot(api, supports_trash).await.map_err(|source| {
        let err = SyncError::Reload(source);
        error!(action = action.name(), "{err}");
        err
    })
}
