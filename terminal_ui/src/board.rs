use std::sync::Arc;

use taskboard_shared::{Task, TaskId, TaskStatus};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::api::TaskApi;
use crate::sync::{self, Action, Outcome};

/// Which collection is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Active,
    Trashed,
}

/// Everything the view needs to draw the board.
#[derive(Debug, Clone)]
pub struct Board {
    active: Vec<Task>,
    trashed: Vec<Task>,
    tab: Tab,
    supports_trash: bool,
    /// Actions dispatched and not yet answered
    in_flight: usize,
    /// Pending blocking alert
    alert: Option<String>,
}

impl Board {
    pub fn new(supports_trash: bool) -> Self {
        Board {
            active: Vec::new(),
            trashed: Vec::new(),
            tab: Tab::Active,
            supports_trash,
            in_flight: 0,
            alert: None,
        }
    }

    pub fn active_tasks(&self) -> &[Task] {
        &self.active
    }

    pub fn trashed_tasks(&self) -> &[Task] {
        &self.trashed
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn supports_trash(&self) -> bool {
        self.supports_trash
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Tasks of the selected tab.
    pub fn visible_tasks(&self) -> &[Task] {
        match self.tab {
            Tab::Active => &self.active,
            Tab::Trashed => &self.trashed,
        }
    }

    /// Switch tabs. Returns whether the selection changed.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if tab == Tab::Trashed && !self.supports_trash {
            return false;
        }
        let changed = self.tab != tab;
        self.tab = tab;
        changed
    }

    /// Whether an action should reach the API at all.
    pub fn accepts(&self, action: &Action) -> bool {
        match action {
            Action::Create(text) => !text.trim().is_empty(),
            Action::Restore(_) => self.supports_trash,
            _ => true,
        }
    }

    pub fn begin_request(&mut self) {
        self.in_flight += 1;
    }

    /// Apply the answer to a dispatched action. A snapshot replaces both
    /// collections; an error leaves them as they were and raises the alert.
    pub fn apply(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            Ok(snapshot) => {
                debug!(
                    active = snapshot.active.len(),
                    trashed = snapshot.trashed.as_ref().map(Vec::len),
                    "applying snapshot"
                );
                self.active = snapshot.active;
                if let Some(trashed) = snapshot.trashed {
                    self.trashed = trashed;
                }
            }
            Err(err) => {
                warn!("keeping last snapshot: {err}");
                self.alert = Some(err.user_message().to_string());
            }
        }
    }
}

/// Owns the board and issues every API round trip.
pub struct BoardController {
    api: Arc<dyn TaskApi>,
    board: Board,
}

impl BoardController {
    pub fn new(api: Arc<dyn TaskApi>, supports_trash: bool) -> Self {
        BoardController {
            api,
            board: Board::new(supports_trash),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn select_tab(&mut self, tab: Tab) -> bool {
        self.board.select_tab(tab)
    }

    pub async fn initial_load(&mut self) {
        self.run(Action::Reload).await;
    }

    pub async fn reload(&mut self) {
        self.run(Action::Reload).await;
    }

    /// Returns `false` when the text is blank and nothing was sent.
    pub async fn create(&mut self, text: &str) -> bool {
        self.run(Action::Create(text.to_string())).await
    }

    pub async fn update_status(&mut self, id: TaskId, status: TaskStatus) {
        self.run(Action::UpdateStatus(id, status)).await;
    }

    pub async fn move_to_trash(&mut self, id: TaskId) {
        self.run(Action::MoveToTrash(id)).await;
    }

    /// Returns `false` when the board has no trash.
    pub async fn restore(&mut self, id: TaskId) -> bool {
        self.run(Action::Restore(id)).await
    }

    /// Perform the action and apply its outcome before returning.
    pub async fn run(&mut self, action: Action) -> bool {
        if !self.board.accepts(&action) {
            return false;
        }
        self.board.begin_request();
        let outcome = sync::perform(self.api.as_ref(), action, self.board.supports_trash).await;
        self.board.apply(outcome);
        true
    }

    /// Perform the action on a background task; its outcome arrives on `outcomes`
    /// and is applied with [`BoardController::apply`]. Nothing is cancelled, so
    /// overlapping actions resolve in whatever order the API answers.
    pub fn spawn(&mut self, action: Action, outcomes: &UnboundedSender<Outcome>) -> bool {
        if !self.board.accepts(&action) {
            return false;
        }
        self.board.begin_request();
        let api = Arc::clone(&self.api);
        let supports_trash = self.board.supports_trash;
        let outcomes = outcomes.clone();
        tokio::spawn(async move {
            let outcome = sync::perform(api.as_ref(), action, supports_trash).await;
            if outcomes.send(outcome).is_err() {
                debug!("board closed before outcome arrived");
            }
        });
        true
    }

    pub fn apply(&mut self, outcome: Outcome) {
        self.board.apply(outcome);
    }
}
