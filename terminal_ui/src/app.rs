use std::io;
use std::sync::Arc;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use taskboard_shared::{Task, TaskStatus};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::info;
use tui::backend::CrosstermBackend;
use tui::Terminal;

use crate::api::HttpTaskApi;
use crate::board::{Board, BoardController, Tab};
use crate::config::Config;
use crate::form::TaskForm;
use crate::sync::{Action, Outcome};
use crate::ui;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Board controller plus the view-local state of the terminal UI.
pub struct App {
    pub controller: BoardController,
    pub form: TaskForm,
    pub should_quit: bool,
    active_cursor: usize,
    trashed_cursor: usize,
    outcomes: UnboundedSender<Outcome>,
}

impl App {
    pub fn new(controller: BoardController, outcomes: UnboundedSender<Outcome>) -> Self {
        App {
            controller,
            form: TaskForm::default(),
            should_quit: false,
            active_cursor: 0,
            trashed_cursor: 0,
            outcomes,
        }
    }

    pub fn board(&self) -> &Board {
        self.controller.board()
    }

    pub fn cursor(&self) -> usize {
        match self.board().tab() {
            Tab::Active => self.active_cursor,
            Tab::Trashed => self.trashed_cursor,
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.board().visible_tasks().get(self.cursor())
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        self.controller.spawn(action, &self.outcomes)
    }

    pub fn apply(&mut self, outcome: Outcome) {
        self.controller.apply(outcome);
        let board = self.controller.board();
        self.active_cursor = clamp_cursor(self.active_cursor, board.active_tasks().len());
        self.trashed_cursor = clamp_cursor(self.trashed_cursor, board.trashed_tasks().len());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.board().alert().is_some() {
            self.controller.board_mut().dismiss_alert();
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.form.editing {
            self.handle_form_key(key);
        } else {
            self.handle_board_key(key);
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.form.editing = false,
            KeyCode::Enter => {
                if let Some(text) = self.form.submit() {
                    self.dispatch(Action::Create(text));
                }
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) => self.form.insert(c),
            _ => {}
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') | KeyCode::Char('i') => self.form.editing = true,
            KeyCode::Tab | KeyCode::BackTab => {
                let next = match self.board().tab() {
                    Tab::Active => Tab::Trashed,
                    Tab::Trashed => Tab::Active,
                };
                self.controller.select_tab(next);
            }
            KeyCode::Left => {
                self.controller.select_tab(Tab::Active);
            }
            KeyCode::Right => {
                self.controller.select_tab(Tab::Trashed);
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::F(5) | KeyCode::Char('R') => {
                self.dispatch(Action::Reload);
            }
            _ => match self.board().tab() {
                Tab::Active => self.handle_active_row_key(key.code),
                Tab::Trashed => self.handle_trashed_row_key(key.code),
            },
        }
    }

    fn handle_active_row_key(&mut self, code: KeyCode) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            return;
        };
        let action = match code {
            KeyCode::Char('p') => Action::UpdateStatus(id, TaskStatus::Pending),
            KeyCode::Char('f') => Action::UpdateStatus(id, TaskStatus::Doing),
            KeyCode::Char('c') => Action::UpdateStatus(id, TaskStatus::Done),
            KeyCode::Char('d') | KeyCode::Delete => Action::MoveToTrash(id),
            _ => return,
        };
        self.dispatch(action);
    }

    fn handle_trashed_row_key(&mut self, code: KeyCode) {
        if code != KeyCode::Char('r') {
            return;
        }
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.dispatch(Action::Restore(id));
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.board().visible_tasks().len();
        let cursor = match self.board().tab() {
            Tab::Active => &mut self.active_cursor,
            Tab::Trashed => &mut self.trashed_cursor,
        };
        let next = (*cursor as isize + delta).max(0) as usize;
        *cursor = clamp_cursor(next, len);
    }
}

fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

/// Set up the terminal, run the board until the user quits, restore the terminal.
pub async fn run(config: &Config) -> Result<(), AppError> {
    let api = Arc::new(HttpTaskApi::new(&config.api_url));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(BoardController::new(api, config.supports_trash), tx);
    info!(api_url = %config.api_url, supports_trash = config.supports_trash, "starting board");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    app.dispatch(Action::Reload);
    let mut events = EventStream::new();
    let result = loop {
        if let Err(e) = terminal.draw(|f| ui::render(f, &app)) {
            break Err(e.into());
        }
        tokio::select! {
            Some(outcome) = rx.recv() => app.apply(outcome),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(e)) => break Err(e.into()),
                None => break Ok(()),
            },
        }
        if app.should_quit {
            break Ok(());
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
