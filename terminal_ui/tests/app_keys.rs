mod common;

use std::sync::Arc;

use common::MemoryApi;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard::app::App;
use taskboard::board::{BoardController, Tab};
use taskboard::sync::Outcome;
use taskboard_shared::TaskStatus;
use tokio::sync::mpsc::{self, UnboundedReceiver};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

fn setup() -> (Arc<MemoryApi>, App, UnboundedReceiver<Outcome>) {
    let api = Arc::new(MemoryApi::default());
    let (tx, rx) = mpsc::unbounded_channel();
    let app = App::new(BoardController::new(api.clone(), true), tx);
    (api, app, rx)
}

/// Wait for the next dispatched action to finish and apply it.
async fn settle(app: &mut App, rx: &mut UnboundedReceiver<Outcome>) {
    let outcome = rx.recv().await.expect("outcome channel closed");
    app.apply(outcome);
}

#[tokio::test]
async fn add_task_through_the_form() {
    let (_api, mut app, mut rx) = setup();

    app.handle_key(key(KeyCode::Char('a')));
    assert!(app.form.editing);
    type_text(&mut app, "Buy milk");
    app.handle_key(key(KeyCode::Enter));
    assert!(app.board().is_loading());
    assert_eq!(app.form.input(), "");

    settle(&mut app, &mut rx).await;
    assert!(!app.board().is_loading());
    assert_eq!(app.board().active_tasks()[0].title, "Buy milk");
}

#[tokio::test]
async fn blank_form_submit_does_nothing() {
    let (api, mut app, mut rx) = setup();
    app.handle_key(key(KeyCode::Char('i')));
    type_text(&mut app, "  ");
    app.handle_key(key(KeyCode::Enter));

    assert!(!app.board().is_loading());
    assert_eq!(app.form.input(), "  ");
    assert!(rx.try_recv().is_err());
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn status_trash_and_restore_keys() {
    let (_api, mut app, mut rx) = setup();
    app.handle_key(key(KeyCode::Char('a')));
    type_text(&mut app, "Buy milk");
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Esc));
    settle(&mut app, &mut rx).await;

    app.handle_key(key(KeyCode::Char('f')));
    settle(&mut app, &mut rx).await;
    assert_eq!(app.board().active_tasks()[0].status, TaskStatus::Doing);

    app.handle_key(key(KeyCode::Char('c')));
    settle(&mut app, &mut rx).await;
    assert_eq!(app.board().active_tasks()[0].status, TaskStatus::Done);

    app.handle_key(key(KeyCode::Char('d')));
    settle(&mut app, &mut rx).await;
    assert!(app.board().active_tasks().is_empty());
    assert_eq!(app.board().trashed_tasks()[0].id, 1);

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.board().tab(), Tab::Trashed);
    app.handle_key(key(KeyCode::Char('r')));
    settle(&mut app, &mut rx).await;
    assert_eq!(app.board().active_tasks()[0].id, 1);
    assert!(app.board().trashed_tasks().is_empty());
}

#[tokio::test]
async fn row_keys_on_empty_list_send_nothing() {
    let (api, mut app, mut rx) = setup();
    for c in ['p', 'f', 'c', 'd'] {
        app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Right));
    app.handle_key(key(KeyCode::Char('r')));
    assert!(rx.try_recv().is_err());
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn any_key_dismisses_alert() {
    let (api, mut app, mut rx) = setup();
    app.handle_key(key(KeyCode::Char('a')));
    type_text(&mut app, "Buy milk");
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Esc));
    settle(&mut app, &mut rx).await;

    api.fail_mutations
        .store(true, std::sync::atomic::Ordering::SeqCst);
    app.handle_key(key(KeyCode::Char('d')));
    settle(&mut app, &mut rx).await;
    assert!(app.board().alert().is_some());

    // Swallowed by the alert, so this is not a quit.
    app.handle_key(key(KeyCode::Char('q')));
    assert_eq!(app.board().alert(), None);
    assert!(!app.should_quit);

    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[tokio::test]
async fn cursor_follows_reloads() {
    let (_api, mut app, mut rx) = setup();
    app.handle_key(key(KeyCode::Char('a')));
    for title in ["one", "two", "three"] {
        type_text(&mut app, title);
        app.handle_key(key(KeyCode::Enter));
        settle(&mut app, &mut rx).await;
    }
    app.handle_key(key(KeyCode::Esc));

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.selected_task().map(|t| t.id), Some(3));

    app.handle_key(key(KeyCode::Char('d')));
    settle(&mut app, &mut rx).await;
    assert_eq!(app.selected_task().map(|t| t.id), Some(2));

    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.selected_task().map(|t| t.id), Some(1));
}
