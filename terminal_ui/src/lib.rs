//! Terminal client for the tarefas to-do API.
//!
//! Every change goes to the API and is followed by a full reload of the
//! active and trashed collections; the board never edits its lists locally.

pub mod api;
pub mod app;
pub mod board;
pub mod config;
pub mod form;
pub mod logging;
pub mod sync;
pub mod ui;
