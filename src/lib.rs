//! Terminal time tracker.
//!
//! Tasks record an activity, a date and a start/end time; the duration is
//! always derived from the two times. The [`detail`] module holds the editing
//! workflow shared by the CLI and the TUI.

pub mod commands;
pub mod config;
pub mod detail;
pub mod error;
pub mod logging;
pub mod models;
pub mod settings;
pub mod storage;
pub mod time_util;
pub mod tui;

pub use error::{Error, Result};
