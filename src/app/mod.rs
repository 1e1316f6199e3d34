//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::faq::{Category, FaqSet};
use crate::list::ListOptions;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug)]
pub struct App {
    file_path: PathBuf,
    faq: FaqSet,
    options: ListOptions,
    initial_category: Option<Category>,
    watch_enabled: bool,
    mouse_enabled: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application for entries already loaded from `file_path`.
    pub fn new(file_path: PathBuf, faq: FaqSet) -> Self {
        Self {
            file_path,
            faq,
            options: ListOptions::default(),
            initial_category: None,
            watch_enabled: false,
            mouse_enabled: true,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Search delay, search availability and highlight markers.
    #[must_use]
    pub fn with_options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }

    /// Category to select on startup. Unknown categories fall back to all.
    #[must_use]
    pub fn with_initial_category(mut self, category: Option<Category>) -> Self {
        self.initial_category = category;
        self
    }

    /// Enable or disable file watching.
    #[must_use]
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Enable or disable mouse capture.
    #[must_use]
    pub const fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
