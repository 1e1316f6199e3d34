// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. faq::FaqSet)
    clippy::module_name_repetitions
)]

//! # faqview
//!
//! A terminal FAQ browser.
//!
//! faqview loads question/answer entries from Markdown, CSV or JSON and shows
//! them with:
//! - Category tabs
//! - Debounced literal search with match highlighting
//! - Accordion answers (one open at a time)
//! - File watching for live reload
//!
//! ## Architecture
//!
//! The interactive viewer uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! The filtering, searching and expansion rules live in [`list`], which has
//! no terminal dependency and is shared with the plain-text [`print`] mode.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`faq`]: Entry types and source loading
//! - [`list`]: Category filter, search and accordion controller
//! - [`search`]: Literal matching and highlight markers
//! - [`ui`]: Terminal UI components
//! - [`print`]: Non-interactive output
//! - [`config`]: Persistent flag defaults
//! - [`watcher`]: File watching

pub mod app;
pub mod config;
pub mod faq;
pub mod list;
pub mod print;
pub mod search;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::faq::{Category, Entry, EntryId, FaqSet, load_entries};
    pub use crate::list::{FaqEvents, FaqList, ListOptions};
    pub use crate::search::Highlighter;
    pub use crate::ui::viewport::Viewport;
}
