//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Flattening visible entries into wrapped rows
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors

pub mod layout;
pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use overlays::help_line_count;
pub use render::{ScreenAreas, list_content_width, render, screen_areas};

pub const LIST_LEFT_PADDING: u16 = 2;

#[cfg(test)]
mod tests;
