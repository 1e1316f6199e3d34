//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use super::layout::RowKind;

/// Colors for every element of the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub question: Style,
    pub question_expanded: Style,
    pub answer: Style,
    /// Search matches, layered on top of the row style
    pub matched: Style,
    pub notice: Style,
    pub tab: Style,
    pub tab_active: Style,
    pub search_bar: Style,
    pub search_bar_focused: Style,
    /// Status bar background
    pub status_bg: Color,
    /// Status bar foreground
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            question: Style::default().add_modifier(Modifier::BOLD),
            question_expanded: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            answer: Style::default(),
            matched: Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            notice: Style::default()
                .fg(Color::Indexed(245))
                .add_modifier(Modifier::ITALIC),
            tab: Style::default().fg(Color::White),
            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            search_bar: Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(250)),
            search_bar_focused: Style::default().bg(Color::Blue).fg(Color::White),
            status_bg: Color::Indexed(236), // Dark gray that works on both
            status_fg: Color::Indexed(252), // Light gray
        }
    }
}

impl Theme {
    /// Base style for a row of the given kind.
    pub fn row_style(&self, kind: RowKind, expanded: bool) -> Style {
        match kind {
            RowKind::Question { .. } if expanded => self.question_expanded,
            RowKind::Question { .. } => self.question,
            RowKind::Answer(_) | RowKind::Spacer => self.answer,
            RowKind::Notice => self.notice,
        }
    }

    /// Style for a fragment, with the match style patched over the row style.
    pub fn fragment_style(&self, base: Style, matched: bool) -> Style {
        if matched { base.patch(self.matched) } else { base }
    }
}
