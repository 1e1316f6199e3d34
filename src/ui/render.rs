use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

use super::layout::RowKind;
use super::style::Theme;
use super::{LIST_LEFT_PADDING, overlays, status};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub tabs: Rect,
    pub search: Option<Rect>,
    /// Outer list area, including the left padding
    pub list: Rect,
    pub status: Rect,
}

impl ScreenAreas {
    /// Inner list area where rows are drawn.
    pub const fn list_inner(&self) -> Rect {
        Rect {
            x: self.list.x + LIST_LEFT_PADDING,
            width: self.list.width.saturating_sub(LIST_LEFT_PADDING),
            ..self.list
        }
    }

    /// The last list row, where toasts are drawn over the list.
    pub const fn toast(&self) -> Rect {
        Rect {
            y: self.list.y + self.list.height.saturating_sub(1),
            height: if self.list.height > 0 { 1 } else { 0 },
            ..self.list
        }
    }
}

pub fn screen_areas(area: Rect, search_enabled: bool) -> ScreenAreas {
    let search_rows = u16::from(search_enabled);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(search_rows),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    ScreenAreas {
        tabs: chunks[0],
        search: search_enabled.then_some(chunks[1]),
        list: chunks[2],
        status: chunks[3],
    }
}

/// Width available to list rows for a terminal of `total_width` columns.
pub const fn list_content_width(total_width: u16) -> u16 {
    let width = total_width.saturating_sub(LIST_LEFT_PADDING);
    if width == 0 { 1 } else { width }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let theme = Theme::default();
    let areas = screen_areas(area, model.list.options().search_enabled);

    status::render_category_tabs(model, frame, areas.tabs, &theme);
    if let Some(search_area) = areas.search {
        status::render_search_bar(model, frame, search_area, &theme);
    }
    render_list(model, frame, areas.list, &theme);
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, areas.toast());
    }
    status::render_status_bar(model, frame, areas.status, &theme);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_list(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let range = model.viewport.visible_range();
    let rows = model.rows.get(range).unwrap_or_default();

    let content: Vec<Line> = rows
        .iter()
        .map(|row| {
            let entry = row.entry();
            let expanded = entry.is_some_and(|id| model.list.is_expanded(id));
            let mut base = theme.row_style(row.kind, expanded);
            if matches!(row.kind, RowKind::Question { .. }) && entry == model.cursor {
                base = base.reversed();
            }
            if matches!(row.kind, RowKind::Notice) && row.text().trim() == super::layout::NOTICE_TITLE
            {
                base = base.remove_modifier(Modifier::ITALIC).add_modifier(Modifier::BOLD);
            }
            let spans: Vec<Span> = row
                .fragments
                .iter()
                .map(|f| Span::styled(f.text.clone(), theme.fragment_style(base, f.matched)))
                .collect();
            Line::from(spans)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(LIST_LEFT_PADDING));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(block), area);
}
