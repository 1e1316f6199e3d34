use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Tabs};

use crate::app::Model;

use super::layout::tab_label;
use super::style::Theme;

pub fn render_category_tabs(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let tabs = model.list.category_tabs();
    let selected = tabs
        .iter()
        .position(|c| *c == model.list.state().active_category)
        .unwrap_or(0);
    let titles: Vec<Line> = tabs
        .iter()
        .enumerate()
        .map(|(idx, category)| Line::raw(tab_label(idx, category)))
        .collect();
    let widget = Tabs::new(titles)
        .select(selected)
        .style(theme.tab)
        .highlight_style(theme.tab_active)
        .padding(" ", " ")
        .divider("\u{2502}");
    frame.render_widget(widget, area);
}

pub fn render_search_bar(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let input = model.search_input.as_str();
    let text = if model.search_focused {
        let pending = if model.list.pending_search().is_some() {
            "  \u{2026}"
        } else {
            ""
        };
        format!("/{input}\u{258f}{pending}  Enter: done  Esc: clear")
    } else if input.is_empty() {
        "/ search".to_string()
    } else {
        format!("/{input}  (/ to edit, Esc to clear)")
    };
    let style = if model.search_focused {
        theme.search_bar_focused
    } else {
        theme.search_bar
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = model.list.faq().title().map_or_else(
        || {
            model.file_path.file_name().map_or_else(
                || "untitled".to_string(),
                |s| s.to_string_lossy().to_string(),
            )
        },
        ToString::to_string,
    );

    let shown = format!(
        "{}/{} shown",
        model.list.visible_count(),
        model.list.faq().len()
    );
    let category = model.list.state().active_category.label().to_string();
    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };

    let status = format!(
        " {title}  {shown}  [{category}]  {}%{watch_indicator}  ?:help",
        model.viewport.scroll_percent()
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(theme.status_bg).fg(theme.status_fg));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
