use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let all_lines = help_lines(&global_cfg, &local_cfg, section_style);

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height_u16 = inner.height.saturating_sub(1);
    let content_height = content_height_u16 as usize;
    let max_scroll = all_lines.len().saturating_sub(content_height);
    let scroll = model.help_scroll_offset.min(max_scroll);

    let end = (scroll + content_height).min(all_lines.len());
    let visible: Vec<Line> = all_lines[scroll..end].to_vec();

    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height_u16);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height_u16, inner.width, 1);
    let footer = Line::styled("j/k scroll \u{2502} any other key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

/// Number of lines in the help text, for clamping the scroll offset.
pub fn help_line_count() -> usize {
    help_lines("", "", Style::default()).len()
}

fn help_lines(global_cfg: &str, local_cfg: &str, section_style: Style) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    lines.push(Line::styled("Entries", section_style));
    lines.push(Line::raw("  j/k or Up/Down      Move between questions"));
    lines.push(Line::raw("  Enter / Space       Expand or collapse"));
    lines.push(Line::raw("  PageUp/PageDown     Scroll a page"));
    lines.push(Line::raw("  g / G               Top / bottom"));
    lines.push(Line::raw("  Click question      Expand or collapse"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Categories", section_style));
    lines.push(Line::raw("  Tab / Shift-Tab     Next / previous category"));
    lines.push(Line::raw("  h/l or Left/Right   Previous / next category"));
    lines.push(Line::raw("  0-9                 Jump to category (0 = all)"));
    lines.push(Line::raw("  Click tab           Select category"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Search", section_style));
    lines.push(Line::raw("  /                   Focus search input"));
    lines.push(Line::raw("  Enter               Leave input, keep term"));
    lines.push(Line::raw("  Esc                 Clear search"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  w                   Toggle watch"));
    lines.push(Line::raw("  r                   Reload file"));
    lines.push(Line::raw("  q / Ctrl-c          Quit"));
    lines.push(Line::raw("  ?                   Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    lines
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
