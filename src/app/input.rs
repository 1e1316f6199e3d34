use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::app::{App, Message, Model};
use crate::list::Debouncer;
use crate::ui::layout::{RowKind, tab_at};

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut Debouncer<(u16, u16)>,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) if model.mouse_enabled => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.schedule((*w, *h), now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Message::Quit);
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Message::HelpScrollDown(1)),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::HelpScrollUp(1)),
                _ => Some(Message::HideHelp),
            };
        }

        if model.search_focused {
            return match key.code {
                KeyCode::Esc => Some(Message::ClearSearch),
                KeyCode::Enter => Some(Message::BlurSearch),
                KeyCode::Up => Some(Message::CursorUp),
                KeyCode::Down => Some(Message::CursorDown),
                KeyCode::Backspace => {
                    let mut next = model.search_input.clone();
                    next.pop();
                    Some(Message::SearchInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = model.search_input.clone();
                    next.push(c);
                    Some(Message::SearchInput(next))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Message::CursorDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::CursorUp),
            KeyCode::Enter | KeyCode::Char(' ') => model.cursor.map(|_| Message::ToggleSelected),
            KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => Some(Message::NextCategory),
            KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => Some(Message::PrevCategory),
            KeyCode::Char(c @ '0'..='9') => {
                let idx = c.to_digit(10).and_then(|d| usize::try_from(d).ok())?;
                Some(Message::SelectCategoryIndex(idx))
            }
            KeyCode::Char('/') if model.list.options().search_enabled => {
                Some(Message::FocusSearch)
            }
            KeyCode::Esc
                if model.list.search_active()
                    || model.list.pending_search().is_some()
                    || !model.search_input.is_empty() =>
            {
                Some(Message::ClearSearch)
            }
            KeyCode::PageDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::PageDown)
                } else {
                    None
                }
            }
            KeyCode::PageUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::PageUp)
                } else {
                    None
                }
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char('r') => Some(Message::ForceReload),
            KeyCode::Char('w') => Some(Message::ToggleWatch),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return match mouse.kind {
                MouseEventKind::ScrollDown => Some(Message::HelpScrollDown(3)),
                MouseEventKind::ScrollUp => Some(Message::HelpScrollUp(3)),
                MouseEventKind::Up(MouseButton::Left) => Some(Message::HideHelp),
                _ => None,
            };
        }

        let areas = model.screen_areas();
        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => {
                if point_in_rect(mouse.column, mouse.row, areas.tabs) {
                    let tabs = model.list.category_tabs();
                    return tab_at(&tabs, mouse.column.saturating_sub(areas.tabs.x))
                        .map(Message::SelectCategoryIndex);
                }
                if areas
                    .search
                    .is_some_and(|rect| point_in_rect(mouse.column, mouse.row, rect))
                {
                    return Some(Message::FocusSearch);
                }
                if point_in_rect(mouse.column, mouse.row, areas.list) {
                    let idx = model.viewport.offset() + usize::from(mouse.row - areas.list.y);
                    return match model.rows.get(idx)?.kind {
                        RowKind::Question { id, .. } => Some(Message::Toggle(id)),
                        RowKind::Notice => Some(Message::ClearSearch),
                        RowKind::Answer(_) | RowKind::Spacer => None,
                    };
                }
                None
            }
            MouseEventKind::ScrollDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(3))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(3))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

fn point_in_rect(column: u16, row: u16, rect: Rect) -> bool {
    rect.contains(Position::new(column, row))
}
