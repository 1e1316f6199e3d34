use crate::app::Model;
use crate::faq::{Category, EntryId};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Entries
    /// Move the cursor to the previous visible entry
    CursorUp,
    /// Move the cursor to the next visible entry
    CursorDown,
    /// Expand or collapse a specific entry
    Toggle(EntryId),
    /// Expand or collapse the entry under the cursor
    ToggleSelected,

    // Categories
    SelectCategory(Category),
    /// Select by tab index (0 = all)
    SelectCategoryIndex(usize),
    NextCategory,
    PrevCategory,

    // Search
    /// Focus the search input
    FocusSearch,
    /// Leave the search input, keeping the term
    BlurSearch,
    /// New search input text (evaluated after the debounce delay)
    SearchInput(String),
    /// Clear the search input and any active search
    ClearSearch,

    // Scrolling
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    /// Timers may be due at this time (ms since start)
    Tick(u64),

    // File watching
    /// Toggle file watching
    ToggleWatch,
    /// File changed externally, reload
    FileChanged,
    /// Force reload file
    ForceReload,

    // Help
    ToggleHelp,
    HideHelp,
    HelpScrollUp(usize),
    HelpScrollDown(usize),

    // Window
    /// Terminal resized (debounced)
    Resize(u16, u16),
    Quit,
}

/// Pure state transition.
///
/// Side effects that need the outside world (watchers, disk reads) are
/// handled by the event loop after this returns.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::CursorUp => model.move_cursor(-1),
        Message::CursorDown => model.move_cursor(1),
        Message::Toggle(id) => toggle_entry(&mut model, id),
        Message::ToggleSelected => {
            if let Some(id) = model.cursor {
                toggle_entry(&mut model, id);
            }
        }

        Message::SelectCategory(category) => select_category(&mut model, &category),
        Message::SelectCategoryIndex(idx) => {
            if let Some(category) = model.list.category_tabs().get(idx).cloned() {
                select_category(&mut model, &category);
            }
        }
        Message::NextCategory => cycle_category(&mut model, 1),
        Message::PrevCategory => cycle_category(&mut model, -1),

        Message::FocusSearch => {
            if model.list.options().search_enabled {
                model.search_focused = true;
            }
        }
        Message::BlurSearch => model.search_focused = false,
        Message::SearchInput(text) => {
            if model.list.options().search_enabled {
                model.list.input_search(&text, model.clock_ms);
                model.search_input = text;
            }
        }
        Message::ClearSearch => {
            model.search_input.clear();
            model.search_focused = false;
            model.list.clear_search();
            model.relayout();
        }

        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        Message::Tick(now_ms) => {
            model.clock_ms = now_ms;
            let tick = crate::list::FaqEvents::poll(&mut model.list, now_ms);
            if tick.searched {
                model.viewport.go_to_top();
                model.relayout();
            }
            if let Some(id) = tick.reveal {
                model.reveal_entry(id);
            }
        }

        Message::ToggleWatch => model.watch_enabled = !model.watch_enabled,
        // Reloads touch the disk; see the event loop side effects.
        Message::FileChanged | Message::ForceReload => {}

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll_offset = 0;
        }
        Message::HideHelp => {
            model.help_visible = false;
            model.help_scroll_offset = 0;
        }
        Message::HelpScrollUp(n) => {
            model.help_scroll_offset = model.help_scroll_offset.saturating_sub(n);
        }
        Message::HelpScrollDown(n) => {
            model.help_scroll_offset =
                (model.help_scroll_offset + n).min(crate::ui::help_line_count());
        }

        Message::Resize(width, height) => model.resize(width, height),
        Message::Quit => model.should_quit = true,
    }
    model
}

fn toggle_entry(model: &mut Model, id: EntryId) {
    model.list.sync_clock(model.clock_ms);
    if model.list.toggle(id) {
        model.cursor = Some(id);
        model.relayout();
        model.scroll_to_cursor();
    }
}

fn select_category(model: &mut Model, category: &Category) {
    if model.list.select_category(category) {
        model.viewport.go_to_top();
        model.relayout();
    }
}

fn cycle_category(model: &mut Model, step: isize) {
    let tabs = model.list.category_tabs();
    let current = tabs
        .iter()
        .position(|c| *c == model.list.state().active_category)
        .unwrap_or(0);
    let next = current
        .cast_signed()
        .saturating_add(step)
        .rem_euclid(tabs.len().cast_signed())
        .cast_unsigned();
    if let Some(category) = tabs.get(next).cloned() {
        select_category(model, &category);
    }
}
