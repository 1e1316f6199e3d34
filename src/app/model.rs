use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ratatui::layout::Rect;

use crate::faq::{EntryId, FaqSet, load_entries};
use crate::list::FaqList;
use crate::ui::ScreenAreas;
use crate::ui::layout::{Row, RowKind, build_rows, entry_row_range};
use crate::ui::viewport::Viewport;

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. The list controller
/// owns the FAQ view state; everything else is terminal presentation.
#[derive(Debug)]
pub struct Model {
    /// Entries plus category/search/expansion state
    pub list: FaqList,
    /// Path to the source file
    pub file_path: PathBuf,
    /// Viewport over the laid-out rows
    pub viewport: Viewport,
    /// Rows for the current list state and width
    pub rows: Vec<Row>,
    /// Entry under the keyboard cursor; always a visible entry when set
    pub cursor: Option<EntryId>,
    /// Text currently in the search input
    pub search_input: String,
    /// Whether keystrokes go to the search input
    pub search_focused: bool,
    /// Whether file watching is enabled
    pub watch_enabled: bool,
    /// Whether mouse capture is requested
    pub mouse_enabled: bool,
    /// Whether help overlay is visible
    pub help_visible: bool,
    pub help_scroll_offset: usize,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Milliseconds since the event loop started
    pub clock_ms: u64,
    terminal_size: (u16, u16),
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    pub fn new(file_path: PathBuf, list: FaqList, terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            list,
            file_path,
            viewport: Viewport::new(terminal_size.0, terminal_size.1, 0),
            rows: Vec::new(),
            cursor: None,
            search_input: String::new(),
            search_focused: false,
            watch_enabled: false,
            mouse_enabled: true,
            help_visible: false,
            help_scroll_offset: 0,
            config_global_path: None,
            config_local_path: None,
            clock_ms: 0,
            terminal_size,
            toast: None,
            should_quit: false,
        };
        model.resize(terminal_size.0, terminal_size.1);
        model
    }

    pub const fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn screen_areas(&self) -> ScreenAreas {
        let (width, height) = self.terminal_size;
        crate::ui::screen_areas(
            Rect::new(0, 0, width, height),
            self.list.options().search_enabled,
        )
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        let list_height = self.screen_areas().list.height;
        self.viewport
            .resize(crate::ui::list_content_width(width), list_height);
        self.relayout();
    }

    /// Rebuild rows after any change to the list state or width.
    pub fn relayout(&mut self) {
        self.rows = build_rows(&self.list, self.viewport.width());
        self.viewport.set_total_lines(self.rows.len());
        self.sync_cursor();
    }

    /// Keep the cursor on a visible entry, falling back to the first one.
    fn sync_cursor(&mut self) {
        if self.cursor.is_some_and(|id| self.list.is_visible(id)) {
            return;
        }
        self.cursor = self.list.visible_ids().next();
    }

    /// Index of the first row of an entry's question.
    pub fn question_row(&self, id: EntryId) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.kind == RowKind::Question { id, first: true })
    }

    /// Move the cursor by `delta` visible entries, clamped to the ends.
    pub(super) fn move_cursor(&mut self, delta: isize) {
        let visible: Vec<EntryId> = self.list.visible_ids().collect();
        if visible.is_empty() {
            self.cursor = None;
            return;
        }
        let current = self
            .cursor
            .and_then(|id| visible.iter().position(|v| *v == id))
            .unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(visible.len() - 1);
        self.cursor = Some(visible[next]);
        self.scroll_to_cursor();
    }

    pub(super) fn scroll_to_cursor(&mut self) {
        if let Some(row) = self.cursor.and_then(|id| self.question_row(id)) {
            self.viewport.ensure_visible(row);
        }
    }

    /// Scroll so an entry's question and answer rows are in view.
    pub(super) fn reveal_entry(&mut self, id: EntryId) {
        if let Some(range) = entry_row_range(&self.rows, id) {
            self.viewport.reveal(range);
        }
    }

    /// Swap in a new entry set. View state starts over.
    pub(super) fn replace_entries(&mut self, faq: FaqSet) {
        let options = self.list.options().clone();
        self.list = FaqList::with_options(faq, options);
        self.list.sync_clock(self.clock_ms);
        self.search_input.clear();
        self.search_focused = false;
        self.cursor = None;
        self.viewport.go_to_top();
        self.relayout();
    }

    pub(super) fn reload_from_disk(&mut self) -> Result<()> {
        let faq = load_entries(&self.file_path)
            .with_context(|| format!("Failed to reload {}", self.file_path.display()))?;
        tracing::info!(
            path = %self.file_path.display(),
            entries = faq.len(),
            "reloaded entries"
        );
        self.replace_entries(faq);
        Ok(())
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Time until the active toast expires.
    pub(super) fn toast_remaining(&self, now: Instant) -> Option<Duration> {
        self.toast
            .as_ref()
            .map(|toast| toast.expires_at.saturating_duration_since(now))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(PathBuf::new(), FaqList::default(), (80, 24))
    }
}
