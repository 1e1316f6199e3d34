//! The searchable, filterable FAQ list.
//!
//! [`FaqList`] owns the entries and the single [`ViewState`] of a session and
//! derives everything a view needs from them:
//! - category filter and literal text search (the visible set)
//! - highlight markup for matching entries
//! - accordion expansion (at most one entry open)
//! - the empty-state notice
//!
//! It never touches a terminal. Views drive it through [`FaqEvents`] and read
//! the derived state back; time is passed in explicitly so the search
//! debounce and the reveal delay can be tested headlessly.

mod debounce;

pub use debounce::Debouncer;

use regex::Regex;

use crate::faq::{Category, Entry, EntryId, FaqSet};
use crate::search::{
    Highlighter, Segment, literal_pattern, match_count, match_segments, normalize_term,
};

/// Quiet period before typed search input is evaluated.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
/// Delay between expanding an entry and asking the view to reveal it.
pub const REVEAL_DELAY_MS: u64 = 300;

/// Event handlers a view calls into.
pub trait FaqEvents {
    /// Pointer or keyboard activation of an entry's toggle.
    fn on_toggle(&mut self, id: EntryId);
    /// A category tab was chosen.
    fn on_category_select(&mut self, category: &Category);
    /// The search field changed; evaluation is debounced.
    fn on_search_input(&mut self, text: &str, now_ms: u64);
    /// The search field was cleared explicitly (button or Escape).
    fn on_search_clear(&mut self);
    /// Fire whatever timers are due at `now_ms`.
    fn poll(&mut self, now_ms: u64) -> Tick;
}

/// Behavior switches for a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub search_delay_ms: u64,
    /// When false, search input is ignored (as if the page had no search box).
    pub search_enabled: bool,
    pub highlighter: Highlighter,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            search_delay_ms: SEARCH_DEBOUNCE_MS,
            search_enabled: true,
            highlighter: Highlighter::default(),
        }
    }
}

/// The only mutable UI state of a session. Reset whenever entries are (re)loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub active_category: Category,
    /// Normalized term of the last evaluated search; empty means no search.
    pub search_term: String,
    pub expanded: Option<EntryId>,
}

/// What a [`FaqEvents::poll`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tick {
    /// A debounced search was evaluated.
    pub searched: bool,
    /// The expanded entry should now be scrolled into view.
    pub reveal: Option<EntryId>,
}

impl Tick {
    pub const fn changed(&self) -> bool {
        self.searched || self.reveal.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Marked {
    question: String,
    answer: String,
}

/// Controller for one FAQ list.
#[derive(Debug, Clone)]
pub struct FaqList {
    faq: FaqSet,
    categories: Vec<String>,
    options: ListOptions,
    state: ViewState,
    category_visible: Vec<bool>,
    text_match: Vec<bool>,
    /// Compiled matcher for the active search term.
    pattern: Option<Regex>,
    /// Marker-wrapped text for entries matched by the active term.
    marked: Vec<Option<Marked>>,
    notice: bool,
    clock_ms: u64,
    search_debouncer: Debouncer<String>,
    reveal_debouncer: Debouncer<EntryId>,
}

impl Default for FaqList {
    fn default() -> Self {
        Self::new(FaqSet::default())
    }
}

impl FaqList {
    pub fn new(faq: FaqSet) -> Self {
        Self::with_options(faq, ListOptions::default())
    }

    pub fn with_options(faq: FaqSet, options: ListOptions) -> Self {
        let count = faq.len();
        let categories = faq.categories();
        let search_debouncer = Debouncer::new(options.search_delay_ms);
        Self {
            faq,
            categories,
            options,
            state: ViewState::default(),
            category_visible: vec![true; count],
            text_match: vec![true; count],
            pattern: None,
            marked: vec![None; count],
            notice: false,
            clock_ms: 0,
            search_debouncer,
            reveal_debouncer: Debouncer::new(REVEAL_DELAY_MS),
        }
    }

    pub const fn faq(&self) -> &FaqSet {
        &self.faq
    }

    pub const fn options(&self) -> &ListOptions {
        &self.options
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Known category tags in first-appearance order (without `all`).
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Tab order: `all` followed by every known tag.
    pub fn category_tabs(&self) -> Vec<Category> {
        std::iter::once(Category::All)
            .chain(self.categories.iter().cloned().map(Category::Tag))
            .collect()
    }

    pub fn is_known(&self, category: &Category) -> bool {
        match category {
            Category::All => true,
            Category::Tag(tag) => self.categories.iter().any(|c| c == tag),
        }
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.faq.get(id)
    }

    pub fn is_visible(&self, id: EntryId) -> bool {
        let idx = id.index();
        self.category_visible.get(idx).copied().unwrap_or(false)
            && self.text_match.get(idx).copied().unwrap_or(false)
    }

    pub fn is_expanded(&self, id: EntryId) -> bool {
        self.state.expanded == Some(id)
    }

    pub const fn expanded(&self) -> Option<EntryId> {
        self.state.expanded
    }

    /// Entries in the visible set, in source order.
    pub fn visible_ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.faq
            .entries()
            .iter()
            .map(Entry::id)
            .filter(|id| self.is_visible(*id))
    }

    pub fn visible_count(&self) -> usize {
        self.visible_ids().count()
    }

    /// Whether the "no results" notice should be shown.
    pub const fn notice_visible(&self) -> bool {
        self.notice
    }

    /// True when an evaluated, non-empty search term restricts the list.
    pub fn search_active(&self) -> bool {
        !self.state.search_term.is_empty()
    }

    /// Raw text still waiting for its debounce delay, if any.
    pub fn pending_search(&self) -> Option<&str> {
        self.search_debouncer.pending().map(String::as_str)
    }

    /// Question text, wrapped in highlight markers when the active search matches it.
    pub fn marked_question(&self, id: EntryId) -> &str {
        match self.marked.get(id.index()) {
            Some(Some(marked)) => &marked.question,
            _ => self.entry(id).map_or("", Entry::question),
        }
    }

    /// Answer text, wrapped in highlight markers when the active search matches it.
    pub fn marked_answer(&self, id: EntryId) -> &str {
        match self.marked.get(id.index()) {
            Some(Some(marked)) => &marked.answer,
            _ => self.entry(id).map_or("", Entry::answer),
        }
    }

    /// Question split into plain and matched runs for styled rendering.
    pub fn question_segments(&self, id: EntryId) -> Vec<Segment<'_>> {
        let text = self.entry(id).map_or("", Entry::question);
        match_segments(text, self.pattern_for(id))
    }

    /// Answer split into plain and matched runs for styled rendering.
    pub fn answer_segments(&self, id: EntryId) -> Vec<Segment<'_>> {
        let text = self.entry(id).map_or("", Entry::answer);
        match_segments(text, self.pattern_for(id))
    }

    /// Highlighted matches in an entry's question and answer.
    pub fn match_count(&self, id: EntryId) -> usize {
        let Some(entry) = self.entry(id) else {
            return 0;
        };
        let pattern = self.pattern_for(id);
        match_count(entry.question(), pattern) + match_count(entry.answer(), pattern)
    }

    fn pattern_for(&self, id: EntryId) -> Option<&Regex> {
        match self.marked.get(id.index()) {
            Some(Some(_)) => self.pattern.as_ref(),
            _ => None,
        }
    }

    /// Earliest time at which [`FaqEvents::poll`] has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        match (
            self.search_debouncer.deadline(),
            self.reveal_debouncer.deadline(),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Advance the internal clock used to schedule the reveal after a toggle.
    pub fn sync_clock(&mut self, now_ms: u64) {
        self.clock_ms = self.clock_ms.max(now_ms);
    }

    /// Expand or collapse an entry. Returns false when the entry is not visible.
    pub fn toggle(&mut self, id: EntryId) -> bool {
        if !self.is_visible(id) {
            tracing::debug!(%id, "toggle ignored: entry not visible");
            return false;
        }
        if self.state.expanded == Some(id) {
            self.state.expanded = None;
            self.reveal_debouncer.cancel();
            tracing::debug!(%id, "collapsed");
        } else {
            self.state.expanded = Some(id);
            self.reveal_debouncer.schedule(id, self.clock_ms);
            tracing::debug!(%id, "expanded");
        }
        true
    }

    /// Switch the category filter. Unknown tags are rejected and change nothing.
    pub fn select_category(&mut self, category: &Category) -> bool {
        if !self.is_known(category) {
            tracing::warn!(category = %category, "unknown category ignored");
            return false;
        }
        self.state.active_category = category.clone();
        for (idx, entry) in self.faq.entries().iter().enumerate() {
            self.category_visible[idx] = category.matches(entry.category());
        }
        // Typed-but-pending input wins over the last evaluated term.
        if let Some(text) = self.search_debouncer.pending().cloned() {
            self.search_debouncer.cancel();
            self.run_search(&text);
        } else if self.search_active() {
            let term = self.state.search_term.clone();
            self.run_search(&term);
        }
        self.collapse_if_hidden();
        tracing::debug!(
            category = %category,
            visible = self.visible_count(),
            "category selected"
        );
        true
    }

    /// Queue a search evaluation after the debounce delay, replacing any pending one.
    pub fn input_search(&mut self, text: &str, now_ms: u64) {
        if !self.options.search_enabled {
            return;
        }
        self.clock_ms = now_ms;
        self.search_debouncer.schedule(text.to_string(), now_ms);
    }

    /// Cancel any pending evaluation and drop the search entirely.
    pub fn clear_search(&mut self) {
        self.search_debouncer.cancel();
        self.run_search("");
    }

    /// Evaluate a search immediately, bypassing the debounce.
    pub fn search_now(&mut self, text: &str) {
        if !self.options.search_enabled {
            return;
        }
        self.search_debouncer.cancel();
        self.run_search(text);
    }

    fn run_search(&mut self, raw: &str) {
        let term = normalize_term(raw).to_string();
        self.marked.fill(None);
        if term.is_empty() {
            self.pattern = None;
            self.text_match.fill(true);
            self.notice = false;
        } else {
            // A pattern that fails to build matches nothing.
            self.pattern = literal_pattern(&term);
            let highlighter = &self.options.highlighter;
            let mut any = false;
            for (idx, entry) in self.faq.entries().iter().enumerate() {
                let hit = self.category_visible[idx]
                    && self.pattern.as_ref().is_some_and(|pattern| {
                        pattern.is_match(entry.question()) || pattern.is_match(entry.answer())
                    });
                self.text_match[idx] = hit;
                if hit && let Some(pattern) = self.pattern.as_ref() {
                    self.marked[idx] = Some(Marked {
                        question: highlighter.wrap(entry.question(), pattern),
                        answer: highlighter.wrap(entry.answer(), pattern),
                    });
                    any = true;
                }
            }
            self.notice = !any;
        }
        self.state.search_term = term;
        self.collapse_if_hidden();
        tracing::debug!(
            term = %self.state.search_term,
            visible = self.visible_count(),
            notice = self.notice,
            "search evaluated"
        );
    }

    fn collapse_if_hidden(&mut self) {
        if let Some(id) = self.state.expanded
            && !self.is_visible(id)
        {
            self.state.expanded = None;
            self.reveal_debouncer.cancel();
            tracing::debug!(%id, "collapsed: no longer visible");
        }
    }
}

impl FaqEvents for FaqList {
    fn on_toggle(&mut self, id: EntryId) {
        self.toggle(id);
    }

    fn on_category_select(&mut self, category: &Category) {
        self.select_category(category);
    }

    fn on_search_input(&mut self, text: &str, now_ms: u64) {
        self.input_search(text, now_ms);
    }

    fn on_search_clear(&mut self) {
        self.clear_search();
    }

    fn poll(&mut self, now_ms: u64) -> Tick {
        self.clock_ms = now_ms;
        let searched = match self.search_debouncer.take_ready(now_ms) {
            Some(text) => {
                self.run_search(&text);
                true
            }
            None => false,
        };
        let reveal = self
            .reveal_debouncer
            .take_ready(now_ms)
            .filter(|id| self.state.expanded == Some(*id));
        Tick { searched, reveal }
    }
}
