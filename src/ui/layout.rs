//! Flattening the list into terminal rows.
//!
//! Rendering and mouse hit-testing both work on the same [`Row`] vector, so a
//! click maps back to exactly what was drawn at that position.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::faq::{Category, EntryId};
use crate::list::FaqList;
use crate::search::Segment;

pub const MARKER_COLLAPSED: &str = "\u{25b8} ";
pub const MARKER_EXPANDED: &str = "\u{25be} ";
const QUESTION_INDENT: usize = 2;
const ANSWER_INDENT: usize = 4;

pub const NOTICE_TITLE: &str = "No results found";
pub const NOTICE_HINT: &str = "Try adjusting your search terms or browse by category.";
pub const NOTICE_ACTION: &str = "Esc or click here: clear search";

/// A run of text on one row, either plain or a search match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub matched: bool,
}

impl Fragment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matched: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A wrapped line of a question; `first` carries the expand marker.
    Question { id: EntryId, first: bool },
    Answer(EntryId),
    Spacer,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub fragments: Vec<Fragment>,
}

impl Row {
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    pub const fn entry(&self) -> Option<EntryId> {
        match self.kind {
            RowKind::Question { id, .. } | RowKind::Answer(id) => Some(id),
            RowKind::Spacer | RowKind::Notice => None,
        }
    }

    const fn spacer() -> Self {
        Self {
            kind: RowKind::Spacer,
            fragments: Vec::new(),
        }
    }
}

/// Lay out every visible entry (or the empty-state notice) for `width` columns.
pub fn build_rows(list: &FaqList, width: u16) -> Vec<Row> {
    let width = usize::from(width).max(ANSWER_INDENT + 1);
    let mut rows = Vec::new();

    for id in list.visible_ids() {
        let expanded = list.is_expanded(id);
        let marker = if expanded {
            MARKER_EXPANDED
        } else {
            MARKER_COLLAPSED
        };
        let question = list.question_segments(id);
        for (idx, line) in wrap_segments(&question, width - QUESTION_INDENT)
            .into_iter()
            .enumerate()
        {
            let prefix = if idx == 0 { marker } else { "  " };
            rows.push(Row {
                kind: RowKind::Question { id, first: idx == 0 },
                fragments: prefixed(prefix, line),
            });
        }
        if expanded {
            push_answer_rows(&mut rows, id, &list.answer_segments(id), width);
            rows.push(Row::spacer());
        }
    }

    if list.notice_visible() {
        for text in ["", NOTICE_TITLE, NOTICE_HINT, "", NOTICE_ACTION] {
            rows.push(Row {
                kind: RowKind::Notice,
                fragments: vec![Fragment::plain(format!("  {text}"))],
            });
        }
    }
    rows
}

fn push_answer_rows(rows: &mut Vec<Row>, id: EntryId, segments: &[Segment<'_>], width: usize) {
    let indent = " ".repeat(ANSWER_INDENT);
    for line in split_lines(segments) {
        for wrapped in wrap_segments(&line, width - ANSWER_INDENT) {
            rows.push(Row {
                kind: RowKind::Answer(id),
                fragments: prefixed(&indent, wrapped),
            });
        }
    }
}

fn prefixed(prefix: &str, mut line: Vec<Fragment>) -> Vec<Fragment> {
    line.insert(0, Fragment::plain(prefix));
    line
}

/// Split segments at hard line breaks, keeping match flags.
fn split_lines<'a>(segments: &[Segment<'a>]) -> Vec<Vec<Segment<'a>>> {
    let mut lines = vec![Vec::new()];
    for segment in segments {
        let mut parts = segment.text.split('\n');
        if let Some(first) = parts.next()
            && !first.is_empty()
            && let Some(current) = lines.last_mut()
        {
            current.push(Segment {
                text: first,
                matched: segment.matched,
            });
        }
        for part in parts {
            let mut line = Vec::new();
            if !part.is_empty() {
                line.push(Segment {
                    text: part,
                    matched: segment.matched,
                });
            }
            lines.push(line);
        }
    }
    lines
}

/// Greedy word wrap over highlighted segments.
///
/// Words longer than `width` are split at character boundaries. An empty
/// input produces a single empty line.
pub fn wrap_segments(segments: &[Segment<'_>], width: usize) -> Vec<Vec<Fragment>> {
    let width = width.max(1);
    let cells: Vec<(char, bool)> = segments
        .iter()
        .flat_map(|s| s.text.chars().map(move |c| (c, s.matched)))
        .collect();

    let mut lines: Vec<Vec<(char, bool)>> = Vec::new();
    let mut current: Vec<(char, bool)> = Vec::new();
    let mut current_width = 0usize;

    for token in cells.chunk_by(|a, b| a.0.is_whitespace() == b.0.is_whitespace()) {
        let token_width: usize = token.iter().map(|(c, _)| char_width(*c)).sum();
        if token[0].0.is_whitespace() {
            if current_width == 0 {
                continue;
            }
            if current_width + token_width <= width {
                current.extend_from_slice(token);
                current_width += token_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            continue;
        }
        if current_width > 0 && current_width + token_width > width {
            while current.last().is_some_and(|(c, _)| c.is_whitespace()) {
                current.pop();
            }
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if token_width <= width {
            current.extend_from_slice(token);
            current_width += token_width;
            continue;
        }
        for &cell in token {
            let w = char_width(cell.0);
            if current_width > 0 && current_width + w > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(cell);
            current_width += w;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines.into_iter().map(|line| to_fragments(&line)).collect()
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

fn to_fragments(cells: &[(char, bool)]) -> Vec<Fragment> {
    let mut fragments: Vec<Fragment> = Vec::new();
    for &(c, matched) in cells {
        match fragments.last_mut() {
            Some(last) if last.matched == matched => last.text.push(c),
            _ => fragments.push(Fragment {
                text: c.to_string(),
                matched,
            }),
        }
    }
    fragments
}

/// Row span (`start..end`) of an entry: its question plus any answer rows.
pub fn entry_row_range(rows: &[Row], id: EntryId) -> Option<std::ops::Range<usize>> {
    let start = rows.iter().position(|r| r.entry() == Some(id))?;
    let len = rows[start..]
        .iter()
        .take_while(|r| r.entry() == Some(id))
        .count();
    Some(start..start + len)
}

/// Tab label as drawn in the category bar. Tabs 0-9 show their shortcut digit.
pub fn tab_label(index: usize, category: &Category) -> String {
    if index <= 9 {
        format!("{index} {}", category.label())
    } else {
        category.label().to_string()
    }
}

/// Column range of every tab in a bar starting at column 0.
///
/// Each tab is drawn as ` label ` followed by a one-column divider.
pub fn tab_ranges(tabs: &[Category]) -> Vec<std::ops::Range<u16>> {
    let mut x = 0u16;
    tabs.iter()
        .enumerate()
        .map(|(idx, category)| {
            let label_width = u16::try_from(tab_label(idx, category).width()).unwrap_or(u16::MAX);
            let start = x;
            let end = start.saturating_add(label_width).saturating_add(2);
            x = end.saturating_add(1);
            start..end
        })
        .collect()
}

/// Index of the tab under column `x`, if any.
pub fn tab_at(tabs: &[Category], x: u16) -> Option<usize> {
    tab_ranges(tabs).iter().position(|range| range.contains(&x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faq::FaqSet;

    fn seg(text: &str, matched: bool) -> Segment<'_> {
        Segment { text, matched }
    }

    fn texts(lines: &[Vec<Fragment>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.iter().map(|f| f.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let lines = wrap_segments(&[seg("the quick brown fox", false)], 10);
        assert_eq!(texts(&lines), vec!["the quick", "brown fox"]);
    }

    #[test]
    fn test_wrap_keeps_match_flags_across_lines() {
        let lines = wrap_segments(
            &[seg("pay the ", false), seg("refund", true), seg(" now", false)],
            8,
        );
        assert_eq!(texts(&lines), vec!["pay the", "refund", "now"]);
        assert_eq!(
            lines[1],
            vec![Fragment {
                text: "refund".to_string(),
                matched: true
            }]
        );
    }

    #[test]
    fn test_wrap_match_inside_word_stays_together() {
        let lines = wrap_segments(&[seg("re", true), seg("fund policy", false)], 7);
        assert_eq!(texts(&lines), vec!["refund", "policy"]);
        assert!(lines[0][0].matched);
        assert!(!lines[0][1].matched);
    }

    #[test]
    fn test_wrap_splits_overlong_word() {
        let lines = wrap_segments(&[seg("abcdefghij", false)], 4);
        assert_eq!(texts(&lines), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_counts_wide_characters() {
        let lines = wrap_segments(&[seg("日本語 テキスト", false)], 6);
        assert_eq!(texts(&lines), vec!["日本語", "テキス", "ト"]);
    }

    #[test]
    fn test_wrap_empty_yields_one_empty_line() {
        assert_eq!(wrap_segments(&[], 10), vec![Vec::<Fragment>::new()]);
    }

    #[test]
    fn test_split_lines_keeps_blank_paragraph_gap() {
        let lines = split_lines(&[seg("one\n\ntwo", false)]);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
    }

    fn sample_list() -> FaqList {
        FaqList::new(FaqSet::from_triples(
            None,
            [
                ("billing", "How do refunds work?", "Refunds take 5 days.\n\nAsk support."),
                ("technical", "Why is sync slow?", "Check the network."),
            ],
        ))
    }

    #[test]
    fn test_collapsed_entries_show_only_questions() {
        let rows = build_rows(&sample_list(), 40);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(), "\u{25b8} How do refunds work?");
        assert_eq!(rows[1].kind, RowKind::Question { id: EntryId(1), first: true });
    }

    #[test]
    fn test_expanded_entry_shows_answer_and_spacer() {
        let mut list = sample_list();
        list.toggle(EntryId(0));
        let rows = build_rows(&list, 40);
        let texts: Vec<String> = rows.iter().map(Row::text).collect();
        assert_eq!(
            texts,
            vec![
                "\u{25be} How do refunds work?",
                "    Refunds take 5 days.",
                "    ",
                "    Ask support.",
                "",
                "\u{25b8} Why is sync slow?",
            ]
        );
        assert_eq!(entry_row_range(&rows, EntryId(0)), Some(0..4));
        assert_eq!(entry_row_range(&rows, EntryId(1)), Some(5..6));
    }

    #[test]
    fn test_matches_become_flagged_fragments() {
        let mut list = sample_list();
        list.search_now("refund");
        let rows = build_rows(&list, 40);
        assert_eq!(rows.len(), 1);
        assert!(
            rows[0]
                .fragments
                .iter()
                .any(|f| f.matched && f.text == "refund")
        );
    }

    #[test]
    fn test_notice_rows_when_search_finds_nothing() {
        let mut list = sample_list();
        list.search_now("zzz");
        let rows = build_rows(&list, 60);
        assert!(rows.iter().all(|r| r.kind == RowKind::Notice));
        assert!(rows.iter().any(|r| r.text().contains(NOTICE_TITLE)));
    }

    #[test]
    fn test_tab_ranges_and_hit_testing() {
        let tabs = vec![
            Category::All,
            Category::Tag("billing".to_string()),
            Category::Tag("technical".to_string()),
        ];
        // " 0 all " | " 1 billing " | " 2 technical "
        assert_eq!(tab_ranges(&tabs), vec![0..7, 8..19, 20..33]);
        assert_eq!(tab_at(&tabs, 3), Some(0));
        assert_eq!(tab_at(&tabs, 7), None);
        assert_eq!(tab_at(&tabs, 8), Some(1));
        assert_eq!(tab_at(&tabs, 32), Some(2));
        assert_eq!(tab_at(&tabs, 40), None);
    }
}
