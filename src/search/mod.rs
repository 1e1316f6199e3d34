//! Literal, case-insensitive search and match highlighting.
//!
//! Search terms are raw user input, never patterns: they are escaped before
//! being handed to the regex engine. Matching and highlighting share one
//! compiled pattern, so an entry is shown exactly when it has a highlight.
//!
//! Highlights are always computed from the original text. Marker-like text
//! inside an entry is content, not a previous highlight.

use regex::{Regex, RegexBuilder};

pub const DEFAULT_MARK_OPEN: &str = "<mark>";
pub const DEFAULT_MARK_CLOSE: &str = "</mark>";

/// Normalize a raw search input: surrounding whitespace is not significant.
pub fn normalize_term(raw: &str) -> &str {
    raw.trim()
}

/// Escape a term so it matches literally in a regex.
pub fn escape_term(term: &str) -> String {
    regex::escape(term)
}

/// Build a case-insensitive literal matcher, or `None` for an empty term.
pub fn literal_pattern(term: &str) -> Option<Regex> {
    let term = normalize_term(term);
    if term.is_empty() {
        return None;
    }
    RegexBuilder::new(&escape_term(term))
        .case_insensitive(true)
        .build()
        .ok()
}

/// A run of text that is either plain or a highlighted match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Split `text` into plain and matched runs. Without a pattern the whole text is plain.
///
/// ```
/// use faqview::search::{Segment, literal_pattern, match_segments};
///
/// let pattern = literal_pattern("pay");
/// let segments = match_segments("Pay now", pattern.as_ref());
/// assert_eq!(segments[0], Segment { text: "Pay", matched: true });
/// assert_eq!(segments[1], Segment { text: " now", matched: false });
/// ```
pub fn match_segments<'a>(text: &'a str, pattern: Option<&Regex>) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut last = 0;
    if let Some(pattern) = pattern {
        for found in pattern.find_iter(text) {
            if found.start() > last {
                segments.push(Segment {
                    text: &text[last..found.start()],
                    matched: false,
                });
            }
            if !found.as_str().is_empty() {
                segments.push(Segment {
                    text: found.as_str(),
                    matched: true,
                });
            }
            last = found.end();
        }
    }
    if last < text.len() {
        segments.push(Segment {
            text: &text[last..],
            matched: false,
        });
    }
    segments
}

/// Number of matches of `pattern` in `text`.
pub fn match_count(text: &str, pattern: Option<&Regex>) -> usize {
    pattern.map_or(0, |pattern| pattern.find_iter(text).count())
}

/// Inserts and removes match markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    open: String,
    close: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_MARK_OPEN, DEFAULT_MARK_CLOSE)
    }
}

impl Highlighter {
    /// Create a highlighter with custom markers. Empty markers fall back to the defaults.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        let open = open.into();
        let close = close.into();
        if open.is_empty() || close.is_empty() {
            return Self::default();
        }
        Self { open, close }
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// Wrap every match of `pattern` in `text`. `text` is taken as-is.
    pub fn wrap(&self, text: &str, pattern: &Regex) -> String {
        pattern
            .replace_all(text, |caps: &regex::Captures<'_>| {
                format!("{}{}{}", self.open, &caps[0], self.close)
            })
            .into_owned()
    }

    /// Remove every complete `open..close` marker pair, keeping the inner text.
    pub fn strip(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(&self.open) {
            let after_open = &rest[start + self.open.len()..];
            let Some(end) = after_open.find(&self.close) else {
                break;
            };
            out.push_str(&rest[..start]);
            out.push_str(&after_open[..end]);
            rest = &after_open[end + self.close.len()..];
        }
        out.push_str(rest);
        out
    }

    /// Re-highlight text that may carry markers from an earlier call.
    ///
    /// Old markers are stripped before wrapping, so this is idempotent. The
    /// list never feeds its output back in; it wraps the original text.
    ///
    /// ```
    /// use faqview::search::Highlighter;
    ///
    /// let hl = Highlighter::default();
    /// let once = hl.highlight("Refund policy: refunds take 5 days", "refund");
    /// assert_eq!(once, "<mark>Refund</mark> policy: <mark>refund</mark>s take 5 days");
    /// assert_eq!(hl.highlight(&once, "refund"), once);
    /// ```
    pub fn highlight(&self, text: &str, term: &str) -> String {
        let plain = self.strip(text);
        match literal_pattern(term) {
            Some(pattern) => self.wrap(&plain, &pattern),
            None => plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_wraps_every_occurrence_case_insensitively() {
        let hl = Highlighter::default();
        assert_eq!(
            hl.highlight("Cache the CACHE cache", "cache"),
            "<mark>Cache</mark> the <mark>CACHE</mark> <mark>cache</mark>"
        );
    }

    #[test]
    fn test_highlight_is_idempotent() {
        let hl = Highlighter::default();
        let once = hl.highlight("alpha beta alpha", "alpha");
        let twice = hl.highlight(&once, "alpha");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_highlight_with_new_term_replaces_old_markers() {
        let hl = Highlighter::default();
        let first = hl.highlight("refund and return", "refund");
        let second = hl.highlight(&first, "return");
        assert_eq!(second, "refund and <mark>return</mark>");
    }

    #[test]
    fn test_overlapping_terms_do_not_nest() {
        let hl = Highlighter::default();
        let first = hl.highlight("mark my words", "mark");
        let second = hl.highlight(&first, "mar");
        assert_eq!(second, "<mark>mar</mark>k my words");
    }

    #[test]
    fn test_empty_term_strips_markers() {
        let hl = Highlighter::default();
        let marked = hl.highlight("hello world", "world");
        assert_eq!(hl.highlight(&marked, ""), "hello world");
        assert_eq!(hl.highlight(&marked, "   "), "hello world");
    }

    #[test]
    fn test_metacharacters_match_literally() {
        let hl = Highlighter::default();
        let text = "Intro to C++ (intro) and C (basics)";
        assert_eq!(
            hl.highlight(text, "C++ (intro)"),
            "Intro to <mark>C++ (intro)</mark> and C (basics)"
        );
        for term in [".", "*", "+", "?", "^", "$", "{", "}", "(", ")", "|", "[", "]", "\\"] {
            let pattern = literal_pattern(term);
            assert_eq!(
                match_count("a.b*c+d?e^f$g{h}i(j)k|l[m]n\\o", pattern.as_ref()),
                1,
                "term {term:?}"
            );
        }
    }

    #[test]
    fn test_highlight_trims_term() {
        let hl = Highlighter::default();
        assert_eq!(hl.highlight("a refund", " refund "), "a <mark>refund</mark>");
    }

    #[test]
    fn test_custom_markers() {
        let hl = Highlighter::new("[[", "]]");
        let out = hl.highlight("find me", "me");
        assert_eq!(out, "find [[me]]");
        assert_eq!(hl.strip(&out), "find me");
    }

    #[test]
    fn test_empty_custom_marker_falls_back_to_default() {
        assert_eq!(Highlighter::new("", "]"), Highlighter::default());
    }

    #[test]
    fn test_strip_leaves_unpaired_open_marker() {
        let hl = Highlighter::default();
        assert_eq!(hl.strip("a <mark>b"), "a <mark>b");
    }

    #[test]
    fn test_match_segments_split_text() {
        let pattern = literal_pattern("pay");
        let segments = match_segments("pay the bill, pay now", pattern.as_ref());
        assert_eq!(
            segments,
            vec![
                Segment { text: "pay", matched: true },
                Segment { text: " the bill, ", matched: false },
                Segment { text: "pay", matched: true },
                Segment { text: " now", matched: false },
            ]
        );
    }

    #[test]
    fn test_match_segments_treat_marker_text_as_content() {
        let text = "Wrap text in <mark>tags</mark> like this.";
        assert_eq!(
            match_segments(text, None),
            vec![Segment { text, matched: false }]
        );
        let pattern = literal_pattern("mark");
        assert_eq!(match_count(text, pattern.as_ref()), 2);
        assert_eq!(match_count(text, None), 0);
    }

    #[test]
    fn test_wrap_keeps_existing_marker_text() {
        let hl = Highlighter::default();
        let pattern = literal_pattern("like").unwrap();
        assert_eq!(
            hl.wrap("Wrap text in <mark>tags</mark> like this.", &pattern),
            "Wrap text in <mark>tags</mark> <mark>like</mark> this."
        );
    }

    #[test]
    fn test_pattern_folds_case_like_highlighting() {
        let pattern = literal_pattern("refund").unwrap();
        assert!(pattern.is_match("How do REFUNDS work"));
        assert!(!pattern.is_match("How do returns work"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn highlight_twice_equals_once(
                text in "[a-zA-Z .*+?()|\\[\\]{}^$\\\\]{0,60}",
                term in "[a-zA-Z .*+?()]{0,6}",
            ) {
                let hl = Highlighter::default();
                let once = hl.highlight(&text, &term);
                let twice = hl.highlight(&once, &term);
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn strip_restores_plain_text(
                text in "[a-zA-Z .*+?()]{0,60}",
                term in "[a-zA-Z]{1,4}",
            ) {
                let hl = Highlighter::default();
                let marked = hl.highlight(&text, &term);
                prop_assert_eq!(hl.strip(&marked), text);
            }

            #[test]
            fn rehighlight_with_other_term_never_nests(
                text in "[a-c ]{0,40}",
                first in "[a-c]{1,3}",
                second in "[a-c]{1,3}",
            ) {
                let hl = Highlighter::default();
                let marked = hl.highlight(&hl.highlight(&text, &first), &second);
                prop_assert_eq!(marked, hl.highlight(&text, &second));
            }
        }
    }
}
