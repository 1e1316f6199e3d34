//! Non-interactive output: filter and search once, then print plain text.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result, bail};

use crate::faq::{Category, FaqSet};
use crate::list::{FaqList, ListOptions};
use crate::ui::layout::NOTICE_TITLE;

/// Render the visible entries of `list` with their highlight markers.
///
/// Each entry is `[category] question` followed by the answer indented four
/// spaces; entries are separated by a blank line. When a search matched
/// nothing the empty-state notice is rendered instead.
pub fn render_plain(list: &FaqList) -> String {
    if list.notice_visible() {
        return format!("{NOTICE_TITLE}\n");
    }
    let mut out = String::new();
    for (n, id) in list.visible_ids().enumerate() {
        let Some(entry) = list.entry(id) else {
            continue;
        };
        if n > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "[{}] {}", entry.category(), list.marked_question(id));
        let answer = list.marked_answer(id);
        if answer.is_empty() {
            continue;
        }
        for line in answer.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, "    {line}");
            }
        }
    }
    out
}

/// Apply an optional category and query to `faq` and write the result to `out`.
///
/// # Errors
///
/// Fails on an unknown category (there is no interactive fallback here) or
/// when writing to `out` fails.
pub fn print_entries(
    faq: FaqSet,
    options: ListOptions,
    category: Option<&Category>,
    query: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let mut list = FaqList::with_options(faq, options);
    if let Some(category) = category
        && !list.select_category(category)
    {
        bail!(
            "unknown category '{category}' (available: {})",
            list.categories().join(", ")
        );
    }
    if let Some(query) = query {
        list.search_now(query);
    }
    tracing::debug!(
        visible = list.visible_count(),
        total = list.faq().len(),
        "printing entries"
    );
    out.write_all(render_plain(&list).as_bytes())
        .context("Failed to write output")?;
    out.flush().context("Failed to flush output")
}
