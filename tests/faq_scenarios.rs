use std::path::Path;

use faqview::faq::{Category, EntryId, load_entries};
use faqview::list::{FaqEvents, FaqList, ListOptions};
use faqview::print::{print_entries, render_plain};

fn fixture_path() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/faq.md"))
}

fn fixture_list() -> FaqList {
    FaqList::new(load_entries(fixture_path()).unwrap())
}

fn visible(list: &FaqList) -> Vec<usize> {
    list.visible_ids().map(|id| id.0).collect()
}

#[test]
fn test_fixture_loads_title_categories_and_entries() {
    let faq = load_entries(fixture_path()).unwrap();
    assert_eq!(faq.title(), Some("Acme Support"));
    assert_eq!(faq.len(), 5);
    assert_eq!(faq.categories(), vec!["billing", "technical"]);
    assert!(faq.entries()[2].answer().contains("1. Sign out"));
    assert!(faq.entries()[3].answer().contains("~/.acme/logs"));
}

#[test]
fn test_category_then_search_then_clear() {
    let mut list = fixture_list();
    assert_eq!(visible(&list), vec![0, 1, 2, 3, 4]);

    list.on_category_select(&Category::Tag("billing".into()));
    assert_eq!(visible(&list), vec![0, 1]);

    list.on_search_input("refund", 1_000);
    assert_eq!(visible(&list), vec![0, 1], "search waits for the quiet period");
    let tick = list.poll(1_300);
    assert!(tick.searched);
    assert_eq!(visible(&list), vec![1]);
    assert_eq!(list.marked_question(EntryId(1)), "Can I get a <mark>refund</mark>?");

    list.on_search_input("zzz", 2_000);
    list.poll(2_300);
    assert!(list.notice_visible());
    assert_eq!(visible(&list), Vec::<usize>::new());

    list.on_search_clear();
    assert!(!list.notice_visible());
    assert_eq!(visible(&list), vec![0, 1]);
    assert_eq!(list.marked_question(EntryId(1)), "Can I get a refund?");
}

#[test]
fn test_search_spans_categories_under_all() {
    let mut list = fixture_list();
    list.search_now("REFUND");
    assert_eq!(visible(&list), vec![1, 4]);
    assert_eq!(
        list.marked_question(EntryId(4)),
        "Does the <mark>refund</mark> button work offline?"
    );
}

#[test]
fn test_accordion_and_reveal() {
    let mut list = fixture_list();
    list.on_toggle(EntryId(2));
    assert_eq!(list.expanded(), Some(EntryId(2)));
    list.on_toggle(EntryId(3));
    assert_eq!(list.expanded(), Some(EntryId(3)));
    assert!(!list.is_expanded(EntryId(2)));

    let tick = list.poll(300);
    assert_eq!(tick.reveal, Some(EntryId(3)));

    list.on_toggle(EntryId(3));
    assert_eq!(list.expanded(), None);
}

#[test]
fn test_render_plain_for_fixture_search() {
    let mut list = fixture_list();
    list.search_now("logs");
    assert_eq!(
        render_plain(&list),
        "[technical] Where are <mark>logs</mark> stored?\n    ~/.acme/<mark>logs</mark> on every platform.\n"
    );
}

#[test]
fn test_print_entries_with_disabled_search_ignores_query() {
    let faq = load_entries(fixture_path()).unwrap();
    let options = ListOptions {
        search_enabled: false,
        ..ListOptions::default()
    };
    let mut out = Vec::new();
    print_entries(
        faq,
        options,
        Some(&Category::Tag("billing".into())),
        Some("zzz"),
        &mut out,
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("[billing] How do I update my card?"));
    assert!(text.contains("[billing] Can I get a refund?"));
    assert!(!text.contains("No results found"));
}
