use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::Color;

use super::*;
use crate::app::{Message, Model, update};
use crate::faq::{EntryId, FaqSet};
use crate::list::FaqList;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).unwrap()
}

fn create_test_model(width: u16, height: u16) -> Model {
    let faq = FaqSet::from_triples(
        Some("Support".to_string()),
        [
            ("billing", "How do refunds work?", "A refund takes 5 days."),
            ("technical", "Why is sync slow?", "Check your network."),
        ],
    );
    Model::new(PathBuf::from("faq.md"), FaqList::new(faq), (width, height))
}

fn draw(model: &Model, terminal: &mut Terminal<TestBackend>) -> Vec<String> {
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect())
        .collect()
}

#[test]
fn test_render_shows_tabs_search_entries_and_status() {
    let model = create_test_model(60, 10);
    let mut terminal = create_test_terminal(60, 10);
    let lines = draw(&model, &mut terminal);

    assert!(lines[0].contains("0 all"), "{:?}", lines[0]);
    assert!(lines[0].contains("1 billing"));
    assert!(lines[0].contains("2 technical"));
    assert!(lines[1].contains("/ search"));
    assert!(lines[2].contains("\u{25b8} How do refunds work?"));
    assert!(lines[3].contains("\u{25b8} Why is sync slow?"));
    assert!(lines[9].contains("Support"));
    assert!(lines[9].contains("2/2 shown"));
    assert!(lines[9].contains("[all]"));
}

#[test]
fn test_render_expanded_entry_shows_answer() {
    let model = update(create_test_model(60, 10), Message::Toggle(EntryId(0)));
    let mut terminal = create_test_terminal(60, 10);
    let lines = draw(&model, &mut terminal);

    assert!(lines[2].contains("\u{25be} How do refunds work?"));
    assert!(lines[3].contains("A refund takes 5 days."));
    assert!(lines[5].contains("\u{25b8} Why is sync slow?"));
}

#[test]
fn test_render_highlights_matches() {
    let mut model = create_test_model(60, 10);
    model.list.search_now("refund");
    model.relayout();
    let mut terminal = create_test_terminal(60, 10);
    let lines = draw(&model, &mut terminal);
    assert!(lines[2].contains("How do refunds work?"));
    assert!(!lines.iter().any(|l| l.contains("<mark>")));

    // "refund" starts after padding (2) + marker (2) + "How do " (7).
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(11, 2)].symbol(), "r");
    assert_eq!(buffer[(11, 2)].bg, Color::Yellow);
    assert_ne!(buffer[(4, 2)].bg, Color::Yellow);
}

#[test]
fn test_render_notice_when_nothing_matches() {
    let mut model = create_test_model(70, 12);
    model.list.search_now("zzz");
    model.relayout();
    let mut terminal = create_test_terminal(70, 12);
    let lines = draw(&model, &mut terminal);
    let screen = lines.join("\n");
    assert!(screen.contains(layout::NOTICE_TITLE));
    assert!(screen.contains(layout::NOTICE_HINT));
    assert!(lines[11].contains("0/2 shown"));
}

#[test]
fn test_render_focused_search_bar_shows_input() {
    let mut model = create_test_model(60, 10);
    model.search_focused = true;
    model.search_input = "sync".into();
    let mut terminal = create_test_terminal(60, 10);
    let lines = draw(&model, &mut terminal);
    assert!(lines[1].starts_with("/sync"));
    assert!(lines[1].contains("Esc: clear"));
}

#[test]
fn test_render_without_search_bar() {
    let options = crate::list::ListOptions {
        search_enabled: false,
        ..crate::list::ListOptions::default()
    };
    let faq = FaqSet::from_triples(None, [("general", "Only question", "Only answer")]);
    let model = Model::new(
        PathBuf::from("faq.md"),
        FaqList::with_options(faq, options),
        (40, 6),
    );
    let mut terminal = create_test_terminal(40, 6);
    let lines = draw(&model, &mut terminal);
    assert!(lines[1].contains("Only question"));
    assert!(lines[5].contains("faq.md"));
}

#[test]
fn test_render_help_overlay() {
    let model = update(create_test_model(80, 30), Message::ToggleHelp);
    let mut terminal = create_test_terminal(80, 30);
    let lines = draw(&model, &mut terminal);
    let screen = lines.join("\n");
    assert!(screen.contains("Help"));
    assert!(screen.contains("Categories"));
    assert!(screen.contains("Focus search input"));
}

#[test]
fn test_render_watch_indicator() {
    let model = update(create_test_model(80, 10), Message::ToggleWatch);
    let mut terminal = create_test_terminal(80, 10);
    let lines = draw(&model, &mut terminal);
    assert!(lines[9].contains("[watching]"));
}

#[test]
fn test_render_survives_tiny_terminal() {
    let model = create_test_model(8, 3);
    let mut terminal = create_test_terminal(8, 3);
    let _ = draw(&model, &mut terminal);
}

#[test]
fn test_screen_areas_stack_vertically() {
    let areas = screen_areas(ratatui::layout::Rect::new(0, 0, 80, 24), true);
    assert_eq!(areas.tabs.y, 0);
    assert_eq!(areas.search.map(|r| r.y), Some(1));
    assert_eq!(areas.list.y, 2);
    assert_eq!(areas.list.height, 21);
    assert_eq!(areas.status.y, 23);
    assert_eq!(areas.toast().y, 22);
    assert_eq!(areas.list_inner().x, LIST_LEFT_PADDING);
}
