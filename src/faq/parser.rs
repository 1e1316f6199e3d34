//! Markdown FAQ parsing with comrak.
//!
//! Layout convention:
//! - `# Title` names the FAQ (first level-1 heading only)
//! - `## Category` opens a category section
//! - `### Question` opens an entry; everything below it up to the next
//!   level-2 or level-3 heading is the answer

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};

use super::error::{LoadError, Result};
use super::types::{FaqSet, normalize_tag};

/// Category assigned to questions that appear before any `##` heading.
pub const DEFAULT_CATEGORY: &str = "general";

struct PendingEntry {
    category: String,
    question: String,
    blocks: Vec<String>,
}

impl PendingEntry {
    fn finish(self) -> (String, String, String) {
        (self.category, self.question, self.blocks.join("\n\n"))
    }
}

/// Parse markdown source into a [`FaqSet`].
///
/// # Example
///
/// ```
/// use faqview::faq::parse_markdown;
///
/// let faq = parse_markdown("## Billing\n\n### Can I get a refund?\n\nYes.").unwrap();
/// assert_eq!(faq.len(), 1);
/// assert_eq!(faq.entries()[0].category(), "billing");
/// ```
///
/// # Errors
///
/// Returns [`LoadError::EmptyQuestion`] when a question heading has no text.
pub fn parse_markdown(source: &str) -> Result<FaqSet> {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, source, &options);

    let mut title: Option<String> = None;
    let mut category = DEFAULT_CATEGORY.to_string();
    let mut current: Option<PendingEntry> = None;
    let mut finished: Vec<(String, String, String)> = Vec::new();

    for node in root.children() {
        let heading_level = match &node.data.borrow().value {
            NodeValue::Heading(heading) => Some(heading.level),
            _ => None,
        };
        match heading_level {
            Some(1) => {
                if title.is_none() {
                    title = Some(extract_text(node).trim().to_string());
                }
            }
            Some(2) => {
                finished.extend(current.take().map(PendingEntry::finish));
                category = normalize_tag(&extract_text(node));
            }
            Some(3) => {
                finished.extend(current.take().map(PendingEntry::finish));
                let question = extract_text(node).trim().to_string();
                if question.is_empty() {
                    return Err(LoadError::EmptyQuestion {
                        index: finished.len(),
                    });
                }
                current = Some(PendingEntry {
                    category: category.clone(),
                    question,
                    blocks: Vec::new(),
                });
            }
            _ => {
                // Intro text before the first question has no owner.
                if let Some(entry) = current.as_mut() {
                    let text = block_text(node);
                    if !text.trim().is_empty() {
                        entry.blocks.push(text);
                    }
                }
            }
        }
    }
    finished.extend(current.take().map(PendingEntry::finish));

    tracing::debug!(entries = finished.len(), "parsed markdown FAQ");
    Ok(FaqSet::from_triples(title, finished))
}

fn create_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

/// Plain text of one top-level block, roughly what a browser's `textContent` gives.
fn block_text<'a>(node: &'a AstNode<'a>) -> String {
    match &node.data.borrow().value {
        NodeValue::CodeBlock(code) => code.literal.trim_end().to_string(),
        NodeValue::List(list) => {
            let mut items = Vec::new();
            for (index, item) in node.children().enumerate() {
                let marker = match list.list_type {
                    ListType::Bullet => "-".to_string(),
                    ListType::Ordered => format!("{}.", list.start + index),
                };
                let body = item
                    .children()
                    .map(block_text)
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                items.push(format!("{marker} {body}"));
            }
            items.join("\n")
        }
        NodeValue::BlockQuote => node
            .children()
            .map(block_text)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => extract_text(node).trim().to_string(),
    }
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::SoftBreak => text.push(' '),
        NodeValue::LineBreak => text.push('\n'),
        NodeValue::List(_) => {
            text.push('\n');
            text.push_str(&block_text(node));
        }
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_become_categories() {
        let md = "# Help Center\n\n## Billing\n\n### How do refunds work?\n\nRefunds take 5 days.\n\n## Technical\n\n### Why is it slow?\n\nCheck your network.\n";
        let faq = parse_markdown(md).unwrap();
        assert_eq!(faq.title(), Some("Help Center"));
        assert_eq!(faq.len(), 2);
        assert_eq!(faq.entries()[0].category(), "billing");
        assert_eq!(faq.entries()[0].question(), "How do refunds work?");
        assert_eq!(faq.entries()[0].answer(), "Refunds take 5 days.");
        assert_eq!(faq.entries()[1].category(), "technical");
    }

    #[test]
    fn test_question_without_section_is_general() {
        let faq = parse_markdown("### Who are you?\n\nA team.").unwrap();
        assert_eq!(faq.entries()[0].category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_answer_joins_blocks_and_lists() {
        let md = "## Account\n\n### How do I log in?\n\nUse the *portal*\nwith `sso`.\n\n- open page\n- click login\n";
        let faq = parse_markdown(md).unwrap();
        assert_eq!(
            faq.entries()[0].answer(),
            "Use the portal with sso.\n\n- open page\n- click login"
        );
    }

    #[test]
    fn test_intro_text_before_questions_is_ignored() {
        let md = "# FAQ\n\nWelcome to the FAQ.\n\n## General\n\nSection intro.\n\n### Q?\n\nA.";
        let faq = parse_markdown(md).unwrap();
        assert_eq!(faq.len(), 1);
        assert_eq!(faq.entries()[0].answer(), "A.");
    }

    #[test]
    fn test_empty_question_is_rejected() {
        let err = parse_markdown("## Billing\n\n### Q1\n\nA1\n\n###\n\nA2").unwrap_err();
        assert!(matches!(err, LoadError::EmptyQuestion { index: 1 }));
    }

    #[test]
    fn test_code_block_kept_verbatim() {
        let md = "### How do I install?\n\n```sh\ncargo install faqview\n```\n";
        let faq = parse_markdown(md).unwrap();
        assert_eq!(faq.entries()[0].answer(), "cargo install faqview");
    }
}
