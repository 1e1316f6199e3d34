use std::fmt;

/// Stable identifier of an entry: its zero-based position in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub usize);

impl EntryId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One FAQ record. Entries are never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    category: String,
    question: String,
    answer: String,
}

impl Entry {
    pub fn new(
        id: EntryId,
        category: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub const fn id(&self) -> EntryId {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Canonical form of a category tag: trimmed and lowercased.
///
/// Every loader and every user-supplied token goes through this, so `Billing`
/// on the command line selects the `billing` tab whatever the source format.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Category filter token: a concrete tag or the `all` wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    All,
    Tag(String),
}

impl Category {
    /// Parse a user-supplied token. `all` (any case) is the wildcard.
    pub fn parse(token: &str) -> Self {
        let tag = normalize_tag(token);
        if tag == "all" {
            Self::All
        } else {
            Self::Tag(tag)
        }
    }

    pub fn matches(&self, tag: &str) -> bool {
        match self {
            Self::All => true,
            Self::Tag(t) => t == tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Tag(t) => t,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A loaded FAQ: optional title plus its entries in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqSet {
    title: Option<String>,
    entries: Vec<Entry>,
}

impl FaqSet {
    /// Build a set from `(category, question, answer)` triples. Ids follow input order.
    pub fn from_triples<I, C, Q, A>(title: Option<String>, triples: I) -> Self
    where
        I: IntoIterator<Item = (C, Q, A)>,
        C: Into<String>,
        Q: Into<String>,
        A: Into<String>,
    {
        let entries = triples
            .into_iter()
            .enumerate()
            .map(|(idx, (c, q, a))| Entry::new(EntryId(idx), c, q, a))
            .collect();
        Self { title, entries }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct category tags in first-appearance order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !seen.iter().any(|c| c == entry.category()) {
                seen.push(entry.category().to_string());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_recognizes_wildcard() {
        assert_eq!(Category::parse("all"), Category::All);
        assert_eq!(Category::parse(" ALL "), Category::All);
        assert_eq!(
            Category::parse(" billing "),
            Category::Tag("billing".to_string())
        );
    }

    #[test]
    fn test_category_parse_folds_case() {
        assert_eq!(
            Category::parse("Billing"),
            Category::Tag("billing".to_string())
        );
        assert_eq!(normalize_tag("  Technical Support "), "technical support");
    }

    #[test]
    fn test_category_matches_exact_tag() {
        let billing = Category::Tag("billing".to_string());
        assert!(billing.matches("billing"));
        assert!(!billing.matches("Billing"));
        assert!(Category::All.matches("anything"));
    }

    #[test]
    fn test_categories_keep_first_appearance_order() {
        let faq = FaqSet::from_triples(
            None,
            [
                ("technical", "q1", "a1"),
                ("billing", "q2", "a2"),
                ("technical", "q3", "a3"),
            ],
        );
        assert_eq!(faq.categories(), vec!["technical", "billing"]);
        assert_eq!(faq.get(EntryId(2)).map(Entry::question), Some("q3"));
    }
}
