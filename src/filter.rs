use std::collections::HashSet;

use crate::types::Entry;

/// Entries of any of the given types (compared lowercase).
pub fn filter_types<'e>(entries: &'e [Entry], entry_types: &HashSet<String>) -> Vec<&'e Entry> {
    entries
        .iter()
        .filter(|entry| entry_types.contains(&entry.entry_type))
        .collect()
}

/// Entries naming every one of the given last names among their
/// authors or editors.
pub fn filter_authors<'e>(entries: &'e [Entry], last_names: &HashSet<String>) -> Vec<&'e Entry> {
    entries
        .iter()
        .filter(|entry| last_names.iter().all(|name| entry.has_author_last_name(name)))
        .collect()
}

/// Combination of a type filter and an author filter.
/// An empty set does not restrict anything.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Filter {
    entry_types: HashSet<String>,
    last_names: HashSet<String>,
}

impl Filter {
    pub fn new() -> Filter {
        Filter::default()
    }

    pub fn with_entry_types<I, S>(mut self, entry_types: I) -> Filter
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entry_types
            .extend(entry_types.into_iter().map(|t| t.as_ref().trim().to_lowercase()));
        self.entry_types.remove("");
        self
    }

    pub fn with_last_names<I, S>(mut self, last_names: I) -> Filter
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.last_names
            .extend(last_names.into_iter().map(|n| n.as_ref().trim().to_string()));
        self.last_names.remove("");
        self
    }

    pub fn apply<'e>(&self, entries: &'e [Entry]) -> Vec<&'e Entry> {
        entries
            .iter()
            .filter(|entry| self.entry_types.is_empty() || self.entry_types.contains(&entry.entry_type))
            .filter(|entry| self.last_names.iter().all(|name| entry.has_author_last_name(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AuthorRecord, Role};

    fn entry(entry_type: &str, key: &str, last_names: &[&str]) -> Entry {
        let mut entry = Entry::new(entry_type, key, 1);
        for name in last_names {
            entry.add_author(AuthorRecord {
                first_name: String::new(),
                last_name: name.to_string(),
                role: Role::Author,
            });
        }
        entry
    }

    fn keys(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.citation_key.clone()).collect()
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("book", "b1", &["Knuth"]),
            entry("article", "a1", &["Knuth", "Lamport"]),
            entry("misc", "m1", &["Lamport"]),
        ]
    }

    #[test]
    fn test_types_are_alternatives() {
        let entries = sample();
        let wanted: HashSet<String> = ["book", "misc"].iter().map(|s| s.to_string()).collect();
        assert_eq!(keys(&filter_types(&entries, &wanted)), vec!["b1", "m1"]);
    }

    #[test]
    fn test_authors_must_all_appear() {
        let entries = sample();
        let wanted: HashSet<String> = ["Knuth", "Lamport"].iter().map(|s| s.to_string()).collect();
        assert_eq!(keys(&filter_authors(&entries, &wanted)), vec!["a1"]);
    }

    #[test]
    fn test_combined_filter() {
        let entries = sample();
        assert_eq!(Filter::new().apply(&entries).len(), 3);

        let filter = Filter::new().with_entry_types(["Book", "article"]).with_last_names(["Knuth"]);
        assert_eq!(keys(&filter.apply(&entries)), vec!["b1", "a1"]);

        let filter = Filter::new().with_entry_types([""]).with_last_names(["Lamport"]);
        assert_eq!(keys(&filter.apply(&entries)), vec!["a1", "m1"]);
    }
}
