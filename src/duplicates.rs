use std::collections::HashSet;

use crate::errors::{DocumentError, Result};
use crate::types::Entry;

/// Fails on the first citation key used by more than one entry.
///
/// Keys are compared case-sensitively; `@string` entries have no key and
/// are not considered. The error names the line of the later occurrence.
pub fn check_duplicates(entries: &[Entry]) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in entries.iter().filter(|e| !e.is_string_definition()) {
        if !seen.insert(entry.citation_key.as_str()) {
            return Err(DocumentError::DuplicateCitationKey {
                citation_key: entry.citation_key.clone(),
                line: entry.line,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_occurrence_is_named() {
        let entries = vec![
            Entry::new("book", "k", 1),
            Entry::new("misc", "other", 5),
            Entry::new("article", "k", 9),
        ];
        match check_duplicates(&entries) {
            Err(DocumentError::DuplicateCitationKey { citation_key, line }) => {
                assert_eq!(citation_key, "k");
                assert_eq!(line, 9);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_keys_differing_in_case_are_distinct() {
        let entries = vec![Entry::new("book", "Knuth", 1), Entry::new("book", "knuth", 2)];
        assert!(check_duplicates(&entries).is_ok());
    }

    #[test]
    fn test_string_definitions_are_ignored() {
        let entries = vec![Entry::new("string", "", 1), Entry::new("string", "", 2)];
        assert!(check_duplicates(&entries).is_ok());
    }
}
