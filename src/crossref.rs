use std::collections::HashMap;
use std::ptr;

use tracing::debug;

use crate::errors::{DocumentError, Result};
use crate::types::Entry;

/// Copies fields from cross-referenced entries.
///
/// For every entry with a `crossref` field, each field of the named entry
/// which the entry itself lacks is appended to it. Fields already present
/// are never overwritten. Targets are looked up in the entries as they
/// were before filling, so inheritance is one level deep.
///
/// Citation keys are case-sensitive: a target spelled exactly like a key
/// binds to that entry. Otherwise the first entry whose key matches
/// case-insensitively is used.
pub fn fill_crossrefs(entries: &[Entry]) -> Result<Vec<Entry>> {
    let mut exact: HashMap<&str, &Entry> = HashMap::new();
    let mut folded: HashMap<String, &Entry> = HashMap::new();
    for entry in entries.iter().filter(|e| !e.is_string_definition()) {
        exact.entry(entry.citation_key.as_str()).or_insert(entry);
        folded.entry(entry.citation_key.to_lowercase()).or_insert(entry);
    }

    let mut filled = Vec::with_capacity(entries.len());
    for entry in entries {
        let target = match entry.text("crossref") {
            Some(target) if !entry.is_string_definition() => target,
            _ => {
                filled.push(entry.clone());
                continue;
            }
        };

        let parent = exact
            .get(target.as_str())
            .or_else(|| folded.get(&target.to_lowercase()))
            .copied()
            .ok_or_else(|| DocumentError::UnknownCrossref {
                citation_key: entry.citation_key.clone(),
                target: target.clone(),
                line: entry.line,
            })?;
        if ptr::eq(parent, entry) {
            return Err(DocumentError::SelfCrossref {
                citation_key: entry.citation_key.clone(),
                line: entry.line,
            });
        }

        let mut child = entry.clone();
        for field in &parent.fields {
            if !child.has_field(&field.key) {
                child.fields.push(field.clone());
            }
        }
        debug!(
            "{} inherited {} fields from {}",
            child.citation_key,
            child.fields.len() - entry.fields.len(),
            parent.citation_key
        );
        filled.push(child);
    }
    Ok(filled)
}
