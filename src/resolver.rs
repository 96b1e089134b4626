//! Replaces references and concatenations by the text they stand for.
//!
//! Resolution runs in two phases over every entry, always in this order:
//! first plain references (`month = jan`), then `#` chains. Each phase
//! returns new entries; a field that cannot be resolved becomes
//! [`FieldValue::Unresolved`] and is removed by [`strip_unresolved`].
//! Only the [`StringTable`] is consulted, never other fields.

use crate::errors::{Diagnostic, Diagnostics};
use crate::patterns::{self, Segment};
use crate::strings::StringTable;
use crate::types::{Entry, Field, FieldValue};

/// Why a concatenation could not be evaluated
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ConcatenationError {
    /// a segment names no string definition
    UnknownName(String),
    /// the chain has content that is neither a segment nor a `#`
    Malformed,
}

/// Looks up every [`FieldValue::Reference`] in the string table.
pub fn resolve_references(entry: &Entry, table: &StringTable, diagnostics: &mut Diagnostics) -> Entry {
    let fields = entry
        .fields
        .iter()
        .map(|field| match &field.value {
            FieldValue::Reference(name) => match table.get(name) {
                Some(text) => field.with_value(FieldValue::String(text.to_string())),
                None => {
                    diagnostics.report(Diagnostic::UnresolvedReference {
                        citation_key: entry.citation_key.clone(),
                        name: name.clone(),
                    });
                    field.with_value(FieldValue::Unresolved)
                }
            },
            FieldValue::String(_)
            | FieldValue::Number(_)
            | FieldValue::Concatenation(_)
            | FieldValue::Unresolved => field.clone(),
        })
        .collect();
    entry.with_fields(fields)
}

/// Evaluates every [`FieldValue::Concatenation`] to a single string.
pub fn resolve_concatenations(entry: &Entry, table: &StringTable, diagnostics: &mut Diagnostics) -> Entry {
    let fields = entry
        .fields
        .iter()
        .map(|field| match &field.value {
            FieldValue::Concatenation(chain) => match evaluate_concatenation(chain, table) {
                Ok(text) => field.with_value(FieldValue::String(text)),
                Err(err) => {
                    let diagnostic = match err {
                        ConcatenationError::UnknownName(name) => Diagnostic::UnresolvedReference {
                            citation_key: entry.citation_key.clone(),
                            name,
                        },
                        ConcatenationError::Malformed => Diagnostic::MalformedConcatenation {
                            citation_key: entry.citation_key.clone(),
                            raw: chain.clone(),
                        },
                    };
                    diagnostics.report(diagnostic);
                    field.with_value(FieldValue::Unresolved)
                }
            },
            FieldValue::String(_)
            | FieldValue::Number(_)
            | FieldValue::Reference(_)
            | FieldValue::Unresolved => field.clone(),
        })
        .collect();
    entry.with_fields(fields)
}

/// Keeps only fields whose value is final.
pub fn strip_unresolved(entry: &Entry) -> Entry {
    let fields: Vec<Field> = entry
        .fields
        .iter()
        .filter(|field| field.value.is_resolved())
        .cloned()
        .collect();
    entry.with_fields(fields)
}

/// Walks a `"literal" # name # {literal}` chain left to right and joins
/// the segments without separator.
pub(crate) fn evaluate_concatenation(chain: &str, table: &StringTable) -> Result<String, ConcatenationError> {
    let mut result = String::new();
    let mut rest = chain;
    loop {
        let (segment, continues, remainder) =
            patterns::match_segment(rest).ok_or(ConcatenationError::Malformed)?;
        match segment {
            Segment::Literal(text) => result.push_str(text),
            Segment::Name(name) => match table.get(name) {
                Some(text) => result.push_str(text),
                None => return Err(ConcatenationError::UnknownName(name.to_string())),
            },
        }

        if !continues {
            if !remainder.trim().is_empty() {
                return Err(ConcatenationError::Malformed);
            }
            return Ok(result);
        }
        rest = remainder;
    }
}
