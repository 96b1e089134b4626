use std::io;
use std::path;
use std::slice;

use thiserror::Error;
use tracing::warn;

/// An error that aborts processing of the whole document.
///
/// Every validation failure names the offending entry by its citation key
/// and the line where its `@` marker starts.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid entry type '{entry_type}' of entry '{citation_key}' at line {line}")]
    InvalidEntryType {
        entry_type: String,
        citation_key: String,
        line: usize,
    },
    #[error("entry '{citation_key}' at line {line} does not contain required field: {field}")]
    MissingRequiredField {
        citation_key: String,
        field: String,
        line: usize,
    },
    #[error("found duplicate citation key '{citation_key}' at line {line}")]
    DuplicateCitationKey { citation_key: String, line: usize },
    #[error("entry '{citation_key}' at line {line} cross-references itself")]
    SelfCrossref { citation_key: String, line: usize },
    #[error("entry '{citation_key}' at line {line} cross-references unknown entry '{target}'")]
    UnknownCrossref {
        citation_key: String,
        target: String,
        line: usize,
    },
    #[error("document has already been parsed")]
    AlreadyParsed,
    #[error("unable to read file {}: {source}", path.display())]
    Io {
        path: path::PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DocumentError>;

/// A problem confined to one entry or field. The affected entry or field
/// is dropped, the rest of the document is processed normally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("nested entries at byte {offset} (line {line})")]
    NestedEntry { offset: usize, line: usize },
    #[error("entry at line {line} is missing its closing brace")]
    UnterminatedEntry { line: usize },
    #[error("cannot parse entry at line {line}")]
    MalformedEntry { line: usize },
    #[error("entry of type '{entry_type}' at line {line} has no citation key")]
    MissingCitationKey { entry_type: String, line: usize },
    #[error("cannot parse field in entry '{citation_key}': {raw}")]
    UnparseableField { citation_key: String, raw: String },
    #[error("found duplicate field '{key}' in entry '{citation_key}'")]
    DuplicateField { citation_key: String, key: String },
    #[error("number out of range for field '{key}' in entry '{citation_key}': {raw}")]
    InvalidNumber {
        citation_key: String,
        key: String,
        raw: String,
    },
    #[error("unable to access string reference in '{citation_key}': {name}")]
    UnresolvedReference { citation_key: String, name: String },
    #[error("error while concatenating in '{citation_key}': {raw}")]
    MalformedConcatenation { citation_key: String, raw: String },
    #[error("redefinition in @string: {name}")]
    StringRedefinition { name: String },
    #[error("non string object in @string: {name}")]
    NonStringDefinition { name: String },
}

/// Collects recoverable diagnostics in the order they were reported.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics { items: Vec::new() }
    }

    /// Records a diagnostic and logs it.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.items.push(diagnostic);
    }

    pub fn iter(&self) -> slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, diagnostic: &Diagnostic) -> bool {
        self.items.contains(diagnostic)
    }
}

impl<'d> IntoIterator for &'d Diagnostics {
    type Item = &'d Diagnostic;
    type IntoIter = slice::Iter<'d, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
