use std::fmt;
use std::path;
use std::str;

use tracing::debug;

use crate::authors;
use crate::config::Config;
use crate::crossref;
use crate::duplicates;
use crate::errors::{DocumentError, Diagnostics, Result};
use crate::parser::Parser;
use crate::resolver;
use crate::strings::StringTable;
use crate::types::Entry;
use crate::validator;

/// Progress of a [`Document`] through its processing steps.
/// Steps are taken strictly in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DocumentState {
    Empty,
    Extracted,
    StringsResolved,
    ConcatenationResolved,
    Cleaned,
    DuplicatesChecked,
    CrossReferenced,
    Validated,
    AuthorsFilled,
}

impl fmt::Display for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Empty => "empty",
                Self::Extracted => "entries extracted",
                Self::StringsResolved => "string references resolved",
                Self::ConcatenationResolved => "concatenations resolved",
                Self::Cleaned => "unresolved fields removed",
                Self::DuplicatesChecked => "citation keys checked",
                Self::CrossReferenced => "cross-references filled",
                Self::Validated => "entries validated",
                Self::AuthorsFilled => "authors filled",
            }
        )
    }
}

/// A `.bib` database, parsed, resolved and validated.
///
/// ```rust
/// use bibdoc::Document;
/// use std::str::FromStr;
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let doc = Document::from_str(r#"
/// @string{aw = "Addison-Wesley"}
/// @book{knuth73, author = "Donald E. Knuth", title = "Fundamental Algorithms",
///       publisher = aw, year = 1973, isbn = "0201038218"}
/// "#)?;
///     let entry = &doc.entries()[0];
///     assert_eq!(entry.text("publisher").as_deref(), Some("Addison-Wesley"));
///     assert!(entry.field("isbn").is_none());
///     assert_eq!(entry.authors[0].last_name, "Knuth");
///     Ok(())
/// }
/// ```
///
/// A document processes exactly one source. Any [`DocumentError`] aborts
/// processing and leaves the document without entries; recoverable
/// problems are collected in [`Document::diagnostics`].
#[derive(Debug)]
pub struct Document {
    config: Config,
    state: DocumentState,
    entries: Vec<Entry>,
    strings: StringTable,
    diagnostics: Diagnostics,
}

impl Document {
    pub fn new(config: Config) -> Document {
        Document {
            config,
            state: DocumentState::Empty,
            entries: Vec::new(),
            strings: StringTable::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Reads a `.bib` file at `path` and processes it.
    pub fn from_file<P: AsRef<path::Path>>(path: P, config: Config) -> Result<Document> {
        let mut doc = Document::new(config);
        doc.load(path)?;
        Ok(doc)
    }

    /// Processes the `.bib` file at `path`.
    pub fn load<P: AsRef<path::Path>>(&mut self, path: P) -> Result<()> {
        let parser = Parser::from_file(path.as_ref()).map_err(|source| DocumentError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        self.run(&parser)
    }

    /// Processes `src`. Empty input leaves the document empty.
    pub fn parse(&mut self, src: &str) -> Result<()> {
        self.run(&Parser::from_string(src.to_string()))
    }

    fn run(&mut self, parser: &Parser) -> Result<()> {
        if self.state != DocumentState::Empty {
            return Err(DocumentError::AlreadyParsed);
        }
        if parser.source().trim().is_empty() {
            debug!("empty input");
            return Ok(());
        }

        let entries = parser.entries(&mut self.diagnostics);
        self.advance(DocumentState::Extracted);

        let strings = StringTable::from_entries(&entries, self.config.redefinition, &mut self.diagnostics);
        let entries = self.each_record(&entries, |entry, diagnostics| {
            resolver::resolve_references(entry, &strings, diagnostics)
        });
        self.advance(DocumentState::StringsResolved);

        let entries = self.each_record(&entries, |entry, diagnostics| {
            resolver::resolve_concatenations(entry, &strings, diagnostics)
        });
        self.advance(DocumentState::ConcatenationResolved);

        let entries: Vec<Entry> = entries.iter().map(resolver::strip_unresolved).collect();
        self.advance(DocumentState::Cleaned);

        duplicates::check_duplicates(&entries)?;
        self.advance(DocumentState::DuplicatesChecked);

        let entries = crossref::fill_crossrefs(&entries)?;
        self.advance(DocumentState::CrossReferenced);

        let entries = validator::validate(&entries, &self.config.schema)?;
        self.advance(DocumentState::Validated);

        self.entries = entries.iter().map(authors::fill_authors).collect();
        self.strings = strings;
        self.advance(DocumentState::AuthorsFilled);
        Ok(())
    }

    /// Applies `step` to every bibliographic entry; `@string` entries pass unchanged.
    fn each_record<F>(&mut self, entries: &[Entry], mut step: F) -> Vec<Entry>
    where
        F: FnMut(&Entry, &mut Diagnostics) -> Entry,
    {
        entries
            .iter()
            .map(|entry| {
                if entry.is_string_definition() {
                    entry.clone()
                } else {
                    step(entry, &mut self.diagnostics)
                }
            })
            .collect()
    }

    fn advance(&mut self, state: DocumentState) {
        debug!("document: {} -> {}", self.state, state);
        self.state = state;
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// The validated entries; empty unless processing completed.
    pub fn entries(&self) -> &[Entry] {
        match self.state {
            DocumentState::AuthorsFilled => &self.entries,
            _ => &[],
        }
    }

    pub fn into_entries(self) -> Vec<Entry> {
        match self.state {
            DocumentState::AuthorsFilled => self.entries,
            _ => Vec::new(),
        }
    }

    /// The `@string` definitions the document was resolved with
    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl str::FromStr for Document {
    type Err = DocumentError;

    /// Processes a string with the default configuration.
    fn from_str(src: &str) -> Result<Self> {
        let mut doc = Document::default();
        doc.parse(src)?;
        Ok(doc)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries() {
            write!(f, "{}\n\n", entry)?;
        }
        Ok(())
    }
}
