use std::convert;
use std::io;
use std::path;
use std::str;

use tracing::{debug, trace};

use crate::errors::{Diagnostic, Diagnostics};
use crate::lexer;
use crate::patterns::{self, Assignment};
use crate::types::{Entry, Field, FieldValue};

/// Entry types which carry no bibliographic data and are skipped while parsing
const IGNORED_TYPES: [&str; 2] = ["preamble", "comment"];

/// Parser turning a `.bib` source into [`Entry`] instances.
///
/// The entries are parsed but not resolved: fields may still hold
/// references and concatenations. Use [`Document`](crate::Document)
/// for the complete pipeline.
pub struct Parser {
    pub(crate) lexer: lexer::Lexer,
}

impl Parser {
    /// Use a file at some filepath as source for the parsing process.
    pub fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Parser, io::Error> {
        let lexer = lexer::Lexer::from_file(path)?;
        Ok(Parser { lexer })
    }

    /// Use a string as source for the parsing process.
    pub fn from_string(data: String) -> Parser {
        Parser {
            lexer: lexer::Lexer::from_string(data),
        }
    }

    /// The complete source text
    pub fn source(&self) -> &str {
        self.lexer.source()
    }

    /// Parses every entry of the source in document order.
    ///
    /// Entries and fields that cannot be parsed are reported to
    /// `diagnostics` and left out.
    pub fn entries(&self, diagnostics: &mut Diagnostics) -> Vec<Entry> {
        let mut entries = Vec::new();
        for block in self.lexer.iter() {
            match block {
                Ok(block) => {
                    if let Some(entry) = parse_entry(&block, diagnostics) {
                        entries.push(entry);
                    }
                }
                Err(diagnostic) => diagnostics.report(diagnostic),
            }
        }
        debug!("parsed {} entries", entries.len());
        entries
    }
}

impl str::FromStr for Parser {
    type Err = convert::Infallible;

    /// Use a string as source for the parsing process.
    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Ok(Parser::from_string(data.to_string()))
    }
}

/// Builds one entry out of the text cut by the lexer.
///
/// Returns `None` for `@preamble` and `@comment`, for text not shaped
/// like an entry and for entries without citation key (only `@string`
/// may omit it).
pub(crate) fn parse_entry(block: &lexer::RawEntry<'_>, diagnostics: &mut Diagnostics) -> Option<Entry> {
    let line = block.line;
    let head = match patterns::match_entry(block.text.trim()) {
        Some(head) => head,
        None => {
            diagnostics.report(Diagnostic::MalformedEntry { line });
            return None;
        }
    };

    let entry_type = head.entry_type.to_lowercase();
    if IGNORED_TYPES.contains(&entry_type.as_str()) {
        debug!("skipping @{} at byte {}", entry_type, block.offset);
        return None;
    }

    let citation_key = match head.citation_key {
        Some(key) => key,
        None if entry_type == "string" => "",
        None => {
            diagnostics.report(Diagnostic::MissingCitationKey { entry_type, line });
            return None;
        }
    };

    let mut entry = Entry::new(&entry_type, citation_key, line);
    for fragment in patterns::split_top_level(head.body, ',') {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }

        let field = parse_field(fragment);
        if field.value == FieldValue::Unresolved {
            // a recognized key without value can only be a number out of range
            let diagnostic = if field.key.is_empty() {
                Diagnostic::UnparseableField {
                    citation_key: entry.citation_key.clone(),
                    raw: field.raw.replace("\r\n", "\n"),
                }
            } else {
                Diagnostic::InvalidNumber {
                    citation_key: entry.citation_key.clone(),
                    key: field.key,
                    raw: field.raw,
                }
            };
            diagnostics.report(diagnostic);
            continue;
        }

        // repeated @string names are up to the string table's redefinition policy
        if !entry.is_string_definition() && entry.has_field(&field.key) {
            diagnostics.report(Diagnostic::DuplicateField {
                citation_key: entry.citation_key.clone(),
                key: field.key,
            });
            continue;
        }

        trace!("{}: {} = {:?}", entry.citation_key, field.key, field.value);
        entry.fields.push(field);
    }

    Some(entry)
}

/// Classifies one trimmed `key = value` fragment.
///
/// An unrecognized fragment yields a field with an empty key, its raw
/// text and an [`FieldValue::Unresolved`] value.
pub fn parse_field(fragment: &str) -> Field {
    let assignment = match patterns::match_assignment(fragment) {
        Some(assignment) => assignment,
        None => {
            return Field {
                key: String::new(),
                raw: fragment.to_string(),
                value: FieldValue::Unresolved,
            }
        }
    };

    let value = match assignment {
        Assignment::String { value, .. } => FieldValue::String(value.to_string()),
        Assignment::Number { digits, .. } => match digits.parse::<i64>() {
            Ok(number) => FieldValue::Number(number),
            Err(_) => FieldValue::Unresolved,
        },
        Assignment::Reference { name, .. } => FieldValue::Reference(name.to_string()),
        Assignment::Concatenation { chain, .. } => FieldValue::Concatenation(chain.to_string()),
    };
    Field::new(assignment.key(), fragment, value)
}
