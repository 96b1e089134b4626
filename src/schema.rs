use std::collections::HashMap;
use std::fmt;

/// One required slot of an entry type: a single field name, or two
/// alternatives written `"author|editor"` of which one must be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    alternatives: Vec<String>,
}

impl Requirement {
    pub fn parse(spec: &str) -> Requirement {
        Requirement {
            alternatives: spec
                .split('|')
                .map(|name| name.trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn accepts(&self, key: &str) -> bool {
        self.alternatives.iter().any(|name| name == key)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alternatives.join("|"))
    }
}

/// Required and optional fields of one entry type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySchema {
    pub required: Vec<Requirement>,
    /// optional field names; `"volume|number"` declares both
    pub optional: Vec<String>,
}

impl EntrySchema {
    pub fn new(required: &[&str], optional: &[&str]) -> EntrySchema {
        EntrySchema {
            required: required
                .iter()
                .map(|spec| Requirement::parse(spec))
                .filter(|req| !req.alternatives.is_empty())
                .collect(),
            optional: optional
                .iter()
                .flat_map(|spec| spec.split('|'))
                .map(|name| name.trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// Is `key` named by a requirement or as optional field?
    pub fn declares(&self, key: &str) -> bool {
        self.required.iter().any(|req| req.accepts(key)) || self.optional.iter().any(|name| name == key)
    }
}

/// Entry types known to the validator, with their fields.
///
/// [`Schema::bibtex`] (also the `Default`) describes the standard BibTeX
/// types. Other schemas can be assembled with [`Schema::with_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    types: HashMap<String, EntrySchema>,
}

impl Schema {
    /// A schema without any entry type
    pub fn empty() -> Schema {
        Schema {
            types: HashMap::new(),
        }
    }

    /// The standard BibTeX entry types
    pub fn bibtex() -> Schema {
        Schema::empty()
            .with_type(
                "article",
                &["author", "title", "journal", "year"],
                &["volume", "number", "pages", "month", "note", "key"],
            )
            .with_type(
                "book",
                &["author|editor", "title", "publisher", "year"],
                &["volume", "series", "address", "edition", "month", "note", "key"],
            )
            .with_type(
                "inproceedings",
                &["author", "title", "booktitle", "year"],
                &["editor", "volume|number", "series", "pages", "address", "month", "organization", "publisher", "note", "key"],
            )
            .with_type(
                "conference",
                &["author", "title", "booktitle", "year"],
                &["editor", "volume|number", "series", "pages", "address", "month", "organization", "publisher", "note", "key"],
            )
            .with_type(
                "booklet",
                &["title"],
                &["author", "howpublished", "address", "month", "year", "note", "key"],
            )
            .with_type(
                "inbook",
                &["author|editor", "title", "chapter|pages", "publisher", "year"],
                &["volume|number", "series", "type", "address", "edition", "month", "note", "key"],
            )
            .with_type(
                "incollection",
                &["author", "title", "booktitle", "publisher", "year"],
                &["editor", "volume|number", "series", "type", "chapter", "pages", "address", "edition", "month", "note", "key"],
            )
            .with_type(
                "manual",
                &["title"],
                &["author", "organization", "address", "edition", "month", "year", "note", "key"],
            )
            .with_type(
                "mastersthesis",
                &["author", "title", "school", "year"],
                &["type", "address", "month", "note", "key"],
            )
            .with_type(
                "phdthesis",
                &["author", "title", "school", "year"],
                &["type", "address", "month", "note", "key"],
            )
            .with_type(
                "techreport",
                &["author", "title", "institution", "year"],
                &["editor", "volume|number", "series", "address", "month", "organization", "publisher", "note", "key"],
            )
            .with_type(
                "misc",
                &[],
                &["author", "title", "howpublished", "month", "year", "note", "key"],
            )
            .with_type(
                "unpublished",
                &["author", "title", "note"],
                &["month", "year", "key"],
            )
    }

    /// Adds (or replaces) an entry type.
    pub fn with_type(mut self, entry_type: &str, required: &[&str], optional: &[&str]) -> Schema {
        self.types
            .insert(entry_type.to_lowercase(), EntrySchema::new(required, optional));
        self
    }

    pub fn get(&self, entry_type: &str) -> Option<&EntrySchema> {
        self.types.get(entry_type)
    }

    pub fn contains(&self, entry_type: &str) -> bool {
        self.types.contains_key(entry_type)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::bibtex()
    }
}
