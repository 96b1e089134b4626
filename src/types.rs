use std::fmt;

/// The value of one field, classified by the shape of its right-hand side.
///
/// Parsing produces `String`, `Number`, `Reference` or `Concatenation`.
/// Resolution turns the latter two into `String`, or into `Unresolved`
/// when a name cannot be looked up. Entries handed out by a
/// [`Document`](crate::Document) only carry `String` and `Number` values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "lowercase"))]
pub enum FieldValue {
    /// quoted or braced text, without its delimiters
    String(String),
    /// bare digits, e.g. `year = 1990`
    Number(i64),
    /// bare name of a `@string` definition, e.g. `month = jan`
    Reference(String),
    /// `#`-joined chain of literals and references, unevaluated
    Concatenation(String),
    Unresolved,
}

impl FieldValue {
    /// Is the value final, i.e. no lookup remains to be done?
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::String(_) | Self::Number(_))
    }

    /// Textual form of a resolved value
    pub fn text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Reference(_) | Self::Concatenation(_) | Self::Unresolved => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Reference(name) => write!(f, "{}", name),
            Self::Concatenation(raw) => write!(f, "{}", raw),
            Self::Unresolved => write!(f, "<unresolved>"),
        }
    }
}

/// One `key = value` assignment inside an entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Field {
    /// field name, lowercased, e.g. “publisher”
    pub key: String,
    /// the assignment as written in the source
    #[cfg_attr(feature = "serde", serde(skip))]
    pub raw: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: &str, raw: &str, value: FieldValue) -> Field {
        Field {
            key: key.to_lowercase(),
            raw: raw.to_string(),
            value,
        }
    }

    /// Same field with another value; key and raw text are kept.
    pub fn with_value(&self, value: FieldValue) -> Field {
        Field {
            key: self.key.clone(),
            raw: self.raw.clone(),
            value,
        }
    }
}

/// Whether a person wrote or edited a work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    Author,
    Editor,
}

impl Role {
    /// The role implied by a field name, if it lists people
    pub fn from_field_key(key: &str) -> Option<Role> {
        match key {
            "author" => Some(Role::Author),
            "editor" => Some(Role::Editor),
            _ => None,
        }
    }

    pub fn field_key(&self) -> &'static str {
        match self {
            Role::Author => "author",
            Role::Editor => "editor",
        }
    }
}

/// One person named in an `author` or `editor` field
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AuthorRecord {
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl fmt::Display for AuthorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first_name.is_empty() {
            write!(f, "{}", self.last_name)
        } else {
            write!(f, "{} {}", self.first_name, self.last_name)
        }
    }
}

/// One entry in a `.bib` file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entry {
    /// entry type, lowercased, e.g. “article”
    pub entry_type: String,
    /// entry name, e.g. “DBLP:books/lib/Knuth97”; empty for `@string`
    pub citation_key: String,
    /// fields in source order
    pub fields: Vec<Field>,
    /// people derived from the `author` and `editor` fields, without repetitions
    pub authors: Vec<AuthorRecord>,
    /// 1-based line of the `@` marker
    pub line: usize,
}

impl Entry {
    /// Generate a new instance without fields or authors
    pub fn new(entry_type: &str, citation_key: &str, line: usize) -> Entry {
        Entry {
            entry_type: entry_type.to_lowercase(),
            citation_key: citation_key.to_string(),
            fields: Vec::new(),
            authors: Vec::new(),
            line,
        }
    }

    /// Same type, key and line, but with the given fields and no authors
    pub fn with_fields(&self, fields: Vec<Field>) -> Entry {
        Entry {
            entry_type: self.entry_type.clone(),
            citation_key: self.citation_key.clone(),
            fields,
            authors: Vec::new(),
            line: self.line,
        }
    }

    /// First field with that (lowercase) key
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// Textual value of the first field with that key, if resolved
    pub fn text(&self, key: &str) -> Option<String> {
        self.field(key).and_then(|f| f.value.text())
    }

    /// Is this a `@string` definition block rather than a bibliographic record?
    pub fn is_string_definition(&self) -> bool {
        self.entry_type == "string"
    }

    /// Adds a person unless an identical record exists already
    pub fn add_author(&mut self, record: AuthorRecord) {
        if !self.authors.contains(&record) {
            self.authors.push(record);
        }
    }

    pub fn authors_with_role(&self, role: Role) -> impl Iterator<Item = &AuthorRecord> {
        self.authors.iter().filter(move |a| a.role == role)
    }

    pub fn has_author_last_name(&self, last_name: &str) -> bool {
        self.authors.iter().any(|a| a.last_name == last_name)
    }
}
