//! This crate reads `.bib` databases and turns them into validated, typed entries.
//!
//! `.bib` files are popular in reference management since many resources
//! allow to export metadata in a BibTeχ file. A small database can look like this:
//!
//! ```tex
//! @string{aw = "Addison-Wesley"}
//!
//! @book{knuth73,
//!     author    = {Donald E. Knuth},
//!     title     = {Fundamental Algorithms},
//!     publisher = aw,
//!     year      = 1973,
//!     isbn      = {0201038218}
//! }
//!
//! @inbook{knuth73ch1,
//!     crossref  = "knuth73",
//!     chapter   = 1,
//!     title     = "Basic Concepts"
//! }
//! ```
//!
//! We call `book` the entry type and `knuth73` the citation key. Fields hold
//! quoted or braced text, numbers, names defined with `@string`, or
//! `#`-joined chains of these.
//!
//! A [`Document`] runs the whole pipeline on such a source:
//!
//! 1. cut the source into entries and classify every field
//! 2. replace `@string` names and evaluate `#` chains, dropping fields that
//!    cannot be resolved
//! 3. reject duplicate citation keys
//! 4. let entries with a `crossref` field inherit the fields they lack
//! 5. check every entry against the [`Schema`] of its type and keep only the
//!    fields declared there
//! 6. split `author` and `editor` fields into [`AuthorRecord`]s
//!
//! ```rust
//! use bibdoc::{Document, Filter};
//! use std::str::FromStr;
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let doc = Document::from_str(r#"
//! @book{tolkien1937, author = {J. R. R. Tolkien}, title = {The Hobbit},
//!       publisher = {George Allen & Unwin}, year = 1937}
//! @misc{note1, title = {Untitled}}
//! "#)?;
//!     let filter = Filter::new().with_last_names(["Tolkien"]);
//!     for entry in filter.apply(doc.entries()) {
//!         println!("{}", entry);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Problems confined to a single field (an unknown `@string` name, text
//! that is no assignment, …) drop that field and are reported as
//! [`Diagnostic`]s, logged through `tracing`. Problems with the database as
//! a whole (unknown entry type, missing required field, duplicate key,
//! broken cross-reference) abort processing with a [`DocumentError`].

mod authors;
mod config;
mod crossref;
mod document;
mod duplicates;
mod errors;
mod filter;
mod lexer;
mod parser;
mod patterns;
mod resolver;
mod schema;
mod strings;
mod table;
mod types;
mod validator;

pub use crate::authors::{fill_authors, split_name, split_people};
pub use crate::config::{Config, RedefinitionPolicy};
pub use crate::crossref::fill_crossrefs;
pub use crate::document::{Document, DocumentState};
pub use crate::duplicates::check_duplicates;
pub use crate::errors::{Diagnostic, Diagnostics, DocumentError, Result};
pub use crate::filter::{filter_authors, filter_types, Filter};
pub use crate::parser::{parse_field, Parser};
pub use crate::resolver::{resolve_concatenations, resolve_references, strip_unresolved};
pub use crate::schema::{EntrySchema, Requirement, Schema};
pub use crate::strings::StringTable;
pub use crate::table::render;
pub use crate::types::{AuthorRecord, Entry, Field, FieldValue, Role};
pub use crate::validator::{validate, validate_entry};
