use std::error;
use std::str::FromStr;

use pretty_assertions::assert_eq;

use bibdoc::{AuthorRecord, Document, DocumentError, Entry, Filter, Role, Schema};

const KNUTH: &str = r#"@book{b1, author="Knuth| Donald E.", title="T", publisher="P", year=1990}"#;

fn keys(entry: &Entry) -> Vec<&str> {
    entry.fields.iter().map(|f| f.key.as_str()).collect()
}

#[test]
fn test_book_keeps_schema_fields() -> Result<(), Box<dyn error::Error>> {
    let doc = Document::from_str(KNUTH)?;
    assert_eq!(doc.entries().len(), 1);
    let entry = &doc.entries()[0];
    assert_eq!(keys(entry), vec!["author", "title", "publisher", "year"]);
    assert_eq!(
        entry.authors,
        vec![AuthorRecord {
            first_name: "Donald E.".to_string(),
            last_name: "Knuth".to_string(),
            role: Role::Author,
        }]
    );
    Ok(())
}

#[test]
fn test_article_without_author() {
    let err = Document::from_str("\n@article{a1, title=\"T\"}").unwrap_err();
    match err {
        DocumentError::MissingRequiredField { citation_key, field, line } => {
            assert_eq!(citation_key, "a1");
            assert_eq!(field, "author");
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error {}", other),
    }
}

#[test]
fn test_month_from_string_table() -> Result<(), Box<dyn error::Error>> {
    let src = r#"@string{jan="January"}
@book{b2, author = "A. Writer", title = "T", publisher = "P", year = 2001, month=jan}"#;
    let doc = Document::from_str(src)?;
    assert_eq!(doc.entries()[0].text("month"), Some("January".to_string()));
    Ok(())
}

#[test]
fn test_crossref_inherits_without_overwriting() -> Result<(), Box<dyn error::Error>> {
    let src = format!("{}\n@book{{b2, crossref=\"b1\", year=1991}}\n", KNUTH);
    let doc = Document::from_str(&src)?;
    let child = &doc.entries()[1];
    assert_eq!(child.citation_key, "b2");
    assert_eq!(keys(child), vec!["crossref", "author", "title", "publisher", "year"]);
    assert_eq!(child.text("year"), Some("1991".to_string()));
    assert_eq!(child.text("title"), Some("T".to_string()));
    assert_eq!(child.text("publisher"), Some("P".to_string()));
    assert_eq!(child.authors[0].last_name, "Knuth");
    Ok(())
}

#[test]
fn test_concatenation_joins_without_separators() -> Result<(), Box<dyn error::Error>> {
    let src = r#"
@string{ref = "Z"}
@misc{m1, title = "X" # ref # "Y"}
"#;
    let doc = Document::from_str(src)?;
    assert_eq!(doc.entries()[0].text("title"), Some("XZY".to_string()));
    Ok(())
}

#[test]
fn test_duplicate_keys_name_the_later_line() {
    let src = format!("{}\n%\n{}\n", KNUTH, KNUTH);
    match Document::from_str(&src) {
        Err(DocumentError::DuplicateCitationKey { citation_key, line }) => {
            assert_eq!(citation_key, "b1");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected result {:?}", other.map(|d| d.entries().len())),
    }
}

#[test]
fn test_crossref_errors() {
    let looped = "@misc{m1, crossref = \"M1\"}";
    assert!(matches!(
        Document::from_str(looped),
        Err(DocumentError::SelfCrossref { .. })
    ));

    let dangling = "@misc{m1, crossref = \"m2\"}";
    assert!(matches!(
        Document::from_str(dangling),
        Err(DocumentError::UnknownCrossref { .. })
    ));
}

#[test]
fn test_unknown_type_is_fatal() {
    let src = "@string{x = \"y\"}\n@crossref{c1, title = \"T\"}\n@patent{p1, title = \"T\"}";
    match Document::from_str(src) {
        Err(DocumentError::InvalidEntryType { entry_type, line, .. }) => {
            assert_eq!(entry_type, "patent");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected result {:?}", other.map(|d| d.entries().len())),
    }
}

#[test]
fn test_custom_schema() -> Result<(), Box<dyn error::Error>> {
    let schema = Schema::empty().with_type("online", &["url"], &["title"]);
    let mut doc = Document::new(bibdoc::Config::new().with_schema(schema));
    doc.parse("@online{o1, url = {https://example.org}, title = {Home}, year = 2020}")?;
    assert_eq!(keys(&doc.entries()[0]), vec!["url", "title"]);
    Ok(())
}

#[test]
fn test_realistic_database() -> Result<(), Box<dyn error::Error>> {
    let src = r#"
% references for chapter 1
@STRING{ aw = "Addison-Wesley" }
@String{ pub = aw # " Publishing" }

@preamble{ "\newcommand{\noop}[1]{}" }

@Book{knuth97,
  Author    = {Donald Ervin Knuth},
  Title     = {The Art of Computer Programming, Volume 1},
  Publisher = pub,
  Year      = 1997,
  ISBN      = {0201896834},
  Edition   = "3rd"
}

@Article{lamport78,
  author  = "Leslie Lamport",
  title   = {Time, Clocks, and the Ordering of Events in a Distributed System},
  journal = "Communications of the ACM",
  year    = 1978,
  volume  = 21,
  number  = 7,
  pages   = "558--565",
  note    = undefined
}

@InProceedings{both,
  author    = "Donald Knuth and Leslie Lamport",
  title     = "An Imagined Collaboration",
  booktitle = "Proceedings" # " of Nothing",
  year      = 2000,
  volume    = 1
}
"#;
    let doc = Document::from_str(src)?;
    let entries = doc.entries();
    assert_eq!(entries.len(), 3);

    let knuth = &entries[0];
    assert_eq!(knuth.entry_type, "book");
    assert_eq!(knuth.text("publisher"), Some("Addison-Wesley Publishing".to_string()));
    assert_eq!(keys(knuth), vec!["author", "title", "publisher", "year", "edition"]);
    assert_eq!(knuth.line, 8);

    let lamport = &entries[1];
    assert!(lamport.field("note").is_none());
    assert_eq!(lamport.text("pages"), Some("558--565".to_string()));

    let both = &entries[2];
    assert_eq!(both.text("booktitle"), Some("Proceedings of Nothing".to_string()));
    assert!(both.has_field("volume"));

    let filter = Filter::new().with_last_names(["Knuth", "Lamport"]);
    let found: Vec<&str> = filter
        .apply(entries)
        .iter()
        .map(|e| e.citation_key.as_str())
        .collect();
    assert_eq!(found, vec!["both"]);

    let filter = Filter::new().with_entry_types(["article", "book"]);
    assert_eq!(filter.apply(entries).len(), 2);

    assert_eq!(doc.diagnostics().len(), 1);
    Ok(())
}
