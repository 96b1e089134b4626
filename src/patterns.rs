//! Regular expressions recognizing the pieces of a `.bib` file.
//!
//! Nothing here allocates beyond the compiled patterns; every matcher
//! returns slices borrowed from its input.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `@type` at the beginning of a line, optionally indented
    static ref ENTRY_START: Regex = Regex::new(r"(?m)^[ \t]*(@)[a-zA-Z_][\w-]*").unwrap();

    /// a whole entry: type, optional citation key and the body up to the final brace
    static ref ENTRY: Regex = Regex::new(
        r##"(?s)^@([a-zA-Z_][\w-]*)\s*\{(?:\s*([^\s,={}"#]+)\s*,)?(.*)\}$"##
    ).unwrap();

    static ref QUOTED_ASSIGNMENT: Regex =
        Regex::new(r#"(?s)^([a-zA-Z_][\w-]*)\s*=\s*"([^"]*)"$"#).unwrap();
    static ref BRACED_ASSIGNMENT: Regex =
        Regex::new(r"(?s)^([a-zA-Z_][\w-]*)\s*=\s*\{(.*)\}$").unwrap();
    static ref NUMBER_ASSIGNMENT: Regex =
        Regex::new(r"^([a-zA-Z_][\w-]*)\s*=\s*(\d+)$").unwrap();
    static ref REFERENCE_ASSIGNMENT: Regex =
        Regex::new(r"^([a-zA-Z_][\w-]*)\s*=\s*([a-zA-Z_][\w-]*)$").unwrap();
    static ref CONCATENATION_ASSIGNMENT: Regex =
        Regex::new(r"(?s)^([a-zA-Z_][\w-]*)\s*=\s*(.*#.*)$").unwrap();

    /// one link of a `#` chain: literal or name, then an optional `#`
    static ref SEGMENT: Regex = Regex::new(
        r#"(?s)^\s*("[^"]*"|\{[^{}]*\}|[a-zA-Z_][\w-]*)\s*(#)?\s*(.*)$"#
    ).unwrap();

    /// the word `and` separating people in author lists
    static ref NAME_SEPARATOR: Regex = Regex::new(r"\s+and\s+").unwrap();
}

/// Head of an entry as matched by [`match_entry`]
#[derive(Debug, PartialEq)]
pub(crate) struct EntryHead<'s> {
    pub(crate) entry_type: &'s str,
    pub(crate) citation_key: Option<&'s str>,
    pub(crate) body: &'s str,
}

/// Right-hand side shapes of `key = value`, in order of precedence
#[derive(Debug, PartialEq)]
pub(crate) enum Assignment<'s> {
    String { key: &'s str, value: &'s str },
    Number { key: &'s str, digits: &'s str },
    Reference { key: &'s str, name: &'s str },
    Concatenation { key: &'s str, chain: &'s str },
}

impl<'s> Assignment<'s> {
    pub(crate) fn key(&self) -> &'s str {
        match self {
            Self::String { key, .. }
            | Self::Number { key, .. }
            | Self::Reference { key, .. }
            | Self::Concatenation { key, .. } => *key,
        }
    }
}

/// One link of a concatenation chain
#[derive(Debug, PartialEq)]
pub(crate) enum Segment<'s> {
    /// literal text without its quotes or braces
    Literal(&'s str),
    /// name to look up in the string table
    Name(&'s str),
}

/// Byte offsets of every `@` starting an entry
pub(crate) fn entry_starts(src: &str) -> Vec<usize> {
    ENTRY_START
        .captures_iter(src)
        .filter_map(|caps| caps.get(1))
        .map(|at| at.start())
        .collect()
}

/// Splits the text of one entry (trimmed, `@` first) into its head parts.
pub(crate) fn match_entry(text: &str) -> Option<EntryHead<'_>> {
    let caps = ENTRY.captures(text)?;
    Some(EntryHead {
        entry_type: caps.get(1)?.as_str(),
        citation_key: caps.get(2).map(|m| m.as_str()),
        body: caps.get(3).map_or("", |m| m.as_str()),
    })
}

/// Classifies one trimmed `key = value` fragment.
pub(crate) fn match_assignment(fragment: &str) -> Option<Assignment<'_>> {
    if let Some(caps) = QUOTED_ASSIGNMENT.captures(fragment) {
        return Some(Assignment::String {
            key: caps.get(1)?.as_str(),
            value: caps.get(2)?.as_str(),
        });
    }
    if let Some(caps) = BRACED_ASSIGNMENT.captures(fragment) {
        let value = caps.get(2)?.as_str();
        // `{a} # {b}` looks braced from the outside, but is a chain
        if is_balanced(value) {
            return Some(Assignment::String {
                key: caps.get(1)?.as_str(),
                value,
            });
        }
    }
    if let Some(caps) = NUMBER_ASSIGNMENT.captures(fragment) {
        return Some(Assignment::Number {
            key: caps.get(1)?.as_str(),
            digits: caps.get(2)?.as_str(),
        });
    }
    if let Some(caps) = REFERENCE_ASSIGNMENT.captures(fragment) {
        return Some(Assignment::Reference {
            key: caps.get(1)?.as_str(),
            name: caps.get(2)?.as_str(),
        });
    }
    if let Some(caps) = CONCATENATION_ASSIGNMENT.captures(fragment) {
        let chain = caps.get(2)?.as_str();
        if chain_has_top_level_hash(chain) {
            return Some(Assignment::Concatenation {
                key: caps.get(1)?.as_str(),
                chain,
            });
        }
    }
    None
}

/// Matches the first segment of `chain`. Returns the segment, whether a `#`
/// follows it, and the unconsumed remainder.
pub(crate) fn match_segment(chain: &str) -> Option<(Segment<'_>, bool, &str)> {
    let caps = SEGMENT.captures(chain)?;
    let token = caps.get(1)?.as_str();
    let segment = if token.starts_with('"') || token.starts_with('{') {
        Segment::Literal(&token[1..token.len() - 1])
    } else {
        Segment::Name(token)
    };
    let rest = caps.get(3).map_or("", |m| m.as_str());
    Some((segment, caps.get(2).is_some(), rest))
}

/// Splits `and`-separated person names.
pub(crate) fn split_names(value: &str) -> Vec<&str> {
    NAME_SEPARATOR
        .split(value)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Splits `src` at every `separator` outside of quotes and braces.
///
/// Quotes only delimit at brace depth zero, so `{a "b, c}` is one piece.
pub(crate) fn split_top_level(src: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;
    for (idx, chr) in src.char_indices() {
        match chr {
            '{' if !quoted => depth += 1,
            '}' if !quoted => depth = depth.saturating_sub(1),
            '"' if depth == 0 => quoted = !quoted,
            c if c == separator && depth == 0 && !quoted => {
                pieces.push(&src[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&src[start..]);
    pieces
}

fn chain_has_top_level_hash(chain: &str) -> bool {
    split_top_level(chain, '#').len() > 1
}

/// Do the braces of `src` nest properly?
fn is_balanced(src: &str) -> bool {
    let mut depth = 0i64;
    for chr in src.chars() {
        match chr {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
