use std::fs;
use std::io;
use std::io::Read;
use std::path;
use std::vec;

use crate::errors::Diagnostic;
use crate::patterns;

/// The source text of one entry, cut out of the document.
///
/// For the document
///
/// ```tex
/// @string{pub = "Addison-Wesley"}
/// @Book{works:4,
///   author     = {Shakespeare, William},
///   title      = {Sonnets},
/// }
/// ```
///
/// the lexer yields two blocks: the `@string` line and the five lines of
/// `@Book`, each running from its `@` up to the brace closing it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawEntry<'s> {
    pub(crate) text: &'s str,
    /// byte offset of the `@` marker
    pub(crate) offset: usize,
    /// 1-based line of the `@` marker
    pub(crate) line: usize,
}

/// 1-based line number of the byte at `offset`.
/// `\r\n`, `\r` and `\n` each count as one line break.
pub(crate) fn line_at(src: &str, offset: usize) -> usize {
    let bytes = &src.as_bytes()[..offset.min(src.len())];
    let mut line = 1;
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\r' => {
                line += 1;
                if bytes.get(idx + 1) == Some(&b'\n') {
                    idx += 1;
                }
            }
            b'\n' => line += 1,
            _ => {}
        }
        idx += 1;
    }
    line
}

/// Length of the entry starting at the beginning of `src`, up to and
/// including the brace returning the depth to zero.
fn entry_length(src: &str) -> Option<usize> {
    let mut level = 0i64;
    for (idx, byte) in src.bytes().enumerate() {
        if byte == b'{' {
            level += 1;
        } else if byte == b'}' {
            level -= 1;
            if level == 0 {
                return Some(idx + 1);
            }
        }
    }
    None
}

/// Iterator cutting one entry after another out of the source.
///
/// A marker inside an entry that was already cut (e.g. an `@` at the
/// beginning of a line in a multi-line abstract) is reported as
/// [`Diagnostic::NestedEntry`] and skipped.
pub(crate) struct EntryBlocks<'s> {
    pub(crate) src: &'s str,
    pub(crate) starts: vec::IntoIter<usize>,
    pub(crate) last_end: usize,
}

impl<'s> Iterator for EntryBlocks<'s> {
    type Item = Result<RawEntry<'s>, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.starts.next()?;
        let line = line_at(self.src, offset);
        if offset < self.last_end {
            return Some(Err(Diagnostic::NestedEntry { offset, line }));
        }

        match entry_length(&self.src[offset..]) {
            Some(len) => {
                self.last_end = offset + len;
                Some(Ok(RawEntry {
                    text: &self.src[offset..offset + len],
                    offset,
                    line,
                }))
            }
            None => Some(Err(Diagnostic::UnterminatedEntry { line })),
        }
    }
}

pub(crate) struct Lexer {
    src: String,
}

impl Lexer {
    /// Use a file stored at a `path` as source for the lexing process.
    pub(crate) fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Lexer, io::Error> {
        let mut fd = fs::File::open(path)?;
        let mut buf = String::new();
        fd.read_to_string(&mut buf)?;
        Ok(Lexer { src: buf })
    }

    /// Use a string as source for the lexing process.
    pub(crate) fn from_string(data: String) -> Lexer {
        Lexer { src: data }
    }

    pub(crate) fn source(&self) -> &str {
        &self.src
    }

    pub(crate) fn iter(&self) -> EntryBlocks<'_> {
        EntryBlocks {
            src: &self.src,
            starts: patterns::entry_starts(&self.src).into_iter(),
            last_end: 0,
        }
    }
}
