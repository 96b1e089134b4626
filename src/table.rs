use std::fmt;

use crate::types::{Entry, Field, Role};

/// Renders an entry as a box-drawn table:
///
/// ```text
/// ╔═════════════════════╗
/// ║ BOOK (knuth73)      ║
/// ╠════════╤════════════╣
/// ║ author │ • D. Knuth ║
/// ╟────────┼────────────╢
/// ║ year   │ 1973       ║
/// ╚════════╧════════════╝
/// ```
///
/// People fields list one person per line, multi-line values keep their
/// line breaks; both stay within one row.
pub fn render(entry: &Entry) -> String {
    let rows: Vec<(&str, Vec<String>)> = entry
        .fields
        .iter()
        .map(|field| (field.key.as_str(), cell_lines(entry, field)))
        .collect();

    let mut key_width = 0;
    let mut value_width = 0;
    for (key, lines) in &rows {
        key_width = key_width.max(width(key));
        for line in lines {
            value_width = value_width.max(width(line));
        }
    }
    key_width += 2;
    value_width += 2;

    let header = format!("{} ({})", entry.entry_type.to_uppercase(), entry.citation_key);
    if width(&header) > key_width + value_width {
        value_width = width(&header) - key_width + 1;
    }

    let mut out = String::new();
    out.push_str(&format!("╔{}╗\n", "═".repeat(key_width + value_width + 1)));
    out.push_str(&format!("║ {:<w$}║\n", header, w = key_width + value_width));

    if rows.is_empty() {
        out.push_str(&format!("╚{}╝", "═".repeat(key_width + value_width + 1)));
        return out;
    }

    out.push_str(&format!("╠{}╤{}╣\n", "═".repeat(key_width), "═".repeat(value_width)));
    for (idx, (key, lines)) in rows.iter().enumerate() {
        for (line_idx, line) in lines.iter().enumerate() {
            let key_cell = if line_idx == 0 { *key } else { "" };
            out.push_str(&format!(
                "║ {:<kw$}│ {:<vw$}║\n",
                key_cell,
                line,
                kw = key_width - 1,
                vw = value_width - 1
            ));
        }
        if idx + 1 < rows.len() {
            out.push_str(&format!("╟{}┼{}╢\n", "─".repeat(key_width), "─".repeat(value_width)));
        } else {
            out.push_str(&format!("╚{}╧{}╝", "═".repeat(key_width), "═".repeat(value_width)));
        }
    }
    out
}

/// Lines shown in the value column for one field
fn cell_lines(entry: &Entry, field: &Field) -> Vec<String> {
    if let Some(role) = Role::from_field_key(&field.key) {
        let people: Vec<String> = entry
            .authors_with_role(role)
            .map(|person| format!("• {}", person))
            .collect();
        if !people.is_empty() {
            return people;
        }
    }
    field
        .value
        .to_string()
        .split("\r\n")
        .flat_map(|part| part.split(|c: char| c == '\r' || c == '\n'))
        .map(str::to_string)
        .collect()
}

fn width(text: &str) -> usize {
    text.chars().count()
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authors::fill_authors;
    use crate::types::FieldValue;

    #[test]
    fn test_simple_table() {
        let mut entry = Entry::new("book", "knuth73", 1);
        entry.fields.push(Field::new("author", "", FieldValue::String("D. Knuth".to_string())));
        entry.fields.push(Field::new("year", "", FieldValue::Number(1973)));
        let entry = fill_authors(&entry);

        let expected = "\
╔═════════════════════╗
║ BOOK (knuth73)      ║
╠════════╤════════════╣
║ author │ • D. Knuth ║
╟────────┼────────────╢
║ year   │ 1973       ║
╚════════╧════════════╝";
        assert_eq!(render(&entry), expected);
        assert_eq!(entry.to_string(), expected);
    }

    #[test]
    fn test_multiline_values_stack() {
        let mut entry = Entry::new("misc", "m", 1);
        entry.fields.push(Field::new("note", "", FieldValue::String("first\r\nsecond\nthird".to_string())));
        let table = render(&entry);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[3], "║ note │ first  ║");
        assert_eq!(lines[4], "║      │ second ║");
        assert_eq!(lines[5], "║      │ third  ║");
    }

    #[test]
    fn test_entry_without_fields() {
        let entry = Entry::new("misc", "empty", 1);
        let table = render(&entry);
        assert_eq!(table.lines().count(), 3);
        assert!(table.ends_with('╝'));
    }
}
