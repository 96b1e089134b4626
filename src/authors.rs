use crate::patterns;
use crate::types::{AuthorRecord, Entry, Role};

/// Splits one name into first and last name.
///
/// `Knuth| Donald E.` names the last name explicitly before the bar.
/// Otherwise the last word is the last name and everything before it the
/// first name; a single word is a last name only.
pub fn split_name(name: &str, role: Role) -> Option<AuthorRecord> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let (first_name, last_name) = match name.split_once('|') {
        Some((last, first)) => (first.trim().to_string(), last.trim().to_string()),
        None => {
            let words: Vec<&str> = name.split_whitespace().collect();
            match words.split_last() {
                Some((last, rest)) => (rest.join(" "), last.to_string()),
                None => return None,
            }
        }
    };
    Some(AuthorRecord {
        first_name,
        last_name,
        role,
    })
}

/// Splits an `and`-separated list of people.
pub fn split_people(value: &str, role: Role) -> Vec<AuthorRecord> {
    patterns::split_names(value)
        .into_iter()
        .filter_map(|name| split_name(name, role))
        .collect()
}

/// Same entry with its people derived from the `author` and `editor` fields.
pub fn fill_authors(entry: &Entry) -> Entry {
    let mut filled = entry.clone();
    for field in &entry.fields {
        let role = match Role::from_field_key(&field.key) {
            Some(role) => role,
            None => continue,
        };
        if let Some(value) = field.value.text() {
            for record in split_people(&value, role) {
                filled.add_author(record);
            }
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, FieldValue};

    fn person(first: &str, last: &str, role: Role) -> AuthorRecord {
        AuthorRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
            role,
        }
    }

    #[test]
    fn test_name_forms() {
        assert_eq!(
            split_name("Knuth| Donald E.", Role::Author),
            Some(person("Donald E.", "Knuth", Role::Author))
        );
        assert_eq!(
            split_name("Donald Ervin  Knuth", Role::Author),
            Some(person("Donald Ervin", "Knuth", Role::Author))
        );
        assert_eq!(split_name("Plato", Role::Editor), Some(person("", "Plato", Role::Editor)));
        assert_eq!(split_name("  ", Role::Author), None);
    }

    #[test]
    fn test_people_lists() {
        let people = split_people("Leslie Lamport and van Rossum| Guido and Aristotle", Role::Author);
        assert_eq!(
            people,
            vec![
                person("Leslie", "Lamport", Role::Author),
                person("Guido", "van Rossum", Role::Author),
                person("", "Aristotle", Role::Author),
            ]
        );
    }

    #[test]
    fn test_fill_authors_uses_both_roles() {
        let mut entry = Entry::new("book", "b1", 1);
        entry.fields.push(Field::new("author", "", FieldValue::String("Ann Alpha and Bob Beta".to_string())));
        entry.fields.push(Field::new("editor", "", FieldValue::String("Ann Alpha".to_string())));
        entry.fields.push(Field::new("title", "", FieldValue::String("Carl Gamma".to_string())));
        let filled = fill_authors(&entry);
        assert_eq!(filled.authors.len(), 3);
        assert_eq!(filled.authors_with_role(Role::Author).count(), 2);
        assert_eq!(filled.authors_with_role(Role::Editor).count(), 1);
        assert!(!filled.has_author_last_name("Gamma"));
    }
}
