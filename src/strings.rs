use std::collections::HashMap;

use tracing::debug;

use crate::config::RedefinitionPolicy;
use crate::errors::{Diagnostic, Diagnostics};
use crate::resolver;
use crate::types::{Entry, Field, FieldValue};

/// Names defined with `@string`, mapped to their text.
///
/// Names are case-sensitive and kept as written in the source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StringTable {
    strings: HashMap<String, String>,
}

impl StringTable {
    pub fn new() -> StringTable {
        StringTable {
            strings: HashMap::new(),
        }
    }

    /// Collects the definitions of all `@string` entries, in document order.
    ///
    /// A definition may refer to names defined before it, either directly
    /// (`b = a`) or in a concatenation (`b = a # "x"`).
    pub fn from_entries(
        entries: &[Entry],
        policy: RedefinitionPolicy,
        diagnostics: &mut Diagnostics,
    ) -> StringTable {
        let mut table = StringTable::new();
        for entry in entries.iter().filter(|e| e.is_string_definition()) {
            for field in &entry.fields {
                let name = defined_name(field);
                let value = match &field.value {
                    FieldValue::String(text) => Some(text.clone()),
                    FieldValue::Number(number) => Some(number.to_string()),
                    FieldValue::Reference(other) => table.get(other).map(str::to_string),
                    FieldValue::Concatenation(chain) => {
                        resolver::evaluate_concatenation(chain, &table).ok()
                    }
                    FieldValue::Unresolved => None,
                };
                match value {
                    Some(value) => table.define(name, value, policy, diagnostics),
                    None => diagnostics.report(Diagnostic::NonStringDefinition {
                        name: name.to_string(),
                    }),
                }
            }
        }
        debug!("string table holds {} definitions", table.len());
        table
    }

    /// Adds a definition; an existing one is replaced or kept according to `policy`.
    pub fn define(
        &mut self,
        name: &str,
        value: String,
        policy: RedefinitionPolicy,
        diagnostics: &mut Diagnostics,
    ) {
        if self.strings.contains_key(name) {
            diagnostics.report(Diagnostic::StringRedefinition {
                name: name.to_string(),
            });
            if policy == RedefinitionPolicy::KeepFirst {
                return;
            }
        }
        self.strings.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// The name as written left of `=`; field keys themselves are lowercased.
fn defined_name(field: &Field) -> &str {
    match field.raw.split_once('=') {
        Some((name, _)) => name.trim(),
        None => &field.key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use std::error;
    use std::str::FromStr;

    fn table_of(src: &str, policy: RedefinitionPolicy) -> Result<(StringTable, Diagnostics), Box<dyn error::Error>> {
        let mut diagnostics = Diagnostics::new();
        let entries = Parser::from_str(src)?.entries(&mut diagnostics);
        let table = StringTable::from_entries(&entries, policy, &mut diagnostics);
        Ok((table, diagnostics))
    }

    #[test]
    fn test_names_keep_their_case() -> Result<(), Box<dyn error::Error>> {
        let (table, _) = table_of("@string{Jan = \"January\"}\n@book{b, Jan = \"x\"}", RedefinitionPolicy::Overwrite)?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Jan"), Some("January"));
        assert_eq!(table.get("jan"), None);
        Ok(())
    }

    #[test]
    fn test_redefinition_policies() -> Result<(), Box<dyn error::Error>> {
        let src = "@string{pub = \"first\"}\n@string{pub = \"second\"}";

        let (table, diagnostics) = table_of(src, RedefinitionPolicy::Overwrite)?;
        assert_eq!(table.get("pub"), Some("second"));
        assert!(diagnostics.contains(&Diagnostic::StringRedefinition { name: "pub".to_string() }));

        let (table, diagnostics) = table_of(src, RedefinitionPolicy::KeepFirst)?;
        assert_eq!(table.get("pub"), Some("first"));
        assert_eq!(diagnostics.len(), 1);
        Ok(())
    }

    #[test]
    fn test_repeats_within_one_block_follow_policy() -> Result<(), Box<dyn error::Error>> {
        let src = "@string{p = \"first\", p = \"second\"}";

        let (table, diagnostics) = table_of(src, RedefinitionPolicy::Overwrite)?;
        assert_eq!(table.get("p"), Some("second"));
        assert_eq!(
            diagnostics.iter().collect::<Vec<_>>(),
            vec![&Diagnostic::StringRedefinition { name: "p".to_string() }]
        );

        let (table, _) = table_of(src, RedefinitionPolicy::KeepFirst)?;
        assert_eq!(table.get("p"), Some("first"));
        Ok(())
    }

    #[test]
    fn test_names_differing_in_case_within_one_block() -> Result<(), Box<dyn error::Error>> {
        let (table, diagnostics) = table_of(
            "@string{Jan = \"January\", JAN = \"JANUARY\"}",
            RedefinitionPolicy::Overwrite,
        )?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Jan"), Some("January"));
        assert_eq!(table.get("JAN"), Some("JANUARY"));
        assert!(diagnostics.is_empty());
        Ok(())
    }

    #[test]
    fn test_definitions_build_on_earlier_ones() -> Result<(), Box<dyn error::Error>> {
        let src = r#"
@string{aw = "Addison-Wesley"}
@string{awp = aw # " Publishing", same = aw, year = 1973}
@string{broken = nowhere}
"#;
        let (table, diagnostics) = table_of(src, RedefinitionPolicy::Overwrite)?;
        assert_eq!(table.get("awp"), Some("Addison-Wesley Publishing"));
        assert_eq!(table.get("same"), Some("Addison-Wesley"));
        assert_eq!(table.get("year"), Some("1973"));
        assert_eq!(table.get("broken"), None);
        assert!(diagnostics.contains(&Diagnostic::NonStringDefinition { name: "broken".to_string() }));
        Ok(())
    }
}
