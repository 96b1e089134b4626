use tracing::debug;

use crate::errors::{DocumentError, Result};
use crate::schema::{EntrySchema, Schema};
use crate::types::{Entry, Field};

/// Entry types which are accepted but never part of the validated output
const PSEUDO_TYPES: [&str; 2] = ["string", "crossref"];

/// Field kept regardless of the schema
const CROSSREF: &str = "crossref";

/// Checks every entry against `schema` and returns fresh entries holding
/// only the fields the schema declares for their type.
///
/// `@string` and `@crossref` entries are left out of the result.
pub fn validate(entries: &[Entry], schema: &Schema) -> Result<Vec<Entry>> {
    let mut valid = Vec::with_capacity(entries.len());
    for entry in entries {
        if PSEUDO_TYPES.contains(&entry.entry_type.as_str()) {
            continue;
        }
        let entry_schema = schema
            .get(&entry.entry_type)
            .ok_or_else(|| DocumentError::InvalidEntryType {
                entry_type: entry.entry_type.clone(),
                citation_key: entry.citation_key.clone(),
                line: entry.line,
            })?;
        valid.push(validate_entry(entry, entry_schema)?);
    }
    debug!("{} entries passed validation", valid.len());
    Ok(valid)
}

/// Keeps `crossref`, the first field matching each requirement, then every
/// optional field present, in that order.
pub fn validate_entry(entry: &Entry, schema: &EntrySchema) -> Result<Entry> {
    fn keep(field: &Field, fields: &mut Vec<Field>) {
        if !fields.iter().any(|kept| kept.key == field.key) {
            fields.push(field.clone());
        }
    }

    let mut fields: Vec<Field> = Vec::new();

    if let Some(crossref) = entry.field(CROSSREF) {
        keep(crossref, &mut fields);
    }

    for requirement in &schema.required {
        match entry.fields.iter().find(|field| requirement.accepts(&field.key)) {
            Some(field) => keep(field, &mut fields),
            None => {
                return Err(DocumentError::MissingRequiredField {
                    citation_key: entry.citation_key.clone(),
                    field: requirement.to_string(),
                    line: entry.line,
                })
            }
        }
    }

    for name in &schema.optional {
        if let Some(field) = entry.field(name) {
            keep(field, &mut fields);
        }
    }

    Ok(entry.with_fields(fields))
}
