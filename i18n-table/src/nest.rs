//! Nesting of dotted-key records back into one JSON document per language.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::{
    error::Error,
    types::{Record, RecordCollection},
};

/// Builds one JSON document per language from the records.
///
/// The result is in the same order as `languages`. Records are visited in
/// collection order, which also fixes the key order inside every produced
/// object, so callers wanting reproducible output sort the collection first.
///
/// A language without a value for a record still gets the key, with an
/// empty string as value.
///
/// # Errors
///
/// Fails with [`Error::InvalidKey`] for keys with empty segments and with
/// [`Error::KeyConflict`] when a key is used both as a value and as a
/// parent of another key (`a` and `a.b`).
pub fn nest_records(
    languages: &[String],
    records: &RecordCollection,
) -> Result<Vec<(String, Value)>, Error> {
    validate_keys(records)?;

    languages
        .iter()
        .map(|language| build_document(language, records).map(|doc| (language.clone(), doc)))
        .collect()
}

/// Builds the document for a single language.
pub fn nest_language(language: &str, records: &RecordCollection) -> Result<Value, Error> {
    validate_keys(records)?;
    build_document(language, records)
}

fn build_document(language: &str, records: &RecordCollection) -> Result<Value, Error> {
    let mut root = Map::new();
    for record in records {
        insert_record(&mut root, record, language)?;
    }
    Ok(Value::Object(root))
}

fn insert_record(
    root: &mut Map<String, Value>,
    record: &Record,
    language: &str,
) -> Result<(), Error> {
    let mut segments: Vec<&str> = record.segments().collect();
    let last = segments.pop().unwrap_or_default();

    let mut current = root;
    for segment in segments {
        current = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| Error::InvalidKey(record.key.clone()))?;
    }

    let value = record.value(language).unwrap_or_default();
    current.insert(last.to_string(), Value::String(value.to_string()));
    Ok(())
}

/// Rejects keys that cannot be nested unambiguously.
///
/// Runs over all keys before any document is built, so a conflict is
/// reported with both offending keys regardless of record order.
pub fn validate_keys(records: &RecordCollection) -> Result<(), Error> {
    let keys: HashSet<&str> = records.keys().collect();

    for key in records.keys() {
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return Err(Error::InvalidKey(key.to_string()));
        }
    }

    for key in records.keys() {
        let mut end = 0;
        while let Some(offset) = key[end..].find('.') {
            end += offset;
            let prefix = &key[..end];
            if keys.contains(prefix) {
                return Err(Error::KeyConflict {
                    leaf: prefix.to_string(),
                    nested: key.to_string(),
                });
            }
            end += 1;
        }
    }

    Ok(())
}
