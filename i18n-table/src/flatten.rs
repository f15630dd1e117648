//! Flattening of per-language JSON trees into dotted-key records.
//!
//! Objects and arrays are both descended into (array items get their index
//! as path segment); every non-null scalar ends a path and becomes one value
//! of the record for that path. A `null` leaf leaves the language absent.
//!
//! Object keys must be non-empty and free of `.`, otherwise two different
//! paths would collapse into one dotted key.

use serde_json::Value;
use tracing::debug;

use crate::{error::Error, types::RecordCollection};

/// Flattens every `(language, document)` pair into one collection.
///
/// Documents are processed in the given order, so for a language that
/// appears twice the later document wins on shared keys.
///
/// # Example
///
/// ```rust
/// use i18n_table::flatten::flatten_documents;
/// use serde_json::json;
///
/// let de = json!({ "a": { "b": "Hallo" } });
/// let en = json!({ "a": { "b": "Hello" } });
/// let records = flatten_documents([("de", &de), ("en", &en)])?;
///
/// let record = records.get("a.b").unwrap();
/// assert_eq!(record.value("de"), Some("Hallo"));
/// assert_eq!(record.value("en"), Some("Hello"));
/// # Ok::<(), i18n_table::Error>(())
/// ```
pub fn flatten_documents<'a, I, L>(documents: I) -> Result<RecordCollection, Error>
where
    I: IntoIterator<Item = (L, &'a Value)>,
    L: AsRef<str>,
{
    let mut records = RecordCollection::new();
    for (language, root) in documents {
        flatten_into(&mut records, language.as_ref(), root)?;
    }
    Ok(records)
}

/// Flattens one language's document into an existing collection.
///
/// Existing records get their `language` slot overwritten; unknown keys are
/// appended as new records.
pub fn flatten_into(
    records: &mut RecordCollection,
    language: &str,
    root: &Value,
) -> Result<(), Error> {
    let mut path = String::new();
    walk(records, language, &mut path, root)
}

fn walk(
    records: &mut RecordCollection,
    language: &str,
    path: &mut String,
    node: &Value,
) -> Result<(), Error> {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                if key.is_empty() || key.contains('.') {
                    return Err(Error::InvalidKey(format!(
                        "`{}` has object key `{}` under `{}`; keys must be non-empty and contain no `.`",
                        language, key, path
                    )));
                }
                descend(records, language, path, key, child)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                descend(records, language, path, &index.to_string(), child)?;
            }
            Ok(())
        }
        Value::Null if !path.is_empty() => {
            debug!(key = %path, language, "null leaf, no value");
            Ok(())
        }
        leaf => {
            if path.is_empty() {
                return Err(Error::InvalidKey(format!(
                    "document root for `{}` is a plain value, expected an object",
                    language
                )));
            }
            debug!(key = %path, language, "flattened leaf");
            records.upsert(path, language, leaf_to_string(leaf));
            Ok(())
        }
    }
}

fn descend(
    records: &mut RecordCollection,
    language: &str,
    path: &mut String,
    segment: &str,
    child: &Value,
) -> Result<(), Error> {
    let restore = path.len();
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(segment);
    let result = walk(records, language, path, child);
    path.truncate(restore);
    result
}

/// String form of a scalar: strings unquoted, numbers in their source text.
fn leaf_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
