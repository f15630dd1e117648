//! Core record model shared by the CSV table and the JSON documents.
//! The flattener fills a [`RecordCollection`]; the nester and the CSV writer read it.

use std::{collections::HashMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// One dotted translation key plus its value for every language that has one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Record {
    /// Dot-separated path, e.g. `menu.file.open`.
    pub key: String,

    /// Language code → translated text. A language is only present when a
    /// source actually provided a value for this key.
    #[serde(default)]
    pub values: HashMap<String, String>,
}

impl Record {
    /// Creates a record without any values.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: HashMap::new(),
        }
    }

    /// Sets (or overwrites) the value for a language.
    pub fn set_value(&mut self, language: impl Into<String>, value: impl Into<String>) {
        self.values.insert(language.into(), value.into());
    }

    /// Gets the value for a language, if present.
    pub fn value(&self, language: &str) -> Option<&str> {
        self.values.get(language).map(String::as_str)
    }

    pub fn has_value(&self, language: &str) -> bool {
        self.values.contains_key(language)
    }

    /// Splits the key into its path segments.
    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.key.split('.')
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut languages: Vec<_> = self.values.iter().collect();
        languages.sort();
        write!(
            f,
            "Record {{ key: {}, values: {{ {} }} }}",
            self.key,
            languages
                .iter()
                .map(|(lang, value)| format!("{}: {}", lang, value))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Ordered records with unique keys.
///
/// Records keep insertion order until [`RecordCollection::sort_by_key`] is
/// called. Key lookups go through an index map, so building a collection from
/// many documents stays linear in the number of leaves.
#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.records.iter_mut()
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        self.index.get(key).map(|&i| &mut self.records[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Sets `values[language]` on the record with `key`, appending a new
    /// record when the key is not known yet.
    pub fn upsert(&mut self, key: &str, language: &str, value: impl Into<String>) {
        match self.index.get(key) {
            Some(&i) => self.records[i].set_value(language, value),
            None => {
                let mut record = Record::new(key);
                record.set_value(language, value);
                self.push_new(record);
            }
        }
    }

    /// Adds a whole record. If the key already exists, the incoming values
    /// are merged into the existing record, overwriting per language.
    pub fn insert(&mut self, record: Record) {
        match self.index.get(&record.key) {
            Some(&i) => self.records[i].values.extend(record.values),
            None => self.push_new(record),
        }
    }

    /// Sorts records lexicographically by key.
    pub fn sort_by_key(&mut self) {
        self.records.sort_by(|a, b| a.key.cmp(&b.key));
        self.reindex();
    }

    /// All keys in current order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    fn push_new(&mut self, record: Record) {
        self.index.insert(record.key.clone(), self.records.len());
        self.records.push(record);
    }

    fn reindex(&mut self) {
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.key.clone(), i))
            .collect();
    }
}

impl FromIterator<Record> for RecordCollection {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        let mut collection = RecordCollection::new();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl PartialEq for RecordCollection {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Eq for RecordCollection {}
