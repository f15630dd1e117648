use i18n_table::formats::Table;
use i18n_table::traits::Parser;
use i18n_table::{RecordCollection, flatten_documents, nest_records};
use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

type Dataset = BTreeMap<String, (Option<String>, Option<String>)>;

fn key_strategy() -> impl Strategy<Value = String> {
    // Same depth for every key, so no key is a prefix of another.
    proptest::string::string_regex("[a-c][a-z0-9_]{0,3}\\.[a-d][a-z0-9_]{0,5}\\.[a-z]{1,4}")
        .expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?&<>;\"äöü]{0,20}")
        .expect("valid value regex")
}

fn values_strategy() -> impl Strategy<Value = (Option<String>, Option<String>)> {
    // Every key has a value in at least one language.
    (value_strategy(), value_strategy(), 0..3u8).prop_map(|(de, en, mode)| match mode {
        0 => (Some(de), None),
        1 => (None, Some(en)),
        _ => (Some(de), Some(en)),
    })
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::btree_map(key_strategy(), values_strategy(), 1..12)
}

fn insert_path(root: &mut Map<String, Value>, key: &str, value: Value) {
    let mut segments: Vec<&str> = key.split('.').collect();
    let last = segments.pop().unwrap();
    let mut current = root;
    for segment in segments {
        current = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .unwrap();
    }
    current.insert(last.to_string(), value);
}

fn document(
    data: &Dataset,
    pick: impl Fn(&(Option<String>, Option<String>)) -> Option<&String>,
) -> Value {
    let mut root = Map::new();
    for (key, values) in data {
        if let Some(value) = pick(values) {
            insert_path(&mut root, key, Value::String(value.clone()));
        }
    }
    Value::Object(root)
}

fn expected_document(
    data: &Dataset,
    pick: impl Fn(&(Option<String>, Option<String>)) -> Option<&String>,
) -> Value {
    let mut root = Map::new();
    for (key, values) in data {
        let value = pick(values).cloned().unwrap_or_default();
        insert_path(&mut root, key, Value::String(value));
    }
    Value::Object(root)
}

fn languages() -> Vec<String> {
    vec!["de".to_string(), "en".to_string()]
}

fn canonical(records: &RecordCollection) -> BTreeMap<String, BTreeMap<String, String>> {
    records
        .iter()
        .map(|r| {
            (
                r.key.clone(),
                r.values.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            )
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn flatten_then_nest_reproduces_documents(data in dataset_strategy()) {
        let de = document(&data, |(de, _)| de.as_ref());
        let en = document(&data, |(_, en)| en.as_ref());

        let mut records = flatten_documents([("de", &de), ("en", &en)])
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        records.sort_by_key();
        let nested = nest_records(&languages(), &records)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(nested.len(), 2);
        prop_assert_eq!(&nested[0].0, "de");
        prop_assert_eq!(&nested[0].1, &expected_document(&data, |(de, _)| de.as_ref()));
        prop_assert_eq!(&nested[1].0, "en");
        prop_assert_eq!(&nested[1].1, &expected_document(&data, |(_, en)| en.as_ref()));
    }

    #[test]
    fn flattened_keys_are_unique(data in dataset_strategy()) {
        let de = document(&data, |(de, _)| de.as_ref());
        let en = document(&data, |(_, en)| en.as_ref());

        let records = flatten_documents([("de", &de), ("en", &en)])
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let keys: HashSet<&str> = records.keys().collect();
        prop_assert_eq!(keys.len(), records.len());
        prop_assert_eq!(records.len(), data.len());
    }

    #[test]
    fn flattening_is_idempotent(data in dataset_strategy()) {
        let de = document(&data, |(de, _)| de.as_ref());
        let en = document(&data, |(_, en)| en.as_ref());

        let first = flatten_documents([("de", &de), ("en", &en)])
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second = flatten_documents([("de", &de), ("en", &en)])
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(canonical(&first), canonical(&second));
    }

    #[test]
    fn csv_table_roundtrip_keeps_non_empty_values(data in dataset_strategy()) {
        let de = document(&data, |(de, _)| de.as_ref());
        let en = document(&data, |(_, en)| en.as_ref());
        let mut records = flatten_documents([("de", &de), ("en", &en)])
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        records.sort_by_key();

        let table = Table::new(languages(), records);
        let mut bytes = Vec::new();
        table.to_writer(&mut bytes).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let parsed = Table::from_reader(bytes.as_slice()).map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(&parsed.languages, &table.languages);
        prop_assert_eq!(parsed.records.len(), table.records.len());
        for record in table.records.iter() {
            let read = parsed.records.get(&record.key).unwrap();
            for language in &table.languages {
                let expected = record.value(language).filter(|v| !v.is_empty());
                prop_assert_eq!(read.value(language), expected);
            }
        }
    }
}
