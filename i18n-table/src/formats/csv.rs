//! Support for the semicolon-separated translation table.
//!
//! The first row is the header: `key` followed by one column per language.
//! Every further row holds one dotted key and its translations. On write all
//! fields are quoted, which keeps spreadsheet applications from reinterpreting
//! values like `001` or `TRUE`.
use std::{
    fs::File,
    io::{BufRead, Read},
    path::Path,
};

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use tracing::warn;

use crate::{
    error::Error,
    traits::Parser,
    types::{Record, RecordCollection},
};

/// Field delimiter of the table.
pub const DELIMITER: u8 = b';';
/// Quote character of the table.
pub const QUOTE: u8 = b'"';
/// Header of the key column.
pub const KEY_HEADER: &str = "key";

/// A translation table: ordered language columns plus one record per key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub languages: Vec<String>,
    pub records: RecordCollection,
}

impl Table {
    pub fn new(languages: Vec<String>, records: RecordCollection) -> Self {
        Self { languages, records }
    }

    /// The header row as written to the file.
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(KEY_HEADER)
            .chain(self.languages.iter().map(String::as_str))
            .collect()
    }

    /// One row per record; languages without a value are written as empty cells.
    fn row<'a>(&self, record: &'a Record) -> Vec<&'a str> {
        std::iter::once(record.key.as_str())
            .chain(
                self.languages
                    .iter()
                    .map(|lang| record.value(lang).unwrap_or_default()),
            )
            .collect()
    }
}

impl Parser for Table {
    /// Parse from any reader. Empty cells are treated as missing translations.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(DELIMITER)
            .quote(QUOTE)
            .flexible(true)
            .from_reader(reader);

        let mut lines = rdr.records();
        let header = match lines.next() {
            Some(header) => header.map_err(Error::CsvParse)?,
            None => {
                return Err(Error::DataMismatch(
                    "CSV is empty, expected a header row".to_string(),
                ));
            }
        };

        let mut columns = header.iter();
        let first = columns.next().map(|c| c.trim_start_matches('\u{feff}').trim());
        match first {
            Some(first) if first.eq_ignore_ascii_case(KEY_HEADER) => {}
            other => {
                return Err(Error::DataMismatch(format!(
                    "first header column must be `{}`, found `{}`",
                    KEY_HEADER,
                    other.unwrap_or_default()
                )));
            }
        }

        let mut languages: Vec<String> = Vec::new();
        for column in columns {
            let language = column.trim();
            if language.is_empty() {
                return Err(Error::DataMismatch(
                    "header contains an empty language column".to_string(),
                ));
            }
            if languages.iter().any(|l| l == language) {
                return Err(Error::DataMismatch(format!(
                    "language `{}` appears twice in the header",
                    language
                )));
            }
            languages.push(language.to_string());
        }

        let mut records = RecordCollection::new();
        for line in lines {
            let line = line.map_err(Error::CsvParse)?;
            let line_number = line.position().map(|p| p.line()).unwrap_or_default();

            if line.len() > languages.len() + 1 {
                return Err(Error::DataMismatch(format!(
                    "line {} has {} fields, header has {}",
                    line_number,
                    line.len(),
                    languages.len() + 1
                )));
            }

            let key = line.get(0).unwrap_or_default().trim();
            if key.is_empty() {
                if line.iter().all(str::is_empty) {
                    continue;
                }
                return Err(Error::DataMismatch(format!(
                    "line {} has values but no key",
                    line_number
                )));
            }

            if records.contains_key(key) {
                warn!(key, line = line_number, "duplicate key in CSV, merging rows");
            }

            let mut record = Record::new(key);
            for (language, value) in languages.iter().zip(line.iter().skip(1)) {
                if !value.is_empty() {
                    record.set_value(language.clone(), value);
                }
            }
            records.insert(record);
        }

        Ok(Table { languages, records })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = WriterBuilder::new()
            .delimiter(DELIMITER)
            .quote(QUOTE)
            .quote_style(QuoteStyle::Always)
            .from_writer(writer);

        wtr.write_record(self.header()).map_err(Error::CsvParse)?;
        for record in &self.records {
            wtr.write_record(self.row(record)).map_err(Error::CsvParse)?;
        }

        wtr.flush().map_err(Error::Io)?;
        Ok(())
    }

    /// Override default file reading to support BOM-aware decoding
    /// (spreadsheet exports are often UTF-8 with BOM or UTF-16).
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::file_io(path, e))?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder
            .read_to_string(&mut decoded)
            .map_err(|e| Error::file_io(path, e))?;

        Self::from_str(&decoded)
    }
}
