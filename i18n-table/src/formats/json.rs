//! Support for nested per-language JSON documents.
//!
//! Key order of the source is kept on read, and output is pretty-printed
//! with `&`, `<` and `>` written literally so i18n loaders see the same text
//! that was translated.
use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use serde_json::Value;

use crate::{error::Error, traits::Parser};

/// One language's translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Value,
}

impl Document {
    pub fn new(root: Value) -> Self {
        Self { root }
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Document { root }
    }
}

impl Parser for Document {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let root = serde_json::from_reader(reader).map_err(Error::Parse)?;
        Ok(Document { root })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, &self.root).map_err(Error::Parse)?;
        writer.write_all(b"\n").map_err(Error::Io)?;
        writer.flush().map_err(Error::Io)
    }

    /// Reads a document, attaching the path to I/O and syntax errors.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::file_io(path, e))?;
        let root = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            if e.is_io() {
                Error::file_io(path, std::io::Error::from(e))
            } else {
                Error::json_file(path, e)
            }
        })?;
        Ok(Document { root })
    }
}
