//! Reading and writing of the two file kinds: the CSV table and the
//! per-language JSON documents.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// A file format that can be loaded into memory and written back.
///
/// Implementors only provide the reader/writer pair; the file helpers wrap
/// open and create failures in [`Error::FileIo`] so messages name the file.
///
/// ```rust,no_run
/// use i18n_table::{formats::Table, traits::Parser};
///
/// let mut table = Table::read_from("locales/i18n.csv")?;
/// table.records.sort_by_key();
/// table.write_to("locales/i18n.csv")?;
/// # Ok::<(), i18n_table::Error>(())
/// ```
pub trait Parser: Sized {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>;

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::file_io(path, e))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Creates or truncates the file at `path`.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::file_io(path, e))?;
        self.to_writer(BufWriter::new(file))
    }

    /// Parses in-memory text, e.g. a table pasted into a test.
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::from_reader(Cursor::new(s))
    }
}
