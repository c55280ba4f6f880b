//! Reading and writing catalogs through readers, paths, strings and bytes.

use std::{
    fs::File,
    io::{self, BufRead, BufWriter, Cursor, Read, Write},
    path::Path,
};

use crate::error::Error;

/// Line-oriented parsing and writing of one catalog.
///
/// Implementors supply [`Parser::from_reader`] and [`Parser::to_writer`].
/// Paths and byte slices are decoded to UTF-8 first: a byte order mark
/// selects the encoding, anything else must already be valid UTF-8.
///
/// # Example
///
/// ```rust,no_run
/// use pocatalog::{Document, traits::Parser};
/// let document = Document::read_from("ja.po")?;
/// document.write_to("ja_copy.po")?;
/// Ok::<(), pocatalog::Error>(())
/// ```
pub trait Parser: Sized {
    /// Parse from a reader yielding UTF-8 text.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>;

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        // Auto-detect BOM, decode to UTF-8; passthrough UTF-8
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded)?;
        Self::from_str(&decoded)
    }

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        self.to_writer(BufWriter::new(file))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let (decoded, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
        if had_errors {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("input is not valid {}", encoding.name()),
            )));
        }
        Self::from_str(&decoded)
    }
}
