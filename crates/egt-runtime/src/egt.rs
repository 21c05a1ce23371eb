//! Low-level reader for the EGT binary table stream.
//!
//! An EGT file starts with a null-terminated UTF-16LE header string followed
//! by a sequence of records. Each record is a one-byte marker (`M`), a
//! little-endian `u16` entry count, and that many type-tagged entries. The
//! first entry of every record is a raw byte holding the record type tag.

use std::char;

const RECORD_MARKER: u8 = b'M';

/// A single tagged entry inside a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Empty,
    UInt16(u16),
    String(String),
    Boolean(bool),
    Byte(u8),
}

impl Entry {
    fn describe(&self) -> &'static str {
        match self {
            Entry::Empty => "empty",
            Entry::UInt16(_) => "uint16",
            Entry::String(_) => "string",
            Entry::Boolean(_) => "boolean",
            Entry::Byte(_) => "byte",
        }
    }
}

/// Errors produced while deserializing grammar tables.
///
/// Any of these leaves the loader without a usable grammar; the partially
/// populated tables are discarded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unexpected end of table stream")]
    UnexpectedEof,

    #[error("malformed UTF-16 in table string")]
    InvalidString,

    #[error("expected record marker, found byte {0:#04x}")]
    BadRecordMarker(u8),

    #[error("unknown record type {0:#04x}")]
    UnknownRecord(u8),

    #[error("unknown entry tag {0:#04x}")]
    UnknownEntryTag(u8),

    #[error("entry type mismatch: expected {expected}, found {found}")]
    EntryMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{table} index {index} out of bounds (table holds {count} entries)")]
    IndexOutOfBounds {
        table: &'static str,
        index: u16,
        count: usize,
    },

    #[error("indexed record encountered before the table-counts record")]
    TablesNotSized,

    #[error("invalid symbol type {0}")]
    InvalidSymbolKind(u16),

    #[error("invalid LR action type {0}")]
    InvalidLrAction(u16),

    #[error("invalid group advance mode {0}")]
    InvalidAdvanceMode(u16),

    #[error("invalid group ending mode {0}")]
    InvalidEndingMode(u16),

    #[error("character set declared {declared} ranges but contains {found}")]
    RangeCountMismatch { declared: u16, found: u16 },

    #[error("grammar defines no symbol of type {0}")]
    MissingSymbol(&'static str),
}

/// Pull-style reader over the raw byte stream.
///
/// The reader tracks the entry count of the current record; retrieving an
/// entry past the end of a record yields [`Entry::Empty`], which the typed
/// accessors turn into an [`LoadError::EntryMismatch`].
#[derive(Debug)]
pub struct EgtReader<'a> {
    input: &'a [u8],
    pos: usize,
    header: String,
    entry_count: u16,
    entries_read: u16,
}

impl<'a> EgtReader<'a> {
    /// Wrap a byte stream and read the leading header string.
    pub fn new(input: &'a [u8]) -> Result<Self, LoadError> {
        let mut reader = EgtReader {
            input,
            pos: 0,
            header: String::new(),
            entry_count: 0,
            entries_read: 0,
        };
        reader.header = reader.read_string()?;
        Ok(reader)
    }

    /// The file header string (format/version identifier).
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Whether every entry of the current record has been retrieved.
    pub fn record_complete(&self) -> bool {
        self.entries_read >= self.entry_count
    }

    /// Number of entries declared by the current record.
    pub fn entry_count(&self) -> u16 {
        self.entry_count
    }

    /// Advance to the next record, skipping any unread entries of the
    /// current one. Tables may carry trailing entries this engine does not
    /// interpret; they are parsed and dropped here.
    pub fn next_record(&mut self) -> Result<(), LoadError> {
        while !self.record_complete() {
            self.entry()?;
        }

        let marker = self.read_byte()?;
        if marker != RECORD_MARKER {
            return Err(LoadError::BadRecordMarker(marker));
        }
        self.entry_count = self.read_u16()?;
        self.entries_read = 0;
        Ok(())
    }

    /// Retrieve the next tagged entry of the current record.
    pub fn entry(&mut self) -> Result<Entry, LoadError> {
        if self.record_complete() {
            return Ok(Entry::Empty);
        }
        self.entries_read += 1;

        match self.read_byte()? {
            b'E' => Ok(Entry::Empty),
            b'I' => Ok(Entry::UInt16(self.read_u16()?)),
            b'S' => Ok(Entry::String(self.read_string()?)),
            b'B' => Ok(Entry::Boolean(self.read_byte()? != 0)),
            b'b' => Ok(Entry::Byte(self.read_byte()?)),
            other => Err(LoadError::UnknownEntryTag(other)),
        }
    }

    /// Retrieve an entry and discard it. Used for reserved slots.
    pub fn skip(&mut self) -> Result<(), LoadError> {
        self.entry().map(drop)
    }

    pub fn u16(&mut self) -> Result<u16, LoadError> {
        match self.entry()? {
            Entry::UInt16(value) => Ok(value),
            other => Err(LoadError::EntryMismatch {
                expected: "uint16",
                found: other.describe(),
            }),
        }
    }

    pub fn string(&mut self) -> Result<String, LoadError> {
        match self.entry()? {
            Entry::String(value) => Ok(value),
            other => Err(LoadError::EntryMismatch {
                expected: "string",
                found: other.describe(),
            }),
        }
    }

    pub fn boolean(&mut self) -> Result<bool, LoadError> {
        match self.entry()? {
            Entry::Boolean(value) => Ok(value),
            other => Err(LoadError::EntryMismatch {
                expected: "boolean",
                found: other.describe(),
            }),
        }
    }

    pub fn byte(&mut self) -> Result<u8, LoadError> {
        match self.entry()? {
            Entry::Byte(value) => Ok(value),
            other => Err(LoadError::EntryMismatch {
                expected: "byte",
                found: other.describe(),
            }),
        }
    }

    fn read_byte(&mut self) -> Result<u8, LoadError> {
        let byte = *self.input.get(self.pos).ok_or(LoadError::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_u16(&mut self) -> Result<u16, LoadError> {
        let lo = self.read_byte()? as u16;
        let hi = self.read_byte()? as u16;
        Ok((hi << 8) | lo)
    }

    // Null-terminated UTF-16LE string.
    fn read_string(&mut self) -> Result<String, LoadError> {
        let mut units = Vec::new();
        loop {
            let unit = self.read_u16()?;
            if unit == 0 {
                break;
            }
            units.push(unit);
        }
        char::decode_utf16(units.into_iter())
            .collect::<Result<String, _>>()
            .map_err(|_| LoadError::InvalidString)
    }
}
