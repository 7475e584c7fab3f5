use super::WriteError;
use crate::core::models::annotation::DetailRecord;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

/// First line of the detail file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailHeader {
    #[serde(rename = "ENSEMBL")]
    pub release: String,
    pub species: String,
    #[serde(rename = "GPMDB")]
    pub date: String,
    #[serde(rename = "min obs")]
    pub min_observations: u32,
}

/// Last line of the detail file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailFooter {
    pub lines: usize,
    pub accessions: usize,
    /// Accessions with at least one rendered notation.
    pub modified: usize,
}

/// Separates JSON items with `", "` and keys from values with `": "`, and escapes every
/// non-ASCII character as `\uXXXX` (UTF-16 surrogate pairs above the BMP).
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut ascii_start = 0;
        for (index, c) in fragment.char_indices() {
            if c.is_ascii() {
                continue;
            }
            writer.write_all(fragment[ascii_start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            ascii_start = index + c.len_utf8();
        }
        writer.write_all(fragment[ascii_start..].as_bytes())
    }
}

/// Writes the detail file, one JSON object per line.
pub struct DetailWriter<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> DetailWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    pub fn write_header(&mut self, header: &DetailHeader) -> Result<(), WriteError> {
        self.write_line(header)
    }

    pub fn write_record(&mut self, record: &DetailRecord) -> Result<(), WriteError> {
        self.write_line(record)
    }

    pub fn write_footer(&mut self, footer: &DetailFooter) -> Result<(), WriteError> {
        self.write_line(footer)
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn finish(mut self) -> Result<W, WriteError> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<(), WriteError> {
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut self.writer, SpacedFormatter);
        value.serialize(&mut serializer)?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }
}
