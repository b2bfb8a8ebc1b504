//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use care_diary_core::Sheet;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};

/// Writes a record page as CSV
pub struct CsvWriter;

impl CsvWriter {
    /// Write a sheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        sheet: &Sheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(sheet, file, options)
    }

    /// Write rows 1..=last row and columns 1..=last column of a sheet
    pub fn write<W: Write>(sheet: &Sheet, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(false)
            .from_writer(writer);

        let max_col = sheet.max_col();
        for row in 1..=sheet.max_row() {
            let record: Vec<String> = (1..=max_col).map(|col| sheet.text_at(row, col)).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_page() {
        let mut sheet = Sheet::new("宮本");
        sheet.set_value("A2", "令和7年").unwrap();
        sheet.set_value("C4", "a, b").unwrap();
        sheet.set_value("D4", "Sato").unwrap();

        let mut out = Vec::new();
        let options = CsvWriteOptions {
            line_terminator: LineTerminator::LF,
            ..Default::default()
        };
        CsvWriter::write(&sheet, &mut out, &options).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, ",,,\n令和7年,,,\n,,,\n,,\"a, b\",Sato\n");
    }
}
