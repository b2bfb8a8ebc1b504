//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use care_diary_core::Sheet;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;

/// Reads a CSV shift log into a [`Sheet`]
///
/// Every record becomes one sheet row, starting at row 1 (the column header
/// of the log stays in row 1). Fields are kept as text; empty fields leave the
/// cell unset.
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a sheet named after the file stem
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Sheet> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Sheet1".into());
        let file = File::open(path)?;
        Self::read(file, &name, options)
    }

    /// Read CSV from a reader into a sheet
    pub fn read<R: Read>(reader: R, name: &str, options: &CsvReadOptions) -> CsvResult<Sheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(options.flexible)
            .from_reader(reader);

        let mut sheet = Sheet::new(name);
        let mut row = 0u32;

        for result in csv_reader.records() {
            let record = result?;
            row += 1;

            for (i, field) in record.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                // Excel exports often carry a BOM on the first field
                let field = if row == 1 && i == 0 {
                    field.trim_start_matches('\u{feff}')
                } else {
                    field
                };
                sheet.set_value_at(row, i as u16 + 1, field)?;
            }
        }

        log::debug!("read {} rows into '{}'", row, name);
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_rows_are_one_based() {
        let data = "\u{feff}氏名,記事\n宮本,朝食全量\n,\"昼食\n半量\"\n";
        let sheet = CsvReader::read(Cursor::new(data), "15日裏", &CsvReadOptions::default()).unwrap();

        assert_eq!(sheet.name(), "15日裏");
        assert_eq!(sheet.text_at(1, 1), "氏名");
        assert_eq!(sheet.text_at(2, 1), "宮本");
        assert_eq!(sheet.text_at(3, 1), "");
        assert_eq!(sheet.text_at(3, 2), "昼食\n半量");
        assert_eq!(sheet.max_row(), 3);
    }

    #[test]
    fn test_blank_records_keep_row_numbers() {
        let data = "a,b\n,\nc,d\n";
        let sheet = CsvReader::read(Cursor::new(data), "log", &CsvReadOptions::default()).unwrap();
        assert_eq!(sheet.text_at(3, 1), "c");
    }

    #[test]
    fn test_custom_delimiter() {
        let data = "a\tb\n";
        let options = CsvReadOptions {
            delimiter: b'\t',
            ..Default::default()
        };
        let sheet = CsvReader::read(Cursor::new(data), "log", &options).unwrap();
        assert_eq!(sheet.text_at(1, 2), "b");
    }
}
