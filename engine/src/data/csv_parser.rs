use csv::{ReaderBuilder, StringRecord};
use serde_json::{Number, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use crate::error::EngineError;
use crate::series::RawRecord;

// Number parsing for exports written with a comma decimal separator,
// e.g. "1 234,56" or "1.234,56".
pub mod comma_decimal {
    /// Parses `"1.234,56"`, `"1 234,56"` or `"123,45"` into f64.
    pub fn parse_decimal(s: &str) -> Option<f64> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '.' && *c != '\u{a0}')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        normalized.parse::<f64>().ok().filter(|f| f.is_finite())
    }

}

pub struct CsvRecordLoader;

impl CsvRecordLoader {
    /// Reads a headered CSV into raw records. The delimiter (`,` or `;`) is taken
    /// from the header line. Empty cells become null, numeric cells numbers and
    /// everything else strings.
    pub fn load_records_from_csv(file_path: impl AsRef<Path>) -> Result<Vec<RawRecord>, EngineError> {
        let path = file_path.as_ref();
        let mut file = File::open(path)?;

        let mut header_line = String::new();
        BufReader::new(&mut file).read_line(&mut header_line)?;
        let delimiter = Self::detect_delimiter(&header_line);
        file.seek(SeekFrom::Start(0))?;

        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers()?.clone();
        if headers.iter().all(str::is_empty) {
            return Err(EngineError::DataFormatError(format!("CSV file '{}' has no header", path.display())));
        }

        let mut records = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let row = result.map_err(|e| {
                EngineError::DataFormatError(format!("Error reading CSV record at line {}: {}", idx + 2, e))
            })?;
            records.push(Self::to_record(&headers, &row, delimiter == b';'));
        }

        tracing::info!(path = %path.display(), count = records.len(), "Loaded CSV records");
        Ok(records)
    }

    fn detect_delimiter(header_line: &str) -> u8 {
        let semicolons = header_line.matches(';').count();
        let commas = header_line.matches(',').count();
        if semicolons > commas {
            b';'
        } else {
            b','
        }
    }

    fn to_record(headers: &StringRecord, row: &StringRecord, comma_decimals: bool) -> RawRecord {
        headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| (name.to_string(), Self::cell_value(cell, comma_decimals)))
            .collect()
    }

    fn cell_value(cell: &str, comma_decimals: bool) -> Value {
        if cell.is_empty() {
            return Value::Null;
        }
        if let Ok(int) = cell.parse::<i64>() {
            return Value::Number(int.into());
        }
        let number = match cell.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(f),
            _ if comma_decimals && cell.contains(',') => comma_decimal::parse_decimal(cell),
            _ => None,
        };
        number
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(cell.to_string()))
    }
}

pub fn load_records_from_csv(file_path: impl AsRef<Path>) -> Result<Vec<RawRecord>, EngineError> {
    CsvRecordLoader::load_records_from_csv(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::record::{field_number, field_timestamp};
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_comma_separated_records() {
        let tmp_file = create_test_csv(
            "\
timestamp,pair,last,volume_24h
2024-01-01T00:00:00Z,XXBTZEUR,42000.5,12
2024-01-01T01:00:00Z,XXBTZEUR,,13",
        );
        let records = load_records_from_csv(tmp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["pair"], json!("XXBTZEUR"));
        assert_eq!(field_number(&records[0], "last"), Some(42000.5));
        assert_eq!(records[0]["volume_24h"], json!(12));
        assert!(field_timestamp(&records[0], "timestamp").is_some());
        assert_eq!(records[1]["last"], Value::Null);
    }

    #[test]
    fn test_load_semicolon_separated_with_comma_decimals() {
        let tmp_file = create_test_csv(
            "\
date;prix;volume
2024-12-30;124,08;600.822.115,84",
        );
        let records = load_records_from_csv(tmp_file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(field_number(&records[0], "prix"), Some(124.08));
        assert_eq!(field_number(&records[0], "volume"), Some(600822115.84));
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let tmp_file = create_test_csv("timestamp,last");
        assert!(load_records_from_csv(tmp_file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_ragged_row_is_a_format_error() {
        let tmp_file = create_test_csv("timestamp,last\n1,2,3");
        let err = load_records_from_csv(tmp_file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_records_from_csv("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, EngineError::IoError { .. }));
    }
}
