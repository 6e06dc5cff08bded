pub mod csv_parser;

pub use csv_parser::{load_records_from_csv, CsvRecordLoader};
