//! Append-oriented CSV catalog for fetched market records.

mod csv_sink;

pub use csv_sink::CsvCatalog;
