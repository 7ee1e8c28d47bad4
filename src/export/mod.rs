//! Export module for fintrack
//!
//! Balance sheet export in three formats:
//! - CSV: spreadsheet-compatible rows
//! - JSON: machine-readable with schema versioning
//! - YAML: human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_balances_csv;
pub use self::json::{export_balances_json, BalanceExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_balances_yaml;
