//! JSON export of the balance sheet with schema versioning

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{FintrackError, FintrackResult};
use crate::services::balance::{AccountBalance, BalanceLine, BalanceSheet};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Balance sheet export structure
#[derive(Debug, Clone, Serialize)]
pub struct BalanceExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Calendar date the balances were computed for
    pub as_of: NaiveDate,

    pub accounts: Vec<BalanceLine>,

    pub totals: AccountBalance,
}

impl BalanceExport {
    pub fn new(sheet: &BalanceSheet, as_of: NaiveDate) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            as_of,
            accounts: sheet.lines.clone(),
            totals: sheet.totals,
        }
    }
}

/// Write the balance sheet as pretty-printed JSON
pub fn export_balances_json<W: Write>(
    sheet: &BalanceSheet,
    as_of: NaiveDate,
    writer: &mut W,
) -> FintrackResult<()> {
    let export = BalanceExport::new(sheet, as_of);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| FintrackError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FintrackError::Export(e.to_string()))?;
    Ok(())
}
