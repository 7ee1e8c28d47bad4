//! YAML export of the balance sheet for human reading

use std::io::Write;

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::export::json::BalanceExport;
use crate::services::balance::BalanceSheet;

/// Write the balance sheet as YAML with a header comment
pub fn export_balances_yaml<W: Write>(
    sheet: &BalanceSheet,
    as_of: NaiveDate,
    writer: &mut W,
) -> FintrackResult<()> {
    let export = BalanceExport::new(sheet, as_of);
    let io_err = |e: std::io::Error| FintrackError::Export(e.to_string());

    writeln!(writer, "# fintrack balance sheet").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.generated_at).map_err(io_err)?;
    writeln!(writer, "# As of: {}", export.as_of).map_err(io_err)?;
    writeln!(writer, "# DOP and USD are tracked separately and never converted.").map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FintrackError::Yaml(e.to_string()))?;
    Ok(())
}
