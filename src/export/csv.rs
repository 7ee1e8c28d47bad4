//! CSV export of the balance sheet
//!
//! One row per account with both currency buckets as plain decimals, so the
//! file opens cleanly in a spreadsheet.

use std::io::Write;

use serde::Serialize;

use crate::error::{FintrackError, FintrackResult};
use crate::services::balance::BalanceSheet;

#[derive(Serialize)]
struct BalanceCsvRow<'a> {
    id: String,
    name: &'a str,
    institution: &'a str,
    #[serde(rename = "type")]
    account_type: &'static str,
    currency: &'static str,
    balance_dop: String,
    balance_usd: String,
}

/// Write the balance sheet as CSV
pub fn export_balances_csv<W: Write>(sheet: &BalanceSheet, writer: W) -> FintrackResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    if sheet.is_empty() {
        // Header only; serialize() writes it lazily with the first row
        csv_writer
            .write_record([
                "id",
                "name",
                "institution",
                "type",
                "currency",
                "balance_dop",
                "balance_usd",
            ])
            .map_err(|e| FintrackError::Csv(e.to_string()))?;
    }

    for line in &sheet.lines {
        let account = &line.account;
        csv_writer
            .serialize(BalanceCsvRow {
                id: account.id.as_uuid().to_string(),
                name: &account.name,
                institution: &account.institution,
                account_type: account.account_type.as_str(),
                currency: account.currency.code(),
                balance_dop: line.balance.balance_dop.to_plain_string(),
                balance_usd: line.balance.balance_usd.to_plain_string(),
            })
            .map_err(|e| FintrackError::Csv(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| FintrackError::Export(e.to_string()))?;
    Ok(())
}
