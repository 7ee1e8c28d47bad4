//! Balance CLI command

use std::io::{self, Write};

use clap::{Args, ValueEnum};

use super::{parse_date_or_today, Session};
use crate::display::format_balance_table;
use crate::error::{FintrackError, FintrackResult};
use crate::export::{export_balances_csv, export_balances_json, export_balances_yaml};
use crate::services::BalanceSheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
    Yaml,
}

#[derive(Debug, Args)]
pub struct BalanceArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Date recorded in JSON/YAML output (YYYY-MM-DD, default today)
    #[arg(long)]
    pub as_of: Option<String>,
}

/// Print every account's DOP and USD balance
pub fn handle_balances(session: &Session, args: BalanceArgs) -> FintrackResult<()> {
    let snapshot = session.load_snapshot()?;
    let sheet = BalanceSheet::build(&snapshot.accounts, &snapshot.transactions);
    let as_of = parse_date_or_today(args.as_of.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => writeln!(out, "{}", format_balance_table(&sheet))
            .map_err(|e| FintrackError::Io(e.to_string()))?,
        OutputFormat::Json => export_balances_json(&sheet, as_of, &mut out)?,
        OutputFormat::Csv => export_balances_csv(&sheet, &mut out)?,
        OutputFormat::Yaml => export_balances_yaml(&sheet, as_of, &mut out)?,
    }
    Ok(())
}
