//! Budget and spending CLI commands

use clap::Args;

use super::{parse_currency, parse_date, parse_month, today, Session};
use crate::display::{format_budget_summary, format_spending};
use crate::error::{FintrackError, FintrackResult};
use crate::services::{budget_summary, month_bounds, spending_by_category};

#[derive(Debug, Args)]
pub struct BudgetsArgs {
    /// Month to report (YYYY-MM, default current month)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Only show budgets in this currency
    #[arg(short, long)]
    pub currency: Option<String>,
}

#[derive(Debug, Args)]
pub struct SpendingArgs {
    /// Start date (YYYY-MM-DD, default first day of this month)
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD, default last day of this month)
    #[arg(long)]
    pub to: Option<String>,

    /// Currency to report (default from settings)
    #[arg(short, long)]
    pub currency: Option<String>,
}

/// Show spending against each budget for one month
pub fn handle_budgets(session: &Session, args: BudgetsArgs) -> FintrackResult<()> {
    let snapshot = session.load_snapshot()?;
    let month = match args.month.as_deref() {
        Some(month) => parse_month(month)?,
        None => today(),
    };
    let currency = args.currency.as_deref().map(parse_currency).transpose()?;

    let mut statuses = budget_summary(&snapshot.budgets, &snapshot.transactions, month);
    if let Some(currency) = currency {
        statuses.retain(|s| s.currency == currency);
    }

    println!("Budgets for {}", month.format("%B %Y"));
    println!();
    print!("{}", format_budget_summary(&statuses));
    if statuses.is_empty() {
        println!();
    }
    Ok(())
}

/// Show expenses grouped by category over a date range
pub fn handle_spending(session: &Session, args: SpendingArgs) -> FintrackResult<()> {
    let snapshot = session.load_snapshot()?;
    let (month_start, month_end) = month_bounds(today());
    let from = args.from.as_deref().map(parse_date).transpose()?.unwrap_or(month_start);
    let to = args.to.as_deref().map(parse_date).transpose()?.unwrap_or(month_end);
    if from > to {
        return Err(FintrackError::Validation(format!(
            "Start date {} is after end date {}",
            from, to
        )));
    }
    let currency = match args.currency.as_deref() {
        Some(currency) => parse_currency(currency)?,
        None => session.settings.default_currency,
    };

    let report = spending_by_category(&snapshot.transactions, from, to, currency);
    print!("{}", format_spending(&report, &session.settings.date_format));
    Ok(())
}
