//! Balance sheet display
//!
//! One row per account with its DOP and USD buckets side by side, followed by
//! per-currency totals. Currencies are never summed together.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Currency;
use crate::services::balance::{AccountBalance, BalanceLine, BalanceSheet};

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Account")]
    name: String,
    #[tabled(rename = "Institution")]
    institution: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "DOP")]
    dop: String,
    #[tabled(rename = "USD")]
    usd: String,
}

impl BalanceRow {
    fn from_line(line: &BalanceLine) -> Self {
        let account = &line.account;
        let mut name = account.name.clone();
        if account.is_frozen() {
            name.push_str(" (frozen)");
        }
        Self {
            name,
            institution: account.institution.clone(),
            account_type: account.account_type.to_string(),
            dop: format_bucket(line.balance, Currency::Dop),
            usd: format_bucket(line.balance, Currency::Usd),
        }
    }

    fn totals(totals: AccountBalance) -> Self {
        Self {
            name: "Total".to_string(),
            institution: String::new(),
            account_type: String::new(),
            dop: format_bucket(totals, Currency::Dop),
            usd: format_bucket(totals, Currency::Usd),
        }
    }
}

fn format_bucket(balance: AccountBalance, currency: Currency) -> String {
    currency.format(balance.get(currency))
}

/// Format the balance sheet as a table
pub fn format_balance_table(sheet: &BalanceSheet) -> String {
    if sheet.is_empty() {
        return "No accounts found.".to_string();
    }

    let rows = sheet
        .lines
        .iter()
        .map(BalanceRow::from_line)
        .chain(std::iter::once(BalanceRow::totals(sheet.totals)));

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .modify(Columns::new(3..), Alignment::right());
    table.to_string()
}

/// One-line summary such as `Popular: RD$1,500.00 | US$0.00`
pub fn format_balance_line(line: &BalanceLine) -> String {
    format!(
        "{}: {} | {}",
        line.account.name,
        format_bucket(line.balance, Currency::Dop),
        format_bucket(line.balance, Currency::Usd)
    )
}
