//! Account CLI commands

use clap::Subcommand;

use super::Session;
use crate::display::format_balance_line;
use crate::error::FintrackResult;
use crate::services::AccountService;

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommands {
    /// List accounts with their balances
    List,
    /// Delete an account with its transactions and recurring items
    Delete {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub fn handle_account_command(session: &Session, cmd: AccountCommands) -> FintrackResult<()> {
    let mut snapshot = session.load_snapshot()?;

    match cmd {
        AccountCommands::List => {
            let service = AccountService::new(&mut snapshot);
            let sheet = service.balance_sheet();
            if sheet.is_empty() {
                println!("No accounts found.");
            }
            for line in &sheet.lines {
                match line.account.masked_number() {
                    Some(number) => println!(
                        "{}  {}  ({})",
                        line.account.id,
                        format_balance_line(line),
                        number
                    ),
                    None => println!("{}  {}", line.account.id, format_balance_line(line)),
                }
            }
        }

        AccountCommands::Delete { account } => {
            let mut service = AccountService::new(&mut snapshot);
            let id = service.resolve(&account)?;
            let removed = service.remove(id)?;
            session.save_snapshot(&snapshot)?;

            println!("Deleted account: {}", removed.account.name);
            println!("  Transactions removed: {}", removed.transactions.len());
            println!("  Recurring items removed: {}", removed.recurring.len());
            if removed.unlinked_tasks > 0 {
                println!("  Tasks unlinked: {}", removed.unlinked_tasks);
            }
            if removed.unreadable_records > 0 {
                println!("  Unreadable records removed: {}", removed.unreadable_records);
            }
        }
    }

    Ok(())
}
