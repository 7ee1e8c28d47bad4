//! Recurrence CLI commands

use clap::Args;

use super::{parse_date, parse_date_or_today, parse_frequency, Session};
use crate::display::format_upcoming;
use crate::error::FintrackResult;
use crate::services::{next_due_date, upcoming};

#[derive(Debug, Args)]
pub struct NextDueArgs {
    /// First occurrence (YYYY-MM-DD)
    pub start: String,

    /// weekly, monthly or yearly
    pub frequency: String,

    /// Reference date (YYYY-MM-DD, default today)
    #[arg(long)]
    pub as_of: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpcomingArgs {
    /// Days to look ahead (default from settings)
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Reference date (YYYY-MM-DD, default today)
    #[arg(long)]
    pub as_of: Option<String>,
}

/// Print the next due date of an ad-hoc series, always as YYYY-MM-DD
pub fn handle_next_due(args: NextDueArgs) -> FintrackResult<()> {
    let start = parse_date(&args.start)?;
    let frequency = parse_frequency(&args.frequency)?;
    let as_of = parse_date_or_today(args.as_of.as_deref())?;

    println!("{}", next_due_date(start, frequency, as_of).format("%Y-%m-%d"));
    Ok(())
}

/// List recurring items falling due within the horizon
pub fn handle_upcoming(session: &Session, args: UpcomingArgs) -> FintrackResult<()> {
    let snapshot = session.load_snapshot()?;
    let as_of = parse_date_or_today(args.as_of.as_deref())?;
    let days = args.days.unwrap_or(session.settings.upcoming_horizon_days);

    let items = upcoming(&snapshot.recurring, as_of, days);
    println!(
        "Upcoming from {} (next {} days)",
        session.format_date(as_of),
        days
    );
    println!();
    print!("{}", format_upcoming(&items, &session.settings.date_format));
    if items.is_empty() {
        println!();
    }
    Ok(())
}
