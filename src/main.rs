use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_account_command, handle_balances, handle_budgets, handle_next_due, handle_spending,
    handle_task_command, handle_upcoming, AccountCommands, BalanceArgs, BudgetsArgs, NextDueArgs,
    Session, SpendingArgs, TaskCommands, UpcomingArgs,
};
use fintrack::config::{paths::FintrackPaths, settings::Settings};
use fintrack::storage::Snapshot;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker for DOP and USD accounts",
    long_about = "fintrack derives account balances from the full transaction history, \
                  keeping Dominican pesos and US dollars in separate buckets, and \
                  projects when recurring income and expenses fall due next."
)]
struct Cli {
    /// Snapshot file to read (default: data/snapshot.json under the config directory)
    #[arg(long, global = true, env = "FINTRACK_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every account's DOP and USD balance
    #[command(alias = "bal")]
    Balances(BalanceArgs),

    /// Compute the next due date of a recurring series
    NextDue(NextDueArgs),

    /// List recurring items due soon
    Upcoming(UpcomingArgs),

    /// Show spending against monthly budgets
    Budgets(BudgetsArgs),

    /// Show expenses by category
    Spending(SpendingArgs),

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Task commands
    #[command(subcommand)]
    Task(TaskCommands),

    /// Create the config directory, default settings and an empty snapshot
    Init,

    /// Show current configuration and paths
    Config,
}

fn open_session(snapshot: Option<PathBuf>) -> Result<(FintrackPaths, Session)> {
    let paths = FintrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let snapshot_path = snapshot.unwrap_or_else(|| settings.snapshot_file(&paths));
    Ok((paths, Session::new(snapshot_path, settings)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    fintrack::logging::init(cli.verbose);

    let Some(command) = cli.command else {
        println!("fintrack - personal finance tracker");
        println!();
        println!("Run 'fintrack --help' for usage information.");
        return Ok(());
    };

    // next-due needs no configuration at all
    if let Commands::NextDue(args) = command {
        handle_next_due(args)?;
        return Ok(());
    }

    let (paths, session) = open_session(cli.snapshot)?;

    match command {
        Commands::Balances(args) => handle_balances(&session, args)?,
        Commands::NextDue(args) => handle_next_due(args)?,
        Commands::Upcoming(args) => handle_upcoming(&session, args)?,
        Commands::Budgets(args) => handle_budgets(&session, args)?,
        Commands::Spending(args) => handle_spending(&session, args)?,
        Commands::Account(cmd) => handle_account_command(&session, cmd)?,
        Commands::Task(cmd) => handle_task_command(&session, cmd)?,
        Commands::Init => {
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            if !paths.is_initialized() {
                session.settings.save(&paths)?;
            }
            if session.snapshot_path.exists() {
                println!("Snapshot already exists: {}", session.snapshot_path.display());
            } else {
                Snapshot::default().save(&session.snapshot_path)?;
                println!("Created empty snapshot: {}", session.snapshot_path.display());
            }
            println!("Initialization complete!");
        }
        Commands::Config => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Snapshot file:    {}", session.snapshot_path.display());
            println!();
            println!("Settings:");
            println!("  Default currency: {}", session.settings.default_currency);
            println!("  Date format:      {}", session.settings.date_format);
            println!(
                "  Upcoming horizon: {} days",
                session.settings.upcoming_horizon_days
            );
        }
    }

    Ok(())
}
