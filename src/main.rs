use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fund_ledger::cli::{
    handle_expense_command, handle_income_command, handle_summary_command, ExpenseCommands,
    IncomeCommands, SummaryArgs,
};
use fund_ledger::config::{paths::LedgerPaths, settings::Settings};
use fund_ledger::display::format_registry;
use fund_ledger::storage::open_ledger;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Monthly income and expense ledger",
    long_about = "Records categorized income and expense entries by month and \
                  reports per-category totals, group subtotals, the balance \
                  carried over from earlier months, and the month's balance."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Base directory for ledger data and settings
    #[arg(long, env = "FUND_LEDGER_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense entry commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Income entry commands
    #[command(subcommand, alias = "inc")]
    Income(IncomeCommands),

    /// Show the monthly summary
    Summary(SummaryArgs),

    /// List expense and income categories
    Categories,

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            let mut store = open_ledger(&paths)?;
            handle_expense_command(&mut store, &settings, cmd)?;
            if store.is_dirty() {
                store.flush()?;
            }
        }
        Some(Commands::Income(cmd)) => {
            let mut store = open_ledger(&paths)?;
            handle_income_command(&mut store, &settings, cmd)?;
            if store.is_dirty() {
                store.flush()?;
            }
        }
        Some(Commands::Summary(args)) => {
            let store = open_ledger(&paths)?;
            handle_summary_command(&store, &settings, args)?;
        }
        Some(Commands::Categories) => {
            print!("{}", format_registry());
        }
        Some(Commands::Config) => {
            println!("fund-ledger Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Negative marker:  {}", settings.negative_marker);
            println!("  Carry-over mode:  {}", settings.carry_over_mode);
            match settings.default_month {
                Some(month) => println!("  Default month:    {}", month),
                None => println!("  Default month:    (current month)"),
            }
        }
        None => {
            println!("fund-ledger - monthly income and expense ledger");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
