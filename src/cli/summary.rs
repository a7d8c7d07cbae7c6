//! Summary CLI command
//!
//! Prints the monthly summary and optionally exports it as CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use super::month::resolve_month;
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::reports::MonthlyReport;
use crate::services::CarryOverMode;
use crate::storage::LedgerStore;

/// Arguments for `ledger summary`
#[derive(Args)]
pub struct SummaryArgs {
    /// Month to summarize (YYYY-MM, current, last, next)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Carry-over algorithm (cumulative or previous-month)
    #[arg(long)]
    pub carry_over: Option<CarryOverMode>,

    /// Also write the summary to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the summary command
pub fn handle_summary_command(
    store: &LedgerStore,
    settings: &Settings,
    args: SummaryArgs,
) -> LedgerResult<()> {
    let month = resolve_month(args.month.as_deref(), settings)?;
    let mode = args.carry_over.unwrap_or(settings.carry_over_mode);

    let report = MonthlyReport::generate(store, month, mode)?;
    print!("{}", report.format_terminal(settings));

    if let Some(path) = args.output {
        let file = File::create(&path).map_err(|e| {
            LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!();
        println!("Exported summary to {}", path.display());
    }

    Ok(())
}
