use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{config::DashboardConfig, logging};

use self::{
    clean::CleanArg, dashboard::DashboardArg, hypotheses::HypothesesArg, summary::SummaryArg,
};

mod clean;
pub(crate) mod dashboard;
mod hypotheses;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// JSON config file (significance threshold, initially visible panels, word count)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug messages (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// What to do with the survey
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Write the cleaned survey table as JSON or CSV
    Clean(#[clap(flatten)] CleanArg),
    /// Compare weekly hours and peer relations between men and women
    Hypotheses(#[clap(flatten)] HypothesesArg),
    /// Print every chart aggregation as text tables
    Summary(#[clap(flatten)] SummaryArg),
    /// Browse the charts in an interactive terminal dashboard
    Dashboard(#[clap(flatten)] DashboardArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbose);
    let config = DashboardConfig::load(args.config.as_deref())?;

    match &args.mode {
        Mode::Clean(arg) => clean::run(arg)?,
        Mode::Hypotheses(arg) => hypotheses::run(arg, &config)?,
        Mode::Summary(arg) => summary::run(arg, &config)?,
        Mode::Dashboard(arg) => dashboard::run(arg, &config)?,
    }
    Ok(())
}
