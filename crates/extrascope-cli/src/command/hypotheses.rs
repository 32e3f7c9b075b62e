use std::{io, path::PathBuf};

use extrascope_stats::descriptive::DescriptiveStats;
use extrascope_survey::hypothesis::{HypothesisReport, MeanTestOutcome, ProportionOutcome};

use crate::{
    config::DashboardConfig,
    util::{self, Sink},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HypothesesArg {
    /// Survey CSV file path
    survey_file: PathBuf,
    /// Significance threshold (overrides the config file)
    #[arg(long)]
    alpha: Option<f64>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Write the report as JSON
    #[arg(long)]
    json: bool,
}

pub(crate) fn run(arg: &HypothesesArg, config: &DashboardConfig) -> anyhow::Result<()> {
    let policy = config.significance_policy(arg.alpha)?;
    let table = util::load_survey(&arg.survey_file)?;
    let report = HypothesisReport::new(&table, policy);

    let mut sink = Sink::open(arg.output.as_deref())?;
    if arg.json {
        return sink.emit_json(&report);
    }
    sink.emit("report", |mut out| write_report(&mut out, &report))
}

pub(super) fn write_report<W>(out: &mut W, report: &HypothesisReport) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(out, "Hypotheses Testing (alpha = {})", report.alpha)?;
    writeln!(out, "==============================")?;
    writeln!(out)?;
    write_mean_test(out, &report.weekly_hours)?;
    writeln!(out)?;
    writeln!(out, "Proportions Comparison")?;
    writeln!(out, "======================")?;
    writeln!(out)?;
    write_proportions(out, &report.peer_relations)?;
    Ok(())
}

fn write_mean_test<W>(out: &mut W, outcome: &MeanTestOutcome) -> io::Result<()>
where
    W: io::Write,
{
    match outcome {
        MeanTestOutcome::Completed { comparison, .. } => {
            writeln!(
                out,
                "  {:<10} {:>8} {:>10} {:>10}",
                "Group", "Count", "Mean", "Std Dev"
            )?;
            writeln!(out, "  {}", "-".repeat(41))?;
            write_group_row(out, "male", &comparison.first)?;
            write_group_row(out, "female", &comparison.second)?;
            writeln!(out)?;
            writeln!(out, "  Test statistic (t): {:.4}", comparison.statistic)?;
            writeln!(out, "  Degrees of freedom: {:.2}", comparison.degrees_of_freedom)?;
            writeln!(out, "  P-value:            {:.6}", comparison.p_value)?;
        }
        MeanTestOutcome::InsufficientData { reason } => {
            writeln!(out, "  Test not computed: {reason}")?;
        }
    }
    writeln!(out, "  => {}", outcome.verdict())
}

fn write_group_row<W>(out: &mut W, label: &str, stats: &DescriptiveStats) -> io::Result<()>
where
    W: io::Write,
{
    let std_dev = stats
        .std_dev
        .map_or_else(|| "N/A".to_owned(), |sd| format!("{sd:.2}"));
    writeln!(
        out,
        "  {:<10} {:>8} {:>10.2} {:>10}",
        label, stats.count, stats.mean, std_dev
    )
}

fn write_proportions<W>(out: &mut W, outcome: &ProportionOutcome) -> io::Result<()>
where
    W: io::Write,
{
    match outcome {
        ProportionOutcome::Completed { comparison } => {
            writeln!(
                out,
                "  {:<10} {:>8} {:>9} {:>9} {:>11}",
                "Group", "Answers", "Improved", "Excluded", "Proportion"
            )?;
            writeln!(out, "  {}", "-".repeat(51))?;
            for (label, sample) in [("male", &comparison.first), ("female", &comparison.second)] {
                writeln!(
                    out,
                    "  {:<10} {:>8} {:>9} {:>9} {:>11.4}",
                    label,
                    sample.observations,
                    sample.successes,
                    sample.excluded,
                    sample.proportion
                )?;
            }
        }
        ProportionOutcome::InsufficientData { reason } => {
            writeln!(out, "  Comparison not computed: {reason}")?;
        }
    }
    writeln!(out, "  => {}", outcome.verdict())
}
