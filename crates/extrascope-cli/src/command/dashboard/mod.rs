use std::{path::PathBuf, rc::Rc};

use anyhow::Context;
use extrascope_survey::{chart::SurveyCharts, hypothesis::HypothesisReport, table::CleanedTable};
use ratatui_runtime::{Runtime, ScreenStack};

use crate::{config::DashboardConfig, util};

use self::{panel::PanelSelection, screens::OverviewScreen};

pub(crate) use self::panel::PanelKind;

mod panel;
mod screens;
#[cfg(test)]
mod testing;
mod widgets;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DashboardArg {
    /// Survey CSV file path
    survey_file: PathBuf,
    /// Significance threshold (overrides the config file)
    #[arg(long)]
    alpha: Option<f64>,
}

/// Everything the dashboard screens display, computed once at startup.
#[derive(Debug)]
pub(crate) struct DashboardData {
    pub table: CleanedTable,
    pub charts: SurveyCharts,
    pub report: HypothesisReport,
    pub word_count: usize,
}

impl DashboardData {
    pub(crate) fn new(table: CleanedTable, report: HypothesisReport, word_count: usize) -> Self {
        let charts = SurveyCharts::from_table(&table);
        Self {
            table,
            charts,
            report,
            word_count,
        }
    }
}

pub(crate) fn run(arg: &DashboardArg, config: &DashboardConfig) -> anyhow::Result<()> {
    let policy = config.significance_policy(arg.alpha)?;
    let table = util::load_survey(&arg.survey_file)?;
    let report = HypothesisReport::new(&table, policy);
    let data = Rc::new(DashboardData::new(table, report, config.word_count));

    let selection = match &config.visible_panels {
        Some(panels) => PanelSelection::new(panels.iter().copied()),
        None => PanelSelection::default(),
    };

    let mut stack = ScreenStack::new(Box::new(OverviewScreen::new(data, selection)));
    Runtime::new()
        .run(&mut stack)
        .context("Failed to run the dashboard")?;
    Ok(())
}
