use std::path::PathBuf;

use crate::util::{self, Sink};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CleanArg {
    /// Survey CSV file path
    survey_file: PathBuf,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output format: json or csv
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

pub(crate) fn run(arg: &CleanArg) -> anyhow::Result<()> {
    let CleanArg {
        survey_file,
        output,
        format,
    } = arg;

    let table = util::load_survey(survey_file)?;
    let mut sink = Sink::open(output.as_deref())?;
    match format {
        OutputFormat::Json => sink.emit_json(&table)?,
        OutputFormat::Csv => sink.emit("CSV", |out| Ok(table.write_csv(out)?))?,
    }

    tracing::info!(
        records = table.len(),
        output = %sink.target(),
        "wrote cleaned table"
    );
    Ok(())
}
