//! Text rendering of every dashboard aggregation.

use std::{fmt::Display, io, path::PathBuf};

use extrascope_stats::frequency::{CrossTab, Frequency, GroupedMean};
use extrascope_survey::chart::{NumericDistribution, SurveyCharts};

use crate::{
    config::DashboardConfig,
    util::{self, Sink},
};

const LABEL_WIDTH: usize = 36;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    /// Survey CSV file path
    survey_file: PathBuf,
}

pub(crate) fn run(arg: &SummaryArg, config: &DashboardConfig) -> anyhow::Result<()> {
    let table = util::load_survey(&arg.survey_file)?;
    let charts = SurveyCharts::from_table(&table);

    Sink::open(None)?.emit("summary", |mut out| {
        write_summary(&mut out, &charts, config.word_count)
    })
}

pub(super) fn write_summary<W>(out: &mut W, charts: &SurveyCharts, word_count: usize) -> io::Result<()>
where
    W: io::Write,
{
    write_counts(out, "Gender Distribution", &charts.gender)?;
    write_counts(out, "Education Level Distribution", &charts.education_level)?;
    write_distribution(out, "Age Distribution", &charts.age)?;
    write_cross_tab(
        out,
        "Gender Distribution by Academic Performance",
        &charts.academic_performance_by_gender,
    )?;
    write_cross_tab(
        out,
        "Time Management Strategies by Gender",
        &charts.time_management_by_gender,
    )?;
    write_cross_tab(
        out,
        "Gender Distribution by Education Level",
        &charts.education_by_gender,
    )?;
    write_counts(out, "Time Management Strategy", &charts.time_management_strategy)?;
    write_counts(out, "Frequency of Participation", &charts.frequency_of_participation)?;
    write_cross_tab(
        out,
        "Gender Distribution by Average Grade",
        &charts.average_grade_by_gender,
    )?;
    write_distribution(out, "Weekly Hours Spent on Activities", &charts.weekly_hours)?;
    write_grouped_mean(
        out,
        "Mean Weekly Hours by Average Grade and Gender",
        &charts.weekly_hours_by_average_grade,
    )?;
    write_grouped_mean(
        out,
        "Mean Event Participation by Average Grade and Gender",
        &charts.event_participation_by_average_grade,
    )?;
    write_words(out, &charts.preferred_activity_words, word_count)?;
    Ok(())
}

fn write_title<W>(out: &mut W, title: &str) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

/// Shortens `label` to at most `width` characters.
fn fit(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        return label.to_owned();
    }
    let mut short = label.chars().take(width - 1).collect::<String>();
    short.push('…');
    short
}

fn write_counts<W, K>(out: &mut W, title: &str, freq: &Frequency<K>) -> io::Result<()>
where
    W: io::Write,
    K: Ord + Display,
{
    write_title(out, title)?;
    writeln!(
        out,
        "  {:<LABEL_WIDTH$} {:>8} {:>8}",
        "Value", "Count", "Share"
    )?;
    writeln!(out, "  {}", "-".repeat(LABEL_WIDTH + 18))?;
    for (value, count) in freq.most_common() {
        writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:>8} {:>7.2}%",
            fit(&value.to_string(), LABEL_WIDTH),
            count,
            freq.share_percent(value)
        )?;
    }
    writeln!(out, "  {:<LABEL_WIDTH$} {:>8}", "Total", freq.total())?;
    writeln!(out)
}

fn write_hue_header<W, C>(out: &mut W, hues: &[&C]) -> io::Result<()>
where
    W: io::Write,
    C: Display,
{
    write!(out, "  {:<LABEL_WIDTH$}", "Value")?;
    for hue in hues {
        write!(out, " {:>10}", fit(&hue.to_string(), 10))?;
    }
    writeln!(out)?;
    writeln!(out, "  {}", "-".repeat(LABEL_WIDTH + 11 * hues.len()))
}

fn write_cross_tab<W, R, C>(out: &mut W, title: &str, table: &CrossTab<R, C>) -> io::Result<()>
where
    W: io::Write,
    R: Ord + Display,
    C: Ord + Clone + Display,
{
    write_title(out, title)?;
    let hues = table.hues().collect::<Vec<_>>();
    write_hue_header(out, &hues)?;
    for row in table.row_keys() {
        write!(out, "  {:<LABEL_WIDTH$}", fit(&row.to_string(), LABEL_WIDTH))?;
        for hue in &hues {
            write!(out, " {:>10}", table.count(row, hue))?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}

fn write_grouped_mean<W, R, C>(
    out: &mut W,
    title: &str,
    table: &GroupedMean<R, C>,
) -> io::Result<()>
where
    W: io::Write,
    R: Ord + Display,
    C: Ord + Clone + Display,
{
    write_title(out, title)?;
    let hues = table.hues().collect::<Vec<_>>();
    write_hue_header(out, &hues)?;
    for row in table.row_keys() {
        write!(out, "  {:<LABEL_WIDTH$}", fit(&row.to_string(), LABEL_WIDTH))?;
        for hue in &hues {
            match table.mean(row, hue) {
                Some(mean) => write!(out, " {mean:>10.2}")?,
                None => write!(out, " {:>10}", "-")?,
            }
        }
        writeln!(out)?;
    }
    writeln!(out)
}

fn write_distribution<W>(out: &mut W, title: &str, dist: &NumericDistribution) -> io::Result<()>
where
    W: io::Write,
{
    write_title(out, title)?;
    let (Some(summary), Some(stats)) = (&dist.summary, &dist.stats) else {
        writeln!(out, "  No answer")?;
        return writeln!(out);
    };
    writeln!(out, "  Count:  {:>10}", stats.count)?;
    writeln!(out, "  Mean:   {:>10.2}", stats.mean)?;
    if let Some(std_dev) = stats.std_dev {
        writeln!(out, "  StdDev: {std_dev:>10.2}")?;
    }
    writeln!(out, "  Min:    {:>10.2}", summary.min)?;
    writeln!(out, "  Q1:     {:>10.2}", summary.q1)?;
    writeln!(out, "  Median: {:>10.2}", summary.median)?;
    writeln!(out, "  Q3:     {:>10.2}", summary.q3)?;
    writeln!(out, "  Max:    {:>10.2}", summary.max)?;
    writeln!(out)
}

fn write_words<W>(out: &mut W, words: &Frequency<String>, limit: usize) -> io::Result<()>
where
    W: io::Write,
{
    write_title(out, "Preferred Activities (most frequent words)")?;
    for (rank, (word, count)) in words.most_common().into_iter().take(limit).enumerate() {
        writeln!(out, "  {:>3}. {:<24} {:>6}", rank + 1, word, count)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use extrascope_survey::{normalize::normalize, schema::Column, source};

    use super::*;

    fn charts() -> SurveyCharts {
        let mut data = Column::ALL.map(Column::name).join(",");
        data.push('\n');
        for (age, gender, average, activities) in [
            ("20", "Homme", "12", "Football et musique"),
            ("21 ans", "Femme", "14", "Musique"),
            ("23", "Femme", "12", ""),
        ] {
            let mut fields = vec![""; Column::COUNT];
            fields[Column::Age.position()] = age;
            fields[Column::Gender.position()] = gender;
            fields[Column::CurrentOverallAverage.position()] = average;
            fields[Column::PreferredActivities.position()] = activities;
            data.push_str(&fields.join(","));
            data.push('\n');
        }
        let table = normalize(source::read_raw_records(data.as_bytes()).unwrap());
        SurveyCharts::from_table(&table)
    }

    fn render(word_count: usize) -> String {
        let mut buf = Vec::new();
        write_summary(&mut buf, &charts(), word_count).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_summary_has_every_section() {
        let text = render(10);
        for title in [
            "Gender Distribution",
            "Age Distribution",
            "Time Management Strategies by Gender",
            "Frequency of Participation",
            "Mean Event Participation by Average Grade and Gender",
            "Preferred Activities (most frequent words)",
        ] {
            assert!(text.contains(title), "missing section {title}");
        }
    }

    #[test]
    fn test_summary_values() {
        let text = render(10);
        assert!(text.contains("Median:      21.00"));
        assert!(text.lines().any(|line| line.starts_with("  female") && line.contains("66.67%")));
        assert!(text.contains("  1. musique"));
    }

    #[test]
    fn test_word_limit() {
        let text = render(1);
        assert!(text.contains("  1. musique"));
        assert!(!text.contains("  2. "));
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("abcdefghijkl", 5), "abcd…");
    }
}
