use std::fmt::Display;

use extrascope_stats::{
    descriptive::DescriptiveStats,
    frequency::{Frequency, GroupedMean},
    proportion::SampleProportion,
    welch::Significance,
};
use extrascope_survey::{
    chart::{GenderCrossTab, GenderGroupedMean, NumericDistribution},
    hypothesis::{HypothesisReport, MeanTestOutcome, ProportionOutcome},
    mapping::{Gender, GenderCategory},
    table::Cell,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Paragraph, Widget, Wrap},
};

use super::{DashboardData, PanelKind};

/// Grouped means are drawn as integers in hundredths.
const MEAN_SCALE: f64 = 100.0;

fn panel_block(title: &str) -> Block<'_> {
    Block::bordered()
        .merge_borders(MergeStrategy::Exact)
        .title(title)
}

fn hue_color(hue: &GenderCategory) -> Color {
    match hue.gender() {
        Some(Gender::Male) => Color::Cyan,
        Some(Gender::Female) => Color::Magenta,
        None => Color::Yellow,
    }
}

fn render_no_answer(block: Block<'_>, area: Rect, buf: &mut Buffer) {
    let text = Paragraph::new("No answer")
        .style(Style::default().fg(Color::DarkGray))
        .centered()
        .block(block);
    Widget::render(text, area, buf);
}

/// One dashboard panel, drawn with the widget matching its kind.
pub(super) struct PanelView<'a> {
    pub kind: PanelKind,
    pub data: &'a DashboardData,
}

impl Widget for PanelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let title = self.kind.title();
        let charts = &self.data.charts;
        match self.kind {
            PanelKind::GenderDistribution => CountChart {
                title,
                freq: &charts.gender,
            }
            .render(area, buf),
            PanelKind::EducationLevelDistribution => CountChart {
                title,
                freq: &charts.education_level,
            }
            .render(area, buf),
            PanelKind::AgeDistribution => DistributionChart {
                title,
                dist: &charts.age,
            }
            .render(area, buf),
            PanelKind::GenderByAcademicPerformance => GroupedCountChart {
                title,
                table: &charts.academic_performance_by_gender,
            }
            .render(area, buf),
            PanelKind::TimeManagementByGender => GroupedCountChart {
                title,
                table: &charts.time_management_by_gender,
            }
            .render(area, buf),
            PanelKind::GenderByEducationLevel => GroupedCountChart {
                title,
                table: &charts.education_by_gender,
            }
            .render(area, buf),
            PanelKind::TimeManagementShares => ShareList {
                title,
                freq: &charts.time_management_strategy,
            }
            .render(area, buf),
            PanelKind::FrequencyOfParticipation => ShareList {
                title,
                freq: &charts.frequency_of_participation,
            }
            .render(area, buf),
            PanelKind::GenderByAverageGrade => GroupedCountChart {
                title,
                table: &charts.average_grade_by_gender,
            }
            .render(area, buf),
            PanelKind::WeeklyHoursDistribution => DistributionChart {
                title,
                dist: &charts.weekly_hours,
            }
            .render(area, buf),
            PanelKind::WeeklyHoursByAverageGrade => GroupedMeanChart {
                title,
                table: &charts.weekly_hours_by_average_grade,
            }
            .render(area, buf),
            PanelKind::EventParticipationByAverageGrade => GroupedMeanChart {
                title,
                table: &charts.event_participation_by_average_grade,
            }
            .render(area, buf),
            PanelKind::PreferredActivities => WordRanking {
                title,
                words: &charts.preferred_activity_words,
                limit: self.data.word_count,
            }
            .render(area, buf),
            PanelKind::WeeklyHoursTest => WeeklyHoursTestPanel {
                title,
                report: &self.data.report,
            }
            .render(area, buf),
            PanelKind::PeerRelationsComparison => PeerRelationsPanel {
                title,
                report: &self.data.report,
            }
            .render(area, buf),
        }
    }
}

/// Count plot of one categorical column.
struct CountChart<'a, K> {
    title: &'a str,
    freq: &'a Frequency<K>,
}

impl<K> Widget for CountChart<'_, K>
where
    K: Ord + Display,
{
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = panel_block(self.title);
        if self.freq.is_empty() {
            render_no_answer(block, area, buf);
            return;
        }
        let chart = BarChart::new(
            self.freq
                .iter()
                .map(|(value, count)| {
                    Bar::with_label(value.to_string(), count).text_value(count.to_string())
                })
                .collect::<Vec<_>>(),
        )
        .block(block)
        .direction(Direction::Horizontal)
        .bar_style(Style::default().fg(Color::Cyan))
        .bar_gap(0);
        Widget::render(chart, area, buf);
    }
}

/// Shares of each value, the terminal stand-in for a pie chart.
struct ShareList<'a> {
    title: &'a str,
    freq: &'a Frequency<Cell>,
}

impl Widget for ShareList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = panel_block(self.title);
        if self.freq.is_empty() {
            render_no_answer(block, area, buf);
            return;
        }
        let chart = BarChart::new(
            self.freq
                .most_common()
                .into_iter()
                .map(|(value, count)| {
                    Bar::with_label(value.to_string(), count)
                        .text_value(format!("{:.1}%", self.freq.share_percent(value)))
                })
                .collect::<Vec<_>>(),
        )
        .block(block)
        .direction(Direction::Horizontal)
        .bar_style(Style::default().fg(Color::Green))
        .bar_gap(0);
        Widget::render(chart, area, buf);
    }
}

/// Counts of a category split by gender, one bar group per category.
struct GroupedCountChart<'a> {
    title: &'a str,
    table: &'a GenderCrossTab,
}

impl Widget for GroupedCountChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = panel_block(self.title);
        if self.table.is_empty() {
            render_no_answer(block, area, buf);
            return;
        }
        let chart = self.table.row_keys().fold(
            BarChart::default()
                .block(block)
                .direction(Direction::Horizontal)
                .bar_gap(0)
                .group_gap(1),
            |chart, row| {
                let bars = self
                    .table
                    .row_counts(row)
                    .into_iter()
                    .map(|(hue, count)| {
                        Bar::default()
                            .value(count)
                            .label(Line::from(hue.to_string()))
                            .text_value(count.to_string())
                            .style(Style::default().fg(hue_color(hue)))
                    })
                    .collect::<Vec<_>>();
                chart.data(
                    BarGroup::default()
                        .label(Line::from(row.to_string()))
                        .bars(&bars),
                )
            },
        );
        Widget::render(chart, area, buf);
    }
}

/// Mean of a measure per category and gender.
struct GroupedMeanChart<'a> {
    title: &'a str,
    table: &'a GenderGroupedMean,
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_mean(mean: f64) -> u64 {
    (mean.max(0.0) * MEAN_SCALE).round() as u64
}

fn mean_bars<'a, R>(table: &'a GroupedMean<R, GenderCategory>, row: &R) -> Vec<Bar<'a>>
where
    R: Ord,
{
    table
        .row_means(row)
        .into_iter()
        .filter_map(|(hue, mean)| {
            let mean = mean?;
            Some(
                Bar::default()
                    .value(scaled_mean(mean))
                    .label(Line::from(hue.to_string()))
                    .text_value(format!("{mean:.2}"))
                    .style(Style::default().fg(hue_color(hue))),
            )
        })
        .collect()
}

impl Widget for GroupedMeanChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = panel_block(self.title);
        let Some(max_mean) = self.table.max_mean() else {
            render_no_answer(block, area, buf);
            return;
        };
        let chart = self.table.row_keys().fold(
            BarChart::default()
                .block(block)
                .direction(Direction::Horizontal)
                .max(scaled_mean(max_mean).max(1))
                .bar_gap(0)
                .group_gap(1),
            |chart, row| {
                let bars = mean_bars(self.table, row);
                chart.data(
                    BarGroup::default()
                        .label(Line::from(row.to_string()))
                        .bars(&bars),
                )
            },
        );
        Widget::render(chart, area, buf);
    }
}

/// Five-number summary next to the count of each distinct value.
struct DistributionChart<'a> {
    title: &'a str,
    dist: &'a NumericDistribution,
}

impl Widget for DistributionChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = panel_block(self.title);
        let (Some(summary), Some(stats)) = (&self.dist.summary, &self.dist.stats) else {
            render_no_answer(block, area, buf);
            return;
        };

        let [stats_area, chart_area] =
            Layout::horizontal([Constraint::Length(20), Constraint::Fill(1)])
                .areas(block.inner(area));

        let (lower_whisker, upper_whisker) = summary.whiskers();
        let mut text = vec![
            Line::raw(format!("Count:  {:>10}", stats.count)),
            Line::raw(format!("Mean:   {:>10.2}", stats.mean)),
            Line::raw(format!("Min:    {:>10.2}", summary.min)),
            Line::raw(format!("Q1:     {:>10.2}", summary.q1)),
            Line::raw(format!("Median: {:>10.2}", summary.median)),
            Line::raw(format!("Q3:     {:>10.2}", summary.q3)),
            Line::raw(format!("Max:    {:>10.2}", summary.max)),
            Line::raw(format!("Whisk.: {lower_whisker:>5.1}-{upper_whisker:<5.1}")),
        ];
        if let Some(std_dev) = stats.std_dev {
            text.push(Line::raw(format!("StdDev: {std_dev:>10.2}")));
        }

        let paragraph = Paragraph::new(text);
        let chart = BarChart::new(
            self.dist
                .counts
                .iter()
                .map(|(value, count)| {
                    Bar::with_label(value.to_string(), count).text_value(count.to_string())
                })
                .collect::<Vec<_>>(),
        )
        .direction(Direction::Horizontal)
        .bar_style(Style::default().fg(Color::Cyan))
        .bar_gap(0);

        Widget::render(block, area, buf);
        Widget::render(paragraph, stats_area, buf);
        Widget::render(chart, chart_area, buf);
    }
}

/// Most frequent words of the preferred-activities answers.
struct WordRanking<'a> {
    title: &'a str,
    words: &'a Frequency<String>,
    limit: usize,
}

impl Widget for WordRanking<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = panel_block(self.title);
        if self.words.is_empty() || self.limit == 0 {
            render_no_answer(block, area, buf);
            return;
        }
        let chart = BarChart::new(
            self.words
                .most_common()
                .into_iter()
                .take(self.limit)
                .map(|(word, count)| {
                    Bar::with_label(word.clone(), count).text_value(count.to_string())
                })
                .collect::<Vec<_>>(),
        )
        .block(block)
        .direction(Direction::Horizontal)
        .bar_style(Style::default().fg(Color::Yellow))
        .bar_gap(0);
        Widget::render(chart, area, buf);
    }
}

fn verdict_line(verdict: &str, highlighted: bool) -> Line<'_> {
    let color = if highlighted {
        Color::Green
    } else {
        Color::Yellow
    };
    Line::styled(
        verdict,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn group_line(label: &str, stats: &DescriptiveStats) -> Line<'static> {
    let std_dev = stats
        .std_dev
        .map_or_else(|| "N/A".to_owned(), |sd| format!("{sd:.2}"));
    Line::raw(format!(
        "{label:<7} n = {:<4} mean = {:<8.2} sd = {std_dev}",
        stats.count, stats.mean
    ))
}

/// Welch's t-test on weekly hours, men against women.
struct WeeklyHoursTestPanel<'a> {
    title: &'a str,
    report: &'a HypothesisReport,
}

impl Widget for WeeklyHoursTestPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let outcome = &self.report.weekly_hours;
        let mut text = vec![
            Line::raw("Are weekly hours on activities different between men and women?"),
            Line::raw(""),
        ];
        match outcome {
            MeanTestOutcome::Completed {
                comparison,
                significance,
            } => {
                text.extend([
                    group_line("Male:", &comparison.first),
                    group_line("Female:", &comparison.second),
                    Line::raw(""),
                    Line::raw(format!("T-statistic: {:.4}", comparison.statistic)),
                    Line::raw(format!("Degrees of freedom: {:.2}", comparison.degrees_of_freedom)),
                    Line::raw(format!(
                        "P-value: {:.6} (alpha = {})",
                        comparison.p_value, self.report.alpha
                    )),
                    Line::raw(""),
                    verdict_line(
                        outcome.verdict(),
                        *significance == Significance::Significant,
                    ),
                ]);
            }
            MeanTestOutcome::InsufficientData { reason } => {
                text.extend([
                    Line::raw(format!("Test not computed: {reason}")),
                    Line::raw(""),
                    verdict_line(outcome.verdict(), false),
                ]);
            }
        }
        Paragraph::new(text)
            .block(panel_block(self.title))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

fn proportion_line(label: &str, sample: &SampleProportion) -> Line<'static> {
    Line::raw(format!(
        "{label:<7} {}/{} improved ({:.2}%), {} unanswered",
        sample.successes,
        sample.observations,
        100.0 * sample.proportion,
        sample.excluded
    ))
}

/// Share of students reporting improved peer relations, by gender.
struct PeerRelationsPanel<'a> {
    title: &'a str,
    report: &'a HypothesisReport,
}

impl Widget for PeerRelationsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let outcome = &self.report.peer_relations;
        let mut text = vec![
            Line::raw("Which gender reports improved peer relations more often?"),
            Line::raw(""),
        ];
        match outcome {
            ProportionOutcome::Completed { comparison } => {
                text.extend([
                    proportion_line("Male:", &comparison.first),
                    proportion_line("Female:", &comparison.second),
                    Line::raw(""),
                    verdict_line(outcome.verdict(), true),
                ]);
            }
            ProportionOutcome::InsufficientData { reason } => {
                text.extend([
                    Line::raw(format!("Comparison not computed: {reason}")),
                    Line::raw(""),
                    verdict_line(outcome.verdict(), false),
                ]);
            }
        }
        Paragraph::new(text)
            .block(panel_block(self.title))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::dashboard::testing;

    fn render_text<W>(widget: W, width: u16, height: u16) -> String
    where
        W: Widget,
    {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_panel(kind: PanelKind) -> String {
        let data = testing::sample_data();
        render_text(PanelView { kind, data: &data }, 100, 30)
    }

    #[test]
    fn test_every_panel_shows_its_title() {
        let data = testing::sample_data();
        for kind in PanelKind::ALL {
            let text = render_text(PanelView { kind, data: &data }, 100, 30);
            assert!(text.contains(kind.title()), "{kind:?} has no title");
        }
    }

    #[test]
    fn test_count_chart_labels() {
        let text = render_panel(PanelKind::GenderDistribution);
        assert!(text.contains("male"));
        assert!(text.contains("female"));
    }

    #[test]
    fn test_distribution_summary() {
        let text = render_panel(PanelKind::AgeDistribution);
        assert!(text.contains("Median:"));
        assert!(text.contains("Count:"));
    }

    #[test]
    fn test_word_ranking_respects_limit() {
        let mut data = testing::sample_data();
        data.word_count = 1;
        let text = render_text(
            PanelView {
                kind: PanelKind::PreferredActivities,
                data: &data,
            },
            60,
            10,
        );
        assert!(text.contains("musique"));
        assert!(!text.contains("football"));
    }

    #[test]
    fn test_test_panels_show_verdicts() {
        let text = render_panel(PanelKind::WeeklyHoursTest);
        assert!(text.contains("T-statistic:"));
        let text = render_panel(PanelKind::PeerRelationsComparison);
        assert!(text.contains("improved"));
    }

    #[test]
    fn test_empty_panel_says_no_answer() {
        let data = testing::empty_data();
        let text = render_text(
            PanelView {
                kind: PanelKind::WeeklyHoursByAverageGrade,
                data: &data,
            },
            60,
            10,
        );
        assert!(text.contains("No answer"));
    }

    #[test]
    fn test_scaled_mean() {
        assert_eq!(scaled_mean(1.234), 123);
        assert_eq!(scaled_mean(2.5), 250);
        assert_eq!(scaled_mean(-1.0), 0);
    }
}
