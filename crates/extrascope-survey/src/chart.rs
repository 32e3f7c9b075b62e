//! Aggregations behind the dashboard panels.
//!
//! Every chart is computed once from the cleaned table. Gender hues use the
//! canonical gender category, so `Homme` and `male` land in the same bar.

use extrascope_stats::{
    descriptive::DescriptiveStats,
    frequency::{CrossTab, Frequency, GroupedMean},
    percentiles::FiveNumberSummary,
};

use crate::{
    mapping::GenderCategory,
    schema::Column,
    table::{Cell, CleanedRecord, CleanedTable},
    words,
};

/// Distribution of a numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericDistribution {
    pub summary: Option<FiveNumberSummary>,
    pub stats: Option<DescriptiveStats>,
    /// Number of answers per distinct value.
    pub counts: Frequency<Cell>,
}

impl NumericDistribution {
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self {
            summary: FiveNumberSummary::from_sorted(&sorted),
            stats: DescriptiveStats::from_sorted(&sorted),
            counts: Frequency::from_values(sorted.iter().copied().map(Cell::Number)),
        }
    }
}

/// Count of answers per row category, split by gender.
pub type GenderCrossTab = CrossTab<Cell, GenderCategory>;

/// Mean of a measure per row category, split by gender.
pub type GenderGroupedMean = GroupedMean<Cell, GenderCategory>;

/// Every aggregate drawn by the dashboard.
#[derive(Debug, Clone)]
pub struct SurveyCharts {
    pub gender: Frequency<GenderCategory>,
    pub education_level: Frequency<Cell>,
    pub age: NumericDistribution,
    pub academic_performance_by_gender: GenderCrossTab,
    pub time_management_by_gender: GenderCrossTab,
    pub education_by_gender: GenderCrossTab,
    pub time_management_strategy: Frequency<Cell>,
    pub frequency_of_participation: Frequency<Cell>,
    pub average_grade_by_gender: GenderCrossTab,
    pub weekly_hours: NumericDistribution,
    pub weekly_hours_by_average_grade: GenderGroupedMean,
    pub event_participation_by_average_grade: GenderGroupedMean,
    pub preferred_activity_words: Frequency<String>,
}

impl SurveyCharts {
    #[must_use]
    pub fn from_table(table: &CleanedTable) -> Self {
        Self {
            gender: Frequency::from_values(table.iter().map(CleanedRecord::gender)),
            education_level: value_counts(table, Column::EducationLevel),
            age: NumericDistribution::from_values(table.iter().map(CleanedRecord::age)),
            academic_performance_by_gender: gender_cross_tab(
                table,
                Column::AcademicPerformanceRating,
            ),
            time_management_by_gender: gender_cross_tab(table, Column::TimeManagementStrategy),
            education_by_gender: gender_cross_tab(table, Column::EducationLevel),
            time_management_strategy: value_counts(table, Column::TimeManagementStrategy),
            frequency_of_participation: value_counts(table, Column::FrequencyOfParticipation),
            average_grade_by_gender: gender_cross_tab(table, Column::CurrentOverallAverage),
            weekly_hours: NumericDistribution::from_values(
                table.iter().map(CleanedRecord::weekly_hours),
            ),
            weekly_hours_by_average_grade: gender_grouped_mean(
                table,
                Column::CurrentOverallAverage,
                CleanedRecord::weekly_hours,
            ),
            event_participation_by_average_grade: gender_grouped_mean(
                table,
                Column::CurrentOverallAverage,
                CleanedRecord::participation_in_events,
            ),
            preferred_activity_words: words::word_frequency(
                table
                    .column(Column::PreferredActivities)
                    .filter_map(Cell::as_text),
            ),
        }
    }
}

/// Number of answers per distinct value of `column`.
#[must_use]
pub fn value_counts(table: &CleanedTable, column: Column) -> Frequency<Cell> {
    Frequency::from_values(table.column(column).cloned())
}

/// Number of answers per value of `column` and gender.
#[must_use]
pub fn gender_cross_tab(table: &CleanedTable, column: Column) -> GenderCrossTab {
    CrossTab::from_pairs(
        table
            .iter()
            .filter_map(|record| Some((record.get(column)?.clone(), record.gender()))),
    )
}

/// Mean of `measure` per value of `column` and gender.
#[must_use]
pub fn gender_grouped_mean<F>(table: &CleanedTable, column: Column, measure: F) -> GenderGroupedMean
where
    F: Fn(&CleanedRecord) -> f64,
{
    GroupedMean::from_triples(table.iter().filter_map(|record| {
        Some((record.get(column)?.clone(), record.gender(), measure(record)))
    }))
}
