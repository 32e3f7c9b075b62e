//! Fixed column schema of the extracurricular-activity survey export.
//!
//! Fields are identified by position only. Header names in the source file
//! are never trusted; [`Column::ALL`] gives the positional meaning.

use std::fmt;

use crate::table::Cell;

/// One of the 22 positional survey columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Timestamp,
    Username,
    Age,
    Gender,
    EducationLevel,
    AcademicPerformanceRating,
    ExtracurricularInvolvement,
    ParticipatingActivities,
    TimeManagementStrategy,
    ImpactOnTimeManagement,
    InstitutionalSupport,
    InstitutionalEncouragementRating,
    ExtracurricularContributionRating,
    ImprovedPeerRelations,
    InfluenceOnPersonalDevelopment,
    PreferredActivities,
    FrequencyOfParticipation,
    WeeklyHoursSpentOnActivities,
    CurrentOverallAverage,
    ParticipationInEventsLastYear,
    SatisfactionRating,
    SkillsAcquiredCount,
}

/// How a column's raw text is turned into a [`Cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningRule {
    /// Dropped from the cleaned table after deduplication.
    Identity,
    /// First maximal run of decimal digits, parsed as a number.
    DigitRun,
    /// Finite enumeration lookup, then a numeric parse of the raw text.
    Enumerated,
    /// Trailing year-ordinal suffix removed.
    StripYearSuffix,
    /// Numeric text becomes a number, anything else is kept as text.
    PassThrough,
}

/// Value given to a cell that is still unresolved after cleaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillDefault {
    Numeric(f64),
    Categorical(&'static str),
}

/// Label used for categorical cells with no resolvable value.
pub const UNKNOWN_LABEL: &str = "unknown";

impl FillDefault {
    #[must_use]
    pub fn to_cell(self) -> Cell {
        match self {
            FillDefault::Numeric(value) => Cell::Number(value),
            FillDefault::Categorical(label) => Cell::Text(label.to_owned()),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.name(), f)
    }
}

impl serde::Serialize for Column {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl Column {
    /// Number of fields in a raw record.
    pub const COUNT: usize = 22;

    /// Number of identity fields, which come first in a raw record.
    const IDENTITY_COUNT: usize = 2;

    /// Every column, in positional order.
    pub const ALL: [Column; Self::COUNT] = [
        Column::Timestamp,
        Column::Username,
        Column::Age,
        Column::Gender,
        Column::EducationLevel,
        Column::AcademicPerformanceRating,
        Column::ExtracurricularInvolvement,
        Column::ParticipatingActivities,
        Column::TimeManagementStrategy,
        Column::ImpactOnTimeManagement,
        Column::InstitutionalSupport,
        Column::InstitutionalEncouragementRating,
        Column::ExtracurricularContributionRating,
        Column::ImprovedPeerRelations,
        Column::InfluenceOnPersonalDevelopment,
        Column::PreferredActivities,
        Column::FrequencyOfParticipation,
        Column::WeeklyHoursSpentOnActivities,
        Column::CurrentOverallAverage,
        Column::ParticipationInEventsLastYear,
        Column::SatisfactionRating,
        Column::SkillsAcquiredCount,
    ];

    /// Columns kept in the cleaned table, in output order.
    #[must_use]
    pub fn cleaned() -> &'static [Column] {
        &Self::ALL[Self::IDENTITY_COUNT..]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Column::Timestamp => "timestamp",
            Column::Username => "username",
            Column::Age => "age",
            Column::Gender => "gender",
            Column::EducationLevel => "education_level",
            Column::AcademicPerformanceRating => "academic_performance_rating",
            Column::ExtracurricularInvolvement => "extracurricular_involvement",
            Column::ParticipatingActivities => "participating_activities",
            Column::TimeManagementStrategy => "time_management_strategy",
            Column::ImpactOnTimeManagement => "impact_on_time_management",
            Column::InstitutionalSupport => "institutional_support",
            Column::InstitutionalEncouragementRating => "institutional_encouragement_rating",
            Column::ExtracurricularContributionRating => "extracurricular_contribution_rating",
            Column::ImprovedPeerRelations => "improved_peer_relations",
            Column::InfluenceOnPersonalDevelopment => "influence_on_personal_development",
            Column::PreferredActivities => "preferred_activities",
            Column::FrequencyOfParticipation => "frequency_of_participation",
            Column::WeeklyHoursSpentOnActivities => "weekly_hours_spent_on_activities",
            Column::CurrentOverallAverage => "current_overall_average",
            Column::ParticipationInEventsLastYear => "participation_in_events_last_year",
            Column::SatisfactionRating => "satisfaction_rating",
            Column::SkillsAcquiredCount => "skills_acquired_count",
        }
    }

    /// Position in a raw record.
    #[must_use]
    pub fn position(self) -> usize {
        self as usize
    }

    /// Position in a cleaned record, or `None` for identity columns.
    #[must_use]
    pub fn cleaned_index(self) -> Option<usize> {
        self.position().checked_sub(Self::IDENTITY_COUNT)
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self.cleaned_index().is_none()
    }

    #[must_use]
    pub fn rule(self) -> CleaningRule {
        match self {
            Column::Timestamp | Column::Username => CleaningRule::Identity,
            Column::Age | Column::WeeklyHoursSpentOnActivities => CleaningRule::DigitRun,
            Column::ParticipationInEventsLastYear => CleaningRule::Enumerated,
            Column::EducationLevel => CleaningRule::StripYearSuffix,
            _ => CleaningRule::PassThrough,
        }
    }

    #[must_use]
    pub fn fill_default(self) -> FillDefault {
        match self {
            Column::Age
            | Column::WeeklyHoursSpentOnActivities
            | Column::ParticipationInEventsLastYear
            | Column::AcademicPerformanceRating
            | Column::InstitutionalEncouragementRating
            | Column::ExtracurricularContributionRating
            | Column::SatisfactionRating
            | Column::SkillsAcquiredCount => FillDefault::Numeric(0.0),
            _ => FillDefault::Categorical(UNKNOWN_LABEL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("expected {expected} fields, found {found}")]
pub struct SchemaMismatchError {
    pub expected: usize,
    pub found: usize,
}

/// One untransformed survey row with exactly [`Column::COUNT`] text fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawRecord {
    fields: Vec<String>,
}

impl RawRecord {
    /// Wraps positional fields, rejecting rows of the wrong width.
    pub fn new(fields: Vec<String>) -> Result<Self, SchemaMismatchError> {
        if fields.len() == Column::COUNT {
            Ok(Self { fields })
        } else {
            Err(SchemaMismatchError {
                expected: Column::COUNT,
                found: fields.len(),
            })
        }
    }

    /// Builds a record by rendering every column in positional order.
    pub(crate) fn from_columns<F>(render: F) -> Self
    where
        F: FnMut(Column) -> String,
    {
        Self {
            fields: Column::ALL.into_iter().map(render).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, column: Column) -> &str {
        &self.fields[column.position()]
    }

    /// Fields compared when looking for duplicate rows (identity fields excluded).
    #[must_use]
    pub fn dedup_key(&self) -> &[String] {
        &self.fields[Column::IDENTITY_COUNT..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(len: usize) -> Vec<String> {
        (0..len).map(|i| format!("f{i}")).collect()
    }

    #[test]
    fn test_positions_match_declaration_order() {
        for (i, column) in Column::ALL.into_iter().enumerate() {
            assert_eq!(column.position(), i);
        }
        let names = Column::ALL
            .map(Column::name)
            .into_iter()
            .collect::<std::collections::BTreeSet<_>>();
        assert_eq!(names.len(), Column::COUNT);
        assert_eq!(Column::cleaned().len(), 20);
        assert_eq!(Column::cleaned()[0], Column::Age);
        assert_eq!(Column::Age.cleaned_index(), Some(0));
        assert!(Column::Username.is_identity());
        assert!(!Column::Gender.is_identity());
    }

    #[test]
    fn test_raw_record_width_is_checked() {
        assert!(RawRecord::new(row(22)).is_ok());
        let err = RawRecord::new(row(21)).unwrap_err();
        assert_eq!(
            err,
            SchemaMismatchError {
                expected: 22,
                found: 21
            }
        );
        assert_eq!(err.to_string(), "expected 22 fields, found 21");
    }

    #[test]
    fn test_dedup_key_skips_identity_fields() {
        let record = RawRecord::new(row(22)).unwrap();
        assert_eq!(record.dedup_key().len(), 20);
        assert_eq!(record.dedup_key()[0], "f2");
        assert_eq!(record.get(Column::Username), "f1");
        assert_eq!(record.get(Column::SkillsAcquiredCount), "f21");
    }

    #[test]
    fn test_fill_defaults_are_typed() {
        assert_eq!(Column::Age.fill_default(), FillDefault::Numeric(0.0));
        assert_eq!(
            Column::Gender.fill_default(),
            FillDefault::Categorical(UNKNOWN_LABEL)
        );
        assert_eq!(
            Column::ParticipationInEventsLastYear.fill_default().to_cell(),
            Cell::Number(0.0)
        );
    }
}
