//! The two canned gender comparisons.
//!
//! - weekly hours spent on activities, compared with Welch's t-test;
//! - share of students reporting improved peer relations, compared by
//!   proportion only.
//!
//! Both pick their groups through the gender remap at selection time; the
//! cleaned table itself is never rewritten.

use chrono::{DateTime, Utc};
use extrascope_stats::{
    proportion::{self, ProportionComparison, ProportionOrdering},
    welch::{self, MeanComparison, Significance, SignificancePolicy},
};

use crate::{
    mapping::Gender,
    table::{CleanedRecord, CleanedTable},
};

/// Values of one measure split into the male and female groups.
///
/// Records whose gender is outside the canonical pair belong to neither group.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct GenderSplit<T> {
    pub male: Vec<T>,
    pub female: Vec<T>,
}

impl<T> GenderSplit<T> {
    pub fn from_records<'a, I, F>(records: I, measure: F) -> Self
    where
        I: IntoIterator<Item = &'a CleanedRecord>,
        F: Fn(&CleanedRecord) -> T,
    {
        let mut split = Self {
            male: vec![],
            female: vec![],
        };
        for record in records {
            match record.gender().gender() {
                Some(Gender::Male) => split.male.push(measure(record)),
                Some(Gender::Female) => split.female.push(measure(record)),
                None => {}
            }
        }
        split
    }
}

#[must_use]
pub fn weekly_hours_by_gender(table: &CleanedTable) -> GenderSplit<f64> {
    GenderSplit::from_records(table, CleanedRecord::weekly_hours)
}

#[must_use]
pub fn peer_relations_by_gender(table: &CleanedTable) -> GenderSplit<Option<bool>> {
    GenderSplit::from_records(table, CleanedRecord::improved_peer_relations)
}

/// Welch's test on weekly hours, men first.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MeanTestOutcome {
    Completed {
        comparison: MeanComparison,
        significance: Significance,
    },
    InsufficientData {
        reason: String,
    },
}

/// Peer-relations proportion comparison, men first.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProportionOutcome {
    Completed { comparison: ProportionComparison },
    InsufficientData { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GroupSizes {
    pub male: usize,
    pub female: usize,
}

impl<T> From<&GenderSplit<T>> for GroupSizes {
    fn from(split: &GenderSplit<T>) -> Self {
        Self {
            male: split.male.len(),
            female: split.female.len(),
        }
    }
}

/// Results of both comparisons for one cleaned table.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HypothesisReport {
    pub generated_at: DateTime<Utc>,
    pub alpha: f64,
    pub group_sizes: GroupSizes,
    pub weekly_hours: MeanTestOutcome,
    pub peer_relations: ProportionOutcome,
}

impl HypothesisReport {
    #[must_use]
    pub fn new(table: &CleanedTable, policy: SignificancePolicy) -> Self {
        let hours = weekly_hours_by_gender(table);
        let peers = peer_relations_by_gender(table);

        let weekly_hours = match welch::compare_means(&hours.male, &hours.female) {
            Ok(comparison) => MeanTestOutcome::Completed {
                significance: policy.assess(comparison.p_value),
                comparison,
            },
            Err(e) => {
                tracing::warn!(error = %e, "weekly hours test skipped");
                MeanTestOutcome::InsufficientData {
                    reason: e.to_string(),
                }
            }
        };
        let peer_relations = match proportion::compare_proportions(peers.male, peers.female) {
            Ok(comparison) => ProportionOutcome::Completed { comparison },
            Err(e) => {
                tracing::warn!(error = %e, "peer relations comparison skipped");
                ProportionOutcome::InsufficientData {
                    reason: e.to_string(),
                }
            }
        };

        Self {
            generated_at: Utc::now(),
            alpha: policy.alpha,
            group_sizes: GroupSizes::from(&hours),
            weekly_hours,
            peer_relations,
        }
    }
}

impl MeanTestOutcome {
    #[must_use]
    pub fn verdict(&self) -> &'static str {
        match self {
            MeanTestOutcome::Completed {
                significance: Significance::Significant,
                ..
            } => {
                "The difference in weekly hours spent on activities between men and women is statistically significant."
            }
            MeanTestOutcome::Completed {
                significance: Significance::Inconclusive,
                ..
            } => {
                "There is not enough evidence to conclude a significant difference in weekly hours spent on activities between men and women."
            }
            MeanTestOutcome::InsufficientData { .. } => {
                "Not enough data to compare weekly hours spent on activities between men and women."
            }
        }
    }
}

impl ProportionOutcome {
    #[must_use]
    pub fn verdict(&self) -> &'static str {
        match self {
            ProportionOutcome::Completed { comparison } => match comparison.ordering {
                ProportionOrdering::FirstGreater => {
                    "A higher proportion of male students report improved peer relations."
                }
                ProportionOrdering::SecondGreater => {
                    "A higher proportion of female students report improved peer relations."
                }
                ProportionOrdering::Equal => {
                    "There is no difference in the proportion of improved peer relations between genders."
                }
            },
            ProportionOutcome::InsufficientData { .. } => {
                "Not enough data to compare improved peer relations between genders."
            }
        }
    }
}
