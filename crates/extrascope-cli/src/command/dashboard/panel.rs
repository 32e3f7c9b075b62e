//! Dashboard panels and their visibility.

use std::collections::BTreeSet;

/// One chart or result block of the dashboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PanelKind {
    GenderDistribution,
    EducationLevelDistribution,
    AgeDistribution,
    GenderByAcademicPerformance,
    TimeManagementByGender,
    GenderByEducationLevel,
    TimeManagementShares,
    FrequencyOfParticipation,
    GenderByAverageGrade,
    WeeklyHoursDistribution,
    WeeklyHoursByAverageGrade,
    EventParticipationByAverageGrade,
    PreferredActivities,
    WeeklyHoursTest,
    PeerRelationsComparison,
}

impl PanelKind {
    pub(crate) const ALL: [PanelKind; 15] = [
        PanelKind::GenderDistribution,
        PanelKind::EducationLevelDistribution,
        PanelKind::AgeDistribution,
        PanelKind::GenderByAcademicPerformance,
        PanelKind::TimeManagementByGender,
        PanelKind::GenderByEducationLevel,
        PanelKind::TimeManagementShares,
        PanelKind::FrequencyOfParticipation,
        PanelKind::GenderByAverageGrade,
        PanelKind::WeeklyHoursDistribution,
        PanelKind::WeeklyHoursByAverageGrade,
        PanelKind::EventParticipationByAverageGrade,
        PanelKind::PreferredActivities,
        PanelKind::WeeklyHoursTest,
        PanelKind::PeerRelationsComparison,
    ];

    pub(crate) fn title(self) -> &'static str {
        match self {
            PanelKind::GenderDistribution => "Gender Distribution",
            PanelKind::EducationLevelDistribution => "Education Level Distribution",
            PanelKind::AgeDistribution => "Age Distribution",
            PanelKind::GenderByAcademicPerformance => "Gender Distribution by Academic Performance",
            PanelKind::TimeManagementByGender => "Time Management Strategies by Gender",
            PanelKind::GenderByEducationLevel => "Gender Distribution by Education Level",
            PanelKind::TimeManagementShares => "Time Management Strategy",
            PanelKind::FrequencyOfParticipation => "Frequency of Participation",
            PanelKind::GenderByAverageGrade => "Gender Distribution by Average Grade",
            PanelKind::WeeklyHoursDistribution => "Weekly Hours Spent on Activities",
            PanelKind::WeeklyHoursByAverageGrade => "Weekly Hours by Average Grade and Gender",
            PanelKind::EventParticipationByAverageGrade => {
                "Event Participation by Average Grade and Gender"
            }
            PanelKind::PreferredActivities => "Preferred Activities",
            PanelKind::WeeklyHoursTest => "Hypotheses Testing",
            PanelKind::PeerRelationsComparison => "Proportions Comparison",
        }
    }

    /// Panels hidden behind a sidebar checkbox at startup.
    pub(crate) fn starts_hidden(self) -> bool {
        matches!(
            self,
            PanelKind::GenderDistribution
                | PanelKind::EducationLevelDistribution
                | PanelKind::AgeDistribution
                | PanelKind::GenderByAcademicPerformance
                | PanelKind::TimeManagementByGender
                | PanelKind::GenderByEducationLevel
                | PanelKind::TimeManagementShares
        )
    }
}

/// Panels shown in the main area at once (a 2 x 2 grid).
pub(crate) const PANELS_PER_PAGE: usize = 4;

/// Which panels are visible, and which page of them is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PanelSelection {
    visible: BTreeSet<PanelKind>,
    page: usize,
}

impl Default for PanelSelection {
    fn default() -> Self {
        Self::new(PanelKind::ALL.into_iter().filter(|kind| !kind.starts_hidden()))
    }
}

impl PanelSelection {
    pub(crate) fn new<I>(visible: I) -> Self
    where
        I: IntoIterator<Item = PanelKind>,
    {
        Self {
            visible: visible.into_iter().collect(),
            page: 0,
        }
    }

    pub(crate) fn is_visible(&self, kind: PanelKind) -> bool {
        self.visible.contains(&kind)
    }

    pub(crate) fn toggle(&mut self, kind: PanelKind) {
        if !self.visible.remove(&kind) {
            self.visible.insert(kind);
        }
        self.clamp_page();
    }

    pub(crate) fn show_all(&mut self) {
        self.visible.extend(PanelKind::ALL);
    }

    pub(crate) fn hide_all(&mut self) {
        self.visible.clear();
        self.page = 0;
    }

    /// Visible panels in dashboard order.
    pub(crate) fn visible(&self) -> Vec<PanelKind> {
        self.visible.iter().copied().collect()
    }

    pub(crate) fn page(&self) -> usize {
        self.page
    }

    pub(crate) fn page_count(&self) -> usize {
        self.visible.len().div_ceil(PANELS_PER_PAGE).max(1)
    }

    pub(crate) fn next_page(&mut self) {
        self.page = (self.page + 1) % self.page_count();
    }

    pub(crate) fn previous_page(&mut self) {
        self.page = self.page.checked_sub(1).unwrap_or(self.page_count() - 1);
    }

    /// Panels on the current page.
    pub(crate) fn current_page(&self) -> Vec<PanelKind> {
        self.visible
            .iter()
            .copied()
            .skip(self.page * PANELS_PER_PAGE)
            .take(PANELS_PER_PAGE)
            .collect()
    }

    fn clamp_page(&mut self) {
        self.page = self.page.min(self.page_count() - 1);
    }
}
