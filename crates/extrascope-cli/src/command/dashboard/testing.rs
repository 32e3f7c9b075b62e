//! Survey fixtures shared by the dashboard tests.

use extrascope_stats::welch::SignificancePolicy;
use extrascope_survey::{
    hypothesis::HypothesisReport, normalize::normalize, schema::Column, source,
};

use super::DashboardData;

const WORD_COUNT: usize = 20;

/// `(age, gender, education, average, weekly hours, events, peers, activities)`
type Answer<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str, &'a str, &'a str, &'a str);

const ANSWERS: [Answer<'static>; 6] = [
    ("20 ans", "Homme", "L1", "12", "4h", "Pas encore", "Oui", "Football et musique"),
    ("21", "Homme", "L2", "14", "6", "Une seule fois", "Non", "Football"),
    ("22", "Homme", "L3", "12", "5", "Pas encore", "Oui", "Musique"),
    ("19", "Femme", "L1", "14", "10", "2 fois par semaine et parfois plus", "Oui", "Musique, théâtre"),
    ("20", "Femme", "L2", "16", "12 heures", "Une seule fois", "Non", "Musique"),
    ("23", "Femme", "L3", "14", "11", "3", "Oui", "Théâtre"),
];

fn data_from_csv(data: &str) -> DashboardData {
    let table = normalize(source::read_raw_records(data.as_bytes()).unwrap());
    let report = HypothesisReport::new(&table, SignificancePolicy::default());
    DashboardData::new(table, report, WORD_COUNT)
}

fn header() -> String {
    let mut data = Column::ALL.map(Column::name).join(",");
    data.push('\n');
    data
}

pub(super) fn sample_data() -> DashboardData {
    let mut data = header();
    for (age, gender, education, average, hours, events, peers, activities) in ANSWERS {
        let mut fields = vec![String::new(); Column::COUNT];
        fields[Column::Age.position()] = age.to_owned();
        fields[Column::Gender.position()] = gender.to_owned();
        fields[Column::EducationLevel.position()] = education.to_owned();
        fields[Column::CurrentOverallAverage.position()] = average.to_owned();
        fields[Column::WeeklyHoursSpentOnActivities.position()] = hours.to_owned();
        fields[Column::ParticipationInEventsLastYear.position()] = events.to_owned();
        fields[Column::ImprovedPeerRelations.position()] = peers.to_owned();
        fields[Column::PreferredActivities.position()] = format!("\"{activities}\"");
        data.push_str(&fields.join(","));
        data.push('\n');
    }
    data_from_csv(&data)
}

pub(super) fn empty_data() -> DashboardData {
    data_from_csv(&header())
}
