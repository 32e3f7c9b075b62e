//! Finite enumeration mappings for categorical survey answers.
//!
//! Every remap is a closed lookup table plus one [`Unmapped`] policy that
//! decides what happens to text outside the table. The policy is fixed per
//! mapping, so every caller treats unmapped input the same way.

use std::fmt;

/// What a [`FiniteMapping`] does with input outside its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmapped {
    /// Keep the original text.
    PassThrough,
    /// Parse the original text as a number; absent if that fails too.
    ParseNumber,
    /// Treat the value as absent.
    Absent,
}

/// Result of looking up one answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a, T> {
    Mapped(T),
    PassedThrough(&'a str),
    Parsed(f64),
    Absent,
}

/// Closed mapping from fixed input labels to fixed output values.
#[derive(Debug, Clone, Copy)]
pub struct FiniteMapping<T: 'static> {
    entries: &'static [(&'static str, T)],
    unmapped: Unmapped,
}

impl<T> FiniteMapping<T>
where
    T: Copy,
{
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, T)], unmapped: Unmapped) -> Self {
        Self { entries, unmapped }
    }

    /// Looks up `input` (surrounding whitespace ignored), applying the unmapped policy on a miss.
    #[must_use]
    pub fn resolve<'a>(&self, input: &'a str) -> Resolution<'a, T> {
        let key = input.trim();
        if let Some((_, value)) = self.entries.iter().find(|(label, _)| *label == key) {
            return Resolution::Mapped(*value);
        }
        match self.unmapped {
            Unmapped::PassThrough => Resolution::PassedThrough(input),
            Unmapped::ParseNumber => key
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map_or(Resolution::Absent, Resolution::Parsed),
            Unmapped::Absent => Resolution::Absent,
        }
    }
}

/// Ordinal scale for `participation_in_events_last_year`.
pub const PARTICIPATION_IN_EVENTS: FiniteMapping<f64> = FiniteMapping::new(
    &[
        ("Pas encore", 0.0),
        ("Une seule fois", 1.0),
        ("2 fois par semaine et parfois plus", 2.0),
    ],
    Unmapped::ParseNumber,
);

/// Canonical gender tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.token(), f)
    }
}

/// Source-language gender labels; the canonical tokens map to themselves.
pub const GENDER: FiniteMapping<Gender> = FiniteMapping::new(
    &[
        ("Homme", Gender::Male),
        ("Femme", Gender::Female),
        ("male", Gender::Male),
        ("female", Gender::Female),
    ],
    Unmapped::PassThrough,
);

/// A gender answer after canonicalization; unmapped labels are preserved.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GenderCategory {
    Canonical(Gender),
    Other(String),
}

impl GenderCategory {
    #[must_use]
    pub fn canonicalize(label: &str) -> Self {
        match GENDER.resolve(label) {
            Resolution::Mapped(gender) => GenderCategory::Canonical(gender),
            Resolution::PassedThrough(text) => GenderCategory::Other(text.to_owned()),
            Resolution::Parsed(value) => GenderCategory::Other(value.to_string()),
            Resolution::Absent => GenderCategory::Other(String::new()),
        }
    }

    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        match self {
            GenderCategory::Canonical(gender) => Some(*gender),
            GenderCategory::Other(_) => None,
        }
    }
}

impl fmt::Display for GenderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderCategory::Canonical(gender) => fmt::Display::fmt(gender, f),
            GenderCategory::Other(label) => fmt::Display::fmt(label, f),
        }
    }
}

/// Yes/no answer to `improved_peer_relations`; anything else is absent.
pub const PEER_RELATIONS: FiniteMapping<bool> =
    FiniteMapping::new(&[("Oui", true), ("Non", false)], Unmapped::Absent);

/// Binary code of a peer-relations answer.
#[must_use]
pub fn peer_relations_code(answer: &str) -> Option<bool> {
    match PEER_RELATIONS.resolve(answer) {
        Resolution::Mapped(code) => Some(code),
        Resolution::PassedThrough(_) | Resolution::Parsed(_) | Resolution::Absent => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participation_enumeration() {
        assert_eq!(
            PARTICIPATION_IN_EVENTS.resolve("Pas encore"),
            Resolution::Mapped(0.0)
        );
        assert_eq!(
            PARTICIPATION_IN_EVENTS.resolve("Une seule fois"),
            Resolution::Mapped(1.0)
        );
        assert_eq!(
            PARTICIPATION_IN_EVENTS.resolve(" 2 fois par semaine et parfois plus "),
            Resolution::Mapped(2.0)
        );
    }

    #[test]
    fn test_participation_numeric_fallback() {
        assert_eq!(PARTICIPATION_IN_EVENTS.resolve("3"), Resolution::Parsed(3.0));
        assert_eq!(PARTICIPATION_IN_EVENTS.resolve("souvent"), Resolution::Absent);
        assert_eq!(PARTICIPATION_IN_EVENTS.resolve("NaN"), Resolution::Absent);
        assert_eq!(PARTICIPATION_IN_EVENTS.unmapped, Unmapped::ParseNumber);
    }

    #[test]
    fn test_gender_canonicalization() {
        assert_eq!(
            GenderCategory::canonicalize("Homme"),
            GenderCategory::Canonical(Gender::Male)
        );
        assert_eq!(
            GenderCategory::canonicalize("Femme"),
            GenderCategory::Canonical(Gender::Female)
        );
        assert_eq!(
            GenderCategory::canonicalize("Autre"),
            GenderCategory::Other("Autre".to_owned())
        );
        assert_eq!(GenderCategory::canonicalize("Autre").gender(), None);
    }

    #[test]
    fn test_gender_canonicalization_is_idempotent() {
        for (label, _) in GENDER.entries {
            let once = GenderCategory::canonicalize(label);
            let twice = GenderCategory::canonicalize(&once.to_string());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_peer_relations_code() {
        assert_eq!(peer_relations_code("Oui"), Some(true));
        assert_eq!(peer_relations_code("Non"), Some(false));
        assert_eq!(peer_relations_code("unknown"), None);
        assert_eq!(peer_relations_code("1"), None);
    }
}
