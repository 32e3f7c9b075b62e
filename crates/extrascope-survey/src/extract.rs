//! Text extraction helpers used while cleaning survey answers.

use std::sync::LazyLock;

use regex::Regex;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit-run pattern is valid"));

static YEAR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:ème|ère)\s+année\s*$").expect("year-suffix pattern is valid"));

/// Digit runs at or above this value have no exact `f64` representation.
const MAX_EXACT_RUN: u64 = 1 << 53;

/// Parses the first maximal run of ASCII digits in `text`.
///
/// Answers such as `"21 ans"` or `"environ 5h"` yield `21.0` and `5.0`.
/// Returns `None` when the text contains no digit, or when the run is too long
/// to be represented exactly.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn leading_digit_run(text: &str) -> Option<f64> {
    let run = DIGIT_RUN.find(text)?.as_str().parse::<u64>().ok()?;
    (run < MAX_EXACT_RUN).then_some(run as f64)
}

/// Removes a trailing year-ordinal suffix (`ème année`, `ère année`).
///
/// The remaining label is trimmed of trailing whitespace. Text without the
/// suffix is returned unchanged.
#[must_use]
pub fn strip_year_suffix(text: &str) -> &str {
    match YEAR_SUFFIX.find(text) {
        Some(m) => text[..m.start()].trim_end(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_digit_run() {
        assert_eq!(leading_digit_run("21"), Some(21.0));
        assert_eq!(leading_digit_run("21 ans"), Some(21.0));
        assert_eq!(leading_digit_run("environ 5h par semaine, parfois 8"), Some(5.0));
        assert_eq!(leading_digit_run("007"), Some(7.0));
        assert_eq!(leading_digit_run("-3"), Some(3.0));
        assert_eq!(leading_digit_run("aucune"), None);
        assert_eq!(leading_digit_run(""), None);
    }

    #[test]
    fn test_oversized_digit_run_is_unresolved() {
        assert_eq!(
            leading_digit_run("9007199254740991 h"),
            Some(9_007_199_254_740_991.0)
        );
        assert_eq!(leading_digit_run("9007199254740992 h"), None);
        assert_eq!(leading_digit_run("12345678901234567891 ans"), None);
        assert_eq!(leading_digit_run("000000000000000000000042"), Some(42.0));
    }

    #[test]
    fn test_strip_year_suffix() {
        assert_eq!(strip_year_suffix("3ère année"), "3");
        assert_eq!(strip_year_suffix("2ème année"), "2");
        assert_eq!(strip_year_suffix("Master 2ème année"), "Master 2");
        assert_eq!(strip_year_suffix("Licence 1 ère année  "), "Licence 1");
        assert_eq!(strip_year_suffix("Doctorat"), "Doctorat");
        assert_eq!(strip_year_suffix("3"), "3");
    }

    #[test]
    fn test_strip_year_suffix_only_at_end() {
        assert_eq!(
            strip_year_suffix("1ère année de prépa"),
            "1ère année de prépa"
        );
    }
}
