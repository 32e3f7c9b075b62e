//! Word ranking for free-text answers.

use extrascope_stats::frequency::Frequency;

/// Words shorter than this (in characters) are ignored.
pub const MIN_WORD_LEN: usize = 3;

/// Common French and English words carrying no meaning on their own, plus
/// the fill label of unanswered questions.
const STOP_WORDS: &[&str] = &[
    "and", "are", "aux", "avec", "but", "ces", "cette", "dans", "des", "du", "elle", "est",
    "for", "from", "ils", "les", "leur", "mais", "mes", "nos", "not", "par", "pas", "plus",
    "pour", "que", "qui", "sans", "ses", "sont", "sur", "the", "this", "tous", "tout", "une",
    "unknown", "vos", "with", "you",
];

#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Splits `text` into lower-cased words, dropping short words and stop words.
///
/// Any non-alphabetic character separates words, so accented letters stay
/// inside their word.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|word| word.chars().count() >= MIN_WORD_LEN)
        .map(str::to_lowercase)
        .filter(|word| !is_stop_word(word))
}

/// Counts the words of every answer.
pub fn word_frequency<'a, I>(answers: I) -> Frequency<String>
where
    I: IntoIterator<Item = &'a str>,
{
    Frequency::from_values(answers.into_iter().flat_map(tokenize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let words = tokenize("Sport, Musique et théâtre; le CLUB de débat").collect::<Vec<_>>();
        assert_eq!(words, ["sport", "musique", "théâtre", "club", "débat"]);
    }

    #[test]
    fn test_tokenize_drops_stop_words() {
        assert_eq!(tokenize("unknown").count(), 0);
        assert_eq!(tokenize("Les activités pour tous").collect::<Vec<_>>(), ["activités"]);
    }

    #[test]
    fn test_word_frequency() {
        let freq = word_frequency(["Sport et musique", "sport", "Danse, SPORT"]);
        assert_eq!(freq.count(&"sport".to_owned()), 3);
        assert_eq!(freq.most_common()[0], (&"sport".to_owned(), 3));
        assert_eq!(freq.total(), 5);
    }
}
