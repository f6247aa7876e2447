//! General-purpose English lexicon scorer.

use std::convert::Infallible;

use crate::sentiment::PolarityScorer;

/// Opinion word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive
    ("excellent", 1.0),
    ("best", 1.0),
    ("outstanding", 0.9),
    ("superb", 0.9),
    ("great", 0.8),
    ("love", 0.5),
    ("loved", 0.7),
    ("amazing", 0.6),
    ("impressive", 1.0),
    ("good", 0.7),
    ("better", 0.5),
    ("leading", 0.4),
    ("popular", 0.6),
    ("reliable", 0.5),
    ("recommend", 0.5),
    ("recommended", 0.5),
    ("innovative", 0.5),
    ("intuitive", 0.5),
    ("powerful", 0.3),
    ("robust", 0.4),
    ("strong", 0.4),
    ("easy", 0.4),
    ("helpful", 0.5),
    ("useful", 0.3),
    ("affordable", 0.4),
    ("trusted", 0.5),
    ("favorite", 0.5),
    ("nice", 0.6),
    ("solid", 0.3),
    ("efficient", 0.4),
    ("flexible", 0.3),
    ("successful", 0.6),
    ("top", 0.5),
    ("well", 0.2),
    // Negative
    ("terrible", -1.0),
    ("worst", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("bad", -0.7),
    ("worse", -0.4),
    ("poor", -0.4),
    ("disappointing", -0.6),
    ("unreliable", -0.5),
    ("expensive", -0.5),
    ("overpriced", -0.6),
    ("slow", -0.3),
    ("buggy", -0.6),
    ("difficult", -0.5),
    ("confusing", -0.4),
    ("complicated", -0.4),
    ("limited", -0.1),
    ("lacking", -0.4),
    ("weak", -0.4),
    ("outdated", -0.4),
    ("problem", -0.3),
    ("problems", -0.3),
    ("issue", -0.2),
    ("issues", -0.2),
    ("failure", -0.5),
    ("failed", -0.5),
    ("hate", -0.8),
    ("frustrating", -0.6),
    ("lawsuit", -0.5),
    ("scandal", -0.7),
];

/// Words that scale the weight of the next opinion word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.5),
    ("truly", 1.2),
    ("quite", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.6),
];

const NEGATORS: &[&str] = &["not", "no", "never", "neither", "nor", "without", "hardly"];

/// How many tokens after a negator are affected by it.
const NEGATION_WINDOW: usize = 2;

/// Negated opinion words flip sign and lose half their strength.
const NEGATION_FACTOR: f64 = -0.5;

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

fn lookup(table: &[(&str, f64)], word: &str) -> Option<f64> {
    table.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}

/// Scores text as the mean weight of its opinion words.
///
/// Words are lowercased and stripped of surrounding punctuation. A negator
/// within the preceding two words flips and halves a weight; an intensifier
/// directly before an opinion word scales it. Text without opinion words
/// scores `0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn score(&self, text: &str) -> f64 {
        let mut weights: Vec<f64> = Vec::new();
        let mut negation_left = 0usize;
        let mut intensity = 1.0_f64;

        for raw in text.split_whitespace() {
            let word = raw
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .trim_matches('\'')
                .to_lowercase()
                .replace('\u{2019}', "'");
            if word.is_empty() {
                continue;
            }

            if is_negator(&word) {
                negation_left = NEGATION_WINDOW;
                intensity = 1.0;
                continue;
            }

            if let Some(factor) = lookup(INTENSIFIERS, &word) {
                intensity = factor;
                continue;
            }

            if let Some(weight) = lookup(LEXICON, &word) {
                let mut w = (weight * intensity).clamp(-1.0, 1.0);
                if negation_left > 0 {
                    w *= NEGATION_FACTOR;
                }
                weights.push(w);
            }

            intensity = 1.0;
            negation_left = negation_left.saturating_sub(1);
        }

        if weights.is_empty() {
            return 0.0;
        }

        #[allow(clippy::cast_precision_loss)]
        let denom = weights.len() as f64;
        (weights.iter().sum::<f64>() / denom).clamp(-1.0, 1.0)
    }
}

impl PolarityScorer for LexiconScorer {
    type Error = Infallible;

    fn polarity(&self, text: &str) -> Result<f64, Infallible> {
        Ok(self.score(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::score_sentiment;
    use crate::types::SentimentLabel;

    fn score(text: &str) -> f64 {
        LexiconScorer::new().score(text)
    }

    #[test]
    fn empty_string_returns_zero() {
        assert!(score("").abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_text_returns_zero() {
        assert!(score("the quick brown fox").abs() < f64::EPSILON);
    }

    #[test]
    fn positive_keyword_returns_positive() {
        let s = score("Acme is a great product");
        assert!(s > 0.1, "expected positive score, got {s}");
    }

    #[test]
    fn negative_keyword_returns_negative() {
        let s = score("Globex support was terrible");
        assert!(s < -0.1, "expected negative score, got {s}");
    }

    #[test]
    fn score_is_mean_of_matches() {
        // great (0.8) + bad (-0.7) => 0.05
        let s = score("great features but bad pricing");
        assert!((s - 0.05).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn negation_flips_and_halves() {
        // good (0.7) negated => -0.35
        let s = score("this is not good");
        assert!((s + 0.35).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn contracted_negation_is_recognised() {
        assert!(score("it isn't reliable") < 0.0);
        assert!(score("it doesn\u{2019}t feel intuitive") < 0.0);
    }

    #[test]
    fn negation_window_expires() {
        // "not" is three words before "good" so it no longer applies.
        let s = score("not that it matters, good");
        assert!(s > 0.0, "got {s}");
    }

    #[test]
    fn intensifier_strengthens_next_word() {
        assert!(score("very good") > score("good"));
        assert!(score("slightly bad") > score("bad"));
    }

    #[test]
    fn intensified_weight_is_capped() {
        let s = score("extremely excellent");
        assert!((s - 1.0).abs() < f64::EPSILON, "got {s}");
    }

    #[test]
    fn punctuation_stripped_from_words() {
        assert!(score("great!") > 0.0);
        assert!(score("(awful)") < 0.0);
    }

    #[test]
    fn labels_through_sentiment_contract() {
        let scorer = LexiconScorer::new();
        let positive = score_sentiment(&scorer, "Acme offers excellent, reliable service").unwrap();
        assert_eq!(positive.label, SentimentLabel::Positive);

        let neutral = score_sentiment(&scorer, "Acme sells software").unwrap();
        assert_eq!(neutral.label, SentimentLabel::Neutral);
    }
}
