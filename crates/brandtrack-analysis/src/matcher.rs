//! Case-insensitive, whole-word name matching.

use brandtrack_core::Brand;
use regex::Regex;

use crate::types::{CompetitorCounts, MentionCount};

/// A compiled whole-word pattern for one name.
#[derive(Debug)]
struct NamePattern {
    name: String,
    regex: Option<Regex>,
}

impl NamePattern {
    fn new(name: &str) -> Result<Self, regex::Error> {
        let folded = name.to_lowercase();
        // An empty name would match at every word boundary.
        let regex = if folded.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(r"\b{}\b", regex::escape(&folded)))?)
        };

        Ok(Self {
            name: name.to_string(),
            regex,
        })
    }

    /// `folded_text` must already be lowercased.
    fn count(&self, folded_text: &str) -> usize {
        self.regex
            .as_ref()
            .map_or(0, |re| re.find_iter(folded_text).count())
    }
}

/// Pre-compiled mention patterns for a single brand.
///
/// Build once per brand and reuse across responses; [`count_mentions`] is the
/// one-shot equivalent.
#[derive(Debug)]
pub struct BrandMatcher {
    brand_names: Vec<NamePattern>,
    competitors: Vec<NamePattern>,
}

impl BrandMatcher {
    /// # Errors
    ///
    /// Returns the `regex` error if any name's pattern cannot be compiled,
    /// e.g. one exceeding the compiled-size limit.
    pub fn new(brand: &Brand) -> Result<Self, regex::Error> {
        // Canonical and variants are not deduplicated: a variant equal to the
        // canonical name counts twice.
        let brand_names = std::iter::once(&brand.canonical)
            .chain(&brand.variants)
            .map(|n| NamePattern::new(n))
            .collect::<Result<_, _>>()?;
        let competitors = brand
            .competitors
            .iter()
            .map(|n| NamePattern::new(n))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            brand_names,
            competitors,
        })
    }

    #[must_use]
    pub fn count(&self, text: &str) -> MentionCount {
        let folded = text.to_lowercase();

        let brand_mentions = self.brand_names.iter().map(|p| p.count(&folded)).sum();

        let mut competitor_mentions = CompetitorCounts::new();
        for pattern in &self.competitors {
            competitor_mentions.insert(&pattern.name, pattern.count(&folded));
        }

        MentionCount {
            brand_mentions,
            competitor_mentions,
        }
    }
}

/// Count whole-word, case-insensitive mentions of `brand` and its competitors.
///
/// Every competitor appears in the result, with `0` when it is not mentioned.
///
/// # Errors
///
/// Returns the `regex` error if a name's pattern cannot be compiled.
pub fn count_mentions(text: &str, brand: &Brand) -> Result<MentionCount, regex::Error> {
    Ok(BrandMatcher::new(brand)?.count(text))
}
