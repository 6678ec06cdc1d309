mod distance;
mod normalizer;

pub use normalizer::NameNormalizer;

use crate::config::MatchingConfig;
use serde::Serialize;

/// Scores how closely two recorded names refer to the same person.
///
/// Both sides of a pair are canonicalized by the embedded [`NameNormalizer`]
/// before the edit distance runs, so casing, spacing, accents, and (when
/// folding is enabled) German transliteration spellings do not affect the
/// score. Every call is a pure function of its arguments; the matcher can be
/// shared freely between concurrent callers.
pub struct NameMatcher {
    normalizer: NameNormalizer,
}

/// One scored pair, with the normalized forms kept for audit display.
#[derive(Debug, Clone, Serialize)]
pub struct MatchComparison {
    pub score: f64,
    pub normalized_left: String,
    pub normalized_right: String,
}

impl NameMatcher {
    pub fn new(fold_german_digraphs: bool) -> Self {
        Self {
            normalizer: NameNormalizer::new(fold_german_digraphs),
        }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new(config.fold_german_digraphs)
    }

    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    /// Bounded similarity in [0, 1]; 1.0 means the normalized strings are
    /// identical, 0.0 means maximal divergence relative to the longer side.
    pub fn similarity(&self, left: Option<&str>, right: Option<&str>) -> f64 {
        self.compare(left, right).score
    }

    /// Scores a pair and returns the normalized forms alongside the score.
    ///
    /// Two absent (or whitespace-only) values count as a perfect match so
    /// that records with an empty optional field are not penalized.
    pub fn compare(&self, left: Option<&str>, right: Option<&str>) -> MatchComparison {
        let normalized_left = self.normalizer.normalize(left);
        let normalized_right = self.normalizer.normalize(right);

        let max_len = normalized_left
            .chars()
            .count()
            .max(normalized_right.chars().count());

        let score = if max_len == 0 {
            1.0
        } else {
            let dist = distance::levenshtein(&normalized_left, &normalized_right);
            // The distance never exceeds max_len; the clamp enforces the
            // documented lower bound regardless.
            (1.0 - dist as f64 / max_len as f64).max(0.0)
        };

        MatchComparison {
            score,
            normalized_left,
            normalized_right,
        }
    }
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::from_config(&MatchingConfig::default())
    }
}
