//! Bag-of-words encoding restricted to a vocabulary.

use crate::tokenizer::tokenize;
use crate::vocabulary::Vocabulary;
use std::collections::{BTreeMap, HashMap};

/// Term → occurrence count for one text.
///
/// Keys are always a subset of the vocabulary used to encode the text and
/// every stored count is at least 1; absent terms are simply missing. Terms
/// are kept sorted so iteration (and thus floating-point summation in the
/// scorers) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BagOfWords {
    counts: BTreeMap<String, u32>,
}

impl BagOfWords {
    /// Tokenize `text`, count each token and drop tokens outside `vocabulary`.
    pub fn encode(text: &str, vocabulary: &Vocabulary) -> Self {
        Self::from_counts(count_tokens(text), vocabulary)
    }

    pub(crate) fn from_counts(counts: HashMap<String, u32>, vocabulary: &Vocabulary) -> Self {
        let counts = counts
            .into_iter()
            .filter(|(term, count)| *count > 0 && vocabulary.contains(term))
            .collect();
        Self { counts }
    }

    /// Count of `term`, 0 when absent.
    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts: the in-vocabulary length of the encoded text.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Sum of squared counts, exact in integer arithmetic.
    pub fn sum_of_squares(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c) * u64::from(c)).sum()
    }

    /// Euclidean norm of the count vector.
    pub fn magnitude(&self) -> f64 {
        (self.sum_of_squares() as f64).sqrt()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(term, &count)| (term.as_str(), count))
    }
}

/// Raw token counts of `text`, before any vocabulary filtering.
pub fn count_tokens(text: &str) -> HashMap<String, u32> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_counts_in_vocabulary_terms() {
        let vocab: Vocabulary = ["quick", "fox"].into_iter().collect();
        let bow = BagOfWords::encode("The quick quick fox, quick!", &vocab);
        assert_eq!(bow.count("quick"), 3);
        assert_eq!(bow.count("fox"), 1);
        assert_eq!(bow.count("the"), 0);
        assert!(!bow.contains("the"));
        assert_eq!(bow.len(), 2);
        assert_eq!(bow.total(), 4);
    }

    #[test]
    fn out_of_vocabulary_text_is_empty() {
        let vocab: Vocabulary = ["rust"].into_iter().collect();
        let bow = BagOfWords::encode("nothing matches here", &vocab);
        assert!(bow.is_empty());
        assert_eq!(bow.total(), 0);
        assert_eq!(bow.magnitude(), 0.0);
    }

    #[test]
    fn magnitude_is_euclidean_norm() {
        let vocab: Vocabulary = ["a", "b"].into_iter().collect();
        let bow = BagOfWords::encode("a a a b b b b", &vocab);
        assert_eq!(bow.sum_of_squares(), 25);
        assert_eq!(bow.magnitude(), 5.0);
    }

    #[test]
    fn count_tokens_keeps_everything() {
        let counts = count_tokens("a b a");
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&1));
    }
}
