use crate::tokenizer::tokenize;
use std::collections::{HashMap, HashSet};

/// Set of distinct normalized terms observed across a corpus.
///
/// Immutable once built. Query terms outside the vocabulary are inert: they
/// are dropped during encoding and never contribute to a score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: HashSet<String>,
}

impl Vocabulary {
    /// Tokenize every document and union the resulting terms.
    pub fn build<S: AsRef<str>>(corpus: &[S]) -> Self {
        let terms = corpus
            .iter()
            .flat_map(|doc| tokenize(doc.as_ref()))
            .collect();
        Self { terms }
    }

    pub(crate) fn from_counts(counts: &[HashMap<String, u32>]) -> Self {
        let terms = counts.iter().flat_map(|c| c.keys().cloned()).collect();
        Self { terms }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_unions_document_terms() {
        let vocab = Vocabulary::build(&["Rust is fast", "rust is SAFE"]);
        assert_eq!(vocab.len(), 4);
        for term in ["rust", "is", "fast", "safe"] {
            assert!(vocab.contains(term), "missing {term}");
        }
    }

    #[test]
    fn document_order_does_not_matter() {
        let a = Vocabulary::build(&["alpha beta", "gamma"]);
        let b = Vocabulary::build(&["gamma", "alpha beta"]);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_corpus_has_empty_vocabulary() {
        let corpus: [&str; 0] = [];
        assert!(Vocabulary::build(&corpus).is_empty());
    }
}
