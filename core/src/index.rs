use crate::bow::{count_tokens, BagOfWords};
use crate::cancel::CancelToken;
use crate::config::{Bm25Params, IndexConfig};
use crate::error::{Error, Result};
use crate::vocabulary::Vocabulary;
use rayon::prelude::*;
use std::collections::HashMap;

/// Position of a document in the corpus it was ingested from.
pub type DocId = u32;

/// Which inverse document frequency formula to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdfFormula {
    /// `ln((N - n_t + 0.5) / (n_t + 0.5) + 1)`
    Bm25,
    /// `ln((1 + N) / (1 + n_t))`
    Smoothed,
}

impl IdfFormula {
    pub fn compute(self, num_docs: usize, document_frequency: u32) -> f64 {
        let n = num_docs as f64;
        let n_t = f64::from(document_frequency);
        match self {
            IdfFormula::Bm25 => ((n - n_t + 0.5) / (n_t + 0.5) + 1.0).ln(),
            IdfFormula::Smoothed => ((1.0 + n) / (1.0 + n_t)).ln(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermStats {
    pub document_frequency: u32,
    pub bm25_idf: f64,
    pub smoothed_idf: f64,
}

impl TermStats {
    fn new(num_docs: usize, document_frequency: u32) -> Self {
        Self {
            document_frequency,
            bm25_idf: IdfFormula::Bm25.compute(num_docs, document_frequency),
            smoothed_idf: IdfFormula::Smoothed.compute(num_docs, document_frequency),
        }
    }

    pub fn idf(&self, formula: IdfFormula) -> f64 {
        match formula {
            IdfFormula::Bm25 => self.bm25_idf,
            IdfFormula::Smoothed => self.smoothed_idf,
        }
    }
}

/// Immutable snapshot of a corpus: per-document bags of words and lengths,
/// the average length, and per-term statistics for every vocabulary term.
///
/// Any change to the corpus means building a new index.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    documents: Vec<String>,
    vocabulary: Vocabulary,
    bows: Vec<BagOfWords>, // aligned with documents
    lengths: Vec<u32>,
    avg_length: f64,
    terms: HashMap<String, TermStats>,
    params: Bm25Params,
}

impl CorpusIndex {
    /// Build an index over `corpus` with a vocabulary derived from it.
    pub fn new<I, S>(corpus: I, params: Bm25Params) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = IndexConfig {
            params,
            ..IndexConfig::default()
        };
        Self::build(corpus.into_iter().map(Into::into).collect(), &config)
    }

    pub fn build(corpus: Vec<String>, config: &IndexConfig) -> Result<Self> {
        Self::build_cancellable(corpus, None, config, &CancelToken::new())
    }

    /// Build against an externally supplied vocabulary. Document lengths count
    /// only in-vocabulary tokens, so a document may end up with length 0.
    pub fn build_with_vocabulary(
        corpus: Vec<String>,
        vocabulary: Vocabulary,
        config: &IndexConfig,
    ) -> Result<Self> {
        Self::build_cancellable(corpus, Some(vocabulary), config, &CancelToken::new())
    }

    /// Full construction path. `cancel` is checked before each document is encoded.
    pub fn build_cancellable(
        documents: Vec<String>,
        vocabulary: Option<Vocabulary>,
        config: &IndexConfig,
        cancel: &CancelToken,
    ) -> Result<Self> {
        config.params.validate()?;
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        if documents.len() > DocId::MAX as usize {
            return Err(Error::CorpusTooLarge(documents.len()));
        }
        let num_docs = documents.len();

        let counted = if config.parallel {
            documents
                .par_iter()
                .map(|doc| {
                    cancel.check()?;
                    Ok::<_, Error>(count_tokens(doc))
                })
                .collect::<Result<Vec<_>>>()
        } else {
            documents
                .iter()
                .map(|doc| {
                    cancel.check()?;
                    Ok::<_, Error>(count_tokens(doc))
                })
                .collect::<Result<Vec<_>>>()
        };
        let counts = counted.inspect_err(|_| tracing::warn!(num_docs, "index build cancelled"))?;
        tracing::debug!(num_docs, parallel = config.parallel, "tokenized corpus");

        let vocabulary = vocabulary.unwrap_or_else(|| Vocabulary::from_counts(&counts));
        let bows: Vec<BagOfWords> = counts
            .into_iter()
            .map(|c| BagOfWords::from_counts(c, &vocabulary))
            .collect();
        let lengths: Vec<u32> = bows.iter().map(BagOfWords::total).collect();
        let total_length: u64 = lengths.iter().map(|&l| u64::from(l)).sum();
        let avg_length = total_length as f64 / num_docs as f64;

        let mut df: HashMap<&str, u32> = HashMap::with_capacity(vocabulary.len());
        for bow in &bows {
            for (term, _) in bow.iter() {
                *df.entry(term).or_insert(0) += 1;
            }
        }
        let terms: HashMap<String, TermStats> = vocabulary
            .iter()
            .map(|term| {
                let n_t = df.get(term).copied().unwrap_or(0);
                (term.to_owned(), TermStats::new(num_docs, n_t))
            })
            .collect();

        tracing::info!(num_docs, num_terms = terms.len(), avg_length, "corpus index built");
        Ok(Self {
            documents,
            vocabulary,
            bows,
            lengths,
            avg_length,
            terms,
            params: config.params,
        })
    }

    pub fn num_docs(&self) -> usize {
        self.documents.len()
    }

    pub fn document(&self, doc_id: DocId) -> Option<&str> {
        self.documents.get(doc_id as usize).map(String::as_str)
    }

    pub fn bow(&self, doc_id: DocId) -> Option<&BagOfWords> {
        self.bows.get(doc_id as usize)
    }

    pub fn bows(&self) -> &[BagOfWords] {
        &self.bows
    }

    /// In-vocabulary token count of a document.
    pub fn document_length(&self, doc_id: DocId) -> Option<u32> {
        self.lengths.get(doc_id as usize).copied()
    }

    pub fn avg_length(&self) -> f64 {
        self.avg_length
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn params(&self) -> Bm25Params {
        self.params
    }

    pub fn term_stats(&self, term: &str) -> Option<&TermStats> {
        self.terms.get(term)
    }

    /// Number of documents containing `term`; 0 for unknown terms.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.terms.get(term).map_or(0, |s| s.document_frequency)
    }

    /// `None` when `term` is outside the vocabulary.
    pub fn idf(&self, term: &str, formula: IdfFormula) -> Option<f64> {
        self.terms.get(term).map(|s| s.idf(formula))
    }

    /// Encode query text with this index's vocabulary.
    pub fn encode_query(&self, query: &str) -> BagOfWords {
        BagOfWords::encode(query, &self.vocabulary)
    }
}
