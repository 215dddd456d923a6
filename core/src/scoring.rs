//! Relevance scoring strategies.
//!
//! Every strategy is a pure function of the query bag of words, one
//! document's bag of words and length, and read-only index statistics. Query
//! terms absent from the document contribute nothing; a query term's own count
//! multiplies its contribution.

use crate::bow::BagOfWords;
use crate::error::Error;
use crate::index::{CorpusIndex, IdfFormula};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub trait Scorer: Send + Sync {
    /// Score `document`, whose in-vocabulary length is `length`, against `query`.
    fn score(
        &self,
        query: &BagOfWords,
        document: &BagOfWords,
        length: u32,
        index: &CorpusIndex,
    ) -> f64;
}

/// Okapi BM25 using the index's `b`/`k` parameters and BM25 idf.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bm25Scorer;

impl Scorer for Bm25Scorer {
    fn score(
        &self,
        query: &BagOfWords,
        document: &BagOfWords,
        length: u32,
        index: &CorpusIndex,
    ) -> f64 {
        let avg_length = index.avg_length();
        if length == 0 || avg_length <= 0.0 {
            return 0.0;
        }
        let params = index.params();
        let norm = params.k * (1.0 - params.b + params.b * (f64::from(length) / avg_length));
        query
            .iter()
            .filter_map(|(term, query_count)| {
                let f_td = document.count(term);
                if f_td == 0 {
                    return None;
                }
                let idf = index.idf(term, IdfFormula::Bm25)?;
                let f_td = f64::from(f_td);
                Some(f64::from(query_count) * idf * (f_td * (params.k + 1.0)) / (f_td + norm))
            })
            // Start from +0.0; an empty f64 sum is -0.0.
            .fold(0.0, |acc, x| acc + x)
    }
}

/// Length-normalized term frequency times smoothed idf.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScorer;

/// `count / length`, defined as 0 for a zero-length document.
pub fn term_frequency(count: u32, length: u32) -> f64 {
    if length == 0 {
        0.0
    } else {
        f64::from(count) / f64::from(length)
    }
}

impl Scorer for TfIdfScorer {
    fn score(
        &self,
        query: &BagOfWords,
        document: &BagOfWords,
        length: u32,
        index: &CorpusIndex,
    ) -> f64 {
        query
            .iter()
            .filter_map(|(term, query_count)| {
                let tf = term_frequency(document.count(term), length);
                if tf == 0.0 {
                    return None;
                }
                let idf = index.idf(term, IdfFormula::Smoothed)?;
                Some(tf * idf * f64::from(query_count))
            })
            .fold(0.0, |acc, x| acc + x)
    }
}

/// Cosine of the angle between raw count vectors; no idf weighting.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineScorer;

impl Scorer for CosineScorer {
    fn score(
        &self,
        query: &BagOfWords,
        document: &BagOfWords,
        _length: u32,
        _index: &CorpusIndex,
    ) -> f64 {
        let query_sq = query.sum_of_squares();
        let document_sq = document.sum_of_squares();
        if query_sq == 0 || document_sq == 0 {
            return 0.0;
        }
        let dot: u64 = query
            .iter()
            .map(|(term, count)| u64::from(count) * u64::from(document.count(term)))
            .sum();
        // sqrt(|q|^2 * |d|^2) keeps a text scored against itself at exactly 1.0.
        let denominator = ((u128::from(query_sq) * u128::from(document_sq)) as f64).sqrt();
        dot as f64 / denominator
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Bm25,
    TfIdf,
    Cosine,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Bm25, Strategy::TfIdf, Strategy::Cosine];

    pub fn scorer(self) -> &'static dyn Scorer {
        match self {
            Strategy::Bm25 => &Bm25Scorer,
            Strategy::TfIdf => &TfIdfScorer,
            Strategy::Cosine => &CosineScorer,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Bm25 => "bm25",
            Strategy::TfIdf => "tfidf",
            Strategy::Cosine => "cosine",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bm25" => Ok(Strategy::Bm25),
            "tfidf" | "tf-idf" => Ok(Strategy::TfIdf),
            "cosine" => Ok(Strategy::Cosine),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}
