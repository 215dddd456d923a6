use crate::bow::BagOfWords;
use crate::cancel::CancelToken;
use crate::config::SearchOptions;
use crate::error::{Error, Result};
use crate::index::{CorpusIndex, DocId};
use crate::scoring::{Scorer, Strategy};
use crate::topk::{ScoreEntry, TopK};
use rayon::prelude::*;

/// Score every document in `index` against `query` and return the `top_k`
/// best, highest score first. Ties are broken by ascending document id.
pub fn search(
    index: &CorpusIndex,
    strategy: Strategy,
    query: &str,
    top_k: usize,
) -> Result<Vec<ScoreEntry>> {
    index.search(strategy, query, top_k)
}

impl CorpusIndex {
    pub fn search(&self, strategy: Strategy, query: &str, top_k: usize) -> Result<Vec<ScoreEntry>> {
        let options = SearchOptions::with_top_k(top_k);
        self.search_with(strategy, query, &options, &CancelToken::new())
    }

    /// Search with explicit options. `cancel` is checked before each document is scored.
    pub fn search_with(
        &self,
        strategy: Strategy,
        query: &str,
        options: &SearchOptions,
        cancel: &CancelToken,
    ) -> Result<Vec<ScoreEntry>> {
        if options.top_k == 0 {
            return Err(Error::InvalidTopK);
        }
        let query_bow = self.encode_query(query);
        tracing::debug!(
            %strategy,
            query_terms = query_bow.len(),
            parallel = options.parallel,
            "scoring corpus"
        );

        let scorer = strategy.scorer();
        let outcome = if options.parallel {
            (0..self.num_docs())
                .into_par_iter()
                .try_fold(
                    || TopK::new(options.top_k),
                    |mut acc, i| {
                        cancel.check()?;
                        acc.push(self.score_doc(scorer, strategy, &query_bow, i as DocId)?);
                        Ok::<_, Error>(acc)
                    },
                )
                .try_reduce(
                    || TopK::new(options.top_k),
                    |mut a, b| {
                        a.merge(b);
                        Ok(a)
                    },
                )
        } else {
            let mut acc = TopK::new(options.top_k);
            let scored = (0..self.num_docs()).try_for_each(|i| {
                cancel.check()?;
                acc.push(self.score_doc(scorer, strategy, &query_bow, i as DocId)?);
                Ok::<_, Error>(())
            });
            scored.map(|()| acc)
        };
        let topk =
            outcome.inspect_err(|e| tracing::warn!(%strategy, error = %e, "search aborted"))?;

        let results = topk.into_sorted_vec();
        tracing::debug!(%strategy, hits = results.len(), "search complete");
        Ok(results)
    }

    /// Score a single document. `None` when `doc_id` is out of range.
    pub fn score(&self, strategy: Strategy, query: &str, doc_id: DocId) -> Option<f64> {
        let bow = self.bow(doc_id)?;
        let length = self.document_length(doc_id)?;
        Some(strategy.scorer().score(&self.encode_query(query), bow, length, self))
    }

    fn score_doc(
        &self,
        scorer: &dyn Scorer,
        strategy: Strategy,
        query: &BagOfWords,
        doc_id: DocId,
    ) -> Result<ScoreEntry> {
        let document = &self.bows()[doc_id as usize];
        let length = self.document_length(doc_id).unwrap_or(0);
        let score = scorer.score(query, document, length, self);
        if !score.is_finite() {
            return Err(Error::Computation(format!(
                "{strategy} produced {score} for document {doc_id}"
            )));
        }
        Ok(ScoreEntry::new(score, doc_id))
    }
}
