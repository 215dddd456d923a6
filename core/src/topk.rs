//! Bounded top-k selection over a stream of scored documents.
//!
//! Entries are ranked by score descending, then by document id ascending, so
//! among equal scores the lowest id wins and the highest id is evicted first.
//! The order is total, which makes results independent of stream order and of
//! how the stream was partitioned across workers.

use crate::index::DocId;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: f64,
    pub doc_id: DocId,
}

impl ScoreEntry {
    pub fn new(score: f64, doc_id: DocId) -> Self {
        Self { score, doc_id }
    }

    /// `Ordering::Greater` when `self` ranks ahead of `other`.
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }

    fn rank(&self) -> Rank {
        Rank(OrderedFloat(self.score), Reverse(self.doc_id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Rank(OrderedFloat<f64>, Reverse<DocId>);

impl From<Rank> for ScoreEntry {
    fn from(Rank(score, Reverse(doc_id)): Rank) -> Self {
        Self {
            score: score.0,
            doc_id,
        }
    }
}

/// Keeps the `k` best entries seen so far in a min-heap of size at most `k`.
#[derive(Debug, Clone)]
pub struct TopK {
    k: usize,
    heap: BinaryHeap<Reverse<Rank>>,
}

impl TopK {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Lowest-ranked entry currently retained.
    pub fn min(&self) -> Option<ScoreEntry> {
        self.heap.peek().map(|Reverse(rank)| ScoreEntry::from(*rank))
    }

    pub fn push(&mut self, entry: ScoreEntry) {
        if self.k == 0 {
            return;
        }
        let rank = entry.rank();
        if self.heap.len() < self.k {
            self.heap.push(Reverse(rank));
            return;
        }
        if let Some(mut min) = self.heap.peek_mut() {
            if rank > min.0 {
                *min = Reverse(rank);
            }
        }
    }

    /// Fold another partition's survivors into this one.
    pub fn merge(&mut self, other: TopK) {
        for Reverse(rank) in other.heap {
            self.push(rank.into());
        }
    }

    /// Retained entries, best first.
    pub fn into_sorted_vec(self) -> Vec<ScoreEntry> {
        // Ascending over Reverse is descending over rank.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(rank)| rank.into())
            .collect()
    }
}

/// Select the `k` best entries from `entries`, best first.
pub fn select<I>(entries: I, k: usize) -> Vec<ScoreEntry>
where
    I: IntoIterator<Item = ScoreEntry>,
{
    let mut topk = TopK::new(k);
    for entry in entries {
        topk.push(entry);
    }
    topk.into_sorted_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(scores: &[f64]) -> Vec<ScoreEntry> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| ScoreEntry::new(s, i as DocId))
            .collect()
    }

    #[test]
    fn keeps_the_k_highest_in_descending_order() {
        let out = select(entries(&[0.1, 0.9, 0.5, 0.7, 0.3]), 3);
        let ids: Vec<DocId> = out.iter().map(|e| e.doc_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert_eq!(out[0].score, 0.9);
    }

    #[test]
    fn shorter_stream_than_k() {
        let out = select(entries(&[0.2, 0.4]), 10);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].doc_id, 1);
    }

    #[test]
    fn zero_k_keeps_nothing() {
        assert!(select(entries(&[1.0, 2.0]), 0).is_empty());
    }

    #[test]
    fn ties_prefer_lower_doc_id() {
        let out = select(entries(&[0.0, 0.0, 0.0, 0.0]), 2);
        let ids: Vec<DocId> = out.iter().map(|e| e.doc_id).collect();
        assert_eq!(ids, vec![0, 1]);

        // Same result when the stream arrives reversed.
        let mut reversed = entries(&[0.0, 0.0, 0.0, 0.0]);
        reversed.reverse();
        let ids: Vec<DocId> = select(reversed, 2).iter().map(|e| e.doc_id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn merge_equals_single_pass() {
        let all = entries(&[0.3, 0.8, 0.8, 0.1, 0.6, 0.9, 0.2, 0.6]);
        let mut left = TopK::new(4);
        let mut right = TopK::new(4);
        for (i, e) in all.iter().enumerate() {
            if i % 2 == 0 {
                left.push(*e)
            } else {
                right.push(*e)
            }
        }
        left.merge(right);
        assert_eq!(left.into_sorted_vec(), select(all, 4));
    }

    #[test]
    fn min_tracks_eviction_threshold() {
        let mut topk = TopK::new(2);
        assert_eq!(topk.min(), None);
        topk.push(ScoreEntry::new(0.5, 0));
        topk.push(ScoreEntry::new(0.7, 1));
        topk.push(ScoreEntry::new(0.6, 2));
        assert_eq!(topk.len(), 2);
        assert_eq!(topk.min(), Some(ScoreEntry::new(0.6, 2)));
    }

    #[test]
    fn cmp_rank_orders_by_score_then_id() {
        let a = ScoreEntry::new(1.0, 5);
        let b = ScoreEntry::new(1.0, 6);
        let c = ScoreEntry::new(2.0, 9);
        assert_eq!(a.cmp_rank(&b), Ordering::Greater);
        assert_eq!(c.cmp_rank(&a), Ordering::Greater);
    }
}
