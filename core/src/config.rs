//! Tunable parameters for index construction and querying.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// BM25 length normalization strength.
pub const DEFAULT_B: f64 = 0.75;
/// BM25 term-frequency saturation.
pub const DEFAULT_K: f64 = 1.2;
pub const DEFAULT_TOP_K: usize = 10;

/// BM25 parameters. Only the BM25 strategy reads them, but they are fixed
/// per index so every query against a snapshot scores the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    pub b: f64,
    pub k: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            b: DEFAULT_B,
            k: DEFAULT_K,
        }
    }
}

impl Bm25Params {
    pub fn new(b: f64, k: f64) -> Result<Self> {
        let params = Self { b, k };
        params.validate()?;
        Ok(params)
    }

    /// Requires `0 <= b <= 1` and a finite `k >= 0`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.b) {
            return Err(Error::InvalidParameter {
                name: "b",
                value: self.b,
            });
        }
        if !self.k.is_finite() || self.k < 0.0 {
            return Err(Error::InvalidParameter {
                name: "k",
                value: self.k,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub params: Bm25Params,
    /// Encode documents on the rayon pool.
    pub parallel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub top_k: usize,
    /// Score documents on the rayon pool with per-worker top-k heaps.
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            parallel: false,
        }
    }
}

impl SearchOptions {
    pub fn with_top_k(top_k: usize) -> Self {
        Self {
            top_k,
            ..Self::default()
        }
    }
}
