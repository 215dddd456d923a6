//! Lexical retrieval over an in-memory corpus.
//!
//! A [`CorpusIndex`] is built once from an ordered list of documents and is
//! read-only afterwards. Queries are scored against every document with one
//! of the [`Strategy`] variants (BM25, TF-IDF, cosine similarity) and the best
//! `k` are kept with a bounded min-heap.

pub mod bow;
pub mod cancel;
pub mod config;
pub mod error;
pub mod index;
pub mod scoring;
pub mod search;
pub mod tokenizer;
pub mod topk;
pub mod vocabulary;

pub use bow::BagOfWords;
pub use cancel::CancelToken;
pub use config::{Bm25Params, IndexConfig, SearchOptions, DEFAULT_B, DEFAULT_K, DEFAULT_TOP_K};
pub use error::{Error, ErrorKind, Result};
pub use index::{CorpusIndex, DocId, IdfFormula, TermStats};
pub use scoring::{Scorer, Strategy};
pub use search::search;
pub use tokenizer::tokenize;
pub use topk::{ScoreEntry, TopK};
pub use vocabulary::Vocabulary;
