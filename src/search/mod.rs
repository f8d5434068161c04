//! Product search core
//!
//! Normalized string matching plus tokenized multi-term ranking over the
//! catalog. Pure and synchronous; all I/O lives in the collaborators.

pub mod matcher;
pub mod ranker;

pub use matcher::{levenshtein, normalize};
pub use ranker::{rank, score, tokenize};
