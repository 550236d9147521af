//! # Fuzzline Search (`search`)
//!
//! ## Purpose
//!
//! `search` turns a sequence of text lines into an in-memory phrase index and
//! answers fuzzy queries against it. Every distinct word (or n-gram of up to
//! [`SearchConfig::n_gram_upto`] words) becomes an [`IndexEntry`] carrying its
//! [`phrase::PhraseSet`] and the 1-based lines it occurred on.
//!
//! ## Stages
//!
//! 1.  **Indexing** ([`IndexBuilder`]): strip punctuation, split on spaces and
//!     square brackets, slide an n-gram window over the tokens, and record
//!     each phrase's occurrence lines. [`IndexBuilder::finish`] freezes the
//!     result into a [`SearchIndex`].
//! 2.  **Ranking** ([`SearchIndex::basic_lookup`]): a linear scan scoring the
//!     query against every entry with [`phrase::composite_score`], sorted best
//!     first. Ties keep corpus order.
//! 3.  **Lookup** ([`SearchIndex::lookup`]): rank the whole query and each of
//!     its space-separated words, keep the top `limit` of each, merge by
//!     phrase keeping the best score, re-sort, and drop results below
//!     `threshold`.
//!
//! The index is read-only after [`IndexBuilder::finish`]; lookups never
//! mutate it and may share it freely.
//!
//! ## Example Usage
//!
//! ```
//! use search::{SearchConfig, SearchIndex};
//!
//! let index = SearchIndex::from_lines(
//!     ["The quick brown fox", "jumps over the lazy dog"],
//!     SearchConfig::default(),
//! )
//! .unwrap();
//!
//! let results = index.lookup("quick").unwrap();
//! assert_eq!(results[0].phrase, "quick");
//! assert_eq!(results[0].score, 1.0);
//! assert_eq!(results[0].lines, vec![1]);
//! ```
//!
mod config;
mod error;
mod index;
mod indexer;
mod lookup;
mod tokenize;
mod types;

pub use crate::config::{ConfigError, SearchConfig};
pub use crate::error::SearchError;
pub use crate::index::{IndexEntry, SearchIndex};
pub use crate::indexer::{build_index, IndexBuilder};
pub use crate::lookup::split_query;
pub use crate::tokenize::{
    split_tokens, strip_punctuation, STRIPPED_PUNCTUATION, TOKEN_DELIMITERS,
};
pub use crate::types::ScoredResult;

pub use phrase::{PhraseError, PhraseSet};
