//! # Fuzzline Phrase Similarity
//!
//! This crate turns short phrases into the two character sets used by the
//! fuzzline search engine and scores pairs of them with a composite
//! Jaccard-style metric.
//!
//! ## Contract
//!
//! - The API is a pure function of `(phrase, downcase)` for set construction
//!   and `(set_a, set_b, weighting)` for scoring. No I/O, no clocks, no global
//!   state.
//! - A "character" is a Unicode scalar value. Positions count scalar values,
//!   not bytes, so `"é"` occupies exactly one position whether the input was
//!   ASCII or not.
//! - Empty phrases are rejected at construction time with
//!   [`PhraseError::EmptyPhrase`], which means every [`PhraseSet`] that reaches
//!   the scorer has non-empty sets and the Jaccard unions can never be empty.
//!
//! ## Composite score
//!
//! Each phrase yields:
//!
//! 1.  **Character set**: the distinct characters appearing anywhere in the
//!     phrase.
//! 2.  **Positional set**: one `(character, index)` pair per character
//!     occurrence, `index` being the zero-based offset in the phrase.
//!
//! Two phrases are compared with
//!
//! ```text
//! score = w * jaccard(positional_a, positional_b)
//!       + (1 - w) * jaccard(chars_a, chars_b)
//! ```
//!
//! so `w = 1.0` only rewards letters lining up at the same offset and
//! `w = 0.0` treats anagrams as identical.
//!
//! ## Example Usage
//!
//! ```
//! use phrase::{build_phrase_set, composite_score, DEFAULT_WEIGHTING};
//!
//! let cat = build_phrase_set("Cat", true).unwrap();
//! let act = build_phrase_set("act", true).unwrap();
//!
//! assert_eq!(composite_score(&cat, &cat, DEFAULT_WEIGHTING), 1.0);
//! assert_eq!(composite_score(&cat, &act, 0.0), 1.0);
//! assert!(composite_score(&cat, &act, DEFAULT_WEIGHTING) < 1.0);
//! ```
//!
mod error;
mod set;
mod similarity;

pub use crate::error::PhraseError;
pub use crate::set::{build_phrase_set, normalize_phrase, PhraseSet};
pub use crate::similarity::{composite_score, jaccard};

/// Default fraction of the score attributed to positional agreement.
pub const DEFAULT_WEIGHTING: f64 = 0.7;
