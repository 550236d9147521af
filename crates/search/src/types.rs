use serde::{Deserialize, Serialize};

/// A ranked lookup hit.
///
/// Produced per query and never stored in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// The normalized indexed phrase.
    pub phrase: String,
    /// Composite similarity to the (sub-)query, in `0.0..=1.0`.
    pub score: f64,
    /// 1-based source lines the phrase occurs on, ascending.
    pub lines: Vec<u32>,
}
