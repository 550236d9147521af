//! Composite character-set similarity.
//!
//! The composite score blends two Jaccard indices: one over positional
//! characters and one over plain characters. Each comparison is O(m) in the
//! smaller set.

use std::collections::HashSet;
use std::hash::Hash;

use crate::set::PhraseSet;

/// `|a ∩ b| / |a ∪ b|`.
///
/// Both sets must not be empty at the same time; [`PhraseSet`] guarantees
/// this for every set it hands out.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|item| large.contains(item)).count();
    let union = a.len() + b.len() - intersection;
    debug_assert!(union > 0, "jaccard over two empty sets");
    intersection as f64 / union as f64
}

/// Weighted blend of positional and plain character Jaccard indices.
///
/// `weighting` is the share attributed to positional agreement and should
/// lie in `0.0..=1.0`; callers validate it when the configuration is built.
/// Out-of-range weightings are not rejected here, but the result is always
/// clamped to `0.0..=1.0`. The score is symmetric in `a` and `b`.
pub fn composite_score(a: &PhraseSet, b: &PhraseSet, weighting: f64) -> f64 {
    let positional = jaccard(a.positions(), b.positions());
    let plain = jaccard(a.chars(), b.chars());
    // Equals `w * positional + (1 - w) * plain` up to rounding;
    // the interpolated form keeps self-similarity at exactly 1.0.
    (plain + weighting * (positional - plain)).clamp(0.0, 1.0)
}
