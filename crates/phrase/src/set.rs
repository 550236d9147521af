//! Phrase set construction.
//!
//! Builds the character set and the positional character set for a single
//! phrase. Construction is O(m) in the number of characters.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PhraseError;

/// The two similarity sets derived from a phrase.
///
/// Invariant: both sets are non-empty and neither is larger than the number
/// of characters in the (normalized) phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseSet {
    chars: HashSet<char>,
    positions: HashSet<(char, usize)>,
}

impl PhraseSet {
    /// Distinct characters appearing anywhere in the phrase.
    pub fn chars(&self) -> &HashSet<char> {
        &self.chars
    }

    /// `(character, zero-based offset)` pairs, one per character occurrence.
    pub fn positions(&self) -> &HashSet<(char, usize)> {
        &self.positions
    }

    /// Number of characters in the phrase the set was built from.
    pub fn phrase_len(&self) -> usize {
        // Offsets are unique per occurrence.
        self.positions.len()
    }
}

/// Lower-case `phrase` when `downcase` is set, borrowing otherwise.
///
/// Index build and query time must go through the same normalization, or
/// similarity is silently degraded.
pub fn normalize_phrase(phrase: &str, downcase: bool) -> Cow<'_, str> {
    if downcase {
        Cow::Owned(phrase.to_lowercase())
    } else {
        Cow::Borrowed(phrase)
    }
}

/// Build the [`PhraseSet`] for `phrase`.
pub fn build_phrase_set(phrase: &str, downcase: bool) -> Result<PhraseSet, PhraseError> {
    let normalized = normalize_phrase(phrase, downcase);
    if normalized.is_empty() {
        return Err(PhraseError::EmptyPhrase);
    }

    let char_count = normalized.chars().count();
    let mut chars = HashSet::with_capacity(char_count);
    let mut positions = HashSet::with_capacity(char_count);
    for (idx, ch) in normalized.chars().enumerate() {
        chars.insert(ch);
        positions.insert((ch, idx));
    }

    Ok(PhraseSet { chars, positions })
}
