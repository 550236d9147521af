//! The finalized, read-only phrase index and its single-query ranking.
//!
//! Lookup is a linear scan: every entry is scored against the query, so a
//! query costs O(N·m) for N distinct phrases of average length m.

use std::collections::HashMap;

use phrase::{build_phrase_set, composite_score, normalize_phrase, PhraseError, PhraseSet};
use roaring::RoaringBitmap;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::indexer::IndexBuilder;
use crate::types::ScoredResult;

/// One distinct phrase with its similarity sets and occurrence lines.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    phrase: String,
    set: PhraseSet,
    lines: RoaringBitmap,
}

impl IndexEntry {
    pub(crate) fn new(phrase: String, set: PhraseSet, lines: RoaringBitmap) -> Self {
        Self { phrase, set, lines }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn set(&self) -> &PhraseSet {
        &self.set
    }

    pub fn lines(&self) -> &RoaringBitmap {
        &self.lines
    }

    /// Occurrence lines in ascending order.
    pub fn line_numbers(&self) -> Vec<u32> {
        self.lines.iter().collect()
    }
}

/// A scored reference into the index, cheaper to shuffle than a
/// [`ScoredResult`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate {
    pub(crate) entry: usize,
    pub(crate) score: f64,
}

/// Stable descending sort on score. Equal scores keep their input order.
pub(crate) fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Immutable collection of indexed phrases in first-occurrence order.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
    positions: HashMap<String, usize>,
    config: SearchConfig,
}

impl SearchIndex {
    pub(crate) fn new(entries: Vec<IndexEntry>, config: SearchConfig) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.phrase.clone(), idx))
            .collect();
        Self {
            entries,
            positions,
            config,
        }
    }

    /// Index `lines` in one go.
    pub fn from_lines<I>(lines: I, config: SearchConfig) -> Result<Self, SearchError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut builder = IndexBuilder::new(config)?;
        builder.extend(lines)?;
        builder.finish()
    }

    /// Configuration the index was built with; lookups use it too.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in corpus order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Exact lookup of a phrase, after the index's case normalization.
    pub fn get(&self, phrase: &str) -> Option<&IndexEntry> {
        let key = normalize_phrase(phrase, self.config.downcase);
        self.positions
            .get(key.as_ref())
            .map(|&idx| &self.entries[idx])
    }

    /// Score `query` against every entry and return all of them, best first.
    ///
    /// Nothing is filtered or truncated. Entries with equal scores keep
    /// their corpus order.
    pub fn basic_lookup(&self, query: &str) -> Result<Vec<ScoredResult>, SearchError> {
        let ranked = self.rank(query)?;
        Ok(ranked.iter().map(|c| self.materialize(c)).collect())
    }

    pub(crate) fn rank(&self, query: &str) -> Result<Vec<Candidate>, PhraseError> {
        let query_set = build_phrase_set(query, self.config.downcase)?;
        let weighting = self.config.weighting;

        let mut candidates: Vec<Candidate> = Vec::with_capacity(self.entries.len());
        candidates.extend(self.entries.iter().enumerate().map(|(entry, indexed)| {
            Candidate {
                entry,
                score: composite_score(&indexed.set, &query_set, weighting),
            }
        }));
        sort_candidates(&mut candidates);
        Ok(candidates)
    }

    pub(crate) fn materialize(&self, candidate: &Candidate) -> ScoredResult {
        let entry = &self.entries[candidate.entry];
        ScoredResult {
            phrase: entry.phrase.clone(),
            score: candidate.score,
            lines: entry.line_numbers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(lines: &[&str]) -> SearchIndex {
        SearchIndex::from_lines(lines.iter().copied(), SearchConfig::default()).unwrap()
    }

    #[test]
    fn exact_phrase_scores_one() {
        let idx = index(&["the quick brown fox"]);
        let results = idx.basic_lookup("quick").unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].phrase, "quick");
        assert_eq!(results[0].score, 1.0);
        assert_eq!(results[0].lines, vec![1]);
    }

    #[test]
    fn results_sorted_descending() {
        let idx = index(&["cat", "bat", "dog"]);
        let results = idx.basic_lookup("cat").unwrap();
        let phrases: Vec<&str> = results.iter().map(|r| r.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["cat", "bat", "dog"]);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(results[1].score > 0.0 && results[1].score < 1.0);
    }

    #[test]
    fn equal_scores_keep_corpus_order() {
        let idx = index(&["red green", "blue"]);
        let results = idx.basic_lookup("xyz").unwrap();
        let phrases: Vec<&str> = results.iter().map(|r| r.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["red", "green", "blue"]);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn query_is_case_folded() {
        let idx = index(&["Quick"]);
        let results = idx.basic_lookup("QUICK").unwrap();
        assert_eq!(results[0].phrase, "quick");
        assert_eq!(results[0].score, 1.0);
    }

    #[test]
    fn empty_index_returns_no_results() {
        let idx = index(&[]);
        assert!(idx.basic_lookup("anything").unwrap().is_empty());
    }

    #[test]
    fn empty_query_fails_fast() {
        let idx = index(&["fox"]);
        assert_eq!(
            idx.basic_lookup(""),
            Err(SearchError::Phrase(PhraseError::EmptyPhrase))
        );
    }

    #[test]
    fn get_normalizes_phrase() {
        let idx = index(&["Brown fox", "brown bear"]);
        let entry = idx.get("BROWN").unwrap();
        assert_eq!(entry.phrase(), "brown");
        assert_eq!(entry.line_numbers(), vec![1, 2]);
        assert!(idx.get("wolf").is_none());
    }

    #[test]
    fn entries_follow_first_occurrence() {
        let idx = index(&["b a", "c b"]);
        let phrases: Vec<&str> = idx.entries().iter().map(IndexEntry::phrase).collect();
        assert_eq!(phrases, vec!["b", "a", "c"]);
    }

    #[test]
    fn lookup_does_not_mutate_index() {
        let idx = index(&["alpha beta"]);
        let before = idx.entries().to_vec();
        let _ = idx.basic_lookup("alpha").unwrap();
        assert_eq!(idx.entries(), before.as_slice());
    }
}
