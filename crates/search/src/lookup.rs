//! Multi-term lookup: whole-query and per-word ranking, merged.
//!
//! A query is ranked once as a whole and once per space-separated word. The
//! top `limit` candidates of every sub-query are pooled, deduplicated by
//! phrase (best score wins, first seen wins on ties), re-sorted, and filtered
//! by threshold. `limit` only bounds each sub-query's contribution, so the
//! merged result can be longer than `limit`.

use std::collections::HashMap;
use std::time::Instant;

use phrase::PhraseError;
use tracing::{debug, warn, Level};

use crate::config::ConfigError;
use crate::error::SearchError;
use crate::index::{sort_candidates, Candidate, SearchIndex};
use crate::types::ScoredResult;

/// Split a query into its per-word sub-queries.
///
/// Splits on single spaces without trimming, so a leading, trailing or
/// doubled space yields an empty sub-query. Empty sub-queries score `0.0`
/// against every entry.
pub fn split_query(query: &str) -> Vec<&str> {
    query.split(' ').collect()
}

impl SearchIndex {
    /// Run a full lookup with the index's configured `limit` and `threshold`.
    pub fn lookup(&self, query: &str) -> Result<Vec<ScoredResult>, SearchError> {
        let cfg = self.config();
        self.lookup_with(query, cfg.limit, cfg.threshold)
    }

    /// Run a full lookup with explicit candidate cap and score threshold.
    ///
    /// An empty `query` fails without partial results.
    pub fn lookup_with(
        &self,
        query: &str,
        limit: usize,
        threshold: f64,
    ) -> Result<Vec<ScoredResult>, SearchError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "search.lookup", limit, threshold);
        let _guard = span.enter();

        match self.lookup_inner(query, limit, threshold) {
            Ok((results, sub_queries, candidates)) => {
                debug!(
                    query,
                    sub_queries,
                    candidates,
                    results = results.len(),
                    elapsed_micros = start.elapsed().as_micros(),
                    "lookup_complete"
                );
                Ok(results)
            }
            Err(err) => {
                warn!(error = %err, query, "lookup_failure");
                Err(err)
            }
        }
    }

    fn lookup_inner(
        &self,
        query: &str,
        limit: usize,
        threshold: f64,
    ) -> Result<(Vec<ScoredResult>, usize, usize), SearchError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold { threshold }.into());
        }

        if query.is_empty() {
            return Err(PhraseError::EmptyPhrase.into());
        }
        let words = split_query(query);

        // Whole query first, then each word, so earlier sub-queries win ties.
        let per_query = limit.min(self.len());
        let mut pool: Vec<Candidate> =
            Vec::with_capacity(per_query.saturating_mul(words.len() + 1));
        for sub_query in std::iter::once(query).chain(words.iter().copied()) {
            if sub_query.is_empty() {
                // Shares no character with any entry: zero across the board,
                // corpus order.
                pool.extend(
                    (0..self.len())
                        .map(|entry| Candidate { entry, score: 0.0 })
                        .take(limit),
                );
                continue;
            }
            let ranked = self.rank(sub_query)?;
            pool.extend(ranked.into_iter().take(limit));
        }
        let candidates = pool.len();

        let mut merged = dedup_best(pool);
        sort_candidates(&mut merged);

        let results = merged
            .iter()
            .filter(|c| c.score >= threshold)
            .map(|c| self.materialize(c))
            .collect();
        Ok((results, words.len() + 1, candidates))
    }
}

/// Keep the best-scoring candidate per entry.
///
/// A strictly better later candidate replaces the earlier one in place; an
/// equal score leaves the first one.
fn dedup_best(pool: Vec<Candidate>) -> Vec<Candidate> {
    let mut slots: HashMap<usize, usize> = HashMap::with_capacity(pool.len());
    let mut merged: Vec<Candidate> = Vec::with_capacity(pool.len());
    for candidate in pool {
        match slots.get(&candidate.entry) {
            Some(&slot) => {
                if merged[slot].score < candidate.score {
                    merged[slot] = candidate;
                }
            }
            None => {
                slots.insert(candidate.entry, merged.len());
                merged.push(candidate);
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;

    fn index_with(lines: &[&str], cfg: SearchConfig) -> SearchIndex {
        SearchIndex::from_lines(lines.iter().copied(), cfg).unwrap()
    }

    fn index(lines: &[&str]) -> SearchIndex {
        index_with(lines, SearchConfig::default())
    }

    fn phrases(results: &[ScoredResult]) -> Vec<&str> {
        results.iter().map(|r| r.phrase.as_str()).collect()
    }

    #[test]
    fn split_query_keeps_empty_tokens() {
        assert_eq!(split_query("a b"), vec!["a", "b"]);
        assert_eq!(split_query(" a"), vec!["", "a"]);
        assert_eq!(split_query("a  b"), vec!["a", "", "b"]);
        assert_eq!(split_query("solo"), vec!["solo"]);
    }

    #[test]
    fn single_word_exact_match() {
        let idx = index(&["the quick brown fox"]);
        let results = idx.lookup("quick").unwrap();
        assert_eq!(
            results,
            vec![ScoredResult {
                phrase: "quick".into(),
                score: 1.0,
                lines: vec![1],
            }]
        );
    }

    #[test]
    fn multi_word_query_matches_each_word() {
        let idx = index(&["the quick brown fox", "jumps over", "the lazy dog"]);
        let results = idx.lookup("lazy fox").unwrap();
        let found = phrases(&results);
        assert!(found.contains(&"lazy"));
        assert!(found.contains(&"fox"));
        assert_eq!(results[0].score, 1.0);
    }

    #[test]
    fn phrase_appears_once_with_best_score() {
        let idx = index(&["fox", "box"]);
        let results = idx.lookup_with("fox box", 8, 0.0).unwrap();
        let found = phrases(&results);
        assert_eq!(found.iter().filter(|p| **p == "fox").count(), 1);
        assert_eq!(found.iter().filter(|p| **p == "box").count(), 1);
        // Each word matches itself exactly in its own sub-query.
        assert!(results.iter().all(|r| r.score == 1.0));
    }

    #[test]
    fn ngram_index_serves_whole_phrase_queries() {
        let cfg = SearchConfig::new().with_n_gram_upto(2);
        let idx = index_with(&["greek navigators sailed", "far away"], cfg);
        let results = idx.lookup("greek navigators").unwrap();
        assert_eq!(results[0].phrase, "greek navigators");
        assert_eq!(results[0].score, 1.0);
        assert_eq!(results[0].lines, vec![1]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let idx = index(&["cat", "bat"]);
        // cat vs bat scores exactly 0.5 at the default weighting.
        let at = idx.lookup_with("cat", 8, 0.5).unwrap();
        assert_eq!(phrases(&at), vec!["cat", "bat"]);

        let above = idx.lookup_with("cat", 8, 0.500_001).unwrap();
        assert_eq!(phrases(&above), vec!["cat"]);
    }

    #[test]
    fn limit_bounds_each_sub_query_not_the_result() {
        let idx = index(&["abcd abce abcf abcg abch"]);
        let results = idx.lookup_with("abcd abce", 1, 0.0).unwrap();
        // Whole query, "abcd" and "abce" each contribute their best hit.
        assert!(results.len() > 1);
        assert_eq!(phrases(&results), vec!["abcd", "abce"]);
    }

    #[test]
    fn limit_zero_returns_nothing() {
        let idx = index(&["fox"]);
        assert!(idx.lookup_with("fox", 0, 0.0).unwrap().is_empty());
    }

    #[test]
    fn default_threshold_filters_weak_hits() {
        let idx = index(&["cat", "dog"]);
        let results = idx.lookup("cat").unwrap();
        assert_eq!(phrases(&results), vec!["cat"]);
    }

    #[test]
    fn results_are_sorted_with_sorted_lines() {
        let idx = index(&["fox", "fix", "fox", "fax"]);
        let results = idx.lookup_with("fox", 8, 0.0).unwrap();
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(results[0].lines, vec![1, 3]);
    }

    #[test]
    fn ties_keep_pool_order() {
        let idx = index(&["fix fax"]);
        // Both score the same against "fox"; corpus order decides.
        let results = idx.lookup_with("fox", 8, 0.0).unwrap();
        assert_eq!(phrases(&results), vec!["fix", "fax"]);
        assert_eq!(results[0].score, results[1].score);
    }

    #[test]
    fn empty_query_fails_whole_lookup() {
        let idx = index(&["fox"]);
        assert_eq!(
            idx.lookup(""),
            Err(SearchError::Phrase(PhraseError::EmptyPhrase))
        );
    }

    #[test]
    fn stray_spaces_do_not_hide_matches() {
        let idx = index(&["fox"]);
        let expected = vec![ScoredResult {
            phrase: "fox".into(),
            score: 1.0,
            lines: vec![1],
        }];
        for query in [" fox", "fox ", "fox  fox"] {
            assert_eq!(idx.lookup(query).unwrap(), expected, "query {query:?}");
        }
    }

    #[test]
    fn empty_sub_query_contributes_zero_scores() {
        let idx = index(&["the quick brown fox"]);
        let results = idx.lookup_with("quick ", 8, 0.0).unwrap();
        assert_eq!(phrases(&results), vec!["quick", "the", "brown", "fox"]);
        assert_eq!(results[0].score, 1.0);
        assert!(results[1..].iter().all(|r| r.score == 0.0));

        // The zeros are filtered out at the default threshold.
        assert_eq!(phrases(&idx.lookup("lazy  fox").unwrap()), vec!["fox"]);
    }

    #[test]
    fn empty_index_lookup_is_empty() {
        let idx = index(&[]);
        assert!(idx.lookup("anything").unwrap().is_empty());
    }

    #[test]
    fn invalid_threshold_rejected() {
        let idx = index(&["fox"]);
        assert!(matches!(
            idx.lookup_with("fox", 8, f64::NAN),
            Err(SearchError::Config(ConfigError::InvalidThreshold { .. }))
        ));
    }

    #[test]
    fn dedup_keeps_first_on_equal_scores() {
        let pool = vec![
            Candidate { entry: 1, score: 0.5 },
            Candidate { entry: 2, score: 0.9 },
            Candidate { entry: 1, score: 0.5 },
            Candidate { entry: 2, score: 0.95 },
        ];
        let merged = dedup_best(pool);
        assert_eq!(
            merged,
            vec![
                Candidate { entry: 1, score: 0.5 },
                Candidate { entry: 2, score: 0.95 },
            ]
        );
    }
}
