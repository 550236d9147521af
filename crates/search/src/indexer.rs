//! N-gram phrase extraction and index construction.
//!
//! Source lines are cleaned, split into tokens, and pushed through a sliding
//! window of the most recent `n_gram_upto` tokens. Every time a token arrives
//! the indexer records each n-gram that ends on it, from the unigram up to the
//! full window, together with the 1-based line number it was seen on.
//!
//! The window is not reset between lines, so n-grams may span a
//! line break. Near the start of the corpus the window is shorter than
//! `n_gram_upto` and simply yields fewer phrases.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use phrase::{build_phrase_set, normalize_phrase};
use roaring::RoaringBitmap;
use tracing::info;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::index::{IndexEntry, SearchIndex};
use crate::tokenize::{split_tokens, strip_punctuation};

/// Accumulates phrase occurrences in first-seen order.
#[derive(Debug)]
struct PhraseCollector {
    n_gram_upto: usize,
    downcase: bool,
    /// Most recent token first.
    window: VecDeque<String>,
    phrases: Vec<(String, RoaringBitmap)>,
    positions: HashMap<String, usize>,
    line_number: u32,
}

impl PhraseCollector {
    fn new(n_gram_upto: usize, downcase: bool) -> Self {
        Self {
            n_gram_upto,
            downcase,
            window: VecDeque::with_capacity(n_gram_upto),
            phrases: Vec::new(),
            positions: HashMap::new(),
            line_number: 0,
        }
    }

    fn push_line(&mut self, line: &str) -> Result<(), SearchError> {
        self.line_number = self
            .line_number
            .checked_add(1)
            .ok_or(SearchError::LineOverflow)?;
        let line_number = self.line_number;

        let Self {
            n_gram_upto,
            downcase,
            window,
            phrases,
            positions,
            ..
        } = self;

        let cleaned = strip_punctuation(line);
        for token in split_tokens(&cleaned) {
            window.push_front(normalize_phrase(token, *downcase).into_owned());
            window.truncate(*n_gram_upto);

            // Grow the phrase leftwards: window[0] is the newest token, so
            // prepending older tokens keeps left-to-right order.
            let mut phrase = String::new();
            for (i, older) in window.iter().enumerate() {
                if i > 0 {
                    phrase.insert(0, ' ');
                }
                phrase.insert_str(0, older);
                record(phrases, positions, &phrase, line_number);
            }
        }
        Ok(())
    }
}

fn record(
    phrases: &mut Vec<(String, RoaringBitmap)>,
    positions: &mut HashMap<String, usize>,
    phrase: &str,
    line_number: u32,
) {
    match positions.get(phrase) {
        Some(&pos) => {
            phrases[pos].1.insert(line_number);
        }
        None => {
            let mut lines = RoaringBitmap::new();
            lines.insert(line_number);
            positions.insert(phrase.to_string(), phrases.len());
            phrases.push((phrase.to_string(), lines));
        }
    }
}

/// Extract every phrase of up to `n_gram_upto` tokens from `lines`.
///
/// Returns `(phrase, occurrence lines)` pairs in first-occurrence order.
/// Phrases are keyed exactly as they appear in the cleaned text; no case
/// folding is applied here.
pub fn build_index<I>(
    lines: I,
    n_gram_upto: usize,
) -> Result<Vec<(String, RoaringBitmap)>, SearchError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    SearchConfig::new()
        .with_n_gram_upto(n_gram_upto)
        .validate()?;
    let mut collector = PhraseCollector::new(n_gram_upto, false);
    for line in lines {
        collector.push_line(line.as_ref())?;
    }
    Ok(collector.phrases)
}

/// An index under construction.
///
/// Feed it lines with [`push_line`](Self::push_line) or
/// [`extend`](Self::extend), then call [`finish`](Self::finish) to obtain an
/// immutable [`SearchIndex`].
#[derive(Debug)]
pub struct IndexBuilder {
    config: SearchConfig,
    collector: PhraseCollector,
    started: Instant,
}

impl IndexBuilder {
    /// Create a builder, validating `config` up front.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let collector = PhraseCollector::new(config.n_gram_upto, config.downcase);
        Ok(Self {
            config,
            collector,
            started: Instant::now(),
        })
    }

    /// Index one raw source line. Line numbers are assigned in call order,
    /// starting at 1.
    pub fn push_line(&mut self, line: &str) -> Result<(), SearchError> {
        self.collector.push_line(line)
    }

    /// Index every line of `lines` in order.
    pub fn extend<I>(&mut self, lines: I) -> Result<(), SearchError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for line in lines {
            self.push_line(line.as_ref())?;
        }
        Ok(())
    }

    /// Number of source lines consumed so far.
    pub fn lines_seen(&self) -> u32 {
        self.collector.line_number
    }

    /// Number of distinct phrases recorded so far.
    pub fn phrase_count(&self) -> usize {
        self.collector.phrases.len()
    }

    /// Build the phrase sets and freeze the index.
    pub fn finish(self) -> Result<SearchIndex, SearchError> {
        let lines_seen = self.collector.line_number;
        let mut entries = Vec::with_capacity(self.collector.phrases.len());
        for (phrase, lines) in self.collector.phrases {
            // Already normalized by the collector.
            let set = build_phrase_set(&phrase, false)?;
            entries.push(IndexEntry::new(phrase, set, lines));
        }

        let elapsed_micros = self.started.elapsed().as_micros();
        info!(
            entries = entries.len(),
            lines = lines_seen,
            n_gram_upto = self.config.n_gram_upto,
            elapsed_micros,
            "index_built"
        );

        Ok(SearchIndex::new(entries, self.config))
    }
}
