//! Workspace umbrella crate for fuzzline.
//!
//! This crate stitches the phrase similarity layer and the search index
//! together with text sources (files, readers, in-memory strings), a YAML
//! configuration file, and an optional metrics observer, so callers can go
//! from a file on disk to ranked matches with a single API entry point.

pub mod config;

pub use phrase::{
    DEFAULT_WEIGHTING, PhraseError, PhraseSet, build_phrase_set, composite_score, jaccard,
    normalize_phrase,
};
pub use search::{
    ConfigError, IndexBuilder, IndexEntry, ScoredResult, SearchConfig, SearchError, SearchIndex,
    build_index, split_query, split_tokens, strip_punctuation,
};

pub use crate::config::{ConfigLoadError, FuzzlineConfig};

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use tracing::warn;

/// Errors that can occur while indexing a text source or querying it.
#[derive(Debug)]
pub enum PipelineError {
    Io(io::Error),
    Search(SearchError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io(err) => write!(f, "text source failure: {err}"),
            PipelineError::Search(err) => write!(f, "search failure: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Io(err) => Some(err),
            PipelineError::Search(err) => Some(err),
        }
    }
}

impl From<io::Error> for PipelineError {
    fn from(value: io::Error) -> Self {
        PipelineError::Io(value)
    }
}

impl From<SearchError> for PipelineError {
    fn from(value: SearchError) -> Self {
        PipelineError::Search(value)
    }
}

/// Metrics observer for indexing and lookup.
///
/// `Ok` carries the number of indexed phrases or returned hits.
pub trait SearchMetrics: Send + Sync {
    fn record_index(&self, latency: Duration, outcome: Result<usize, &PipelineError>);
    fn record_lookup(&self, latency: Duration, outcome: Result<usize, &PipelineError>);
}

/// Install or clear the global search metrics recorder.
pub fn set_search_metrics(recorder: Option<Arc<dyn SearchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn SearchMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn SearchMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn SearchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn SearchMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_index(self, outcome: Result<usize, &PipelineError>) {
        self.recorder.record_index(self.start.elapsed(), outcome);
    }

    fn record_lookup(self, outcome: Result<usize, &PipelineError>) {
        self.recorder.record_lookup(self.start.elapsed(), outcome);
    }
}

/// Index every line of a buffered reader.
///
/// Lines are consumed lazily; the first read error aborts indexing.
pub fn index_reader<R: BufRead>(
    reader: R,
    cfg: &SearchConfig,
) -> Result<SearchIndex, PipelineError> {
    let metrics = MetricsSpan::start();
    let result = index_reader_inner(reader, cfg);
    if let Some(span) = metrics {
        span.record_index(result.as_ref().map(SearchIndex::len));
    }
    if let Err(err) = &result {
        warn!(error = %err, "index_failure");
    }
    result
}

fn index_reader_inner<R: BufRead>(
    reader: R,
    cfg: &SearchConfig,
) -> Result<SearchIndex, PipelineError> {
    let mut builder = IndexBuilder::new(cfg.clone())?;
    for line in reader.lines() {
        builder.push_line(&line?)?;
    }
    Ok(builder.finish()?)
}

/// Index a text file, one source line per file line.
pub fn index_file<P: AsRef<Path>>(
    path: P,
    cfg: &SearchConfig,
) -> Result<SearchIndex, PipelineError> {
    let file = match File::open(path.as_ref()) {
        Ok(file) => file,
        Err(err) => {
            let err = PipelineError::Io(err);
            if let Some(span) = MetricsSpan::start() {
                span.record_index(Err(&err));
            }
            warn!(path = %path.as_ref().display(), error = %err, "index_failure");
            return Err(err);
        }
    };
    index_reader(BufReader::new(file), cfg)
}

/// Index an in-memory text.
pub fn index_text(text: &str, cfg: &SearchConfig) -> Result<SearchIndex, PipelineError> {
    index_reader(text.as_bytes(), cfg)
}

/// Run a full lookup with the index's configuration.
pub fn search(index: &SearchIndex, query: &str) -> Result<Vec<ScoredResult>, PipelineError> {
    let metrics = MetricsSpan::start();
    let result = index.lookup(query).map_err(PipelineError::from);
    if let Some(span) = metrics {
        span.record_lookup(result.as_ref().map(Vec::len));
    }
    result
}
