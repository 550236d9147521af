//! Configuration and validation for fuzzline search.
//!
//! [`SearchConfig`] carries every knob the indexer and the lookup pipeline
//! consume. Values are validated eagerly and never clamped: an out-of-range
//! weighting is an error, not a silently adjusted score.

use phrase::DEFAULT_WEIGHTING;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration shared by index construction and lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Largest n-gram (in tokens) recorded while indexing.
    ///
    /// `1` indexes single words only; `3` indexes every unigram, bigram and
    /// trigram ending at each token.
    #[serde(default = "SearchConfig::default_n_gram_upto")]
    pub n_gram_upto: usize,
    /// Share of the composite score attributed to positional agreement.
    #[serde(default = "SearchConfig::default_weighting")]
    pub weighting: f64,
    /// Candidates kept per sub-query before merging.
    ///
    /// This bounds the pool fed into deduplication, not the final result
    /// count.
    #[serde(default = "SearchConfig::default_limit")]
    pub limit: usize,
    /// Minimum score a merged result needs to be returned. Inclusive.
    #[serde(default = "SearchConfig::default_threshold")]
    pub threshold: f64,
    /// Lower-case phrases at index time and queries at lookup time.
    #[serde(default = "SearchConfig::default_downcase")]
    pub downcase: bool,
}

impl SearchConfig {
    /// Create a new configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn default_n_gram_upto() -> usize {
        1
    }

    pub(crate) fn default_weighting() -> f64 {
        DEFAULT_WEIGHTING
    }

    pub(crate) fn default_limit() -> usize {
        8
    }

    pub(crate) fn default_threshold() -> f64 {
        0.6
    }

    pub(crate) fn default_downcase() -> bool {
        true
    }

    /// Set the n-gram window size used while indexing.
    pub fn with_n_gram_upto(mut self, n_gram_upto: usize) -> Self {
        self.n_gram_upto = n_gram_upto;
        self
    }

    /// Set the positional share of the composite score.
    pub fn with_weighting(mut self, weighting: f64) -> Self {
        self.weighting = weighting;
        self
    }

    /// Set the per-sub-query candidate cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the minimum accepted score.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable or disable case folding.
    pub fn with_downcase(mut self, downcase: bool) -> Self {
        self.downcase = downcase;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_gram_upto < 1 {
            return Err(ConfigError::InvalidNGram {
                n_gram_upto: self.n_gram_upto,
            });
        }
        if !self.weighting.is_finite() || !(0.0..=1.0).contains(&self.weighting) {
            return Err(ConfigError::InvalidWeighting {
                weighting: self.weighting,
            });
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            n_gram_upto: Self::default_n_gram_upto(),
            weighting: Self::default_weighting(),
            limit: Self::default_limit(),
            threshold: Self::default_threshold(),
            downcase: Self::default_downcase(),
        }
    }
}

/// Validation failures for [`SearchConfig`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid config: n_gram_upto must be >= 1 (got {n_gram_upto})")]
    InvalidNGram { n_gram_upto: usize },

    #[error("invalid config: weighting must be a finite value in [0, 1] (got {weighting})")]
    InvalidWeighting { weighting: f64 },

    #[error("invalid config: threshold must be a finite value >= 0 (got {threshold})")]
    InvalidThreshold { threshold: f64 },
}
