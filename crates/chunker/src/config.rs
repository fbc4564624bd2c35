use crate::error::{ChunkerError, Result};
use crate::measure::SizeMetric;
use serde::{Deserialize, Serialize};

/// Configuration for code chunking behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Maximum window size under the selected metric (soft upper bound:
    /// only a single indivisible unit may exceed it, and such chunks are
    /// flagged)
    pub max_window_size: usize,

    /// Size metric used to measure window spans
    pub metric: SizeMetric,

    /// Languages to accept (empty = all supported languages)
    pub supported_languages: Vec<String>,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_window_size: 1000,
            metric: SizeMetric::NonWhitespaceChars,
            supported_languages: vec![],
        }
    }
}

impl ChunkerConfig {
    /// Create config optimized for embeddings (smaller, focused chunks)
    pub fn for_embeddings() -> Self {
        Self {
            max_window_size: 500,
            ..Default::default()
        }
    }

    /// Create config optimized for LLM context (larger, comprehensive chunks)
    pub fn for_llm_context() -> Self {
        Self {
            max_window_size: 2048,
            metric: SizeMetric::ApproxTokens,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_window_size == 0 {
            return Err(ChunkerError::invalid_config(
                "max_window_size must be > 0",
            ));
        }
        Ok(())
    }
}
