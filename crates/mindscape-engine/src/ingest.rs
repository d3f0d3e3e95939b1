//! Batch ingestion with remote analysis and rule-based fallback.
//!
//! ```text
//! raw lines ──► trim / drop empty / cap ──► ExternalAnalyzer ──ok──► posts
//!                                               │
//!                                             error / timeout
//!                                               ▼
//!                                        RuleBasedAnalyzer ───────► posts
//! ```
//!
//! Remote and rule-based results are never mixed within a batch.

use chrono::{DateTime, Utc};
use mindscape_analysis::RuleBasedAnalyzer;
use mindscape_core::{AnalyzedPost, PostAnalysis, PostId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::IngestionConfig;
use crate::remote::{AnalyzerError, AnalyzerResult, ExternalAnalyzer};

/// Which analyzer produced a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisSource {
    Remote,
    RuleBased,
}

/// Outcome of one ingested batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub posts: Vec<AnalyzedPost>,
    pub source: AnalysisSource,
    /// Why the remote analyzer was not used, if it was attempted and failed
    pub fallback_reason: Option<String>,
    /// Blank lines dropped before analysis
    pub dropped_lines: usize,
    /// Lines cut by the batch cap
    pub truncated: usize,
    pub completed_at: DateTime<Utc>,
}

/// Cleaned batch ready for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedBatch {
    pub lines: Vec<String>,
    pub dropped_lines: usize,
    pub truncated: usize,
}

/// Turns raw lines into analyzed posts
pub struct Ingestor {
    analyzer: RuleBasedAnalyzer,
    remote: Option<Arc<dyn ExternalAnalyzer>>,
    config: IngestionConfig,
}

impl Ingestor {
    /// Rule-based only ingestor
    pub fn new(analyzer: RuleBasedAnalyzer, config: IngestionConfig) -> Self {
        Self {
            analyzer,
            remote: None,
            config,
        }
    }

    /// Attach a remote analyzer tried before the rule-based one
    pub fn with_remote(mut self, remote: Arc<dyn ExternalAnalyzer>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn config(&self) -> &IngestionConfig {
        &self.config
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some() && self.config.use_remote
    }

    /// Trim lines, drop empty ones and cap the batch
    pub fn prepare_lines<S: AsRef<str>>(&self, raw: &[S]) -> PreparedBatch {
        let mut lines: Vec<String> = raw
            .iter()
            .map(|l| l.as_ref().trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        let dropped_lines = raw.len() - lines.len();
        let truncated = lines.len().saturating_sub(self.config.max_batch);
        lines.truncate(self.config.max_batch);

        PreparedBatch {
            lines,
            dropped_lines,
            truncated,
        }
    }

    /// Analyze a batch with `timestamp_index` equal to the position in the batch
    pub async fn analyze_batch<S: AsRef<str>>(&self, raw: &[S]) -> BatchReport {
        self.analyze_batch_at(raw, 0).await
    }

    /// Analyze a batch whose first post gets `timestamp_index = start_index`
    pub async fn analyze_batch_at<S: AsRef<str>>(
        &self,
        raw: &[S],
        start_index: usize,
    ) -> BatchReport {
        let prepared = self.prepare_lines(raw);

        let (analyses, source, fallback_reason) = match self.try_remote(&prepared.lines).await {
            Some(Ok(analyses)) => (analyses, AnalysisSource::Remote, None),
            Some(Err(e)) => {
                warn!(
                    error = %e,
                    lines = prepared.lines.len(),
                    "remote analysis failed, using rule-based analyzer"
                );
                (
                    self.analyze_locally(&prepared.lines),
                    AnalysisSource::RuleBased,
                    Some(e.to_string()),
                )
            }
            None => (
                self.analyze_locally(&prepared.lines),
                AnalysisSource::RuleBased,
                None,
            ),
        };

        let posts: Vec<AnalyzedPost> = prepared
            .lines
            .into_iter()
            .zip(analyses)
            .enumerate()
            .map(|(i, (text, analysis))| {
                AnalyzedPost::new(PostId::new(), text, analysis, start_index + i)
            })
            .collect();

        info!(
            posts = posts.len(),
            source = ?source,
            dropped = prepared.dropped_lines,
            truncated = prepared.truncated,
            "batch ingested"
        );

        BatchReport {
            posts,
            source,
            fallback_reason,
            dropped_lines: prepared.dropped_lines,
            truncated: prepared.truncated,
            completed_at: Utc::now(),
        }
    }

    async fn try_remote(&self, lines: &[String]) -> Option<AnalyzerResult<Vec<PostAnalysis>>> {
        if lines.is_empty() || !self.config.use_remote {
            return None;
        }
        let remote = self.remote.as_ref()?;

        let deadline = Duration::from_millis(self.config.remote_timeout_ms);
        let result = match tokio::time::timeout(deadline, remote.analyze_batch(lines)).await {
            Ok(result) => result,
            Err(_) => Err(AnalyzerError::Timeout(self.config.remote_timeout_ms)),
        };

        // A well-behaved analyzer already checks this; the fallback depends on it
        Some(result.and_then(|analyses| {
            if analyses.len() == lines.len() {
                Ok(analyses)
            } else {
                Err(AnalyzerError::Misaligned {
                    expected: lines.len(),
                    actual: analyses.len(),
                })
            }
        }))
    }

    fn analyze_locally(&self, lines: &[String]) -> Vec<PostAnalysis> {
        self.analyzer.analyze_batch(lines)
    }
}
