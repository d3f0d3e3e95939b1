//! Persona session: the post collection, its derived views and its store.
//!
//! Every mutation recomputes the profile and spheres from the full
//! collection, so posts, dimensions and spheres never disagree.

use mindscape_analysis::{
    diff, DimensionDelta, DimensionMapper, PersonaProfile, RuleBasedAnalyzer, WhatIfOutcome,
    WhatIfSimulator,
};
use mindscape_core::{AnalyzedPost, Error, PersonaDimensions, PostId, Result, TargetPersona};
use mindscape_layout::{LayoutEngine, MemorySphere};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::ingest::{BatchReport, Ingestor};
use crate::remote::{ChatCompletionAnalyzer, ExternalAnalyzer};
use crate::store::{JsonFileStore, MemoryStore};

/// Consistent view of the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub posts: Vec<AnalyzedPost>,
    pub profile: PersonaProfile,
    pub spheres: Vec<MemorySphere>,
}

impl SessionSnapshot {
    pub fn dimensions(&self) -> PersonaDimensions {
        self.profile.dimensions
    }
}

/// Owns the post collection and keeps it persisted
pub struct PersonaSession {
    ingestor: Ingestor,
    mapper: DimensionMapper,
    layout: LayoutEngine,
    simulator: WhatIfSimulator,
    store: Arc<dyn MemoryStore>,
    state: RwLock<SessionSnapshot>,
}

impl PersonaSession {
    /// Rule-based session over `store`
    pub fn new(config: &EngineConfig, store: Arc<dyn MemoryStore>) -> Self {
        let analyzer = RuleBasedAnalyzer::new(config.analyzer.clone());
        let mapper = DimensionMapper::new(config.dimensions.clone());
        let layout = LayoutEngine::new(config.layout.clone());

        let state = SessionSnapshot {
            posts: Vec::new(),
            profile: PersonaProfile::from_posts(&[], &mapper),
            spheres: Vec::new(),
        };

        Self {
            ingestor: Ingestor::new(analyzer.clone(), config.ingestion.clone()),
            simulator: WhatIfSimulator::new(analyzer, mapper.clone()),
            mapper,
            layout,
            store,
            state: RwLock::new(state),
        }
    }

    /// Session with a JSON file store and, when configured, the remote analyzer
    pub fn from_config(config: &EngineConfig) -> Self {
        let store = Arc::new(JsonFileStore::new(
            &config.storage.directory,
            config.storage.key.clone(),
        ));
        let session = Self::new(config, store);

        if !config.ingestion.use_remote {
            return session;
        }

        let timeout = Duration::from_millis(config.ingestion.remote_timeout_ms);
        match ChatCompletionAnalyzer::new(config.remote.clone(), timeout) {
            Ok(remote) => session.with_remote(Arc::new(remote)),
            Err(e) => {
                warn!(error = %e, "remote analyzer unavailable, using rule-based analysis only");
                session
            }
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn ExternalAnalyzer>) -> Self {
        self.ingestor = self.ingestor.with_remote(remote);
        self
    }

    /// Replace the collection with what the store holds
    pub async fn load(&self) -> SessionSnapshot {
        let posts = self.store.load();
        let snapshot = self.recompute(posts);

        info!(posts = snapshot.posts.len(), "session loaded");
        *self.state.write().await = snapshot.clone();
        snapshot
    }

    /// Analyze and append a batch, then persist the full collection.
    ///
    /// No lock is held while the batch is analyzed. New posts continue the
    /// collection's timestamp sequence; if another batch landed in the
    /// meantime they are renumbered after it. The in-memory state is
    /// updated even when saving fails.
    pub async fn ingest<S: AsRef<str>>(&self, lines: &[S]) -> Result<BatchReport> {
        let start_index = next_timestamp(&self.state.read().await.posts);
        let mut report = self.ingestor.analyze_batch_at(lines, start_index).await;

        if report.posts.is_empty() {
            debug!("nothing to ingest");
            return Ok(report);
        }

        let mut state = self.state.write().await;

        let next = next_timestamp(&state.posts);
        if next != start_index {
            debug!(from = start_index, to = next, "renumbering batch");
            report.posts = report
                .posts
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    AnalyzedPost::new(p.id().clone(), p.original_text(), p.analysis(), next + i)
                })
                .collect();
        }

        let mut posts = std::mem::take(&mut state.posts);
        posts.extend(report.posts.iter().cloned());
        *state = self.recompute(posts);

        self.store.save(&state.posts)?;
        Ok(report)
    }

    /// Remove one post; returns whether it existed
    pub async fn delete(&self, id: &PostId) -> Result<bool> {
        let mut state = self.state.write().await;

        let before = state.posts.len();
        let posts: Vec<AnalyzedPost> = state
            .posts
            .iter()
            .filter(|p| p.id() != id)
            .cloned()
            .collect();

        if posts.len() == before {
            return Ok(false);
        }

        *state = self.recompute(posts);
        self.store.save(&state.posts)?;

        info!(id = %id, remaining = state.posts.len(), "post deleted");
        Ok(true)
    }

    /// Drop every post and the stored blob
    pub async fn clear(&self) -> Result<()> {
        let mut state = self.state.write().await;
        *state = self.recompute(Vec::new());
        self.store.clear()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.clone()
    }

    pub async fn dimensions(&self) -> PersonaDimensions {
        self.state.read().await.profile.dimensions
    }

    /// Project the effect of a draft without touching the collection
    pub async fn what_if(&self, draft: &str) -> WhatIfOutcome {
        let state = self.state.read().await;
        self.simulator.outcome(&state.posts, draft)
    }

    /// Gap from the current persona to `target`
    pub async fn gap_to(&self, target: &TargetPersona) -> DimensionDelta {
        diff(&self.dimensions().await, &target.dimensions)
    }

    /// Gap to the built-in preset named `id`
    pub async fn gap_to_preset(&self, id: &str) -> Result<DimensionDelta> {
        let target = TargetPersona::find(id)
            .ok_or_else(|| Error::InvalidInput(format!("unknown persona preset: {id}")))?;
        Ok(self.gap_to(&target).await)
    }

    fn recompute(&self, posts: Vec<AnalyzedPost>) -> SessionSnapshot {
        let profile = PersonaProfile::from_posts(&posts, &self.mapper);
        let spheres = self.layout.layout(&posts);

        debug!(
            posts = posts.len(),
            dominant = %profile.dimensions.dominant_dimension(),
            "session recomputed"
        );

        SessionSnapshot {
            posts,
            profile,
            spheres,
        }
    }
}

/// Index following the newest post
fn next_timestamp(posts: &[AnalyzedPost]) -> usize {
    posts
        .iter()
        .map(|p| p.timestamp_index() + 1)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::AnalyzerResult;
    use crate::store::{InMemoryStore, STORAGE_KEY};
    use async_trait::async_trait;
    use mindscape_core::{PostAnalysis, PostCategory};

    /// Remote analyzer that answers after a fixed delay
    struct DelayedAnalyzer(Duration);

    #[async_trait]
    impl ExternalAnalyzer for DelayedAnalyzer {
        fn name(&self) -> &str {
            "delayed"
        }

        async fn analyze_batch(&self, lines: &[String]) -> AnalyzerResult<Vec<PostAnalysis>> {
            tokio::time::sleep(self.0).await;
            Ok(lines
                .iter()
                .map(|_| PostAnalysis::new(0.4, 2, PostCategory::Daily))
                .collect())
        }
    }

    fn delayed_session(delay: Duration) -> PersonaSession {
        let config = EngineConfig::default();
        PersonaSession::new(&config, Arc::new(InMemoryStore::new()))
            .with_remote(Arc::new(DelayedAnalyzer(delay)))
    }

    fn session() -> (PersonaSession, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let mut config = EngineConfig::default();
        config.ingestion.use_remote = false;
        (PersonaSession::new(&config, store.clone()), store)
    }

    fn assert_consistent(snapshot: &SessionSnapshot) {
        assert_eq!(snapshot.posts.len(), snapshot.spheres.len());
        for (post, sphere) in snapshot.posts.iter().zip(&snapshot.spheres) {
            assert_eq!(post.id(), &sphere.id);
        }
        assert_eq!(snapshot.profile.stats.count, snapshot.posts.len());
    }

    #[tokio::test]
    async fn test_empty_session_is_neutral() {
        let (session, _) = session();
        let snapshot = session.snapshot().await;

        assert!(snapshot.posts.is_empty());
        assert!(snapshot.spheres.is_empty());
        assert_eq!(snapshot.dimensions(), PersonaDimensions::neutral());
        assert!(snapshot.profile.insights.is_empty());
    }

    #[tokio::test]
    async fn test_ingest_appends_recomputes_and_saves() {
        let (session, store) = session();

        session
            .ingest(&["Had coffee and went to work, it was nice.", ""])
            .await
            .unwrap();
        let report = session.ingest(&["I hate traffic so much!"]).await.unwrap();
        assert_eq!(report.posts[0].timestamp_index(), 1);

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.posts.len(), 2);
        assert_eq!(snapshot.posts[1].category(), PostCategory::Rant);
        assert_consistent(&snapshot);
        assert_eq!(store.load(), snapshot.posts);
    }

    #[tokio::test]
    async fn test_readers_not_blocked_during_remote_analysis() {
        let session = delayed_session(Duration::from_millis(300));

        let (report, snapshot) = tokio::join!(session.ingest(&["Morning coffee."]), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            tokio::time::timeout(Duration::from_millis(100), session.snapshot()).await
        });

        assert_eq!(report.unwrap().posts.len(), 1);
        assert!(snapshot.expect("snapshot waited on ingest").posts.is_empty());
        assert_eq!(session.snapshot().await.posts.len(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_batches_get_distinct_timestamps() {
        let session = delayed_session(Duration::from_millis(50));

        let (first, second) = tokio::join!(
            session.ingest(&["one", "two"]),
            session.ingest(&["three", "four"])
        );
        first.unwrap();
        second.unwrap();

        let snapshot = session.snapshot().await;
        let mut indices: Vec<usize> = snapshot.posts.iter().map(|p| p.timestamp_index()).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_consistent(&snapshot);
    }

    #[tokio::test]
    async fn test_load_skips_out_of_range_records() {
        let store = Arc::new(InMemoryStore::new());
        store.set_raw(
            r#"[{"id":"bad","originalText":"x","sentimentScore":4.0,"intensity":0,
                 "category":"rant","timestampIndex":0}]"#,
        );
        let session = PersonaSession::new(&EngineConfig::default(), store);

        let snapshot = session.load().await;
        assert!(snapshot.posts.is_empty());
        assert!(snapshot.spheres.is_empty());
        assert_eq!(snapshot.dimensions(), PersonaDimensions::neutral());
    }

    #[tokio::test]
    async fn test_blank_batch_leaves_state_alone() {
        let (session, store) = session();
        let report = session.ingest(&["  ", ""]).await.unwrap();

        assert!(report.posts.is_empty());
        assert!(session.snapshot().await.posts.is_empty());
        assert!(store.raw().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_and_persists() {
        let (session, store) = session();
        session
            .ingest(&["Finally finished my thesis!", "Dinner with my family tonight."])
            .await
            .unwrap();

        let id = session.snapshot().await.posts[0].id().clone();
        assert!(session.delete(&id).await.unwrap());
        assert!(!session.delete(&id).await.unwrap());

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.posts.len(), 1);
        assert_consistent(&snapshot);
        assert_eq!(store.load(), snapshot.posts);
    }

    #[tokio::test]
    async fn test_load_restores_stored_posts() {
        let (session, store) = session();
        session
            .ingest(&["Won the chess tournament today!", "I wonder what life means."])
            .await
            .unwrap();
        let before = session.snapshot().await;

        let mut config = EngineConfig::default();
        config.ingestion.use_remote = false;
        let restored = PersonaSession::new(&config, store);
        let snapshot = restored.load().await;

        assert_eq!(snapshot.posts, before.posts);
        assert_eq!(snapshot.profile, before.profile);
        assert_consistent(&snapshot);
    }

    #[tokio::test]
    async fn test_what_if_does_not_mutate() {
        let (session, _) = session();
        session.ingest(&["I hate traffic so much!"]).await.unwrap();
        let before = session.snapshot().await;

        let outcome = session.what_if("Spent the whole day with my best friend!").await;
        assert_eq!(outcome.baseline, before.dimensions());
        assert_ne!(outcome.projected, outcome.baseline);

        assert_eq!(session.snapshot().await.posts, before.posts);
    }

    #[tokio::test]
    async fn test_gap_to_preset() {
        let (session, _) = session();
        let target = TargetPersona::find("radiant-connector").unwrap();

        let gap = session.gap_to_preset("radiant-connector").await.unwrap();
        assert_eq!(gap, diff(&PersonaDimensions::neutral(), &target.dimensions));
        assert!(matches!(
            session.gap_to_preset("nobody").await,
            Err(Error::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_from_config_uses_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = EngineConfig::default();
        config.storage.directory = dir.path().to_path_buf();
        config.remote.endpoint = String::new();

        // An unusable remote endpoint leaves the session rule-based
        let session = PersonaSession::from_config(&config);
        let report = session.ingest(&["Dinner with my family tonight."]).await.unwrap();
        assert_eq!(report.source, crate::ingest::AnalysisSource::RuleBased);

        let stored = JsonFileStore::new(dir.path(), STORAGE_KEY).load();
        assert_eq!(stored, session.snapshot().await.posts);
    }

    #[tokio::test]
    async fn test_clear_empties_session_and_store() {
        let (session, store) = session();
        session.ingest(&["Morning walk in the rain."]).await.unwrap();

        session.clear().await.unwrap();
        assert!(session.snapshot().await.posts.is_empty());
        assert!(store.load().is_empty());
    }
}
