//! Layout engine: one [`MemorySphere`] per post in three coordinate spaces.
//!
//! ## Modes
//!
//! - **Temporal**: posts on a gentle wave in input order, height by sentiment
//! - **Archetype**: posts inside a human figure, region by category
//! - **Categorical**: posts stacked into five towers on a ring, tower by color
//!
//! Only the archetype and categorical modes use randomness, and only for
//! cosmetic jitter; pass a seeded RNG to [`LayoutEngine::layout_with_rng`]
//! for reproducible output.

use mindscape_core::{AnalyzedPost, EmotionColor, PostAnalysis, PostId, Position3D};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::debug;

use crate::palette::{sphere_color, EmotionCluster};
use crate::regions::ArchetypeRegion;

/// Layout constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal gap between consecutive posts on the timeline
    pub temporal_spacing: f64,
    /// Height of a fully positive post on the timeline
    pub temporal_amplitude: f64,
    pub wave_frequency: f64,
    pub wave_depth: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Total per-axis spread around a limb segment
    pub limb_jitter: f64,
    pub tower_radius: f64,
    /// Total angular spread within a tower sector (radians)
    pub angle_jitter: f64,
    /// Total horizontal spread around a tower position
    pub horizontal_jitter: f64,
    /// Height of one floor of a tower
    pub floor_height: f64,
    /// Height of the ground floor
    pub tower_base: f64,
    /// Upward-only jitter on each floor
    pub height_jitter: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            temporal_spacing: 0.6,
            temporal_amplitude: 3.0,
            wave_frequency: 0.2,
            wave_depth: 2.0,
            min_radius: 0.15,
            max_radius: 0.40,
            limb_jitter: 0.15,
            tower_radius: 12.0,
            angle_jitter: 0.8,
            horizontal_jitter: 2.0,
            floor_height: 0.8,
            tower_base: -8.0,
            height_jitter: 0.5,
        }
    }
}

/// Which coordinate space the UI shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Temporal,
    Archetype,
    Categorical,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 3] = [
        LayoutMode::Temporal,
        LayoutMode::Archetype,
        LayoutMode::Categorical,
    ];

    /// Next mode in the UI's toggle cycle
    pub fn next(&self) -> Self {
        match self {
            LayoutMode::Temporal => LayoutMode::Archetype,
            LayoutMode::Archetype => LayoutMode::Categorical,
            LayoutMode::Categorical => LayoutMode::Temporal,
        }
    }
}

/// Placement of one post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySphere {
    /// Same id as the owning post
    pub id: PostId,
    pub radius: f64,
    pub color: EmotionColor,
    pub region: ArchetypeRegion,
    pub cluster: EmotionCluster,
    pub temporal_position: Position3D,
    pub archetype_position: Position3D,
    pub categorical_position: Position3D,
}

impl MemorySphere {
    pub fn position(&self, mode: LayoutMode) -> Position3D {
        match mode {
            LayoutMode::Temporal => self.temporal_position,
            LayoutMode::Archetype => self.archetype_position,
            LayoutMode::Categorical => self.categorical_position,
        }
    }
}

/// Running floor count per tower
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TowerHeights {
    floors: [usize; EmotionCluster::COUNT],
}

impl TowerHeights {
    /// Claim the next free floor of `cluster`, returning its index
    pub fn claim(&mut self, cluster: EmotionCluster) -> usize {
        let slot = &mut self.floors[cluster.index()];
        let floor = *slot;
        *slot += 1;
        floor
    }

    pub fn height(&self, cluster: EmotionCluster) -> usize {
        self.floors[cluster.index()]
    }

    pub fn total(&self) -> usize {
        self.floors.iter().sum()
    }
}

/// Places posts in all three layout modes
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out posts with thread-local randomness
    pub fn layout(&self, posts: &[AnalyzedPost]) -> Vec<MemorySphere> {
        self.layout_with_rng(posts, &mut rand::thread_rng())
    }

    /// Lay out posts drawing jitter from `rng`.
    ///
    /// The output has one sphere per post, in input order.
    pub fn layout_with_rng<R: Rng + ?Sized>(
        &self,
        posts: &[AnalyzedPost],
        rng: &mut R,
    ) -> Vec<MemorySphere> {
        let n = posts.len();

        let (spheres, towers) = posts.iter().enumerate().fold(
            (Vec::with_capacity(n), TowerHeights::default()),
            |(mut spheres, mut towers), (i, post)| {
                spheres.push(self.place(post, i, n, &mut towers, rng));
                (spheres, towers)
            },
        );

        debug!(
            spheres = spheres.len(),
            tallest = EmotionCluster::ALL
                .iter()
                .map(|c| towers.height(*c))
                .max()
                .unwrap_or(0),
            "laid out memory spheres"
        );

        spheres
    }

    fn place<R: Rng + ?Sized>(
        &self,
        post: &AnalyzedPost,
        i: usize,
        n: usize,
        towers: &mut TowerHeights,
        rng: &mut R,
    ) -> MemorySphere {
        let color = sphere_color(post.category(), post.sentiment_score());
        let cluster = EmotionCluster::from(color);
        let region = ArchetypeRegion::for_post(post);

        MemorySphere {
            id: post.id().clone(),
            radius: self.radius(post.intensity()),
            color,
            region,
            cluster,
            temporal_position: self.temporal_position(i, n, post.sentiment_score()),
            archetype_position: region.sample(rng, self.config.limb_jitter),
            categorical_position: self.categorical_position(cluster, towers.claim(cluster), rng),
        }
    }

    /// Sphere radius for an intensity in 1..=5
    pub fn radius(&self, intensity: u8) -> f64 {
        let c = &self.config;
        let t = intensity as f64 / PostAnalysis::MAX_INTENSITY as f64;
        c.min_radius + t * (c.max_radius - c.min_radius)
    }

    /// Timeline position of the `i`-th of `n` posts
    pub fn temporal_position(&self, i: usize, n: usize, sentiment: f64) -> Position3D {
        let c = &self.config;
        let i = i as f64;
        Position3D::new(
            (i - n as f64 / 2.0) * c.temporal_spacing,
            sentiment * c.temporal_amplitude,
            (i * c.wave_frequency).cos() * c.wave_depth - c.wave_depth,
        )
    }

    fn categorical_position<R: Rng + ?Sized>(
        &self,
        cluster: EmotionCluster,
        floor: usize,
        rng: &mut R,
    ) -> Position3D {
        let c = &self.config;
        let sector = cluster.index() as f64 / EmotionCluster::COUNT as f64 * TAU;
        let angle = sector + (rng.gen::<f64>() - 0.5) * c.angle_jitter;

        Position3D::new(
            angle.cos() * c.tower_radius + (rng.gen::<f64>() - 0.5) * c.horizontal_jitter,
            floor as f64 * c.floor_height + c.tower_base + rng.gen::<f64>() * c.height_jitter,
            angle.sin() * c.tower_radius + (rng.gen::<f64>() - 0.5) * c.horizontal_jitter,
        )
    }
}

/// Lay out posts with the default configuration
pub fn layout(posts: &[AnalyzedPost]) -> Vec<MemorySphere> {
    LayoutEngine::default().layout(posts)
}
