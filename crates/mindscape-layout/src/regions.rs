//! Body regions of the archetype layout and uniform sampling inside them.
//!
//! ## Region Geometry
//!
//! | Region | Shape | Placement |
//! |--------|-------|-----------|
//! | Head | sphere, centre (0, 1.6, 0), r 0.25 | reflection, daily |
//! | Core | box, centre (0, 1.15, 0), 0.45 × 0.6 × 0.3 | relationship, rant |
//! | Limbs | four segments with jitter | achievement |

use mindscape_core::{AnalyzedPost, BoundingBox3D, PostCategory, Position3D, Segment3D, Sphere3D};
use nalgebra::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Golden-ratio conjugate used to spread `other` posts over regions
const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

/// Arm or leg of the archetype figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Limb {
    LeftArm = 0,
    RightArm = 1,
    LeftLeg = 2,
    RightLeg = 3,
}

impl Limb {
    pub const COUNT: usize = 4;

    pub fn from_index(idx: usize) -> Self {
        match idx % Self::COUNT {
            0 => Self::LeftArm,
            1 => Self::RightArm,
            2 => Self::LeftLeg,
            _ => Self::RightLeg,
        }
    }

    /// Shoulder-to-hand or hip-to-foot segment
    pub fn segment(&self) -> Segment3D {
        let (start, end) = match self {
            Limb::LeftArm => ([-0.25, 1.4, 0.0], [-0.7, 0.9, 0.2]),
            Limb::RightArm => ([0.25, 1.4, 0.0], [0.7, 0.9, 0.2]),
            Limb::LeftLeg => ([-0.15, 0.8, 0.0], [-0.2, 0.0, 0.0]),
            Limb::RightLeg => ([0.15, 0.8, 0.0], [0.2, 0.0, 0.0]),
        };
        Segment3D::new(start.into(), end.into())
    }
}

/// Where a post lives on the archetype figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "region", content = "limb", rename_all = "camelCase")]
pub enum ArchetypeRegion {
    Head,
    Core,
    Limb(Limb),
}

impl ArchetypeRegion {
    /// Resolve the region of a post from its category and `timestamp_index`.
    ///
    /// Limbs are assigned round-robin by `timestamp_index`. `other` posts are
    /// spread 20/40/40 over head, core and limbs by a golden-ratio sequence
    /// over the same index. Deleting other posts never moves a post.
    pub fn for_post(post: &AnalyzedPost) -> Self {
        let limb = ArchetypeRegion::Limb(Limb::from_index(post.timestamp_index()));

        match post.category() {
            PostCategory::Reflection | PostCategory::Daily => ArchetypeRegion::Head,
            PostCategory::Relationship | PostCategory::Rant => ArchetypeRegion::Core,
            PostCategory::Achievement => limb,
            PostCategory::Other => {
                let zone = (post.timestamp_index() as f64 * GOLDEN_RATIO_CONJUGATE).fract();
                if zone < 0.2 {
                    ArchetypeRegion::Head
                } else if zone < 0.6 {
                    ArchetypeRegion::Core
                } else {
                    limb
                }
            }
        }
    }

    /// Uniform random point inside the region
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, limb_jitter: f64) -> Position3D {
        match self {
            ArchetypeRegion::Head => sample_in_sphere(rng, &head_volume()),
            ArchetypeRegion::Core => sample_in_box(rng, &core_volume()),
            ArchetypeRegion::Limb(limb) => sample_along_segment(rng, &limb.segment(), limb_jitter),
        }
    }
}

pub fn head_volume() -> Sphere3D {
    Sphere3D::new(Position3D::new(0.0, 1.6, 0.0), 0.25)
}

pub fn core_volume() -> BoundingBox3D {
    BoundingBox3D::from_center(Position3D::new(0.0, 1.15, 0.0), 0.45, 0.6, 0.3)
}

/// Uniform point in a solid sphere (cube-root radius)
pub fn sample_in_sphere<R: Rng + ?Sized>(rng: &mut R, sphere: &Sphere3D) -> Position3D {
    let theta = 2.0 * PI * rng.gen::<f64>();
    let phi = (2.0 * rng.gen::<f64>() - 1.0).acos();
    let r = rng.gen::<f64>().cbrt() * sphere.radius;

    sphere.center.offset(Vector3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    ))
}

pub fn sample_in_box<R: Rng + ?Sized>(rng: &mut R, bbox: &BoundingBox3D) -> Position3D {
    let extents = bbox.extents();
    Position3D::new(
        bbox.min.x + rng.gen::<f64>() * extents.x,
        bbox.min.y + rng.gen::<f64>() * extents.y,
        bbox.min.z + rng.gen::<f64>() * extents.z,
    )
}

/// Point along a segment with `jitter` total spread per axis
pub fn sample_along_segment<R: Rng + ?Sized>(
    rng: &mut R,
    segment: &Segment3D,
    jitter: f64,
) -> Position3D {
    let t = rng.gen::<f64>();
    let offset = Vector3::new(
        (rng.gen::<f64>() - 0.5) * jitter,
        (rng.gen::<f64>() - 0.5) * jitter,
        (rng.gen::<f64>() - 0.5) * jitter,
    );
    segment.point_at(t).offset(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindscape_core::{PostAnalysis, PostId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn post(category: PostCategory, timestamp_index: usize) -> AnalyzedPost {
        AnalyzedPost::new(
            PostId::new(),
            "x",
            PostAnalysis::new(0.0, 1, category),
            timestamp_index,
        )
    }

    #[test]
    fn test_category_regions() {
        assert_eq!(
            ArchetypeRegion::for_post(&post(PostCategory::Daily, 0)),
            ArchetypeRegion::Head
        );
        assert_eq!(
            ArchetypeRegion::for_post(&post(PostCategory::Rant, 0)),
            ArchetypeRegion::Core
        );
        assert_eq!(
            ArchetypeRegion::for_post(&post(PostCategory::Achievement, 6)),
            ArchetypeRegion::Limb(Limb::LeftLeg)
        );
    }

    #[test]
    fn test_other_distribution_is_roughly_weighted() {
        let mut counts = [0usize; 3];
        for i in 0..1000 {
            match ArchetypeRegion::for_post(&post(PostCategory::Other, i)) {
                ArchetypeRegion::Head => counts[0] += 1,
                ArchetypeRegion::Core => counts[1] += 1,
                ArchetypeRegion::Limb(_) => counts[2] += 1,
            }
        }
        assert!((150..250).contains(&counts[0]), "{counts:?}");
        assert!((350..450).contains(&counts[1]), "{counts:?}");
        assert!((350..450).contains(&counts[2]), "{counts:?}");
    }

    #[test]
    fn test_samples_stay_in_region() {
        let mut rng = StdRng::seed_from_u64(7);
        let head = head_volume();
        let core = core_volume();

        for _ in 0..500 {
            assert!(head.contains(&ArchetypeRegion::Head.sample(&mut rng, 0.15)));
            assert!(core.contains(&ArchetypeRegion::Core.sample(&mut rng, 0.15)));

            for i in 0..Limb::COUNT {
                let limb = Limb::from_index(i);
                let p = ArchetypeRegion::Limb(limb).sample(&mut rng, 0.15);
                // Jitter of ±0.075 per axis stays within the cube diagonal
                assert!(limb.segment().distance_to(&p) <= 0.075 * 3f64.sqrt() + 1e-9);
            }
        }
    }
}
