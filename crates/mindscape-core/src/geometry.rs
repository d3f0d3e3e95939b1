//! Geometric primitives for spatial layouts.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// 3D position in scene coordinates (y is up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }

    pub fn offset(&self, delta: Vector3<f64>) -> Self {
        Self::from_nalgebra(self.to_nalgebra() + delta)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        nalgebra::distance(&self.to_nalgebra(), &other.to_nalgebra())
    }
}

impl From<[f64; 3]> for Position3D {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Solid sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere3D {
    pub center: Position3D,
    pub radius: f64,
}

impl Sphere3D {
    pub fn new(center: Position3D, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: &Position3D) -> bool {
        self.center.distance_to(point) <= self.radius + 1e-9
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3D {
    pub min: Position3D,
    pub max: Position3D,
}

impl BoundingBox3D {
    /// Box centred on `center` with the given full extents
    pub fn from_center(center: Position3D, width: f64, height: f64, depth: f64) -> Self {
        let half = Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
        Self {
            min: center.offset(-half),
            max: center.offset(half),
        }
    }

    pub fn extents(&self) -> Vector3<f64> {
        self.max.to_nalgebra() - self.min.to_nalgebra()
    }

    pub fn contains(&self, point: &Position3D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

/// Line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment3D {
    pub start: Position3D,
    pub end: Position3D,
}

impl Segment3D {
    pub fn new(start: Position3D, end: Position3D) -> Self {
        Self { start, end }
    }

    /// Point at parameter `t` (0 = start, 1 = end)
    pub fn point_at(&self, t: f64) -> Position3D {
        let a = self.start.to_nalgebra();
        let b = self.end.to_nalgebra();
        Position3D::from_nalgebra(a + (b - a) * t)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Shortest distance from `point` to the segment
    pub fn distance_to(&self, point: &Position3D) -> f64 {
        let a = self.start.to_nalgebra();
        let ab = self.end.to_nalgebra() - a;
        let len_sq = ab.norm_squared();
        if len_sq < 1e-12 {
            return self.start.distance_to(point);
        }
        let t = ((point.to_nalgebra() - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
        self.point_at(t).distance_to(point)
    }
}
