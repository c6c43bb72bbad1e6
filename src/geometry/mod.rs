//! Mesh-side geometry: axis-aligned bounds and extruded text meshes.

pub mod text_mesh;

use glam::Vec3;

pub use text_mesh::{build_text_mesh, MeshData, Vertex};

/// Axis-aligned bounding box in the mesh's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// An inverted box that unions correctly with any point.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Grow the box to contain `p`.
    pub fn union_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Whether any point has been unioned in.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }

    /// The 8 corners of the box, for projection into screen space.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Bounds of a point cloud. Returns [`Aabb::EMPTY`] for no points.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut aabb = Self::EMPTY;
        for p in points {
            aabb.union_point(p);
        }
        aabb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_grows_bounds() {
        let aabb = Aabb::from_points([
            Vec3::new(-1.0, 0.0, 0.5),
            Vec3::new(2.0, -3.0, 0.0),
        ]);
        assert!(aabb.is_valid());
        assert_eq!(aabb.min, Vec3::new(-1.0, -3.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 0.0, 0.5));
    }

    #[test]
    fn empty_is_invalid() {
        assert!(!Aabb::EMPTY.is_valid());
    }

    #[test]
    fn corners_cover_extremes() {
        let aabb = Aabb::from_points([Vec3::ZERO, Vec3::ONE]);
        let corners = aabb.corners();
        assert!(corners.contains(&Vec3::ZERO));
        assert!(corners.contains(&Vec3::ONE));
        assert_eq!(corners.len(), 8);
    }
}
