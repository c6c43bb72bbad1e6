//! Screen-space bounding-rectangle hit testing.
//!
//! Labels are picked against the projection of their local bounding box
//! rather than the exact glyph silhouette, so clicks inside letter
//! counters (the hole of an "O") still register. The 8 box corners are
//! transformed to clip space, perspective-divided to NDC, mapped to
//! pixels, and the 2D bounds of the projected points — padded by 10% of
//! their width/height per side — form the clickable region.
//!
//! Hover and click run the same test independently; callers iterate
//! labels in a fixed order and act on the first match only.

use glam::{Mat4, Vec2, Vec4};

use crate::geometry::Aabb;

/// Fractional padding added to each side of a projected rectangle.
pub const HIT_PADDING: f32 = 0.1;

/// Axis-aligned rectangle in pixel coordinates (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: Vec2,
    /// Bottom-right corner.
    pub max: Vec2,
}

impl ScreenRect {
    /// Expand by a fraction of the rectangle's own width/height on each
    /// side.
    #[must_use]
    pub fn padded(&self, fraction: f32) -> Self {
        let pad = (self.max - self.min) * fraction;
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Point-in-rectangle test, boundary inclusive.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Project a local-space bounding box to its on-screen rectangle.
///
/// Corners behind the camera (non-positive clip w) are skipped; returns
/// `None` when no corner projects, so such a label can never be hit.
#[must_use]
pub fn project_aabb(
    aabb: &Aabb,
    model: &Mat4,
    view_proj: &Mat4,
    viewport: Vec2,
) -> Option<ScreenRect> {
    if !aabb.is_valid() {
        return None;
    }

    let mvp = *view_proj * *model;
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    let mut any = false;

    for corner in aabb.corners() {
        let clip = mvp * Vec4::new(corner.x, corner.y, corner.z, 1.0);
        if clip.w <= f32::EPSILON {
            continue;
        }
        let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        // NDC to pixels, y flipped.
        let px = Vec2::new(
            (ndc.x * 0.5 + 0.5) * viewport.x,
            (0.5 - ndc.y * 0.5) * viewport.y,
        );
        min = min.min(px);
        max = max.max(px);
        any = true;
    }

    any.then_some(ScreenRect { min, max })
}

/// Hit-test a cursor position against the padded projection of one box.
#[must_use]
pub fn hit_test(
    aabb: &Aabb,
    model: &Mat4,
    view_proj: &Mat4,
    viewport: Vec2,
    cursor: Vec2,
) -> bool {
    project_aabb(aabb, model, view_proj, viewport)
        .is_some_and(|rect| rect.padded(HIT_PADDING).contains(cursor))
}

/// First label whose padded projection contains the cursor.
///
/// Iterates in the caller's (fixed) order; an empty iterator — the
/// state before the font resolves — never matches.
#[must_use]
pub fn first_hit(
    labels: impl IntoIterator<Item = (Aabb, Mat4)>,
    view_proj: &Mat4,
    viewport: Vec2,
    cursor: Vec2,
) -> Option<usize> {
    labels
        .into_iter()
        .position(|(aabb, model)| {
            hit_test(&aabb, &model, view_proj, viewport, cursor)
        })
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1920.0, 1080.0);

    /// Orthographic-like setup: identity view-projection maps the box
    /// straight to NDC, making pixel expectations exact.
    fn unit_box() -> Aabb {
        Aabb::from_points([
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
        ])
    }

    #[test]
    fn projects_centered_box() {
        let rect = project_aabb(
            &unit_box(),
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
            VIEWPORT,
        )
        .unwrap();
        // NDC [-0.5, 0.5] spans the middle half of the screen.
        assert!((rect.min.x - 480.0).abs() < 1e-3);
        assert!((rect.max.x - 1440.0).abs() < 1e-3);
        assert!((rect.min.y - 270.0).abs() < 1e-3);
        assert!((rect.max.y - 810.0).abs() < 1e-3);
    }

    #[test]
    fn padding_boundary_is_inclusive_outside_misses() {
        let rect = project_aabb(
            &unit_box(),
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
            VIEWPORT,
        )
        .unwrap();
        let padded = rect.padded(HIT_PADDING);

        // 10% of the 960px width = 96px, of the 540px height = 54px.
        assert!((padded.min.x - 384.0).abs() < 1e-3);
        assert!((padded.min.y - 216.0).abs() < 1e-3);

        // Exactly on the padded edge: hit.
        assert!(padded.contains(Vec2::new(384.0, 500.0)));
        assert!(padded.contains(Vec2::new(1536.0, 500.0)));
        // Just beyond: miss.
        assert!(!padded.contains(Vec2::new(383.0, 500.0)));
        assert!(!padded.contains(Vec2::new(1537.0, 500.0)));
        assert!(!padded.contains(Vec2::new(900.0, 215.0)));
        assert!(!padded.contains(Vec2::new(900.0, 865.0)));
    }

    #[test]
    fn perspective_projection_hits_at_center() {
        // Realistic setup: the header camera looking at a label on the
        // text plane.
        let view_proj = Mat4::perspective_rh(
            45.0_f32.to_radians(),
            1920.0 / 1080.0,
            0.1,
            100.0,
        ) * Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -8.0));
        let aabb = Aabb::from_points([
            Vec3::new(-1.0, -0.2, -0.05),
            Vec3::new(1.0, 0.2, 0.05),
        ]);

        assert!(hit_test(
            &aabb,
            &model,
            &view_proj,
            VIEWPORT,
            Vec2::new(960.0, 540.0),
        ));
        // Far corner of the screen: miss.
        assert!(!hit_test(
            &aabb,
            &model,
            &view_proj,
            VIEWPORT,
            Vec2::new(40.0, 40.0),
        ));
    }

    #[test]
    fn behind_camera_never_hits() {
        let view_proj = Mat4::perspective_rh(
            45.0_f32.to_radians(),
            16.0 / 9.0,
            0.1,
            100.0,
        ) * Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        // Box behind the eye.
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, 8.0));
        assert!(project_aabb(
            &unit_box(),
            &model,
            &view_proj,
            VIEWPORT
        )
        .is_none());
    }

    #[test]
    fn first_hit_takes_fixed_order() {
        // Two overlapping boxes: index 0 wins.
        let labels = vec![
            (unit_box(), Mat4::IDENTITY),
            (unit_box(), Mat4::IDENTITY),
        ];
        let hit = first_hit(
            labels,
            &Mat4::IDENTITY,
            VIEWPORT,
            Vec2::new(960.0, 540.0),
        );
        assert_eq!(hit, Some(0));
    }

    #[test]
    fn empty_collection_never_matches() {
        let hit = first_hit(
            std::iter::empty(),
            &Mat4::IDENTITY,
            VIEWPORT,
            Vec2::new(960.0, 540.0),
        );
        assert_eq!(hit, None);
    }
}
