//! Viewport-responsive geometry sizing.
//!
//! All label transforms derive from a reference layout authored at
//! 1920×1080 with text size 0.5. On every resize the sizer recomputes a
//! uniform size scale (a four-bucket step function of width) and X/Y
//! position-scale factors (ratios of the frustum's visible extent at the
//! text plane against the reference viewport), then the scene re-centers
//! the label row horizontally. Everything is recomputed from the fixed
//! reference table — never adjusted incrementally — so repeated calls
//! with the same viewport cannot drift.

use glam::Vec2;

use crate::options::CameraOptions;

/// Reference viewport the layout table was authored against.
pub const REFERENCE_VIEWPORT: Vec2 = Vec2::new(1920.0, 1080.0);

/// Text size the label meshes are authored at, in world units.
pub const REFERENCE_TEXT_SIZE: f32 = 0.5;

/// Target text size for the current viewport width.
///
/// Thresholds are lower-inclusive: widths of exactly 900, 600, and 400
/// land in the larger bucket.
#[must_use]
pub fn target_text_size(width: f32) -> f32 {
    if width >= 900.0 {
        0.3
    } else if width >= 600.0 {
        0.23
    } else if width >= 400.0 {
        0.17
    } else {
        0.11
    }
}

/// Vertical visible extent of the frustum at `distance` from the camera,
/// from the standard perspective formula `2·d·tan(fovy/2)`.
#[must_use]
pub fn visible_extent(fovy_deg: f32, distance: f32) -> f32 {
    2.0 * distance * (fovy_deg.to_radians() * 0.5).tan()
}

/// Derived layout state for one viewport size.
///
/// Recomputed whole on every resize and applied to all labels from the
/// same snapshot — never partially.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Viewport width in physical pixels.
    pub width: f32,
    /// Viewport height in physical pixels.
    pub height: f32,
    /// Width / height.
    pub aspect: f32,
    /// Uniform mesh scale: target text size over the reference size.
    pub size_scale: f32,
    /// Per-axis multipliers applied to reference label positions.
    pub position_scale: Vec2,
}

impl ViewportState {
    /// Compute the layout state for a viewport, using the camera's
    /// field of view and text-plane distance for the frustum ratios.
    #[must_use]
    pub fn new(width: f32, height: f32, camera: &CameraOptions) -> Self {
        let aspect = width / height.max(1.0);
        let ref_aspect = REFERENCE_VIEWPORT.x / REFERENCE_VIEWPORT.y;

        // Visible extent at the text plane, current vs reference. The
        // fov and plane distance are fixed, so the vertical ratio is 1
        // and the horizontal ratio reduces to the aspect quotient; both
        // are still derived from the frustum formula.
        let vis_h = visible_extent(camera.fovy, camera.distance);
        let ref_vis_h = visible_extent(camera.fovy, camera.distance);
        let position_scale = Vec2::new(
            (vis_h * aspect) / (ref_vis_h * ref_aspect),
            vis_h / ref_vis_h,
        );

        Self {
            width,
            height,
            aspect,
            size_scale: target_text_size(width) / REFERENCE_TEXT_SIZE,
            position_scale,
        }
    }

    /// Scale a reference-layout position into the current viewport.
    #[must_use]
    pub fn scale_position(&self, reference: Vec2) -> Vec2 {
        reference * self.position_scale
    }
}

/// Horizontal centering offset for a set of world-space x-intervals.
///
/// Returns the shift that moves the union of the intervals so its
/// center sits at x = 0. Recomputed from scratch each call; an empty
/// set centers trivially at zero.
#[must_use]
pub fn group_center_offset(
    extents: impl IntoIterator<Item = (f32, f32)>,
) -> f32 {
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    for (lo, hi) in extents {
        min_x = min_x.min(lo);
        max_x = max_x.max(hi);
    }
    if min_x > max_x {
        return 0.0;
    }
    -(min_x + max_x) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> CameraOptions {
        CameraOptions::default()
    }

    #[test]
    fn size_scale_has_exactly_four_values() {
        let mut seen: Vec<f32> = Vec::new();
        for w in (0..2400).step_by(7) {
            let s = target_text_size(w as f32);
            if !seen.contains(&s) {
                seen.push(s);
            }
        }
        seen.sort_by(f32::total_cmp);
        assert_eq!(seen, vec![0.11, 0.17, 0.23, 0.3]);
    }

    #[test]
    fn bucket_boundaries_are_lower_inclusive() {
        assert_eq!(target_text_size(599.0), 0.17);
        assert_eq!(target_text_size(600.0), 0.23);
        assert_eq!(target_text_size(601.0), 0.23);
        assert_eq!(target_text_size(899.0), 0.23);
        assert_eq!(target_text_size(900.0), 0.3);
        assert_eq!(target_text_size(901.0), 0.3);
    }

    #[test]
    fn reference_viewport_is_identity() {
        let vp = ViewportState::new(1920.0, 1080.0, &camera());
        assert_eq!(vp.size_scale, 0.3 / 0.5);
        assert!((vp.position_scale.x - 1.0).abs() < 1e-6);
        assert!((vp.position_scale.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn narrow_viewport_compresses_x_only() {
        let vp = ViewportState::new(960.0, 1080.0, &camera());
        let expected_x = (960.0 / 1080.0) / (1920.0 / 1080.0);
        assert!((vp.position_scale.x - expected_x).abs() < 1e-6);
        assert!((vp.position_scale.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let a = ViewportState::new(1280.0, 800.0, &camera());
        let b = ViewportState::new(1280.0, 800.0, &camera());
        assert_eq!(a, b);
        let p = Vec2::new(-6.9, 3.9);
        assert_eq!(a.scale_position(p), b.scale_position(p));
    }

    #[test]
    fn home_label_matches_reference_layout() {
        // 1920×1080, HOME at (-6.9, 3.9): size scale 0.6 and position
        // scale 1.0 reproduce the reference position exactly.
        let vp = ViewportState::new(1920.0, 1080.0, &camera());
        let pos = vp.scale_position(Vec2::new(-6.9, 3.9));
        assert_eq!(vp.size_scale, 0.6);
        assert!((pos.x + 6.9).abs() < 1e-6);
        assert!((pos.y - 3.9).abs() < 1e-6);
    }

    #[test]
    fn group_offset_centers_union() {
        let offset =
            group_center_offset([(-4.0, -1.0), (1.0, 3.0), (-2.0, 0.5)]);
        // Union is [-4, 3]; center 0.5 shifts to zero.
        assert!((offset + 0.5).abs() < 1e-6);

        // Applying the offset makes min+max vanish.
        let (lo, hi) = (-4.0 + offset, 3.0 + offset);
        assert!((lo + hi).abs() < 1e-6);
    }

    #[test]
    fn label_row_centers_after_any_resize() {
        // Four labels of uneven width at the reference row, run through
        // the same pipeline the scene uses: scale positions, derive
        // world extents, apply the group offset. The union's min+max
        // must vanish for every viewport.
        let refs = [
            Vec2::new(-6.9, 3.9),
            Vec2::new(-2.3, 3.9),
            Vec2::new(2.3, 3.9),
            Vec2::new(6.9, 3.9),
        ];
        let widths = [1.4_f32, 1.7, 2.6, 2.1];

        for (w, h) in [(1920.0, 1080.0), (1024.0, 768.0), (500.0, 900.0)]
        {
            let vp = ViewportState::new(w, h, &camera());
            let extents: Vec<(f32, f32)> = refs
                .iter()
                .zip(widths)
                .map(|(r, label_w)| {
                    let x = vp.scale_position(*r).x;
                    (x, x + label_w * vp.size_scale)
                })
                .collect();
            let offset = group_center_offset(extents.clone());

            let min = extents
                .iter()
                .map(|e| e.0 + offset)
                .fold(f32::INFINITY, f32::min);
            let max = extents
                .iter()
                .map(|e| e.1 + offset)
                .fold(f32::NEG_INFINITY, f32::max);
            assert!((min + max).abs() < 1e-4, "viewport {w}x{h}");
        }
    }

    #[test]
    fn group_offset_empty_is_zero() {
        assert_eq!(group_center_offset(std::iter::empty()), 0.0);
    }

    #[test]
    fn visible_extent_formula() {
        // 45° fov at distance 8: 2·8·tan(22.5°).
        let h = visible_extent(45.0, 8.0);
        assert!((h - 16.0 * (22.5_f32).to_radians().tan()).abs() < 1e-5);
    }
}
