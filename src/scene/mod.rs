//! The persistent label scene.
//!
//! A [`Scene`] owns every [`LabelMesh`] exclusively — the click animator
//! and hit tester address labels by index into the live set. Labels are
//! built exactly once per mount, after the font resource resolves, and
//! dropped exactly once with the scene.

pub mod label;

use glam::{Vec2, Vec3};

pub use label::{LabelMesh, LabelUniform};

use crate::font::Font;
use crate::geometry::text_mesh::build_text_mesh;
use crate::gpu::render_context::RenderContext;
use crate::layout::{self, ViewportState, REFERENCE_TEXT_SIZE};
use crate::options::ShaderOptions;

/// Fixed extrusion depth of the label glyphs, in world units.
pub const TEXT_DEPTH: f32 = 0.1;

/// An immutable label/route pair. The set is fixed at engine
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Rendered text.
    pub label: String,
    /// Route handed to the navigator on activation.
    pub route: String,
}

impl NavItem {
    /// Build an item from a label and route.
    #[must_use]
    pub fn new(label: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            route: route.into(),
        }
    }
}

/// The default header: four items on the reference row.
#[must_use]
pub fn default_items() -> Vec<NavItem> {
    vec![
        NavItem::new("HOME", "/"),
        NavItem::new("ABOUT", "/about"),
        NavItem::new("PROJECTS", "/projects"),
        NavItem::new("RESUME", "/resume"),
    ]
}

/// Reference layout row authored at the 1920×1080 viewport: one (x, y)
/// per default item, all on the text plane.
pub const REFERENCE_LAYOUT: [Vec2; 4] = [
    Vec2::new(-6.9, 3.9),
    Vec2::new(-2.3, 3.9),
    Vec2::new(2.3, 3.9),
    Vec2::new(6.9, 3.9),
];

/// Reference position for item `index`.
///
/// Indices beyond the authored table continue the row at its spacing so
/// a custom item set degrades gracefully.
#[must_use]
pub fn reference_position(index: usize) -> Vec2 {
    REFERENCE_LAYOUT.get(index).copied().unwrap_or_else(|| {
        let step = REFERENCE_LAYOUT[1].x - REFERENCE_LAYOUT[0].x;
        let last = REFERENCE_LAYOUT[REFERENCE_LAYOUT.len() - 1];
        Vec2::new(
            last.x + step * (index + 1 - REFERENCE_LAYOUT.len()) as f32,
            last.y,
        )
    })
}

/// Exclusive owner of the label meshes.
pub struct Scene {
    labels: Vec<LabelMesh>,
    /// Depth of the text plane (labels' z), negative of the camera
    /// distance.
    plane_z: f32,
}

impl Scene {
    /// Build every label mesh from the loaded font and lay the row out
    /// for the current viewport. Called exactly once per mount.
    pub fn build(
        context: &RenderContext,
        material_layout: &wgpu::BindGroupLayout,
        font: &Font,
        items: &[NavItem],
        shader: &ShaderOptions,
        viewport: &ViewportState,
        plane_z: f32,
    ) -> Self {
        let labels = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mesh = build_text_mesh(
                    font,
                    &item.label,
                    REFERENCE_TEXT_SIZE,
                    TEXT_DEPTH,
                );
                log::debug!(
                    "label {:?}: {} vertices, {} indices",
                    item.label,
                    mesh.vertices.len(),
                    mesh.indices.len()
                );
                LabelMesh::new(
                    context,
                    material_layout,
                    item.clone(),
                    reference_position(i),
                    &mesh,
                    shader,
                )
            })
            .collect();

        let mut scene = Self { labels, plane_z };
        scene.apply_layout(viewport);
        scene
    }

    /// An empty scene (before the font resolves, or after a failed
    /// load).
    #[must_use]
    pub const fn empty(plane_z: f32) -> Self {
        Self {
            labels: Vec::new(),
            plane_z,
        }
    }

    /// Reposition and rescale every label from the reference table for
    /// the given viewport snapshot, then re-center the row.
    ///
    /// Idempotent: always derived from the fixed reference positions,
    /// never adjusted incrementally, so repeated calls cannot drift.
    /// Animation multipliers are untouched — a resize mid-animation
    /// keeps the transient scale on top of the new base scale.
    pub fn apply_layout(&mut self, viewport: &ViewportState) {
        for label in &mut self.labels {
            let scaled =
                viewport.scale_position(label.reference_position);
            label.position = Vec3::new(scaled.x, scaled.y, self.plane_z);
            label.base_scale = viewport.size_scale;
        }

        let offset = layout::group_center_offset(
            self.labels.iter().map(LabelMesh::base_extent_x),
        );
        for label in &mut self.labels {
            label.position.x += offset;
        }
    }

    /// Number of labels (zero before the font resolves).
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Read-only label access by index.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&LabelMesh> {
        self.labels.get(index)
    }

    /// Mutable label access by index.
    pub fn label_mut(&mut self, index: usize) -> Option<&mut LabelMesh> {
        self.labels.get_mut(index)
    }

    /// Iterate labels in their fixed order.
    pub fn labels(&self) -> impl Iterator<Item = &LabelMesh> {
        self.labels.iter()
    }

    /// Iterate labels mutably in their fixed order.
    pub fn labels_mut(&mut self) -> impl Iterator<Item = &mut LabelMesh> {
        self.labels.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_items_match_reference_layout() {
        let items = default_items();
        assert_eq!(items.len(), REFERENCE_LAYOUT.len());
        assert_eq!(items[0].label, "HOME");
        assert_eq!(items[0].route, "/");
        assert_eq!(items[3].route, "/resume");
        assert_eq!(reference_position(0), Vec2::new(-6.9, 3.9));
    }

    #[test]
    fn reference_positions_extend_past_table() {
        let p4 = reference_position(4);
        let p5 = reference_position(5);
        // Continues the row at the table's spacing and height.
        assert_eq!(p4.y, 3.9);
        assert!((p5.x - p4.x - 4.6).abs() < 1e-6);
        assert!(p4.x > REFERENCE_LAYOUT[3].x);
    }

    #[test]
    fn empty_scene_has_no_labels() {
        let scene = Scene::empty(-8.0);
        assert_eq!(scene.label_count(), 0);
        assert!(scene.label(0).is_none());
    }
}
