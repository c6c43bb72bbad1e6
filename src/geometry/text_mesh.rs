//! Extruded text meshes from pre-triangulated glyph outlines.
//!
//! Each glyph contributes a front face (its fill triangulation), a
//! mirrored back face, and side-wall quads swept along its contour
//! loops. Glyphs are laid out left to right by pen advance with the
//! baseline at y = 0 and the extrusion centered on z = 0. Geometry is
//! generated once per label at mount; the viewport sizer only scales
//! the finished mesh.

use glam::Vec3;

use super::Aabb;
use crate::font::Font;

/// One mesh vertex. Must match the WGSL vertex input layout.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Local-space position.
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![0 => Float32x3];

    /// Vertex buffer layout for the label pipeline.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> =
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        };
}

/// CPU-side mesh: vertex pool, triangle indices, and local bounds.
#[derive(Debug, Clone)]
pub struct MeshData {
    /// Vertex pool.
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
    /// Local-space bounds of all vertices.
    pub aabb: Aabb,
}

impl MeshData {
    fn push_vertex(&mut self, p: Vec3) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: p.to_array(),
        });
        self.aabb.union_point(p);
        idx
    }
}

/// Build an extruded mesh for `text`.
///
/// `size` is the rendered em height in world units (labels are authored
/// at the reference size and scaled by the viewport sizer afterwards);
/// `depth` is the fixed extrusion depth. Characters missing from the
/// font advance the pen and emit no geometry.
#[must_use]
pub fn build_text_mesh(
    font: &Font,
    text: &str,
    size: f32,
    depth: f32,
) -> MeshData {
    let mut mesh = MeshData {
        vertices: Vec::new(),
        indices: Vec::new(),
        aabb: Aabb::EMPTY,
    };

    let em = size / font.units_per_em;
    let half_depth = depth * 0.5;
    let mut pen_x = 0.0_f32;

    for c in text.chars() {
        let Some(glyph) = font.glyph(c) else {
            pen_x += font.missing_advance() * em;
            continue;
        };

        // Front outline ring at +z, back ring at -z. The glyph's vertex
        // pool maps to two contiguous runs so contour indices stay valid
        // with a fixed offset.
        let base = mesh.vertices.len() as u32;
        for &[x, y] in &glyph.vertices {
            let _ = mesh.push_vertex(Vec3::new(
                pen_x + x * em,
                y * em,
                half_depth,
            ));
        }
        let back = mesh.vertices.len() as u32;
        for &[x, y] in &glyph.vertices {
            let _ = mesh.push_vertex(Vec3::new(
                pen_x + x * em,
                y * em,
                -half_depth,
            ));
        }

        // Front face keeps the fill winding; back face reverses it so
        // both faces point outward.
        for &[a, b, c_idx] in &glyph.triangles {
            mesh.indices
                .extend_from_slice(&[base + a, base + b, base + c_idx]);
            mesh.indices.extend_from_slice(&[
                back + a,
                back + c_idx,
                back + b,
            ]);
        }

        // Side walls: one quad per contour edge.
        for loop_ in &glyph.contours {
            for (i, &v0) in loop_.iter().enumerate() {
                let v1 = loop_[(i + 1) % loop_.len()];
                let (f0, f1) = (base + v0, base + v1);
                let (b0, b1) = (back + v0, back + v1);
                mesh.indices.extend_from_slice(&[f0, f1, b1]);
                mesh.indices.extend_from_slice(&[f0, b1, b0]);
            }
        }

        pen_x += glyph.advance * em;
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::tests::square_font;

    #[test]
    fn extrudes_front_back_and_sides() {
        let font = square_font();
        let mesh = build_text_mesh(&font, "I", 0.5, 0.1);

        // 4 outline vertices duplicated front/back.
        assert_eq!(mesh.vertices.len(), 8);
        // 2 fill triangles front + 2 back + (4 contour edges × 2) sides.
        assert_eq!(mesh.indices.len(), (2 + 2 + 8) * 3);
        // Every index stays in the pool.
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn bounds_match_scaled_outline() {
        let font = square_font();
        let mesh = build_text_mesh(&font, "I", 0.5, 0.1);
        // 400/1000 em wide, 700/1000 em tall at size 0.5.
        assert!((mesh.aabb.max.x - 0.2).abs() < 1e-6);
        assert!((mesh.aabb.max.y - 0.35).abs() < 1e-6);
        assert!((mesh.aabb.min.z + 0.05).abs() < 1e-6);
        assert!((mesh.aabb.max.z - 0.05).abs() < 1e-6);
    }

    #[test]
    fn advance_offsets_following_glyphs() {
        let font = square_font();
        let single = build_text_mesh(&font, "I", 0.5, 0.1);
        let double = build_text_mesh(&font, "II", 0.5, 0.1);
        // Second glyph starts one advance (600/1000 em) to the right.
        let advance = 0.5 * 600.0 / 1000.0;
        assert!(
            (double.aabb.max.x - (single.aabb.max.x + advance)).abs()
                < 1e-6
        );
    }

    #[test]
    fn missing_glyphs_advance_without_geometry() {
        let font = square_font();
        let with_gap = build_text_mesh(&font, "I I", 0.5, 0.1);
        let without = build_text_mesh(&font, "II", 0.5, 0.1);
        // Same vertex count, wider bounds.
        assert_eq!(with_gap.vertices.len(), without.vertices.len());
        assert!(with_gap.aabb.max.x > without.aabb.max.x);
    }

    #[test]
    fn unknown_text_yields_empty_mesh() {
        let font = square_font();
        let mesh = build_text_mesh(&font, "??", 0.5, 0.1);
        assert!(mesh.vertices.is_empty());
        assert!(!mesh.aabb.is_valid());
    }
}
