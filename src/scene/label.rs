//! One clickable label: GPU geometry, material uniform, and transform
//! state.

use glam::{Mat4, Vec2, Vec3};
use wgpu::util::DeviceExt;

use super::NavItem;
use crate::geometry::{Aabb, MeshData};
use crate::gpu::render_context::RenderContext;
use crate::options::ShaderOptions;

/// GPU layout of one label's material uniform.
///
/// Must match the WGSL `LabelUniform` struct in `ripple_label.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LabelUniform {
    /// Model (translation × scale) matrix.
    pub model: [[f32; 4]; 4],
    /// Base color rgb plus base opacity in w.
    pub color: [f32; 4],
    /// First focal-point center, NDC.
    pub center_a: [f32; 2],
    /// Second focal-point center, NDC.
    pub center_b: [f32; 2],
    /// Spiral phase advance per second.
    pub speed: f32,
    /// Angular band count of each spiral field.
    pub band_count: f32,
    /// Current vertex displacement strength.
    pub distortion: f32,
    /// Current glow/opacity boost strength.
    pub ripple_intensity: f32,
}

/// One rendered navigation label.
///
/// Created exactly once per mount (after the font resolves) and owned
/// exclusively by the [`Scene`](super::Scene); the animator and hit
/// tester refer to labels by index only. Geometry never changes after
/// creation — resizes only move and scale it.
pub struct LabelMesh {
    /// The label/route pair this mesh renders.
    pub item: NavItem,
    /// Reference-layout position (x, y at the 1920×1080 authoring
    /// viewport).
    pub reference_position: Vec2,
    /// Local-space bounds of the extruded text geometry.
    pub aabb: Aabb,

    /// Current world position (sizer output plus group centering).
    pub position: Vec3,
    /// Uniform scale from the viewport sizer.
    pub base_scale: f32,
    /// Transient multiplier from the click animator.
    pub anim_scale: f32,
    /// Transient distortion/ripple multiplier from the click animator.
    pub effect_mult: f32,
    /// Whether a click animation is in flight for this label.
    pub is_animating: bool,

    /// Initial distortion strength the animator multiplies.
    pub base_distortion: f32,
    /// Initial ripple intensity the animator multiplies.
    pub base_ripple_intensity: f32,

    uniform: LabelUniform,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    bind_group: wgpu::BindGroup,
}

impl LabelMesh {
    /// Upload a label's mesh and create its material resources.
    pub fn new(
        context: &RenderContext,
        material_layout: &wgpu::BindGroupLayout,
        item: NavItem,
        reference_position: Vec2,
        mesh: &MeshData,
        shader: &ShaderOptions,
    ) -> Self {
        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Label Vertex Buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let index_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Label Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let uniform = LabelUniform {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            color: [
                shader.color[0],
                shader.color[1],
                shader.color[2],
                shader.base_opacity,
            ],
            center_a: shader.focal_a,
            center_b: shader.focal_b,
            speed: shader.speed,
            band_count: shader.band_count,
            distortion: shader.distortion_strength,
            ripple_intensity: shader.ripple_intensity,
        };
        let uniform_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Label Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );
        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: material_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                    label: Some("Label Bind Group"),
                });

        Self {
            item,
            reference_position,
            aabb: mesh.aabb,
            position: Vec3::ZERO,
            base_scale: 1.0,
            anim_scale: 1.0,
            effect_mult: 1.0,
            is_animating: false,
            base_distortion: shader.distortion_strength,
            base_ripple_intensity: shader.ripple_intensity,
            uniform,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            bind_group,
        }
    }

    /// Current model matrix: sizer base scale times the transient
    /// animation multiplier.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_scale(Vec3::splat(
                self.base_scale * self.anim_scale,
            ))
    }

    /// World-space x-interval of this label at its sizer base scale.
    ///
    /// The animation multiplier is deliberately excluded so group
    /// centering is stable while a click animation is in flight.
    #[must_use]
    pub fn base_extent_x(&self) -> (f32, f32) {
        (
            self.position.x + self.aabb.min.x * self.base_scale,
            self.position.x + self.aabb.max.x * self.base_scale,
        )
    }

    /// Refresh the material uniform and upload it.
    ///
    /// `focal_a`/`focal_b` are the frame's (drifting) focal centers; the
    /// distortion and ripple values are the label's initial values times
    /// its current animation multiplier.
    pub fn update_gpu(
        &mut self,
        queue: &wgpu::Queue,
        focal_a: Vec2,
        focal_b: Vec2,
    ) {
        self.uniform.model = self.model_matrix().to_cols_array_2d();
        self.uniform.center_a = focal_a.to_array();
        self.uniform.center_b = focal_b.to_array();
        self.uniform.distortion = self.base_distortion * self.effect_mult;
        self.uniform.ripple_intensity =
            self.base_ripple_intensity * self.effect_mult;
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Issue this label's draw call. The pipeline and shared bind
    /// groups are already set by the renderer.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.index_count == 0 {
            return;
        }
        render_pass.set_bind_group(2, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
