//! The label render pipeline.
//!
//! One alpha-blended pipeline draws every label with the ripple shader.
//! Bind groups: 0 = camera, 1 = per-frame globals, 2 = the label's own
//! material uniform.

use crate::geometry::text_mesh::Vertex;
use crate::gpu::render_context::RenderContext;
use crate::scene::LabelMesh;

/// Depth buffer format shared by the pipeline and the engine's depth
/// texture.
pub const DEPTH_FORMAT: wgpu::TextureFormat =
    wgpu::TextureFormat::Depth32Float;

/// Pipeline and bind-group layouts for label rendering.
pub struct LabelRenderer {
    pipeline: wgpu::RenderPipeline,
    material_layout: wgpu::BindGroupLayout,
}

impl LabelRenderer {
    /// Build the pipeline against the camera and globals layouts.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        globals_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let material_layout = Self::create_material_layout(&context.device);
        let pipeline = Self::create_pipeline(
            context,
            camera_layout,
            globals_layout,
            &material_layout,
        );
        Self {
            pipeline,
            material_layout,
        }
    }

    /// Layout for per-label material bind groups (group 2).
    #[must_use]
    pub const fn material_layout(&self) -> &wgpu::BindGroupLayout {
        &self.material_layout
    }

    fn create_material_layout(
        device: &wgpu::Device,
    ) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Label Material Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX
                    | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        globals_layout: &wgpu::BindGroupLayout,
        material_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(
            wgpu::include_wgsl!("../assets/shaders/ripple_label.wgsl"),
        );

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Label Pipeline Layout"),
                bind_group_layouts: &[
                    camera_layout,
                    globals_layout,
                    material_layout,
                ],
                push_constant_ranges: &[],
            },
        );

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Label Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::LAYOUT],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    /// Draw every label in its fixed order.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        globals_bind_group: &'a wgpu::BindGroup,
        labels: impl Iterator<Item = &'a LabelMesh>,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, globals_bind_group, &[]);
        for label in labels {
            label.draw(render_pass);
        }
    }
}

/// Create the depth texture matching the current surface size.
#[must_use]
pub fn create_depth_texture(
    context: &RenderContext,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = context.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: context.config.width.max(1),
            height: context.config.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
