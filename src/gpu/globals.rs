//! Shared per-frame uniform: one elapsed-time value written once per
//! frame and read by every label material. No per-label clock exists.

use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;

/// GPU layout of the shared globals uniform.
///
/// Must match the WGSL `Globals` struct in `ripple_label.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalsUniform {
    /// Elapsed time since engine start, in seconds.
    pub time: f32,
    /// Padding for vec2 alignment.
    pub(crate) _pad: f32,
    /// Surface resolution in physical pixels.
    pub resolution: [f32; 2],
}

/// Owns the globals uniform buffer and its bind group.
pub struct Globals {
    /// CPU copy of the uniform contents.
    pub uniform: GlobalsUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout (group 1 of the label pipeline).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group referencing the buffer.
    pub bind_group: wgpu::BindGroup,
}

impl Globals {
    /// Create the globals binding with time zero and the current surface
    /// resolution.
    #[must_use]
    pub fn new(context: &RenderContext) -> Self {
        let uniform = GlobalsUniform {
            time: 0.0,
            _pad: 0.0,
            resolution: [
                context.config.width as f32,
                context.config.height as f32,
            ],
        };

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Globals Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Globals Bind Group Layout"),
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
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Globals Bind Group"),
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Write the frame's elapsed time and resolution to the GPU.
    pub fn update_gpu(
        &mut self,
        queue: &wgpu::Queue,
        time: f32,
        resolution: (u32, u32),
    ) {
        self.uniform.time = time;
        self.uniform.resolution =
            [resolution.0 as f32, resolution.1 as f32];
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}
