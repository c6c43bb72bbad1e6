//! Engine runtime: owns the component lifecycle and drives per-frame update and render.

mod input;

use std::path::PathBuf;
use std::sync::mpsc;

use glam::Vec2;
use web_time::Instant;

use crate::animation::{ClickAnimator, ClickTiming};
use crate::camera::CameraRig;
use crate::error::NavError;
use crate::font::{self, Font, FontError};
use crate::gpu::render_context::RenderContext;
use crate::gpu::Globals;
use crate::input::PointerState;
use crate::layout::ViewportState;
use crate::navigation::{NavigationScheduler, Navigator};
use crate::options::Options;
use crate::renderer::{self, LabelRenderer};
use crate::scene::{NavItem, Scene};
use crate::util::FrameTiming;

/// Frame cap for the header — well past vsync, far below a busy loop.
const TARGET_FPS: u32 = 120;

/// Component lifecycle: label creation is gated on the asynchronous
/// font load.
enum LifecyclePhase {
    /// Waiting for the font loader thread.
    Loading(mpsc::Receiver<Result<Font, FontError>>),
    /// Labels exist; rendering and hit testing are live.
    Ready,
    /// Font load failed — the component stays inert.
    Failed,
}

/// The navigation-header rendering engine.
///
/// Owns the GPU context, the fixed camera, the label scene, the click
/// animator, and the navigation scheduler. All state is touched only
/// from the event-loop thread; the font loader is the single background
/// worker and joins in through a channel polled once per frame.
///
/// # Frame loop
///
/// Call [`render`](Self::render) every frame, [`resize`](Self::resize)
/// on window size changes, and forward pointer events through
/// [`handle_input`](Self::handle_input).
///
/// # Teardown
///
/// Dropping the engine cancels in-flight animations and the pending
/// navigation and releases every GPU resource deterministically through
/// ownership — nothing relies on garbage collection.
pub struct NavRenderEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    camera: CameraRig,
    globals: Globals,
    renderer: LabelRenderer,
    depth_view: wgpu::TextureView,

    phase: LifecyclePhase,
    items: Vec<NavItem>,
    scene: Scene,
    viewport: ViewportState,

    animator: ClickAnimator,
    scheduler: NavigationScheduler,
    navigator: Box<dyn Navigator>,

    pointer: PointerState,
    hovered: Option<usize>,

    options: Options,
    frame_timing: FrameTiming,
    started: Instant,
}

impl NavRenderEngine {
    /// Create the engine and start loading the font in the background.
    ///
    /// The window surface must outlive the engine; `size` is the
    /// initial surface size in physical pixels. Labels appear once the
    /// font at `font_path` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] if GPU initialization fails. A failing font
    /// load is not an error — the component stays inert.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        font_path: PathBuf,
        items: Vec<NavItem>,
        navigator: Box<dyn Navigator>,
        options: Options,
    ) -> Result<Self, NavError> {
        let context = RenderContext::new(window, size).await?;
        Ok(Self::init_with_context(
            context, font_path, items, navigator, options,
        ))
    }

    /// Engine from a pre-built [`RenderContext`] (for embedding or
    /// texture-only rendering).
    #[must_use]
    pub fn new_from_context(
        context: RenderContext,
        font_path: PathBuf,
        items: Vec<NavItem>,
        navigator: Box<dyn Navigator>,
        options: Options,
    ) -> Self {
        Self::init_with_context(context, font_path, items, navigator, options)
    }

    fn init_with_context(
        context: RenderContext,
        font_path: PathBuf,
        items: Vec<NavItem>,
        navigator: Box<dyn Navigator>,
        options: Options,
    ) -> Self {
        let camera = CameraRig::new(&context, &options.camera);
        let globals = Globals::new(&context);
        let renderer =
            LabelRenderer::new(&context, &camera.layout, &globals.layout);
        let (_depth_texture, depth_view) =
            renderer::create_depth_texture(&context);

        let viewport = ViewportState::new(
            context.config.width as f32,
            context.config.height as f32,
            &options.camera,
        );

        let timing = ClickTiming::from(&options.animation);
        let label_count = items.len();

        log::info!(
            "engine up: {} items, font {}",
            label_count,
            font_path.display()
        );

        Self {
            camera,
            globals,
            renderer,
            depth_view,
            phase: LifecyclePhase::Loading(font::spawn_loader(font_path)),
            scene: Scene::empty(-options.camera.distance),
            items,
            viewport,
            animator: ClickAnimator::new(timing, label_count),
            scheduler: NavigationScheduler::new(),
            navigator,
            pointer: PointerState::default(),
            hovered: None,
            options,
            frame_timing: FrameTiming::new(TARGET_FPS),
            started: Instant::now(),
            context,
        }
    }

    /// Whether the font has resolved and labels exist.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.phase, LifecyclePhase::Ready)
    }

    /// Index of the label under the cursor, if any (hover feedback).
    #[must_use]
    pub const fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Current options.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// The label scene (empty until the font resolves).
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Smoothed frames per second.
    #[must_use]
    pub const fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Poll the font loader channel; on success build the entire label
    /// set exactly once.
    fn poll_font(&mut self) {
        let LifecyclePhase::Loading(ref rx) = self.phase else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(font)) => {
                self.scene = Scene::build(
                    &self.context,
                    self.renderer.material_layout(),
                    &font,
                    &self.items,
                    &self.options.shader,
                    &self.viewport,
                    -self.options.camera.distance,
                );
                self.animator.reset(self.scene.label_count());
                self.phase = LifecyclePhase::Ready;
                log::info!(
                    "font ready, {} labels built",
                    self.scene.label_count()
                );
            }
            Ok(Err(_)) | Err(mpsc::TryRecvError::Disconnected) => {
                // Already logged by the loader; the header stays inert.
                self.phase = LifecyclePhase::Failed;
            }
            Err(mpsc::TryRecvError::Empty) => {}
        }
    }

    /// The two focal centers for this frame: configured bases plus the
    /// slow drift orbit.
    fn focal_centers(&self, time: f32) -> (Vec2, Vec2) {
        let s = &self.options.shader;
        drifted_centers(
            Vec2::from_array(s.focal_a),
            Vec2::from_array(s.focal_b),
            s.drift_radius,
            s.drift_rate,
            time,
        )
    }

    /// Per-frame updates: lifecycle poll, animation sampling, pending
    /// navigation, uniform uploads.
    fn pre_render(&mut self) {
        self.poll_font();

        let now = Instant::now();
        let time = now.saturating_duration_since(self.started).as_secs_f32();

        // Sample every label's click animation; the shader formula never
        // changes — only these multipliers do.
        for index in 0..self.scene.label_count() {
            let sample = self.animator.sample(index, now);
            let animating = self.animator.is_animating(index);
            if let Some(label) = self.scene.label_mut(index) {
                label.anim_scale = sample.scale;
                label.effect_mult = sample.effect;
                label.is_animating = animating;
            }
        }

        // Fire a due navigation (scheduled to land mid-revert).
        self.scheduler.poll(now, self.navigator.as_mut());

        self.camera.update_gpu(&self.context.queue);
        self.globals.update_gpu(
            &self.context.queue,
            time,
            (self.context.config.width, self.context.config.height),
        );

        let (focal_a, focal_b) = self.focal_centers(time);
        for label in self.scene.labels_mut() {
            label.update_gpu(&self.context.queue, focal_a, focal_b);
        }
    }

    /// Execute one frame: update state, draw the labels, present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired (the caller resizes and retries on `Lost`/`Outdated`).
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        self.pre_render();

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let bg = self.options.display.background;
            let mut rp =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("label render pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: bg[0],
                                    g: bg[1],
                                    b: bg[2],
                                    a: bg[3],
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            // Before the font resolves the scene is empty and the pass
            // just clears the background.
            self.renderer.draw(
                &mut rp,
                &self.camera.bind_group,
                &self.globals.bind_group,
                self.scene.labels(),
            );
        }
        self.context.submit(encoder);

        frame.present();
        self.frame_timing.end_frame();
        Ok(())
    }

    /// Resize all GPU surfaces, the camera projection, and the label
    /// layout. Tolerated at any time, including mid-animation — layout
    /// is recomputed from the reference table, animation multipliers
    /// ride on top.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.camera.resize(width, height);
        let (_depth_texture, depth_view) =
            renderer::create_depth_texture(&self.context);
        self.depth_view = depth_view;

        self.viewport = ViewportState::new(
            width as f32,
            height as f32,
            &self.options.camera,
        );
        self.scene.apply_layout(&self.viewport);

        // The row moved; refresh hover against the new transforms.
        self.refresh_hover();
    }
}

impl Drop for NavRenderEngine {
    fn drop(&mut self) {
        // GPU resources release through ownership; in-flight timelines
        // and the pending navigation must not outlive the component.
        self.animator.cancel_all();
        self.scheduler.cancel();
        log::debug!("engine torn down");
    }
}

/// Focal centers after the slow Lissajous drift orbit. A zero radius
/// pins the centers to their bases.
fn drifted_centers(
    base_a: Vec2,
    base_b: Vec2,
    radius: f32,
    rate: f32,
    time: f32,
) -> (Vec2, Vec2) {
    if radius == 0.0 {
        return (base_a, base_b);
    }
    let t = time * rate;
    let a = base_a
        + radius * Vec2::new(t.cos(), (t * 0.7).sin());
    let b = base_b
        + radius
            * Vec2::new(
                (t * 0.8 + std::f32::consts::PI).cos(),
                (t * 1.1 + std::f32::consts::FRAC_PI_2).sin(),
            );
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_radius_pins_centers() {
        let a = Vec2::new(-0.4, 0.25);
        let b = Vec2::new(0.45, -0.3);
        assert_eq!(drifted_centers(a, b, 0.0, 0.3, 12.5), (a, b));
    }

    #[test]
    fn drift_stays_within_radius() {
        let a = Vec2::new(-0.4, 0.25);
        let b = Vec2::new(0.45, -0.3);
        for i in 0..100 {
            let t = i as f32 * 0.37;
            let (da, db) = drifted_centers(a, b, 0.2, 0.3, t);
            assert!(da.distance(a) <= 0.2 * std::f32::consts::SQRT_2);
            assert!(db.distance(b) <= 0.2 * std::f32::consts::SQRT_2);
        }
    }

    #[test]
    fn drift_moves_over_time() {
        let a = Vec2::ZERO;
        let b = Vec2::ONE;
        let (a0, _) = drifted_centers(a, b, 0.2, 0.3, 0.0);
        let (a1, _) = drifted_centers(a, b, 0.2, 0.3, 3.0);
        assert!(a0.distance(a1) > 1e-3);
    }
}
