//! The engine context: every piece of per-window state the atom needs,
//! from the GPU device down to the animation tick counter.

/// The interactive command vocabulary.
pub mod command;
mod input;
mod options;
/// Window size tracking.
pub mod viewport;

pub use command::AtomCommand;
use viewport::ViewportState;

use crate::animation::AtomAnimator;
use crate::camera::controller::CameraController;
use crate::error::AtomVizError;
use crate::gpu::lighting::Lighting;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::postprocess::post_process::PostProcessStack;
use crate::renderer::{FrameBindings, SceneRenderer};
use crate::scene::{build_atom, AtomRig, Scene};
use crate::util::color::srgb_hex_to_linear;
use crate::util::frame_timing::FrameTiming;

/// The rendering engine for the atom visualization.
///
/// Owns the GPU context, the scene graph and its animation rig, the orbit
/// camera, the raster and post-processing passes, and the input processor.
/// A host drives it by forwarding input, calling [`resize`](Self::resize)
/// on window changes, and calling [`frame`](Self::frame) once per redraw.
pub struct AtomEngine {
    context: RenderContext,
    shader_composer: ShaderComposer,
    scene: Scene,
    rig: AtomRig,
    animator: AtomAnimator,
    /// Orbit camera and its uniform.
    pub camera_controller: CameraController,
    lighting: Lighting,
    scene_renderer: SceneRenderer,
    post_process: PostProcessStack,
    viewport: ViewportState,
    input: InputProcessor,
    /// Frame-rate tracking for the redraw loop.
    pub frame_timing: FrameTiming,
    options: Options,
}

impl AtomEngine {
    /// Create the engine for a window surface.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::Gpu`] if the surface, adapter, or device
    /// cannot be created, or [`AtomVizError::Shader`] if a shader fails to
    /// compose.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, AtomVizError> {
        let context =
            RenderContext::new(window, size, options.display.vsync).await?;
        let mut shader_composer = ShaderComposer::new()?;

        let (scene, rig) = build_atom(&options);
        let camera_controller =
            CameraController::new(&context, &options.camera);
        let lighting = Lighting::new(&context);
        let scene_renderer = SceneRenderer::new(
            &context,
            &scene,
            &camera_controller.layout,
            &lighting.layout,
            srgb_hex_to_linear(options.materials.background),
            &mut shader_composer,
        )?;
        let post_process =
            PostProcessStack::new(&context, &options, &mut shader_composer)?;

        let viewport =
            ViewportState::new(context.render_width(), context.render_height());
        log::info!(
            "engine ready: {}x{}, {} orbiting bodies",
            viewport.width,
            viewport.height,
            rig.bodies.len()
        );

        Ok(Self {
            context,
            shader_composer,
            scene,
            rig,
            animator: AtomAnimator::new(options.animation.clone()),
            camera_controller,
            lighting,
            scene_renderer,
            post_process,
            viewport,
            input: InputProcessor::with_key_bindings(
                options.keybindings.clone(),
            ),
            frame_timing: FrameTiming::new(),
            options,
        })
    }

    /// The scene graph.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Handles to the animated nodes.
    #[must_use]
    pub fn rig(&self) -> &AtomRig {
        &self.rig
    }

    /// The animation clock.
    #[must_use]
    pub fn animator(&self) -> &AtomAnimator {
        &self.animator
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// Track a new window size: reconfigure the surface, update the camera
    /// aspect, and rebuild every post-processing target.
    ///
    /// Returns `false` when the size did not change.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.viewport.update(width, height) {
            return false;
        }
        let ViewportState { width, height } = self.viewport;
        self.context.resize(width, height);
        self.camera_controller.resize(width, height);
        self.post_process.resize(&self.context);
        log::debug!("viewport resized to {width}x{height}");
        true
    }

    /// Reconfigure the surface after it was lost or became outdated.
    pub fn recover_surface(&mut self, width: u32, height: u32) {
        if !self.resize(width, height) {
            self.context.resize(self.viewport.width, self.viewport.height);
        }
    }

    /// Advance the animation one tick and step the damped camera.
    pub fn update(&mut self) {
        self.animator.advance(&mut self.scene, &mut self.rig);
        self.camera_controller.update();
    }

    /// Upload per-frame state and draw the scene through the
    /// post-processing stack into the next swapchain image.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if no swapchain image is available.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let queue = &self.context.queue;
        let world = self.scene.world_matrices();
        self.lighting.update(&self.scene, &world);
        self.lighting.update_gpu(queue);
        self.camera_controller.update_gpu(queue);
        self.scene_renderer.prepare(queue, &self.scene, &world);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        self.scene_renderer.render(
            &mut encoder,
            self.post_process.scene_view(),
            self.post_process.depth_view(),
            &FrameBindings {
                camera: &self.camera_controller.bind_group,
                lighting: &self.lighting.bind_group,
            },
        );
        self.post_process.render(&mut encoder, &view);

        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// One iteration of the frame loop: animate, then render.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if no swapchain image is available.
    pub fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.update();
        self.render()?;
        self.frame_timing.end_frame();
        Ok(())
    }
}
