use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::*,
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::camera::Camera;
use crate::cli::Cli;
use crate::config::GalleryConfig;
use crate::error::ViewerError;
use crate::fit::TargetRect;
use crate::frame::FrameClock;
use crate::picture::PictureState;
use crate::renderer::GalleryRenderer;
use crate::scene::GalleryScene;
use crate::ui::{Overlay, OverlayInfo};
use crate::upload::{self, ImageSource, UploadPipeline};

pub const INITIAL_WINDOW_WIDTH: u32 = 1280;
pub const INITIAL_WINDOW_HEIGHT: u32 = 720;
/// Pixels of scroll that count as one wheel notch
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Default, Clone, Copy)]
struct DragState {
    rotating: bool,
    panning: bool,
    cursor: Option<PhysicalPosition<f64>>,
}

pub struct App {
    cli: Cli,
    config: GalleryConfig,
    scene: Option<GalleryScene>,
    window: Option<Arc<Window>>,
    renderer: Option<GalleryRenderer>,
    camera: Camera,
    clock: FrameClock,
    frame: TargetRect,
    /// Started once the device limits are known
    uploads: Option<UploadPipeline>,
    picture: PictureState,
    overlay: Overlay,
    drag: DragState,
}

impl App {
    pub fn new(cli: Cli, config: GalleryConfig, scene: GalleryScene) -> Self {
        let camera = Camera::new(&config.camera);
        let frame = scene.painting.frame;
        Self {
            cli,
            config,
            scene: Some(scene),
            window: None,
            renderer: None,
            camera,
            clock: FrameClock::new(),
            frame,
            uploads: None,
            picture: PictureState::new(),
            overlay: Overlay::new(),
            drag: DragState::default(),
        }
    }

    fn submit(&mut self, source: ImageSource) {
        let name = source.name();
        let submitted = match &self.uploads {
            Some(uploads) => uploads.submit(source),
            None => Err(ViewerError::WorkerUnavailable),
        };
        match submitted {
            Ok(generation) => self.picture.begin(generation, name),
            Err(e) => {
                log::error!("Cannot load {}: {}", name, e);
                self.picture.fail(&e);
            }
        }
    }

    fn submit_selection(&mut self, selection: &str) {
        match ImageSource::from_selection(selection) {
            Ok(source) => self.submit(source),
            Err(ViewerError::NoFileSelected) => log::debug!("Empty selection ignored"),
            Err(e) => self.picture.fail(&e),
        }
    }

    fn load_wall_image(&self) -> Option<image::RgbaImage> {
        let path = self.config.wall.texture.as_ref()?;
        match upload::load_rgba(path) {
            Ok(img) => {
                log::info!("Wall texture {:?}: {}x{}", path, img.width(), img.height());
                Some(img)
            }
            Err(e) => {
                log::warn!("Wall texture unavailable, using flat color: {}", e);
                None
            }
        }
    }

    fn apply_finished_uploads(&mut self) {
        let Some(uploads) = &self.uploads else {
            return;
        };
        loop {
            match uploads.poll() {
                Ok(Some(outcome)) => {
                    if let Some(picture) = self.picture.apply(outcome) {
                        if let Some(renderer) = &mut self.renderer {
                            renderer.set_picture(&picture.mips, picture.scale);
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    if self.picture.is_loading() {
                        log::error!("Upload worker stopped: {}", e);
                        self.picture.fail(&e);
                    }
                    break;
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.clock.tick();
        self.apply_finished_uploads();
        self.camera.update();

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let info = OverlayInfo {
            fps: self.clock.fps(),
            status: self.picture.status().clone(),
            scale: self.picture.scale(),
            texture_size: renderer.picture_size(),
            loading: self.picture.is_loading(),
            camera_position: self.camera.position().to_array(),
            resolution: (renderer.size().width, renderer.size().height),
        };
        let overlay = &mut self.overlay;

        match renderer.render(&self.camera, window, |ctx| overlay.show(ctx, &info)) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                let size = renderer.size();
                renderer.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::error!("Render error: {}", e),
        }

        if let Some(selection) = self.overlay.take_selection() {
            self.submit_selection(&selection);
        }
    }

    fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        let pressed = state.is_pressed();
        match button {
            MouseButton::Left => self.drag.rotating = pressed,
            MouseButton::Right | MouseButton::Middle => self.drag.panning = pressed,
            _ => {}
        }
    }

    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let previous = self.drag.cursor.replace(position);
        let Some(previous) = previous else {
            return;
        };
        let dx = (position.x - previous.x) as f32;
        let dy = (position.y - previous.y) as f32;
        let height = self
            .renderer
            .as_ref()
            .map(|r| r.size().height as f32)
            .unwrap_or(INITIAL_WINDOW_HEIGHT as f32);

        if self.drag.rotating {
            self.camera.rotate(dx, dy, height);
        } else if self.drag.panning {
            self.camera.pan(dx, dy, height);
        }
    }

    fn handle_wheel(&mut self, delta: MouseScrollDelta) {
        let steps = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
        };
        self.camera.zoom(steps);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(scene) = self.scene.take() else {
            return;
        };

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Gallery Frame")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let wall_image = self.load_wall_image();
        let renderer = match pollster::block_on(GalleryRenderer::new(
            window.clone(),
            scene,
            wall_image,
            !self.cli.no_ui,
        )) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let size = renderer.size();
        self.camera.set_viewport(size.width, size.height);
        self.uploads = Some(UploadPipeline::new(
            self.frame,
            renderer.max_texture_dimension(),
        ));
        self.window = Some(window);
        self.renderer = Some(renderer);

        if let Some(path) = self.cli.image.clone() {
            self.submit(ImageSource::Path(path));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.camera.process_keyboard(&event),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
                self.camera.set_viewport(size.width, size.height);
            }
            WindowEvent::DroppedFile(path) => self.submit(ImageSource::Path(path)),
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(state, button)
            }
            WindowEvent::CursorMoved { position, .. } => self.handle_cursor_moved(position),
            WindowEvent::CursorLeft { .. } => self.drag = DragState::default(),
            WindowEvent::MouseWheel { delta, .. } => self.handle_wheel(delta),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
