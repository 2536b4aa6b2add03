use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{COARSE_STEP_NM, FINE_STEP_NM, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::RenderError;
use crate::gpu::{GpuContext, LineBuffers, PlotPipeline};
use crate::simulation::units::m_to_nm;
use crate::view::{pixel_to_ndc, ViewSync};

/// Application state
pub struct App {
    sync: ViewSync,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    lines: Option<LineBuffers>,
    pipeline: Option<PlotPipeline>,
    /// Last known pointer position (physical pixels)
    cursor: Option<PhysicalPosition<f64>>,
    /// Pointer is holding the slider
    dragging: bool,
    /// Static part of the window title
    chrome: String,
    init_error: Option<RenderError>,
}

impl App {
    pub fn new(sync: ViewSync) -> Self {
        let constants = sync.model().constants();
        let chrome = format!(
            "Michelson interferometer (λ = {:.1} nm, A = {})",
            m_to_nm(constants.wavelength),
            constants.amplitude
        );

        Self {
            sync,
            window: None,
            gpu: None,
            lines: None,
            pipeline: None,
            cursor: None,
            dragging: false,
            chrome,
            init_error: None,
        }
    }

    /// Initialisation failure that ended the event loop, if any
    pub fn take_error(&mut self) -> Option<RenderError> {
        self.init_error.take()
    }

    /// Feed a control value through the sync and schedule a frame if it changed anything
    fn set_displacement(&mut self, nm: f64) {
        self.sync.on_displacement_changed(nm);
        self.schedule_redraw();
    }

    fn nudge(&mut self, delta_nm: f64) {
        self.sync.nudge(delta_nm);
        self.schedule_redraw();
    }

    fn schedule_redraw(&mut self) {
        // winit merges repeated requests into one RedrawRequested
        if self.sync.take_redraw_request() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn render(&mut self) {
        let (Some(gpu), Some(lines), Some(pipeline)) =
            (self.gpu.as_ref(), self.lines.as_mut(), self.pipeline.as_ref())
        else {
            return;
        };

        // Always draw the newest complete display state
        let scene = self
            .sync
            .layout()
            .build_scene(self.sync.display(), self.sync.profile());
        lines.upload(&gpu.device, &gpu.queue, &scene);

        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        pipeline.draw(&mut encoder, &view, lines);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(window) = &self.window {
            window.set_title(&format!("{} | {}", self.chrome, self.sync.display().annotation));
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        let range = self.sync.state().range();
        match key_code {
            KeyCode::ArrowLeft => self.nudge(-FINE_STEP_NM),
            KeyCode::ArrowRight => self.nudge(FINE_STEP_NM),
            KeyCode::PageDown => self.nudge(-COARSE_STEP_NM),
            KeyCode::PageUp => self.nudge(COARSE_STEP_NM),
            KeyCode::Home => self.set_displacement(range.min_nm),
            KeyCode::End => self.set_displacement(range.max_nm),
            KeyCode::KeyR => {
                self.sync.reset();
                self.schedule_redraw();
                log::info!("Displacement reset");
            }
            _ => {}
        }
    }

    /// Pointer position in NDC, if the pointer is over the window
    fn cursor_ndc(&self) -> Option<[f32; 2]> {
        let cursor = self.cursor?;
        let size = self.window.as_ref()?.inner_size();
        Some(pixel_to_ndc(cursor.x, cursor.y, size.width, size.height))
    }

    fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => {
                let Some(ndc) = self.cursor_ndc() else {
                    return;
                };
                if self.sync.layout().hit_slider(ndc) {
                    self.dragging = true;
                    let value = self.sync.layout().slider_value_at(ndc[0]);
                    self.set_displacement(value);
                }
            }
            ElementState::Released => self.dragging = false,
        }
    }

    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Some(position);
        if !self.dragging {
            return;
        }
        if let Some(ndc) = self.cursor_ndc() {
            let value = self.sync.layout().slider_value_at(ndc[0]);
            self.set_displacement(value);
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RenderError) {
        log::error!("Initialisation failed: {}", error);
        self.init_error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing Michelson interferometer simulator...");

        let window_attrs = Window::default_attributes()
            .with_title(self.chrome.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Creating GPU context...");
        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => return self.fail(event_loop, e),
        };

        let scene = self
            .sync
            .layout()
            .build_scene(self.sync.display(), self.sync.profile());
        let lines = LineBuffers::new(&gpu.device, scene.len());
        let pipeline = PlotPipeline::new(&gpu.device, gpu.format());

        let (width, height) = gpu.size();
        log::info!("Initialization complete! Surface {}x{}", width, height);
        log::info!("Legend: red = wave 1, blue = wave 2, dashed black = sum");
        log::info!("Controls:");
        log::info!("  Drag slider: Move mirror");
        log::info!("  Left/Right: -/+ {} nm", FINE_STEP_NM);
        log::info!("  PageDown/PageUp: -/+ {} nm", COARSE_STEP_NM);
        log::info!("  Home/End: Range limits");
        log::info!("  R: Reset displacement");
        log::info!("  Escape: Quit");

        self.sync.take_redraw_request();
        window.request_redraw();

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.lines = Some(lines);
        self.pipeline = Some(pipeline);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(state, button);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            _ => {}
        }
    }
}
