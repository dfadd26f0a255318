//! Window and render loop.
//!
//! Each redraw runs one frame (clear, draw and update every particle,
//! present) and then requests the next redraw. The loop stops when the
//! window closes or an optional frame limit is hit.

use std::sync::Arc;

use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::FlowConfig;
use crate::error::AppError;
use crate::gpu::GpuState;
use crate::surface::LineBatch;
use crate::system::ParticleSystem;
use crate::time::Time;

/// Builder for the windowed flow field effect.
///
/// ```ignore
/// App::new().with_title("Flow").run()?;
/// ```
pub struct App {
    title: String,
    size: (u32, u32),
    frame_limit: Option<u64>,
    config: FlowConfig,
}

impl Default for App {
    fn default() -> Self {
        Self {
            title: "Flow Field".to_string(),
            size: (1280, 720),
            frame_limit: None,
            config: FlowConfig::default(),
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Stop after rendering `frames` frames.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Replace the effect configuration.
    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    /// Open the window and run until it closes. Blocks the calling thread.
    pub fn run(self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState::new(self);
        event_loop.run_app(&mut state)?;

        info!("Stopped after {} frames", state.time.frame());
        match state.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct AppState {
    settings: App,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    system: Option<ParticleSystem>,
    batch: LineBatch,
    time: Time,
    error: Option<AppError>,
}

impl AppState {
    fn new(settings: App) -> Self {
        Self {
            settings,
            window: None,
            gpu_state: None,
            system: None,
            batch: LineBatch::new(),
            time: Time::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let (width, height) = self.settings.size;
        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        info!("Created {}x{} window", size.width, size.height);

        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            self.settings.config.background,
        ))?;

        self.system = Some(ParticleSystem::with_config(
            size.width as f32,
            size.height as f32,
            self.settings.config.clone(),
        ));
        self.gpu_state = Some(gpu_state);
        self.window = Some(window);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        // Minimized windows report zero; keep the last real size.
        if size.width == 0 || size.height == 0 {
            return;
        }
        if let Some(gpu_state) = &mut self.gpu_state {
            gpu_state.resize(size);
        }
        if let Some(system) = &mut self.system {
            system.resize(size.width as f32, size.height as f32);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu_state), Some(system)) = (&mut self.gpu_state, &mut self.system) else {
            return;
        };

        system.frame(&mut self.batch);
        if let Err(e) = gpu_state.render(&self.batch) {
            match recovery_for(&e) {
                Recovery::Reconfigure => gpu_state.reconfigure(),
                Recovery::Skip => warn!("Skipped frame: {:?}", e),
                Recovery::Exit => {
                    error!("Presenting failed, exiting: {:?}", e);
                    event_loop.exit();
                    return;
                }
            }
        }

        self.time.update();
        if let Some(fps) = self.time.take_fps_report() {
            debug!("{:.1} fps", fps);
            if let Some(window) = &self.window {
                window.set_title(&format!("{} - {:.0} fps", self.settings.title, fps));
            }
        }

        if self
            .settings
            .frame_limit
            .is_some_and(|limit| self.time.frame() >= limit)
        {
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// What the render loop does after a failed present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Recovery {
    /// Reconfigure the surface and draw again next frame.
    Reconfigure,
    /// Drop this frame and keep going.
    Skip,
    /// Stop the loop.
    Exit,
}

fn recovery_for(error: &wgpu::SurfaceError) -> Recovery {
    match error {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Recovery::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => Recovery::Exit,
        _ => Recovery::Skip,
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_defaults() {
        let app = App::new();
        assert_eq!(app.title, "Flow Field");
        assert_eq!(app.size, (1280, 720));
        assert_eq!(app.frame_limit, None);
        assert_eq!(app.config, FlowConfig::default());
    }

    #[test]
    fn test_app_builders() {
        let app = App::new()
            .with_title("Drift")
            .with_size(300, 200)
            .with_frame_limit(10)
            .with_config(FlowConfig::default().with_particle_count(5));

        assert_eq!(app.title, "Drift");
        assert_eq!(app.size, (300, 200));
        assert_eq!(app.frame_limit, Some(10));
        assert_eq!(app.config.particle_count, 5);
    }

    #[test]
    fn test_surface_error_recovery() {
        assert_eq!(recovery_for(&wgpu::SurfaceError::Lost), Recovery::Reconfigure);
        assert_eq!(recovery_for(&wgpu::SurfaceError::Outdated), Recovery::Reconfigure);
        assert_eq!(recovery_for(&wgpu::SurfaceError::Timeout), Recovery::Skip);
        assert_eq!(recovery_for(&wgpu::SurfaceError::Other), Recovery::Skip);
        assert_eq!(recovery_for(&wgpu::SurfaceError::OutOfMemory), Recovery::Exit);
    }
}
