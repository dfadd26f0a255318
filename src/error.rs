//! Startup failures of the windowed effect.
//!
//! Particle updates and drawing have no failure modes. Errors only come
//! from opening the window and acquiring a device to draw the trails on.

use std::fmt;

/// Why the trail renderer could not be brought up.
#[derive(Debug)]
pub enum GpuError {
    /// The window could not be wrapped in a presentable surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the window's surface.
    NoAdapter(wgpu::RequestAdapterError),
    /// The adapter refused to open a device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "cannot present to window: {}", e),
            GpuError::NoAdapter(e) => write!(f, "no adapter for the window surface: {}", e),
            GpuError::DeviceCreation(e) => write!(f, "cannot open device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::NoAdapter(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestAdapterError> for GpuError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        GpuError::NoAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Failure of `App::run`.
#[derive(Debug)]
pub enum AppError {
    /// The event loop could not start, or ended abnormally.
    EventLoop(winit::error::EventLoopError),
    /// The window could not be opened.
    Window(winit::error::OsError),
    /// The trail renderer could not start.
    Gpu(GpuError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::EventLoop(e) => write!(f, "event loop: {}", e),
            AppError::Window(e) => write!(f, "window: {}", e),
            AppError::Gpu(e) => write!(f, "renderer: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::EventLoop(e) => Some(e),
            AppError::Window(e) => Some(e),
            AppError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for AppError {
    fn from(e: winit::error::EventLoopError) -> Self {
        AppError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for AppError {
    fn from(e: winit::error::OsError) -> Self {
        AppError::Window(e)
    }
}

impl From<GpuError> for AppError {
    fn from(e: GpuError) -> Self {
        AppError::Gpu(e)
    }
}
