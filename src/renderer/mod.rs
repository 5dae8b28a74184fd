//! WebGPU rendering module
//!
//! The simulation hands over a `Snapshot`; everything here is read-only
//! with respect to game state.

pub mod pipeline;
pub mod shapes;
pub mod snapshot;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{Viewport, build_vertices};
pub use snapshot::{DrawKind, DrawRect, Snapshot, snapshot};
pub use vertex::Vertex;

/// Failure to attach a display surface
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("no canvas element with id `{0}`")]
    NoCanvas(String),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    UnsupportedSurface,
}
