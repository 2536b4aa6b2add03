mod buffers;
mod context;
mod render;

pub use buffers::{LineBuffers, PlotVertex};
pub use context::GpuContext;
pub use render::PlotPipeline;
