mod grid;
mod intensity;
mod state;
pub mod units;
mod wave;

pub use grid::SpatialGrid;
pub use intensity::{build_intensity_profile, IntensityPoint, IntensityProfile};
pub use state::{DisplacementRange, InteractionState};
pub use wave::{PhysicalConstants, WaveModel, WaveSample};
