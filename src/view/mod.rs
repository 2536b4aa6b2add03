mod display;
mod layout;
mod sync;

pub use display::{format_fixed, Annotation, DisplayState, Marker};
pub use layout::{pixel_to_ndc, PlotFrame, PlotLayout, Rect};
pub use sync::ViewSync;
