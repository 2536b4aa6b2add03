//! Interactive two-beam (Michelson) interferometer simulator.
//!
//! [`simulation`] holds the numerical model: wave superposition, the
//! intensity-vs-displacement curve and the clamped displacement state.
//! [`view`] keeps the displayed values in step with the displacement and lays
//! them out as line geometry; [`gpu`] and [`app`] put that on screen with
//! wgpu and winit.

pub mod app;
pub mod config;
pub mod error;
pub mod gpu;
pub mod simulation;
pub mod view;
