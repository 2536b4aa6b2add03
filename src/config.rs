use crate::error::ConfigError;

// ============================================
// Physical Parameters (He-Ne laser)
// ============================================

/// Amplitude of each individual wave (arbitrary units)
pub const AMPLITUDE: f64 = 1.0;

/// Laser wavelength in metres
pub const WAVELENGTH_M: f64 = 632.8e-9;

// ============================================
// Spatial Sampling
// ============================================

/// Number of positions on the spatial axis
pub const GRID_POINTS: usize = 2000;

/// Half-width of the spatial axis in wavelengths (axis spans ±1.5 λ)
pub const GRID_HALF_SPAN_WAVELENGTHS: f64 = 1.5;

// ============================================
// Mirror Displacement (control units: nm)
// ============================================

pub const DISPLACEMENT_MIN_NM: f64 = 0.0;
pub const DISPLACEMENT_MAX_NM: f64 = 2000.0;
pub const DISPLACEMENT_INIT_NM: f64 = 0.0;

/// Samples in the precomputed intensity-vs-displacement curve
pub const PROFILE_SAMPLES: usize = 800;

/// Keyboard step sizes
pub const FINE_STEP_NM: f64 = 1.0;
pub const COARSE_STEP_NM: f64 = 50.0;

// ============================================
// Window & Plot Layout (normalized device coordinates)
// ============================================

pub const WINDOW_WIDTH: u32 = 1000;
pub const WINDOW_HEIGHT: u32 = 700;

pub const PLOT_LEFT: f32 = -0.9;
pub const PLOT_RIGHT: f32 = 0.9;

/// Wave view (top)
pub const WAVE_PLOT_BOTTOM: f32 = 0.15;
pub const WAVE_PLOT_TOP: f32 = 0.92;

/// Intensity view (bottom)
pub const INTENSITY_PLOT_BOTTOM: f32 = -0.62;
pub const INTENSITY_PLOT_TOP: f32 = 0.02;

/// Headroom above (2A)^2 on the intensity axis
pub const INTENSITY_HEADROOM: f64 = 1.05;

/// Slider track
pub const SLIDER_Y: f32 = -0.82;
pub const SLIDER_KNOB_HALF_WIDTH: f32 = 0.012;
pub const SLIDER_KNOB_HALF_HEIGHT: f32 = 0.04;
/// Vertical tolerance for grabbing the slider with the pointer
pub const SLIDER_GRAB_HALF_HEIGHT: f32 = 0.06;

/// Marker half-size on the intensity view
pub const MARKER_HALF_SIZE: f32 = 0.012;

/// Number of curve segments drawn per dash on dashed lines
pub const DASH_SEGMENTS: usize = 12;

// ============================================
// Colors (RGBA, linear)
// ============================================

pub const BACKGROUND_COLOR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};
pub const WAVE_A_COLOR: [f32; 4] = [0.85, 0.1, 0.1, 1.0];
pub const WAVE_B_COLOR: [f32; 4] = [0.1, 0.2, 0.85, 1.0];
pub const SUM_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const PROFILE_COLOR: [f32; 4] = [0.12, 0.47, 0.71, 1.0];
pub const MARKER_COLOR: [f32; 4] = [0.9, 0.0, 0.0, 1.0];
pub const FRAME_COLOR: [f32; 4] = [0.25, 0.25, 0.25, 1.0];
pub const GRID_COLOR: [f32; 4] = [0.85, 0.85, 0.85, 1.0];
pub const SLIDER_TRACK_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
pub const SLIDER_KNOB_COLOR: [f32; 4] = [0.12, 0.47, 0.71, 1.0];

/// Runtime configuration of the simulator, defaulting to the constants above.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub amplitude: f64,
    pub wavelength_m: f64,
    pub grid_points: usize,
    pub grid_half_span_wavelengths: f64,
    pub displacement_min_nm: f64,
    pub displacement_max_nm: f64,
    pub displacement_init_nm: f64,
    pub profile_samples: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            amplitude: AMPLITUDE,
            wavelength_m: WAVELENGTH_M,
            grid_points: GRID_POINTS,
            grid_half_span_wavelengths: GRID_HALF_SPAN_WAVELENGTHS,
            displacement_min_nm: DISPLACEMENT_MIN_NM,
            displacement_max_nm: DISPLACEMENT_MAX_NM,
            displacement_init_nm: DISPLACEMENT_INIT_NM,
            profile_samples: PROFILE_SAMPLES,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter before anything is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Comparisons are written so that NaN fails them.
        if !(self.amplitude.is_finite() && self.amplitude > 0.0) {
            return Err(ConfigError::InvalidAmplitude(self.amplitude));
        }
        if !(self.wavelength_m.is_finite() && self.wavelength_m > 0.0) {
            return Err(ConfigError::InvalidWavelength(self.wavelength_m));
        }
        if self.grid_points < 2 {
            return Err(ConfigError::GridTooSmall {
                points: self.grid_points,
            });
        }
        if !(self.grid_half_span_wavelengths.is_finite() && self.grid_half_span_wavelengths > 0.0)
        {
            return Err(ConfigError::InvalidGridSpan {
                start: -self.grid_half_span_wavelengths,
                end: self.grid_half_span_wavelengths,
            });
        }
        let (min, max) = (self.displacement_min_nm, self.displacement_max_nm);
        if !(min.is_finite() && max.is_finite() && max > min) {
            return Err(ConfigError::InvalidDisplacementRange { min, max });
        }
        if self.profile_samples < 2 {
            return Err(ConfigError::TooFewProfileSamples {
                samples: self.profile_samples,
            });
        }
        let init = self.displacement_init_nm;
        if !(init >= min && init <= max) {
            return Err(ConfigError::InitialOutOfRange { init, min, max });
        }
        Ok(())
    }

    /// Half-width of the spatial axis in metres
    pub fn grid_half_span_m(&self) -> f64 {
        self.grid_half_span_wavelengths * self.wavelength_m
    }
}
