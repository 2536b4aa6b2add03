use std::fmt;

use crate::simulation::WaveSample;

/// Values shown next to the wave view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Annotation {
    pub displacement_nm: f64,
    /// Radians
    pub phase: f64,
    pub center_intensity: f64,
}

impl Annotation {
    pub const PHASE_LAW: &'static str = "φ = 4πd/λ";

    pub fn lines(&self) -> [String; 4] {
        [
            Self::PHASE_LAW.to_string(),
            format!("d = {} nm", format_fixed(self.displacement_nm, 1)),
            format!("φ = {} rad", format_fixed(self.phase, 3)),
            format!("I ∝ {}", format_fixed(self.center_intensity, 2)),
        ]
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join(" | "))
    }
}

/// Live marker on the intensity view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub displacement_nm: f64,
    pub intensity: f64,
}

/// Everything currently on screen, derived from one displacement
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub waves: WaveSample,
    pub marker: Marker,
    /// x-position of the vertical reference line (nm)
    pub reference_line_nm: f64,
    pub annotation: Annotation,
}

/// Fixed-precision formatting with round-half-to-even.
///
/// The value is rounded at `decimals` places before formatting so the result
/// does not depend on the formatter's own tie handling. Negative zero prints
/// without a sign.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round_ties_even() / scale;
    // -0.0 + 0.0 == +0.0
    let rounded = rounded + 0.0;
    format!("{:.*}", decimals, rounded)
}
