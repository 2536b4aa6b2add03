//! Conversion between the control unit (nanometres) and the model unit (metres).
//!
//! The slider and every plot axis speak nanometres; `WaveModel` works in metres.
//! Nothing else in the crate applies the factor.

const METRES_PER_NANOMETRE: f64 = 1e-9;

/// Nanometres to metres
pub fn nm_to_m(nm: f64) -> f64 {
    nm * METRES_PER_NANOMETRE
}

/// Metres to nanometres
pub fn m_to_nm(m: f64) -> f64 {
    m / METRES_PER_NANOMETRE
}
