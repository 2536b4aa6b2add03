use crate::error::DisplacementError;
use crate::simulation::units::nm_to_m;

/// Closed range of allowed mirror displacements (nm)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacementRange {
    pub min_nm: f64,
    pub max_nm: f64,
}

impl DisplacementRange {
    pub fn new(min_nm: f64, max_nm: f64) -> Self {
        Self { min_nm, max_nm }
    }

    pub fn clamp(&self, nm: f64) -> f64 {
        nm.clamp(self.min_nm, self.max_nm)
    }

    pub fn span(&self) -> f64 {
        self.max_nm - self.min_nm
    }
}

/// The single live parameter: current mirror displacement.
///
/// Only finite values are accepted; they are clamped into range without error.
#[derive(Clone, Debug)]
pub struct InteractionState {
    displacement_nm: f64,
    range: DisplacementRange,
    dirty: bool,
}

impl InteractionState {
    /// `initial_nm` is clamped like any other input; a non-finite one falls
    /// back to the lower bound.
    pub fn new(range: DisplacementRange, initial_nm: f64) -> Self {
        let displacement_nm = if initial_nm.is_finite() {
            range.clamp(initial_nm)
        } else {
            range.min_nm
        };
        Self {
            displacement_nm,
            range,
            dirty: false,
        }
    }

    /// Current displacement in nm
    pub fn get(&self) -> f64 {
        self.displacement_nm
    }

    /// Current displacement in metres, for the wave model
    pub fn displacement_m(&self) -> f64 {
        nm_to_m(self.displacement_nm)
    }

    pub fn range(&self) -> DisplacementRange {
        self.range
    }

    /// Store a new displacement, clamped into range. Returns the stored value.
    pub fn set(&mut self, nm: f64) -> Result<f64, DisplacementError> {
        if !nm.is_finite() {
            return Err(DisplacementError::NonFinite(nm));
        }
        self.displacement_nm = self.range.clamp(nm);
        self.dirty = true;
        Ok(self.displacement_nm)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
