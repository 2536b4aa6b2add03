use std::f64::consts::PI;

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::simulation::grid::SpatialGrid;

/// Amplitude, wavelength and the derived wavenumber of the light source
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalConstants {
    pub amplitude: f64,
    /// Metres
    pub wavelength: f64,
    /// k = 2π/λ
    pub wavenumber: f64,
}

impl PhysicalConstants {
    pub fn new(amplitude: f64, wavelength: f64) -> Result<Self, ConfigError> {
        if !(amplitude.is_finite() && amplitude > 0.0) {
            return Err(ConfigError::InvalidAmplitude(amplitude));
        }
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(ConfigError::InvalidWavelength(wavelength));
        }
        Ok(Self {
            amplitude,
            wavelength,
            wavenumber: 2.0 * PI / wavelength,
        })
    }

    /// Largest value the summed intensity can reach: (2A)^2
    pub fn max_intensity(&self) -> f64 {
        let peak = 2.0 * self.amplitude;
        peak * peak
    }
}

/// Both waves, their sum and the phase that produced wave B
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaveSample {
    pub wave_a: Vec<f64>,
    pub wave_b: Vec<f64>,
    pub sum: Vec<f64>,
    /// Radians
    pub phase: f64,
}

impl WaveSample {
    /// Intensity of the summed wave at one grid index
    pub fn intensity_at(&self, index: usize) -> f64 {
        let s = self.sum[index];
        s * s
    }

    /// Intensity of the summed wave along the whole grid
    pub fn intensity(&self) -> impl Iterator<Item = f64> + '_ {
        self.sum.iter().map(|s| s * s)
    }

    pub fn len(&self) -> usize {
        self.sum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sum.is_empty()
    }
}

/// Two-beam superposition over a fixed spatial grid.
///
/// Wave A is fixed; wave B picks up the round-trip phase of a mirror moved by
/// `d` metres:
///
/// ```text
/// φ = 4π d / λ
/// a(x) = A sin(kx)
/// b(x) = A sin(kx + φ)
/// ```
#[derive(Clone, Debug)]
pub struct WaveModel {
    constants: PhysicalConstants,
    grid: SpatialGrid,
    /// k·x for every grid position
    spatial_phase: Vec<f64>,
    /// A·sin(k·x); independent of displacement
    wave_a: Vec<f64>,
}

impl WaveModel {
    pub fn new(constants: PhysicalConstants, grid: SpatialGrid) -> Self {
        let spatial_phase: Vec<f64> = grid
            .positions()
            .iter()
            .map(|&x| constants.wavenumber * x)
            .collect();
        let wave_a = spatial_phase
            .iter()
            .map(|&kx| constants.amplitude * kx.sin())
            .collect();

        Self {
            constants,
            grid,
            spatial_phase,
            wave_a,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let constants = PhysicalConstants::new(config.amplitude, config.wavelength_m)?;
        let grid = SpatialGrid::from_config(config)?;
        Ok(Self::new(constants, grid))
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn center_index(&self) -> usize {
        self.grid.center_index()
    }

    pub fn center_position(&self) -> f64 {
        self.grid.center_position()
    }

    /// Phase difference for a mirror displacement in metres.
    /// Non-finite input yields a non-finite phase.
    pub fn phase(&self, displacement_m: f64) -> f64 {
        4.0 * PI * displacement_m / self.constants.wavelength
    }

    /// Evaluate both waves and their sum for a displacement in metres
    pub fn compute_waves(&self, displacement_m: f64) -> WaveSample {
        let mut sample = WaveSample::default();
        self.compute_into(&mut sample, displacement_m);
        sample
    }

    /// Same as [`compute_waves`](Self::compute_waves), reusing the buffers in `sample`
    pub fn compute_into(&self, sample: &mut WaveSample, displacement_m: f64) {
        let phase = self.phase(displacement_m);
        let amplitude = self.constants.amplitude;

        sample.wave_a.clear();
        sample.wave_a.extend_from_slice(&self.wave_a);

        sample.wave_b.clear();
        sample
            .wave_b
            .extend(self.spatial_phase.iter().map(|&kx| amplitude * (kx + phase).sin()));

        sample.sum.clear();
        sample.sum.extend(
            sample
                .wave_a
                .iter()
                .zip(&sample.wave_b)
                .map(|(a, b)| a + b),
        );

        sample.phase = phase;
    }

    /// Intensity at the observation point for an already computed sample
    pub fn center_intensity(&self, sample: &WaveSample) -> f64 {
        sample.intensity_at(self.center_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const TOL: f64 = 1e-9;

    fn default_model() -> WaveModel {
        WaveModel::from_config(&SimulationConfig::default()).unwrap()
    }

    fn assert_close(a: &[f64], b: &[f64], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            assert!((x - y).abs() < tol, "index {}: {} vs {}", i, x, y);
        }
    }

    #[test]
    fn test_output_lengths_match_grid() {
        let model = default_model();
        let sample = model.compute_waves(123e-9);
        assert_eq!(sample.wave_a.len(), model.grid().len());
        assert_eq!(sample.wave_b.len(), model.grid().len());
        assert_eq!(sample.sum.len(), model.grid().len());
    }

    #[test]
    fn test_phase_law() {
        let model = default_model();
        let lambda = model.constants().wavelength;
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let d = rng.gen_range(0.0..2.0e-6);
            let sample = model.compute_waves(d);
            let expected = 4.0 * PI * d / lambda;
            assert!((sample.phase - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_displacement() {
        let model = default_model();
        let sample = model.compute_waves(0.0);
        assert_eq!(sample.phase, 0.0);
        assert_close(&sample.wave_a, &sample.wave_b, TOL);
        let doubled: Vec<f64> = sample.wave_a.iter().map(|a| 2.0 * a).collect();
        assert_close(&sample.sum, &doubled, TOL);
    }

    #[test]
    fn test_zero_displacement_center_intensity() {
        let model = default_model();
        let sample = model.compute_waves(0.0);
        let x_c = model.center_position();
        let k = model.constants().wavenumber;
        let expected = (2.0 * (k * x_c).sin()).powi(2);
        assert!((model.center_intensity(&sample) - expected).abs() < TOL);
    }

    #[test]
    fn test_half_wavelength_periodicity() {
        let model = default_model();
        let half = model.constants().wavelength / 2.0;
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let d = rng.gen_range(0.0..1.5e-6);
            let first = model.compute_waves(d);
            let second = model.compute_waves(d + half);
            assert_close(&first.sum, &second.sum, TOL);
        }
    }

    #[test]
    fn test_quarter_wavelength_destructive() {
        let model = default_model();
        let sample = model.compute_waves(model.constants().wavelength / 4.0);
        assert!((sample.phase - PI).abs() < 1e-12);
        let negated: Vec<f64> = sample.wave_a.iter().map(|a| -a).collect();
        assert_close(&sample.wave_b, &negated, TOL);
        assert!(sample.sum.iter().all(|s| s.abs() < TOL));
        assert!(model.center_intensity(&sample) < TOL);
    }

    #[test]
    fn test_half_wavelength_restores_constructive() {
        let model = default_model();
        let zero = model.compute_waves(0.0);
        let sample = model.compute_waves(model.constants().wavelength / 2.0);
        assert!((sample.phase - 2.0 * PI).abs() < 1e-12);
        assert_close(&sample.sum, &zero.sum, TOL);
    }

    #[test]
    fn test_compute_into_matches_fresh() {
        let model = default_model();
        let mut reused = model.compute_waves(700e-9);
        model.compute_into(&mut reused, 250e-9);
        assert_eq!(reused, model.compute_waves(250e-9));
    }

    #[test]
    fn test_intensity_along_x() {
        let model = default_model();
        let sample = model.compute_waves(80e-9);
        let max = model.constants().max_intensity();
        for (i, intensity) in sample.intensity().enumerate() {
            assert_eq!(intensity, sample.intensity_at(i));
            assert!((0.0..=max + TOL).contains(&intensity));
        }
    }

    #[test]
    fn test_non_finite_propagates() {
        let model = default_model();
        let sample = model.compute_waves(f64::NAN);
        assert!(sample.phase.is_nan());
        assert!(sample.wave_b.iter().all(|b| b.is_nan()));
        assert!(sample.wave_a.iter().all(|a| a.is_finite()));
    }

    #[test]
    fn test_invalid_constants() {
        assert!(matches!(
            PhysicalConstants::new(0.0, 632.8e-9),
            Err(ConfigError::InvalidAmplitude(_))
        ));
        assert!(matches!(
            PhysicalConstants::new(1.0, -1.0),
            Err(ConfigError::InvalidWavelength(_))
        ));
    }
}
