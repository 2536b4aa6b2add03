use crate::error::ConfigError;
use crate::simulation::grid::linspace;
use crate::simulation::units::nm_to_m;
use crate::simulation::wave::{WaveModel, WaveSample};

/// One sample of the intensity-vs-displacement curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensityPoint {
    pub displacement_nm: f64,
    pub intensity: f64,
}

/// Center intensity over the whole displacement range.
/// Built once at startup; read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityProfile {
    points: Vec<IntensityPoint>,
}

impl IntensityProfile {
    pub fn points(&self) -> &[IntensityPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (first, last) displacement in nm
    pub fn displacement_range(&self) -> (f64, f64) {
        (
            self.points[0].displacement_nm,
            self.points[self.points.len() - 1].displacement_nm,
        )
    }

    /// Highest sampled intensity
    pub fn peak(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.intensity)
            .fold(0.0, f64::max)
    }
}

/// Sample the center intensity at `samples` evenly spaced displacements
/// over [min_nm, max_nm] inclusive.
pub fn build_intensity_profile(
    model: &WaveModel,
    min_nm: f64,
    max_nm: f64,
    samples: usize,
) -> Result<IntensityProfile, ConfigError> {
    if !(min_nm.is_finite() && max_nm.is_finite() && max_nm > min_nm) {
        return Err(ConfigError::InvalidDisplacementRange {
            min: min_nm,
            max: max_nm,
        });
    }
    if samples < 2 {
        return Err(ConfigError::TooFewProfileSamples { samples });
    }

    let mut scratch = WaveSample::default();
    let points = linspace(min_nm, max_nm, samples)
        .into_iter()
        .map(|displacement_nm| {
            model.compute_into(&mut scratch, nm_to_m(displacement_nm));
            IntensityPoint {
                displacement_nm,
                intensity: model.center_intensity(&scratch),
            }
        })
        .collect();

    log::debug!(
        "Intensity profile: {} samples over [{}, {}] nm",
        samples,
        min_nm,
        max_nm
    );

    Ok(IntensityProfile { points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    fn default_model() -> WaveModel {
        WaveModel::from_config(&SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_profile_sampling() {
        let model = default_model();
        let profile = build_intensity_profile(&model, 0.0, 2000.0, 800).unwrap();
        assert_eq!(profile.len(), 800);
        assert_eq!(profile.displacement_range(), (0.0, 2000.0));
        for pair in profile.points().windows(2) {
            assert!(pair[1].displacement_nm > pair[0].displacement_nm);
        }
    }

    #[test]
    fn test_intensity_bounds() {
        let model = default_model();
        let max = model.constants().max_intensity();
        let profile = build_intensity_profile(&model, 0.0, 2000.0, 800).unwrap();
        for point in profile.points() {
            assert!(point.intensity >= 0.0);
            assert!(point.intensity <= max + 1e-12, "{:?}", point);
        }
        assert!(profile.peak() <= max + 1e-12);
    }

    #[test]
    fn test_matches_wave_model() {
        let model = default_model();
        let profile = build_intensity_profile(&model, 0.0, 2000.0, 17).unwrap();
        for point in profile.points() {
            let sample = model.compute_waves(nm_to_m(point.displacement_nm));
            assert_eq!(point.intensity, model.center_intensity(&sample));
        }
    }

    #[test]
    fn test_fringe_contrast() {
        // 2000 nm covers several half-wavelength periods, so the curve swings
        // between dark fringes and bright ones
        let model = default_model();
        let max = model.constants().max_intensity();
        let profile = build_intensity_profile(&model, 0.0, 2000.0, 800).unwrap();
        assert!(profile.peak() > 0.2 * max);
        let darkest = profile
            .points()
            .iter()
            .map(|p| p.intensity)
            .fold(f64::INFINITY, f64::min);
        assert!(darkest < 0.05 * max);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let model = default_model();
        assert!(matches!(
            build_intensity_profile(&model, 10.0, 10.0, 100),
            Err(ConfigError::InvalidDisplacementRange { .. })
        ));
        assert_eq!(
            build_intensity_profile(&model, 0.0, 10.0, 1),
            Err(ConfigError::TooFewProfileSamples { samples: 1 })
        );
    }
}
