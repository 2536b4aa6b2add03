use crate::config::SimulationConfig;
use crate::error::ConfigError;

/// Evenly spaced sample positions (metres) over which the waves are evaluated
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialGrid {
    positions: Vec<f64>,
}

impl SpatialGrid {
    /// Create `points` evenly spaced positions from `start` to `end` inclusive
    pub fn new(start: f64, end: f64, points: usize) -> Result<Self, ConfigError> {
        if points < 2 {
            return Err(ConfigError::GridTooSmall { points });
        }
        if !(start.is_finite() && end.is_finite() && end > start) {
            return Err(ConfigError::InvalidGridSpan { start, end });
        }

        let positions = linspace(start, end, points);

        // A span narrower than the float resolution would collapse neighbours
        if positions.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(ConfigError::InvalidGridSpan { start, end });
        }

        Ok(Self { positions })
    }

    /// Grid centred on zero, as configured
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let half_span = config.grid_half_span_m();
        Self::new(-half_span, half_span, config.grid_points)
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index of the observation point (x ≈ 0 on a symmetric grid)
    pub fn center_index(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn center_position(&self) -> f64 {
        self.positions[self.center_index()]
    }

    /// (first, last) position
    pub fn extent(&self) -> (f64, f64) {
        (self.positions[0], self.positions[self.positions.len() - 1])
    }
}

/// `n` evenly spaced values over [start, end]; the last one is exactly `end`
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n)
        .map(|i| {
            if i == n - 1 {
                end
            } else {
                start + i as f64 * step
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WAVELENGTH_M;

    #[test]
    fn test_grid_creation() {
        let grid = SpatialGrid::from_config(&SimulationConfig::default()).unwrap();
        assert_eq!(grid.len(), 2000);
        assert_eq!(grid.center_index(), 1000);

        let (first, last) = grid.extent();
        assert!((first + 1.5 * WAVELENGTH_M).abs() < 1e-18);
        assert_eq!(last, 1.5 * WAVELENGTH_M);
    }

    #[test]
    fn test_strictly_increasing() {
        let grid = SpatialGrid::new(-1.0, 1.0, 101).unwrap();
        for pair in grid.positions().windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_symmetric_about_center() {
        let grid = SpatialGrid::new(-1.0, 1.0, 101).unwrap();
        let c = grid.center_index();
        assert_eq!(c, 50);
        assert!(grid.center_position().abs() < 1e-12);
        for offset in 1..=50 {
            let left = grid.positions()[c - offset];
            let right = grid.positions()[c + offset];
            assert!((left + right).abs() < 1e-12);
        }
    }

    #[test]
    fn test_even_grid_center_is_not_zero() {
        // With an even count the observation point sits just right of zero
        let grid = SpatialGrid::from_config(&SimulationConfig::default()).unwrap();
        assert!(grid.center_position() > 0.0);
        assert!(grid.center_position() < WAVELENGTH_M / 100.0);
    }

    #[test]
    fn test_rejects_degenerate_grids() {
        assert_eq!(
            SpatialGrid::new(0.0, 1.0, 1),
            Err(ConfigError::GridTooSmall { points: 1 })
        );
        assert!(matches!(
            SpatialGrid::new(1.0, 1.0, 10),
            Err(ConfigError::InvalidGridSpan { .. })
        ));
        assert!(matches!(
            SpatialGrid::new(f64::NAN, 1.0, 10),
            Err(ConfigError::InvalidGridSpan { .. })
        ));
    }
}
