/// Invalid startup configuration. Reported before any window is created.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("amplitude must be positive and finite, got {0}")]
    InvalidAmplitude(f64),
    #[error("wavelength must be positive and finite, got {0} m")]
    InvalidWavelength(f64),
    #[error("spatial grid needs at least 2 points, got {points}")]
    GridTooSmall { points: usize },
    #[error("spatial grid span must be finite and increasing, got [{start}, {end}]")]
    InvalidGridSpan { start: f64, end: f64 },
    #[error("displacement range must satisfy min < max, got [{min}, {max}] nm")]
    InvalidDisplacementRange { min: f64, max: f64 },
    #[error("intensity profile needs at least 2 samples, got {samples}")]
    TooFewProfileSamples { samples: usize },
    #[error("initial displacement {init} nm lies outside [{min}, {max}] nm")]
    InitialOutOfRange { init: f64, min: f64, max: f64 },
}

/// Control input that cannot be turned into a displacement.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DisplacementError {
    #[error("displacement must be finite, got {0}")]
    NonFinite(f64),
}

/// GPU initialisation errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter found")]
    NoAdapter,
    #[error("device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,
}
