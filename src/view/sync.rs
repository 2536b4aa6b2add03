use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::simulation::{
    build_intensity_profile, DisplacementRange, IntensityProfile, InteractionState, WaveModel,
    WaveSample,
};
use crate::view::display::{Annotation, DisplayState, Marker};
use crate::view::layout::PlotLayout;

/// Owns the live displacement and keeps every dependent view in step with it.
///
/// All writes go through [`on_displacement_changed`](Self::on_displacement_changed),
/// which rebuilds the whole [`DisplayState`] before raising a redraw request, so
/// a frame never mixes values from two displacements.
pub struct ViewSync {
    config: SimulationConfig,
    model: WaveModel,
    profile: IntensityProfile,
    layout: PlotLayout,
    state: InteractionState,
    display: DisplayState,
    redraw_requested: bool,
}

impl ViewSync {
    /// Validate the configuration, build the model and the intensity curve,
    /// and derive the initial display.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let model = WaveModel::from_config(config)?;
        let profile = build_intensity_profile(
            &model,
            config.displacement_min_nm,
            config.displacement_max_nm,
            config.profile_samples,
        )?;
        let range = DisplacementRange::new(config.displacement_min_nm, config.displacement_max_nm);
        let layout = PlotLayout::new(&model, range);
        let state = InteractionState::new(range, config.displacement_init_nm);
        let display = project(&model, state.get(), state.displacement_m(), WaveSample::default());

        Ok(Self {
            config: config.clone(),
            model,
            profile,
            layout,
            state,
            display,
            redraw_requested: true,
        })
    }

    /// Handle a new control value (nm). Out-of-range values are clamped;
    /// non-finite ones are dropped and the display keeps its last state.
    pub fn on_displacement_changed(&mut self, nm: f64) {
        let displacement_nm = match self.state.set(nm) {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Ignoring control input: {}", e);
                return;
            }
        };

        // Reuse the previous sample's buffers
        let previous = std::mem::take(&mut self.display.waves);
        self.display = project(
            &self.model,
            displacement_nm,
            self.state.displacement_m(),
            previous,
        );
        self.state.take_dirty();
        self.redraw_requested = true;

        log::debug!("{}", self.display.annotation);
    }

    /// Step relative to the current displacement
    pub fn nudge(&mut self, delta_nm: f64) {
        self.on_displacement_changed(self.state.get() + delta_nm);
    }

    /// Return to the configured initial displacement
    pub fn reset(&mut self) {
        self.on_displacement_changed(self.config.displacement_init_nm);
    }

    /// Whether the display changed since the last call; clears the request
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn profile(&self) -> &IntensityProfile {
        &self.profile
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn model(&self) -> &WaveModel {
        &self.model
    }

    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

/// Derive every displayed value from one displacement
fn project(
    model: &WaveModel,
    displacement_nm: f64,
    displacement_m: f64,
    mut waves: WaveSample,
) -> DisplayState {
    model.compute_into(&mut waves, displacement_m);
    let center_intensity = model.center_intensity(&waves);

    DisplayState {
        marker: Marker {
            displacement_nm,
            intensity: center_intensity,
        },
        reference_line_nm: displacement_nm,
        annotation: Annotation {
            displacement_nm,
            phase: waves.phase,
            center_intensity,
        },
        waves,
    }
}
