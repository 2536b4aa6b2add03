use crate::config::{
    DASH_SEGMENTS, FRAME_COLOR, GRID_COLOR, INTENSITY_HEADROOM, INTENSITY_PLOT_BOTTOM,
    INTENSITY_PLOT_TOP, MARKER_COLOR, MARKER_HALF_SIZE, PLOT_LEFT, PLOT_RIGHT, PROFILE_COLOR,
    SLIDER_GRAB_HALF_HEIGHT, SLIDER_KNOB_COLOR, SLIDER_KNOB_HALF_HEIGHT, SLIDER_KNOB_HALF_WIDTH,
    SLIDER_TRACK_COLOR, SLIDER_Y, SUM_COLOR, WAVE_A_COLOR, WAVE_B_COLOR, WAVE_PLOT_BOTTOM,
    WAVE_PLOT_TOP,
};
use crate::gpu::PlotVertex;
use crate::simulation::{DisplacementRange, IntensityProfile, WaveModel};
use crate::view::display::DisplayState;

/// Vertical reference line is drawn as this many pieces, every other one visible
const REFERENCE_LINE_PIECES: usize = 24;

/// Axis-aligned rectangle in normalized device coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

/// Maps a data window onto a screen rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotFrame {
    pub rect: Rect,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl PlotFrame {
    /// Data coordinates to NDC. Values outside the data window are pinned to
    /// the frame edge.
    pub fn to_ndc(&self, x: f64, y: f64) -> [f32; 2] {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        let tx = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0) as f32;
        let ty = ((y - y0) / (y1 - y0)).clamp(0.0, 1.0) as f32;
        [
            self.rect.left + tx * (self.rect.right - self.rect.left),
            self.rect.bottom + ty * (self.rect.top - self.rect.bottom),
        ]
    }
}

/// Screen arrangement: wave view on top, intensity view below, slider at the bottom
#[derive(Clone, Debug)]
pub struct PlotLayout {
    pub wave: PlotFrame,
    pub intensity: PlotFrame,
    range: DisplacementRange,
    positions: Vec<f64>,
    wavelength: f64,
    amplitude: f64,
}

impl PlotLayout {
    pub fn new(model: &WaveModel, range: DisplacementRange) -> Self {
        let constants = model.constants();
        let peak = 2.0 * constants.amplitude;

        let wave = PlotFrame {
            rect: Rect {
                left: PLOT_LEFT,
                right: PLOT_RIGHT,
                bottom: WAVE_PLOT_BOTTOM,
                top: WAVE_PLOT_TOP,
            },
            x_range: model.grid().extent(),
            y_range: (-peak, peak),
        };

        let intensity = PlotFrame {
            rect: Rect {
                left: PLOT_LEFT,
                right: PLOT_RIGHT,
                bottom: INTENSITY_PLOT_BOTTOM,
                top: INTENSITY_PLOT_TOP,
            },
            x_range: (range.min_nm, range.max_nm),
            y_range: (0.0, constants.max_intensity() * INTENSITY_HEADROOM),
        };

        Self {
            wave,
            intensity,
            range,
            positions: model.grid().positions().to_vec(),
            wavelength: constants.wavelength,
            amplitude: constants.amplitude,
        }
    }

    /// Displacement under a pointer at `ndc_x`. Not clamped.
    pub fn slider_value_at(&self, ndc_x: f32) -> f64 {
        let t = (ndc_x - PLOT_LEFT) as f64 / (PLOT_RIGHT - PLOT_LEFT) as f64;
        self.range.min_nm + t * self.range.span()
    }

    /// NDC x of the slider knob for a displacement
    pub fn slider_knob_x(&self, nm: f64) -> f32 {
        let t = ((nm - self.range.min_nm) / self.range.span()).clamp(0.0, 1.0) as f32;
        PLOT_LEFT + t * (PLOT_RIGHT - PLOT_LEFT)
    }

    /// Whether a press at `ndc` should start dragging the slider
    pub fn hit_slider(&self, ndc: [f32; 2]) -> bool {
        let [x, y] = ndc;
        let reach = SLIDER_KNOB_HALF_WIDTH;
        x >= PLOT_LEFT - reach
            && x <= PLOT_RIGHT + reach
            && (y - SLIDER_Y).abs() <= SLIDER_GRAB_HALF_HEIGHT
    }

    /// Line-list geometry for one frame
    pub fn build_scene(&self, display: &DisplayState, profile: &IntensityProfile) -> Vec<PlotVertex> {
        let mut lines = LineBatch::with_capacity(8 * self.positions.len() + 4 * profile.len());

        self.wave_view(&mut lines, display);
        self.intensity_view(&mut lines, display, profile);
        self.slider(&mut lines, display.marker.displacement_nm);

        lines.vertices
    }

    fn wave_view(&self, lines: &mut LineBatch, display: &DisplayState) {
        let frame = &self.wave;
        let (x0, x1) = frame.x_range;

        // Half-wavelength gridlines starting from zero
        let half = self.wavelength / 2.0;
        let first = (x0 / half).ceil() as i64;
        let last = (x1 / half).floor() as i64;
        for n in first..=last {
            let x = n as f64 * half;
            lines.segment(frame.to_ndc(x, frame.y_range.0), frame.to_ndc(x, frame.y_range.1), GRID_COLOR);
        }
        for y in [-self.amplitude, self.amplitude] {
            lines.segment(frame.to_ndc(x0, y), frame.to_ndc(x1, y), GRID_COLOR);
        }
        lines.segment(frame.to_ndc(x0, 0.0), frame.to_ndc(x1, 0.0), FRAME_COLOR);

        let waves = &display.waves;
        lines.polyline(self.curve(frame, &waves.wave_a), WAVE_A_COLOR);
        lines.polyline(self.curve(frame, &waves.wave_b), WAVE_B_COLOR);
        lines.dashed_polyline(self.curve(frame, &waves.sum), SUM_COLOR, DASH_SEGMENTS);

        lines.outline(frame.rect, FRAME_COLOR);
    }

    fn intensity_view(&self, lines: &mut LineBatch, display: &DisplayState, profile: &IntensityProfile) {
        let frame = &self.intensity;
        let (x0, x1) = frame.x_range;
        let (y0, y1) = frame.y_range;

        let max = 4.0 * self.amplitude * self.amplitude;
        for fraction in [0.25, 0.5, 0.75, 1.0] {
            let y = fraction * max;
            lines.segment(frame.to_ndc(x0, y), frame.to_ndc(x1, y), GRID_COLOR);
        }

        lines.polyline(
            profile
                .points()
                .iter()
                .map(|p| frame.to_ndc(p.displacement_nm, p.intensity))
                .collect(),
            PROFILE_COLOR,
        );

        // Reference line at the current displacement
        let d = display.reference_line_nm;
        let reference: Vec<[f32; 2]> = (0..=REFERENCE_LINE_PIECES)
            .map(|i| frame.to_ndc(d, y0 + (y1 - y0) * i as f64 / REFERENCE_LINE_PIECES as f64))
            .collect();
        lines.dashed_polyline(reference, MARKER_COLOR, 1);

        let [mx, my] = frame.to_ndc(display.marker.displacement_nm, display.marker.intensity);
        lines.diamond([mx, my], MARKER_HALF_SIZE, MARKER_COLOR);

        lines.outline(frame.rect, FRAME_COLOR);
    }

    fn slider(&self, lines: &mut LineBatch, nm: f64) {
        let knob = self.slider_knob_x(nm);
        lines.segment([PLOT_LEFT, SLIDER_Y], [PLOT_RIGHT, SLIDER_Y], SLIDER_TRACK_COLOR);
        // Filled part of the track, as far as the knob
        for dy in [-0.004, 0.0, 0.004] {
            lines.segment([PLOT_LEFT, SLIDER_Y + dy], [knob, SLIDER_Y + dy], SLIDER_KNOB_COLOR);
        }
        lines.outline(
            Rect {
                left: knob - SLIDER_KNOB_HALF_WIDTH,
                right: knob + SLIDER_KNOB_HALF_WIDTH,
                bottom: SLIDER_Y - SLIDER_KNOB_HALF_HEIGHT,
                top: SLIDER_Y + SLIDER_KNOB_HALF_HEIGHT,
            },
            SLIDER_KNOB_COLOR,
        );
        lines.segment(
            [knob, SLIDER_Y - SLIDER_KNOB_HALF_HEIGHT],
            [knob, SLIDER_Y + SLIDER_KNOB_HALF_HEIGHT],
            SLIDER_KNOB_COLOR,
        );
    }

    fn curve(&self, frame: &PlotFrame, values: &[f64]) -> Vec<[f32; 2]> {
        self.positions
            .iter()
            .zip(values)
            .map(|(&x, &y)| frame.to_ndc(x, y))
            .collect()
    }
}

/// Window pixel position to NDC (y up)
pub fn pixel_to_ndc(x: f64, y: f64, width: u32, height: u32) -> [f32; 2] {
    let w = width.max(1) as f64;
    let h = height.max(1) as f64;
    [(2.0 * x / w - 1.0) as f32, (1.0 - 2.0 * y / h) as f32]
}

/// Accumulates line-list vertices (two per segment)
struct LineBatch {
    vertices: Vec<PlotVertex>,
}

impl LineBatch {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    fn segment(&mut self, a: [f32; 2], b: [f32; 2], color: [f32; 4]) {
        self.vertices.push(PlotVertex::new(a, color));
        self.vertices.push(PlotVertex::new(b, color));
    }

    fn polyline(&mut self, points: Vec<[f32; 2]>, color: [f32; 4]) {
        for pair in points.windows(2) {
            self.segment(pair[0], pair[1], color);
        }
    }

    /// Alternate `dash` drawn segments with `dash` skipped ones
    fn dashed_polyline(&mut self, points: Vec<[f32; 2]>, color: [f32; 4], dash: usize) {
        let dash = dash.max(1);
        for (i, pair) in points.windows(2).enumerate() {
            if (i / dash) % 2 == 0 {
                self.segment(pair[0], pair[1], color);
            }
        }
    }

    fn outline(&mut self, rect: Rect, color: [f32; 4]) {
        let corners = [
            [rect.left, rect.bottom],
            [rect.right, rect.bottom],
            [rect.right, rect.top],
            [rect.left, rect.top],
        ];
        for i in 0..4 {
            self.segment(corners[i], corners[(i + 1) % 4], color);
        }
    }

    fn diamond(&mut self, center: [f32; 2], half: f32, color: [f32; 4]) {
        let [cx, cy] = center;
        let corners = [[cx + half, cy], [cx, cy + half], [cx - half, cy], [cx, cy - half]];
        for i in 0..4 {
            self.segment(corners[i], corners[(i + 1) % 4], color);
        }
        self.segment([cx - half, cy], [cx + half, cy], color);
        self.segment([cx, cy - half], [cx, cy + half], color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::view::ViewSync;

    fn sync() -> ViewSync {
        ViewSync::new(&SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_scene_is_line_list_on_screen() {
        let mut sync = sync();
        sync.on_displacement_changed(777.0);
        let vertices = sync.layout().build_scene(sync.display(), sync.profile());
        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 2, 0);
        for v in &vertices {
            assert!(v.position[0] >= -1.0 && v.position[0] <= 1.0);
            assert!(v.position[1] >= -1.0 && v.position[1] <= 1.0);
        }
    }

    #[test]
    fn test_marker_drawn_at_marker_position() {
        let mut sync = sync();
        sync.on_displacement_changed(100.0);
        let layout = sync.layout();
        let marker = sync.display().marker;
        let center = layout.intensity.to_ndc(marker.displacement_nm, marker.intensity);
        let vertices = layout.build_scene(sync.display(), sync.profile());

        // Horizontal stroke of the marker cross
        let left = [center[0] - MARKER_HALF_SIZE, center[1]];
        let right = [center[0] + MARKER_HALF_SIZE, center[1]];
        assert!(vertices.chunks(2).any(|seg| {
            seg[0].position == left && seg[1].position == right && seg[0].color == MARKER_COLOR
        }));
    }

    #[test]
    fn test_wave_frame_covers_double_amplitude() {
        let sync = sync();
        let frame = sync.layout().wave;
        assert!(frame.y_range.0 <= -2.0);
        assert!(frame.y_range.1 >= 2.0);
        assert!(sync.layout().intensity.y_range.1 >= 4.0);
    }

    #[test]
    fn test_to_ndc_corners_and_clamp() {
        let frame = PlotFrame {
            rect: Rect {
                left: -0.5,
                right: 0.5,
                bottom: -0.25,
                top: 0.75,
            },
            x_range: (0.0, 10.0),
            y_range: (-1.0, 1.0),
        };
        assert_eq!(frame.to_ndc(0.0, -1.0), [-0.5, -0.25]);
        assert_eq!(frame.to_ndc(10.0, 1.0), [0.5, 0.75]);
        assert_eq!(frame.to_ndc(20.0, 5.0), [0.5, 0.75]);
    }

    #[test]
    fn test_slider_mapping() {
        let sync = sync();
        let layout = sync.layout();
        assert!((layout.slider_value_at(PLOT_LEFT) - 0.0).abs() < 1e-6);
        assert!((layout.slider_value_at(PLOT_RIGHT) - 2000.0).abs() < 1e-3);
        assert!((layout.slider_value_at(0.0) - 1000.0).abs() < 1e-3);
        // Past the track end the value is left for the state to clamp
        assert!(layout.slider_value_at(1.0) > 2000.0);
        assert_eq!(layout.slider_knob_x(2000.0), PLOT_RIGHT);
    }

    #[test]
    fn test_hit_slider() {
        let sync = sync();
        let layout = sync.layout();
        assert!(layout.hit_slider([0.0, SLIDER_Y]));
        assert!(layout.hit_slider([PLOT_LEFT, SLIDER_Y + 0.05]));
        assert!(!layout.hit_slider([0.0, 0.5]));
        assert!(!layout.hit_slider([0.99, SLIDER_Y]));
    }

    #[test]
    fn test_pixel_to_ndc() {
        assert_eq!(pixel_to_ndc(0.0, 0.0, 1000, 700), [-1.0, 1.0]);
        assert_eq!(pixel_to_ndc(500.0, 350.0, 1000, 700), [0.0, 0.0]);
        assert_eq!(pixel_to_ndc(1000.0, 700.0, 1000, 700), [1.0, -1.0]);
    }
}
