//! Chart board: the displayed, animated copy of the dataset.
//!
//! The store is never read while painting. Instead [`dispatch`] pushes a
//! snapshot into the board, where every chart tweens from what it currently
//! shows towards the new targets.

use eframe::egui;

use crate::data::model::{LaptopDataset, NamedSeries};

/// Radians the brand pie turns per ambient tick.
pub const PIE_SPIN_STEP: f64 = 0.08;

/// How long cards glow after the charts start growing in.
pub const GLOW_PULSE_SECS: f64 = 0.6;

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Tween – values animating towards a target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: Vec<f64>,
    to: Vec<f64>,
    start: f64,
    duration: f64,
    /// Extra delay per index, for staggered bars.
    stagger: f64,
}

impl Tween {
    pub fn new(values: Vec<f64>, duration: f64) -> Self {
        Self {
            from: values.clone(),
            to: values,
            start: 0.0,
            duration,
            stagger: 0.0,
        }
    }

    pub fn with_stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn target(&self) -> &[f64] {
        &self.to
    }

    /// Start animating from the current display towards `to`.
    /// A target equal to the current one leaves the tween untouched.
    pub fn retarget(&mut self, to: &[f64], now: f64) {
        if self.to == to {
            return;
        }
        self.from = if self.to.len() == to.len() {
            self.sample(now)
        } else {
            vec![0.0; to.len()]
        };
        self.to = to.to_vec();
        self.start = now;
    }

    /// Displayed values at time `now`.
    pub fn sample(&self, now: f64) -> Vec<f64> {
        self.from
            .iter()
            .zip(&self.to)
            .enumerate()
            .map(|(i, (&a, &b))| {
                let t0 = self.start + self.stagger * i as f64;
                let p = if self.duration <= 0.0 {
                    1.0
                } else {
                    (now - t0) / self.duration
                };
                a + (b - a) * ease_in_out_cubic(p)
            })
            .collect()
    }

    pub fn is_settled(&self, now: f64) -> bool {
        let last = self.stagger * self.to.len().saturating_sub(1) as f64;
        now >= self.start + last + self.duration
    }
}

// ---------------------------------------------------------------------------
// CategoryChart – labels plus one tweened bar/slice per label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChart {
    pub labels: Vec<String>,
    pub values: Tween,
}

fn display_labels(series: &NamedSeries) -> Vec<String> {
    (0..series.len()).map(|i| series.label(i)).collect()
}

impl CategoryChart {
    fn zeroed(series: &NamedSeries, duration: f64) -> Self {
        Self {
            labels: display_labels(series),
            values: Tween::new(vec![0.0; series.len()], duration),
        }
    }

    fn push(&mut self, series: &NamedSeries, now: f64) {
        let labels = display_labels(series);
        if self.labels != labels {
            self.labels = labels;
        }
        self.values.retarget(&series.values, now);
    }
}

// ---------------------------------------------------------------------------
// ChartStyle – the two ways the grid can be drawn
// ---------------------------------------------------------------------------

/// Chart rendering style, switchable from the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    /// Spinning pie, staggered processor bars, ambient motion between refreshes.
    #[default]
    Neon,
    /// Labelled donut, whole-percent storage gauge, quicker grow-in and a
    /// short glow on every chart when it appears.
    Pulse,
}

/// Grow-in durations (seconds) per chart.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Timings {
    brands: f64,
    ram: f64,
    cpu: f64,
    cpu_stagger: f64,
    resolution: f64,
    storage: f64,
    scatter: f64,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 2] = [ChartStyle::Neon, ChartStyle::Pulse];

    pub fn name(self) -> &'static str {
        match self {
            ChartStyle::Neon => "Neon",
            ChartStyle::Pulse => "Pulse",
        }
    }

    /// Case-insensitive lookup by [`ChartStyle::name`].
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(raw.trim()))
    }

    fn timings(self) -> Timings {
        match self {
            ChartStyle::Neon => Timings {
                brands: 1.6,
                ram: 1.2,
                cpu: 1.2,
                cpu_stagger: 0.12,
                resolution: 1.2,
                storage: 1.1,
                scatter: 1.0,
            },
            ChartStyle::Pulse => Timings {
                brands: 0.8,
                ram: 0.8,
                cpu: 0.9,
                cpu_stagger: 0.0,
                resolution: 1.0,
                storage: 0.7,
                scatter: 1.0,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// ChartBoard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBoard {
    pub brands: CategoryChart,
    pub ram: CategoryChart,
    pub cpu: CategoryChart,
    pub resolution: CategoryChart,
    /// `[ssd, hdd]`.
    pub storage: Tween,
    pub scatter_x: Vec<f64>,
    pub scatter_y: Tween,
    /// Brand pie start angle in radians.
    pub pie_rotation: f64,
    pub style: ChartStyle,
    /// When the charts last started growing in.
    intro_at: Option<f64>,
}

impl ChartBoard {
    /// Board showing the dataset's categories with every value at zero, so the
    /// first push animates the charts in. The brand pie grows in with the rest
    /// instead of starting at its real values.
    pub fn zeroed(ds: &LaptopDataset, style: ChartStyle) -> Self {
        let t = style.timings();
        Self {
            brands: CategoryChart::zeroed(&ds.brands, t.brands),
            ram: CategoryChart::zeroed(&ds.ram, t.ram),
            cpu: CategoryChart {
                labels: display_labels(&ds.cpu),
                values: Tween::new(vec![0.0; ds.cpu.len()], t.cpu).with_stagger(t.cpu_stagger),
            },
            resolution: CategoryChart::zeroed(&ds.resolution, t.resolution),
            storage: Tween::new(vec![0.0, 0.0], t.storage),
            scatter_x: ds.scatter.x.clone(),
            scatter_y: Tween::new(vec![0.0; ds.scatter.y.len()], t.scatter),
            pie_rotation: -std::f64::consts::FRAC_PI_2,
            style,
            intro_at: None,
        }
    }

    /// Note that the charts start growing in at `now`.
    pub fn mark_intro(&mut self, now: f64) {
        self.intro_at = Some(now);
    }

    /// Card glow strength in `[0, 1]`: full right after the intro, fading out
    /// over [`GLOW_PULSE_SECS`]. Only the pulse style glows.
    pub fn glow(&self, now: f64) -> f64 {
        match (self.style, self.intro_at) {
            (ChartStyle::Pulse, Some(t0)) if now >= t0 => {
                (1.0 - (now - t0) / GLOW_PULSE_SECS).max(0.0)
            }
            _ => 0.0,
        }
    }

    /// Point every chart at the snapshot. Reads only.
    pub fn push(&mut self, ds: &LaptopDataset, now: f64) {
        self.brands.push(&ds.brands, now);
        self.ram.push(&ds.ram, now);
        self.cpu.push(&ds.cpu, now);
        self.resolution.push(&ds.resolution, now);
        self.storage.retarget(&[ds.storage.ssd, ds.storage.hdd], now);
        if self.scatter_x != ds.scatter.x {
            self.scatter_x = ds.scatter.x.clone();
        }
        self.scatter_y.retarget(&ds.scatter.y, now);
    }

    /// Ambient motion between refreshes: spin the pie, ripple the resolution
    /// line, bounce the scatter points. Display only, neon style only.
    pub fn ambient_tick(&mut self, now: f64) {
        if self.style != ChartStyle::Neon {
            return;
        }
        self.pie_rotation += PIE_SPIN_STEP;

        let waved: Vec<f64> = self
            .resolution
            .values
            .target()
            .iter()
            .enumerate()
            .map(|(i, &v)| v + (now / 0.8 + i as f64).sin() * 2.0)
            .collect();
        self.resolution.values.retarget(&waved, now);

        let bounced: Vec<f64> = self
            .scatter_y
            .target()
            .iter()
            .zip(&self.scatter_x)
            .map(|(&y, &x)| y + (now / 0.9 + x).sin() * 0.5)
            .collect();
        self.scatter_y.retarget(&bounced, now);
    }

    pub fn is_settled(&self, now: f64) -> bool {
        let tweens = [
            &self.brands.values,
            &self.ram.values,
            &self.cpu.values,
            &self.resolution.values,
            &self.storage,
            &self.scatter_y,
        ];
        tweens.iter().all(|t| t.is_settled(now)) && self.glow(now) == 0.0
    }
}

// ---------------------------------------------------------------------------
// Redraw dispatch
// ---------------------------------------------------------------------------

/// Whoever repaints the charts once their data changed.
pub trait Redraw {
    fn request_redraw(&self);
}

impl Redraw for egui::Context {
    fn request_redraw(&self) {
        self.request_repaint();
    }
}

/// Push every series of `snapshot` into the board, then ask for a single
/// redraw so one paint shows the whole snapshot.
pub fn dispatch<R: Redraw + ?Sized>(
    snapshot: &LaptopDataset,
    board: &mut ChartBoard,
    now: f64,
    redraw: &R,
) {
    board.push(snapshot, now);
    redraw.request_redraw();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::data::jitter::randomize;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct CountingRedraw(Cell<u32>);

    impl Redraw for CountingRedraw {
        fn request_redraw(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(-3.0), 0.0);
        assert_eq!(ease_in_out_cubic(7.0), 1.0);
    }

    #[test]
    fn tween_reaches_target() {
        let mut t = Tween::new(vec![0.0, 0.0], 1.0);
        t.retarget(&[10.0, 20.0], 5.0);
        assert_eq!(t.sample(5.0), vec![0.0, 0.0]);
        assert_eq!(t.sample(6.0), vec![10.0, 20.0]);
        assert!(t.is_settled(6.0));
        assert!(!t.is_settled(5.5));
    }

    #[test]
    fn staggered_tween_starts_later_per_index() {
        let mut t = Tween::new(vec![0.0; 3], 1.0).with_stagger(0.5);
        t.retarget(&[1.0, 1.0, 1.0], 0.0);
        let mid = t.sample(1.0);
        assert_eq!(mid[0], 1.0);
        assert!(mid[1] > 0.0 && mid[1] < 1.0);
        assert!(mid[2] == 0.0);
        assert!(t.is_settled(2.0));
    }

    #[test]
    fn retarget_mid_flight_starts_from_display() {
        let mut t = Tween::new(vec![0.0], 1.0);
        t.retarget(&[100.0], 0.0);
        let shown = t.sample(0.5)[0];
        t.retarget(&[0.0], 0.5);
        assert_eq!(t.sample(0.5)[0], shown);
    }

    #[test]
    fn dispatch_pushes_everything_then_redraws_once() {
        let ds = LaptopDataset::builtin();
        let mut board = ChartBoard::zeroed(&ds, ChartStyle::Neon);
        let redraw = CountingRedraw::default();
        dispatch(&ds, &mut board, 0.0, &redraw);
        assert_eq!(redraw.0.get(), 1);
        assert_eq!(board.brands.values.target(), ds.brands.values.as_slice());
        assert_eq!(board.cpu.values.target(), ds.cpu.values.as_slice());
        assert_eq!(board.storage.target(), &[2700.0, 1276.0]);
        assert_eq!(board.scatter_y.target(), ds.scatter.y.as_slice());
    }

    #[test]
    fn dispatching_same_snapshot_twice_changes_nothing() {
        let mut rng = StdRng::seed_from_u64(9);
        let ds = randomize(&LaptopDataset::builtin(), &mut rng);
        let before = ds.clone();
        let mut board = ChartBoard::zeroed(&ds, ChartStyle::Neon);
        let redraw = CountingRedraw::default();
        dispatch(&ds, &mut board, 1.0, &redraw);
        let after_first = board.clone();
        dispatch(&ds, &mut board, 2.0, &redraw);
        assert_eq!(board, after_first);
        assert_eq!(ds, before);
    }

    #[test]
    fn ambient_tick_moves_display_only() {
        let ds = LaptopDataset::builtin();
        let mut board = ChartBoard::zeroed(&ds, ChartStyle::Neon);
        board.push(&ds, 0.0);
        let rotation = board.pie_rotation;
        board.ambient_tick(1.2);
        assert!((board.pie_rotation - rotation - PIE_SPIN_STEP).abs() < 1e-12);
        assert_ne!(board.resolution.values.target(), ds.resolution.values.as_slice());
        assert_eq!(board.brands.values.target(), ds.brands.values.as_slice());
        assert_eq!(ds, LaptopDataset::builtin());
    }

    #[test]
    fn new_dataset_shape_restarts_from_zero() {
        let ds = LaptopDataset::builtin();
        let mut board = ChartBoard::zeroed(&ds, ChartStyle::Neon);
        board.push(&ds, 0.0);
        let mut smaller = ds.clone();
        smaller.brands.labels.truncate(2);
        smaller.brands.values.truncate(2);
        board.push(&smaller, 10.0);
        assert_eq!(board.brands.labels.len(), 2);
        assert_eq!(board.brands.values.sample(10.0), vec![0.0, 0.0]);
    }

    #[test]
    fn pulse_style_grows_in_faster_without_stagger() {
        let ds = LaptopDataset::builtin();
        let mut board = ChartBoard::zeroed(&ds, ChartStyle::Pulse);
        board.push(&ds, 0.0);
        assert_eq!(board.ram.values.sample(0.8), ds.ram.values);
        assert_eq!(board.cpu.values.sample(0.9), ds.cpu.values);
        assert!(board.resolution.values.sample(0.9)[2] < 1960.0);
        assert_eq!(board.resolution.values.sample(1.0), ds.resolution.values);
        assert!(board.is_settled(1.0));

        let mut neon = ChartBoard::zeroed(&ds, ChartStyle::Neon);
        neon.push(&ds, 0.0);
        assert!(!neon.is_settled(1.0));
    }

    #[test]
    fn glow_pulses_once_after_intro() {
        let ds = LaptopDataset::builtin();
        let mut board = ChartBoard::zeroed(&ds, ChartStyle::Pulse);
        assert_eq!(board.glow(0.0), 0.0);
        board.mark_intro(1.0);
        board.push(&ds, 1.0);
        assert_eq!(board.glow(1.0), 1.0);
        assert!((board.glow(1.3) - 0.5).abs() < 1e-9);
        assert_eq!(board.glow(1.6), 0.0);
        assert!(!board.is_settled(1.59));
        assert!(board.is_settled(2.0));

        let mut neon = ChartBoard::zeroed(&ds, ChartStyle::Neon);
        neon.mark_intro(1.0);
        assert_eq!(neon.glow(1.0), 0.0);
    }

    #[test]
    fn pulse_style_has_no_ambient_motion() {
        let ds = LaptopDataset::builtin();
        let mut board = ChartBoard::zeroed(&ds, ChartStyle::Pulse);
        board.push(&ds, 0.0);
        let before = board.clone();
        board.ambient_tick(1.2);
        assert_eq!(board, before);
    }

    #[test]
    fn style_names_parse_back() {
        for style in ChartStyle::ALL {
            assert_eq!(ChartStyle::parse(style.name()), Some(style));
        }
        assert_eq!(ChartStyle::parse(" pulse "), Some(ChartStyle::Pulse));
        assert_eq!(ChartStyle::parse("plasma"), None);
    }
}
