use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::background::BubbleField;
use crate::charts::{dispatch, ChartBoard, ChartStyle, Redraw};
use crate::config::DashboardConfig;
use crate::data::jitter::Randomizer;
use crate::data::loader;
use crate::data::model::LaptopDataset;
use crate::schedule::{Delay, FrameLoop, Interval};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct AppState {
    /// The dataset store. Only [`AppState::refresh`] and dataset loads write it.
    pub dataset: LaptopDataset,

    /// What the charts currently show.
    pub board: ChartBoard,

    /// Drifting background bubbles.
    pub bubbles: BubbleField,

    pub randomizer: Randomizer,
    rng: StdRng,

    /// Auto-refresh timer (randomize + redraw).
    pub refresh_timer: Option<Interval>,
    /// Ambient chart motion timer.
    pub ambient_timer: Interval,
    /// Charts grow in from zero when this fires.
    pub intro: Delay,
    /// Spinner hides when this fires.
    pub spinner: Delay,
    pub frame_loop: FrameLoop,

    /// Number of randomizations so far.
    pub refreshes: u64,

    /// Where the current dataset came from, for the top bar.
    pub source_label: String,

    config: DashboardConfig,
}

impl AppState {
    /// Build the state at UI time `now`. The dataset file named in `config`
    /// is loaded here, falling back to built-in data.
    pub fn new(config: DashboardConfig, now: f64) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let dataset = loader::load_or_builtin(config.data_path.as_deref());
        let source_label = source_label(config.data_path.as_deref(), &dataset);
        let board = ChartBoard::zeroed(&dataset, config.chart_style);
        let bubbles = BubbleField::new(config.bubble_count, &mut rng);

        Self {
            dataset,
            board,
            bubbles,
            randomizer: Randomizer::new(config.jitter_pct),
            rng,
            refresh_timer: config.refresh_secs.map(|p| Interval::start(p, now)),
            ambient_timer: Interval::start(config.ambient_secs, now),
            intro: Delay::after(config.intro_delay_secs, now),
            spinner: Delay::default(),
            frame_loop: FrameLoop::start(now),
            refreshes: 0,
            source_label,
            config,
        }
    }

    /// Jitter the store once and push the result to the charts.
    pub fn refresh<R: Redraw + ?Sized>(&mut self, now: f64, redraw: &R) {
        self.randomizer.randomize(&mut self.dataset, &mut self.rng);
        self.refreshes += 1;
        self.spinner.arm(self.config.spinner_secs, now);
        log::debug!(
            "Refresh #{}: storage {}/{}",
            self.refreshes,
            self.dataset.storage.ssd,
            self.dataset.storage.hdd
        );
        dispatch(&self.dataset, &mut self.board, now, redraw);
    }

    /// Replace the store with the contents of `path` (or built-in data when it
    /// cannot be used) and animate the charts to it.
    ///
    /// Series lengths are fixed once the dashboard runs: a dataset whose shape
    /// differs from the current store is ignored and the store is kept.
    pub fn load_dataset<R: Redraw + ?Sized>(&mut self, path: &Path, now: f64, redraw: &R) {
        let loaded = loader::load_or_builtin(Some(path));
        if let Err(e) = loaded.check_shape(self.dataset.shape()) {
            log::info!("Keeping current dataset, {} not applied: {e}", path.display());
            return;
        }
        self.dataset = loaded;
        self.source_label = source_label(Some(path), &self.dataset);
        dispatch(&self.dataset, &mut self.board, now, redraw);
    }

    pub fn chart_style(&self) -> ChartStyle {
        self.board.style
    }

    /// Switch chart style. The charts restart from zero and grow in again.
    pub fn set_style<R: Redraw + ?Sized>(&mut self, style: ChartStyle, now: f64, redraw: &R) {
        if style == self.board.style {
            return;
        }
        log::debug!("Chart style: {}", style.name());
        self.board = ChartBoard::zeroed(&self.dataset, style);
        self.board.mark_intro(now);
        dispatch(&self.dataset, &mut self.board, now, redraw);
    }

    /// Run everything that is due at `now`. Called once per frame.
    pub fn tick<R: Redraw + ?Sized>(&mut self, now: f64, redraw: &R) {
        if self.intro.poll(now) {
            log::debug!("Intro: charts growing in");
            self.board.mark_intro(now);
            dispatch(&self.dataset, &mut self.board, now, redraw);
        }
        let refresh_due = self
            .refresh_timer
            .as_mut()
            .is_some_and(|t| t.poll(now));
        if refresh_due {
            self.refresh(now, redraw);
        }
        if self.ambient_timer.poll(now) {
            self.board.ambient_tick(now);
        }
        self.spinner.poll(now);
        if let Some(t) = self.frame_loop.frame(now) {
            self.bubbles.step(t, &mut self.rng);
        }
    }

    pub fn spinner_visible(&self) -> bool {
        self.spinner.is_pending()
    }

    /// Seconds until some timer needs a frame, when no animation is running.
    pub fn next_wakeup(&self, now: f64) -> Option<f64> {
        [
            self.refresh_timer.as_ref().and_then(|t| t.remaining(now)),
            self.ambient_timer.remaining(now),
            self.intro.remaining(now),
            self.spinner.remaining(now),
        ]
        .into_iter()
        .flatten()
        .reduce(f64::min)
    }

    /// Whether frames should keep coming back to back.
    pub fn is_animating(&self, now: f64) -> bool {
        self.frame_loop.is_running() || !self.board.is_settled(now)
    }

    /// Stop every timer and the frame loop.
    pub fn teardown(&mut self) {
        if let Some(t) = self.refresh_timer.as_mut() {
            t.cancel();
        }
        self.ambient_timer.cancel();
        self.intro.cancel();
        self.spinner.cancel();
        self.frame_loop.cancel();
        log::info!("Dashboard stopped after {} refreshes", self.refreshes);
    }
}

fn source_label(path: Option<&Path>, dataset: &LaptopDataset) -> String {
    match path {
        Some(p) if *dataset != LaptopDataset::builtin() => p
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| p.display().to_string()),
        _ => "sample data".to_string(),
    }
}
