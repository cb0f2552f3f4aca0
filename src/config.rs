use std::path::{Path, PathBuf};

use crate::background::DEFAULT_BUBBLE_COUNT;
use crate::charts::ChartStyle;
use crate::data::jitter::DEFAULT_JITTER_PCT;
use crate::data::loader::DEFAULT_DATA_FILE;

/// Seeds the jitter and bubble generator when set.
pub const SEED_ENV: &str = "LAPTOP_DASH_SEED";
/// Overrides the auto-refresh period in seconds; `0` disables it.
pub const REFRESH_ENV: &str = "LAPTOP_DASH_REFRESH_SECS";
/// Chart style to start with (`neon` or `pulse`).
pub const STYLE_ENV: &str = "LAPTOP_DASH_STYLE";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Dataset file; `None` means built-in data.
    pub data_path: Option<PathBuf>,
    pub seed: Option<u64>,
    /// Auto-refresh period in seconds.
    pub refresh_secs: Option<f64>,
    /// Ambient chart motion period.
    pub ambient_secs: f64,
    /// Delay before charts grow in from zero.
    pub intro_delay_secs: f64,
    /// How long the refresh spinner stays up.
    pub spinner_secs: f64,
    pub jitter_pct: f64,
    pub bubble_count: usize,
    pub chart_style: ChartStyle,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            seed: None,
            refresh_secs: Some(8.0),
            ambient_secs: 1.2,
            intro_delay_secs: 0.15,
            spinner_secs: 0.4,
            jitter_pct: DEFAULT_JITTER_PCT,
            bubble_count: DEFAULT_BUBBLE_COUNT,
            chart_style: ChartStyle::default(),
            window_size: [1280.0, 860.0],
        }
    }
}

impl DashboardConfig {
    /// Build from command-line arguments (program name excluded) and an
    /// environment lookup.
    ///
    /// The first argument is the dataset path. Without one, `data.json` in
    /// `cwd` is used when it exists.
    pub fn from_sources<I, F>(args: I, env: F, cwd: &Path) -> Self
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        cfg.data_path = args.into_iter().next().map(PathBuf::from).or_else(|| {
            let candidate = cwd.join(DEFAULT_DATA_FILE);
            candidate.exists().then_some(candidate)
        });

        if let Some(raw) = env(SEED_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => cfg.seed = Some(seed),
                Err(_) => log::warn!("Ignoring {SEED_ENV}={raw:?}: not an integer"),
            }
        }

        if let Some(raw) = env(REFRESH_ENV) {
            match raw.trim().parse::<f64>() {
                Ok(secs) if secs > 0.0 => cfg.refresh_secs = Some(secs),
                Ok(_) => cfg.refresh_secs = None,
                Err(_) => log::warn!("Ignoring {REFRESH_ENV}={raw:?}: not a number"),
            }
        }

        if let Some(raw) = env(STYLE_ENV) {
            match ChartStyle::parse(&raw) {
                Some(style) => cfg.chart_style = style,
                None => log::warn!("Ignoring {STYLE_ENV}={raw:?}: unknown chart style"),
            }
        }

        cfg
    }

    /// Configuration from the real process arguments and environment.
    pub fn from_env() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::from_sources(std::env::args().skip(1), |k| std::env::var(k).ok(), &cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_args_or_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DashboardConfig::from_sources(Vec::new(), no_env, dir.path());
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn first_argument_is_data_path() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DashboardConfig::from_sources(vec!["laptops.csv".to_string()], no_env, dir.path());
        assert_eq!(cfg.data_path, Some(PathBuf::from("laptops.csv")));
    }

    #[test]
    fn data_json_in_cwd_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.json"), "{}").unwrap();
        let cfg = DashboardConfig::from_sources(Vec::new(), no_env, dir.path());
        assert_eq!(cfg.data_path, Some(dir.path().join("data.json")));
    }

    #[test]
    fn env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let env = |k: &str| match k {
            SEED_ENV => Some("42".to_string()),
            REFRESH_ENV => Some("0".to_string()),
            STYLE_ENV => Some("Pulse".to_string()),
            _ => None,
        };
        let cfg = DashboardConfig::from_sources(Vec::new(), env, dir.path());
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.refresh_secs, None);
        assert_eq!(cfg.chart_style, ChartStyle::Pulse);

        let bad = |_: &str| Some("soon".to_string());
        let cfg = DashboardConfig::from_sources(Vec::new(), bad, dir.path());
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.refresh_secs, Some(8.0));
        assert_eq!(cfg.chart_style, ChartStyle::Neon);
    }
}
