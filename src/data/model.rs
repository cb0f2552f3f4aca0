use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Shape or range violations found in a loaded dataset.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("series '{series}': {labels} labels but {values} values")]
    LabelMismatch {
        series: &'static str,
        labels: usize,
        values: usize,
    },
    #[error("scatter: x has {x} values but y has {y}")]
    ScatterMismatch { x: usize, y: usize },
    #[error("series '{series}': value {value} at index {index} is negative or not finite")]
    InvalidValue {
        series: &'static str,
        index: usize,
        value: f64,
    },
    #[error("scatter: x coordinate {value} at index {index} is not finite")]
    NonFiniteCoordinate { index: usize, value: f64 },
    #[error("series lengths {found:?} differ from the running dataset's {expected:?}")]
    ShapeChanged {
        expected: [usize; 5],
        found: [usize; 5],
    },
}

fn check_values(series: &'static str, values: &[f64]) -> Result<(), DatasetError> {
    match values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        Some((index, &value)) => Err(DatasetError::InvalidValue {
            series,
            index,
            value,
        }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// NamedSeries – labelled category counts
// ---------------------------------------------------------------------------

/// An ordered category series feeding one chart. Label order is axis order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    /// Empty for unlabeled series.
    #[serde(default)]
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl NamedSeries {
    pub fn new(labels: &[&str], values: &[f64]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            values: values.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Label for index `i`, or the index itself for unlabeled series.
    pub fn label(&self, i: usize) -> String {
        self.labels
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("#{}", i + 1))
    }

    fn validate(&self, series: &'static str) -> Result<(), DatasetError> {
        if !self.labels.is_empty() && self.labels.len() != self.values.len() {
            return Err(DatasetError::LabelMismatch {
                series,
                labels: self.labels.len(),
                values: self.values.len(),
            });
        }
        check_values(series, &self.values)
    }
}

// ---------------------------------------------------------------------------
// SplitPair – storage medium split around a fixed total
// ---------------------------------------------------------------------------

/// Two-part decomposition of a total (SSD vs HDD counts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitPair {
    pub ssd: f64,
    pub hdd: f64,
}

impl SplitPair {
    pub fn total(&self) -> f64 {
        self.ssd + self.hdd
    }

    /// Re-split `total` around a new first component. The second component
    /// floors at zero, so a first component above `total` breaks the sum.
    pub fn resplit(total: f64, ssd: f64) -> Self {
        Self {
            ssd,
            hdd: (total - ssd).max(0.0),
        }
    }

    /// Share of the first component in whole percent.
    pub fn ssd_percent(&self) -> u32 {
        let total = self.total();
        if total <= 0.0 {
            return 0;
        }
        ((self.ssd / total) * 100.0).round() as u32
    }

    /// `[ssd, hdd]` in whole percent, summing to 100 unless the pair is empty.
    pub fn percent_split(&self) -> [u32; 2] {
        if self.total() <= 0.0 {
            return [0, 0];
        }
        let ssd = self.ssd_percent();
        [ssd, 100 - ssd]
    }
}

// ---------------------------------------------------------------------------
// ScatterSeries – screen size vs memory
// ---------------------------------------------------------------------------

/// Point series; `x` is fixed, only `y` is ever perturbed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl ScatterSeries {
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y]).collect()
    }
}

// ---------------------------------------------------------------------------
// LaptopDataset – the whole store
// ---------------------------------------------------------------------------

/// Every series shown on the dashboard.
///
/// Field aliases accept the long names some dataset files use
/// (`brandCounts`, `storageRatio`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaptopDataset {
    #[serde(alias = "brandCounts")]
    pub brands: NamedSeries,
    #[serde(alias = "ramDistribution")]
    pub ram: NamedSeries,
    #[serde(alias = "cpuCounts")]
    pub cpu: NamedSeries,
    #[serde(alias = "storageRatio")]
    pub storage: SplitPair,
    #[serde(alias = "resolutionPopularity")]
    pub resolution: NamedSeries,
    #[serde(default = "builtin_scatter")]
    pub scatter: ScatterSeries,
}

fn builtin_scatter() -> ScatterSeries {
    ScatterSeries {
        x: vec![11.6, 13.3, 14.0, 15.6, 17.3],
        y: vec![4.0, 8.0, 12.0, 16.0, 32.0],
    }
}

impl LaptopDataset {
    /// The fixed dataset used whenever no usable file is available.
    pub fn builtin() -> Self {
        Self {
            brands: NamedSeries::new(
                &["Dell", "HP", "Lenovo", "Apple", "Asus", "Acer", "MSI"],
                &[780.0, 720.0, 690.0, 420.0, 380.0, 330.0, 200.0],
            ),
            ram: NamedSeries::new(
                &["4GB", "8GB", "12GB", "16GB", "32GB"],
                &[260.0, 1680.0, 520.0, 980.0, 180.0],
            ),
            cpu: NamedSeries::new(
                &["Intel i3", "Intel i5", "Intel i7", "Ryzen 5", "Ryzen 7", "Apple M1/M2"],
                &[410.0, 1380.0, 940.0, 520.0, 340.0, 220.0],
            ),
            storage: SplitPair {
                ssd: 2700.0,
                hdd: 1276.0,
            },
            resolution: NamedSeries::new(
                &[
                    "1366x768",
                    "1600x900",
                    "1920x1080",
                    "2560x1600",
                    "2880x1800",
                    "3840x2160",
                ],
                &[620.0, 260.0, 1960.0, 430.0, 180.0, 200.0],
            ),
            scatter: builtin_scatter(),
        }
    }

    /// Check shape and range invariants.
    pub fn validate(&self) -> Result<(), DatasetError> {
        self.brands.validate("brands")?;
        self.ram.validate("ram")?;
        self.cpu.validate("cpu")?;
        self.resolution.validate("resolution")?;
        check_values("storage", &[self.storage.ssd, self.storage.hdd])?;
        if self.scatter.x.len() != self.scatter.y.len() {
            return Err(DatasetError::ScatterMismatch {
                x: self.scatter.x.len(),
                y: self.scatter.y.len(),
            });
        }
        if let Some((index, &value)) = self
            .scatter
            .x
            .iter()
            .enumerate()
            .find(|(_, x)| !x.is_finite())
        {
            return Err(DatasetError::NonFiniteCoordinate { index, value });
        }
        check_values("scatter", &self.scatter.y)
    }

    /// Fails when `self` has different series lengths than `expected`.
    /// Series keep their length for as long as the dashboard runs.
    pub fn check_shape(&self, expected: [usize; 5]) -> Result<(), DatasetError> {
        let found = self.shape();
        if found != expected {
            return Err(DatasetError::ShapeChanged { expected, found });
        }
        Ok(())
    }

    /// Lengths of every series, in a fixed order. Used to assert that
    /// randomization never changes shape.
    pub fn shape(&self) -> [usize; 5] {
        [
            self.brands.len(),
            self.ram.len(),
            self.cpu.len(),
            self.resolution.len(),
            self.scatter.y.len(),
        ]
    }
}

impl Default for LaptopDataset {
    fn default() -> Self {
        Self::builtin()
    }
}
