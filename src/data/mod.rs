/// Data layer: the dataset store, loading, and jitter.
///
/// Architecture:
/// ```text
///  data.json / .csv (optional)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate, else built-in sample
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaptopDataset │  named series, storage split, scatter
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  jitter   │  randomize in place on refresh
///   └──────────┘
/// ```

pub mod jitter;
pub mod loader;
pub mod model;
