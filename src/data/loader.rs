use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{LaptopDataset, NamedSeries, ScatterSeries, SplitPair};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_DATA_FILE: &str = "data.json";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a laptop dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – one object with `brands`, `ram`, `cpu`, `storage`,
///   `resolution` and optionally `scatter`
/// * `.csv`  – `series,label,value` rows
pub fn load_file(path: &Path) -> Result<LaptopDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    dataset
        .validate()
        .with_context(|| format!("validating {}", path.display()))?;
    Ok(dataset)
}

/// Load `path` if given and usable, otherwise the built-in dataset.
///
/// Never fails: a missing, unreadable or malformed file only leaves a log line.
pub fn load_or_builtin(path: Option<&Path>) -> LaptopDataset {
    let Some(path) = path else {
        log::info!("No dataset file, using built-in sample data");
        return LaptopDataset::builtin();
    };
    match load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded dataset from {} ({} brands, {} resolutions)",
                path.display(),
                dataset.brands.len(),
                dataset.resolution.len()
            );
            dataset
        }
        Err(e) => {
            log::info!("Falling back to built-in sample data: {e:#}");
            LaptopDataset::builtin()
        }
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// {
///   "brands":     { "labels": ["Dell", ...], "values": [780, ...] },
///   "ram":        { "labels": [...], "values": [...] },
///   "cpu":        { "labels": [...], "values": [...] },
///   "storage":    { "ssd": 2700, "hdd": 1276 },
///   "resolution": { "labels": [...], "values": [...] },
///   "scatter":    { "x": [11.6, ...], "y": [4, ...] }
/// }
/// ```
fn load_json(path: &Path) -> Result<LaptopDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<LaptopDataset> {
    serde_json::from_str(text).context("parsing JSON dataset")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header `series,label,value`.
/// * `brands`, `ram`, `cpu`, `resolution` – one row per category
/// * `storage` – rows labelled `ssd` and `hdd`
/// * `scatter` – label is the x coordinate, value is y
///
/// Series missing from the file keep their built-in values.
fn load_csv(path: &Path) -> Result<LaptopDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    parse_csv(reader)
}

fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<LaptopDataset> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let series_idx = column("series")?;
    let label_idx = column("label")?;
    let value_idx = column("value")?;

    let mut brands = Vec::new();
    let mut ram = Vec::new();
    let mut cpu = Vec::new();
    let mut resolution = Vec::new();
    let mut storage: (Option<f64>, Option<f64>) = (None, None);
    let mut scatter: Vec<(f64, f64)> = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let series = record.get(series_idx).unwrap_or("").trim();
        let label = record.get(label_idx).unwrap_or("").trim().to_string();
        let raw = record.get(value_idx).unwrap_or("").trim();
        let value: f64 = raw
            .parse()
            .with_context(|| format!("Row {row_no}: '{raw}' is not a number"))?;

        match series {
            "brands" => brands.push((label, value)),
            "ram" => ram.push((label, value)),
            "cpu" => cpu.push((label, value)),
            "resolution" => resolution.push((label, value)),
            "storage" => match label.to_ascii_lowercase().as_str() {
                "ssd" => storage.0 = Some(value),
                "hdd" => storage.1 = Some(value),
                other => bail!("Row {row_no}: unknown storage label '{other}'"),
            },
            "scatter" => {
                let x: f64 = label
                    .parse()
                    .with_context(|| format!("Row {row_no}: scatter x '{label}' is not a number"))?;
                scatter.push((x, value));
            }
            other => bail!("Row {row_no}: unknown series '{other}'"),
        }
    }

    let mut dataset = LaptopDataset::builtin();
    for (target, rows) in [
        (&mut dataset.brands, brands),
        (&mut dataset.ram, ram),
        (&mut dataset.cpu, cpu),
        (&mut dataset.resolution, resolution),
    ] {
        if !rows.is_empty() {
            *target = collect_series(rows);
        }
    }
    match storage {
        (Some(ssd), Some(hdd)) => dataset.storage = SplitPair { ssd, hdd },
        (None, None) => {}
        _ => bail!("CSV storage needs both 'ssd' and 'hdd' rows"),
    }
    if !scatter.is_empty() {
        dataset.scatter = ScatterSeries {
            x: scatter.iter().map(|p| p.0).collect(),
            y: scatter.iter().map(|p| p.1).collect(),
        };
    }
    Ok(dataset)
}

fn collect_series(rows: Vec<(String, f64)>) -> NamedSeries {
    let (labels, values) = rows.into_iter().unzip();
    NamedSeries { labels, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let ds = load_or_builtin(Some(&dir.path().join("data.json")));
        assert_eq!(ds, LaptopDataset::builtin());
        assert_eq!(ds.brands.labels[0], "Dell");
        assert_eq!(ds.brands.values[0], 780.0);
        assert_eq!(ds.brands.values[1], 720.0);
        assert_eq!(load_or_builtin(None), LaptopDataset::builtin());
    }

    #[test]
    fn malformed_json_falls_back_to_builtin() {
        let file = write_temp(".json", "{ \"brands\": [1, 2");
        assert!(load_file(file.path()).is_err());
        assert_eq!(load_or_builtin(Some(file.path())), LaptopDataset::builtin());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_temp(".parquet", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn json_round_trips_through_serde() {
        let mut ds = LaptopDataset::builtin();
        ds.storage = SplitPair { ssd: 10.0, hdd: 5.0 };
        let text = serde_json::to_string(&ds).unwrap();
        let file = write_temp(".json", &text);
        assert_eq!(load_file(file.path()).unwrap(), ds);
    }

    #[test]
    fn json_accepts_long_field_names_without_scatter() {
        let text = r#"{
            "brandCounts": { "labels": ["Dell", "HP"], "values": [10, 20] },
            "ramDistribution": { "labels": ["8GB"], "values": [5] },
            "cpuCounts": { "labels": ["Intel i5"], "values": [7] },
            "storageRatio": { "ssd": 3, "hdd": 1 },
            "resolutionPopularity": { "labels": ["1920x1080"], "values": [9] }
        }"#;
        let ds = parse_json(text).unwrap();
        assert_eq!(ds.brands.values, vec![10.0, 20.0]);
        assert_eq!(ds.storage.total(), 4.0);
        assert_eq!(ds.scatter, LaptopDataset::builtin().scatter);
    }

    #[test]
    fn json_shape_mismatch_is_invalid() {
        let mut ds = LaptopDataset::builtin();
        ds.cpu.values.push(1.0);
        let file = write_temp(".json", &serde_json::to_string(&ds).unwrap());
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn csv_overrides_listed_series() {
        let text = "series,label,value\n\
                    brands,Dell,100\n\
                    brands,HP,50\n\
                    storage,ssd,30\n\
                    storage,HDD,10\n\
                    scatter,13.3,8\n\
                    scatter,15.6,16\n";
        let file = write_temp(".csv", text);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.brands.labels, vec!["Dell", "HP"]);
        assert_eq!(ds.brands.values, vec![100.0, 50.0]);
        assert_eq!(ds.storage, SplitPair { ssd: 30.0, hdd: 10.0 });
        assert_eq!(ds.scatter.x, vec![13.3, 15.6]);
        assert_eq!(ds.ram, LaptopDataset::builtin().ram);
    }

    #[test]
    fn csv_rejects_unknown_series_and_half_storage() {
        let unknown = write_temp(".csv", "series,label,value\ngpu,RTX,3\n");
        assert!(load_file(unknown.path()).is_err());

        let half = write_temp(".csv", "series,label,value\nstorage,ssd,3\n");
        assert!(load_file(half.path()).is_err());
    }

    #[test]
    fn csv_with_non_finite_scatter_x_falls_back_to_builtin() {
        let file = write_temp(".csv", "series,label,value\nscatter,NaN,8\nscatter,inf,4\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("not finite"));
        assert_eq!(load_or_builtin(Some(file.path())), LaptopDataset::builtin());
    }
}
