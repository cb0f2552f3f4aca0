use std::path::PathBuf;

use anyhow::{Context, Result};
use laptop_dash::data::jitter::Randomizer;
use laptop_dash::data::model::LaptopDataset;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Write a jittered copy of the built-in dataset.
///
/// Usage: `generate_sample [OUT] [SEED] [ROUNDS]`
/// (defaults: `data.json`, `42`, `3` rounds of jitter).
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let out = PathBuf::from(args.next().unwrap_or_else(|| "data.json".to_string()));
    let seed: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("seed '{s}' is not an integer"))?,
        None => 42,
    };
    let rounds: u32 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("rounds '{s}' is not an integer"))?,
        None => 3,
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let mut dataset = LaptopDataset::builtin();
    let randomizer = Randomizer::default();
    for _ in 0..rounds {
        randomizer.randomize(&mut dataset, &mut rng);
    }
    dataset.validate().context("generated dataset is invalid")?;

    let json = serde_json::to_string_pretty(&dataset).context("serializing dataset")?;
    std::fs::write(&out, json).with_context(|| format!("writing {}", out.display()))?;

    log::info!("Wrote {} ({rounds} rounds, seed {seed})", out.display());
    println!(
        "Wrote {} – {} brands, storage {}/{}",
        out.display(),
        dataset.brands.len(),
        dataset.storage.ssd,
        dataset.storage.hdd
    );
    Ok(())
}
