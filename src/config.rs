use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::render::{self, RendererKind};
use crate::store::DEFAULT_DATA_FILE;

const DEFAULT_ROUND_DELAY_MS: u64 = 400;
const MAX_ROUND_DELAY_MS: u64 = 5_000;

/// Runtime knobs, all environment-driven. Anything unset or unparsable
/// falls back to its default.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub renderer: RendererKind,
    pub round_delay: Duration,
    /// Fixed simulation seed for reproducible contests.
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        let data_file = env::var("CHAMPION_DATA_FILE")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let renderer = match env::var("CHAMPION_RENDERER")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "plain" => RendererKind::Plain,
            "fancy" => RendererKind::Fancy,
            _ => render::auto_kind(),
        };

        let round_delay_ms = env::var("CHAMPION_ROUND_DELAY_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_ROUND_DELAY_MS)
            .min(MAX_ROUND_DELAY_MS);

        let seed = env::var("CHAMPION_SEED")
            .ok()
            .and_then(|val| val.parse::<u64>().ok());

        Config {
            data_file,
            renderer,
            round_delay: Duration::from_millis(round_delay_ms),
            seed,
        }
    }
}
