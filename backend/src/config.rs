//! Server configuration read from the environment.

use std::path::PathBuf;
use std::sync::OnceLock;

use common::recommender::{DEFAULT_K, MAX_K, MIN_K};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    pub coordinates_path: PathBuf,
    pub default_k: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("assets/data/cleaned.csv"),
            coordinates_path: PathBuf::from("assets/data/coordinates.csv"),
            default_k: DEFAULT_K,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let default_k = match lookup("NBS_DEFAULT_K") {
            None => defaults.default_k,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(k) => k.clamp(MIN_K, MAX_K),
                Err(e) => {
                    tracing::warn!("NBS_DEFAULT_K={raw:?} is not a number ({e}), using {}", defaults.default_k);
                    defaults.default_k
                }
            },
        };
        Self {
            dataset_path: lookup("NBS_DATASET_PATH").map(PathBuf::from).unwrap_or(defaults.dataset_path),
            coordinates_path: lookup("NBS_COORDINATES_PATH").map(PathBuf::from).unwrap_or(defaults.coordinates_path),
            default_k,
        }
    }
}

pub fn get_config() -> &'static DashboardConfig {
    static CONFIG: OnceLock<DashboardConfig> = OnceLock::new();
    CONFIG.get_or_init(DashboardConfig::from_env)
}
