use crate::model::ShopItem;
use crate::shop::Catalog;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) tick_ms: u64,
    pub(crate) fps_cap: u32,
    pub(crate) enable_color: bool,
    pub(crate) seed: Option<u64>,
    pub(crate) catalog_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            fps_cap: 30,
            enable_color: true,
            seed: None,
            catalog_path: None,
        }
    }
}

pub(crate) struct Paths {
    pub(crate) settings_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

pub(crate) fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "debug-rpg", "DebugRpg")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating data directory {}", dir.display()))?;
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        log_path: dir.join("debug-rpg.log"),
    })
}

/// Missing or broken settings fall back to defaults.
pub(crate) fn load_settings(path: &Path) -> Settings {
    let s = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return Settings::default(),
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => v,
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring unreadable settings");
            Settings::default()
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("reading catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog has no items")]
    EmptyCatalog,
    #[error("catalog item {index} has invalid cost {cost}")]
    InvalidCost { index: usize, cost: f64 },
}

pub(crate) fn parse_catalog(items: Vec<ShopItem>) -> Result<Catalog, ConfigError> {
    if items.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    if let Some((index, item)) = items
        .iter()
        .enumerate()
        .find(|(_, it)| !(it.cost.is_finite() && it.cost > 0.0))
    {
        return Err(ConfigError::InvalidCost {
            index,
            cost: item.cost,
        });
    }
    Ok(Catalog::new(items))
}

pub(crate) fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items: Vec<ShopItem> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    parse_catalog(items)
}
