//! Optional `shadowmask.toml` configuration.
//!
//! Looked up in the current directory first, then the user configuration
//! directory. Missing or malformed files fall back to defaults (with a
//! warning for the malformed case); command-line flags override everything.

use std::path::PathBuf;

use log::warn;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub video: Video,
    pub audio: Audio,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Video {
    pub scale: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Audio {
    pub master_gain: Option<f32>,
}

fn candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("shadowmask.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("shadowmask").join("shadowmask.toml"));
    }
    paths
}

pub fn load() -> Config {
    for path in candidates() {
        let Ok(text) = std::fs::read_to_string(&path) else {
            continue;
        };
        match toml::from_str(&text) {
            Ok(config) => return config,
            Err(e) => {
                warn!("ignoring malformed {}: {e}", path.display());
            }
        }
    }
    Config::default()
}
