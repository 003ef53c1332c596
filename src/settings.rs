use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-repository settings file, kept at the top of the working tree.
pub const SETTINGS_FILE: &str = "kommitter.settings.json";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RepoSettings {
    #[serde(rename = "commitConvention", skip_serializing_if = "Option::is_none")]
    pub commit_convention: Option<String>,
}

pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

/// The convention saved for this repository, if any.
///
/// A missing or unreadable file counts as "nothing saved".
pub fn saved_convention(root: &Path) -> Option<String> {
    let path = settings_path(root);
    let data = fs::read_to_string(&path).ok()?;

    match serde_json::from_str::<RepoSettings>(&data) {
        Ok(settings) => settings.commit_convention.filter(|c| !c.trim().is_empty()),
        Err(e) => {
            log::warn!("Ignoring invalid settings file {}: {e}", path.display());
            None
        }
    }
}

/// Remember `convention` for later runs in this repository.
pub fn save_convention(root: &Path, convention: &str) -> Result<()> {
    let path = settings_path(root);
    let settings = RepoSettings {
        commit_convention: Some(convention.to_string()),
    };
    let body = serde_json::to_string_pretty(&settings).context("failed to encode settings")?;
    fs::write(&path, body).with_context(|| format!("failed to write {:?}", path))?;
    log::debug!("Saved convention {convention:?} to {}", path.display());
    Ok(())
}
