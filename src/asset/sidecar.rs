//! Sidecar state file (`asset_data.yml`) for imported assets
//!
//! Records which asset id a directory was imported as, per site and
//! optionally per project, along with the digest of the zip that was
//! uploaded. `asset update` reads it to find the target id; the digest
//! lets an unchanged asset skip re-import.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sidecar file name at the asset root
pub const SIDECAR_FILE: &str = "asset_data.yml";

/// One imported-asset record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteAssetEntry {
    /// Site the asset was imported to
    pub site_url: String,

    /// Asset id assigned by that site
    pub asset_id: u64,

    /// Project the import ran under, when recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// SHA-256 of the zip that was uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_hash: Option<String>,
}

/// The sidecar contents for one asset directory
#[derive(Debug, Clone, Default)]
pub struct SidecarData {
    entries: Vec<SiteAssetEntry>,
}

impl SidecarData {
    /// Load the sidecar from an asset directory. A missing file is an empty
    /// sidecar; an unreadable one is treated as empty with a warning so a
    /// hand-edited file never blocks an import.
    pub fn load(asset_dir: &Path) -> Self {
        let path = Self::path(asset_dir);
        if !path.is_file() {
            return Self::default();
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str::<Vec<SiteAssetEntry>>(&content) {
                Ok(entries) => Self { entries },
                Err(err) => {
                    warn!("Ignoring invalid sidecar {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                warn!("Unable to read sidecar {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Persist the sidecar back to the asset directory.
    pub fn save(&self, asset_dir: &Path) -> Result<()> {
        let content = serde_yaml::to_string(&self.entries)
            .map_err(|e| Error::Other(format!("Unable to serialize {}: {}", SIDECAR_FILE, e)))?;
        std::fs::write(Self::path(asset_dir), content)?;
        Ok(())
    }

    fn path(asset_dir: &Path) -> PathBuf {
        asset_dir.join(SIDECAR_FILE)
    }

    fn find(&self, site_url: &str, project: Option<&str>) -> Option<&SiteAssetEntry> {
        self.entries
            .iter()
            .find(|e| e.site_url == site_url && e.project.as_deref() == project)
            .or_else(|| {
                // Fall back to a site-wide record when no project-scoped one exists
                self.entries
                    .iter()
                    .find(|e| e.site_url == site_url && e.project.is_none())
            })
    }

    /// The asset id this directory was imported as on a site.
    pub fn asset_id_for(&self, site_url: &str, project: Option<&str>) -> Option<u64> {
        self.find(site_url, project).map(|e| e.asset_id)
    }

    /// The digest of the zip last uploaded to a site.
    pub fn zip_hash_for(&self, site_url: &str, project: Option<&str>) -> Option<&str> {
        self.find(site_url, project).and_then(|e| e.zip_hash.as_deref())
    }

    /// Record (or update) the asset id and zip digest for a site.
    pub fn record(
        &mut self,
        site_url: &str,
        project: Option<&str>,
        asset_id: u64,
        zip_hash: Option<&str>,
    ) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.site_url == site_url && e.project.as_deref() == project)
        {
            entry.asset_id = asset_id;
            entry.zip_hash = zip_hash.map(str::to_string);
            return;
        }
        self.entries.push(SiteAssetEntry {
            site_url: site_url.to_string(),
            asset_id,
            project: project.map(str::to_string),
            zip_hash: zip_hash.map(str::to_string),
        });
    }

    pub fn entries(&self) -> &[SiteAssetEntry] {
        &self.entries
    }
}
