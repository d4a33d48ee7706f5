//! Asset directory structure validation
//!
//! Checks an asset directory against the site's packaging rules before
//! anything is zipped: the manifest parses and carries the required keys,
//! referenced files exist, and nothing unexpected sits at the asset root.
//! `validate` is the only way to obtain a [`ValidatedAsset`], which in turn
//! is the only input the packager accepts.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::asset::manifest::{AssetManifest, MANIFEST_FILE};
use crate::error::{AssetError, Result};

/// File names (or prefixes) excluded from packaging
pub const IGNORE_FILES: &[&str] = &[".DS_Store", ".gitignore", "._", "asset_data.yml", "media.yml"];

/// File extensions excluded from packaging
pub const IGNORE_FILE_EXTENSIONS: &[&str] = &["iml"];

/// Directory names excluded from packaging
pub const IGNORE_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".cons3rt",
    ".idea",
    ".metadata",
    ".project",
    ".settings",
    ".gradle",
];

/// Directories allowed at the asset root
pub const ACCEPTABLE_DIRS: &[&str] = &["scripts", "media", "config"];

/// Doc files recognized at the root; must be declared as `documentationFile`
pub const POTENTIAL_DOC_FILES: &[&str] = &[
    "HELP.html",
    "README.html",
    "HELP",
    "README",
    "HELP.md",
    "README.md",
    "ALTERNATE_README",
];

/// License files recognized at the root; must be declared as `licenseFile`
pub const POTENTIAL_LICENSE_FILES: &[&str] =
    &["LICENSE.html", "LICENSE", "LICENSE.md", "ALTERNATE_LICENSE"];

/// An asset directory that passed validation.
///
/// Holds the facts the packager and import flow need; constructing one
/// outside [`validate`] is not possible.
#[derive(Debug, Clone)]
pub struct ValidatedAsset {
    dir: PathBuf,
    name: String,
    asset_type: String,
}

impl ValidatedAsset {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn asset_type(&self) -> &str {
        &self.asset_type
    }
}

/// Whether a file should be left out of the package.
pub fn ignore_file(file_name: &str) -> bool {
    if IGNORE_FILES
        .iter()
        .any(|ignored| file_name.starts_with(ignored))
    {
        return true;
    }
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| IGNORE_FILE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Validate an asset directory, returning the facts needed to package it.
pub fn validate(asset_dir: &Path) -> Result<ValidatedAsset> {
    info!("Validating asset directory: {}", asset_dir.display());

    if !asset_dir.is_dir() {
        return Err(AssetError::validation(
            "asset_dir",
            format!("Not a directory: {}", asset_dir.display()),
        )
        .into());
    }

    let manifest = AssetManifest::load(asset_dir)?;
    manifest.validate_keys()?;

    // validate_keys guarantees the required keys exist
    let name = manifest.name().unwrap_or_default().to_string();
    let asset_type = manifest.asset_type().unwrap_or_default().to_string();
    let install_script = manifest.install_script().unwrap_or_default();

    let install_script_path = asset_dir.join("scripts").join(install_script);
    if !install_script_path.is_file() {
        return Err(AssetError::validation(
            "installScript",
            format!("Install script not found: {}", install_script_path.display()),
        )
        .into());
    }

    let doc_file = manifest.documentation_file().map(|f| asset_dir.join(f));
    if let Some(path) = &doc_file {
        if !path.is_file() {
            return Err(AssetError::validation(
                "documentationFile",
                format!("Documentation file not found: {}", path.display()),
            )
            .into());
        }
    }

    let license_file = manifest.license_file().map(|f| asset_dir.join(f));
    if let Some(path) = &license_file {
        if !path.is_file() {
            return Err(AssetError::validation(
                "licenseFile",
                format!("License file not found: {}", path.display()),
            )
            .into());
        }
    }

    check_root_items(asset_dir, doc_file.as_deref(), license_file.as_deref())?;

    info!("Validated asset directory: {}", asset_dir.display());
    Ok(ValidatedAsset {
        dir: asset_dir.to_path_buf(),
        name,
        asset_type,
    })
}

/// Reject unexpected items at the asset root.
fn check_root_items(
    asset_dir: &Path,
    doc_file: Option<&Path>,
    license_file: Option<&Path>,
) -> Result<()> {
    for entry in std::fs::read_dir(asset_dir)? {
        let entry = entry?;
        let item_path = entry.path();
        let item_name = entry.file_name().to_string_lossy().to_string();

        if item_name == MANIFEST_FILE {
            continue;
        }
        if doc_file == Some(item_path.as_path()) || license_file == Some(item_path.as_path()) {
            continue;
        }
        if IGNORE_DIRS.contains(&item_name.as_str()) || ignore_file(&item_name) {
            continue;
        }
        if ACCEPTABLE_DIRS.contains(&item_name.as_str()) && item_path.is_dir() {
            continue;
        }

        if item_name == "VERSION" {
            warn!("Found a VERSION file at the asset root, it will be excluded");
            continue;
        }
        if item_name == "doc" {
            return Err(AssetError::validation(
                "doc",
                "Found a doc directory at the asset root, this is not allowed",
            )
            .into());
        }
        if POTENTIAL_DOC_FILES.contains(&item_name.as_str()) {
            let reason = if doc_file.is_none() {
                format!(
                    "Documentation file found but not declared in {}: {}",
                    MANIFEST_FILE, item_name
                )
            } else {
                format!("Extra documentation file found: {}", item_name)
            };
            return Err(AssetError::validation("documentationFile", reason).into());
        }
        if POTENTIAL_LICENSE_FILES.contains(&item_name.as_str()) {
            let reason = if license_file.is_none() {
                format!(
                    "License file found but not declared in {}: {}",
                    MANIFEST_FILE, item_name
                )
            } else {
                format!("Extra license file found: {}", item_name)
            };
            return Err(AssetError::validation("licenseFile", reason).into());
        }

        return Err(AssetError::validation(
            "asset_dir",
            format!("Found illegal item at the asset root: {}", item_name),
        )
        .into());
    }
    Ok(())
}
