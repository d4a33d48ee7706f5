//! Reproducible asset zip creation
//!
//! Walks a validated asset directory deterministically (sorted member
//! paths, fixed timestamps and modes) so packaging unchanged input twice
//! yields byte-identical archives. The zip's SHA-256 digest is what the
//! import flow compares to decide whether a re-import is necessary at all.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use sha2::{Digest, Sha256};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::asset::structure::{IGNORE_DIRS, ValidatedAsset, ignore_file};
use crate::error::{AssetError, Result};

/// A packaged asset zip on disk
#[derive(Debug, Clone)]
pub struct PackagedAsset {
    /// Path to the created zip
    pub zip_path: PathBuf,
    /// SHA-256 digest of the zip, hex-encoded
    pub sha256: String,
    /// Asset name from the manifest
    pub name: String,
}

/// Package a validated asset directory into `dest_dir`.
///
/// The archive is named `asset-<name-without-spaces>.zip`; an existing file
/// with that name is replaced.
pub fn package(asset: &ValidatedAsset, dest_dir: &Path) -> Result<PackagedAsset> {
    std::fs::create_dir_all(dest_dir)?;

    let zip_name = format!("asset-{}.zip", asset.name().replace(' ', ""));
    let zip_path = dest_dir.join(zip_name);
    if zip_path.is_file() {
        debug!("Removing existing asset zip: {}", zip_path.display());
        std::fs::remove_file(&zip_path)?;
    }

    let mut members = Vec::new();
    collect_members(asset.dir(), Path::new(""), &mut members)?;
    members.sort();

    info!(
        "Creating asset zip with {} members: {}",
        members.len(),
        zip_path.display()
    );

    let file = File::create(&zip_path)?;
    let mut writer = ZipWriter::new(file);
    // Fixed timestamp and mode keep repeated packaging byte-identical
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    for member in &members {
        writer
            .start_file(member.as_str(), options)
            .map_err(|e| AssetError::Package(e.to_string()))?;
        let mut src = File::open(asset.dir().join(member))?;
        io::copy(&mut src, &mut writer)?;
    }

    writer
        .finish()
        .map_err(|e| AssetError::Package(e.to_string()))?;

    let sha256 = file_sha256(&zip_path)?;
    info!("Created asset zip {} ({})", zip_path.display(), sha256);

    Ok(PackagedAsset {
        zip_path,
        sha256,
        name: asset.name().to_string(),
    })
}

/// Recursively collect package members as `/`-separated relative paths,
/// applying the ignore rules.
fn collect_members(root: &Path, relative: &Path, members: &mut Vec<String>) -> Result<()> {
    for entry in std::fs::read_dir(root.join(relative))? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        let rel_path = relative.join(&name);
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if IGNORE_DIRS.contains(&name.as_str()) {
                debug!("Skipping ignored directory: {}", rel_path.display());
                continue;
            }
            collect_members(root, &rel_path, members)?;
        } else if file_type.is_file() {
            if ignore_file(&name) || (name == "VERSION" && relative.as_os_str().is_empty()) {
                debug!("Skipping ignored file: {}", rel_path.display());
                continue;
            }
            let member = rel_path
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            members.push(member);
        }
    }
    Ok(())
}

/// Hex-encoded SHA-256 digest of a file
pub fn file_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::structure::validate;
    use std::fs;

    fn sample_asset(dir: &Path) {
        fs::create_dir_all(dir.join("scripts")).unwrap();
        fs::create_dir_all(dir.join("config")).unwrap();
        fs::write(
            dir.join("asset.properties"),
            "name=Sample Asset\ndescription=Installs the sample service\nassetType=software\ninstallScript=install.sh\n",
        )
        .unwrap();
        fs::write(dir.join("scripts/install.sh"), "#!/bin/bash\nexit 0\n").unwrap();
        fs::write(dir.join("config/app.conf"), "key=value\n").unwrap();
    }

    #[test]
    fn test_package_is_reproducible() {
        let temp = tempfile::tempdir().unwrap();
        let asset_dir = temp.path().join("asset");
        fs::create_dir_all(&asset_dir).unwrap();
        sample_asset(&asset_dir);

        let asset = validate(&asset_dir).unwrap();
        let first = package(&asset, &temp.path().join("out1")).unwrap();
        let second = package(&asset, &temp.path().join("out2")).unwrap();

        let bytes1 = fs::read(&first.zip_path).unwrap();
        let bytes2 = fs::read(&second.zip_path).unwrap();
        assert_eq!(bytes1, bytes2);
        assert_eq!(first.sha256, second.sha256);
    }

    #[test]
    fn test_package_name_strips_spaces() {
        let temp = tempfile::tempdir().unwrap();
        let asset_dir = temp.path().join("asset");
        fs::create_dir_all(&asset_dir).unwrap();
        sample_asset(&asset_dir);

        let asset = validate(&asset_dir).unwrap();
        let packaged = package(&asset, &temp.path().join("out")).unwrap();

        assert!(
            packaged
                .zip_path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .eq("asset-SampleAsset.zip")
        );
    }

    #[test]
    fn test_package_excludes_ignored_entries_and_sorts_members() {
        let temp = tempfile::tempdir().unwrap();
        let asset_dir = temp.path().join("asset");
        fs::create_dir_all(&asset_dir).unwrap();
        sample_asset(&asset_dir);
        fs::write(asset_dir.join(".DS_Store"), "junk").unwrap();
        fs::write(asset_dir.join("asset_data.yml"), "- site_url: x").unwrap();
        fs::create_dir_all(asset_dir.join(".git")).unwrap();
        fs::write(asset_dir.join(".git/HEAD"), "ref").unwrap();

        let asset = validate(&asset_dir).unwrap();
        let packaged = package(&asset, &temp.path().join("out")).unwrap();

        let file = File::open(&packaged.zip_path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "asset.properties".to_string(),
                "config/app.conf".to_string(),
                "scripts/install.sh".to_string(),
            ]
        );
    }

    #[test]
    fn test_digest_changes_with_content() {
        let temp = tempfile::tempdir().unwrap();
        let asset_dir = temp.path().join("asset");
        fs::create_dir_all(&asset_dir).unwrap();
        sample_asset(&asset_dir);

        let asset = validate(&asset_dir).unwrap();
        let first = package(&asset, &temp.path().join("out1")).unwrap();
        assert_eq!(first.sha256.len(), 64);

        fs::write(asset_dir.join("scripts/install.sh"), "#!/bin/bash\nexit 1\n").unwrap();
        let second = package(&asset, &temp.path().join("out2")).unwrap();
        assert_ne!(first.sha256, second.sha256);
    }
}
