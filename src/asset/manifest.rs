//! Asset manifest (`asset.properties`) parsing and key validation

use std::collections::BTreeMap;
use std::path::Path;

use log::warn;

use crate::error::{AssetError, Result};

/// Manifest file name at the asset root
pub const MANIFEST_FILE: &str = "asset.properties";

/// Keys the packager understands. Anything else is a warning, not a failure.
pub const RECOGNIZED_KEYS: &[&str] = &[
    "name",
    "description",
    "assetType",
    "softwareAssetType",
    "containerAssetType",
    "testAssetType",
    "installScript",
    "licenseFile",
    "documentationFile",
    "version",
    "vendor",
    "osPlatform",
];

/// Keys every asset must declare, with non-empty values
pub const REQUIRED_KEYS: &[&str] = &["name", "description", "assetType", "installScript"];

/// Parsed `asset.properties` content: recognized property keys mapped to
/// values, read once per validation pass.
#[derive(Debug, Clone)]
pub struct AssetManifest {
    entries: BTreeMap<String, String>,
}

impl AssetManifest {
    /// Parse manifest text. Lines are `key=value`; blank lines and `#`
    /// comments are skipped; the value keeps any `=` after the first.
    pub fn parse(content: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                entries.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { entries }
    }

    /// Read and parse the manifest from an asset directory.
    pub fn load(asset_dir: &Path) -> Result<Self> {
        let manifest_path = asset_dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(AssetError::validation(
                MANIFEST_FILE,
                format!("Asset properties file not found: {}", manifest_path.display()),
            )
            .into());
        }
        let content = std::fs::read_to_string(&manifest_path)?;
        Ok(Self::parse(&content))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    pub fn asset_type(&self) -> Option<&str> {
        self.get("assetType")
    }

    pub fn install_script(&self) -> Option<&str> {
        self.get("installScript")
    }

    pub fn license_file(&self) -> Option<&str> {
        self.get("licenseFile")
    }

    pub fn documentation_file(&self) -> Option<&str> {
        self.get("documentationFile")
    }

    /// Check required keys are present and non-empty; warn on unknown keys.
    pub fn validate_keys(&self) -> Result<()> {
        for key in self.entries.keys() {
            if !RECOGNIZED_KEYS.contains(&key.as_str()) {
                warn!("Unrecognized property in {}: {}", MANIFEST_FILE, key);
            }
        }

        for key in REQUIRED_KEYS {
            match self.get(key) {
                None => {
                    return Err(AssetError::validation(
                        *key,
                        format!("Required property [{}] not found in {}", key, MANIFEST_FILE),
                    )
                    .into());
                }
                Some("") => {
                    return Err(AssetError::validation(
                        *key,
                        format!("Required property [{}] found blank in {}", key, MANIFEST_FILE),
                    )
                    .into());
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const GOOD_MANIFEST: &str = "\
# Sample software asset
name=Sample Asset
description=Installs the sample service
assetType=software
installScript=install.sh
";

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let manifest = AssetManifest::parse(GOOD_MANIFEST);
        assert_eq!(manifest.name(), Some("Sample Asset"));
        assert_eq!(manifest.asset_type(), Some("software"));
        assert_eq!(manifest.install_script(), Some("install.sh"));
        assert!(manifest.get("# Sample software asset").is_none());
    }

    #[test]
    fn test_parse_keeps_equals_in_value() {
        let manifest = AssetManifest::parse("description=a=b=c\n");
        assert_eq!(manifest.get("description"), Some("a=b=c"));
    }

    #[test]
    fn test_validate_keys_accepts_complete_manifest() {
        let manifest = AssetManifest::parse(GOOD_MANIFEST);
        assert!(manifest.validate_keys().is_ok());
    }

    #[test]
    fn test_missing_install_script_fails_with_key() {
        let manifest = AssetManifest::parse(
            "name=X\ndescription=Y\nassetType=software\n",
        );
        let err = manifest.validate_keys().unwrap_err();
        match err {
            Error::Asset(AssetError::Validation { key, .. }) => {
                assert_eq!(key, "installScript");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_required_value_fails() {
        let manifest = AssetManifest::parse(
            "name=\ndescription=Y\nassetType=software\ninstallScript=i.sh\n",
        );
        let err = manifest.validate_keys().unwrap_err();
        match err {
            Error::Asset(AssetError::Validation { key, reason }) => {
                assert_eq!(key, "name");
                assert!(reason.contains("blank"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_keys_do_not_fail() {
        let manifest = AssetManifest::parse(
            "name=X\ndescription=Y\nassetType=software\ninstallScript=i.sh\ncustomKey=1\n",
        );
        assert!(manifest.validate_keys().is_ok());
    }
}
