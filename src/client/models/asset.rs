//! Asset-related API enums

use std::fmt;

/// Asset category, which selects the ReST path prefix for state updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Software,
    Container,
    Test,
}

impl AssetCategory {
    /// The path prefix the site API routes this category under.
    pub fn path_prefix(&self) -> &'static str {
        match self {
            AssetCategory::Software => "software",
            AssetCategory::Container => "containers",
            AssetCategory::Test => "tests",
        }
    }

    /// Map an `assetType` manifest value to a category.
    pub fn from_asset_type(asset_type: &str) -> Option<Self> {
        match asset_type.to_ascii_lowercase().as_str() {
            "software" => Some(AssetCategory::Software),
            "container" | "containers" => Some(AssetCategory::Container),
            "test" | "tests" => Some(AssetCategory::Test),
            _ => None,
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_prefix())
    }
}

/// Asset visibility levels accepted by the site API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetVisibility {
    Owner,
    OwningProject,
    TrustedProjects,
    Community,
}

impl AssetVisibility {
    /// The query value the site API expects.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            AssetVisibility::Owner => "OWNER",
            AssetVisibility::OwningProject => "OWNING_PROJECT",
            AssetVisibility::TrustedProjects => "TRUSTED_PROJECTS",
            AssetVisibility::Community => "COMMUNITY",
        }
    }
}

impl fmt::Display for AssetVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}
