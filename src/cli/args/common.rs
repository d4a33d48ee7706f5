//! Common CLI types shared across commands

use crate::client::models::{AssetCategory, AssetVisibility, RunSearchType};

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
    /// CSV format - header row plus one record per entry
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Deployment run search filter for cloudspace run listings
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum SearchTypeArg {
    /// All runs
    #[default]
    All,
    /// Active runs only
    Active,
    /// Inactive runs only
    Inactive,
}

impl From<SearchTypeArg> for RunSearchType {
    fn from(arg: SearchTypeArg) -> Self {
        match arg {
            SearchTypeArg::All => RunSearchType::All,
            SearchTypeArg::Active => RunSearchType::Active,
            SearchTypeArg::Inactive => RunSearchType::Inactive,
        }
    }
}

/// Asset category selector for state updates
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum AssetCategoryArg {
    #[default]
    Software,
    Container,
    Test,
}

impl From<AssetCategoryArg> for AssetCategory {
    fn from(arg: AssetCategoryArg) -> Self {
        match arg {
            AssetCategoryArg::Software => AssetCategory::Software,
            AssetCategoryArg::Container => AssetCategory::Container,
            AssetCategoryArg::Test => AssetCategory::Test,
        }
    }
}

/// Asset visibility selector
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum VisibilityArg {
    Owner,
    OwningProject,
    TrustedProjects,
    Community,
}

impl From<VisibilityArg> for AssetVisibility {
    fn from(arg: VisibilityArg) -> Self {
        match arg {
            VisibilityArg::Owner => AssetVisibility::Owner,
            VisibilityArg::OwningProject => AssetVisibility::OwningProject,
            VisibilityArg::TrustedProjects => AssetVisibility::TrustedProjects,
            VisibilityArg::Community => AssetVisibility::Community,
        }
    }
}

/// Render an optional field for table cells.
pub fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("json".parse(), Ok(OutputFormat::Json)));
        assert!(matches!("Table".parse(), Ok(OutputFormat::Table)));
        assert!(matches!("csv".parse(), Ok(OutputFormat::Csv)));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("x".to_string())), "x");
        assert_eq!(or_dash(None), "--");
    }
}
