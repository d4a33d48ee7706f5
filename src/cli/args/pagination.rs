//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::pagination::PageParams;

/// Shared pagination arguments for list commands.
///
/// Flatten this into any command that lists a collection:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Maximum results to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Page number (0-indexed)
    #[arg(long, short = 'p')]
    pub page: Option<usize>,
}

impl PaginationArgs {
    /// Convert CLI args to API page params.
    pub fn to_params(&self) -> PageParams {
        let mut params = PageParams::new();
        if let Some(limit) = self.limit {
            params = params.max_results(limit);
        }
        if let Some(page) = self.page {
            params = params.page(page);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::pagination::DEFAULT_PAGE_SIZE;

    #[test]
    fn test_to_params_defaults() {
        let args = PaginationArgs::default();
        let params = args.to_params();
        assert_eq!(params.max_results, DEFAULT_PAGE_SIZE);
        assert_eq!(params.page, 0);
    }

    #[test]
    fn test_to_params_overrides() {
        let args = PaginationArgs {
            limit: Some(500),
            page: Some(2),
        };
        let params = args.to_params();
        assert_eq!(params.max_results, 500);
        assert_eq!(params.page, 2);
    }
}
