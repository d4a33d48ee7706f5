//! Pagination helpers for API requests
//!
//! CONS3RT list endpoints page with `maxresults` and `page` query
//! parameters and signal the end of a collection with a short page. The
//! fetch-all loop here concatenates pages sequentially until the server
//! runs out or the caller's cap is reached.

use std::future::Future;

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: usize = 40;

/// Page size used when draining a whole collection
pub const BULK_PAGE_SIZE: usize = 100;

/// Pagination parameters for one list request.
#[derive(Debug, Clone)]
pub struct PageParams {
    /// Number of items per page
    pub max_results: usize,
    /// Page number, 0-indexed
    pub page: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_PAGE_SIZE,
            page: 0,
        }
    }
}

impl PageParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Query pairs in the form the site API expects.
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("maxresults".to_string(), self.max_results.to_string()),
            ("page".to_string(), self.page.to_string()),
        ]
    }
}

/// Fetch every page of a collection and concatenate the results.
///
/// Issues repeated calls advancing the page number until the server returns
/// a short or empty page, or `max_total` items have been collected (the
/// result is truncated to the cap). There is no overall deadline here;
/// callers impose their own if they need one.
pub async fn fetch_all<T, E, F, Fut>(
    page_size: usize,
    max_total: Option<usize>,
    mut fetch_page: F,
) -> Result<Vec<T>, E>
where
    F: FnMut(PageParams) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let page_size = page_size.max(1);
    let mut all = Vec::new();
    let mut page = 0usize;

    loop {
        let params = PageParams::new().max_results(page_size).page(page);
        let batch = fetch_page(params).await?;
        let batch_len = batch.len();
        all.extend(batch);

        if let Some(max) = max_total {
            if all.len() >= max {
                all.truncate(max);
                break;
            }
        }

        if batch_len < page_size {
            break;
        }
        page += 1;
    }

    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_page_params_query() {
        let params = PageParams::new().max_results(500).page(2);
        let query = params.to_query();
        assert_eq!(query.len(), 2);
        assert!(query.contains(&("maxresults".to_string(), "500".to_string())));
        assert!(query.contains(&("page".to_string(), "2".to_string())));
    }

    #[test]
    fn test_page_params_defaults() {
        let params = PageParams::new();
        assert_eq!(params.max_results, DEFAULT_PAGE_SIZE);
        assert_eq!(params.page, 0);
    }

    #[tokio::test]
    async fn test_fetch_all_concatenates_to_cap() {
        // Three pages of 500/500/120 with a cap of 1120 must yield exactly
        // 1120 records with no duplicates and no fourth request.
        let pages = [500usize, 500, 120];
        let all = fetch_all(500, Some(1120), |params| {
            let len = pages.get(params.page).copied().unwrap_or(0);
            let start = params.page * 500;
            async move { Ok::<_, ApiError>((start..start + len).collect::<Vec<_>>()) }
        })
        .await
        .unwrap();

        assert_eq!(all.len(), 1120);
        let mut deduped = all.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), 1120);
    }

    #[tokio::test]
    async fn test_fetch_all_stops_on_short_page() {
        let all = fetch_all(100, None, |params| async move {
            match params.page {
                0 => Ok::<_, ApiError>(vec![0u32; 100]),
                1 => Ok(vec![1u32; 37]),
                _ => panic!("fetched past the short page"),
            }
        })
        .await
        .unwrap();

        assert_eq!(all.len(), 137);
    }

    #[tokio::test]
    async fn test_fetch_all_empty_collection() {
        let all = fetch_all(100, None, |_params| async move {
            Ok::<Vec<u32>, ApiError>(vec![])
        })
        .await
        .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_truncates_overfull_page() {
        let all = fetch_all(100, Some(150), |params| async move {
            match params.page {
                0 | 1 => Ok::<_, ApiError>(vec![params.page as u32; 100]),
                _ => panic!("fetched past the cap"),
            }
        })
        .await
        .unwrap();

        assert_eq!(all.len(), 150);
    }

    #[tokio::test]
    async fn test_fetch_all_propagates_errors() {
        let result: Result<Vec<u32>, ApiError> = fetch_all(100, None, |params| async move {
            if params.page == 0 {
                Ok(vec![0u32; 100])
            } else {
                Err(ApiError::Server {
                    status: 502,
                    body: String::new(),
                })
            }
        })
        .await;

        assert!(result.is_err());
    }
}
