//! Chunked file upload for asset zips
//!
//! Streams a file to the site API in fixed-size chunks, one at a time in
//! strictly increasing part order. Each chunk is retried independently under
//! the shared policy; a chunk that exhausts its retries fails the whole
//! upload and triggers a best-effort abort of the server-side session.

use std::path::Path;

use log::{debug, warn};
use reqwest::Method;
use tokio::io::AsyncReadExt;

use crate::client::retry::{RetryPolicy, with_retry};
use crate::client::transport::{ApiRequest, Transport};
use crate::error::{Error, Result, UploadError};

/// Default chunk size: 5 MiB
pub const DEFAULT_CHUNK_SIZE: usize = 5 * 1024 * 1024;

/// Header carrying the 0-indexed part number
pub const PART_INDEX_HEADER: &str = "X-Cons3rt-Part-Index";
/// Header carrying the total part count
pub const PART_COUNT_HEADER: &str = "X-Cons3rt-Part-Count";
/// Header carrying the original file name
pub const FILENAME_HEADER: &str = "X-Cons3rt-Filename";

/// Progress observer, called after each successful chunk with
/// `(bytes_sent, total_bytes)`.
pub type ProgressFn<'a> = &'a (dyn Fn(u64, u64) + Send + Sync);

/// Result of a completed upload
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Server-assigned resource id, when the final response carried one
    pub resource_id: Option<u64>,
    /// Total bytes sent
    pub bytes_sent: u64,
    /// Number of chunks issued
    pub parts: u32,
}

/// One file upload against one target path.
///
/// Owns the chunking state for the duration of the upload and is discarded
/// on completion or failure.
pub struct UploadSession<'a> {
    transport: &'a Transport,
    policy: &'a RetryPolicy,
    chunk_size: usize,
}

impl<'a> UploadSession<'a> {
    pub fn new(transport: &'a Transport, policy: &'a RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the chunk size (minimum 1 byte).
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Upload `file_path` to `target` with the given method (PUT or POST).
    ///
    /// Chunks are sent sequentially; no network write ever exceeds the
    /// configured chunk size. The final chunk's response body is parsed for
    /// the server-assigned resource id.
    pub async fn upload(
        &self,
        method: Method,
        target: &str,
        file_path: &Path,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<UploadOutcome> {
        let filename = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();

        let mut file = tokio::fs::File::open(file_path).await?;
        let total_bytes = file.metadata().await?.len();
        if total_bytes == 0 {
            return Err(Error::Other(format!(
                "Refusing to upload empty file: {}",
                file_path.display()
            )));
        }

        let chunk_size = self.chunk_size as u64;
        let total_parts = total_bytes.div_ceil(chunk_size) as u32;
        debug!(
            "Uploading {} ({} bytes) to {} in {} parts",
            filename, total_bytes, target, total_parts
        );

        let mut bytes_sent = 0u64;
        let mut last_body = String::new();

        for part_index in 0..total_parts {
            let mut chunk = vec![0u8; self.chunk_size.min((total_bytes - bytes_sent) as usize)];
            file.read_exact(&mut chunk).await?;
            let chunk_len = chunk.len() as u64;

            let req = ApiRequest::new(method.clone(), target)
                .header(PART_INDEX_HEADER, part_index.to_string())
                .header(PART_COUNT_HEADER, total_parts.to_string())
                .header(FILENAME_HEADER, filename.clone())
                .bytes(chunk);

            let outcome = with_retry(self.policy, || {
                let req = req.clone();
                async move { self.transport.execute(&req).await }
            })
            .await;

            match outcome {
                Ok(resp) => {
                    bytes_sent += chunk_len;
                    last_body = resp.body;
                    if let Some(progress) = progress {
                        progress(bytes_sent, total_bytes);
                    }
                }
                Err(source) => {
                    self.abort(target).await;
                    return Err(UploadError { part_index, source }.into());
                }
            }
        }

        Ok(UploadOutcome {
            resource_id: parse_resource_id(&last_body),
            bytes_sent,
            parts: total_parts,
        })
    }

    /// Best-effort abort of the server-side upload session.
    ///
    /// Failures are logged, never raised — the upload error that got us here
    /// is the one the caller needs to see.
    async fn abort(&self, target: &str) {
        let req = ApiRequest::delete(target);
        if let Err(err) = self.transport.execute(&req).await {
            warn!("Failed to abort upload session at {}: {}", target, err);
        } else {
            debug!("Aborted upload session at {}", target);
        }
    }
}

/// Extract a server-assigned resource id from a response body: either a bare
/// integer or a JSON object with an `id` field.
pub(crate) fn parse_resource_id(body: &str) -> Option<u64> {
    let trimmed = body.trim();
    if let Ok(id) = trimmed.parse::<u64>() {
        return Some(id);
    }
    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|v| v.get("id").and_then(|id| id.as_u64()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transport::ApiConfig;
    use crate::config::AuthMode;
    use crate::error::ApiError;
    use std::io::Write;
    use std::sync::Mutex;
    use std::time::Duration;

    fn session_parts(server_url: &str) -> (Transport, RetryPolicy) {
        let config = ApiConfig::new(server_url, AuthMode::Token("tok".to_string()));
        let transport = Transport::new(&config).unwrap();
        let policy = RetryPolicy::new(2, Duration::ZERO);
        (transport, policy)
    }

    fn temp_file_of_size(bytes: usize) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asset-Test.zip");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&vec![0xA5u8; bytes]).unwrap();
        (dir, path)
    }

    #[test]
    fn test_parse_resource_id() {
        assert_eq!(parse_resource_id("12345"), Some(12345));
        assert_eq!(parse_resource_id("  678 \n"), Some(678));
        assert_eq!(parse_resource_id(r#"{"id": 99}"#), Some(99));
        assert_eq!(parse_resource_id(""), None);
        assert_eq!(parse_resource_id("not an id"), None);
    }

    #[tokio::test]
    async fn test_chunk_count_and_order() {
        // 2560 bytes at 1024 per chunk -> ceil(2560/1024) = 3 parts
        let mut server = mockito::Server::new_async().await;
        let (transport, policy) = session_parts(&server.url());
        let (_dir, path) = temp_file_of_size(2560);

        let seen: Mutex<Vec<u32>> = Mutex::new(Vec::new());
        let mut mocks = Vec::new();
        for part in 0..3 {
            let body = if part == 2 { "4242" } else { "" };
            mocks.push(
                server
                    .mock("POST", "/import/")
                    .match_header(PART_INDEX_HEADER, part.to_string().as_str())
                    .match_header(PART_COUNT_HEADER, "3")
                    .match_header(FILENAME_HEADER, "asset-Test.zip")
                    .with_status(200)
                    .with_body(body)
                    .create_async()
                    .await,
            );
        }

        let session = UploadSession::new(&transport, &policy).chunk_size(1024);
        let progress = |sent: u64, _total: u64| {
            seen.lock().unwrap().push((sent / 1024) as u32);
        };
        let outcome = session
            .upload(Method::POST, "import/", &path, Some(&progress))
            .await
            .unwrap();

        assert_eq!(outcome.parts, 3);
        assert_eq!(outcome.bytes_sent, 2560);
        assert_eq!(outcome.resource_id, Some(4242));
        for mock in mocks {
            mock.assert_async().await;
        }
        // Progress ticks in strictly increasing byte order
        let ticks = seen.lock().unwrap().clone();
        assert_eq!(ticks, vec![1, 2, 2]);
    }

    #[tokio::test]
    async fn test_failed_chunk_aborts_and_names_part() {
        let mut server = mockito::Server::new_async().await;
        let (transport, policy) = session_parts(&server.url());
        let (_dir, path) = temp_file_of_size(2048);

        let _first = server
            .mock("POST", "/import/")
            .match_header(PART_INDEX_HEADER, "0")
            .with_status(200)
            .create_async()
            .await;
        // Part 1 always fails; policy allows 2 attempts
        let second = server
            .mock("POST", "/import/")
            .match_header(PART_INDEX_HEADER, "1")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;
        let abort = server
            .mock("DELETE", "/import/")
            .with_status(200)
            .create_async()
            .await;

        let session = UploadSession::new(&transport, &policy).chunk_size(1024);
        let err = session
            .upload(Method::POST, "import/", &path, None)
            .await
            .unwrap_err();

        match err {
            Error::Upload(UploadError { part_index, source }) => {
                assert_eq!(part_index, 1);
                assert!(matches!(source, ApiError::Exhausted { attempts: 2, .. }));
            }
            other => panic!("expected UploadError, got {:?}", other),
        }
        second.assert_async().await;
        abort.assert_async().await;
    }

    #[tokio::test]
    async fn test_abort_failure_is_swallowed() {
        let mut server = mockito::Server::new_async().await;
        let (transport, policy) = session_parts(&server.url());
        let (_dir, path) = temp_file_of_size(100);

        let _chunk = server
            .mock("POST", "/import/")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;
        let _abort = server
            .mock("DELETE", "/import/")
            .with_status(500)
            .create_async()
            .await;

        let session = UploadSession::new(&transport, &policy).chunk_size(1024);
        let err = session
            .upload(Method::POST, "import/", &path, None)
            .await
            .unwrap_err();

        // The original chunk failure surfaces, not the abort failure
        assert!(matches!(err, Error::Upload(UploadError { part_index: 0, .. })));
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let (transport, policy) = session_parts(&server.url());
        let (_dir, path) = temp_file_of_size(0);

        let session = UploadSession::new(&transport, &policy);
        let err = session
            .upload(Method::POST, "import/", &path, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Other(_)));
    }
}
