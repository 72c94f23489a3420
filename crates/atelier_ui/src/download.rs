//! Starting a download of the displayed image.

use crate::constants::DEFAULT_DOWNLOAD_NAME;
use std::path::PathBuf;
use thiserror::Error;

/// What to download and under which name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub file_name: String,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file_name: file_name.into(),
        }
    }

    /// Request for the enlarged view (`image.png`).
    pub fn enlarged(url: impl Into<String>) -> Self {
        Self::new(url, DEFAULT_DOWNLOAD_NAME)
    }

    /// Request for the thumbnail at `index` in a grid (`image_1.png`, ...).
    pub fn thumbnail(url: impl Into<String>, index: usize) -> Self {
        Self::new(url, thumbnail_file_name(index))
    }

    /// Local filesystem path for `file://` URLs and bare paths.
    /// Network URLs yield `None`.
    pub fn local_path(&self) -> Option<PathBuf> {
        if let Some(rest) = self.url.strip_prefix("file://") {
            return Some(PathBuf::from(rest));
        }
        if self.url.contains("://") || self.url.starts_with("data:") || self.url.starts_with("blob:") {
            return None;
        }
        Some(PathBuf::from(&self.url))
    }
}

/// File name for the thumbnail at zero-based `index`.
pub fn thumbnail_file_name(index: usize) -> String {
    format!("image_{}.png", index + 1)
}

/// Errors a download backend can report.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The backend cannot fetch this kind of URL
    #[error("Unsupported download source: {0}")]
    UnsupportedSource(String),

    /// The user dismissed the save location prompt
    #[error("Download cancelled")]
    Cancelled,

    /// I/O error while writing the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Browser API failure
    #[error("Browser error: {0}")]
    Dom(String),
}

/// Something that can perform a download.
pub trait DownloadSink {
    fn download(&mut self, request: &DownloadRequest) -> Result<(), DownloadError>;
}

/// Hand a request to a sink, logging the outcome.
///
/// Returns true if the sink accepted the request. Failures never propagate.
pub fn trigger_download<S: DownloadSink + ?Sized>(sink: &mut S, request: &DownloadRequest) -> bool {
    match sink.download(request) {
        Ok(()) => {
            log::info!("Downloading {} as {}", request.url, request.file_name);
            true
        }
        Err(DownloadError::Cancelled) => {
            log::debug!("Download of {} cancelled", request.url);
            false
        }
        Err(err) => {
            log::error!("Download of {} failed: {err}", request.url);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingSink {
        requests: Vec<DownloadRequest>,
        reject: bool,
    }

    impl DownloadSink for RecordingSink {
        fn download(&mut self, request: &DownloadRequest) -> Result<(), DownloadError> {
            if self.reject {
                return Err(DownloadError::UnsupportedSource(request.url.clone()));
            }
            self.requests.push(request.clone());
            Ok(())
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(DownloadRequest::enlarged("a.png").file_name, "image.png");
        assert_eq!(DownloadRequest::thumbnail("a.png", 0).file_name, "image_1.png");
        assert_eq!(thumbnail_file_name(9), "image_10.png");
    }

    #[test]
    fn test_local_path() {
        let req = DownloadRequest::enlarged("file:///tmp/out.png");
        assert_eq!(req.local_path(), Some(PathBuf::from("/tmp/out.png")));

        let req = DownloadRequest::enlarged("renders/out.png");
        assert_eq!(req.local_path(), Some(PathBuf::from("renders/out.png")));

        let req = DownloadRequest::enlarged("https://cdn.example.com/out.png");
        assert_eq!(req.local_path(), None);

        let req = DownloadRequest::enlarged("data:image/png;base64,AAAA");
        assert_eq!(req.local_path(), None);
    }

    #[test]
    fn test_trigger_absorbs_failures() {
        let mut sink = RecordingSink {
            requests: Vec::new(),
            reject: true,
        };
        let request = DownloadRequest::enlarged("https://cdn.example.com/out.png");
        assert!(!trigger_download(&mut sink, &request));

        sink.reject = false;
        assert!(trigger_download(&mut sink, &request));
        assert_eq!(sink.requests, vec![request]);
    }
}
