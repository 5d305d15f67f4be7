use crate::error::{Result, WorkbookError};
use std::path::PathBuf;
use std::time::Duration;

/// Where the workbook bytes come from.
///
/// The dataset usually ships as a static file next to the frontend, so
/// both a local path and an HTTP URL are accepted; either way the source
/// yields one opaque byte buffer per fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkbookSource {
    Path(PathBuf),
    Url(String),
}

impl WorkbookSource {
    /// Interpret a CLI-style location string: anything with an http(s)
    /// scheme is a URL, everything else a filesystem path.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::Path(PathBuf::from(location))
        }
    }

    /// Fetch the workbook byte buffer.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or the HTTP request
    /// fails (including non-success status codes).
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            Self::Path(path) => {
                tracing::debug!(path = %path.display(), "reading workbook file");
                Ok(std::fs::read(path)?)
            }
            Self::Url(url) => {
                tracing::debug!(url, "fetching workbook over HTTP");
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(30))
                    .no_proxy()
                    .build()
                    .map_err(|e| WorkbookError::Fetch(e.to_string()))?;

                let response = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| WorkbookError::Fetch(e.to_string()))?
                    .error_for_status()
                    .map_err(|e| WorkbookError::Fetch(e.to_string()))?;

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| WorkbookError::Fetch(e.to_string()))?;
                Ok(bytes.to_vec())
            }
        }
    }
}

impl std::fmt::Display for WorkbookSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}
