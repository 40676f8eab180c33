//! Asset download primitives
//!
//! Downloads stream straight to disk; buffering whole images in memory is
//! wasteful for multi-megabyte renders. Concurrency bounding happens at the
//! call site — remote image stores and local disks both have practical
//! ceilings, so the pipeline caps parallel transfers at
//! [`MAX_PARALLEL_DOWNLOADS`].

use crate::error::{Error, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Concurrent transfer cap per download set
pub(crate) const MAX_PARALLEL_DOWNLOADS: usize = 5;

/// Maximum node IDs per render API request
pub(crate) const MAX_NODES_PER_REQUEST: usize = 100;

/// Fetch `url` and stream the response body to `dest_path`.
///
/// A non-2xx response status is a failure. The destination's parent
/// directory must already exist; the pipeline creates it once at startup.
pub(crate) async fn download_file(
    http: &reqwest::Client,
    url: &str,
    dest_path: &Path,
) -> Result<()> {
    let mut resp = http.get(url).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(Error::DownloadStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let mut file = tokio::fs::File::create(dest_path).await?;
    while let Some(chunk) = resp.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(())
}

/// Extract the file extension from an image URL's path component, without
/// the leading dot. Falls back to `"png"` for empty, unparseable, or
/// extension-less URLs.
///
/// Used only for embedded-fill downloads, where the format is dictated by
/// what the remote store holds rather than by the caller's request.
pub(crate) fn detect_extension_from_url(raw_url: &str) -> String {
    let Ok(parsed) = url::Url::parse(raw_url) else {
        return "png".to_string();
    };

    match Path::new(parsed.path())
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) if !ext.is_empty() => ext.to_string(),
        _ => "png".to_string(),
    }
}
