//! Resolving hrefs to local files.
//!
//! libnetcdf needs a file path, so remote files are downloaded to a temp file
//! that lives as long as the [`FileSource`]. Callers can supply a
//! [`ReadHrefModifier`] to rewrite an href before the request is made
//! (URL signing, mirror selection).

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};

/// Hook to rewrite an href before a remote file is opened.
pub type ReadHrefModifier = dyn Fn(&str) -> String + Send + Sync;

/// A readable local path, possibly backed by a staged download.
pub struct FileSource {
    path: PathBuf,
    _staged: Option<tempfile::NamedTempFile>,
}

impl FileSource {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn is_remote(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Resolve an href to a local file.
///
/// Local paths are returned as-is; the modifier only applies to remote hrefs.
pub fn resolve(href: &str, modifier: Option<&ReadHrefModifier>) -> NetCdfResult<FileSource> {
    if !is_remote(href) {
        return Ok(FileSource {
            path: PathBuf::from(href),
            _staged: None,
        });
    }

    let effective = match modifier {
        Some(modify) => modify(href),
        None => href.to_string(),
    };

    debug!(href = %href, effective = %effective, "Fetching remote NetCDF file");

    let response = reqwest::blocking::get(&effective)
        .and_then(|r| r.error_for_status())
        .map_err(|e| NetCdfError::Fetch {
            href: href.to_string(),
            message: e.to_string(),
        })?;
    let bytes = response.bytes().map_err(|e| NetCdfError::Fetch {
        href: href.to_string(),
        message: e.to_string(),
    })?;

    let mut staged = tempfile::Builder::new().suffix(".nc").tempfile()?;
    staged.write_all(&bytes)?;
    staged.flush()?;

    debug!(href = %href, bytes = bytes.len(), "Staged remote NetCDF file");

    Ok(FileSource {
        path: staged.path().to_path_buf(),
        _staged: Some(staged),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_href_passes_through() {
        let source = resolve("/data/test.nc", None).unwrap();
        assert_eq!(source.path(), Path::new("/data/test.nc"));
    }

    #[test]
    fn test_modifier_not_applied_to_local_paths() {
        let modifier = |_href: &str| "http://should-not-be-used".to_string();
        let source = resolve("relative/test.nc", Some(&modifier)).unwrap();
        assert_eq!(source.path(), Path::new("relative/test.nc"));
    }

    #[test]
    fn test_modifier_applied_to_remote_hrefs() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let called = Arc::new(AtomicBool::new(false));
        let called_in_modifier = Arc::clone(&called);
        let modifier = move |href: &str| {
            called_in_modifier.store(true, Ordering::SeqCst);
            // Unroutable, so the fetch fails fast after the rewrite.
            format!("{}#signed", href.replace("example.invalid", "127.0.0.1:9"))
        };
        let result = resolve("https://example.invalid/test.nc", Some(&modifier));

        assert!(called.load(Ordering::SeqCst));
        assert!(matches!(result, Err(NetCdfError::Fetch { .. })));
    }
}
