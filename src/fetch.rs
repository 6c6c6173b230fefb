//! Retrieval of the operon table
//!
//! Downloads a remote file to a local path unless that path already exists.
//! The body is streamed to `<path>.part` and renamed into place only once
//! the copy has succeeded, so a failed download never leaves a truncated
//! file at `path`.

use crate::core::FetchError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// RegulonDB download location of the operon table
pub const REGULONDB_OPERON_SET_URL: &str =
    "http://regulondb.ccg.unam.mx/menu/download/datasets/files/OperonSet.txt";

/// What [`fetch_if_missing`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The local file existed; nothing was requested
    AlreadyPresent,
    /// The file was downloaded
    Downloaded { bytes: u64 },
}

/// Download `url` to `path` unless `path` already exists
pub fn fetch_if_missing<P: AsRef<Path>>(path: P, url: &str) -> Result<FetchOutcome, FetchError> {
    let path = path.as_ref();
    if path.exists() {
        log::debug!("{} already present, not fetching", path.display());
        return Ok(FetchOutcome::AlreadyPresent);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    log::info!("Fetching {} -> {}", url, path.display());
    let mut response = reqwest::blocking::get(url)?.error_for_status()?;

    let tmp_path = part_path(path);
    let mut writer = BufWriter::new(File::create(&tmp_path)?);
    let copied = response
        .copy_to(&mut writer)
        .map_err(FetchError::from)
        .and_then(|bytes| {
            writer.flush()?;
            Ok(bytes)
        });

    let bytes = match copied {
        Ok(bytes) => bytes,
        Err(e) => {
            drop(writer);
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
    };
    drop(writer);
    fs::rename(&tmp_path, path)?;

    log::info!("Fetched {} bytes", bytes);
    Ok(FetchOutcome::Downloaded { bytes })
}

fn part_path(path: &Path) -> PathBuf {
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(".part");
    PathBuf::from(tmp)
}
