use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use downloads_core::DownloadRecord;
use engine_logging::engine_info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub records_filename: String,
    pub manifest_filename: Option<String>,
    pub pretty: bool,
    /// Export every assembled record instead of only the usable ones.
    pub include_dropped: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            records_filename: "downloads.json".to_string(),
            manifest_filename: Some("manifest.json".to_string()),
            pretty: true,
            include_dropped: false,
        }
    }
}

/// Records of one completed pass, ready to be written.
#[derive(Debug, Clone, Copy)]
pub struct ExportBatch<'a> {
    pub records: &'a [DownloadRecord],
    pub dropped: usize,
    pub generation: u64,
    pub extracted_utc: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub record_count: usize,
    pub records_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("output directory {dir:?} is not usable: {message}")]
    OutputDir { dir: PathBuf, message: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn write_export(
    output_dir: &Path,
    batch: ExportBatch<'_>,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let records_json = if options.pretty {
        serde_json::to_vec_pretty(batch.records)?
    } else {
        serde_json::to_vec(batch.records)?
    };
    let records_path = write_atomically(output_dir, &options.records_filename, &records_json)?;

    let manifest_path = match options.manifest_filename.as_deref() {
        Some(name) => {
            let manifest = json!({
                "record_count": batch.records.len(),
                "dropped_count": batch.dropped,
                "generation": batch.generation,
                "extracted_utc": batch.extracted_utc,
                "records_file": options.records_filename,
            });
            let bytes = serde_json::to_vec_pretty(&manifest)?;
            Some(write_atomically(output_dir, name, &bytes)?)
        }
        None => None,
    };

    engine_info!(
        "exported {} records to {:?}",
        batch.records.len(),
        records_path
    );
    Ok(ExportSummary {
        record_count: batch.records.len(),
        records_path,
        manifest_path,
    })
}

/// Writes into a temp file next to the target and renames it into place, so
/// readers never observe a half-written export.
fn write_atomically(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|err| ExportError::OutputDir {
        dir: dir.to_path_buf(),
        message: err.to_string(),
    })?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|err| ExportError::Io(err.error))?;
    Ok(target)
}
