// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Persisted audit table of every candidate in a run
//!
//! Two columns, `URL` and `Important Content`, one row per candidate in
//! search-rank order. The table is written to a temporary file beside the
//! target and renamed over it, so readers never see a half-written file.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use super::types::EvidenceItem;

/// Header row of the audit table
pub const AUDIT_HEADER: [&str; 2] = ["URL", "Important Content"];

/// Audit write errors
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("I/O error writing audit table: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error writing audit table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to move audit table into place at {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write `items` to `path`, replacing any previous table
pub fn write_audit_table(path: &Path, items: &[EvidenceItem]) -> Result<(), AuditError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
        writer.write_record(AUDIT_HEADER)?;
        for item in items {
            writer.write_record([item.url.as_str(), item.content.as_str()])?;
        }
        writer.flush()?;
    }
    tmp.as_file_mut().flush()?;

    tmp.persist(path).map_err(|e| AuditError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
