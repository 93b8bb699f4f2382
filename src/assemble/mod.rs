//! Collection assembly: grouping, composition and output writing
//!
//! Two build paths share this module. `curls` turns `.curl` trees into
//! collections and bundles them; `combine` bundles pre-built collection and
//! environment JSON files. Both emit a workspace, a flattened mega
//! collection and a generation summary into the output directory.

pub mod combine;
pub mod curls;

use crate::errors::{ForgeError, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default API host baked into generated `base_url` variables
pub const DEFAULT_HOST: &str = "api.devrev.ai";

/// Fixed collection name prefix, stripped when flattening into the mega
/// collection
pub const COLLECTION_PREFIX: &str = "DevRev - ";

/// Subdirectory of the collections tree holding environment files, excluded
/// from per-API iteration
pub const ENVIRONMENTS_DIR: &str = "environments";

/// An input file that failed to parse, recorded so the batch can continue
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: ForgeError,
}

/// Report every skipped input once, after the batch has finished
pub fn report_skipped(skipped: &[SkippedFile]) {
    for entry in skipped {
        warn!(path = %entry.path.display(), error = %entry.error, "skipped input file");
    }
}

/// ISO-8601 generation timestamp
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Write a value as pretty-printed JSON
pub fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    std::fs::write(path, text)?;
    Ok(())
}

/// Strip the fixed collection prefix from a name, if present
pub fn strip_prefix(name: &str) -> String {
    name.strip_prefix(COLLECTION_PREFIX).unwrap_or(name).to_string()
}
