//! Creating new entries inside an upload and addressing them.

use crate::{
    entry::render_entry,
    error::MatprocError,
    host::{ArchiveContext, FileType},
};
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use matproc_schemas::file_formats::EntryFile;
use serde_json::Value;
use sha2::{Digest, Sha512};
use tracing::{debug, error};

const ENTRY_ID_LENGTH: usize = 28;

/// Entry id of the raw file `filename` in upload `upload_id`.
pub fn entry_id(upload_id: &str, filename: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(upload_id.as_bytes());
    hasher.update(filename.as_bytes());
    let mut id = URL_SAFE.encode(hasher.finalize());
    id.truncate(ENTRY_ID_LENGTH);
    id
}

pub fn entry_reference(upload_id: &str, entry_id: &str) -> String {
    format!("../uploads/{upload_id}/archive/{entry_id}")
}

/// Reference to the `data` section of the entry created from `filename`.
pub fn hash_reference(upload_id: &str, filename: &str) -> String {
    format!(
        "{}#data",
        entry_reference(upload_id, &entry_id(upload_id, filename))
    )
}

/// Splits `../uploads/{upload_id}/archive/{entry_id}[#data]` into its ids.
pub fn parse_entry_reference(reference: &str) -> Option<(&str, &str)> {
    let path = reference.split('#').next()?;
    let rest = path.strip_prefix("../uploads/")?;
    let (upload_id, entry_id) = rest.split_once("/archive/")?;
    if upload_id.is_empty() || entry_id.is_empty() || entry_id.contains('/') {
        return None;
    }
    Some((upload_id, entry_id))
}

/// Link to an entry page as used in figures.
pub fn entry_page_link(upload_id: &str, entry_id: &str) -> String {
    format!("../../../{upload_id}/entry/id/{entry_id}")
}

/// Structural equality where two NaNs are equal and numbers compare by value.
pub fn nan_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y || (x.is_nan() && y.is_nan()),
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| nan_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| nan_equal(x, y)))
        }
        _ => a == b,
    }
}

/// What [`create_archive`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedArchive {
    pub reference: String,
    /// False when an existing file with different content was left in place.
    pub written: bool,
}

fn parse_existing(contents: &str, file_type: FileType) -> Option<Value> {
    match file_type {
        FileType::Json => serde_json::from_str(contents).ok(),
        FileType::Yaml => serde_yaml::from_str(contents).ok(),
    }
}

/// Writes `entry` to the raw file `filename` and returns the reference of the
/// resulting entry.
///
/// An existing file is only replaced when `overwrite` is set or its content is equal
/// to the new one. Client contexts cannot create entries and get `None`.
pub fn create_archive(
    entry: &EntryFile,
    ctx: &dyn ArchiveContext,
    filename: &str,
    file_type: FileType,
    overwrite: bool,
) -> Result<Option<CreatedArchive>, MatprocError> {
    if ctx.is_client() {
        return Ok(None);
    }
    let exists = ctx.raw_path_exists(filename);
    let equal = if exists {
        let existing = ctx.read_raw_file(filename)?;
        let new = serde_json::to_value(entry)?;
        parse_existing(&existing, file_type).is_some_and(|old| nan_equal(&old, &new))
    } else {
        false
    };

    let written = !exists || overwrite || equal;
    if written {
        ctx.write_raw_file(filename, &render_entry(entry, file_type)?)?;
        ctx.process_updated_raw_file(filename)?;
        debug!(filename, "entry written");
    } else {
        error!(
            filename,
            "archive file already exists with a different content; not overwriting it"
        );
    }
    Ok(Some(CreatedArchive {
        reference: hash_reference(ctx.upload_id(), filename),
        written,
    }))
}

/// The first `{prefix}_{i}.{suffix}` with `i = 0, 1, ...` that does not exist yet.
pub fn create_unique_filename(ctx: &dyn ArchiveContext, prefix: &str, suffix: &str) -> String {
    (0..)
        .map(|i| format!("{prefix}_{i}.{suffix}"))
        .find(|name| !ctx.raw_path_exists(name))
        .unwrap_or_else(|| format!("{prefix}.{suffix}"))
}
