//! JSON file helpers.
//!
//! - `read_json_file`: load any JSON document, typically an upstream response.
//! - `write_json_file`: pretty-print a serializable value to disk, creating
//!   parent directories as needed.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn read_json_file(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
