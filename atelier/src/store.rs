//! Course document persistence on disk
//!
//! The CLI round-trips course documents as JSON files using the same
//! schema the backend contract uses, so a saved file is exactly the
//! `document` field of the save payload, pretty-printed.

use crate::course_model::Course;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or saving a course document
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error accessing {path}: {source}", path = .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}", path = .path.display())]
    JsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load a course document from a JSON file
pub fn load_course<P: AsRef<Path>>(path: P) -> Result<Course, StoreError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| StoreError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| StoreError::JsonError {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a course document to a JSON file
pub fn save_course<P: AsRef<Path>>(course: &Course, path: P) -> Result<(), StoreError> {
    let path = path.as_ref();
    let content =
        serde_json::to_string_pretty(course).map_err(|source| StoreError::JsonError {
            path: path.to_path_buf(),
            source,
        })?;

    fs::write(path, content).map_err(|source| StoreError::IoError {
        path: path.to_path_buf(),
        source,
    })
}
