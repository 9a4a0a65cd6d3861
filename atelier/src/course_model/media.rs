//! Dual representation of binary attachments
//!
//! A video or image attachment is either a local file that has not been
//! sent to the backend yet, or a server-side path returned by a previous
//! upload. The two states are mutually exclusive by construction.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reference to a binary attachment (video or image)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum MediaRef {
    /// Unsent local file on disk
    Local(PathBuf),

    /// Server-side path relative to the backend's static-asset base
    Remote(String),
}

impl MediaRef {
    /// Whether this attachment still lives only on the local disk
    pub fn is_local(&self) -> bool {
        matches!(self, MediaRef::Local(_))
    }

    /// Best-effort file name for multipart part metadata
    pub fn file_name(&self) -> String {
        match self {
            MediaRef::Local(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string()),
            MediaRef::Remote(path) => path
                .rsplit('/')
                .next()
                .unwrap_or("attachment")
                .to_string(),
        }
    }
}
