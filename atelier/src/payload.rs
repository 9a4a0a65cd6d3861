//! Save payload assembly
//!
//! Saving replaces the entire course document server-side: one request
//! carries the whole chapter tree serialized as JSON plus every
//! still-unsent binary (video/images) as a multipart part. Each binary
//! part name encodes its coordinates so the backend can re-associate the
//! file with the correct sub-chapter on arrival:
//!
//! - `video-<chapter>-<subChapter>`
//! - `image-<chapter>-<subChapter>-<imageIndex>`
//!
//! Attachments already living server-side (`MediaRef::Remote`) travel
//! only inside the JSON document.

use crate::course_model::{Course, MediaRef};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling the save payload
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("IO error reading {path}: {source}", path = .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// One multipart binary part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPart {
    /// Part name carrying the coordinates
    pub name: String,
    /// Original file name, for backend bookkeeping
    pub file_name: String,
    /// File contents
    pub bytes: Vec<u8>,
}

/// The assembled whole-document save payload
#[derive(Debug)]
pub struct SavePayload {
    /// Chapter tree serialized as JSON
    pub document: String,
    /// Still-local binaries, keyed by coordinates
    pub parts: Vec<PayloadPart>,
}

/// Part name for a sub-chapter's video
pub fn video_part_name(chapter: usize, sub_chapter: usize) -> String {
    format!("video-{}-{}", chapter, sub_chapter)
}

/// Part name for one image attachment
pub fn image_part_name(chapter: usize, sub_chapter: usize, image: usize) -> String {
    format!("image-{}-{}-{}", chapter, sub_chapter, image)
}

impl SavePayload {
    /// Serialize the course and collect every still-local binary
    pub fn build(course: &Course) -> Result<Self, PayloadError> {
        let document = serde_json::to_string(course)?;
        let mut parts = Vec::new();

        for (c, chapter) in course.chapters.iter().enumerate() {
            for (s, sub) in chapter.sub_chapters.iter().enumerate() {
                if let Some(video @ MediaRef::Local(path)) = &sub.video {
                    parts.push(PayloadPart {
                        name: video_part_name(c, s),
                        file_name: video.file_name(),
                        bytes: read_local(path)?,
                    });
                }
                for (i, image) in sub.images.iter().enumerate() {
                    if let MediaRef::Local(path) = image {
                        parts.push(PayloadPart {
                            name: image_part_name(c, s, i),
                            file_name: image.file_name(),
                            bytes: read_local(path)?,
                        });
                    }
                }
            }
        }

        log::info!(
            "Assembled save payload: {} bytes of JSON, {} binary parts",
            document.len(),
            parts.len()
        );

        Ok(Self { document, parts })
    }
}

/// Read one local attachment, tagging the error with the path
fn read_local(path: &PathBuf) -> Result<Vec<u8>, PayloadError> {
    fs::read(path).map_err(|source| PayloadError::IoError {
        path: path.clone(),
        source,
    })
}
