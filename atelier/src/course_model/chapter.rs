//! Chapter and sub-chapter structures

use serde::{Deserialize, Serialize};

use super::media::MediaRef;

/// The entire course document owned by one authoring session
///
/// The backend replaces the whole document on save; there is no
/// partial-update contract, so this tree is the single source of truth
/// for one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course title
    pub title: String,

    /// Ordered chapters (order defines reading order)
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Course {
    /// Create a new course with no chapters
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            chapters: Vec::new(),
        }
    }

    /// Total number of sub-chapters across all chapters
    pub fn sub_chapter_count(&self) -> usize {
        self.chapters.iter().map(|c| c.sub_chapters.len()).sum()
    }

    /// Total number of image attachments across all sub-chapters
    pub fn image_count(&self) -> usize {
        self.chapters
            .iter()
            .flat_map(|c| &c.sub_chapters)
            .map(|s| s.images.len())
            .sum()
    }
}

/// A chapter: a title plus an ordered list of sub-chapters
///
/// Sub-chapter ordering is significant and stable under insertion at the
/// end only; there is no reordering operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter title
    pub title: String,

    /// Ordered sub-chapters
    #[serde(default)]
    pub sub_chapters: Vec<SubChapter>,
}

impl Chapter {
    /// Create a new chapter with an empty sub-chapter list
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sub_chapters: Vec::new(),
        }
    }
}

/// A sub-chapter: the unit of authoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubChapter {
    /// Sub-chapter title
    pub title: String,

    /// HTML fragment authored via the rich-text surface; may contain zero
    /// or more inline image tokens
    #[serde(default)]
    pub content: String,

    /// Optional video, either still local (unsent) or a server-side path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<MediaRef>,

    /// Ordered image attachments; order is significant because tokens
    /// reference images by position, not by identity
    #[serde(default)]
    pub images: Vec<MediaRef>,
}

impl SubChapter {
    /// Create a new sub-chapter with empty content and no attachments
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            video: None,
            images: Vec::new(),
        }
    }
}
