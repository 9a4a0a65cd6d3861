//! Field mutation commands for sub-chapters
//!
//! A sub-chapter field write is expressed as one explicit command rather
//! than a stringly-typed field name, and dispatched through a single
//! entry point on the editor. Each command replaces exactly one field;
//! all other fields are left untouched.

use super::media::MediaRef;

/// One field write on a sub-chapter
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCommand {
    /// Replace the title
    SetTitle(String),

    /// Replace the HTML content fragment
    SetContent(String),

    /// Replace (or clear) the video attachment
    SetVideo(Option<MediaRef>),

    /// Replace the ordered image list
    SetImages(Vec<MediaRef>),
}

impl FieldCommand {
    /// Name of the targeted field, for logging
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldCommand::SetTitle(_) => "title",
            FieldCommand::SetContent(_) => "content",
            FieldCommand::SetVideo(_) => "video",
            FieldCommand::SetImages(_) => "images",
        }
    }

    /// Apply this command to a sub-chapter, consuming the command
    pub fn apply_to(self, sub: &mut super::SubChapter) {
        match self {
            FieldCommand::SetTitle(title) => sub.title = title,
            FieldCommand::SetContent(content) => sub.content = content,
            FieldCommand::SetVideo(video) => sub.video = video,
            FieldCommand::SetImages(images) => sub.images = images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course_model::SubChapter;
    use std::path::PathBuf;

    #[test]
    fn test_apply_replaces_exactly_one_field() {
        let mut sub = SubChapter::new("Original");
        sub.content = "<p>text</p>".to_string();
        sub.images.push(MediaRef::Local(PathBuf::from("a.png")));

        FieldCommand::SetTitle("Renamed".to_string()).apply_to(&mut sub);

        assert_eq!(sub.title, "Renamed");
        assert_eq!(sub.content, "<p>text</p>");
        assert_eq!(sub.images.len(), 1);
        assert!(sub.video.is_none());
    }

    #[test]
    fn test_set_video_clears() {
        let mut sub = SubChapter::new("S");
        sub.video = Some(MediaRef::Remote("uploads/v.mp4".to_string()));

        FieldCommand::SetVideo(None).apply_to(&mut sub);
        assert!(sub.video.is_none());
    }
}
