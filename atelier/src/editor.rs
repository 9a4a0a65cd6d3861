//! Course editor state and mutation operations
//!
//! [`CourseEditor`] exclusively owns the in-memory chapter tree of one
//! authoring session and applies all structural mutations to it. The
//! active sub-chapter is an explicit `(chapter, sub_chapter)` selector
//! maintained here, never derived from widget focus state; selection-
//! dependent operations (inline styles, token insertion) route through
//! the surface bound to those coordinates.
//!
//! None of these operations fail in the domain sense; invalid indices
//! are defended with bounds checks and logged, never panicked on.

use crate::course_model::{Chapter, Course, FieldCommand, ImageToken, SubChapter};
use crate::surface::EditSurface;

/// Inline style tags supported by the authoring surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineTag {
    /// Heading level 1 (replace-selection semantics)
    H1,
    /// Heading level 2
    H2,
    /// Heading level 3
    H3,
    /// Bold
    Bold,
    /// Italic
    Italic,
    /// Underline
    Underline,
}

impl InlineTag {
    /// HTML element name for this tag
    pub fn tag_name(&self) -> &'static str {
        match self {
            InlineTag::H1 => "h1",
            InlineTag::H2 => "h2",
            InlineTag::H3 => "h3",
            InlineTag::Bold => "b",
            InlineTag::Italic => "i",
            InlineTag::Underline => "u",
        }
    }
}

/// Editor state for one course authoring session
#[derive(Debug)]
pub struct CourseEditor {
    course: Course,
    active: (usize, usize),
}

impl CourseEditor {
    /// Create an editor over an existing course document
    pub fn new(course: Course) -> Self {
        Self {
            course,
            active: (0, 0),
        }
    }

    /// The course document being edited
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Consume the editor and hand back the document
    pub fn into_course(self) -> Course {
        self.course
    }

    /// Active `(chapter, sub_chapter)` coordinates
    pub fn active(&self) -> (usize, usize) {
        self.active
    }

    /// Move the active selection to the given coordinates
    ///
    /// Out-of-range coordinates are a logged no-op.
    pub fn set_active(&mut self, chapter: usize, sub_chapter: usize) {
        if self.sub_chapter(chapter, sub_chapter).is_none() {
            log::warn!(
                "set_active: ({}, {}) is not a valid sub-chapter",
                chapter,
                sub_chapter
            );
            return;
        }
        self.active = (chapter, sub_chapter);
    }

    /// Sub-chapter at the given coordinates, if they are in range
    pub fn sub_chapter(&self, chapter: usize, sub_chapter: usize) -> Option<&SubChapter> {
        self.course.chapters.get(chapter)?.sub_chapters.get(sub_chapter)
    }

    /// Sub-chapter at the active coordinates
    pub fn active_sub_chapter(&self) -> Option<&SubChapter> {
        self.sub_chapter(self.active.0, self.active.1)
    }

    /// Append a new chapter with an empty sub-chapter list
    ///
    /// Always succeeds; returns the new chapter's index.
    pub fn add_chapter(&mut self) -> usize {
        let index = self.course.chapters.len();
        let title = format!("Chapter {}", index + 1);
        self.course.chapters.push(Chapter::new(title));
        index
    }

    /// Remove the chapter at `index`, shifting later chapters down
    ///
    /// Tokens in other chapters that encoded this chapter's coordinates
    /// simply keep their (informational) numbers; they resolve against
    /// whatever sub-chapter renders them. Out-of-range is a logged no-op.
    pub fn remove_chapter(&mut self, index: usize) {
        if index >= self.course.chapters.len() {
            log::warn!(
                "remove_chapter: index {} out of range ({} chapters)",
                index,
                self.course.chapters.len()
            );
            return;
        }
        self.course.chapters.remove(index);
        self.clamp_active();
    }

    /// Append a sub-chapter to the chapter at `chapter`
    ///
    /// The new sub-chapter gets a synthesized default title and becomes
    /// the active editing target. Returns its index, or `None` when the
    /// chapter index is out of range (logged no-op).
    pub fn add_sub_chapter(&mut self, chapter: usize) -> Option<usize> {
        let Some(chap) = self.course.chapters.get_mut(chapter) else {
            log::warn!("add_sub_chapter: chapter {} out of range", chapter);
            return None;
        };
        let index = chap.sub_chapters.len();
        let title = format!("Sub-chapter {}", index + 1);
        chap.sub_chapters.push(SubChapter::new(title));
        self.active = (chapter, index);
        Some(index)
    }

    /// Remove the sub-chapter at `(chapter, sub_chapter)`
    ///
    /// Later siblings shift down; the active selection resets to index 0
    /// of the same chapter. Out-of-range is a logged no-op.
    pub fn remove_sub_chapter(&mut self, chapter: usize, sub_chapter: usize) {
        let Some(chap) = self.course.chapters.get_mut(chapter) else {
            log::warn!("remove_sub_chapter: chapter {} out of range", chapter);
            return;
        };
        if sub_chapter >= chap.sub_chapters.len() {
            log::warn!(
                "remove_sub_chapter: index {} out of range ({} sub-chapters)",
                sub_chapter,
                chap.sub_chapters.len()
            );
            return;
        }
        chap.sub_chapters.remove(sub_chapter);
        self.active = (chapter, 0);
        self.clamp_active();
    }

    /// Apply one field command to the sub-chapter at the coordinates
    ///
    /// Replaces exactly one field; sibling sub-chapters and other
    /// chapters are untouched. Out-of-range is a logged no-op.
    pub fn apply(&mut self, chapter: usize, sub_chapter: usize, command: FieldCommand) {
        let field = command.field_name();
        let Some(sub) = self
            .course
            .chapters
            .get_mut(chapter)
            .and_then(|c| c.sub_chapters.get_mut(sub_chapter))
        else {
            log::warn!(
                "apply: ({}, {}) is not a valid sub-chapter, dropping {} write",
                chapter,
                sub_chapter,
                field
            );
            return;
        };
        command.apply_to(sub);
    }

    /// Toggle an inline style on the surface's current selection
    ///
    /// A selection already wrapped by the element is unwrapped; otherwise
    /// it is wrapped (for headings: the selected text becomes the sole
    /// content of a new heading element). The resulting HTML is written
    /// back to the active sub-chapter's content. Without a selection this
    /// is a no-op.
    pub fn apply_inline_style(&mut self, tag: InlineTag, surface: &mut dyn EditSurface) {
        let Some((start, end)) = surface.selection() else {
            log::debug!("apply_inline_style: no selection, nothing to toggle");
            return;
        };

        let html = surface.html().to_string();
        if !html.is_char_boundary(start) || !html.is_char_boundary(end) || start > end {
            log::warn!(
                "apply_inline_style: selection ({}, {}) does not map onto the content",
                start,
                end
            );
            return;
        }

        let open = format!("<{}>", tag.tag_name());
        let close = format!("</{}>", tag.tag_name());
        let selected = &html[start..end];

        let (new_html, new_start, new_end) = if html[..start].ends_with(open.as_str())
            && html[end..].starts_with(close.as_str())
        {
            // Selection sits inside an existing wrapper: toggle off
            let mut out = String::with_capacity(html.len());
            out.push_str(&html[..start - open.len()]);
            out.push_str(selected);
            out.push_str(&html[end + close.len()..]);
            (out, start - open.len(), end - open.len())
        } else if selected.starts_with(open.as_str())
            && selected.ends_with(close.as_str())
            && selected.len() >= open.len() + close.len()
        {
            // Selection spans the wrapper itself: toggle off
            let inner = &selected[open.len()..selected.len() - close.len()];
            let mut out = String::with_capacity(html.len());
            out.push_str(&html[..start]);
            out.push_str(inner);
            out.push_str(&html[end..]);
            (out, start, end - open.len() - close.len())
        } else {
            // Toggle on
            let mut out = String::with_capacity(html.len() + open.len() + close.len());
            out.push_str(&html[..start]);
            out.push_str(&open);
            out.push_str(selected);
            out.push_str(&close);
            out.push_str(&html[end..]);
            (out, start + open.len(), end + open.len())
        };

        surface.set_html(new_html.clone());
        surface.set_selection(new_start, new_end);

        let (chapter, sub_chapter) = self.active;
        self.apply(chapter, sub_chapter, FieldCommand::SetContent(new_html));
    }

    /// Insert an image token at the surface caret
    ///
    /// The token encodes the active coordinates plus the given image
    /// position index; the index is not validated against the image list,
    /// so a later image deletion can leave the token dangling (resolved
    /// at render time). The updated HTML is written back to the active
    /// sub-chapter's content.
    pub fn insert_image_token(&mut self, surface: &mut dyn EditSurface, image_index: usize) {
        let (chapter, sub_chapter) = self.active;
        let token = ImageToken::new(chapter, sub_chapter, image_index);

        let html = surface.html().to_string();
        let caret = surface.caret();
        if !html.is_char_boundary(caret) {
            log::warn!("insert_image_token: caret {} is not a char boundary", caret);
            return;
        }

        let mut out = String::with_capacity(html.len() + 24);
        out.push_str(&html[..caret]);
        let token_text = token.to_string();
        out.push_str(&token_text);
        out.push_str(&html[caret..]);

        surface.set_html(out.clone());
        surface.set_caret(caret + token_text.len());

        self.apply(chapter, sub_chapter, FieldCommand::SetContent(out));
    }

    /// Pull the active selection back into range after a removal
    fn clamp_active(&mut self) {
        let (mut chapter, mut sub_chapter) = self.active;
        if chapter >= self.course.chapters.len() {
            chapter = self.course.chapters.len().saturating_sub(1);
            sub_chapter = 0;
        }
        if let Some(chap) = self.course.chapters.get(chapter) {
            if sub_chapter >= chap.sub_chapters.len() {
                sub_chapter = chap.sub_chapters.len().saturating_sub(1);
            }
        }
        self.active = (chapter, sub_chapter);
    }
}
