//! Rich-text surface seam and caret-preserving content sync
//!
//! The editor never talks to a live rich-text widget directly; it goes
//! through [`EditSurface`], a minimal view of one editable HTML field:
//! its HTML, its focus flag, and its selection/caret anchors expressed as
//! byte offsets into the HTML string. [`BufferSurface`] is the in-memory
//! implementation used by the CLI and the tests.
//!
//! [`sync_content`] refreshes a surface from the externally-held content
//! string without discarding the caret of a user who is actively typing.
//! Naively re-assigning editable content collapses the caret to the start
//! of the field, so the protocol skips identical writes and restores the
//! captured anchors when they still land on valid positions.

/// One editable rich-text field, as seen by the editor
pub trait EditSurface {
    /// Current HTML of the surface
    fn html(&self) -> &str;

    /// Replace the surface HTML. Collapses the caret to the start and
    /// drops the selection, like a raw content re-assignment does.
    fn set_html(&mut self, html: String);

    /// Whether the user is currently typing in this surface
    fn has_focus(&self) -> bool;

    /// Selection as `(start, end)` byte offsets, if any
    fn selection(&self) -> Option<(usize, usize)>;

    /// Restore a selection captured earlier
    fn set_selection(&mut self, start: usize, end: usize);

    /// Drop the selection without moving the caret
    fn clear_selection(&mut self);

    /// Caret position as a byte offset
    fn caret(&self) -> usize;

    /// Move the caret
    fn set_caret(&mut self, pos: usize);
}

/// In-memory edit surface
#[derive(Debug, Default)]
pub struct BufferSurface {
    html: String,
    focused: bool,
    selection: Option<(usize, usize)>,
    caret: usize,
}

impl BufferSurface {
    /// Create an empty, unfocused surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface pre-loaded with HTML
    pub fn with_html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Self::default()
        }
    }

    /// Give the surface focus
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Remove focus
    pub fn blur(&mut self) {
        self.focused = false;
    }
}

impl EditSurface for BufferSurface {
    fn html(&self) -> &str {
        &self.html
    }

    fn set_html(&mut self, html: String) {
        self.html = html;
        self.caret = 0;
        self.selection = None;
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        let end = end.min(self.html.len());
        let start = start.min(end);
        self.selection = Some((start, end));
        self.caret = end;
    }

    fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn caret(&self) -> usize {
        self.caret.min(self.html.len())
    }

    fn set_caret(&mut self, pos: usize) {
        self.caret = pos.min(self.html.len());
    }
}

/// Refresh a surface from the externally-held content string
///
/// Skips the write entirely when the surface already shows the target
/// HTML. When a write is necessary and the surface is focused, the
/// selection and caret are captured first and restored afterwards if they
/// still map onto valid char boundaries of the new content; otherwise the
/// caret is left at the surface's default post-write position. Never
/// errors.
pub fn sync_content(surface: &mut dyn EditSurface, target: &str) {
    if surface.html() == target {
        return;
    }

    let anchors = if surface.has_focus() {
        Some((surface.selection(), surface.caret()))
    } else {
        None
    };

    surface.set_html(target.to_string());

    let Some((selection, caret)) = anchors else {
        return;
    };

    if let Some((start, end)) = selection {
        if end <= target.len() && target.is_char_boundary(start) && target.is_char_boundary(end) {
            surface.set_selection(start, end);
        }
    }

    if caret <= target.len() && target.is_char_boundary(caret) {
        surface.set_caret(caret);
    }
}
