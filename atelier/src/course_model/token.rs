//! Inline image token grammar
//!
//! An image token is literal text embedded in a sub-chapter's HTML content
//! matching `[image:image-<chapter>-<subChapter>-<image>]` with three
//! non-negative integer groups. The first two coordinates are
//! informational only in the current design: substitution resolves the
//! position index against the image list of the sub-chapter being
//! rendered, never a global lookup (see DESIGN.md, Open Questions).

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Regex source for the token grammar
pub const TOKEN_PATTERN: &str = r"\[image:image-(\d+)-(\d+)-(\d+)\]";

/// Compiled token regex, built once
pub fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

/// A parsed image token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageToken {
    /// Chapter index encoded at insertion time (informational)
    pub chapter: usize,

    /// Sub-chapter index encoded at insertion time (informational)
    pub sub_chapter: usize,

    /// Position index into the rendering sub-chapter's image list
    pub image: usize,
}

impl ImageToken {
    /// Create a token for the given coordinates
    pub fn new(chapter: usize, sub_chapter: usize, image: usize) -> Self {
        Self {
            chapter,
            sub_chapter,
            image,
        }
    }

    /// Parse a token from three regex capture groups
    ///
    /// Returns `None` when a group does not fit in `usize`; callers treat
    /// such a token the same as a dangling one.
    pub fn from_captures(caps: &regex::Captures<'_>) -> Option<Self> {
        let chapter = caps.get(1)?.as_str().parse().ok()?;
        let sub_chapter = caps.get(2)?.as_str().parse().ok()?;
        let image = caps.get(3)?.as_str().parse().ok()?;
        Some(Self {
            chapter,
            sub_chapter,
            image,
        })
    }

    /// All tokens appearing in an HTML fragment, in document order
    pub fn scan(content: &str) -> Vec<ImageToken> {
        token_regex()
            .captures_iter(content)
            .filter_map(|caps| ImageToken::from_captures(&caps))
            .collect()
    }
}

impl fmt::Display for ImageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[image:image-{}-{}-{}]",
            self.chapter, self.sub_chapter, self.image
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        let token = ImageToken::new(2, 0, 5);
        let text = token.to_string();
        assert_eq!(text, "[image:image-2-0-5]");

        let parsed = ImageToken::scan(&text);
        assert_eq!(parsed, vec![token]);
    }

    #[test]
    fn test_scan_document_order() {
        let content = "<p>a [image:image-0-0-1] b</p><p>[image:image-0-0-0]</p>";
        let tokens = ImageToken::scan(content);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].image, 1);
        assert_eq!(tokens[1].image, 0);
    }

    #[test]
    fn test_malformed_tokens_ignored() {
        // Missing group, negative number, stray caption brackets
        let content = "[image:image-0-1] [image:image-0-0--1] [photo] [image: image-0-0-0]";
        assert!(ImageToken::scan(content).is_empty());
    }
}
