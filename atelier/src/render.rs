//! Read-side image-token substitution and HTML export
//!
//! Given a sub-chapter's content HTML and its image list, substitution
//! replaces every inline image token with a displayable `<img>` element
//! in a single left-to-right pass; replacement output is never re-scanned,
//! so bracket syntax inside a resolved source cannot trigger pathological
//! re-substitution. Only the position index of a token is used for the
//! lookup, against the image list of the sub-chapter being rendered.
//!
//! The module also exports a whole course to a single styled HTML file,
//! chapter by chapter.

use crate::course_model::{Course, ImageToken, MediaRef, SubChapter};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use itertools::Itertools;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during HTML export
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Rendering context for token substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Public reading view: dangling tokens emit nothing
    Reading,
    /// Authoring preview: dangling tokens emit a visible placeholder
    Preview,
}

/// A token whose position index no longer resolves to an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DanglingToken {
    /// Chapter index of the sub-chapter holding the token
    pub chapter: usize,
    /// Sub-chapter index within that chapter
    pub sub_chapter: usize,
    /// The token as written in the content
    pub token: ImageToken,
}

/// Expand every image token in a content fragment
///
/// Deterministic for a fixed `(content, images)` pair, and idempotent on
/// token-free content: when nothing matches, the input is returned
/// byte-for-byte unchanged.
pub fn substitute_tokens(
    content: &str,
    images: &[MediaRef],
    mode: RenderMode,
    asset_base: &str,
) -> String {
    crate::course_model::token::token_regex()
        .replace_all(content, |caps: &regex::Captures<'_>| {
            let image = ImageToken::from_captures(caps).and_then(|t| images.get(t.image));
            match image.and_then(|r| resolve_image_src(r, asset_base)) {
                Some(src) => format!(
                    "<img src=\"{}\" alt=\"\" class=\"chapter-image\">",
                    escape_html(&src)
                ),
                None => missing_image(mode),
            }
        })
        .into_owned()
}

/// Placeholder for a token that does not resolve to a displayable image
fn missing_image(mode: RenderMode) -> String {
    match mode {
        RenderMode::Reading => String::new(),
        RenderMode::Preview => "<span class=\"image-missing\">Image not found</span>".to_string(),
    }
}

/// Resolve an attachment to an `<img>`-able source
///
/// A server-side reference is joined onto the static-asset base path. A
/// still-local file is embedded as a base64 data URL; a read failure is
/// logged and treated like a missing image.
fn resolve_image_src(media: &MediaRef, asset_base: &str) -> Option<String> {
    match media {
        MediaRef::Remote(path) => {
            let base = asset_base.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            Some(format!("{}/{}", base, path))
        }
        MediaRef::Local(path) => {
            let data = match fs::read(path) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!("Failed to read image {}: {}", path.display(), e);
                    return None;
                }
            };
            let mime = mime_for_extension(path);
            Some(format!("data:{};base64,{}", mime, STANDARD.encode(&data)))
        }
    }
}

/// MIME type guessed from a file extension
fn mime_for_extension(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Find every dangling token in a course
///
/// Repeated occurrences of the same token within one sub-chapter are
/// reported once.
pub fn scan_dangling(course: &Course) -> Vec<DanglingToken> {
    let mut dangling = Vec::new();
    for (c, chapter) in course.chapters.iter().enumerate() {
        for (s, sub) in chapter.sub_chapters.iter().enumerate() {
            dangling.extend(
                ImageToken::scan(&sub.content)
                    .into_iter()
                    .unique()
                    .filter(|t| t.image >= sub.images.len())
                    .map(|token| DanglingToken {
                        chapter: c,
                        sub_chapter: s,
                        token,
                    }),
            );
        }
    }
    dangling
}

/// Render a whole course to a single HTML document string
pub fn render_course(course: &Course, mode: RenderMode, asset_base: &str) -> String {
    let mut output = String::new();

    write_html_header(&mut output, &course.title);
    output.push_str("<body>\n");
    output.push_str("<div class=\"container\">\n");
    output.push_str(&format!(
        "<h1 class=\"course-title\">{}</h1>\n",
        escape_html(&course.title)
    ));

    for chapter in &course.chapters {
        output.push_str(&format!(
            "<h2 class=\"chapter-title\">{}</h2>\n",
            escape_html(&chapter.title)
        ));
        for sub in &chapter.sub_chapters {
            write_sub_chapter(&mut output, sub, mode, asset_base);
        }
    }

    output.push_str("</div>\n");
    output.push_str("</body>\n");
    output.push_str("</html>\n");
    output
}

/// Export a course to an HTML file
pub fn to_html(
    course: &Course,
    output_path: &Path,
    mode: RenderMode,
    asset_base: &str,
) -> Result<(), RenderError> {
    let output = render_course(course, mode, asset_base);

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(output_path)?;
    file.write_all(output.as_bytes())?;

    Ok(())
}

/// Write one sub-chapter: title, optional video, substituted content
fn write_sub_chapter(output: &mut String, sub: &SubChapter, mode: RenderMode, asset_base: &str) {
    output.push_str(&format!(
        "<h3 class=\"sub-chapter-title\">{}</h3>\n",
        escape_html(&sub.title)
    ));

    match &sub.video {
        Some(MediaRef::Remote(path)) => {
            let base = asset_base.trim_end_matches('/');
            output.push_str(&format!(
                "<video controls class=\"chapter-video\" src=\"{}/{}\"></video>\n",
                escape_html(base),
                escape_html(path.trim_start_matches('/'))
            ));
        }
        Some(MediaRef::Local(path)) => {
            // Not embeddable before upload; only the preview mentions it
            if mode == RenderMode::Preview {
                output.push_str(&format!(
                    "<p class=\"video-pending\">Video pending upload: {}</p>\n",
                    escape_html(&path.display().to_string())
                ));
            }
        }
        None => {}
    }

    output.push_str("<div class=\"sub-chapter-content\">\n");
    output.push_str(&substitute_tokens(&sub.content, &sub.images, mode, asset_base));
    output.push_str("\n</div>\n");
}

/// Write HTML header with CSS styling
fn write_html_header(output: &mut String, title: &str) {
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"fr\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str("<style>\n");
    output.push_str(CSS_STYLES);
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Embedded CSS for the exported course page
const CSS_STYLES: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto',
                 'Helvetica Neue', sans-serif;
    line-height: 1.6;
    color: #333;
    background-color: #f5f5f5;
    padding: 20px;
}

.container {
    max-width: 820px;
    margin: 0 auto;
    background: white;
    padding: 48px;
    box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);
    border-radius: 4px;
}

.course-title {
    font-size: 2.2em;
    border-bottom: 3px solid #0066cc;
    padding-bottom: 10px;
    margin-bottom: 24px;
}

.chapter-title {
    margin-top: 36px;
    border-bottom: 2px solid #e0e0e0;
    padding-bottom: 6px;
}

.sub-chapter-title {
    margin-top: 24px;
    color: #1a1a1a;
}

.sub-chapter-content p {
    margin-bottom: 14px;
}

.chapter-image {
    max-width: 100%;
    height: auto;
    display: block;
    margin: 20px auto;
    border: 1px solid #e1e4e8;
    border-radius: 4px;
}

.chapter-video {
    width: 100%;
    margin: 20px 0;
}

.image-missing {
    color: #d73a49;
    background-color: #ffeef0;
    padding: 4px 10px;
    border-radius: 4px;
}

.video-pending {
    color: #735c0f;
    background-color: #fffbdd;
    padding: 8px 12px;
    border-radius: 4px;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course_model::Chapter;

    fn remote_images(n: usize) -> Vec<MediaRef> {
        (0..n)
            .map(|i| MediaRef::Remote(format!("img/i{}.png", i)))
            .collect()
    }

    #[test]
    fn test_token_resolves_by_position() {
        let images = remote_images(3);
        let out = substitute_tokens(
            "before [image:image-0-0-1] after",
            &images,
            RenderMode::Reading,
            "https://cdn.example.com/assets",
        );
        assert!(out.contains("https://cdn.example.com/assets/img/i1.png"));
        assert!(!out.contains("i0.png"));
        assert!(!out.contains("[image:"));
    }

    #[test]
    fn test_idempotent_on_token_free_content() {
        let content = "<p>plain [brackets] but no token, 100% intact &amp; untouched</p>";
        let out = substitute_tokens(content, &remote_images(2), RenderMode::Preview, "/assets");
        assert_eq!(out, content);
    }

    #[test]
    fn test_dangling_token_reading_emits_nothing() {
        let images = remote_images(1);
        let out = substitute_tokens(
            "<p>a [image:image-0-0-1] b</p>",
            &images,
            RenderMode::Reading,
            "/assets",
        );
        assert_eq!(out, "<p>a  b</p>");
    }

    #[test]
    fn test_dangling_token_preview_flags() {
        let out = substitute_tokens(
            "<p>[image:image-0-0-4]</p>",
            &remote_images(1),
            RenderMode::Preview,
            "/assets",
        );
        assert_eq!(
            out,
            "<p><span class=\"image-missing\">Image not found</span></p>"
        );
    }

    #[test]
    fn test_replacement_output_not_rescanned() {
        // The resolved source itself contains token-shaped text; a second
        // scanning pass would corrupt it
        let images = vec![MediaRef::Remote("we[image:image-0-0-0].png".to_string())];
        let out = substitute_tokens(
            "[image:image-0-0-0]",
            &images,
            RenderMode::Reading,
            "/assets",
        );
        assert_eq!(out.matches("<img ").count(), 1);
        assert!(out.contains("we[image:image-0-0-0].png"));
    }

    #[test]
    fn test_local_image_becomes_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        std::fs::write(&path, b"not-really-png").unwrap();

        let images = vec![MediaRef::Local(path)];
        let out = substitute_tokens(
            "[image:image-0-0-0]",
            &images,
            RenderMode::Preview,
            "/assets",
        );
        assert!(out.starts_with("<img src=\"data:image/png;base64,"));
    }

    #[test]
    fn test_unreadable_local_image_treated_as_missing() {
        let images = vec![MediaRef::Local(std::path::PathBuf::from(
            "/nonexistent/missing.png",
        ))];
        let out = substitute_tokens(
            "[image:image-0-0-0]",
            &images,
            RenderMode::Reading,
            "/assets",
        );
        assert_eq!(out, "");
    }

    #[test]
    fn test_scan_dangling_reports_once_per_sub_chapter() {
        let mut course = Course::new("C");
        let mut chapter = Chapter::new("Ch 1");
        let mut sub = SubChapter::new("S 1");
        sub.images = remote_images(1);
        sub.content =
            "[image:image-0-0-0] [image:image-0-0-2] again [image:image-0-0-2]".to_string();
        chapter.sub_chapters.push(sub);
        course.chapters.push(chapter);

        let dangling = scan_dangling(&course);
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].token.image, 2);
        assert_eq!((dangling[0].chapter, dangling[0].sub_chapter), (0, 0));
    }

    #[test]
    fn test_render_course_structure() {
        let mut course = Course::new("Mon cours");
        let mut chapter = Chapter::new("Chapitre & co");
        let mut sub = SubChapter::new("Intro");
        sub.content = "<p>bonjour</p>".to_string();
        sub.video = Some(MediaRef::Remote("videos/intro.mp4".to_string()));
        chapter.sub_chapters.push(sub);
        course.chapters.push(chapter);

        let html = render_course(&course, RenderMode::Reading, "https://cdn.test/static");
        assert!(html.contains("<h1 class=\"course-title\">Mon cours</h1>"));
        assert!(html.contains("Chapitre &amp; co"));
        assert!(html.contains("src=\"https://cdn.test/static/videos/intro.mp4\""));
        assert!(html.contains("<p>bonjour</p>"));
    }
}
