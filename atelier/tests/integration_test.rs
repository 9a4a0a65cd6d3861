//! End-to-end authoring flow: build a course with the editor, insert an
//! image token through the surface, render it, and assemble the save
//! payload.

use atelier::course_model::{Course, FieldCommand, MediaRef};
use atelier::editor::{CourseEditor, InlineTag};
use atelier::payload::SavePayload;
use atelier::render::{self, RenderMode};
use atelier::surface::{self, BufferSurface, EditSurface};

#[test]
fn test_author_insert_render_flow() {
    // One chapter containing one empty sub-chapter
    let mut editor = CourseEditor::new(Course::new("Cuisine de base"));
    editor.add_chapter();
    editor.add_sub_chapter(0);

    // Attach two images
    editor.apply(
        0,
        0,
        FieldCommand::SetImages(vec![
            MediaRef::Remote("img/couteau.png".to_string()),
            MediaRef::Remote("img/planche.png".to_string()),
        ]),
    );

    // Type some content, then insert a token referencing image 0 at the caret
    let mut surface = BufferSurface::with_html("<p>Voici le couteau :</p>");
    surface.focus();
    surface.set_caret("<p>Voici le couteau :".len());
    editor.insert_image_token(&mut surface, 0);

    let sub = editor.sub_chapter(0, 0).unwrap();
    assert!(sub.content.contains("[image:image-0-0-0]"));

    // Render: exactly one <img>, resolving to image 0, token text gone
    let html = render::substitute_tokens(
        &sub.content,
        &sub.images,
        RenderMode::Reading,
        "https://cdn.test/assets",
    );
    assert_eq!(html.matches("<img ").count(), 1);
    assert!(html.contains("https://cdn.test/assets/img/couteau.png"));
    assert!(!html.contains("planche.png"));
    assert!(!html.contains("[image:"));
}

#[test]
fn test_switching_sub_chapters_preserves_typing_position() {
    let mut editor = CourseEditor::new(Course::new("C"));
    editor.add_chapter();
    editor.add_sub_chapter(0);
    editor.add_sub_chapter(0);

    editor.apply(0, 0, FieldCommand::SetContent("<p>premier</p>".to_string()));
    editor.apply(0, 1, FieldCommand::SetContent("<p>second</p>".to_string()));

    // The surface shows sub-chapter 0 and the user is typing in it
    let mut surface = BufferSurface::with_html("<p>premier</p>");
    surface.focus();
    surface.set_caret(6);

    // Switch to sub-chapter 1 and back; the final sync writes identical
    // content and must not disturb the caret
    editor.set_active(0, 1);
    surface::sync_content(&mut surface, &editor.active_sub_chapter().unwrap().content);
    assert_eq!(surface.html(), "<p>second</p>");

    editor.set_active(0, 0);
    surface::sync_content(&mut surface, "<p>premier</p>");
    surface.set_caret(6);
    surface::sync_content(&mut surface, "<p>premier</p>");
    assert_eq!(surface.caret(), 6);
}

#[test]
fn test_styled_content_survives_save_and_render() {
    let mut editor = CourseEditor::new(Course::new("Formation"));
    editor.add_chapter();
    editor.add_sub_chapter(0);

    let mut surface = BufferSurface::with_html("Attention au feu");
    surface.set_selection(0, "Attention".len());
    editor.apply_inline_style(InlineTag::Bold, &mut surface);
    assert_eq!(surface.html(), "<b>Attention</b> au feu");

    // Whole-document payload carries the styled HTML
    let payload = SavePayload::build(editor.course()).unwrap();
    assert!(payload.document.contains("<b>Attention</b> au feu"));
    assert!(payload.parts.is_empty());

    // And the rendered page keeps it verbatim (no tokens to expand)
    let html = render::render_course(editor.course(), RenderMode::Reading, "/assets");
    assert!(html.contains("<b>Attention</b> au feu"));
}

#[test]
fn test_deleting_image_leaves_token_dangling_but_safe() {
    let mut editor = CourseEditor::new(Course::new("C"));
    editor.add_chapter();
    editor.add_sub_chapter(0);
    editor.apply(
        0,
        0,
        FieldCommand::SetImages(vec![
            MediaRef::Remote("img/a.png".to_string()),
            MediaRef::Remote("img/b.png".to_string()),
        ]),
    );

    let mut surface = BufferSurface::new();
    editor.insert_image_token(&mut surface, 1);

    // Delete the image at position 1; existing tokens are not renumbered
    editor.apply(
        0,
        0,
        FieldCommand::SetImages(vec![MediaRef::Remote("img/a.png".to_string())]),
    );

    let dangling = render::scan_dangling(editor.course());
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].token.image, 1);

    // Reading view drops it, preview flags it, neither panics
    let sub = editor.sub_chapter(0, 0).unwrap();
    let reading = render::substitute_tokens(&sub.content, &sub.images, RenderMode::Reading, "/a");
    assert!(!reading.contains("[image:"));
    assert!(!reading.contains("<img "));
    let preview = render::substitute_tokens(&sub.content, &sub.images, RenderMode::Preview, "/a");
    assert!(preview.contains("image-missing"));
}
