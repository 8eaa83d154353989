use banner_studio::element::{Element, ElementType, factory};
use banner_studio::services::{EnhanceImage, FetchImage, ServiceError};
use banner_studio::tools::{IMAGE_TARGET_WIDTH, ImageSource, ToolDispatcher, ToolError};
use banner_studio::Editor;
use egui::{Color32, pos2, vec2};

const CANVAS: egui::Vec2 = egui::vec2(1200.0, 400.0);

fn png_bytes(width: u32, height: u32, shade: u8) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([shade, shade, shade, 255]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    bytes.into_inner()
}

struct StubFetcher(Result<Vec<u8>, u16>);

impl FetchImage for StubFetcher {
    fn fetch_image(&self, _url: &str) -> Result<Vec<u8>, ServiceError> {
        match &self.0 {
            Ok(bytes) => Ok(bytes.clone()),
            Err(status) => Err(ServiceError::Status(*status)),
        }
    }
}

struct StubEnhancer(Result<Vec<u8>, u16>);

impl EnhanceImage for StubEnhancer {
    fn enhance_image(&self, _image: &[u8]) -> Result<Vec<u8>, ServiceError> {
        match &self.0 {
            Ok(bytes) => Ok(bytes.clone()),
            Err(status) => Err(ServiceError::Status(*status)),
        }
    }
}

#[test]
fn add_text_uses_the_default_content_and_selects_it() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    let id = dispatcher.add_text(&mut editor);
    assert_eq!(editor.document().active_id(), Some(id));

    let element = editor.document().find_element(id).unwrap();
    assert_eq!(element.element_type(), "text");
    match element {
        ElementType::Text(text) => assert_eq!(text.content(), "New Text"),
        other => panic!("expected a text element, got {other:?}"),
    }
}

#[test]
fn add_shapes_use_their_default_geometry() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    let rect_id = dispatcher.add_rectangle(&mut editor);
    let rect = editor.document().find_element(rect_id).unwrap().rect();
    assert_eq!(rect.min, pos2(150.0, 150.0));
    assert_eq!(rect.size(), vec2(100.0, 100.0));

    let circle_id = dispatcher.add_circle(&mut editor);
    let circle = editor.document().find_element(circle_id).unwrap();
    assert_eq!(circle.element_type(), "circle");
    assert_eq!(circle.rect().size(), vec2(100.0, 100.0));
    assert_eq!(editor.document().active_id(), Some(circle_id));
}

#[test]
fn added_images_are_scaled_to_the_target_width_and_centered() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    let id = dispatcher
        .add_image(
            &mut editor,
            ImageSource::Bytes(png_bytes(400, 100, 50)),
            &StubFetcher(Err(500)),
            CANVAS,
        )
        .unwrap();

    let rect = editor.document().find_element(id).unwrap().rect();
    assert_eq!(rect.size(), vec2(IMAGE_TARGET_WIDTH, 50.0));
    assert_eq!(rect.center(), pos2(600.0, 200.0));
    assert_eq!(editor.document().active_id(), Some(id));
}

#[test]
fn undecodable_image_data_leaves_the_document_unchanged() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    let result = dispatcher.add_image(
        &mut editor,
        ImageSource::Bytes(b"not an image".to_vec()),
        &StubFetcher(Err(500)),
        CANVAS,
    );
    assert!(matches!(result, Err(ToolError::Decode(_))));
    assert!(editor.document().is_empty());
    assert_eq!(editor.history_len(), 0);
}

#[test]
fn failed_url_fetch_leaves_the_document_unchanged() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    let result = dispatcher.add_image(
        &mut editor,
        ImageSource::Url("http://example.invalid/banner.png".to_owned()),
        &StubFetcher(Err(502)),
        CANVAS,
    );
    assert!(matches!(
        result,
        Err(ToolError::Service(ServiceError::Status(502)))
    ));
    assert!(editor.document().is_empty());
    assert_eq!(editor.history_len(), 0);
}

#[test]
fn delete_active_without_a_selection_is_a_noop() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    assert!(!dispatcher.delete_active(&mut editor));
    assert_eq!(editor.history_len(), 0);

    let id = dispatcher.add_rectangle(&mut editor);
    editor.document_mut().set_active(None);
    assert!(!dispatcher.delete_active(&mut editor));
    assert!(editor.document().contains(id));
}

#[test]
fn enhancing_a_non_image_is_rejected_without_mutation() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    dispatcher.add_rectangle(&mut editor);
    let before = editor.document().serialize();
    let history_before = editor.history_len();

    let result = dispatcher.enhance_active(&mut editor, &StubEnhancer(Ok(png_bytes(4, 4, 0))), CANVAS);
    assert!(matches!(result, Err(ToolError::EnhanceRequiresImage)));
    assert_eq!(editor.document().serialize(), before);
    assert_eq!(editor.history_len(), history_before);
}

#[test]
fn enhancing_with_nothing_selected_is_rejected() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    let result = dispatcher.enhance_active(&mut editor, &StubEnhancer(Ok(png_bytes(4, 4, 0))), CANVAS);
    assert!(matches!(result, Err(ToolError::EnhanceRequiresImage)));
    assert!(editor.document().is_empty());
}

#[test]
fn a_failed_enhancement_leaves_the_document_unchanged() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    dispatcher
        .add_image(
            &mut editor,
            ImageSource::Bytes(png_bytes(100, 100, 10)),
            &StubFetcher(Err(500)),
            CANVAS,
        )
        .unwrap();
    let before = editor.document().serialize();

    let result = dispatcher.enhance_active(&mut editor, &StubEnhancer(Err(500)), CANVAS);
    assert!(matches!(result, Err(ToolError::Service(_))));
    assert_eq!(editor.document().serialize(), before);
}

#[test]
fn a_successful_enhancement_replaces_the_image_as_the_front_most_layer() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    // Image at the back, rectangle in front of it.
    let old_image = dispatcher
        .add_image(
            &mut editor,
            ImageSource::Bytes(png_bytes(100, 100, 10)),
            &StubFetcher(Err(500)),
            CANVAS,
        )
        .unwrap();
    let rect = dispatcher.add_rectangle(&mut editor);
    editor.document_mut().set_active(Some(old_image));

    let enhanced = dispatcher
        .enhance_active(&mut editor, &StubEnhancer(Ok(png_bytes(100, 100, 200))), CANVAS)
        .unwrap();

    // The original is gone and the replacement was appended, so it now
    // sits in front of the rectangle instead of behind it.
    assert!(!editor.document().contains(old_image));
    assert_eq!(editor.document().active_id(), Some(enhanced));
    let layers = editor.layers().clone();
    assert_eq!(layers[0].id, enhanced);
    assert_eq!(layers[0].name, "Image Layer");
    assert_eq!(layers[1].id, rect);

    // The replacement keeps the original's position and display size.
    let rect_of_new = editor.document().find_element(enhanced).unwrap().rect();
    assert_eq!(rect_of_new.size(), vec2(IMAGE_TARGET_WIDTH, IMAGE_TARGET_WIDTH));
}

#[test]
fn a_stale_enhancement_reply_still_applies_after_deletion() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    let old_image = dispatcher
        .add_image(
            &mut editor,
            ImageSource::Bytes(png_bytes(100, 100, 10)),
            &StubFetcher(Err(500)),
            CANVAS,
        )
        .unwrap();
    let job = dispatcher.begin_enhance(&editor).unwrap();
    assert_eq!(job.id, old_image);

    // The user deletes the image while the request is in flight.
    assert!(dispatcher.delete_active(&mut editor));
    assert!(editor.document().is_empty());

    let enhanced = dispatcher
        .finish_enhance(&mut editor, job.id, png_bytes(400, 200, 200), CANVAS)
        .unwrap();
    assert_eq!(editor.document().len(), 1);
    assert_eq!(editor.document().active_id(), Some(enhanced));

    // Fallback placement: scaled to the target width and centered.
    let rect = editor.document().find_element(enhanced).unwrap().rect();
    assert_eq!(rect.size(), vec2(IMAGE_TARGET_WIDTH, 100.0));
    assert_eq!(rect.center(), pos2(600.0, 200.0));
}

#[test]
fn reorder_forwards_to_the_document() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    let a = dispatcher.add_rectangle(&mut editor);
    let _b = dispatcher.add_circle(&mut editor);

    assert!(dispatcher.reorder(
        &mut editor,
        a,
        banner_studio::ReorderDirection::ToFront
    ));
    assert_eq!(editor.layers()[0].id, a);

    let stranger = factory::create_circle(pos2(0.0, 0.0), 5.0, Color32::RED).id();
    assert!(!dispatcher.reorder(
        &mut editor,
        stranger,
        banner_studio::ReorderDirection::ToBack
    ));
}
