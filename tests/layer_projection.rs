use banner_studio::element::factory;
use banner_studio::layer::project;
use banner_studio::{Document, Element as _, ReorderDirection};
use egui::{Color32, pos2, vec2};

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    bytes.into_inner()
}

#[test]
fn layers_are_listed_topmost_first() {
    let mut document = Document::new();
    let a = document.add_element(factory::create_rectangle(
        pos2(0.0, 0.0),
        vec2(10.0, 10.0),
        Color32::BLUE,
    ));
    let b = document.add_element(factory::create_circle(pos2(20.0, 20.0), 5.0, Color32::RED));
    let c = document.add_element(factory::create_text(
        "Hi",
        pos2(40.0, 40.0),
        12.0,
        Color32::BLACK,
    ));

    let layers = project(&document);
    let order: Vec<_> = layers.iter().map(|l| l.id).collect();
    assert_eq!(order, vec![c, b, a]);
}

#[test]
fn reordering_to_front_moves_the_layer_to_the_top() {
    let mut document = Document::new();
    let a = document.add_element(factory::create_rectangle(
        pos2(0.0, 0.0),
        vec2(10.0, 10.0),
        Color32::BLUE,
    ));
    let b = document.add_element(factory::create_circle(pos2(20.0, 20.0), 5.0, Color32::RED));
    let c = document.add_element(factory::create_text(
        "Hi",
        pos2(40.0, 40.0),
        12.0,
        Color32::BLACK,
    ));

    assert!(document.reorder(a, ReorderDirection::ToFront));
    let order: Vec<_> = project(&document).iter().map(|l| l.id).collect();
    assert_eq!(order, vec![a, c, b]);

    assert!(document.reorder(a, ReorderDirection::ToBack));
    let order: Vec<_> = project(&document).iter().map(|l| l.id).collect();
    assert_eq!(order, vec![c, b, a]);
}

#[test]
fn reordering_an_absent_reference_leaves_the_list_unchanged() {
    let mut document = Document::new();
    document.add_element(factory::create_rectangle(
        pos2(0.0, 0.0),
        vec2(10.0, 10.0),
        Color32::BLUE,
    ));
    let before = project(&document);

    let stranger = factory::create_circle(pos2(0.0, 0.0), 5.0, Color32::RED);
    assert!(!document.reorder(stranger.id(), ReorderDirection::ToFront));
    assert_eq!(project(&document), before);
}

#[test]
fn naming_policy_follows_the_element_kind() {
    let mut document = Document::new();
    document.add_element(factory::create_rectangle(
        pos2(0.0, 0.0),
        vec2(10.0, 10.0),
        Color32::BLUE,
    ));
    document.add_element(factory::create_text(
        "Big Sale",
        pos2(0.0, 0.0),
        12.0,
        Color32::BLACK,
    ));
    document.add_element(factory::create_text("", pos2(0.0, 0.0), 12.0, Color32::BLACK));
    document.add_element(factory::create_image(tiny_png(), vec2(4.0, 4.0), pos2(0.0, 0.0)));

    let layers = project(&document);
    // Topmost-first: image, empty text, text, rectangle.
    assert_eq!(layers[0].name, "Image Layer");
    assert_eq!(layers[0].kind, "image");
    assert_eq!(layers[1].name, "Layer");
    assert_eq!(layers[1].kind, "text");
    assert_eq!(layers[2].name, "Big Sale");
    assert_eq!(layers[3].name, "Layer");
    assert_eq!(layers[3].kind, "rectangle");
}

#[test]
fn the_active_flag_tracks_the_selection() {
    let mut document = Document::new();
    let a = document.add_element(factory::create_rectangle(
        pos2(0.0, 0.0),
        vec2(10.0, 10.0),
        Color32::BLUE,
    ));
    let b = document.add_element(factory::create_circle(pos2(20.0, 20.0), 5.0, Color32::RED));

    let layers = project(&document);
    assert!(layers[0].active, "newest element starts selected");
    assert!(!layers[1].active);

    document.set_active(Some(a));
    let layers = project(&document);
    assert!(!layers.iter().find(|l| l.id == b).unwrap().active);
    assert!(layers.iter().find(|l| l.id == a).unwrap().active);

    document.set_active(None);
    assert!(project(&document).iter().all(|l| !l.active));
}
