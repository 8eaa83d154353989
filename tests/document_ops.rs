use banner_studio::element::{Element, factory};
use banner_studio::{Document, Editor};
use egui::{Color32, pos2, vec2};

fn rectangle_at(x: f32, y: f32) -> banner_studio::ElementType {
    factory::create_rectangle(pos2(x, y), vec2(100.0, 100.0), Color32::BLUE)
}

#[test]
fn adding_appends_front_most_and_selects() {
    let mut document = Document::new();
    let first = document.add_element(rectangle_at(0.0, 0.0));
    let second = document.add_element(rectangle_at(10.0, 10.0));

    assert_eq!(document.len(), 2);
    assert_eq!(document.active_id(), Some(second));
    assert_eq!(document.elements()[0].id(), first);
    assert_eq!(document.elements()[1].id(), second);
}

#[test]
fn removing_the_active_element_clears_the_selection() {
    let mut document = Document::new();
    let id = document.add_element(rectangle_at(0.0, 0.0));
    assert_eq!(document.active_id(), Some(id));

    assert!(document.remove_element(id));
    assert_eq!(document.active_id(), None);
    assert!(document.is_empty());
}

#[test]
fn removing_an_absent_reference_is_a_noop() {
    let mut document = Document::new();
    let kept = document.add_element(rectangle_at(0.0, 0.0));

    // An id that was never added to this document.
    let stranger = rectangle_at(50.0, 50.0).id();
    assert!(!document.remove_element(stranger));

    assert_eq!(document.len(), 1);
    assert_eq!(document.active_id(), Some(kept));
}

#[test]
fn removing_a_non_active_element_keeps_the_selection() {
    let mut document = Document::new();
    let first = document.add_element(rectangle_at(0.0, 0.0));
    let second = document.add_element(rectangle_at(10.0, 10.0));

    assert!(document.remove_element(first));
    assert_eq!(document.active_id(), Some(second));
}

#[test]
#[should_panic(expected = "is not in the document")]
fn selecting_an_absent_reference_fails_loudly() {
    let mut document = Document::new();
    document.add_element(rectangle_at(0.0, 0.0));

    let stranger = rectangle_at(50.0, 50.0).id();
    document.set_active(Some(stranger));
}

#[test]
fn selection_can_be_cleared() {
    let mut document = Document::new();
    document.add_element(rectangle_at(0.0, 0.0));
    document.set_active(None);
    assert_eq!(document.active_id(), None);
}

#[test]
fn serialize_restore_round_trips_exactly() {
    let mut document = Document::new();
    let text = document.add_element(factory::create_text(
        "Hello",
        pos2(10.0, 10.0),
        24.0,
        Color32::BLACK,
    ));
    document.add_element(rectangle_at(50.0, 50.0));
    document.set_active(Some(text));

    let snapshot = document.serialize();

    // Mutate past the snapshot, then restore.
    document.add_element(rectangle_at(300.0, 300.0));
    document.remove_element(text);
    document.restore(&snapshot).unwrap();

    assert_eq!(document.len(), 2);
    assert_eq!(document.active_id(), Some(text));
    assert_eq!(document.serialize(), snapshot);
}

#[test]
fn hit_testing_finds_the_topmost_element() {
    let mut document = Document::new();
    let below = document.add_element(rectangle_at(0.0, 0.0));
    let above = document.add_element(rectangle_at(50.0, 50.0));

    // Overlap region belongs to the front-most element.
    assert_eq!(document.hit_test(pos2(75.0, 75.0)), Some(above));
    // Only the lower element covers its own corner.
    assert_eq!(document.hit_test(pos2(10.0, 10.0)), Some(below));
    assert_eq!(document.hit_test(pos2(500.0, 500.0)), None);
}

#[test]
fn translate_moves_an_element_and_skips_absent_references() {
    let mut document = Document::new();
    let id = document.add_element(rectangle_at(0.0, 0.0));
    assert!(document.translate_element(id, vec2(25.0, 10.0)));

    let rect = document.find_element(id).unwrap().rect();
    assert_eq!(rect.min, pos2(25.0, 10.0));

    let stranger = rectangle_at(0.0, 0.0).id();
    assert!(!document.translate_element(stranger, vec2(1.0, 1.0)));
}

#[test]
fn export_stays_locked_until_subscribing() {
    let mut editor = Editor::new();
    assert!(!editor.premium());
    editor.subscribe_premium();
    assert!(editor.premium());
}
