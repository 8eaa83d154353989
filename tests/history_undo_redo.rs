use banner_studio::element::factory;
use banner_studio::{Editor, Element as _, LayerEntry, ToolDispatcher};
use egui::{Color32, pos2, vec2};

fn add_rectangle(editor: &mut Editor, x: f32) {
    editor.document_mut().add_element(factory::create_rectangle(
        pos2(x, 0.0),
        vec2(50.0, 50.0),
        Color32::BLUE,
    ));
}

#[test]
fn undo_redo_round_trip_reproduces_the_final_state() {
    let mut editor = Editor::new();
    for i in 0..4 {
        add_rectangle(&mut editor, i as f32 * 10.0);
    }
    let final_state = editor.document().serialize();

    let mut undone = 0;
    while editor.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);

    for _ in 0..undone {
        assert!(editor.redo());
    }
    assert_eq!(editor.document().serialize(), final_state);
}

#[test]
fn undo_with_empty_history_is_a_noop() {
    let mut editor = Editor::new();
    assert!(!editor.can_undo());
    assert!(!editor.undo());
    assert!(editor.document().is_empty());
}

#[test]
fn undo_at_the_oldest_retained_state_is_a_noop() {
    let mut editor = Editor::new();
    add_rectangle(&mut editor, 0.0);

    // One snapshot retained; the cursor already sits on the oldest state.
    assert!(!editor.can_undo());
    assert!(!editor.undo());
    assert_eq!(editor.document().len(), 1);
}

#[test]
fn redo_at_the_newest_state_is_a_noop() {
    let mut editor = Editor::new();
    add_rectangle(&mut editor, 0.0);
    add_rectangle(&mut editor, 10.0);

    assert!(!editor.redo());
    assert!(editor.undo());
    assert!(editor.redo());
    assert!(!editor.redo());
    assert_eq!(editor.document().len(), 2);
}

#[test]
fn undo_depth_is_bounded_to_four_steps() {
    let mut editor = Editor::new();
    let mut states = Vec::new();
    for i in 0..6 {
        add_rectangle(&mut editor, i as f32 * 10.0);
        states.push(editor.document().serialize());
    }
    assert_eq!(editor.history_len(), 5);

    let mut undone = 0;
    while editor.undo() {
        undone += 1;
    }
    assert_eq!(undone, 4);

    // The sixth snapshot evicted the first; the oldest reachable state is
    // the one recorded by the second mutation.
    assert_eq!(editor.document().serialize(), states[1]);
}

#[test]
fn recording_after_undo_discards_the_redo_tail() {
    let mut editor = Editor::new();
    add_rectangle(&mut editor, 0.0);
    add_rectangle(&mut editor, 10.0);
    add_rectangle(&mut editor, 20.0);

    assert!(editor.undo());
    assert!(editor.can_redo());

    add_rectangle(&mut editor, 99.0);
    assert!(!editor.can_redo());
    assert!(!editor.redo());
    assert_eq!(editor.document().len(), 3);
}

#[test]
fn deleting_then_undoing_restores_the_layer_list_exactly() {
    let mut editor = Editor::new();
    let dispatcher = ToolDispatcher::new();

    editor.document_mut().add_element(factory::create_text(
        "SALE",
        pos2(100.0, 100.0),
        24.0,
        Color32::BLACK,
    ));
    editor.document_mut().add_element(factory::create_rectangle(
        pos2(150.0, 150.0),
        vec2(100.0, 100.0),
        Color32::BLUE,
    ));
    let before_deletion: Vec<LayerEntry> = editor.layers().clone();
    assert_eq!(before_deletion.len(), 2);
    assert_eq!(before_deletion[0].kind, "rectangle");
    assert_eq!(before_deletion[1].name, "SALE");

    assert!(dispatcher.delete_active(&mut editor));
    assert_eq!(editor.layers().len(), 1);

    assert!(editor.undo());
    let restored: Vec<LayerEntry> = editor.layers().clone();
    assert_eq!(restored, before_deletion);
}

#[test]
fn selection_changes_are_recorded_like_any_other_mutation() {
    let mut editor = Editor::new();
    add_rectangle(&mut editor, 0.0);
    let first = editor.document().elements()[0].id();
    add_rectangle(&mut editor, 10.0);

    editor.document_mut().set_active(Some(first));
    assert_eq!(editor.history_len(), 3);

    assert!(editor.undo());
    let second = editor.document().elements()[1].id();
    assert_eq!(editor.document().active_id(), Some(second));
}
