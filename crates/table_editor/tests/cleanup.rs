mod common;

use std::sync::Arc;

use common::{children, mk_full_table, set_text, test_editor, text_of};
use manos_block_state::{Block, LayoutStyle, Position, VerticalAlign};
use manos_table_editor::{ObjectFlags, TableError};
use pretty_assertions::assert_eq;

#[test]
fn cleanup_drops_empty_and_malformed_cells() {
    let mut state = mk_full_table(&["col1", "col2"], &["row1", "row2"]);
    set_text(&mut state, "row1-col2", "kept");
    state.get("row2-col1").unwrap().background_color = "grey".to_string();
    state.get("row2").unwrap().children_ids.push("junk".to_string());

    test_editor(&[], &[], &[]).cleanup_tables(&mut state);

    assert_eq!(children(&state, "row1"), vec!["row1-col2"]);
    assert_eq!(children(&state, "row2"), vec!["row2-col1"]);
}

#[test]
fn cleanup_skips_read_only_objects() {
    let mut state = mk_full_table(&["col1"], &["row1"]);
    let editor = test_editor(&[], &[], &[]).with_object(Arc::new(ObjectFlags {
        blocks_restricted: false,
        read_only: true,
    }));

    editor.cleanup_tables(&mut state);

    assert_eq!(children(&state, "row1"), vec!["row1-col1"]);
    assert_eq!(state.changed_ids().count(), 0);
}

#[test]
fn broken_table_does_not_stop_cleanup() {
    let mut state = mk_full_table(&["col1"], &["row1"]);
    for block in [
        Block::table("broken").with_children(["broken-rows"]),
        Block::layout("broken-rows", LayoutStyle::TableRows),
    ] {
        state.add(block);
    }
    state.insert_to("table", Position::Top, &["broken"]).unwrap();

    test_editor(&[], &[], &[]).cleanup_tables(&mut state);

    assert!(children(&state, "row1").is_empty());
    assert_eq!(children(&state, "broken"), vec!["broken-rows"]);
}

#[test]
fn cleanup_removes_dropped_cells_from_the_state() {
    let mut state = mk_full_table(&["col1", "col2"], &["row1"]);
    set_text(&mut state, "row1-col1", "x");
    let editor = test_editor(&[], &[], &[]);

    editor.cleanup_tables(&mut state);

    assert_eq!(children(&state, "row1"), vec!["row1-col1"]);
    assert!(!state.exists("row1-col2"));
    assert_eq!(state.detached_ids().count(), 0);

    editor
        .column_list_fill(&mut state, &["col2".to_string()])
        .unwrap();
    assert_eq!(children(&state, "row1"), vec!["row1-col1", "row1-col2"]);
}

#[test]
fn cell_can_be_recreated_after_cleanup() {
    let mut state = mk_full_table(&["col1", "col2"], &["row1"]);
    set_text(&mut state, "row1-col1", "x");
    let editor = test_editor(&[], &[], &[]);

    editor.cleanup_tables(&mut state);
    let cell_id = editor
        .cell_create(&mut state, "row1", "col2", &Block::text("", "y"))
        .unwrap();

    assert_eq!(cell_id, "row1-col2");
    assert_eq!(children(&state, "row1"), vec!["row1-col1", "row1-col2"]);
    assert_eq!(text_of(&state, "row1-col2"), "y");

    let err = editor
        .cell_create(&mut state, "row1", "col2", &Block::text("", "z"))
        .unwrap_err();
    assert_eq!(err, TableError::AddCollision("row1-col2".to_string()));
}

#[test]
fn detached_cells_are_reused() {
    let mut state = mk_full_table(&["col1", "col2"], &["row1"]);
    let editor = test_editor(&[], &[], &[]);
    let rows = vec!["row1".to_string()];

    editor.row_list_clean(&mut state, &rows).unwrap();
    assert!(children(&state, "row1").is_empty());
    assert_eq!(state.detached_ids().count(), 2);

    editor
        .cell_create(&mut state, "row1", "col2", &Block::text("", "b"))
        .unwrap();
    editor
        .column_list_fill(&mut state, &["col1".to_string()])
        .unwrap();

    assert_eq!(children(&state, "row1"), vec!["row1-col1", "row1-col2"]);
    assert_eq!(text_of(&state, "row1-col2"), "b");
    assert_eq!(state.detached_ids().count(), 0);

    editor.row_list_clean(&mut state, &rows).unwrap();
    editor.row_list_fill(&mut state, &rows).unwrap();
    assert_eq!(children(&state, "row1"), vec!["row1-col1", "row1-col2"]);
    assert_eq!(state.detached_ids().count(), 0);
}

#[test]
fn cleanup_keeps_aligned_empty_cells() {
    let mut state = mk_full_table(&["col1", "col2"], &["row1"]);
    state.get("row1-col2").unwrap().vertical_align = VerticalAlign::Bottom;

    test_editor(&[], &[], &[]).cleanup_tables(&mut state);

    assert_eq!(children(&state, "row1"), vec!["row1-col2"]);
    assert!(!state.exists("row1-col1"));
}
