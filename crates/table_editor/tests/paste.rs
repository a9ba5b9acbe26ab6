mod common;

use common::{children, mk_full_table, set_text, text_of};
use manos_block_state::{Block, Mark, MarkKind, State};
use manos_table_editor::{TableError, paste_into_cell};
use pretty_assertions::assert_eq;

fn clipboard() -> State {
    let mut first = Block::text("t1", "foo");
    first
        .text_content_mut()
        .unwrap()
        .marks
        .push(Mark::new(MarkKind::Bold, 0, 3));

    State::from_blocks(
        "clip",
        [
            Block::other("clip", "page").with_children(["t1", "file", "t3"]),
            first,
            Block::other("file", "file").with_children(["t2", "image"]),
            Block::text("t2", "inside"),
            Block::other("image", "image"),
            Block::text("t3", "bar"),
        ],
    )
    .unwrap()
}

#[test]
fn text_merges_into_cell_and_blocks_go_below_table() {
    let mut state = mk_full_table(&["col1"], &["row1"]);
    set_text(&mut state, "row1-col1", "x");

    let placed = paste_into_cell(&mut state, "row1-col1", &clipboard()).unwrap();

    assert_eq!(placed, vec!["file"]);
    assert_eq!(text_of(&state, "row1-col1"), "xfoo\ninside\nbar");
    assert_eq!(
        state.pick("row1-col1").unwrap().text_content().unwrap().marks,
        vec![Mark::new(MarkKind::Bold, 1, 4)]
    );
    assert_eq!(children(&state, "root"), vec!["table", "file"]);
    assert_eq!(children(&state, "file"), vec!["image"]);
    assert!(state.exists("image"));
    assert!(!state.exists("t1"));
}

#[test]
fn text_only_clipboard_places_nothing() {
    let mut state = mk_full_table(&["col1"], &["row1"]);
    let clip = State::from_blocks(
        "clip",
        [
            Block::other("clip", "page").with_children(["a", "b"]),
            Block::text("a", "one"),
            Block::text("b", "two"),
        ],
    )
    .unwrap();

    let placed = paste_into_cell(&mut state, "row1-col1", &clip).unwrap();
    assert!(placed.is_empty());
    assert_eq!(text_of(&state, "row1-col1"), "one\ntwo");
    assert_eq!(children(&state, "root"), vec!["table"]);
}

#[test]
fn colliding_ids_abort_the_paste() {
    let mut state = mk_full_table(&["col1"], &["row1"]);
    let clip = State::from_blocks(
        "clip",
        [
            Block::other("clip", "page").with_children(["a", "row1"]),
            Block::text("a", "one"),
            Block::other("row1", "file"),
        ],
    )
    .unwrap();

    let err = paste_into_cell(&mut state, "row1-col1", &clip).unwrap_err();
    assert_eq!(err, TableError::AddCollision("row1".to_string()));
    assert_eq!(text_of(&state, "row1-col1"), "");
}

#[test]
fn target_must_be_a_cell() {
    let mut state = mk_full_table(&["col1"], &["row1"]);
    let clip = clipboard();

    assert_eq!(
        paste_into_cell(&mut state, "row1", &clip).unwrap_err(),
        TableError::InvalidCellId("row1".to_string())
    );
    assert_eq!(
        paste_into_cell(&mut state, "row1-col9", &clip).unwrap_err(),
        TableError::NotFound("row1-col9".to_string())
    );
}
