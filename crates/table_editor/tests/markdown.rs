mod common;

use common::{mk_full_table, set_text, test_editor};
use manos_block_state::{Block, Position, State};
use manos_table_editor::render_markdown;
use pretty_assertions::assert_eq;

#[test]
fn renders_pipe_table() {
    let mut state = State::new(Block::other("root", "page"));
    let editor = test_editor(
        &["columns", "rows", "table"],
        &["r1", "r2", "r3"],
        &["c1", "c2"],
    );
    let table_id = editor
        .table_create_from_grid(
            &mut state,
            "root",
            Position::Inner,
            &[vec!["Name", "Qty"], vec!["apple", "10"], vec!["kiwi", ""]],
            true,
        )
        .unwrap();

    let expected = concat!(
        "|  Name | Qty |\n",
        "|:------|:----|\n",
        "| apple |  10 |\n",
        "|  kiwi |     |\n",
    );
    assert_eq!(render_markdown(&state, &table_id).unwrap(), expected);
}

#[test]
fn short_cells_pad_to_minimum_width() {
    let mut state = mk_full_table(&["col1", "col2"], &["row1"]);
    set_text(&mut state, "row1-col1", "a\nb");

    let expected = concat!("| a b |   |\n", "|:----|:--|\n");
    assert_eq!(render_markdown(&state, "table").unwrap(), expected);
}
