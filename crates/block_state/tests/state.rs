use manos_block_state::{
    Block, IdGenerator, ObjectIdGenerator, Position, SequenceIdGenerator, State, StateError,
};
use pretty_assertions::assert_eq;

fn sample_state() -> State {
    State::from_blocks(
        "root",
        [
            Block::other("root", "page").with_children(["a", "b", "c"]),
            Block::text("a", "A"),
            Block::text("b", "B").with_children(["b1"]),
            Block::text("b1", "B1"),
            Block::text("c", "C"),
        ],
    )
    .unwrap()
}

fn children(state: &State, id: &str) -> Vec<String> {
    state.pick(id).unwrap().children_ids.clone()
}

#[test]
fn from_blocks_rejects_duplicates_and_missing_root() {
    let err = State::from_blocks("root", [Block::other("root", "page"), Block::text("root", "")])
        .unwrap_err();
    assert_eq!(err, StateError::AlreadyExists("root".to_string()));

    let err = State::from_blocks("root", [Block::text("a", "")]).unwrap_err();
    assert_eq!(err, StateError::MissingRoot("root".to_string()));
}

#[test]
fn pick_does_not_mark_changes_but_get_does() {
    let mut state = sample_state();
    assert!(state.pick("a").is_some());
    assert_eq!(state.changed_ids().count(), 0);

    state.get("a").unwrap().background_color = "red".to_string();
    assert_eq!(state.changed_ids().collect::<Vec<_>>(), vec!["a"]);

    state.clear_changes();
    assert_eq!(state.changed_ids().count(), 0);
}

#[test]
fn set_replaces_block_in_place() {
    let mut state = sample_state();
    state.set(Block::text("b", "new").with_children(["b1"]));

    assert_eq!(state.pick("b").unwrap().text_content().unwrap().text, "new");
    assert_eq!(children(&state, "root"), vec!["a", "b", "c"]);
    assert_eq!(state.changed_ids().collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn add_refuses_taken_ids() {
    let mut state = sample_state();
    assert!(!state.add(Block::text("a", "again")));
    assert_eq!(state.pick("a").unwrap().text_content().unwrap().text, "A");
    assert!(state.add(Block::text("d", "D")));
    assert_eq!(state.len(), 6);
}

#[test]
fn insert_to_places_blocks_around_target() {
    let mut state = sample_state();
    state.add(Block::text("x", "X"));
    state.add(Block::text("y", "Y"));
    state.add(Block::text("z", "Z"));

    state.insert_to("b", Position::Top, &["x"]).unwrap();
    assert_eq!(children(&state, "root"), vec!["a", "x", "b", "c"]);

    state.insert_to("b", Position::Bottom, &["y"]).unwrap();
    assert_eq!(children(&state, "root"), vec!["a", "x", "b", "y", "c"]);

    state.insert_to("b", Position::Inner, &["z"]).unwrap();
    assert_eq!(children(&state, "b"), vec!["b1", "z"]);
}

#[test]
fn insert_to_replace_detaches_target() {
    let mut state = sample_state();
    state.add(Block::text("x", "X"));

    state.insert_to("b", Position::Replace, &["x"]).unwrap();
    assert_eq!(children(&state, "root"), vec!["a", "x", "c"]);
    assert_eq!(state.detached_ids().collect::<Vec<_>>(), vec!["b"]);
    assert!(state.exists("b"));
}

#[test]
fn insert_to_validates_before_mutating() {
    let mut state = sample_state();

    let err = state.insert_to("root", Position::Bottom, &["a"]).unwrap_err();
    assert_eq!(err, StateError::NoParent("root".to_string()));

    let err = state.insert_to("a", Position::Bottom, &["missing"]).unwrap_err();
    assert_eq!(err, StateError::NotFound("missing".to_string()));

    let err = state.insert_to("a", Position::Left, &["c"]).unwrap_err();
    assert_eq!(err, StateError::UnsupportedPosition(Position::Left));

    assert_eq!(children(&state, "root"), vec!["a", "b", "c"]);
}

#[test]
fn unlink_keeps_block_and_reports_it_detached() {
    let mut state = sample_state();

    assert!(state.unlink("b"));
    assert_eq!(children(&state, "root"), vec!["a", "c"]);
    assert!(state.exists("b"));
    assert_eq!(state.detached_ids().collect::<Vec<_>>(), vec!["b"]);
    assert!(!state.unlink("b"));

    state.insert_to("a", Position::Bottom, &["b"]).unwrap();
    assert_eq!(state.detached_ids().count(), 0);
}

#[test]
fn unlink_from_touches_only_the_given_parent() {
    let mut state = sample_state();
    state.get("a").unwrap().children_ids.push("b1".to_string());

    assert!(state.unlink_from("a", "b1"));
    assert_eq!(children(&state, "b"), vec!["b1"]);
    assert!(children(&state, "a").is_empty());
    assert_eq!(state.detached_ids().count(), 0);

    assert!(!state.unlink_from("a", "b1"));
    assert!(state.unlink_from("b", "b1"));
    assert_eq!(state.detached_ids().collect::<Vec<_>>(), vec!["b1"]);
}

#[test]
fn remove_drops_block_entirely() {
    let mut state = sample_state();
    let removed = state.remove("c").unwrap();
    assert_eq!(removed.id, "c");
    assert!(!state.exists("c"));
    assert_eq!(children(&state, "root"), vec!["a", "b"]);
    assert_eq!(state.detached_ids().count(), 0);
}

#[test]
fn parents_and_descendants() {
    let state = sample_state();
    assert_eq!(state.parent_id_of("b1").as_deref(), Some("b"));
    assert_eq!(state.parent_id_of("root"), None);
    assert!(state.is_descendant_of("b1", "root"));
    assert!(state.is_descendant_of("b", "b"));
    assert!(!state.is_descendant_of("a", "b"));
}

#[test]
fn iterate_is_depth_first_pre_order() {
    let state = sample_state();
    let ids: Vec<&str> = state.blocks().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["root", "a", "b", "b1", "c"]);

    let mut visited = Vec::new();
    state
        .iterate(|block| {
            visited.push(block.id.clone());
            block.id != "b"
        })
        .unwrap();
    assert_eq!(visited, vec!["root", "a", "b"]);
}

#[test]
fn iterate_fails_on_shared_children() {
    let state = State::from_blocks(
        "root",
        [
            Block::other("root", "page").with_children(["a", "b"]),
            Block::text("a", "").with_children(["shared"]),
            Block::text("b", "").with_children(["shared", "ghost"]),
            Block::text("shared", ""),
        ],
    )
    .unwrap();

    let err = state.iterate(|_| true).unwrap_err();
    assert_eq!(err, StateError::DuplicateReference("shared".to_string()));
}

#[test]
fn sequence_ids_run_out_into_object_ids() {
    let ids = SequenceIdGenerator::from_slice(&["one", "two"]);
    assert_eq!(ids.remaining(), 2);
    assert_eq!(ids.next_id(), "one");
    assert_eq!(ids.next_id(), "two");
    assert_eq!(ids.remaining(), 0);

    let fallback = ids.next_id();
    assert_eq!(fallback.len(), 24);
}

#[test]
fn object_ids_are_unique_hex() {
    let ids = ObjectIdGenerator::new();
    let first = ids.next_id();
    let second = ids.next_id();
    assert_ne!(first, second);
    for id in [&first, &second] {
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

#[test]
fn closures_generate_ids() {
    let ids = || "fixed".to_string();
    assert_eq!(ids.next_id(), "fixed");
}
