use std::collections::HashSet;

use people_core::{update, Effect, ListState, Msg, Person};
use pretty_assertions::assert_eq;

fn page(state: ListState, people: Vec<Person>, is_refresh: bool) -> ListState {
    let (state, _) = update(state, Msg::FetchSucceeded { people, is_refresh });
    state
}

fn ids(state: &ListState) -> Vec<i64> {
    state.people().iter().map(|person| person.id).collect()
}

#[test]
fn first_page_is_taken_in_order() {
    let state = page(
        ListState::new(),
        vec![Person::new(1, "A"), Person::new(2, "B")],
        false,
    );

    assert_eq!(ids(&state), vec![1, 2]);
    assert_eq!(state.people()[0].full_name, "A");
}

#[test]
fn overlapping_page_does_not_duplicate() {
    let state = page(
        ListState::new(),
        vec![Person::new(1, "A"), Person::new(2, "B")],
        false,
    );
    let state = page(state, vec![Person::new(2, "B"), Person::new(3, "C")], false);

    assert_eq!(ids(&state), vec![1, 2, 3]);
}

#[test]
fn repeats_within_one_page_keep_first_seen() {
    let state = page(
        ListState::new(),
        vec![
            Person::new(5, "First"),
            Person::new(6, "Other"),
            Person::new(5, "Second"),
        ],
        false,
    );

    assert_eq!(ids(&state), vec![5, 6]);
    assert_eq!(state.people()[0].full_name, "First");
}

#[test]
fn refresh_replaces_accumulated_people() {
    let state = page(
        ListState::new(),
        vec![Person::new(1, "A"), Person::new(2, "B"), Person::new(3, "C")],
        false,
    );
    let state = page(
        state,
        vec![Person::new(9, "Z"), Person::new(2, "B"), Person::new(9, "Z")],
        true,
    );

    assert_eq!(ids(&state), vec![9, 2]);
}

#[test]
fn refresh_forgets_seen_ids() {
    let state = page(ListState::new(), vec![Person::new(1, "A")], false);
    let state = page(state, vec![Person::new(2, "B")], true);
    let state = page(state, vec![Person::new(1, "A")], false);

    assert_eq!(ids(&state), vec![2, 1]);
}

#[test]
fn ids_stay_unique_across_many_pages() {
    let mut state = ListState::new();
    for start in 0..20i64 {
        let people = (start..start + 7)
            .map(|id| Person::new(id % 25, format!("P{id}")))
            .collect();
        state = page(state, people, start == 10);
    }

    let all = ids(&state);
    let unique: HashSet<_> = all.iter().copied().collect();
    assert_eq!(all.len(), unique.len());
}

#[test]
fn success_ends_refreshing_and_marks_dirty() {
    let (mut state, effects) = update(
        ListState::new(),
        Msg::FetchSucceeded {
            people: vec![Person::new(1, "A")],
            is_refresh: false,
        },
    );

    assert_eq!(effects, vec![Effect::EndRefreshing]);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
    assert_eq!(state.view().rows.len(), 1);
}
