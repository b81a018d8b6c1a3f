use crate::{Effect, ListState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ListState, msg: Msg) -> (ListState, Vec<Effect>) {
    let effects = match msg {
        Msg::Appeared | Msg::NearEndOfList => request_page(&mut state),
        Msg::RefreshTriggered => {
            state.begin_fetch(true);
            vec![Effect::FetchPeople { is_refresh: true }]
        }
        Msg::PrefetchRows(indices) => {
            let count = state.len();
            if indices.iter().any(|&row| row >= count) {
                request_page(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::WillDisplayRow(row) => {
            if row + 1 == state.len() {
                request_page(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::FetchSucceeded { people, is_refresh } => {
            state.merge_page(people, is_refresh);
            vec![Effect::EndRefreshing]
        }
        Msg::FetchFailed {
            message,
            is_refresh,
        } => {
            state.record_failure(message.clone(), is_refresh);
            let mut effects = Vec::with_capacity(2);
            if is_refresh {
                effects.push(Effect::EndRefreshing);
            }
            effects.push(Effect::PresentError { message });
            effects
        }
        Msg::FetchSkipped { is_refresh } => {
            state.skip_request(is_refresh);
            Vec::new()
        }
        Msg::RetryClicked => match state.take_retry() {
            Some(retry) => vec![Effect::FetchPeople {
                is_refresh: retry.kind.is_refresh(),
            }],
            None => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

// Redundant page requests are expected; the coordinator drops the extras.
fn request_page(state: &mut ListState) -> Vec<Effect> {
    state.begin_fetch(false);
    vec![Effect::FetchPeople { is_refresh: false }]
}
