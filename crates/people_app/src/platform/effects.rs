use std::sync::mpsc;

use people_core::{Effect, Msg, Person};
use people_engine::FetchCoordinator;
use people_logging::{people_debug, LIST_TARGET};

use super::ui::DisplaySurface;

/// Executes core effects against the coordinator and the display surface.
///
/// Fetch completions never touch list state directly: they are turned into
/// messages and queued for the display thread.
pub(crate) struct EffectRunner {
    coordinator: FetchCoordinator,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub(crate) fn new(coordinator: FetchCoordinator, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self {
            coordinator,
            msg_tx,
        }
    }

    pub(crate) fn coordinator(&self) -> &FetchCoordinator {
        &self.coordinator
    }

    pub(crate) fn apply<S: DisplaySurface + ?Sized>(&self, effects: Vec<Effect>, surface: &mut S) {
        for effect in effects {
            match effect {
                Effect::FetchPeople { is_refresh } => {
                    if !self.fetch(is_refresh) {
                        people_debug!(
                            target: LIST_TARGET,
                            "fetch request absorbed (refresh={})",
                            is_refresh
                        );
                        let _ = self.msg_tx.send(Msg::FetchSkipped { is_refresh });
                    }
                }
                Effect::EndRefreshing => surface.end_refreshing(),
                Effect::PresentError { message } => surface.present_retryable_error(&message),
            }
        }
    }

    fn fetch(&self, is_refresh: bool) -> bool {
        let ok_tx = self.msg_tx.clone();
        let err_tx = self.msg_tx.clone();
        self.coordinator.fetch_people(
            move |people, is_refresh| {
                let _ = ok_tx.send(Msg::FetchSucceeded {
                    people: people.into_iter().map(map_person).collect(),
                    is_refresh,
                });
            },
            move |error, is_refresh| {
                let _ = err_tx.send(Msg::FetchFailed {
                    message: error.description().to_string(),
                    is_refresh,
                });
            },
            is_refresh,
        )
    }
}

pub(crate) fn map_person(person: people_engine::Person) -> Person {
    Person::new(person.id, person.full_name)
}
