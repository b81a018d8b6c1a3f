//! People list core: pure list state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{FetchKind, ListState, PendingRetry, Person, PersonId, ScreenPhase};
pub use update::update;
pub use view_model::{ListViewModel, PersonRowView};
