//! People engine: paginated fetching and request deduplication.
mod coordinator;
mod fetch;
mod simulated;
mod source;
mod types;

pub use coordinator::FetchCoordinator;
pub use fetch::{FetchSettings, HttpPeopleSource};
pub use simulated::{SimulatedPeopleSource, SimulatedSettings};
pub use source::PeopleSource;
pub use types::{Cursor, EngineError, FetchError, Page, Person};
