use crate::{Cursor, FetchError, Page};

/// The remote provider of people pages.
///
/// `None` asks for the first page. Transport, status and decode failures are
/// all reported as a single [`FetchError`].
#[async_trait::async_trait]
pub trait PeopleSource: Send + Sync {
    async fn fetch(&self, cursor: Option<&Cursor>) -> Result<Page, FetchError>;
}
