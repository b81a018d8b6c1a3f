use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use futures_util::FutureExt;
use people_logging::{people_debug, people_error, people_info, people_warn, FETCH_TARGET};
use tokio::runtime::Runtime;
use tokio::task::JoinSet;

use crate::{Cursor, EngineError, FetchError, PeopleSource, Person};

type SuccessCallback = Box<dyn FnOnce(Vec<Person>, bool) + Send>;
type ErrorCallback = Box<dyn FnOnce(FetchError, bool) + Send>;

struct FetchCommand {
    cursor: Option<Cursor>,
    is_refresh: bool,
    on_success: SuccessCallback,
    on_error: ErrorCallback,
}

#[derive(Debug, Default)]
enum PageCursor {
    #[default]
    Start,
    Next(Cursor),
    End,
}

/// Pagination position plus the cursors with a request outstanding.
///
/// `None` in `in_flight` is the first-page cursor; a refresh uses it too.
#[derive(Debug, Default)]
struct CursorBook {
    current: PageCursor,
    in_flight: HashSet<Option<Cursor>>,
}

impl CursorBook {
    /// `None` when a page request has nothing left to fetch.
    fn effective_cursor(&self, is_refresh: bool) -> Option<Option<Cursor>> {
        if is_refresh {
            return Some(None);
        }
        match &self.current {
            PageCursor::Start => Some(None),
            PageCursor::Next(cursor) => Some(Some(cursor.clone())),
            PageCursor::End => None,
        }
    }

    fn complete(&mut self, cursor: &Option<Cursor>, next: Option<Option<Cursor>>) {
        if let Some(next) = next {
            self.current = match next {
                Some(cursor) => PageCursor::Next(cursor),
                None => PageCursor::End,
            };
        }
        self.in_flight.remove(cursor);
    }
}

/// Serializes and deduplicates paginated fetches against one [`PeopleSource`].
///
/// At most one request per cursor is outstanding. Requests run on a dedicated
/// worker thread that owns its own tokio runtime, so callers never block.
/// Dropping the coordinator stops intake; already dispatched fetches still run
/// to completion and deliver their callbacks.
pub struct FetchCoordinator {
    book: Arc<Mutex<CursorBook>>,
    cmd_tx: mpsc::Sender<FetchCommand>,
}

impl FetchCoordinator {
    pub fn new(source: Arc<dyn PeopleSource>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("people-fetch")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let book = Arc::new(Mutex::new(CursorBook::default()));

        let worker_book = book.clone();
        thread::Builder::new()
            .name("people-fetch-dispatch".to_string())
            .spawn(move || run_worker(runtime, source, worker_book, cmd_rx))?;

        Ok(Self { book, cmd_tx })
    }

    /// Requests the next page, or the first page when `is_refresh` is set.
    ///
    /// Returns `false` without invoking either callback when a request for the
    /// same cursor is already outstanding, or when the end of the list was
    /// reached and this is not a refresh. Otherwise exactly one of the
    /// callbacks runs later on the fetch worker.
    pub fn fetch_people<S, E>(&self, on_success: S, on_error: E, is_refresh: bool) -> bool
    where
        S: FnOnce(Vec<Person>, bool) + Send + 'static,
        E: FnOnce(FetchError, bool) + Send + 'static,
    {
        let cursor = {
            let mut book = lock(&self.book);
            let Some(cursor) = book.effective_cursor(is_refresh) else {
                people_debug!(target: FETCH_TARGET, "end of list reached; nothing to fetch");
                return false;
            };
            if !book.in_flight.insert(cursor.clone()) {
                people_debug!(
                    target: FETCH_TARGET,
                    "fetch for {} already in flight; dropping request",
                    describe(&cursor)
                );
                return false;
            }
            cursor
        };

        people_info!(
            target: FETCH_TARGET,
            "dispatching fetch for {} refresh={}",
            describe(&cursor),
            is_refresh
        );
        let command = FetchCommand {
            cursor,
            is_refresh,
            on_success: Box::new(on_success),
            on_error: Box::new(on_error),
        };
        if let Err(mpsc::SendError(command)) = self.cmd_tx.send(command) {
            people_error!(target: FETCH_TARGET, "fetch worker is gone; request dropped");
            lock(&self.book).in_flight.remove(&command.cursor);
            return false;
        }
        true
    }

    /// Cursor the next page request would use; `None` before the first page
    /// and after the end of the list.
    pub fn current_cursor(&self) -> Option<Cursor> {
        match &lock(&self.book).current {
            PageCursor::Next(cursor) => Some(cursor.clone()),
            PageCursor::Start | PageCursor::End => None,
        }
    }

    pub fn end_reached(&self) -> bool {
        matches!(lock(&self.book).current, PageCursor::End)
    }

    pub fn is_in_flight(&self, cursor: Option<&Cursor>) -> bool {
        lock(&self.book).in_flight.contains(&cursor.cloned())
    }

    pub fn in_flight_count(&self) -> usize {
        lock(&self.book).in_flight.len()
    }
}

fn lock(book: &Mutex<CursorBook>) -> MutexGuard<'_, CursorBook> {
    book.lock().unwrap_or_else(PoisonError::into_inner)
}

fn describe(cursor: &Option<Cursor>) -> String {
    match cursor {
        Some(cursor) => format!("cursor '{cursor}'"),
        None => "first page".to_string(),
    }
}

fn run_worker(
    runtime: Runtime,
    source: Arc<dyn PeopleSource>,
    book: Arc<Mutex<CursorBook>>,
    cmd_rx: mpsc::Receiver<FetchCommand>,
) {
    let mut tasks = JoinSet::new();
    while let Ok(command) = cmd_rx.recv() {
        tasks.spawn_on(
            run_fetch(source.clone(), book.clone(), command),
            runtime.handle(),
        );
        while tasks.try_join_next().is_some() {}
    }
    // No cancellation: let every dispatched fetch deliver before shutdown.
    runtime.block_on(async { while tasks.join_next().await.is_some() {} });
}

async fn run_fetch(
    source: Arc<dyn PeopleSource>,
    book: Arc<Mutex<CursorBook>>,
    command: FetchCommand,
) {
    let FetchCommand {
        cursor,
        is_refresh,
        on_success,
        on_error,
    } = command;

    let result = AssertUnwindSafe(source.fetch(cursor.as_ref()))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| Err(FetchError::new("The people source panicked.")));

    match result {
        Ok(page) => {
            people_info!(
                target: FETCH_TARGET,
                "fetched {} people for {}; next={:?}",
                page.people.len(),
                describe(&cursor),
                page.next
            );
            lock(&book).complete(&cursor, Some(page.next));
            on_success(page.people, is_refresh);
        }
        Err(error) => {
            people_warn!(
                target: FETCH_TARGET,
                "fetch for {} failed: {}",
                describe(&cursor),
                error
            );
            lock(&book).complete(&cursor, None);
            on_error(error, is_refresh);
        }
    }
}
