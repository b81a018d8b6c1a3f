use std::sync::mpsc;
use std::time::{Duration, Instant};

use people_core::{update, ListState, ListViewModel, Msg};
use people_engine::{FetchCoordinator, FetchError};
use people_logging::{people_info, LIST_TARGET};

use super::effects::{map_person, EffectRunner};
use super::ui::DisplaySurface;

/// Drives the fetch coordinator and keeps the deduplicated list of people.
///
/// All methods are meant to be called from the thread that owns the display
/// surface. Fetch results arrive on the coordinator's worker and are queued;
/// [`ListController::process_pending_messages`] applies them.
pub struct ListController<S: DisplaySurface> {
    state: ListState,
    surface: S,
    effects: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl<S: DisplaySurface> ListController<S> {
    pub fn new(coordinator: FetchCoordinator, surface: S) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let mut controller = Self {
            state: ListState::new(),
            surface,
            effects: EffectRunner::new(coordinator, msg_tx),
            msg_rx,
        };
        let initial_view = controller.state.view();
        controller.render(&initial_view);
        controller
    }

    pub fn on_appear(&mut self) {
        self.dispatch_msg(Msg::Appeared);
    }

    pub fn on_refresh_triggered(&mut self) {
        self.dispatch_msg(Msg::RefreshTriggered);
    }

    pub fn on_near_end_of_list(&mut self) {
        self.dispatch_msg(Msg::NearEndOfList);
    }

    pub fn on_prefetch_rows(&mut self, rows: Vec<usize>) {
        self.dispatch_msg(Msg::PrefetchRows(rows));
    }

    pub fn on_will_display_row(&mut self, row: usize) {
        self.dispatch_msg(Msg::WillDisplayRow(row));
    }

    /// The "Retry" action of the error alert.
    pub fn on_retry(&mut self) {
        if let Some(retry) = self.state.pending_retry() {
            people_info!(target: LIST_TARGET, "retrying {:?} after: {}", retry.kind, retry.message);
        }
        self.dispatch_msg(Msg::RetryClicked);
    }

    pub fn on_fetch_success(&mut self, people: Vec<people_engine::Person>, is_refresh: bool) {
        self.dispatch_msg(Msg::FetchSucceeded {
            people: people.into_iter().map(map_person).collect(),
            is_refresh,
        });
    }

    pub fn on_fetch_error(&mut self, error: FetchError, is_refresh: bool) {
        self.dispatch_msg(Msg::FetchFailed {
            message: error.description().to_string(),
            is_refresh,
        });
    }

    /// Applies every queued fetch completion. Returns how many were applied.
    pub fn process_pending_messages(&mut self) -> usize {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        let count = inbox.len();
        for msg in inbox {
            self.dispatch_msg(msg);
        }
        count
    }

    /// Blocks until a fetch completes, then applies everything queued.
    ///
    /// Declined requests queued before the completion are applied on the way.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let Ok(msg) = self.msg_rx.recv_timeout(remaining) else {
                return false;
            };
            let completed = matches!(msg, Msg::FetchSucceeded { .. } | Msg::FetchFailed { .. });
            self.dispatch_msg(msg);
            if completed {
                self.process_pending_messages();
                return true;
            }
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn view(&self) -> ListViewModel {
        self.state.view()
    }

    pub fn coordinator(&self) -> &FetchCoordinator {
        self.effects.coordinator()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let maybe_view = state.consume_dirty().then(|| state.view());
        self.state = state;

        self.effects.apply(effects, &mut self.surface);
        if let Some(view) = maybe_view {
            self.render(&view);
        }
    }

    fn render(&mut self, view: &ListViewModel) {
        self.surface.set_empty_state_visible(view.empty_state_visible);
        self.surface.render_rows(&view.rows);
    }
}
