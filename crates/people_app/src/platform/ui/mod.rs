//! Display surfaces the list controller renders into.
pub mod constants;
pub mod render;

use std::io::{self, Write};

use people_core::PersonRowView;
use people_logging::{people_warn, LIST_TARGET};

/// Everything the list controller needs from a rendering host.
///
/// Implementations are only ever called from the thread that owns the
/// controller.
pub trait DisplaySurface {
    fn render_rows(&mut self, rows: &[PersonRowView]);
    fn set_empty_state_visible(&mut self, visible: bool);
    fn end_refreshing(&mut self);
    /// Shows `message` with a single "Retry" action. The host routes that
    /// action to `ListController::on_retry`.
    fn present_retryable_error(&mut self, message: &str);
}

/// Line-oriented surface for terminals and tests.
pub struct TerminalSurface<W: Write> {
    out: W,
    empty_state_visible: bool,
    refreshing: bool,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            empty_state_visible: false,
            refreshing: false,
        }
    }

    pub fn begin_refreshing(&mut self) {
        self.refreshing = true;
        self.write_lines(&[constants::REFRESHING_TEXT.to_string()]);
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{line}"))
            .and_then(|()| self.out.flush());
        if let Err(err) = result {
            people_warn!(target: LIST_TARGET, "terminal surface write failed: {}", err);
        }
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn render_rows(&mut self, rows: &[PersonRowView]) {
        let lines = render::render_list(rows, self.empty_state_visible, chrono::Local::now());
        self.write_lines(&lines);
    }

    fn set_empty_state_visible(&mut self, visible: bool) {
        self.empty_state_visible = visible;
    }

    fn end_refreshing(&mut self) {
        self.refreshing = false;
    }

    fn present_retryable_error(&mut self, message: &str) {
        let lines = render::render_alert(message);
        self.write_lines(&lines);
    }
}
