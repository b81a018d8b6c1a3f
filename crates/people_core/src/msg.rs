#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The list screen became visible.
    Appeared,
    /// User pulled to refresh.
    RefreshTriggered,
    /// Scrolling reached the end of the loaded rows.
    NearEndOfList,
    /// The list view asked to prefetch these row indices.
    PrefetchRows(Vec<usize>),
    /// The list view is about to display this row.
    WillDisplayRow(usize),
    /// A page arrived from the fetch coordinator.
    FetchSucceeded {
        people: Vec<crate::Person>,
        is_refresh: bool,
    },
    /// A fetch failed.
    FetchFailed { message: String, is_refresh: bool },
    /// The coordinator declined a requested fetch: the same cursor was
    /// already in flight, or the list has no more pages.
    FetchSkipped { is_refresh: bool },
    /// User tapped "Retry" on the error alert.
    RetryClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
