#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the fetch coordinator for a page. Duplicates are absorbed there.
    FetchPeople { is_refresh: bool },
    /// Stop any pull-to-refresh spinner.
    EndRefreshing,
    /// Show a dismissible alert with a single "Retry" action.
    PresentError { message: String },
}
