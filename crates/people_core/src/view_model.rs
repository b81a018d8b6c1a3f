use crate::{PersonId, ScreenPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListViewModel {
    pub rows: Vec<PersonRowView>,
    pub empty_state_visible: bool,
    pub phase: ScreenPhase,
    /// Message of the error currently offered for retry.
    pub alert: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRowView {
    pub id: PersonId,
    pub full_name: String,
}
