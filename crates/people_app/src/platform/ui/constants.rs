pub const EMPTY_STATE_TEXT: &str = "No one here :)";
pub const RETRY_ACTION: &str = "Retry";
pub const REFRESHING_TEXT: &str = "Refreshing...";
pub const HELP_TEXT: &str =
    "Commands: [Enter] scroll to end, r = pull to refresh, retry = retry after an error, q = quit";
