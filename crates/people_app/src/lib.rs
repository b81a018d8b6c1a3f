//! People list app: the list controller, display surfaces and the terminal demo.
mod platform;

pub use platform::app::run_app;
pub use platform::config::{load_config, AppConfig, ConfigError, SourceConfig, DEFAULT_CONFIG_PATH};
pub use platform::controller::ListController;
pub use platform::logging::{initialize as initialize_logging, LogDestination};
pub use platform::ui::{DisplaySurface, TerminalSurface};
