use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use people_engine::FetchCoordinator;
use people_logging::{people_info, people_warn, LIST_TARGET};

use super::config::AppConfig;
use super::controller::ListController;
use super::logging;
use super::ui::{constants::HELP_TEXT, TerminalSurface};

/// How often the display loop drains fetch completions while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(75);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserCommand {
    ScrollToEnd,
    Refresh,
    Retry,
    Quit,
}

fn parse_command(line: &str) -> Option<UserCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "n" | "next" => Some(UserCommand::ScrollToEnd),
        "r" | "refresh" => Some(UserCommand::Refresh),
        "retry" => Some(UserCommand::Retry),
        "q" | "quit" | "exit" => Some(UserCommand::Quit),
        _ => None,
    }
}

/// Runs the terminal demo: the main thread plays the display thread, stdin
/// stands in for scroll and pull-to-refresh gestures.
pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let level = config.level_filter().unwrap_or(LevelFilter::Info);
    logging::initialize(config.log_destination, level);
    if config.level_filter().is_none() {
        people_warn!(
            target: LIST_TARGET,
            "unknown log level {:?}; using info",
            config.log_level
        );
    }

    let source = config
        .source
        .build()
        .context("failed to set up the people source")?;
    let coordinator = FetchCoordinator::new(source).context("failed to start the fetch worker")?;
    let mut controller = ListController::new(coordinator, TerminalSurface::stdout());

    let (cmd_tx, cmd_rx) = mpsc::channel::<UserCommand>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Some(command) => {
                    if cmd_tx.send(command).is_err() {
                        break;
                    }
                }
                None => println!("{HELP_TEXT}"),
            }
        }
        let _ = cmd_tx.send(UserCommand::Quit);
    });

    println!("{HELP_TEXT}");
    people_info!(target: LIST_TARGET, "people list started with {:?}", config.source);
    controller.on_appear();

    loop {
        controller.process_pending_messages();
        match cmd_rx.recv_timeout(POLL_INTERVAL) {
            Ok(UserCommand::ScrollToEnd) => {
                let last_row = controller.state().len().saturating_sub(1);
                controller.on_will_display_row(last_row);
                controller.on_prefetch_rows(vec![last_row + 1]);
            }
            Ok(UserCommand::Refresh) => {
                controller.surface_mut().begin_refreshing();
                controller.on_refresh_triggered();
            }
            Ok(UserCommand::Retry) => controller.on_retry(),
            Ok(UserCommand::Quit) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
    }

    people_info!(target: LIST_TARGET, "people list closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_parsed_case_insensitively() {
        assert_eq!(parse_command(""), Some(UserCommand::ScrollToEnd));
        assert_eq!(parse_command(" R "), Some(UserCommand::Refresh));
        assert_eq!(parse_command("Retry"), Some(UserCommand::Retry));
        assert_eq!(parse_command("quit"), Some(UserCommand::Quit));
        assert_eq!(parse_command("dance"), None);
    }
}
