use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(people_app::DEFAULT_CONFIG_PATH));
    let config = people_app::load_config(&path)?;
    people_app::run_app(config)
}
