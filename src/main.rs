use std::process::ExitCode;

use memory::config::GameConfig;
use memory::error::ConfigError;
use tracing::{error, info};

const CONFIG_ENV: &str = "MEMORY_CONFIG";

fn load_config() -> Result<GameConfig, ConfigError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!(path = ?path, "loading configuration");
            GameConfig::load(path)
        }
        None => {
            let config = GameConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

fn main() -> ExitCode {
    memory::logging::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if memory::ui::app::run(config) == gtk4::glib::ExitCode::SUCCESS {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
