//! rax-dir - Entry Point
//!
//! Interactive shell for creating, deleting and archiving directories under a
//! working root. An optional first argument names the config file.

use log::{error, info};
use std::process;

use rax_dir_manager::config::ManagerConfig;
use rax_dir_manager::shell::run_session;
use rax_dir_manager::utils::setup_logging;
use rax_dir_manager::{DirectoryManager, SharedDirectoryManager};

#[tokio::main]
async fn main() {
    setup_logging();

    let config_path = std::env::args().nth(1);
    let loaded = match &config_path {
        Some(path) => ManagerConfig::load_from(path),
        None => ManagerConfig::load(),
    };

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!(
                "Failed to load configuration from {}: {}",
                config_path.as_deref().unwrap_or("config.toml"),
                e
            );
            process::exit(2);
        }
    };

    let manager = match DirectoryManager::from_config(&config) {
        Ok(manager) => manager,
        Err(e) => {
            error!("Failed to initialize working directory: {}", e);
            process::exit(1);
        }
    };

    info!("Launching rax-dir shell...");

    let shared = SharedDirectoryManager::new(manager);
    if let Err(e) = run_session(shared, tokio::io::stdin(), tokio::io::stdout()).await {
        error!("Shell I/O error: {}", e);
        process::exit(1);
    }
}
