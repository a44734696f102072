//! Environment loading
//!
//! Database settings come from `DB_*` variables. For local runs they may
//! live in `.env` files; on Lambda they are set on the function.

use std::path::PathBuf;

use tracing::debug;

/// Load environment variables from .env files in multiple locations
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.bookstore/.env
///
/// dotenvy never overwrites a variable that is already set.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from ~/.bookstore: {}", env_file.display());
                    loaded_from.push(env_file);
                }
                Err(e) => {
                    debug!("Failed to load ~/.bookstore/.env: {}", e);
                }
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.bookstore)");
    }

    loaded_from
}

/// Get the bookstore config directory path (~/.bookstore)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bookstore"))
}
