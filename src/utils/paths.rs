//! Cross-Platform Path Utilities
//!
//! Functions for resolving the engine's data directories (~/.plan-forge/).

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Plan Forge directory (~/.plan-forge/)
pub fn plan_forge_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".plan-forge"))
}

/// Get the config file path (~/.plan-forge/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(plan_forge_dir()?.join("config.json"))
}

/// Get the database file path (~/.plan-forge/data.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(plan_forge_dir()?.join("data.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the Plan Forge directory, creating if it doesn't exist
pub fn ensure_plan_forge_dir() -> AppResult<PathBuf> {
    let path = plan_forge_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
