use crate::api::PlannerApi;
use crate::commands::PlannerPaths;
use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::store::fs::FsSlots;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides the data directory.
pub const HOME_ENV: &str = "PEAKPLANNER_HOME";

pub struct PlannerContext {
    pub api: PlannerApi<FsSlots>,
    pub config: PlannerConfig,
}

/// Picks the data directory: `override_dir` when given, otherwise the platform data dir.
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    let proj_dirs = ProjectDirs::from("com", "peakplanner", "peakplanner").ok_or_else(|| {
        PlannerError::Config(format!(
            "Could not determine a data directory, set {}",
            HOME_ENV
        ))
    })?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Loads config and both collections from `data_dir`.
pub fn initialize(data_dir: PathBuf) -> Result<PlannerContext> {
    let config = PlannerConfig::load(&data_dir)?;
    let slots = FsSlots::new(data_dir.clone());
    let paths = PlannerPaths { data_dir };
    let api = PlannerApi::new(slots, paths, config)?;
    tracing::debug!(data_dir = %api.paths().data_dir.display(), "planner context ready");
    Ok(PlannerContext { api, config })
}
