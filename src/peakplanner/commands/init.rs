use crate::commands::{CmdMessage, CmdResult, PlannerPaths};
use crate::config::PlannerConfig;
use crate::error::Result;
use std::fs;

/// Creates the data directory and writes a default config if there is none yet.
pub fn run(paths: &PlannerPaths) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    fs::create_dir_all(dir)?;
    let config = PlannerConfig::load(dir)?;
    config.save(dir)?;
    let mut result = CmdResult::default().with_config(config);
    result.add_message(CmdMessage::success(format!(
        "Initialized planner store at {}",
        dir.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_directory_and_config() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("planner");
        let paths = PlannerPaths {
            data_dir: data_dir.clone(),
        };
        run(&paths).unwrap();
        assert!(data_dir.join("config.json").exists());

        // Existing settings survive a second init.
        crate::commands::config::run(
            &paths,
            crate::commands::config::ConfigAction::Set("empty-slot".into(), "keep".into()),
        )
        .unwrap();
        let again = run(&paths).unwrap();
        assert_eq!(
            again.config.unwrap().empty_slot,
            crate::persist::EmptySlotPolicy::Keep
        );
    }
}
