//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry point
//! for every planner operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., parsing selector strings, turning listing indexes into
//!   drag gestures)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business logic.
//!
//! ## Generic Over SlotStore
//!
//! `PlannerApi<S: SlotStore>` is generic over the slot backend:
//! - Production: `PlannerApi<FsSlots>`
//! - Testing: `PlannerApi<MemSlots>`

use crate::commands::config::ConfigAction;
use crate::commands::{self, CmdResult, PlannerPaths};
use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::index::{parse_selectors, ItemSelector};
use crate::model::{Note, NoteDraft, NotePatch, Task, TaskDraft, TaskPatch};
use crate::reorder::DragGesture;
use crate::store::SlotStore;
use crate::view::{NoteQuery, TaskQuery};
use crate::workspace::Workspace;

/// The main API facade for planner operations.
pub struct PlannerApi<S: SlotStore> {
    workspace: Workspace<S>,
    paths: PlannerPaths,
}

impl<S: SlotStore> PlannerApi<S> {
    /// Opens the workspace, loading both collections.
    pub fn new(slots: S, paths: PlannerPaths, config: PlannerConfig) -> Result<Self> {
        let workspace = Workspace::init(slots, config)?;
        Ok(Self { workspace, paths })
    }

    /// Flushes pending saves and releases the slot store.
    pub fn teardown(self) -> Result<S> {
        self.workspace.teardown()
    }

    pub fn workspace(&self) -> &Workspace<S> {
        &self.workspace
    }

    pub fn paths(&self) -> &PlannerPaths {
        &self.paths
    }

    pub fn add_task(&mut self, draft: TaskDraft) -> Result<CmdResult> {
        commands::add::run::<Task, _>(&mut self.workspace, draft)
    }

    pub fn add_note(&mut self, draft: NoteDraft) -> Result<CmdResult> {
        commands::add::run::<Note, _>(&mut self.workspace, draft)
    }

    pub fn list_tasks(&self, query: &TaskQuery) -> Result<CmdResult> {
        commands::list::run::<Task, _>(&self.workspace, query)
    }

    pub fn list_notes(&self, query: &NoteQuery) -> Result<CmdResult> {
        commands::list::run::<Note, _>(&self.workspace, query)
    }

    pub fn update_task(&mut self, selector: &str, patch: TaskPatch) -> Result<CmdResult> {
        let selector: ItemSelector = selector.parse()?;
        commands::update::run::<Task, _>(&mut self.workspace, &selector, patch)
    }

    pub fn update_note(&mut self, selector: &str, patch: NotePatch) -> Result<CmdResult> {
        let selector: ItemSelector = selector.parse()?;
        commands::update::run::<Note, _>(&mut self.workspace, &selector, patch)
    }

    pub fn toggle_tasks<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::complete::run(&mut self.workspace, &selectors)
    }

    pub fn delete_tasks<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run::<Task, _>(&mut self.workspace, &selectors)
    }

    pub fn delete_notes<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run::<Note, _>(&mut self.workspace, &selectors)
    }

    /// Drags a task within the view described by `query`.
    pub fn drag_task(&mut self, query: &TaskQuery, gesture: DragGesture) -> Result<CmdResult> {
        commands::move_item::run::<Task, _>(&mut self.workspace, query, gesture)
    }

    pub fn drag_note(&mut self, query: &NoteQuery, gesture: DragGesture) -> Result<CmdResult> {
        commands::move_item::run::<Note, _>(&mut self.workspace, query, gesture)
    }

    /// Moves the task listed at `from` to listing index `to` (both 1-based).
    pub fn move_task(&mut self, from: usize, to: usize) -> Result<CmdResult> {
        let gesture = listing_gesture(from, to)?;
        self.drag_task(&TaskQuery::default(), gesture)
    }

    pub fn move_note(&mut self, from: usize, to: usize) -> Result<CmdResult> {
        let gesture = listing_gesture(from, to)?;
        self.drag_note(&NoteQuery::default(), gesture)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.workspace)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn init(&self) -> Result<CmdResult> {
        commands::init::run(&self.paths)
    }
}

fn listing_gesture(from: usize, to: usize) -> Result<DragGesture> {
    if from == 0 || to == 0 {
        return Err(PlannerError::Api("Indexes start at 1".to_string()));
    }
    Ok(DragGesture::new(from - 1, Some(to - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::MemSlots;
    use std::path::PathBuf;

    fn make_api() -> PlannerApi<MemSlots> {
        let paths = PlannerPaths {
            data_dir: PathBuf::from("/tmp/peakplanner-test"),
        };
        PlannerApi::new(MemSlots::new(), paths, PlannerConfig::default()).unwrap()
    }

    fn task_titles(api: &PlannerApi<MemSlots>) -> Vec<String> {
        api.workspace()
            .tasks()
            .items()
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    #[test]
    fn api_add_and_list() {
        let mut api = make_api();
        api.add_task(TaskDraft::new("A", "a")).unwrap();
        api.add_note(NoteDraft::new("N", "n")).unwrap();
        assert_eq!(api.list_tasks(&TaskQuery::default()).unwrap().listed.len(), 1);
        assert_eq!(api.list_notes(&NoteQuery::default()).unwrap().listed.len(), 1);
    }

    #[test]
    fn api_rejects_malformed_selectors() {
        let mut api = make_api();
        assert!(api.delete_tasks(&["0"]).is_err());
        assert!(api.update_task("", TaskPatch::default()).is_err());
    }

    #[test]
    fn api_move_uses_one_based_indexes() {
        let mut api = make_api();
        for title in ["A", "B", "C", "D"] {
            api.add_task(TaskDraft::new(title, "x")).unwrap();
        }
        api.move_task(1, 3).unwrap();
        assert_eq!(task_titles(&api), vec!["B", "C", "A", "D"]);
        assert!(api.move_task(0, 2).is_err());
    }

    #[test]
    fn api_toggle_and_delete() {
        let mut api = make_api();
        api.add_task(TaskDraft::new("A", "a")).unwrap();
        api.add_task(TaskDraft::new("B", "b")).unwrap();
        api.toggle_tasks(&["1"]).unwrap();
        assert!(api.workspace().tasks().items()[0].completed);

        let result = api.delete_tasks(&["2", "9"]).unwrap();
        assert_eq!(task_titles(&api), vec!["A"]);
        assert!(result.has_level(MessageLevel::Warning));
    }

    #[test]
    fn api_teardown_returns_persisted_slots() {
        let mut api = make_api();
        api.add_note(NoteDraft::new("Keep me", "text")).unwrap();
        let slots = api.teardown().unwrap();
        let reopened = PlannerApi::new(
            slots,
            PlannerPaths {
                data_dir: PathBuf::from("/tmp/peakplanner-test"),
            },
            PlannerConfig::default(),
        )
        .unwrap();
        assert_eq!(reopened.workspace().notes().items()[0].title, "Keep me");
    }
}
