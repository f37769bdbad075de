use crate::commands::CmdResult;
use crate::error::Result;
use crate::stats::Dashboard;
use crate::store::SlotStore;
use crate::workspace::Workspace;

pub fn run<S: SlotStore>(ws: &Workspace<S>) -> Result<CmdResult> {
    let dashboard = Dashboard::build(ws.tasks().items(), ws.notes().items());
    Ok(CmdResult::default().with_dashboard(dashboard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, complete};
    use crate::config::PlannerConfig;
    use crate::index::ItemSelector;
    use crate::model::{Note, NoteDraft, Task, TaskDraft};
    use crate::store::memory::MemSlots;

    #[test]
    fn summarizes_both_collections() {
        let mut ws = Workspace::init(MemSlots::new(), PlannerConfig::default()).unwrap();
        add::run::<Task, _>(&mut ws, TaskDraft::new("A", "a")).unwrap();
        add::run::<Task, _>(&mut ws, TaskDraft::new("B", "b")).unwrap();
        add::run::<Note, _>(&mut ws, NoteDraft::new("N", "n")).unwrap();
        complete::run(&mut ws, &[ItemSelector::Index(1)]).unwrap();

        let dashboard = run(&ws).unwrap().dashboard.unwrap();
        assert_eq!(dashboard.stats.completed, 1);
        assert_eq!(dashboard.stats.completion_rate, 50);
        assert_eq!(dashboard.recent_tasks.len(), 2);
        assert_eq!(dashboard.recent_notes.len(), 1);
    }

    #[test]
    fn recent_tasks_come_from_seeded_data() {
        let ws = crate::test_utils::seeded_workspace();
        let dashboard = run(&ws).unwrap().dashboard.unwrap();
        let titles: Vec<_> = dashboard
            .recent_tasks
            .iter()
            .map(|(_, t)| t.title.as_str())
            .collect();
        // Latest due date first, then the undated tasks in store order.
        assert_eq!(titles, vec!["Read paper", "Write report", "Buy milk"]);
        assert_eq!(dashboard.stats.total, 4);
        assert_eq!(dashboard.stats.completion_rate, 0);
    }
}
