use crate::commands::helpers::resolve_selectors;
use crate::commands::{CmdMessage, CmdResult, DisplayItem};
use crate::error::Result;
use crate::index::ItemSelector;
use crate::model::Task;
use crate::store::SlotStore;
use crate::workspace::Workspace;

/// Flips the completion flag of each selected task.
pub fn run<S: SlotStore>(ws: &mut Workspace<S>, selectors: &[ItemSelector]) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let resolved = resolve_selectors(ws.tasks().items(), selectors, &mut result);

    for (pos, id) in resolved {
        let mutation = ws.mutate::<Task, _, _>(|store| store.toggle_completion(&id));
        if !mutation.value {
            continue;
        }
        result.record_save("task", &mutation.save);
        if let Some(task) = ws.tasks().get(&id) {
            let state = if task.completed { "done" } else { "pending" };
            result.add_message(CmdMessage::success(format!(
                "Task {} marked {}: {}",
                pos + 1,
                state,
                task.title
            )));
            result.affected.push(DisplayItem::new(pos, task.clone()));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::config::PlannerConfig;
    use crate::model::TaskDraft;
    use crate::store::memory::MemSlots;

    #[test]
    fn toggles_back_and_forth() {
        let mut ws = Workspace::init(MemSlots::new(), PlannerConfig::default()).unwrap();
        add::run::<Task, _>(&mut ws, TaskDraft::new("A", "a")).unwrap();
        add::run::<Task, _>(&mut ws, TaskDraft::new("B", "b")).unwrap();

        run(&mut ws, &[ItemSelector::Index(2)]).unwrap();
        assert!(!ws.tasks().items()[0].completed);
        assert!(ws.tasks().items()[1].completed);

        let result = run(&mut ws, &[ItemSelector::Index(2)]).unwrap();
        assert!(!ws.tasks().items()[1].completed);
        assert!(result.messages[0].content.contains("pending"));
    }
}
