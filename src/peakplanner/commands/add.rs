use crate::commands::{CmdMessage, CmdResult, DisplayItem, PlannerItem};
use crate::error::Result;
use crate::model::Item;
use crate::store::SlotStore;
use crate::workspace::Workspace;

pub fn run<T: PlannerItem, S: SlotStore>(
    ws: &mut Workspace<S>,
    draft: T::Draft,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mutation = ws.mutate::<T, _, _>(|store| store.add(draft));

    let Some(id) = mutation.value else {
        result.add_message(CmdMessage::info(format!(
            "Nothing added: a {} needs some content",
            T::KIND
        )));
        return Ok(result);
    };
    result.record_save(T::KIND, &mutation.save);

    let store = ws.items::<T>();
    if let Some(pos) = store.position(&id) {
        let item = store.items()[pos].clone();
        result.add_message(CmdMessage::success(format!(
            "Added {} {}: {}",
            T::KIND,
            pos + 1,
            item.title()
        )));
        result.affected.push(DisplayItem::new(pos, item));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{AnyItem, MessageLevel};
    use crate::config::PlannerConfig;
    use crate::model::{Category, Note, NoteDraft, Task, TaskDraft, UNTITLED};
    use crate::store::memory::MemSlots;

    fn workspace() -> Workspace<MemSlots> {
        Workspace::init(MemSlots::new(), PlannerConfig::default()).unwrap()
    }

    #[test]
    fn adds_task_at_the_end() {
        let mut ws = workspace();
        run::<Task, _>(&mut ws, TaskDraft::new("First", "one")).unwrap();
        let result = run::<Task, _>(&mut ws, TaskDraft::new("", "two")).unwrap();

        assert_eq!(ws.tasks().len(), 2);
        assert_eq!(result.affected.len(), 1);
        assert_eq!(result.affected[0].index, 2);
        assert_eq!(result.affected[0].item.title(), UNTITLED);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn blank_content_is_reported_not_added() {
        let mut ws = workspace();
        let result = run::<Note, _>(&mut ws, NoteDraft::new("x", "   ")).unwrap();
        assert!(ws.notes().is_empty());
        assert!(result.affected.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn save_failure_is_an_error_message() {
        let mut ws = workspace();
        ws.slots().set_simulate_write_error(true);
        let result = run::<Note, _>(
            &mut ws,
            NoteDraft::new("Idea", "text").with_category(Category::Ideas),
        )
        .unwrap();
        assert_eq!(ws.notes().len(), 1);
        assert!(result.has_level(MessageLevel::Error));
        assert!(matches!(result.affected[0].item, AnyItem::Note(_)));
    }
}
