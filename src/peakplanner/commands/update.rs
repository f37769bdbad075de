use crate::commands::helpers::resolve_selectors;
use crate::commands::{CmdMessage, CmdResult, DisplayItem, PlannerItem};
use crate::error::Result;
use crate::index::ItemSelector;
use crate::model::Item;
use crate::store::SlotStore;
use crate::workspace::Workspace;

pub fn run<T: PlannerItem, S: SlotStore>(
    ws: &mut Workspace<S>,
    selector: &ItemSelector,
    patch: T::Patch,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let resolved = resolve_selectors(
        ws.items::<T>().items(),
        std::slice::from_ref(selector),
        &mut result,
    );
    let Some((pos, id)) = resolved.into_iter().next() else {
        return Ok(result);
    };

    let mutation = ws.mutate::<T, _, _>(|store| store.update(&id, patch));
    if !mutation.value {
        result.add_message(CmdMessage::info(format!(
            "Nothing to change on {} {}",
            T::KIND,
            pos + 1
        )));
        return Ok(result);
    }
    result.record_save(T::KIND, &mutation.save);

    if let Some(item) = ws.items::<T>().get(&id) {
        result.add_message(CmdMessage::success(format!(
            "Updated {} {}: {}",
            T::KIND,
            pos + 1,
            item.title()
        )));
        result.affected.push(DisplayItem::new(pos, item.clone()));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, MessageLevel};
    use crate::config::PlannerConfig;
    use crate::model::{Category, Note, NoteDraft, NotePatch, Task, TaskDraft, TaskPatch};
    use crate::store::memory::MemSlots;

    fn workspace() -> Workspace<MemSlots> {
        Workspace::init(MemSlots::new(), PlannerConfig::default()).unwrap()
    }

    #[test]
    fn updates_selected_fields() {
        let mut ws = workspace();
        add::run::<Note, _>(&mut ws, NoteDraft::new("Idea", "rough")).unwrap();
        let patch = NotePatch {
            text: Some("polished".into()),
            category: Some(Category::Ideas),
            ..Default::default()
        };
        let result = run::<Note, _>(&mut ws, &ItemSelector::Index(1), patch).unwrap();

        let note = &ws.notes().items()[0];
        assert_eq!(note.title, "Idea");
        assert_eq!(note.text, "polished");
        assert!(note.category.is(Category::Ideas));
        assert_eq!(result.affected.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn unknown_selector_is_a_warning() {
        let mut ws = workspace();
        let result =
            run::<Task, _>(&mut ws, &ItemSelector::Index(4), TaskPatch::default()).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut ws = workspace();
        add::run::<Task, _>(&mut ws, TaskDraft::new("T", "body")).unwrap();
        let before = ws.tasks().items().to_vec();
        let result = run::<Task, _>(
            &mut ws,
            &ItemSelector::Index(1),
            TaskPatch {
                body: Some("  ".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(ws.tasks().items(), before.as_slice());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }
}
