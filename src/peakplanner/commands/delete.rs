use crate::commands::helpers::resolve_selectors;
use crate::commands::{CmdMessage, CmdResult, DisplayItem, PlannerItem};
use crate::error::Result;
use crate::index::ItemSelector;
use crate::model::Item;
use crate::store::SlotStore;
use crate::workspace::Workspace;

/// Removes the selected items. Selectors are resolved up front, so indexes refer to the
/// listing the user saw before anything was removed.
pub fn run<T: PlannerItem, S: SlotStore>(
    ws: &mut Workspace<S>,
    selectors: &[ItemSelector],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let resolved = resolve_selectors(ws.items::<T>().items(), selectors, &mut result);

    for (pos, id) in resolved {
        let mutation = ws.mutate::<T, _, _>(|store| store.remove(&id));
        result.record_save(T::KIND, &mutation.save);
        if let Some(item) = mutation.value {
            result.add_message(CmdMessage::success(format!(
                "Deleted {} ({}): {}",
                T::KIND,
                pos + 1,
                item.title()
            )));
            result.affected.push(DisplayItem::new(pos, item));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::config::PlannerConfig;
    use crate::model::{Note, NoteDraft};
    use crate::persist::NOTES_SLOT;
    use crate::store::memory::MemSlots;

    fn seeded(titles: &[&str]) -> Workspace<MemSlots> {
        let mut ws = Workspace::init(MemSlots::new(), PlannerConfig::default()).unwrap();
        for title in titles {
            add::run::<Note, _>(&mut ws, NoteDraft::new(*title, "text")).unwrap();
        }
        ws
    }

    #[test]
    fn deletes_by_original_indexes() {
        let mut ws = seeded(&["A", "B", "C"]);
        let result = run::<Note, _>(&mut ws, &[ItemSelector::Index(1), ItemSelector::Index(3)])
            .unwrap();
        let left: Vec<_> = ws.notes().items().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(left, vec!["B"]);
        assert_eq!(result.affected.len(), 2);
        assert_eq!(result.affected[1].index, 3);
    }

    #[test]
    fn deleting_twice_is_the_same_as_once() {
        let mut ws = seeded(&["A", "B"]);
        let id = ws.notes().items()[0].id.clone();
        let selector = ItemSelector::Id(id.as_str().to_string());
        run::<Note, _>(&mut ws, std::slice::from_ref(&selector)).unwrap();
        let after_once = ws.notes().items().to_vec();
        run::<Note, _>(&mut ws, std::slice::from_ref(&selector)).unwrap();
        assert_eq!(ws.notes().items(), after_once.as_slice());
    }

    #[test]
    fn deleting_the_last_note_clears_the_slot() {
        let mut ws = seeded(&["Only"]);
        run::<Note, _>(&mut ws, &[ItemSelector::Index(1)]).unwrap();
        assert!(!ws.slots().contains(NOTES_SLOT).unwrap());
    }
}
