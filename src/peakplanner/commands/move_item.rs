use crate::commands::{CmdMessage, CmdResult, DisplayItem, PlannerItem};
use crate::error::Result;
use crate::model::Item;
use crate::reorder::{self, DragGesture};
use crate::store::SlotStore;
use crate::workspace::Workspace;

/// Applies a drag made on the view described by `query`.
///
/// Drags on a sorted view are refused: the sort, not the store, decides what the user sees
/// there.
pub fn run<T: PlannerItem, S: SlotStore>(
    ws: &mut Workspace<S>,
    query: &T::Query,
    gesture: DragGesture,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !T::follows_store_order(query) {
        result.add_message(CmdMessage::info(
            "Reordering is disabled while the list is sorted",
        ));
        return Ok(result);
    }

    let planned = {
        let view = T::project(ws.items::<T>().items(), query);
        reorder::resolve(&view, gesture)
    };
    let Some(planned) = planned else {
        result.add_message(CmdMessage::info(format!("No {} moved", T::KIND)));
        return Ok(result);
    };

    let mutation = ws.mutate::<T, _, _>(|store| store.reorder(planned.from, planned.to));
    if !mutation.value {
        result.add_message(CmdMessage::info(format!("No {} moved", T::KIND)));
        return Ok(result);
    }
    result.record_save(T::KIND, &mutation.save);

    let moved = ws.items::<T>().items()[planned.to].clone();
    result.add_message(CmdMessage::success(format!(
        "Moved {} {} to {}: {}",
        T::KIND,
        planned.from + 1,
        planned.to + 1,
        moved.title()
    )));
    result.affected.push(DisplayItem::new(planned.to, moved));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, MessageLevel};
    use crate::config::PlannerConfig;
    use crate::model::{Category, Task, TaskDraft};
    use crate::store::memory::MemSlots;
    use crate::view::{Filter, SortKey, TaskQuery};

    fn seeded() -> Workspace<MemSlots> {
        let mut ws = Workspace::init(MemSlots::new(), PlannerConfig::default()).unwrap();
        for (title, category) in [
            ("A", Category::Work),
            ("B", Category::Personal),
            ("C", Category::Work),
            ("D", Category::Personal),
        ] {
            add::run::<Task, _>(&mut ws, TaskDraft::new(title, "x").with_category(category))
                .unwrap();
        }
        ws
    }

    fn order(ws: &Workspace<MemSlots>) -> Vec<&str> {
        ws.tasks().items().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn moves_within_unfiltered_view() {
        let mut ws = seeded();
        let result =
            run::<Task, _>(&mut ws, &TaskQuery::default(), DragGesture::new(0, Some(2))).unwrap();
        assert_eq!(order(&ws), vec!["B", "C", "A", "D"]);
        assert_eq!(result.affected[0].index, 3);
    }

    #[test]
    fn filtered_drag_is_mapped_to_store_positions() {
        let mut ws = seeded();
        let query = TaskQuery {
            category: Filter::Only(Category::Work),
            ..Default::default()
        };
        run::<Task, _>(&mut ws, &query, DragGesture::new(0, Some(1))).unwrap();
        assert_eq!(order(&ws), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn sorted_view_refuses_drags() {
        let mut ws = seeded();
        let query = TaskQuery {
            sort: SortKey::Date,
            ..Default::default()
        };
        let result = run::<Task, _>(&mut ws, &query, DragGesture::new(0, Some(3))).unwrap();
        assert_eq!(order(&ws), vec!["A", "B", "C", "D"]);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn out_of_range_drag_is_a_no_op() {
        let mut ws = seeded();
        let result =
            run::<Task, _>(&mut ws, &TaskQuery::default(), DragGesture::new(0, Some(9))).unwrap();
        assert_eq!(order(&ws), vec!["A", "B", "C", "D"]);
        assert!(result.affected.is_empty());
    }
}
