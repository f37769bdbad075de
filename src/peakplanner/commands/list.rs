use crate::commands::{CmdMessage, CmdResult, DisplayItem, PlannerItem};
use crate::error::Result;
use crate::store::SlotStore;
use crate::workspace::Workspace;

/// Lists the items visible under `query`, in view order.
pub fn run<T: PlannerItem, S: SlotStore>(ws: &Workspace<S>, query: &T::Query) -> Result<CmdResult> {
    let store = ws.items::<T>();
    let listed: Vec<DisplayItem> = T::project(store.items(), query)
        .into_iter()
        .map(|entry| DisplayItem::new(entry.position, entry.item.clone()))
        .collect();

    let mut result = CmdResult::default();
    let report = T::load_report(ws);
    if report.malformed {
        result.add_message(CmdMessage::warning(format!(
            "Stored {}s could not be read and were ignored",
            T::KIND
        )));
    } else if report.dropped > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} unreadable {}(s) were skipped while loading",
            report.dropped,
            T::KIND
        )));
    }
    if store.is_empty() {
        result.add_message(CmdMessage::info(format!("No {}s yet", T::KIND)));
    } else if listed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No {}s match the current filters",
            T::KIND
        )));
    }
    Ok(result.with_listed(listed))
}
