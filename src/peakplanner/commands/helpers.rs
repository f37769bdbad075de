use crate::commands::{CmdMessage, CmdResult};
use crate::index::{resolve, ItemSelector, Resolution};
use crate::model::{Item, ItemId};

/// Resolves selectors against the current store order.
///
/// Returns `(position, id)` pairs in input order with duplicates removed. Selectors that
/// match nothing, or match several ids, are reported as warnings and skipped.
pub fn resolve_selectors<T: Item>(
    items: &[T],
    selectors: &[ItemSelector],
    result: &mut CmdResult,
) -> Vec<(usize, ItemId)> {
    let mut resolved: Vec<(usize, ItemId)> = Vec::with_capacity(selectors.len());
    for selector in selectors {
        match resolve(items, selector) {
            Resolution::Found(pos) => {
                let id = items[pos].id().clone();
                if !resolved.iter().any(|(_, seen)| seen == &id) {
                    resolved.push((pos, id));
                }
            }
            Resolution::NotFound => result.add_message(CmdMessage::warning(format!(
                "No {} matches {}",
                T::KIND,
                selector
            ))),
            Resolution::Ambiguous(count) => result.add_message(CmdMessage::warning(format!(
                "{} matches {} {}s, use a longer id",
                selector,
                count,
                T::KIND
            ))),
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::items::ItemStore;
    use crate::model::{Note, NoteDraft};

    #[test]
    fn skips_unknown_and_duplicate_selectors() {
        let mut store: ItemStore<Note> = ItemStore::new();
        let a = store.add(NoteDraft::new("A", "a")).unwrap();
        store.add(NoteDraft::new("B", "b"));

        let mut result = CmdResult::default();
        let selectors = vec![
            ItemSelector::Index(1),
            ItemSelector::Index(7),
            ItemSelector::Id(a.as_str().to_string()),
            ItemSelector::Index(2),
        ];
        let resolved = resolve_selectors(store.items(), &selectors, &mut result);

        let positions: Vec<_> = resolved.iter().map(|(pos, _)| *pos).collect();
        assert_eq!(positions, vec![0, 1]);
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains("No note matches 7"));
    }
}
