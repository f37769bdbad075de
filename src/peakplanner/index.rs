//! # Item Selection
//!
//! Users refer to items either by their **index** in the listing or by their **id**.
//!
//! Indexes are 1-based store positions. They do not change when a listing is filtered or
//! sorted: a filtered listing simply shows fewer indexes. That keeps `edit 3` meaning the
//! same item no matter which view the user looked at last.
//!
//! Ids can be abbreviated to any unique prefix, which is handy for the long UUIDs.

use crate::error::{PlannerError, Result};
use crate::model::Item;
use std::fmt;
use std::str::FromStr;

/// A user input to select an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    /// 1-based position in the store.
    Index(usize),
    /// Full id or unique id prefix.
    Id(String),
}

impl fmt::Display for ItemSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemSelector::Index(i) => write!(f, "{}", i),
            ItemSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for ItemSelector {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PlannerError::Api("Empty item selector".to_string()));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            return match s.parse::<usize>() {
                Ok(0) => Err(PlannerError::Api("Indexes start at 1".to_string())),
                Ok(n) => Ok(ItemSelector::Index(n)),
                // Too long for an index; numeric legacy ids look like this.
                Err(_) => Ok(ItemSelector::Id(s.to_string())),
            };
        }
        Ok(ItemSelector::Id(s.to_string()))
    }
}

pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<ItemSelector>> {
    inputs.iter().map(|s| s.as_ref().parse()).collect()
}

/// Result of looking up a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Store position (0-based).
    Found(usize),
    NotFound,
    /// The id prefix matched this many items.
    Ambiguous(usize),
}

pub fn resolve<T: Item>(items: &[T], selector: &ItemSelector) -> Resolution {
    match selector {
        ItemSelector::Index(n) => {
            if *n >= 1 && *n <= items.len() {
                return Resolution::Found(n - 1);
            }
            // Legacy ids are all digits; a huge "index" may be one of them.
            let as_id = n.to_string();
            match items.iter().position(|i| i.id().as_str() == as_id) {
                Some(pos) => Resolution::Found(pos),
                None => Resolution::NotFound,
            }
        }
        ItemSelector::Id(wanted) => {
            if let Some(pos) = items.iter().position(|i| i.id().as_str() == wanted) {
                return Resolution::Found(pos);
            }
            let matches: Vec<usize> = items
                .iter()
                .enumerate()
                .filter(|(_, i)| i.id().as_str().starts_with(wanted.as_str()))
                .map(|(pos, _)| pos)
                .collect();
            match matches.as_slice() {
                [] => Resolution::NotFound,
                [pos] => Resolution::Found(*pos),
                many => Resolution::Ambiguous(many.len()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryRef, ItemId, Note};
    use chrono::Utc;

    fn note(id: &str) -> Note {
        Note {
            id: ItemId::from(id),
            title: id.to_string(),
            text: "t".into(),
            category: CategoryRef::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn parses_indexes_and_ids() {
        assert_eq!("3".parse::<ItemSelector>().unwrap(), ItemSelector::Index(3));
        assert_eq!(
            "ab12".parse::<ItemSelector>().unwrap(),
            ItemSelector::Id("ab12".into())
        );
        assert!("0".parse::<ItemSelector>().is_err());
        assert!("  ".parse::<ItemSelector>().is_err());
        assert_eq!(
            "171234567890112345678901".parse::<ItemSelector>().unwrap(),
            ItemSelector::Id("171234567890112345678901".into())
        );
    }

    #[test]
    fn resolves_by_index() {
        let notes = vec![note("a"), note("b")];
        assert_eq!(resolve(&notes, &ItemSelector::Index(2)), Resolution::Found(1));
        assert_eq!(resolve(&notes, &ItemSelector::Index(3)), Resolution::NotFound);
    }

    #[test]
    fn resolves_by_id_prefix() {
        let notes = vec![note("abc-1"), note("abd-2"), note("xyz")];
        assert_eq!(
            resolve(&notes, &ItemSelector::Id("xy".into())),
            Resolution::Found(2)
        );
        assert_eq!(
            resolve(&notes, &ItemSelector::Id("ab".into())),
            Resolution::Ambiguous(2)
        );
        assert_eq!(
            resolve(&notes, &ItemSelector::Id("q".into())),
            Resolution::NotFound
        );
    }

    #[test]
    fn numeric_legacy_id_is_found_by_value() {
        let notes = vec![note("a"), note("1712345678901")];
        assert_eq!(
            resolve(&notes, &ItemSelector::Index(1712345678901)),
            Resolution::Found(1)
        );
    }

    #[test]
    fn exact_id_beats_prefix() {
        let notes = vec![note("ab"), note("abc")];
        assert_eq!(
            resolve(&notes, &ItemSelector::Id("ab".into())),
            Resolution::Found(0)
        );
    }
}
