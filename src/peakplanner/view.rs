//! # Filter/Sort View
//!
//! A view is a transient, non-authoritative projection of a collection: which items to show
//! and in which order. Projection never mutates the store; it returns a fresh `Vec` of
//! [`ViewEntry`]s borrowing the items, each tagged with its position in the store.
//!
//! Carrying the store position is what lets a presentation layer act on a filtered view
//! (see [`crate::reorder`]) without confusing visual and stored order.
//!
//! ## Filters
//!
//! Category and priority filters are tri-state ([`Filter`]): `all` and `none` both pass
//! every item, and a specific value passes only exact matches. Search is a
//! case-insensitive substring match against title or content; an empty search matches
//! everything.
//!
//! ## Sorting (tasks only)
//!
//! - [`SortKey::None`]: store order.
//! - [`SortKey::Priority`]: high, medium, low.
//! - [`SortKey::Date`]: ascending due date, undated tasks last.
//!
//! Sorting is stable, so ties keep store order.

use crate::error::PlannerError;
use crate::model::{Category, Item, Note, Priority, Task};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Tri-state filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    All,
    /// Kept for compatibility with the "No Filter" choice; behaves like `All`.
    None,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn passes(&self, value: &T) -> bool {
        match self {
            Filter::All | Filter::None => true,
            Filter::Only(wanted) => wanted == value,
        }
    }

    /// Whether this filter can hide anything.
    pub fn is_active(&self) -> bool {
        matches!(self, Filter::Only(_))
    }
}

impl<T> FromStr for Filter<T>
where
    T: FromStr<Err = PlannerError>,
{
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "none" => Ok(Filter::None),
            other => other.parse().map(Filter::Only),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::None => f.write_str("none"),
            Filter::Only(v) => v.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    None,
    Priority,
    Date,
}

impl FromStr for SortKey {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(SortKey::None),
            "priority" => Ok(SortKey::Priority),
            "date" => Ok(SortKey::Date),
            other => Err(PlannerError::Api(format!("Unknown sort key: {}", other))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::None => f.write_str("none"),
            SortKey::Priority => f.write_str("priority"),
            SortKey::Date => f.write_str("date"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteQuery {
    pub category: Filter<Category>,
    pub search: String,
}

impl NoteQuery {
    /// True when the view shows every note in store order.
    pub fn is_identity(&self) -> bool {
        !self.category.is_active() && self.search.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub category: Filter<Category>,
    pub priority: Filter<Priority>,
    pub search: String,
    pub sort: SortKey,
}

impl TaskQuery {
    /// True when the view shows every task in store order.
    pub fn is_identity(&self) -> bool {
        !self.category.is_active()
            && !self.priority.is_active()
            && self.search.is_empty()
            && self.sort == SortKey::None
    }
}

/// One visible item and its position in the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewEntry<'a, T> {
    pub position: usize,
    pub item: &'a T,
}

fn category_passes<T: Item>(item: &T, filter: &Filter<Category>) -> bool {
    match filter {
        Filter::All | Filter::None => true,
        Filter::Only(category) => item.category().is(*category),
    }
}

/// `needle` must already be lowercased.
fn search_passes<T: Item>(item: &T, needle: &str) -> bool {
    needle.is_empty()
        || item.title().to_lowercase().contains(needle)
        || item.content().to_lowercase().contains(needle)
}

pub fn project_notes<'a>(notes: &'a [Note], query: &NoteQuery) -> Vec<ViewEntry<'a, Note>> {
    let needle = query.search.to_lowercase();
    notes
        .iter()
        .enumerate()
        .filter(|(_, note)| category_passes(*note, &query.category))
        .filter(|(_, note)| search_passes(*note, &needle))
        .map(|(position, item)| ViewEntry { position, item })
        .collect()
}

pub fn project_tasks<'a>(tasks: &'a [Task], query: &TaskQuery) -> Vec<ViewEntry<'a, Task>> {
    let needle = query.search.to_lowercase();
    let mut view: Vec<_> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| category_passes(*task, &query.category))
        .filter(|(_, task)| query.priority.passes(&task.priority))
        .filter(|(_, task)| search_passes(*task, &needle))
        .map(|(position, item)| ViewEntry { position, item })
        .collect();

    match query.sort {
        SortKey::None => {}
        SortKey::Priority => view.sort_by_key(|entry| entry.item.priority),
        SortKey::Date => view.sort_by(|a, b| compare_due(a.item.due_date, b.item.due_date)),
    }
    view
}

/// An item kind that can be projected into a view.
pub trait Viewable: Item {
    type Query: Default + Clone + fmt::Debug;

    fn project<'a>(items: &'a [Self], query: &Self::Query) -> Vec<ViewEntry<'a, Self>>;

    /// Whether the view's visual order follows store order (no sort applied). Filters
    /// may still hide items.
    fn follows_store_order(query: &Self::Query) -> bool;
}

impl Viewable for Task {
    type Query = TaskQuery;

    fn project<'a>(items: &'a [Task], query: &TaskQuery) -> Vec<ViewEntry<'a, Task>> {
        project_tasks(items, query)
    }

    fn follows_store_order(query: &TaskQuery) -> bool {
        query.sort == SortKey::None
    }
}

impl Viewable for Note {
    type Query = NoteQuery;

    fn project<'a>(items: &'a [Note], query: &NoteQuery) -> Vec<ViewEntry<'a, Note>> {
        project_notes(items, query)
    }

    fn follows_store_order(_query: &NoteQuery) -> bool {
        true
    }
}

/// Ascending by due date; anything without a date sorts after anything with one.
pub fn compare_due(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
