//! # Data Model
//!
//! Tasks and notes share a common shape (see [`Item`]): an opaque id, a title, a free-form
//! content string, a category and a creation timestamp. Tasks add completion, priority and
//! an optional due date.
//!
//! Ordering is not part of the model. An item's position is its index in the owning
//! [`crate::items::ItemStore`].
//!
//! ## Categories
//!
//! The category set is closed ([`Category`]), but the stored value is kept verbatim in a
//! [`CategoryRef`]. Records written by older or foreign clients may carry a category we do
//! not know; those resolve to [`Category::Other`] for labels and colors while the stored
//! string survives untouched.
//!
//! ## Serialized Shape
//!
//! Field names match the slot layout (`dueDate`, `createdAt`, `body` for tasks, `text` for
//! notes), so data written by earlier versions of the planner loads without conversion.

use crate::error::PlannerError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Title given to items created or edited with an empty title.
pub const UNTITLED: &str = "Untitled";

/// Opaque, stable identifier of an item.
///
/// New ids are UUID v4 strings. Ids loaded from storage are accepted as-is, whatever
/// their format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, enough to tell items apart in listings.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Ideas,
    Study,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Work,
        Category::Personal,
        Category::Ideas,
        Category::Study,
        Category::Other,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Ideas => "ideas",
            Category::Study => "study",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Ideas => "Ideas",
            Category::Study => "Study",
            Category::Other => "Other",
        }
    }

    /// Hex color used by presentation layers.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Work => "#FF6B6B",
            Category::Personal => "#4ECDC4",
            Category::Ideas => "#FFD166",
            Category::Study => "#06D6A0",
            Category::Other => "#A78BFA",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(&s.trim().to_lowercase())
            .ok_or_else(|| PlannerError::Api(format!("Unknown category: {}", s)))
    }
}

/// The category value as stored on an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRef(String);

impl CategoryRef {
    /// Stored value, verbatim.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Known category for label/color lookup. Unknown values resolve to `Other`.
    pub fn resolve(&self) -> Category {
        Category::from_id(&self.0).unwrap_or_default()
    }

    pub fn is_known(&self) -> bool {
        Category::from_id(&self.0).is_some()
    }

    /// Exact match against the stored value.
    pub fn is(&self, category: Category) -> bool {
        self.0 == category.id()
    }
}

impl From<Category> for CategoryRef {
    fn from(c: Category) -> Self {
        Self(c.id().to_string())
    }
}

impl From<&str> for CategoryRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for CategoryRef {
    fn default() -> Self {
        Category::default().into()
    }
}

/// Task priority. Declaration order is the sort order: high first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn id(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Priority::High => "#FF6B6B",
            Priority::Medium => "#FFD166",
            Priority::Low => "#06D6A0",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Priority {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(&s.trim().to_lowercase())
            .ok_or_else(|| PlannerError::Api(format!("Unknown priority: {}", s)))
    }
}

/// How close a task is to its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    DueToday,
    DueSoon,
    OnTrack,
}

impl DueStatus {
    /// Classifies a deadline relative to `now`.
    ///
    /// The distance is measured in days, rounded up: anything due later today counts
    /// as one day away.
    pub fn classify(due: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let millis = (due - now).num_milliseconds() as f64;
        let days = (millis / 86_400_000.0).ceil() as i64;
        match days {
            d if d < 0 => DueStatus::Overdue,
            0 => DueStatus::DueToday,
            d if d <= 3 => DueStatus::DueSoon,
            _ => DueStatus::OnTrack,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Overdue => "Overdue",
            DueStatus::DueToday => "Due Today",
            DueStatus::DueSoon => "Due Soon",
            DueStatus::OnTrack => "On Track",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DueStatus::Overdue => "#FF6B6B",
            DueStatus::DueToday | DueStatus::DueSoon => "#FFD166",
            DueStatus::OnTrack => "#06D6A0",
        }
    }
}

/// Behavior shared by tasks and notes.
///
/// [`crate::items::ItemStore`], [`crate::view`] and [`crate::persist`] are generic over
/// this trait.
pub trait Item: Clone + PartialEq + fmt::Debug {
    /// Input for creating a new item.
    type Draft;
    /// Partial replacement applied by `update`.
    type Patch;

    /// Singular noun used in user-facing messages.
    const KIND: &'static str;

    fn id(&self) -> &ItemId;
    fn title(&self) -> &str;
    /// The required free-form content (`body` for tasks, `text` for notes).
    fn content(&self) -> &str;
    fn category(&self) -> &CategoryRef;
    fn created_at(&self) -> DateTime<Utc>;

    /// Builds an item from a draft. Returns `None` when the content is blank.
    fn from_draft(draft: Self::Draft, id: ItemId, now: DateTime<Utc>) -> Option<Self>;

    /// Applies a patch in place. Returns whether any field changed.
    fn apply(&mut self, patch: Self::Patch) -> bool;
}

/// Trims a title, substituting the placeholder when nothing is left.
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parses a due date given either as an RFC 3339 timestamp or as a plain `YYYY-MM-DD`
/// date (midnight UTC).
pub fn parse_due_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Trims content. `None` means blank.
fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: ItemId,
    pub title: String,
    pub body: String,
    pub completed: bool,
    pub category: CategoryRef,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn due_status(&self, now: DateTime<Utc>) -> Option<DueStatus> {
        self.due_date.map(|due| DueStatus::classify(due, now))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub body: String,
    pub category: Category,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            category: Category::default(),
            priority: Priority::default(),
            due_date: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }
}

/// Fields to replace on a task. `None` leaves a field untouched.
///
/// `due_date` is doubly optional: `Some(None)` clears the deadline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub completed: Option<bool>,
}

impl Item for Task {
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const KIND: &'static str = "task";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.body
    }

    fn category(&self) -> &CategoryRef {
        &self.category
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: TaskDraft, id: ItemId, now: DateTime<Utc>) -> Option<Self> {
        let body = normalize_content(&draft.body)?;
        Some(Task {
            id,
            title: normalize_title(&draft.title),
            body,
            completed: false,
            category: draft.category.into(),
            priority: draft.priority,
            due_date: draft.due_date,
            created_at: now,
        })
    }

    fn apply(&mut self, patch: TaskPatch) -> bool {
        let before = self.clone();
        if let Some(title) = patch.title {
            self.title = normalize_title(&title);
        }
        // Blank content would break the add-time invariant; keep the current body.
        if let Some(body) = patch.body.as_deref().and_then(normalize_content) {
            self.body = body;
        }
        if let Some(category) = patch.category {
            self.category = category.into();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        *self != before
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: ItemId,
    pub title: String,
    pub text: String,
    pub category: CategoryRef,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    pub category: Category,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            category: Category::default(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub text: Option<String>,
    pub category: Option<Category>,
}

impl Item for Note {
    type Draft = NoteDraft;
    type Patch = NotePatch;

    const KIND: &'static str = "note";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.text
    }

    fn category(&self) -> &CategoryRef {
        &self.category
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: NoteDraft, id: ItemId, now: DateTime<Utc>) -> Option<Self> {
        let text = normalize_content(&draft.text)?;
        Some(Note {
            id,
            title: normalize_title(&draft.title),
            text,
            category: draft.category.into(),
            created_at: now,
        })
    }

    fn apply(&mut self, patch: NotePatch) -> bool {
        let before = self.clone();
        if let Some(title) = patch.title {
            self.title = normalize_title(&title);
        }
        if let Some(text) = patch.text.as_deref().and_then(normalize_content) {
            self.text = text;
        }
        if let Some(category) = patch.category {
            self.category = category.into();
        }
        *self != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn task(body: &str) -> Task {
        Task::from_draft(TaskDraft::new("T", body), ItemId::generate(), Utc::now()).unwrap()
    }

    #[test]
    fn unknown_category_resolves_to_other_without_rewriting() {
        let stored = CategoryRef::from("errands");
        assert_eq!(stored.resolve(), Category::Other);
        assert_eq!(stored.resolve().color(), "#A78BFA");
        assert_eq!(stored.as_str(), "errands");
        assert!(!stored.is_known());
        assert!(!stored.is(Category::Other));
    }

    #[test]
    fn category_parsing_is_case_insensitive() {
        assert_eq!("Work".parse::<Category>().unwrap(), Category::Work);
        assert!("chores".parse::<Category>().is_err());
    }

    #[test]
    fn priority_orders_high_first() {
        let mut ps = vec![Priority::Low, Priority::High, Priority::Medium];
        ps.sort();
        assert_eq!(ps, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn draft_with_blank_body_is_rejected() {
        let draft = TaskDraft::new("x", "   ");
        assert!(Task::from_draft(draft, ItemId::generate(), Utc::now()).is_none());
    }

    #[test]
    fn draft_with_blank_title_gets_placeholder() {
        let t = task("  write it  ");
        assert_eq!(t.title, "T");
        let note = Note::from_draft(NoteDraft::new("  ", "text"), ItemId::generate(), Utc::now())
            .unwrap();
        assert_eq!(note.title, UNTITLED);
        assert_eq!(t.body, "write it");
        assert!(!t.completed);
        assert_eq!(t.priority, Priority::Medium);
        assert!(t.category.is(Category::Other));
    }

    #[test]
    fn patch_replaces_only_given_fields() {
        let mut t = task("body");
        let id = t.id.clone();
        let changed = t.apply(TaskPatch {
            priority: Some(Priority::High),
            due_date: Some(Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())),
            ..Default::default()
        });
        assert!(changed);
        assert_eq!(t.id, id);
        assert_eq!(t.body, "body");
        assert_eq!(t.priority, Priority::High);
        assert!(t.due_date.is_some());

        assert!(t.apply(TaskPatch {
            due_date: Some(None),
            ..Default::default()
        }));
        assert!(t.due_date.is_none());
    }

    #[test]
    fn patch_ignores_blank_content_and_reports_no_change() {
        let mut t = task("body");
        let changed = t.apply(TaskPatch {
            body: Some("   ".into()),
            ..Default::default()
        });
        assert!(!changed);
        assert_eq!(t.body, "body");
    }

    #[test]
    fn due_status_uses_rounded_up_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(
            DueStatus::classify(now - Duration::days(1), now),
            DueStatus::Overdue
        );
        assert_eq!(
            DueStatus::classify(now - Duration::hours(2), now),
            DueStatus::DueToday
        );
        assert_eq!(
            DueStatus::classify(now + Duration::hours(2), now),
            DueStatus::DueSoon
        );
        assert_eq!(
            DueStatus::classify(now + Duration::days(3), now),
            DueStatus::DueSoon
        );
        assert_eq!(
            DueStatus::classify(now + Duration::days(5), now),
            DueStatus::OnTrack
        );
    }

    #[test]
    fn parses_both_due_date_forms() {
        let plain = parse_due_date("2024-01-01").unwrap();
        assert_eq!(plain, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let js = parse_due_date("2024-01-01T05:30:00.000Z").unwrap();
        assert_eq!(js, Utc.with_ymd_and_hms(2024, 1, 1, 5, 30, 0).unwrap());
        assert!(parse_due_date("next tuesday").is_none());
    }

    #[test]
    fn short_id_handles_legacy_ids() {
        assert_eq!(ItemId::from("abc").short(), "abc");
        assert_eq!(ItemId::from("1712345678901xyz").short(), "17123456");
    }

    #[test]
    fn task_serializes_with_slot_field_names() {
        let t = task("b");
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("dueDate").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["category"], "other");
        assert_eq!(json["priority"], "medium");
    }
}
