//! # Persistence Adapter
//!
//! Round-trips one collection through one slot of a [`SlotStore`]. Tasks live in
//! [`TASKS_SLOT`], notes in [`NOTES_SLOT`]; each slot holds a JSON array of records.
//!
//! ## Loading Never Fails on Bad Data
//!
//! Slots may have been written by older clients, edited by hand, or truncated. Loading
//! therefore goes through a validating step instead of trusting the stored shape:
//!
//! 1. The slot must be a JSON array. If it is not, the whole slot is treated as empty and
//!    a warning is logged.
//! 2. Each element is parsed into a raw record ([`RawTask`] / [`RawNote`]) whose fields
//!    are all optional and tolerate the wrong JSON type, then validated into a [`Parsed`]
//!    result:
//!    - `Clean`: the record was complete.
//!    - `Repaired`: defaults were filled in (fresh id, placeholder title, default
//!      priority, ...). Each repair is listed.
//!    - `Rejected`: the element is not a record at all and is dropped.
//! 3. Duplicate ids are replaced with fresh ones so ids stay unique.
//!
//! Only I/O failures of the slot store itself are returned as errors.
//!
//! ## Empty Collections
//!
//! With [`EmptySlotPolicy::Delete`] (the default), saving an empty collection removes the
//! slot instead of writing `[]`. Loading an absent slot yields an empty collection, so the
//! round trip holds either way.

use crate::error::{PlannerError, Result};
use crate::model::{
    normalize_title, parse_due_date, CategoryRef, Item, ItemId, Note, Priority, Task,
};
use crate::store::SlotStore;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

pub const TASKS_SLOT: &str = "peakplanner_tasks";
pub const NOTES_SLOT: &str = "peakplanner_notes";

/// What `save` does with an empty collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySlotPolicy {
    /// Remove the slot.
    #[default]
    Delete,
    /// Write an empty array.
    Keep,
}

impl std::str::FromStr for EmptySlotPolicy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "delete" => Ok(EmptySlotPolicy::Delete),
            "keep" => Ok(EmptySlotPolicy::Keep),
            other => Err(PlannerError::Config(format!(
                "Invalid empty-slot policy: {} (expected delete or keep)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for EmptySlotPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptySlotPolicy::Delete => f.write_str("delete"),
            EmptySlotPolicy::Keep => f.write_str("keep"),
        }
    }
}

/// A default filled in while loading a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    AssignedId,
    ReplacedDuplicateId(ItemId),
    DefaultedTitle,
    MissingContent,
    DefaultedCategory,
    DefaultedPriority(Option<String>),
    DroppedDueDate(String),
    DefaultedCreatedAt,
    /// The field held the wrong JSON type and was treated as missing.
    IgnoredField {
        field: &'static str,
        found: &'static str,
    },
}

/// Outcome of validating one stored record.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    Clean(T),
    Repaired(T, Vec<Repair>),
    Rejected(String),
}

impl<T> Parsed<T> {
    fn from_repairs(item: T, repairs: Vec<Repair>) -> Self {
        if repairs.is_empty() {
            Parsed::Clean(item)
        } else {
            Parsed::Repaired(item, repairs)
        }
    }
}

/// Summary of a load, for logging and diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub repaired: usize,
    pub dropped: usize,
    /// The slot existed but was not a JSON array.
    pub malformed: bool,
}

/// Ids are usually strings; very old records used numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_id(self) -> Option<ItemId> {
        let text = match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(ItemId::from(text))
        }
    }
}

/// A stored field that either has the expected shape or is kept as the raw value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Field<T> {
    Valid(T),
    Invalid(Value),
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Valid(value)
    }
}

/// Narrows a lenient field; a wrong type counts as missing and is recorded.
fn narrow<T>(
    field: Option<Field<T>>,
    name: &'static str,
    repairs: &mut Vec<Repair>,
) -> Option<T> {
    match field? {
        Field::Valid(value) => Some(value),
        Field::Invalid(value) => {
            repairs.push(Repair::IgnoredField {
                field: name,
                found: kind_of(&value),
            });
            None
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTask {
    id: Option<Field<RawId>>,
    title: Option<Field<String>>,
    body: Option<Field<String>>,
    completed: Option<Field<bool>>,
    category: Option<Field<String>>,
    priority: Option<Field<String>>,
    due_date: Option<Field<String>>,
    created_at: Option<Field<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawNote {
    id: Option<Field<RawId>>,
    title: Option<Field<String>>,
    text: Option<Field<String>>,
    category: Option<Field<String>>,
    created_at: Option<Field<String>>,
}

/// Fields every record carries, validated the same way for both kinds.
struct Common {
    id: ItemId,
    title: String,
    content: String,
    category: CategoryRef,
    created_at: DateTime<Utc>,
}

fn validate_common(
    id: Option<Field<RawId>>,
    title: Option<Field<String>>,
    content: (&'static str, Option<Field<String>>),
    category: Option<Field<String>>,
    created_at: Option<Field<String>>,
    now: DateTime<Utc>,
    repairs: &mut Vec<Repair>,
) -> Common {
    let id = narrow(id, "id", repairs);
    let title = narrow(title, "title", repairs);
    let content = narrow(content.1, content.0, repairs);
    let category = narrow(category, "category", repairs);
    let created_at = narrow(created_at, "createdAt", repairs);

    let id = match id.and_then(RawId::into_id) {
        Some(id) => id,
        None => {
            repairs.push(Repair::AssignedId);
            ItemId::generate()
        }
    };
    let title = match title {
        Some(t) if !t.trim().is_empty() => t,
        other => {
            repairs.push(Repair::DefaultedTitle);
            normalize_title(other.as_deref().unwrap_or_default())
        }
    };
    let content = content.unwrap_or_else(|| {
        repairs.push(Repair::MissingContent);
        String::new()
    });
    // Unknown category strings are kept; only a missing one is defaulted.
    let category = match category {
        Some(c) => CategoryRef::from(c.as_str()),
        None => {
            repairs.push(Repair::DefaultedCategory);
            CategoryRef::default()
        }
    };
    let created_at = match created_at
        .as_deref()
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
    {
        Some(ts) => ts.with_timezone(&Utc),
        None => {
            repairs.push(Repair::DefaultedCreatedAt);
            now
        }
    };
    Common {
        id,
        title,
        content,
        category,
        created_at,
    }
}

/// An item kind that can be stored in a slot.
pub trait SlotRecord: Item + Serialize {
    const SLOT_KEY: &'static str;

    type Raw: DeserializeOwned;

    fn validate(raw: Self::Raw, now: DateTime<Utc>) -> Parsed<Self>;

    /// Overwrites the id after a duplicate was detected.
    fn set_id(&mut self, id: ItemId);

    fn parse_record(value: Value, now: DateTime<Utc>) -> Parsed<Self> {
        if !value.is_object() {
            return Parsed::Rejected(format!("expected an object, found {}", kind_of(&value)));
        }
        match serde_json::from_value::<Self::Raw>(value) {
            Ok(raw) => Self::validate(raw, now),
            Err(e) => Parsed::Rejected(e.to_string()),
        }
    }
}

impl SlotRecord for Task {
    const SLOT_KEY: &'static str = TASKS_SLOT;

    type Raw = RawTask;

    fn validate(raw: RawTask, now: DateTime<Utc>) -> Parsed<Task> {
        let mut repairs = Vec::new();
        let common = validate_common(
            raw.id,
            raw.title,
            ("body", raw.body),
            raw.category,
            raw.created_at,
            now,
            &mut repairs,
        );
        let stored_priority = narrow(raw.priority, "priority", &mut repairs);
        let parsed = stored_priority.as_deref().and_then(Priority::from_id);
        let priority = match parsed {
            Some(p) => p,
            None => {
                repairs.push(Repair::DefaultedPriority(stored_priority));
                Priority::default()
            }
        };
        let completed = narrow(raw.completed, "completed", &mut repairs).unwrap_or(false);
        let due_date = match narrow(raw.due_date, "dueDate", &mut repairs) {
            None => None,
            Some(text) => match parse_due_date(&text) {
                Some(d) => Some(d),
                None => {
                    repairs.push(Repair::DroppedDueDate(text));
                    None
                }
            },
        };
        let task = Task {
            id: common.id,
            title: common.title,
            body: common.content,
            completed,
            category: common.category,
            priority,
            due_date,
            created_at: common.created_at,
        };
        Parsed::from_repairs(task, repairs)
    }

    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
}

impl SlotRecord for Note {
    const SLOT_KEY: &'static str = NOTES_SLOT;

    type Raw = RawNote;

    fn validate(raw: RawNote, now: DateTime<Utc>) -> Parsed<Note> {
        let mut repairs = Vec::new();
        let common = validate_common(
            raw.id,
            raw.title,
            ("text", raw.text),
            raw.category,
            raw.created_at,
            now,
            &mut repairs,
        );
        let note = Note {
            id: common.id,
            title: common.title,
            text: common.content,
            category: common.category,
            created_at: common.created_at,
        };
        Parsed::from_repairs(note, repairs)
    }

    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses raw slot contents. Never fails: malformed input yields an empty collection
/// with `report.malformed` set.
pub fn decode<T: SlotRecord>(raw: &str, now: DateTime<Utc>) -> (Vec<T>, LoadReport) {
    let mut report = LoadReport::default();
    let values = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(values)) => values,
        Ok(other) => {
            tracing::warn!(
                slot = T::SLOT_KEY,
                "slot holds {} instead of an array, starting empty",
                kind_of(&other)
            );
            report.malformed = true;
            return (Vec::new(), report);
        }
        Err(e) => {
            tracing::warn!(slot = T::SLOT_KEY, error = %e, "slot is not valid JSON, starting empty");
            report.malformed = true;
            return (Vec::new(), report);
        }
    };

    let mut items: Vec<T> = Vec::with_capacity(values.len());
    let mut seen = HashSet::new();

    for (position, value) in values.into_iter().enumerate() {
        let (mut item, mut repairs) = match T::parse_record(value, now) {
            Parsed::Clean(item) => (item, Vec::new()),
            Parsed::Repaired(item, repairs) => (item, repairs),
            Parsed::Rejected(reason) => {
                tracing::warn!(slot = T::SLOT_KEY, position, %reason, "dropping unreadable record");
                report.dropped += 1;
                continue;
            }
        };

        if !seen.insert(item.id().clone()) {
            let duplicate = item.id().clone();
            let mut fresh = ItemId::generate();
            while seen.contains(&fresh) {
                fresh = ItemId::generate();
            }
            seen.insert(fresh.clone());
            item.set_id(fresh);
            repairs.push(Repair::ReplacedDuplicateId(duplicate));
        }

        if !repairs.is_empty() {
            tracing::debug!(slot = T::SLOT_KEY, position, ?repairs, "repaired record");
            report.repaired += 1;
        }
        items.push(item);
    }

    report.loaded = items.len();
    (items, report)
}

/// Reads a collection from its slot. An absent slot is an empty collection.
pub fn load<T: SlotRecord, S: SlotStore>(slots: &S) -> Result<(Vec<T>, LoadReport)> {
    let Some(raw) = slots.read(T::SLOT_KEY)? else {
        tracing::debug!(slot = T::SLOT_KEY, "slot absent, starting empty");
        return Ok((Vec::new(), LoadReport::default()));
    };
    let (items, report) = decode::<T>(&raw, Utc::now());
    tracing::debug!(
        slot = T::SLOT_KEY,
        loaded = report.loaded,
        repaired = report.repaired,
        dropped = report.dropped,
        "loaded slot"
    );
    Ok((items, report))
}

/// Writes the whole collection to its slot, applying the empty-slot policy.
pub fn save<T: SlotRecord, S: SlotStore>(
    slots: &S,
    items: &[T],
    policy: EmptySlotPolicy,
) -> Result<()> {
    if items.is_empty() && policy == EmptySlotPolicy::Delete {
        tracing::debug!(slot = T::SLOT_KEY, "collection empty, clearing slot");
        return slots.delete(T::SLOT_KEY);
    }
    let content = serde_json::to_string(items).map_err(PlannerError::Serialization)?;
    slots.write(T::SLOT_KEY, &content)?;
    tracing::debug!(slot = T::SLOT_KEY, count = items.len(), "saved slot");
    Ok(())
}
