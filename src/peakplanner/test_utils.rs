//! Fixtures shared by unit tests. Downstream crates can reach them through the
//! `test_utils` feature.

use crate::config::PlannerConfig;
use crate::model::{parse_due_date, Category, NoteDraft, Priority, TaskDraft};
use crate::store::memory::MemSlots;
use crate::workspace::Workspace;

/// A workspace over an empty in-memory slot store.
pub fn empty_workspace() -> Workspace<MemSlots> {
    Workspace::init(MemSlots::new(), PlannerConfig::default())
        .unwrap_or_else(|e| panic!("in-memory workspace failed to load: {}", e))
}

/// Four tasks covering every category filter case and both dated and undated items.
pub fn sample_tasks() -> Vec<TaskDraft> {
    vec![
        TaskDraft::new("Buy milk", "2 liters")
            .with_category(Category::Personal)
            .with_priority(Priority::Low),
        TaskDraft::new("Write report", "Q3 numbers")
            .with_category(Category::Work)
            .with_priority(Priority::High)
            .with_due_date(parse_due_date("2024-01-01")),
        TaskDraft::new("Read paper", "attention is all you need")
            .with_category(Category::Study)
            .with_due_date(parse_due_date("2024-02-15")),
        TaskDraft::new("", "Call plumber").with_category(Category::Personal),
    ]
}

pub fn sample_notes() -> Vec<NoteDraft> {
    vec![
        NoteDraft::new("Garden", "plant tomatoes in april").with_category(Category::Personal),
        NoteDraft::new("App idea", "habit tracker with streaks").with_category(Category::Ideas),
        NoteDraft::new("Standup", "blocked on review").with_category(Category::Work),
    ]
}

/// A workspace pre-filled with [`sample_tasks`] and [`sample_notes`].
pub fn seeded_workspace() -> Workspace<MemSlots> {
    let mut ws = empty_workspace();
    for draft in sample_tasks() {
        ws.mutate::<crate::model::Task, _, _>(|s| s.add(draft));
    }
    for draft in sample_notes() {
        ws.mutate::<crate::model::Note, _, _>(|s| s.add(draft));
    }
    ws
}
