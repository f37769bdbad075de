//! Dashboard figures computed from the two collections.

use crate::model::{Note, Task};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;

/// How many recent items the dashboard shows per collection.
pub const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Rounded percentage, 0 when there are no tasks.
    pub completion_rate: u8,
}

impl TaskStats {
    pub fn compute(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let completion_rate = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        };
        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub stats: TaskStats,
    /// Store positions paired with the task.
    pub recent_tasks: Vec<(usize, Task)>,
    pub recent_notes: Vec<(usize, Note)>,
}

impl Dashboard {
    pub fn build(tasks: &[Task], notes: &[Note]) -> Self {
        Self {
            stats: TaskStats::compute(tasks),
            recent_tasks: recent_tasks(tasks),
            recent_notes: recent_notes(notes),
        }
    }
}

/// Latest due dates first. Undated tasks count as the epoch, so they come last.
pub fn recent_tasks(tasks: &[Task]) -> Vec<(usize, Task)> {
    let mut ranked: Vec<(usize, &Task)> = tasks.iter().enumerate().collect();
    ranked.sort_by_key(|(_, t)| Reverse(t.due_date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)));
    ranked
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|(pos, t)| (pos, t.clone()))
        .collect()
}

pub fn recent_notes(notes: &[Note]) -> Vec<(usize, Note)> {
    let mut ranked: Vec<(usize, &Note)> = notes.iter().enumerate().collect();
    ranked.sort_by_key(|(_, n)| Reverse(n.created_at));
    ranked
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|(pos, n)| (pos, n.clone()))
        .collect()
}
