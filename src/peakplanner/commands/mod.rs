//! # Command Layer
//!
//! One module per operation. Each `run` function takes the [`Workspace`] (or the paths, for
//! commands that do not touch items), performs the operation and returns a [`CmdResult`]:
//! the items it touched or listed plus user-facing messages. Nothing here prints.
//!
//! Item commands are generic over [`PlannerItem`], so tasks and notes share one code path
//! wherever they behave the same.
//!
//! Invalid input that the store silently ignores (blank content, unknown selectors,
//! out-of-range moves) comes back as an info or warning message, not an error.
//!
//! [`Workspace`]: crate::workspace::Workspace

use crate::config::PlannerConfig;
use crate::model::{Item, Note, Task};
use crate::stats::Dashboard;
use crate::workspace::{Collection, SaveStatus};
use std::path::PathBuf;

pub mod add;
pub mod complete;
pub mod config;
pub mod delete;
pub mod helpers;
pub mod init;
pub mod list;
pub mod move_item;
pub mod stats;
pub mod update;

#[derive(Debug, Clone)]
pub struct PlannerPaths {
    pub data_dir: PathBuf,
}

/// An item of either kind, owned, for results.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyItem {
    Task(Task),
    Note(Note),
}

impl AnyItem {
    pub fn title(&self) -> &str {
        match self {
            AnyItem::Task(t) => t.title(),
            AnyItem::Note(n) => n.title(),
        }
    }
}

impl From<Task> for AnyItem {
    fn from(task: Task) -> Self {
        AnyItem::Task(task)
    }
}

impl From<Note> for AnyItem {
    fn from(note: Note) -> Self {
        AnyItem::Note(note)
    }
}

/// Item kinds the commands operate on.
pub trait PlannerItem: Collection + Into<AnyItem> {}

impl<T: Collection + Into<AnyItem>> PlannerItem for T {}

/// An item with its 1-based listing index (its store position).
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub index: usize,
    pub item: AnyItem,
}

impl DisplayItem {
    pub fn new(position: usize, item: impl Into<AnyItem>) -> Self {
        Self {
            index: position + 1,
            item: item.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected: Vec<DisplayItem>,
    pub listed: Vec<DisplayItem>,
    pub dashboard: Option<Dashboard>,
    pub config: Option<PlannerConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, items: Vec<DisplayItem>) -> Self {
        self.listed = items;
        self
    }

    pub fn with_dashboard(mut self, dashboard: Dashboard) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Turns a failed save into an error message. The change itself is kept in memory.
    pub fn record_save(&mut self, kind: &str, save: &SaveStatus) {
        if let SaveStatus::Failed(e) = save {
            self.add_message(CmdMessage::error(format!(
                "Could not save {}s, the change is not persisted: {}",
                kind, e
            )));
        }
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
