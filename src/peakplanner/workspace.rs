//! # Workspace
//!
//! The workspace owns both collections and the slot store behind them. It is the only
//! thing that loads or saves collections; commands mutate items through
//! [`Workspace::mutate`], which persists the collection whenever the mutation changed it.
//!
//! ## Lifecycle
//!
//! - [`Workspace::init`] reads both slots. Missing slots are empty collections; malformed
//!   data is repaired or dropped by [`crate::persist`]. A collection with repaired records
//!   is written back once, so assigned ids and timestamps stay stable across sessions.
//! - [`Workspace::teardown`] retries any save that failed earlier and hands the slot store
//!   back.
//!
//! ## Save Failures
//!
//! A failed save does not undo the in-memory change and does not abort the command. It is
//! logged, reported in the [`Mutation`], and the collection is marked dirty so teardown
//! tries again.

use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::items::ItemStore;
use crate::model::{Note, Task};
use crate::persist::{self, LoadReport, SlotRecord};
use crate::store::SlotStore;
use crate::view::Viewable;

/// A collection kind the workspace holds.
pub trait Collection: SlotRecord + Viewable {
    fn store_of<S: SlotStore>(ws: &Workspace<S>) -> &ItemStore<Self>;
    fn store_of_mut<S: SlotStore>(ws: &mut Workspace<S>) -> &mut ItemStore<Self>;
    fn dirty_flag<S: SlotStore>(ws: &mut Workspace<S>) -> &mut bool;
    fn load_report<S: SlotStore>(ws: &Workspace<S>) -> &LoadReport;
}

impl Collection for Task {
    fn store_of<S: SlotStore>(ws: &Workspace<S>) -> &ItemStore<Task> {
        &ws.tasks
    }

    fn store_of_mut<S: SlotStore>(ws: &mut Workspace<S>) -> &mut ItemStore<Task> {
        &mut ws.tasks
    }

    fn dirty_flag<S: SlotStore>(ws: &mut Workspace<S>) -> &mut bool {
        &mut ws.tasks_dirty
    }

    fn load_report<S: SlotStore>(ws: &Workspace<S>) -> &LoadReport {
        &ws.task_report
    }
}

impl Collection for Note {
    fn store_of<S: SlotStore>(ws: &Workspace<S>) -> &ItemStore<Note> {
        &ws.notes
    }

    fn store_of_mut<S: SlotStore>(ws: &mut Workspace<S>) -> &mut ItemStore<Note> {
        &mut ws.notes
    }

    fn dirty_flag<S: SlotStore>(ws: &mut Workspace<S>) -> &mut bool {
        &mut ws.notes_dirty
    }

    fn load_report<S: SlotStore>(ws: &Workspace<S>) -> &LoadReport {
        &ws.note_report
    }
}

/// Whether a mutation's return value means the collection changed.
pub trait Changed {
    fn changed(&self) -> bool;
}

impl Changed for bool {
    fn changed(&self) -> bool {
        *self
    }
}

impl<T> Changed for Option<T> {
    fn changed(&self) -> bool {
        self.is_some()
    }
}

/// What happened to the slot after a mutation.
#[derive(Debug)]
pub enum SaveStatus {
    /// Nothing changed, nothing written.
    Unchanged,
    Saved,
    Failed(PlannerError),
}

/// The outcome of [`Workspace::mutate`].
#[derive(Debug)]
pub struct Mutation<R> {
    pub value: R,
    pub save: SaveStatus,
}

pub struct Workspace<S: SlotStore> {
    slots: S,
    config: PlannerConfig,
    tasks: ItemStore<Task>,
    notes: ItemStore<Note>,
    tasks_dirty: bool,
    notes_dirty: bool,
    task_report: LoadReport,
    note_report: LoadReport,
}

impl<S: SlotStore> Workspace<S> {
    /// Loads both collections from `slots`.
    ///
    /// Only slot I/O errors fail here; unreadable content is handled by the loader.
    pub fn init(slots: S, config: PlannerConfig) -> Result<Self> {
        let (tasks, task_report) = persist::load::<Task, _>(&slots)?;
        let (notes, note_report) = persist::load::<Note, _>(&slots)?;
        tracing::debug!(
            tasks = tasks.len(),
            notes = notes.len(),
            "workspace initialized"
        );
        let mut ws = Self {
            slots,
            config,
            tasks: ItemStore::from_items(tasks),
            notes: ItemStore::from_items(notes),
            tasks_dirty: false,
            notes_dirty: false,
            task_report,
            note_report,
        };
        if ws.task_report.repaired > 0 {
            ws.write_back::<Task>();
        }
        if ws.note_report.repaired > 0 {
            ws.write_back::<Note>();
        }
        Ok(ws)
    }

    /// A failed write-back leaves the collection dirty for teardown.
    fn write_back<T: Collection>(&mut self) {
        tracing::debug!(slot = T::SLOT_KEY, "writing back repaired records");
        self.persist::<T>();
    }

    /// Flushes collections whose last save failed and returns the slot store.
    ///
    /// Both collections are attempted; the first error is returned.
    pub fn teardown(mut self) -> Result<S> {
        let tasks = if self.tasks_dirty {
            persist::save(&self.slots, self.tasks.items(), self.config.empty_slot)
        } else {
            Ok(())
        };
        let notes = if self.notes_dirty {
            persist::save(&self.slots, self.notes.items(), self.config.empty_slot)
        } else {
            Ok(())
        };
        tasks.and(notes)?;
        self.tasks_dirty = false;
        self.notes_dirty = false;
        Ok(self.slots)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    pub fn tasks(&self) -> &ItemStore<Task> {
        &self.tasks
    }

    pub fn notes(&self) -> &ItemStore<Note> {
        &self.notes
    }

    pub fn items<T: Collection>(&self) -> &ItemStore<T> {
        T::store_of(self)
    }

    pub fn task_report(&self) -> &LoadReport {
        &self.task_report
    }

    pub fn note_report(&self) -> &LoadReport {
        &self.note_report
    }

    /// Runs `f` against the collection of `T` and persists it if the result reports a
    /// change.
    pub fn mutate<T, R, F>(&mut self, f: F) -> Mutation<R>
    where
        T: Collection,
        R: Changed,
        F: FnOnce(&mut ItemStore<T>) -> R,
    {
        let value = f(T::store_of_mut(self));
        if !value.changed() {
            return Mutation {
                value,
                save: SaveStatus::Unchanged,
            };
        }
        let save = self.persist::<T>();
        Mutation { value, save }
    }

    /// Writes the collection of `T` to its slot.
    pub fn persist<T: Collection>(&mut self) -> SaveStatus {
        let result = persist::save(&self.slots, T::store_of(self).items(), self.config.empty_slot);
        match result {
            Ok(()) => {
                *T::dirty_flag(self) = false;
                SaveStatus::Saved
            }
            Err(e) => {
                tracing::error!(slot = T::SLOT_KEY, error = %e, "failed to save collection");
                *T::dirty_flag(self) = true;
                SaveStatus::Failed(e)
            }
        }
    }
}
