//! # PeakPlanner Architecture
//!
//! PeakPlanner is a **local personal-productivity store**: two ordered collections, tasks and
//! notes, kept in a string-keyed slot store. It is a library that happens to have a CLI
//! client; nothing below the CLI layer knows about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Installs the tracing subscriber                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses selectors, turns listing indexes into gestures    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, generic over tasks and notes   │
//! │  - Returns CmdResult: items plus user-facing messages       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (workspace, items, view, reorder, persist)            │
//! │  - Workspace owns both collections and saves on change      │
//! │  - ItemStore: ordered collection with add/update/remove     │
//! │  - View: filter/sort projection, Reorder: drag mapping      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract SlotStore trait (key → string)                  │
//! │  - FsSlots (production), MemSlots (testing)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Store Order vs. View Order
//!
//! The store order is the only authoritative order. Views filter and sort a borrowed copy,
//! tagging each entry with its store position. Listing indexes shown to users are store
//! positions, and drags made on a filtered view are mapped back through those positions
//! (see [`reorder`]).
//!
//! ## Error Handling
//!
//! Bad persisted data is repaired or dropped while loading and logged with `tracing`.
//! Invalid mutations (blank content, unknown ids, impossible moves) are no-ops. A failed
//! save keeps the in-memory change and is reported as an error message. Only genuine
//! failures travel as [`error::PlannerError`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`workspace`]: Owns the collections, persists on change
//! - [`items`]: Ordered item collection
//! - [`view`]: Filter/sort projection
//! - [`reorder`]: Drag gesture to store move
//! - [`persist`]: Slot encoding and tolerant decoding
//! - [`store`]: Slot storage abstraction and implementations
//! - [`model`]: Tasks, notes, categories, priorities
//! - [`index`]: Item selectors (listing index or id prefix)
//! - [`stats`]: Dashboard figures
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod init;
pub mod items;
pub mod model;
pub mod persist;
pub mod reorder;
pub mod stats;
pub mod store;
pub mod view;
pub mod workspace;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
