//! # Quadrant Core Library
//!
//! This library provides the core business logic for Quadrant, an
//! Eisenhower-matrix task organizer. It implements a CLI-first philosophy
//! where every operation is available via a standalone CLI binary, with any
//! GUI shell being a thin rendering layer over the same core library.
//!
//! ## Architecture
//!
//! - **Task Store**: single owner of the quadrant-partitioned task lists;
//!   all mutations are synchronous and trigger best-effort persistence
//! - **Drag Controller**: state machine turning pointer gestures into
//!   discrete reorder/move operations, with midpoint hysteresis
//! - **Codec**: validated import/export of the full model as JSON
//! - **Reports**: pure completion statistics over a model snapshot
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`TaskStore`]: canonical model owner and mutation surface
//! - [`DragController`]: live drag reordering
//! - [`Database`]: persisted task model and display preferences
//! - [`AppConfig`]: application configuration management

pub mod codec;
pub mod drag;
pub mod error;
pub mod matrix;
pub mod report;
pub mod storage;
pub mod store;

pub use codec::{export_file_name, export_model, export_model_compact, import_document};
pub use drag::{crosses_midpoint, DragController, DragDirection, DragGesture, DragState, ItemBounds};
pub use error::{ConfigError, CoreError, ImportError, Result, StorageError, ValidationError};
pub use matrix::{DisplayPrefs, Quadrant, Task, TaskModel};
pub use report::{generate_report, QuadrantReport, Report};
pub use storage::{data_dir, AppConfig, Database, MemoryBackend, StorageBackend};
pub use store::TaskStore;
