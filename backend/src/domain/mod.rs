//! # Domain Module
//!
//! Business logic of the press and content dashboard.
//!
//! Everything here works on already-fetched rows and talks to persistence
//! only through the storage traits, so it runs the same against the CSV
//! files, a hosted table service or a test double.
//!
//! ## Module Organization
//!
//! - **date_parser**: Indonesian free-text dates ("Senin, 3 Januari 2025")
//! - **calendar**: Month grid generation and focus month navigation
//! - **heatmap**: Per-day activity counts for a year
//! - **pipeline**: PROCESS text to Kanban stage classification
//! - **board**: In-memory item collection shared by a view
//! - **reschedule**: Drag-and-drop moves with optimistic update and rollback
//! - **analytics**: Monthly, category, stage and KPI figures
//! - **notification_service**: Notification feed and media plan reminders
//! - **preference_service**: KPI targets and column choices
//! - **transfer**: CSV import and report export
//!
//! ## Core Concepts
//!
//! - **Dated item**: A press release, COMMANDO content entry or media plan.
//!   Its position on the calendar is derived from its raw date text and
//!   its Kanban column from its PROCESS text; neither is stored.
//! - **Unparseable dates**: Items whose date cannot be read are left out of
//!   date-based views. This is never an error.

pub mod analytics;
pub mod board;
pub mod calendar;
pub mod date_parser;
pub mod heatmap;
pub mod notification_service;
pub mod pipeline;
pub mod preference_service;
pub mod reschedule;
pub mod transfer;

pub use board::{ItemBoard, SharedBoard};
pub use calendar::{CalendarError, CalendarService};
pub use notification_service::{NotificationService, NotificationSink};
pub use preference_service::PreferenceService;
pub use reschedule::{CalendarPolicy, DragController, DragError, DragSession, DragState, PipelinePolicy, RescheduleError, ReschedulePolicy, Rescheduler};
pub use transfer::{ExportedCsv, ImportError, TransferService};
