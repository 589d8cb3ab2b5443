//! Drag-and-drop rescheduling.
//!
//! Calendar cells and Kanban columns share one protocol: move the item
//! locally first, write the single changed field to the backend, then keep
//! the move and report success, or put the old value back and report the
//! failure. What differs between the two views is captured by a
//! [`ReschedulePolicy`]: which field is written and how its new value is
//! computed from the drop target.

use chrono::NaiveDate;
use log::{info, warn};
use shared::{DatedItem, DropTarget, ItemField, ItemKind, NotificationLevel, PipelineStage, RescheduleOutcome};
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

use super::board::{field_value, ItemBoard, SharedBoard};
use super::date_parser::{self, format_indonesian, format_iso};
use super::notification_service::NotificationSink;
use super::pipeline::classify;
use crate::storage::ItemStorage;

#[derive(Debug, Error, PartialEq)]
pub enum DragError {
    #[error("Another item is already being dragged")]
    AlreadyActive,
    #[error("No item is being dragged")]
    NotDragging,
}

#[derive(Debug, Error, PartialEq)]
pub enum RescheduleError {
    #[error("Item '{0}' is not on the board")]
    ItemNotFound(String),
    #[error(transparent)]
    Drag(#[from] DragError),
}

/// How a drop target translates into a single-field write
pub trait ReschedulePolicy: Send + Sync {
    type Target: Copy + PartialEq + Debug + Send + Sync;

    fn field(&self) -> ItemField;

    /// Where the item currently sits, None if it has no position
    fn current_position(&self, item: &DatedItem) -> Option<Self::Target>;

    /// Field value that puts the item on `target`
    fn encode(&self, item: &DatedItem, target: Self::Target) -> String;

    /// Human-readable target for notifications
    fn describe(&self, target: Self::Target) -> String;
}

/// Calendar cells: rewrites the date field
pub struct CalendarPolicy;

impl ReschedulePolicy for CalendarPolicy {
    type Target = NaiveDate;

    fn field(&self) -> ItemField {
        ItemField::Date
    }

    fn current_position(&self, item: &DatedItem) -> Option<NaiveDate> {
        date_parser::parse(&item.raw_date)?.to_naive_date()
    }

    /// Media plans hold machine dates, the other tables Indonesian text
    fn encode(&self, item: &DatedItem, target: NaiveDate) -> String {
        match item.kind {
            ItemKind::Plan => format_iso(target),
            ItemKind::Press | ItemKind::Content => format_indonesian(target),
        }
    }

    fn describe(&self, target: NaiveDate) -> String {
        format_indonesian(target)
    }
}

/// Kanban columns: rewrites the PROCESS / status field
pub struct PipelinePolicy;

impl ReschedulePolicy for PipelinePolicy {
    type Target = PipelineStage;

    fn field(&self) -> ItemField {
        ItemField::Process
    }

    fn current_position(&self, item: &DatedItem) -> Option<PipelineStage> {
        Some(classify(&item.process))
    }

    fn encode(&self, _item: &DatedItem, target: PipelineStage) -> String {
        target.process_label().to_string()
    }

    fn describe(&self, target: PipelineStage) -> String {
        target.process_label().to_string()
    }
}

/// Runs the optimistic update against a board and the backend
#[derive(Clone)]
pub struct Rescheduler {
    storage: Arc<dyn ItemStorage>,
    notifier: Arc<dyn NotificationSink>,
}

impl Rescheduler {
    pub fn new(storage: Arc<dyn ItemStorage>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { storage, notifier }
    }

    /// Dispatch a drop to the policy matching its target
    pub async fn reschedule_drop(
        &self,
        board: &Mutex<ItemBoard>,
        item_id: &str,
        target: DropTarget,
    ) -> Result<RescheduleOutcome, RescheduleError> {
        match target {
            DropTarget::Day(date) => self.reschedule(&CalendarPolicy, board, item_id, date).await,
            DropTarget::Stage(stage) => self.reschedule(&PipelinePolicy, board, item_id, stage).await,
        }
    }

    /// Move one item to `target`.
    ///
    /// The board lock is only held for the local update and the rollback,
    /// never across the backend write, so reschedules of different items do
    /// not wait on each other.
    pub async fn reschedule<P: ReschedulePolicy>(
        &self,
        policy: &P,
        board: &Mutex<ItemBoard>,
        item_id: &str,
        target: P::Target,
    ) -> Result<RescheduleOutcome, RescheduleError> {
        let field = policy.field();

        let (kind, previous, value, moved) = {
            let mut board = board.lock().unwrap_or_else(PoisonError::into_inner);
            let item = board
                .get(item_id)
                .ok_or_else(|| RescheduleError::ItemNotFound(item_id.to_string()))?;

            if policy.current_position(item) == Some(target) {
                info!("Item {} dropped on its current position, nothing to do", item_id);
                return Ok(RescheduleOutcome::Unchanged);
            }

            let kind = item.kind;
            let value = policy.encode(item, target);
            let previous = board
                .set_field(item_id, field, value.clone())
                .ok_or_else(|| RescheduleError::ItemNotFound(item_id.to_string()))?;
            let moved = board
                .get(item_id)
                .cloned()
                .ok_or_else(|| RescheduleError::ItemNotFound(item_id.to_string()))?;
            (kind, previous, value, moved)
        };

        match self.storage.update_field(kind, item_id, field, &value).await {
            Ok(()) => {
                info!("Rescheduled {} {} to {:?}", kind, item_id, target);
                self.notifier.notify(
                    NotificationLevel::Success,
                    format!("\"{}\" dipindahkan ke {}", moved.title, policy.describe(target)),
                );
                Ok(RescheduleOutcome::Committed { item: moved })
            }
            Err(e) => {
                let reason = e.to_string();
                warn!("Reschedule of {} {} failed, reverting: {}", kind, item_id, reason);

                let reverted = {
                    let mut board = board.lock().unwrap_or_else(PoisonError::into_inner);
                    // Only undo our own write; leave a newer value alone
                    let still_ours = board
                        .get(item_id)
                        .map(|item| field_value(item, field) == value)
                        .unwrap_or(false);
                    if still_ours {
                        board.set_field(item_id, field, previous);
                    }
                    board.get(item_id).cloned().unwrap_or(moved)
                };

                self.notifier.notify(
                    NotificationLevel::Error,
                    format!("Gagal memindahkan \"{}\": {}", reverted.title, reason),
                );
                Ok(RescheduleOutcome::RolledBack {
                    item: reverted,
                    reason,
                })
            }
        }
    }
}

/// Interaction state of one drag
#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        item_id: String,
        highlighted: Option<DropTarget>,
    },
    Committing {
        item_id: String,
        target: DropTarget,
    },
}

/// Drag lifecycle: Idle -> Dragging -> Committing -> Idle.
/// Only one drag can be in flight.
#[derive(Debug, Clone)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn highlighted(&self) -> Option<DropTarget> {
        match &self.state {
            DragState::Dragging { highlighted, .. } => *highlighted,
            _ => None,
        }
    }

    pub fn start(&mut self, item_id: &str) -> Result<(), DragError> {
        if self.state != DragState::Idle {
            return Err(DragError::AlreadyActive);
        }
        self.state = DragState::Dragging {
            item_id: item_id.to_string(),
            highlighted: None,
        };
        Ok(())
    }

    /// Drag-over: only moves the highlight
    pub fn hover(&mut self, target: DropTarget) -> Result<(), DragError> {
        match &mut self.state {
            DragState::Dragging { highlighted, .. } => {
                *highlighted = Some(target);
                Ok(())
            }
            _ => Err(DragError::NotDragging),
        }
    }

    /// Drop on a target, or outside any target (`None`).
    /// Returns the item and target to commit, if any.
    pub fn drop_on(&mut self, target: Option<DropTarget>) -> Result<Option<(String, DropTarget)>, DragError> {
        let item_id = match &self.state {
            DragState::Dragging { item_id, .. } => item_id.clone(),
            _ => return Err(DragError::NotDragging),
        };
        match target {
            Some(target) => {
                self.state = DragState::Committing {
                    item_id: item_id.clone(),
                    target,
                };
                Ok(Some((item_id, target)))
            }
            None => {
                self.state = DragState::Idle;
                Ok(None)
            }
        }
    }

    /// Drag ended without a drop
    pub fn cancel(&mut self) {
        if matches!(self.state, DragState::Dragging { .. }) {
            self.state = DragState::Idle;
        }
    }

    /// Commit finished, successfully or not
    pub fn finish(&mut self) {
        if matches!(self.state, DragState::Committing { .. }) {
            self.state = DragState::Idle;
        }
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new()
    }
}

/// One view's drag handling: the session plus the board it moves items on
pub struct DragController {
    session: Mutex<DragSession>,
    board: SharedBoard,
    rescheduler: Rescheduler,
}

impl DragController {
    pub fn new(board: SharedBoard, rescheduler: Rescheduler) -> Self {
        Self {
            session: Mutex::new(DragSession::new()),
            board,
            rescheduler,
        }
    }

    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    pub fn state(&self) -> DragState {
        self.session().state().clone()
    }

    fn session(&self) -> std::sync::MutexGuard<'_, DragSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn drag_start(&self, item_id: &str) -> Result<(), DragError> {
        self.session().start(item_id)
    }

    pub fn drag_over(&self, target: DropTarget) -> Result<(), DragError> {
        self.session().hover(target)
    }

    pub fn drag_cancel(&self) {
        self.session().cancel();
    }

    /// Finish the drag. Dropping outside any target (`None`) ends it
    /// without touching the board or the backend.
    pub async fn drop_on(&self, target: Option<DropTarget>) -> Result<Option<RescheduleOutcome>, RescheduleError> {
        let pending = self.session().drop_on(target)?;
        let Some((item_id, target)) = pending else {
            return Ok(None);
        };

        let result = self.rescheduler.reschedule_drop(&self.board, &item_id, target).await;
        self.session().finish();
        result.map(Some)
    }
}
