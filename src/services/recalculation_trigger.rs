// ABOUTME: Debounced recalculation trigger service observing profile-update events
// ABOUTME: Per-user pending slots, bounded diagnostic history, isolated listener notification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! # Recalculation Trigger Service
//!
//! Observes profile updates, decides per field whether a change is
//! goal-affecting, and debounces bursts of edits: each update for a user
//! cancels any pending timer and schedules a new one, so a burst inside
//! the window collapses to one recalculation using the last-submitted
//! profile.
//!
//! Concurrency model: one pending-recalculation slot per user in a
//! sharded concurrent map. A superseded task is aborted outright, and an
//! aborted task is not a failure - it produces no fallback goals and no
//! error events. Different users proceed fully in parallel.

use crate::config::{DebounceConfig, HistoryConfig};
use crate::errors::GoalResult;
use crate::models::{CalculationTriggerEvent, ProfileChangeDetection, TriggerReason, UserProfile};
use crate::services::goal_calculation::{GoalCalculationOutcome, GoalCalculationService};
use dashmap::DashMap;
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

/// Observer notified of every recorded trigger event. Notification is
/// fire-and-forget; a panicking listener does not prevent the others
/// from being notified.
pub trait TriggerListener: Send + Sync {
    /// Called synchronously for each recorded event.
    fn on_trigger(&self, event: &CalculationTriggerEvent);
}

struct PendingRecalculation {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Debounced, per-user recalculation scheduling with bounded history
pub struct RecalculationTriggerService {
    goal_service: Arc<GoalCalculationService>,
    window: Duration,
    // Arc-shared with the spawned tasks so a completed task can clear
    // its own slot
    pending: Arc<DashMap<Uuid, PendingRecalculation>>,
    generation: AtomicU64,
    history: Mutex<VecDeque<CalculationTriggerEvent>>,
    history_capacity: usize,
    listeners: RwLock<Vec<Arc<dyn TriggerListener>>>,
}

impl RecalculationTriggerService {
    /// Assemble the service around the calculation use case.
    #[must_use]
    pub fn new(
        goal_service: Arc<GoalCalculationService>,
        debounce: &DebounceConfig,
        history: &HistoryConfig,
    ) -> Self {
        Self {
            goal_service,
            window: Duration::from_millis(debounce.window_ms),
            pending: Arc::new(DashMap::new()),
            generation: AtomicU64::new(0),
            history: Mutex::new(VecDeque::with_capacity(history.capacity)),
            history_capacity: history.capacity,
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Register a listener for recorded trigger events.
    pub fn register_listener(&self, listener: Arc<dyn TriggerListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Observe a profile update. Schedules a debounced recalculation when
    /// the change is goal-affecting, the profile's calculation validity
    /// transitioned, or this is a new profile; otherwise does nothing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn profile_updated(&self, before: Option<UserProfile>, after: UserProfile) {
        let today = chrono::Utc::now().date_naive();
        let changes = ProfileChangeDetection::detect(before.as_ref(), &after, today);
        if !changes.warrants_recalculation() {
            debug!(user_id = %after.user_id, "profile update not goal-affecting, no trigger");
            return;
        }

        let reason = if changes.is_new_profile {
            TriggerReason::ProfileCreated
        } else if changes.is_goal_affecting() {
            TriggerReason::GoalAffectingChange
        } else {
            TriggerReason::ValidityChanged
        };
        self.schedule_debounced(before, after, reason, &changes);
    }

    /// Cancel any pending debounced task for the user and recalculate
    /// immediately, bypassing the debounce window.
    ///
    /// # Errors
    ///
    /// Propagates the calculation service's error cases.
    pub async fn force_recalculate(&self, user_id: Uuid) -> GoalResult<GoalCalculationOutcome> {
        if let Some((_, superseded)) = self.pending.remove(&user_id) {
            superseded.handle.abort();
            debug!(%user_id, "pending debounced recalculation cancelled by force request");
        }
        self.record(CalculationTriggerEvent {
            user_id,
            reason: TriggerReason::Forced,
            occurred_at: chrono::Utc::now(),
            detail: serde_json::json!({ "note": "debounce bypassed" }),
        });
        self.goal_service.calculate_and_store(user_id).await
    }

    /// Record an event originating outside this service (the profile
    /// update orchestration's dual bookkeeping).
    pub fn record_external(&self, event: CalculationTriggerEvent) {
        self.record(event);
    }

    /// Most recent trigger events, oldest first.
    #[must_use]
    pub fn recent_events(&self) -> Vec<CalculationTriggerEvent> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Drop the diagnostic history.
    pub fn clear_history(&self) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of users with a pending debounced recalculation.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether a debounced recalculation is pending for the user.
    #[must_use]
    pub fn has_pending(&self, user_id: Uuid) -> bool {
        self.pending.contains_key(&user_id)
    }

    fn schedule_debounced(
        &self,
        before: Option<UserProfile>,
        after: UserProfile,
        reason: TriggerReason,
        changes: &ProfileChangeDetection,
    ) {
        let user_id = after.user_id;
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let window = self.window;
        let goal_service = Arc::clone(&self.goal_service);
        let pending = Arc::clone(&self.pending);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            match goal_service
                .recalculate_after_update(before.as_ref(), &after)
                .await
            {
                Ok(outcome) => {
                    debug!(%user_id, disposition = ?outcome.disposition, "debounced recalculation completed");
                }
                Err(error) => {
                    warn!(%user_id, %error, "debounced recalculation failed");
                }
            }
            // Generation check so a task never removes its successor's slot
            pending.remove_if(&user_id, |_, p| p.generation == generation);
        });

        if let Some(superseded) = self.pending.insert(
            user_id,
            PendingRecalculation { generation, handle },
        ) {
            superseded.handle.abort();
            debug!(%user_id, "superseded pending recalculation cancelled");
        }

        self.record(CalculationTriggerEvent {
            user_id,
            reason,
            occurred_at: chrono::Utc::now(),
            detail: serde_json::json!({
                "changed_fields": changes.changed_fields,
                "validity_changed": changes.validity_changed,
                "debounce_window_ms": self.window.as_millis() as u64,
            }),
        });
    }

    fn record(&self, event: CalculationTriggerEvent) {
        {
            let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
            if history.len() == self.history_capacity {
                history.pop_front();
            }
            history.push_back(event.clone());
        }
        self.notify_listeners(&event);
    }

    fn notify_listeners(&self, event: &CalculationTriggerEvent) {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            if catch_unwind(AssertUnwindSafe(|| listener.on_trigger(event))).is_err() {
                warn!(user_id = %event.user_id, "trigger listener panicked; continuing with the rest");
            }
        }
    }
}
