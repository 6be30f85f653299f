// ABOUTME: Profile update orchestration - per-user mutual exclusion with cascading recalculation
// ABOUTME: Concurrent updates for the same user are rejected immediately, never queued
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! # Profile Update Orchestration
//!
//! Coordinates profile persistence with goal recalculation atomically per
//! user. An update that finds another update already in flight for the
//! same user is rejected immediately with `ConcurrentUpdate` - no
//! queueing, the caller retries. Different users proceed fully in
//! parallel: the guard is an atomic insert-if-absent on a sharded map,
//! scoped to one key at a time.
//!
//! When change detection decides the update warrants it, the
//! recalculation variant runs synchronously here, and the trigger
//! service is notified for history tracking regardless - the dual
//! bookkeeping is intentional for auditability.

use crate::errors::{GoalError, GoalResult};
use crate::models::{
    CalculationTriggerEvent, DailyGoals, ProfileChangeDetection, TriggerReason, UserProfile,
};
use crate::services::goal_calculation::GoalCalculationService;
use crate::services::recalculation_trigger::RecalculationTriggerService;
use crate::storage::ProfileStore;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of one coordinated profile update
#[derive(Debug, Clone)]
pub struct ProfileUpdateOutcome {
    /// The stored profile snapshot
    pub profile: UserProfile,
    /// Recalculated goals, when the update cascaded into recalculation
    pub goals: Option<DailyGoals>,
    /// Whether a recalculation ran as part of this update
    pub recalculated: bool,
    /// What changed between the snapshots
    pub changes: ProfileChangeDetection,
}

/// Per-user serialized profile updates with cascading recalculation
pub struct ProfileUpdateService {
    profile_store: Arc<dyn ProfileStore>,
    goal_service: Arc<GoalCalculationService>,
    trigger_service: Arc<RecalculationTriggerService>,
    in_flight: DashMap<Uuid, ()>,
}

impl ProfileUpdateService {
    /// Assemble the service from its collaborators.
    #[must_use]
    pub fn new(
        profile_store: Arc<dyn ProfileStore>,
        goal_service: Arc<GoalCalculationService>,
        trigger_service: Arc<RecalculationTriggerService>,
    ) -> Self {
        Self {
            profile_store,
            goal_service,
            trigger_service,
            in_flight: DashMap::new(),
        }
    }

    /// Persist a profile and recalculate goals when the change warrants
    /// it, holding the per-user guard for the whole operation.
    ///
    /// # Errors
    ///
    /// - [`GoalError::ConcurrentUpdate`] when an update for this user is
    ///   already in flight
    /// - [`GoalError::ProfileNotFound`] when the previous snapshot cannot
    ///   be read
    /// - [`GoalError::StorageFailed`] when persistence fails
    /// - the calculation service's error cases when the cascade runs
    pub async fn update_profile_with_recalculation(
        &self,
        profile: UserProfile,
    ) -> GoalResult<ProfileUpdateOutcome> {
        let user_id = profile.user_id;
        let Some(_guard) = InFlightGuard::try_acquire(&self.in_flight, user_id) else {
            warn!(%user_id, "rejecting concurrent profile update");
            return Err(GoalError::ConcurrentUpdate { user_id });
        };

        let previous = self
            .profile_store
            .get_profile(user_id)
            .await
            .map_err(|e| GoalError::ProfileNotFound { user_id, source: e })?;

        let saved = self
            .profile_store
            .save_profile(&profile)
            .await
            .map_err(|e| GoalError::StorageFailed {
                user_id,
                attempts: 1,
                source: e,
            })?;

        let today = chrono::Utc::now().date_naive();
        let changes = ProfileChangeDetection::detect(previous.as_ref(), &saved, today);

        let mut goals = None;
        let recalculated = changes.warrants_recalculation();
        if recalculated {
            let outcome = self
                .goal_service
                .recalculate_after_update(previous.as_ref(), &saved)
                .await?;
            debug!(%user_id, disposition = ?outcome.disposition, "update cascaded into recalculation");
            goals = Some(outcome.goals);

            // Dual bookkeeping: the trigger service keeps the audit trail
            // even though the recalculation ran synchronously here.
            self.trigger_service.record_external(CalculationTriggerEvent {
                user_id,
                reason: TriggerReason::UpdateCascade,
                occurred_at: chrono::Utc::now(),
                detail: serde_json::json!({
                    "changed_fields": changes.changed_fields,
                    "new_profile": changes.is_new_profile,
                }),
            });
        } else {
            debug!(%user_id, "profile update did not warrant recalculation");
        }

        info!(%user_id, recalculated, "profile update completed");
        Ok(ProfileUpdateOutcome {
            profile: saved,
            goals,
            recalculated,
            changes,
        })
    }

    /// Number of updates currently in flight (diagnostics).
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}

/// RAII slot in the in-flight map; released on drop so every exit path -
/// including error returns - frees the user's slot.
struct InFlightGuard<'a> {
    map: &'a DashMap<Uuid, ()>,
    user_id: Uuid,
}

impl<'a> InFlightGuard<'a> {
    fn try_acquire(map: &'a DashMap<Uuid, ()>, user_id: Uuid) -> Option<Self> {
        // Atomic insert-if-absent; the entry guard is dropped before any
        // suspension point.
        match map.entry(user_id) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(Self { map, user_id })
            }
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.map.remove(&self.user_id);
    }
}
