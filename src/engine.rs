// ABOUTME: Composition root assembling the goal engine once at startup
// ABOUTME: Explicit constructor injection; exposes the dashboard read surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! # Wellness Engine
//!
//! Assembles the orchestrator and the three services once, with explicit
//! constructor injection - no runtime reflection, no globals. The
//! dashboard consumer reads goals and on-demand breakdowns through this
//! facade and never mutates them.

use crate::calculators::{adapt_profile, CalculationBreakdown};
use crate::config::EngineConfig;
use crate::errors::{GoalError, GoalResult};
use crate::models::{CalculationTriggerEvent, DailyGoals, UserProfile};
use crate::services::goal_calculation::{GoalCalculationOutcome, GoalCalculationService};
use crate::services::profile_update::{ProfileUpdateOutcome, ProfileUpdateService};
use crate::services::recalculation_trigger::RecalculationTriggerService;
use crate::storage::{GoalStore, ProfileStore};
use std::sync::Arc;
use uuid::Uuid;

/// The assembled goal calculation subsystem
pub struct WellnessEngine {
    profile_store: Arc<dyn ProfileStore>,
    goal_store: Arc<dyn GoalStore>,
    goal_service: Arc<GoalCalculationService>,
    trigger_service: Arc<RecalculationTriggerService>,
    update_service: Arc<ProfileUpdateService>,
}

impl WellnessEngine {
    /// Wire the engine together. Call once at startup; the instance is
    /// cheap to share behind an `Arc`.
    ///
    /// Embedders loading [`EngineConfig`] from external sources should
    /// run [`EngineConfig::validate`] first.
    #[must_use]
    pub fn new(
        config: EngineConfig,
        profile_store: Arc<dyn ProfileStore>,
        goal_store: Arc<dyn GoalStore>,
    ) -> Self {
        let goal_service = Arc::new(GoalCalculationService::new(
            Arc::clone(&profile_store),
            Arc::clone(&goal_store),
            &config,
        ));
        let trigger_service = Arc::new(RecalculationTriggerService::new(
            Arc::clone(&goal_service),
            &config.debounce,
            &config.history,
        ));
        let update_service = Arc::new(ProfileUpdateService::new(
            Arc::clone(&profile_store),
            Arc::clone(&goal_service),
            Arc::clone(&trigger_service),
        ));
        Self {
            profile_store,
            goal_store,
            goal_service,
            trigger_service,
            update_service,
        }
    }

    /// Calculate and persist daily goals for a user.
    ///
    /// # Errors
    ///
    /// See [`GoalCalculationService::calculate_and_store`].
    pub async fn calculate_daily_goals(&self, user_id: Uuid) -> GoalResult<GoalCalculationOutcome> {
        self.goal_service.calculate_and_store(user_id).await
    }

    /// Current goals if usable, otherwise a fresh calculation.
    ///
    /// # Errors
    ///
    /// See [`GoalCalculationService::ensure_current_goals`].
    pub async fn ensure_current_goals(&self, user_id: Uuid) -> GoalResult<GoalCalculationOutcome> {
        self.goal_service.ensure_current_goals(user_id).await
    }

    /// Whether recalculation is currently warranted for a user.
    ///
    /// # Errors
    ///
    /// See [`GoalCalculationService::is_recalculation_needed`].
    pub async fn is_recalculation_needed(&self, user_id: Uuid) -> GoalResult<bool> {
        self.goal_service.is_recalculation_needed(user_id).await
    }

    /// Persist a profile with per-user mutual exclusion and cascade into
    /// recalculation when the change warrants it.
    ///
    /// # Errors
    ///
    /// See [`ProfileUpdateService::update_profile_with_recalculation`].
    pub async fn update_profile(&self, profile: UserProfile) -> GoalResult<ProfileUpdateOutcome> {
        self.update_service
            .update_profile_with_recalculation(profile)
            .await
    }

    /// Observe a profile update for debounced background recalculation.
    pub fn profile_updated(&self, before: Option<UserProfile>, after: UserProfile) {
        self.trigger_service.profile_updated(before, after);
    }

    /// Cancel any pending debounced recalculation and recalculate now.
    ///
    /// # Errors
    ///
    /// See [`RecalculationTriggerService::force_recalculate`].
    pub async fn force_recalculate(&self, user_id: Uuid) -> GoalResult<GoalCalculationOutcome> {
        self.trigger_service.force_recalculate(user_id).await
    }

    /// Read-only view of the user's persisted goals for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::StorageFailed`] when the goal store cannot be read.
    pub async fn current_goals(&self, user_id: Uuid) -> GoalResult<Option<DailyGoals>> {
        self.goal_store
            .current_goals(user_id)
            .await
            .map_err(|e| GoalError::StorageFailed {
                user_id,
                attempts: 1,
                source: e,
            })
    }

    /// On-demand diagnostic breakdown of the user's calculation, for
    /// transparency display. `None` when the profile does not support
    /// calculation (the dashboard shows fallback goals without one).
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::ProfileNotFound`] when the profile store
    /// cannot be read.
    pub async fn goal_breakdown(&self, user_id: Uuid) -> GoalResult<Option<CalculationBreakdown>> {
        let profile = self
            .profile_store
            .get_profile(user_id)
            .await
            .map_err(|e| GoalError::ProfileNotFound { user_id, source: e })?;
        let today = chrono::Utc::now().date_naive();
        Ok(profile
            .as_ref()
            .and_then(|p| adapt_profile(p, today))
            .map(|input| CalculationBreakdown::for_input(&input)))
    }

    /// The trigger service, for listener registration and diagnostics.
    #[must_use]
    pub fn trigger_service(&self) -> &Arc<RecalculationTriggerService> {
        &self.trigger_service
    }

    /// Recent trigger events, oldest first.
    #[must_use]
    pub fn recent_trigger_events(&self) -> Vec<CalculationTriggerEvent> {
        self.trigger_service.recent_events()
    }
}
