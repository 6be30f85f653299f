// ABOUTME: Goal calculation use case - staleness gating, retry with backoff, domain validation
// ABOUTME: Wraps the orchestrator; the caller always ends up with a typed result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! # Goal Calculation Service
//!
//! Wraps the orchestrator with:
//! - staleness gating: recalculate when there are no prior goals, the
//!   prior goals are older than the staleness horizon, or they are
//!   fallback-sourced
//! - retry with exponential backoff (500ms base, 4000ms cap, 3 attempts)
//!   independently around the profile fetch and the goal persistence;
//!   calculation itself is deterministic and never retried
//! - post-calculation domain validation beyond bounds checking:
//!   calories-to-steps ratio sanity and age-tier plausibility, reported
//!   as validation errors rather than silently coerced

use crate::calculators::adapt_profile;
use crate::config::{EngineConfig, RetryConfig, StalenessConfig};
use crate::constants::{age_tiers, validation};
use crate::errors::{GoalError, GoalResult};
use crate::models::{CalculationInput, DailyGoals, ProfileChangeDetection, UserProfile};
use crate::orchestrator::{CalculationOrchestrator, GoalDisposition, OrchestratedCalculation};
use crate::storage::{GoalStore, ProfileStore};
use chrono::{DateTime, Duration, Utc};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of one service-level calculation
#[derive(Debug, Clone)]
pub struct GoalCalculationOutcome {
    /// The persisted goals
    pub goals: DailyGoals,
    /// How the orchestrator produced them
    pub disposition: GoalDisposition,
}

struct RetryExhausted {
    attempts: u32,
    source: anyhow::Error,
}

/// Retry-protected calculation use case
pub struct GoalCalculationService {
    profile_store: Arc<dyn ProfileStore>,
    goal_store: Arc<dyn GoalStore>,
    orchestrator: CalculationOrchestrator,
    retry: RetryConfig,
    staleness: StalenessConfig,
}

impl GoalCalculationService {
    /// Assemble the service from its collaborators.
    #[must_use]
    pub fn new(
        profile_store: Arc<dyn ProfileStore>,
        goal_store: Arc<dyn GoalStore>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            profile_store,
            goal_store,
            orchestrator: CalculationOrchestrator::new(),
            retry: config.retry.clone(),
            staleness: config.staleness.clone(),
        }
    }

    /// Calculate and persist daily goals for a user.
    ///
    /// Missing or invalid profile data routes to fallback goals, not an
    /// error; the error cases are exhausted retries and domain
    /// validation failures.
    ///
    /// # Errors
    ///
    /// - [`GoalError::ProfileNotFound`] when the profile fetch keeps failing
    /// - [`GoalError::ValidationFailed`] when computed goals are implausible
    /// - [`GoalError::StorageFailed`] when persistence keeps failing
    pub async fn calculate_and_store(&self, user_id: Uuid) -> GoalResult<GoalCalculationOutcome> {
        let profile = self
            .with_retry("profile fetch", user_id, || {
                self.profile_store.get_profile(user_id)
            })
            .await
            .map_err(|e| GoalError::ProfileNotFound {
                user_id,
                source: e.source,
            })?;

        let now = Utc::now();
        let calculation = self.orchestrator.calculate(user_id, profile.as_ref(), now);
        Self::validate_computed(&calculation, profile.as_ref(), now)?;

        let goals = self.persist(&calculation.goals).await?;
        info!(%user_id, source = ?goals.source, "daily goals stored");
        Ok(GoalCalculationOutcome {
            goals,
            disposition: calculation.disposition,
        })
    }

    /// Whether a recalculation is warranted right now: no prior goals,
    /// prior goals past the staleness horizon, or prior goals that came
    /// from fallback.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::StorageFailed`] when the goal store cannot be read.
    pub async fn is_recalculation_needed(&self, user_id: Uuid) -> GoalResult<bool> {
        let Some(current) = self.read_current_goals(user_id).await? else {
            debug!(%user_id, "no prior goals, recalculation needed");
            return Ok(true);
        };
        if current.is_fallback() {
            debug!(%user_id, "prior goals are fallback-sourced, recalculation needed");
            return Ok(true);
        }

        let last_calculated = self
            .goal_store
            .last_calculation_time(user_id)
            .await
            .map_err(|e| storage_failed(user_id, 1, e))?
            .unwrap_or(current.calculated_at);
        let max_age = Duration::hours(self.staleness.max_age_hours);
        let stale = Utc::now().signed_duration_since(last_calculated) >= max_age;
        if stale {
            debug!(%user_id, %last_calculated, "prior goals are stale, recalculation needed");
        }
        Ok(stale)
    }

    /// Current goals if they are still usable, otherwise a fresh
    /// calculation. The dashboard entry point.
    ///
    /// # Errors
    ///
    /// Propagates the error cases of [`Self::calculate_and_store`].
    pub async fn ensure_current_goals(&self, user_id: Uuid) -> GoalResult<GoalCalculationOutcome> {
        if self.is_recalculation_needed(user_id).await? {
            return self.calculate_and_store(user_id).await;
        }
        // is_recalculation_needed read them; absence would have forced the branch above
        let goals = self
            .read_current_goals(user_id)
            .await?
            .ok_or_else(|| GoalError::Unexpected("goals vanished between staleness check and read".into()))?;
        Ok(GoalCalculationOutcome {
            goals,
            disposition: GoalDisposition::Reused,
        })
    }

    /// Recalculation variant for profile updates: reuses the previous
    /// goals with a refreshed timestamp when nothing goal-affecting
    /// changed, recomputes otherwise, and persists the result.
    ///
    /// # Errors
    ///
    /// Same cases as [`Self::calculate_and_store`].
    pub async fn recalculate_after_update(
        &self,
        before: Option<&UserProfile>,
        after: &UserProfile,
    ) -> GoalResult<GoalCalculationOutcome> {
        let user_id = after.user_id;
        let now = Utc::now();
        let changes = ProfileChangeDetection::detect(before, after, now.date_naive());
        let previous = self.read_current_goals(user_id).await?;

        let calculation =
            self.orchestrator
                .recalculate(user_id, Some(after), previous.as_ref(), &changes, now);
        Self::validate_computed(&calculation, Some(after), now)?;

        let goals = self.persist(&calculation.goals).await?;
        debug!(%user_id, disposition = ?calculation.disposition, "post-update goals stored");
        Ok(GoalCalculationOutcome {
            goals,
            disposition: calculation.disposition,
        })
    }

    async fn read_current_goals(&self, user_id: Uuid) -> GoalResult<Option<DailyGoals>> {
        self.goal_store
            .current_goals(user_id)
            .await
            .map_err(|e| storage_failed(user_id, 1, e))
    }

    async fn persist(&self, goals: &DailyGoals) -> GoalResult<DailyGoals> {
        let user_id = goals.user_id;
        self.with_retry("goal persistence", user_id, || {
            self.goal_store.save_and_sync_goals(goals)
        })
        .await
        .map_err(|e| storage_failed(user_id, e.attempts, e.source))
    }

    /// Domain validation applies only to freshly computed goals; fallback
    /// goals are validated by the fallback generator's own stricter check.
    fn validate_computed(
        calculation: &OrchestratedCalculation,
        profile: Option<&UserProfile>,
        now: DateTime<Utc>,
    ) -> GoalResult<()> {
        if calculation.disposition != GoalDisposition::Computed {
            return Ok(());
        }
        let Some(input) = profile.and_then(|p| adapt_profile(p, now.date_naive())) else {
            // A computed disposition implies an adaptable profile
            return Ok(());
        };
        let issues = domain_validation_issues(&calculation.goals, &input);
        if issues.is_empty() {
            Ok(())
        } else {
            warn!(user_id = %calculation.goals.user_id, ?issues, "computed goals failed domain validation");
            Err(GoalError::ValidationFailed { issues })
        }
    }

    async fn with_retry<T, F, Fut>(
        &self,
        operation: &str,
        user_id: Uuid,
        mut op: F,
    ) -> Result<T, RetryExhausted>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let mut delay_ms = self.retry.initial_delay_ms;
        let mut last_error = None;

        for attempt in 1..=self.retry.max_attempts {
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(%user_id, operation, attempt, "operation recovered after retry");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    warn!(
                        %user_id,
                        operation,
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms,
                        %error,
                        "operation failed"
                    );
                    last_error = Some(error);
                    if attempt < self.retry.max_attempts {
                        tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                        // Exponential backoff with cap
                        delay_ms = (delay_ms * 2).min(self.retry.max_delay_ms);
                    }
                }
            }
        }

        Err(RetryExhausted {
            attempts: self.retry.max_attempts,
            source: last_error
                .unwrap_or_else(|| anyhow::anyhow!("{operation} failed with no recorded error")),
        })
    }
}

fn storage_failed(user_id: Uuid, attempts: u32, source: anyhow::Error) -> GoalError {
    GoalError::StorageFailed {
        user_id,
        attempts,
        source,
    }
}

/// Sanity checks beyond the hard safety bounds.
#[must_use]
pub fn domain_validation_issues(goals: &DailyGoals, input: &CalculationInput) -> Vec<String> {
    let mut issues = Vec::new();

    let ratio = f64::from(goals.calories_goal) / f64::from(goals.steps_goal);
    if !(validation::MIN_CALORIES_PER_STEP..=validation::MAX_CALORIES_PER_STEP).contains(&ratio) {
        issues.push(format!(
            "calories-to-steps ratio {ratio:.3} outside [{}, {}]",
            validation::MIN_CALORIES_PER_STEP,
            validation::MAX_CALORIES_PER_STEP
        ));
    }

    if input.age() < age_tiers::YOUTH_MAX_AGE
        && goals.steps_goal < validation::YOUTH_MIN_PLAUSIBLE_STEPS
    {
        issues.push(format!(
            "youth steps goal {} below the plausible floor {}",
            goals.steps_goal,
            validation::YOUTH_MIN_PLAUSIBLE_STEPS
        ));
    }

    if input.age() >= age_tiers::OLDER_ADULT_MIN_AGE
        && goals.steps_goal > validation::OLDER_ADULT_MAX_PLAUSIBLE_STEPS
    {
        issues.push(format!(
            "older-adult steps goal {} above the plausible ceiling {}",
            goals.steps_goal,
            validation::OLDER_ADULT_MAX_PLAUSIBLE_STEPS
        ));
    }

    issues
}
