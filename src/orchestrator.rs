// ABOUTME: Calculation orchestration - validation, calculator sequencing, result validation
// ABOUTME: Any failure routes to fallback substitution; callers always receive usable goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! # Calculation Orchestrator
//!
//! Sequences one calculation as a small state machine:
//! `Validating -> Calculating -> ResultValidating -> Success | FallbackRouted`.
//!
//! - **Validating**: adapt the profile; absence routes to fallback
//! - **Calculating**: invoke the three calculators; non-finite arithmetic
//!   routes to fallback
//! - **ResultValidating**: the composed goals must satisfy all three
//!   safety bounds - never trusted from upstream
//!
//! The recalculation variant short-circuits to "reuse previous goals with
//! a refreshed timestamp" when nothing goal-affecting changed, avoiding
//! redundant computation.

use crate::calculators::{adapt_profile, CalculationBreakdown, FallbackGenerator};
use crate::models::{
    CalculationSource, DailyGoals, ProfileChangeDetection, UserProfile,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Why a calculation was routed to fallback goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// Profile missing, incomplete, or out of range
    MissingOrInvalidProfile,
    /// A calculator produced unusable (non-finite) arithmetic
    CalculationFailed,
    /// The composed goals violated the safety bounds
    ResultOutOfBounds,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingOrInvalidProfile => "missing/invalid data",
            Self::CalculationFailed => "calculation failed",
            Self::ResultOutOfBounds => "validation failed",
        };
        f.write_str(text)
    }
}

/// How the orchestrator produced its goals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalDisposition {
    /// Freshly computed from the profile via the WHO formulas
    Computed,
    /// Previous goals reused with a refreshed timestamp
    Reused,
    /// Fallback goals substituted
    FallbackRouted(FallbackReason),
}

/// Result of one orchestrated calculation - always carries usable goals
#[derive(Debug, Clone)]
pub struct OrchestratedCalculation {
    /// The goals to persist and display
    pub goals: DailyGoals,
    /// How they were produced
    pub disposition: GoalDisposition,
}

/// Sequences validation, calculation, and result validation, substituting
/// fallback goals on any failure. Stateless; cheap to clone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculationOrchestrator {
    fallback: FallbackGenerator,
}

impl CalculationOrchestrator {
    /// Create an orchestrator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fallback: FallbackGenerator::new(),
        }
    }

    /// Run one full calculation for `user_id`.
    #[must_use]
    pub fn calculate(
        &self,
        user_id: Uuid,
        profile: Option<&UserProfile>,
        now: DateTime<Utc>,
    ) -> OrchestratedCalculation {
        // Validating
        let Some(input) = profile.and_then(|p| adapt_profile(p, now.date_naive())) else {
            return self.route_to_fallback(
                user_id,
                profile,
                now,
                FallbackReason::MissingOrInvalidProfile,
            );
        };

        // Calculating
        let breakdown = CalculationBreakdown::for_input(&input);
        let intermediates_finite = breakdown.steps.raw_goal.is_finite()
            && breakdown.calories.bmr.is_finite()
            && breakdown.calories.raw_tdee.is_finite()
            && breakdown.heart_points.raw_goal.is_finite();
        if !intermediates_finite {
            return self.route_to_fallback(user_id, profile, now, FallbackReason::CalculationFailed);
        }
        let steps = breakdown.steps.goal;
        let calories = breakdown.calories.goal;
        let heart_points = breakdown.heart_points.goal;

        // ResultValidating
        match DailyGoals::new(
            user_id,
            steps,
            calories,
            heart_points,
            now,
            CalculationSource::WhoStandard,
        ) {
            Ok(goals) => {
                debug!(%user_id, steps, calories, heart_points, "calculation succeeded");
                OrchestratedCalculation {
                    goals,
                    disposition: GoalDisposition::Computed,
                }
            }
            Err(issues) => {
                warn!(%user_id, ?issues, "computed goals failed bounds validation");
                self.route_to_fallback(user_id, profile, now, FallbackReason::ResultOutOfBounds)
            }
        }
    }

    /// Recalculation variant: reuse the previous goals with a refreshed
    /// timestamp when they exist, are not fallback-sourced, and nothing
    /// goal-affecting changed.
    #[must_use]
    pub fn recalculate(
        &self,
        user_id: Uuid,
        profile: Option<&UserProfile>,
        previous: Option<&DailyGoals>,
        changes: &ProfileChangeDetection,
        now: DateTime<Utc>,
    ) -> OrchestratedCalculation {
        if let Some(previous) = previous {
            if !previous.is_fallback() && !changes.warrants_recalculation() {
                debug!(%user_id, "no goal-affecting change, reusing previous goals");
                return OrchestratedCalculation {
                    goals: previous.refreshed_at(now),
                    disposition: GoalDisposition::Reused,
                };
            }
        }
        self.calculate(user_id, profile, now)
    }

    fn route_to_fallback(
        &self,
        user_id: Uuid,
        profile: Option<&UserProfile>,
        now: DateTime<Utc>,
        reason: FallbackReason,
    ) -> OrchestratedCalculation {
        warn!(%user_id, %reason, "routing to fallback goals");
        let goals = self.fallback.generate(user_id, profile, now);
        let goals = if self.fallback.validate(&goals) {
            goals
        } else {
            // Even fallback construction is suspect; drop to the
            // emergency tier rather than trust it.
            warn!(%user_id, "fallback goals failed their own validation, using emergency tier");
            self.fallback.emergency_goals(user_id, now)
        };
        OrchestratedCalculation {
            goals,
            disposition: GoalDisposition::FallbackRouted(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender};
    use chrono::{Datelike, NaiveDate};

    fn profile_aged(age: i32) -> UserProfile {
        let birth_year = Utc::now().date_naive().year() - age;
        UserProfile {
            user_id: Uuid::new_v4(),
            birth_date: NaiveDate::from_ymd_opt(birth_year, 1, 1),
            gender: Some(Gender::Male),
            height_cm: Some(175.0),
            weight_kg: Some(70.0),
            activity_level: Some(ActivityLevel::LightlyActive),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn valid_profile_computes_who_goals() {
        let orchestrator = CalculationOrchestrator::new();
        let profile = profile_aged(30);
        let result = orchestrator.calculate(profile.user_id, Some(&profile), Utc::now());
        assert_eq!(result.disposition, GoalDisposition::Computed);
        assert_eq!(result.goals.source, CalculationSource::WhoStandard);
        assert_eq!(result.goals.steps_goal, 10_500);
    }

    #[test]
    fn missing_profile_routes_to_fallback() {
        let orchestrator = CalculationOrchestrator::new();
        let user_id = Uuid::new_v4();
        let result = orchestrator.calculate(user_id, None, Utc::now());
        assert_eq!(
            result.disposition,
            GoalDisposition::FallbackRouted(FallbackReason::MissingOrInvalidProfile)
        );
        assert_eq!(result.goals.steps_goal, 7_500);
    }

    #[test]
    fn invalid_age_routes_to_fallback_not_error() {
        let orchestrator = CalculationOrchestrator::new();
        let mut profile = profile_aged(30);
        // age 200
        profile.birth_date = NaiveDate::from_ymd_opt(Utc::now().date_naive().year() - 200, 1, 1);
        let result = orchestrator.calculate(profile.user_id, Some(&profile), Utc::now());
        assert_eq!(
            result.disposition,
            GoalDisposition::FallbackRouted(FallbackReason::MissingOrInvalidProfile)
        );
        assert!(result.goals.is_fallback());
        assert!(result.goals.within_bounds());
    }

    #[test]
    fn recalculation_reuses_when_nothing_changed() {
        let orchestrator = CalculationOrchestrator::new();
        let profile = profile_aged(30);
        let now = Utc::now();
        let first = orchestrator.calculate(profile.user_id, Some(&profile), now);

        let changes = ProfileChangeDetection::detect(Some(&profile), &profile, now.date_naive());
        let later = now + chrono::Duration::hours(1);
        let second = orchestrator.recalculate(
            profile.user_id,
            Some(&profile),
            Some(&first.goals),
            &changes,
            later,
        );
        assert_eq!(second.disposition, GoalDisposition::Reused);
        assert_eq!(second.goals.steps_goal, first.goals.steps_goal);
        assert_eq!(second.goals.calculated_at, later);
    }

    #[test]
    fn recalculation_recomputes_when_previous_was_fallback() {
        let orchestrator = CalculationOrchestrator::new();
        let profile = profile_aged(30);
        let now = Utc::now();
        // Previous goals came from fallback (e.g., profile was incomplete then)
        let previous = orchestrator.calculate(profile.user_id, None, now).goals;
        assert!(previous.is_fallback());

        let changes = ProfileChangeDetection::detect(Some(&profile), &profile, now.date_naive());
        let result =
            orchestrator.recalculate(profile.user_id, Some(&profile), Some(&previous), &changes, now);
        assert_eq!(result.disposition, GoalDisposition::Computed);
    }

    #[test]
    fn recalculation_recomputes_on_goal_affecting_change() {
        let orchestrator = CalculationOrchestrator::new();
        let before = profile_aged(30);
        let mut after = before.clone();
        after.weight_kg = Some(80.0);
        let now = Utc::now();
        let previous = orchestrator.calculate(before.user_id, Some(&before), now).goals;

        let changes = ProfileChangeDetection::detect(Some(&before), &after, now.date_naive());
        assert!(changes.is_goal_affecting());
        let result =
            orchestrator.recalculate(after.user_id, Some(&after), Some(&previous), &changes, now);
        assert_eq!(result.disposition, GoalDisposition::Computed);
    }
}
