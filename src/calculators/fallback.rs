// ABOUTME: Fallback goal generation - medically safe defaults when calculation is impossible
// ABOUTME: Total functions only; every path yields goals inside the narrow fallback bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! Fallback goal generation.
//!
//! When the profile is missing, invalid, or calculation fails, the user
//! still gets goals - conservative ones. The generator applies the same
//! age-tier direction as the real calculators (youth higher, older adults
//! lower) and a minimal gender-based calorie delta, but works from the
//! fallback baseline rather than the WHO baseline, so results land in a
//! narrower, safer band than the full calculators:
//! steps [6000, 9000], calories [1400, 2400], heart points [17, 25].
//!
//! The emergency tier produces fixed minimum-safe goals and is reserved
//! for when even fallback construction is suspect.

use crate::constants::{age_tiers, fallback};
use crate::models::{CalculationSource, DailyGoals, Gender, UserProfile};
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

/// Produces safe default goals. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

impl FallbackGenerator {
    /// Create a generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate fallback goals for a user, personalizing conservatively
    /// from whatever partial profile data is available.
    #[must_use]
    pub fn generate(
        &self,
        user_id: Uuid,
        profile: Option<&UserProfile>,
        now: DateTime<Utc>,
    ) -> DailyGoals {
        let Some(profile) = profile else {
            debug!(%user_id, "no profile data, emitting conservative defaults");
            return DailyGoals::clamped(
                user_id,
                fallback::DEFAULT_STEPS,
                fallback::DEFAULT_CALORIES,
                fallback::DEFAULT_HEART_POINTS,
                now,
                CalculationSource::FallbackDefault,
            );
        };

        let tier = profile
            .age_on(now.date_naive())
            .map_or(1.0, Self::age_tier_multiplier);
        let calorie_delta = match profile.gender {
            Some(Gender::Male) => fallback::MALE_CALORIE_DELTA,
            Some(Gender::Female) => fallback::FEMALE_CALORIE_DELTA,
            Some(Gender::Other | Gender::Unspecified) | None => 0.0,
        };

        let steps = f64::from(fallback::DEFAULT_STEPS) * tier;
        let calories = f64::from(fallback::DEFAULT_CALORIES).mul_add(tier, calorie_delta);
        let heart_points = f64::from(fallback::DEFAULT_HEART_POINTS) * tier;

        DailyGoals::clamped(
            user_id,
            clamp_into_band(steps, fallback::STEPS_BAND),
            clamp_into_band(calories, fallback::CALORIES_BAND),
            clamp_into_band(heart_points, fallback::HEART_POINTS_BAND),
            now,
            CalculationSource::FallbackDefault,
        )
    }

    /// Fixed minimum-safe goals for when repeated upstream failures make
    /// even the personalized fallback suspect.
    #[must_use]
    pub fn emergency_goals(&self, user_id: Uuid, now: DateTime<Utc>) -> DailyGoals {
        DailyGoals::clamped(
            user_id,
            fallback::EMERGENCY_STEPS,
            fallback::EMERGENCY_CALORIES,
            fallback::EMERGENCY_HEART_POINTS,
            now,
            CalculationSource::FallbackDefault,
        )
    }

    /// A fallback result is accepted only if it is fallback-sourced AND
    /// every value sits inside the narrow fallback band - stricter than
    /// the general goal bounds.
    #[must_use]
    pub fn validate(&self, goals: &DailyGoals) -> bool {
        goals.source == CalculationSource::FallbackDefault
            && in_band(goals.steps_goal, fallback::STEPS_BAND)
            && in_band(goals.calories_goal, fallback::CALORIES_BAND)
            && in_band(goals.heart_points_goal, fallback::HEART_POINTS_BAND)
    }

    fn age_tier_multiplier(age: u32) -> f64 {
        if age < age_tiers::YOUTH_MAX_AGE {
            fallback::YOUTH_MULTIPLIER
        } else if age >= age_tiers::OLDER_ADULT_MIN_AGE {
            fallback::OLDER_ADULT_MULTIPLIER
        } else {
            1.0
        }
    }
}

fn clamp_into_band(value: f64, (min, max): (u32, u32)) -> u32 {
    value.clamp(f64::from(min), f64::from(max)).round() as u32
}

fn in_band(value: u32, (min, max): (u32, u32)) -> bool {
    (min..=max).contains(&value)
}
