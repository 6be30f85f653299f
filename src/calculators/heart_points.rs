// ABOUTME: Daily heart point goal calculator from the WHO weekly moderate-activity target
// ABOUTME: 150 min/week spread daily, adjusted for age tier and activity level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! Heart point goal calculation.
//!
//! The WHO recommends 150 minutes of moderate-intensity activity per
//! week; one heart point corresponds to one moderate minute. Spread
//! across seven days:
//!
//! `goal = clamp((150/7) x ageAdj(age) x activityAdj(level), 15, 50)`
//!
//! Age tiers match the step calculator's.

use super::HeartPointsBreakdown;
use crate::constants::{age_tiers, heart_points};
use crate::models::{ActivityLevel, CalculationInput};

/// Age tier multiplier, same tiers as the step calculator
#[must_use]
pub fn age_adjustment(age: u32) -> f64 {
    if age < age_tiers::YOUTH_MAX_AGE {
        heart_points::YOUTH_MULTIPLIER
    } else if age >= age_tiers::OLDER_ADULT_MIN_AGE {
        heart_points::OLDER_ADULT_MULTIPLIER
    } else {
        1.0
    }
}

/// Activity level multiplier for the heart point target
#[must_use]
pub fn activity_adjustment(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 0.9,
        ActivityLevel::LightlyActive => 0.95,
        ActivityLevel::ModeratelyActive => 1.0,
        ActivityLevel::VeryActive => 1.1,
        ActivityLevel::ExtraActive => 1.15,
    }
}

/// Moderate-intensity minutes per day implied by the WHO weekly target
#[must_use]
pub fn daily_moderate_minutes() -> f64 {
    heart_points::WHO_WEEKLY_MODERATE_MINUTES / 7.0
}

/// Daily heart point goal for a validated input.
#[must_use]
pub fn calculate_heart_points_goal(input: &CalculationInput) -> u32 {
    let base = daily_moderate_minutes() * heart_points::POINTS_PER_MODERATE_MINUTE;
    let raw = base * age_adjustment(input.age()) * activity_adjustment(input.activity_level());
    raw.clamp(
        f64::from(heart_points::MIN_HEART_POINTS_GOAL),
        f64::from(heart_points::MAX_HEART_POINTS_GOAL),
    )
    .round() as u32
}

/// Diagnostic projection of the heart point goal arithmetic.
#[must_use]
pub fn heart_points_breakdown(input: &CalculationInput) -> HeartPointsBreakdown {
    let minutes = daily_moderate_minutes();
    let age_adjustment = age_adjustment(input.age());
    let activity_adjustment = activity_adjustment(input.activity_level());
    HeartPointsBreakdown {
        daily_moderate_minutes: minutes,
        age_adjustment,
        activity_adjustment,
        raw_goal: minutes * heart_points::POINTS_PER_MODERATE_MINUTE * age_adjustment * activity_adjustment,
        goal: calculate_heart_points_goal(input),
    }
}
