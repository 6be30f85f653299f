// ABOUTME: Daily step goal calculator - population baseline with age and gender adjustments
// ABOUTME: Pure and deterministic, clamped to the [5000, 20000] safety band
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! Step goal calculation.
//!
//! `goal = clamp(10000 x ageAdj(age) x genderAdj(gender), 5000, 20000)`
//!
//! Age tiers follow the WHO activity guidance: youth get a higher target,
//! older adults a reduced one. The gender adjustment reflects population
//! stride and gait averages; users reporting other/unspecified get the
//! neutral multiplier - no biological assumption is made.

use super::StepsBreakdown;
use crate::constants::{age_tiers, steps};
use crate::models::{CalculationInput, Gender};

/// Age tier multiplier shared conceptually with the heart point calculator
#[must_use]
pub fn age_adjustment(age: u32) -> f64 {
    if age < age_tiers::YOUTH_MAX_AGE {
        steps::YOUTH_MULTIPLIER
    } else if age >= age_tiers::OLDER_ADULT_MIN_AGE {
        steps::OLDER_ADULT_MULTIPLIER
    } else {
        1.0
    }
}

/// Gender multiplier; neutral for other/unspecified
#[must_use]
pub fn gender_adjustment(gender: Gender) -> f64 {
    match gender {
        Gender::Male => steps::MALE_MULTIPLIER,
        Gender::Female => steps::FEMALE_MULTIPLIER,
        Gender::Other | Gender::Unspecified => 1.0,
    }
}

/// Daily step goal for a validated input.
#[must_use]
pub fn calculate_steps_goal(input: &CalculationInput) -> u32 {
    let raw = steps::BASE_DAILY_STEPS * age_adjustment(input.age()) * gender_adjustment(input.gender());
    raw.clamp(
        f64::from(steps::MIN_STEPS_GOAL),
        f64::from(steps::MAX_STEPS_GOAL),
    )
    .round() as u32
}

/// Diagnostic projection of the step goal arithmetic.
#[must_use]
pub fn steps_breakdown(input: &CalculationInput) -> StepsBreakdown {
    let age_adjustment = age_adjustment(input.age());
    let gender_adjustment = gender_adjustment(input.gender());
    let raw_goal = steps::BASE_DAILY_STEPS * age_adjustment * gender_adjustment;
    StepsBreakdown {
        base_steps: steps::BASE_DAILY_STEPS,
        age_adjustment,
        gender_adjustment,
        raw_goal,
        goal: calculate_steps_goal(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityLevel;

    fn input(age: u32, gender: Gender) -> CalculationInput {
        CalculationInput::new_unchecked(age, gender, 175.0, 70.0, ActivityLevel::LightlyActive)
    }

    #[test]
    fn adult_male_gets_documented_scenario_value() {
        // 10000 x 1.0 x 1.05
        assert_eq!(calculate_steps_goal(&input(30, Gender::Male)), 10_500);
    }

    #[test]
    fn age_tiers_apply() {
        assert_eq!(calculate_steps_goal(&input(16, Gender::Unspecified)), 12_000);
        assert_eq!(calculate_steps_goal(&input(30, Gender::Unspecified)), 10_000);
        assert_eq!(calculate_steps_goal(&input(75, Gender::Unspecified)), 8_000);
    }

    #[test]
    fn tier_boundaries() {
        // 18 is adult, 65 is older adult
        assert_eq!(calculate_steps_goal(&input(17, Gender::Other)), 12_000);
        assert_eq!(calculate_steps_goal(&input(18, Gender::Other)), 10_000);
        assert_eq!(calculate_steps_goal(&input(64, Gender::Other)), 10_000);
        assert_eq!(calculate_steps_goal(&input(65, Gender::Other)), 8_000);
    }

    #[test]
    fn breakdown_matches_goal() {
        let i = input(16, Gender::Female);
        let b = steps_breakdown(&i);
        assert_eq!(b.goal, calculate_steps_goal(&i));
        assert!((b.raw_goal - 10_000.0 * 1.2 * 0.95).abs() < 1e-9);
    }
}
