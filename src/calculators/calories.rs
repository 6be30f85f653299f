// ABOUTME: Daily calorie goal calculator - gender-specific BMR times TDEE activity factor
// ABOUTME: Harris-Benedict (revised) for male/female, Mifflin-St Jeor neutral otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! Calorie goal calculation.
//!
//! BMR via a gender-specific formula, then
//! `goal = clamp(BMR x activityFactor, 1200, 4000)`.
//!
//! - Male/Female: Harris-Benedict revised (Roza & Shizgal 1984)
//! - Other/Unspecified: Mifflin-St Jeor with the male/female constants
//!   averaged out of the equation - avoids a biological-sex assumption
//!
//! Activity factors follow `McArdle` et al. (2010):
//! 1.2 / 1.375 / 1.55 / 1.725 / 1.9 from sedentary to extra active.

use super::CaloriesBreakdown;
use crate::constants::calories;
use crate::models::{CalculationInput, Gender};

/// Basal metabolic rate in kcal/day for a validated input.
#[must_use]
pub fn basal_metabolic_rate(input: &CalculationInput) -> f64 {
    let age = f64::from(input.age());
    match input.gender() {
        Gender::Male => {
            calories::HB_MALE_BASE + calories::HB_MALE_WEIGHT_COEF * input.weight_kg()
                + calories::HB_MALE_HEIGHT_COEF * input.height_cm()
                - calories::HB_MALE_AGE_COEF * age
        }
        Gender::Female => {
            calories::HB_FEMALE_BASE + calories::HB_FEMALE_WEIGHT_COEF * input.weight_kg()
                + calories::HB_FEMALE_HEIGHT_COEF * input.height_cm()
                - calories::HB_FEMALE_AGE_COEF * age
        }
        Gender::Other | Gender::Unspecified => {
            calories::MSJ_WEIGHT_COEF * input.weight_kg()
                + calories::MSJ_HEIGHT_COEF * input.height_cm()
                - calories::MSJ_AGE_COEF * age
                + calories::MSJ_NEUTRAL_CONSTANT
        }
    }
}

fn formula_name(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Harris-Benedict (male)",
        Gender::Female => "Harris-Benedict (female)",
        Gender::Other | Gender::Unspecified => "Mifflin-St Jeor (neutral)",
    }
}

/// Daily calorie goal for a validated input.
#[must_use]
pub fn calculate_calories_goal(input: &CalculationInput) -> u32 {
    let raw = basal_metabolic_rate(input) * input.activity_level().factor();
    raw.clamp(
        f64::from(calories::MIN_CALORIES_GOAL),
        f64::from(calories::MAX_CALORIES_GOAL),
    )
    .round() as u32
}

/// Diagnostic projection of the calorie goal arithmetic.
#[must_use]
pub fn calories_breakdown(input: &CalculationInput) -> CaloriesBreakdown {
    let bmr = basal_metabolic_rate(input);
    let activity_factor = input.activity_level().factor();
    CaloriesBreakdown {
        bmr,
        activity_factor,
        raw_tdee: bmr * activity_factor,
        goal: calculate_calories_goal(input),
        formula: formula_name(input.gender()),
    }
}
