// ABOUTME: WHO-based metric calculators with on-demand diagnostic breakdowns
// ABOUTME: Pure, stateless functions - identical input always yields identical output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! # Metric Calculators
//!
//! Three independent, stateless, pure functions - steps, calories, heart
//! points - each applying a baseline formula plus age/gender/activity
//! adjustments and clamping to safety bounds. Safe to call concurrently
//! for different users or the same user without synchronization.
//!
//! Breakdowns are read-only projections of the intermediate arithmetic,
//! computed on demand for user-facing transparency. They are never
//! persisted.

use crate::models::CalculationInput;
use serde::Serialize;

pub mod calories;
pub mod fallback;
pub mod heart_points;
pub mod input;
pub mod steps;

pub use calories::calculate_calories_goal;
pub use fallback::FallbackGenerator;
pub use heart_points::calculate_heart_points_goal;
pub use input::adapt_profile;
pub use steps::calculate_steps_goal;

/// Intermediate arithmetic behind a step goal
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StepsBreakdown {
    /// Population baseline the adjustments apply to
    pub base_steps: f64,
    /// Age tier multiplier
    pub age_adjustment: f64,
    /// Gender multiplier
    pub gender_adjustment: f64,
    /// Product before clamping
    pub raw_goal: f64,
    /// Final clamped goal
    pub goal: u32,
}

/// Intermediate arithmetic behind a calorie goal
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CaloriesBreakdown {
    /// Basal metabolic rate in kcal/day
    pub bmr: f64,
    /// TDEE activity factor
    pub activity_factor: f64,
    /// BMR x activity factor before clamping
    pub raw_tdee: f64,
    /// Final clamped goal
    pub goal: u32,
    /// Which BMR formula was selected
    pub formula: &'static str,
}

/// Intermediate arithmetic behind a heart point goal
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HeartPointsBreakdown {
    /// WHO weekly moderate minutes spread across the week
    pub daily_moderate_minutes: f64,
    /// Age tier multiplier
    pub age_adjustment: f64,
    /// Activity level multiplier
    pub activity_adjustment: f64,
    /// Product before clamping
    pub raw_goal: f64,
    /// Final clamped goal
    pub goal: u32,
}

/// Complete diagnostic projection of one calculation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CalculationBreakdown {
    /// Step goal arithmetic
    pub steps: StepsBreakdown,
    /// Calorie goal arithmetic
    pub calories: CaloriesBreakdown,
    /// Heart point goal arithmetic
    pub heart_points: HeartPointsBreakdown,
}

impl CalculationBreakdown {
    /// Compute the full breakdown for a validated input.
    #[must_use]
    pub fn for_input(input: &CalculationInput) -> Self {
        Self {
            steps: steps::steps_breakdown(input),
            calories: calories::calories_breakdown(input),
            heart_points: heart_points::heart_points_breakdown(input),
        }
    }
}
