// ABOUTME: Core data model for the wellness goal engine
// ABOUTME: Profiles, validated calculation input, daily goals, and change detection types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! Core data structures shared across the engine.
//!
//! [`DailyGoals`] enforces its safety bounds at construction: a value that
//! violates them cannot exist. Goals are superseded, never mutated - each
//! recalculation produces a new instance with a fresh timestamp, and
//! freshness is derived from that timestamp rather than stored as a flag.

use crate::constants::{calories, heart_points, input, steps};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gender as self-reported in the user's profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Male (Harris-Benedict male formula)
    Male,
    /// Female (Harris-Benedict female formula)
    Female,
    /// Other (gender-neutral formulas, no biological assumption)
    Other,
    /// Not specified (treated as neutral)
    Unspecified,
}

/// Self-reported activity level with its TDEE multiplier
///
/// Factors follow `McArdle` et al. (2010), Exercise Physiology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityLevel {
    /// Little or no exercise: 1.2
    Sedentary,
    /// Light exercise 1-3 days/week: 1.375
    LightlyActive,
    /// Moderate exercise 3-5 days/week: 1.55
    ModeratelyActive,
    /// Hard exercise 6-7 days/week: 1.725
    VeryActive,
    /// Hard daily training: 1.9
    ExtraActive,
}

impl ActivityLevel {
    /// TDEE activity factor for the calorie calculator
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::ExtraActive => 1.9,
        }
    }
}

/// Raw user profile as stored by the profile backend. Unvalidated; the
/// input adapter decides whether it supports goal calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owning user
    pub user_id: Uuid,
    /// Date of birth, if provided
    pub birth_date: Option<NaiveDate>,
    /// Self-reported gender, if provided
    pub gender: Option<Gender>,
    /// Height in centimeters, if provided
    pub height_cm: Option<f64>,
    /// Weight in kilograms, if provided
    pub weight_kg: Option<f64>,
    /// Self-reported activity level, if provided
    pub activity_level: Option<ActivityLevel>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Age in whole years on `today`, if a birth date is present and not
    /// in the future.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.birth_date.and_then(|birth| today.years_since(birth))
    }
}

/// Validated input to the metric calculators.
///
/// Constructible only through the input adapter; every accessor returns a
/// value already checked against the acceptance ranges in
/// [`crate::constants::input`]. Invalid input cannot exist here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationInput {
    age: u32,
    gender: Gender,
    height_cm: f64,
    weight_kg: f64,
    activity_level: ActivityLevel,
}

impl CalculationInput {
    /// Invariant: callers have verified every range. Only the input
    /// adapter constructs this type.
    pub(crate) fn new_unchecked(
        age: u32,
        gender: Gender,
        height_cm: f64,
        weight_kg: f64,
        activity_level: ActivityLevel,
    ) -> Self {
        debug_assert!((input::MIN_AGE..=input::MAX_AGE).contains(&age));
        debug_assert!((input::MIN_HEIGHT_CM..=input::MAX_HEIGHT_CM).contains(&height_cm));
        debug_assert!((input::MIN_WEIGHT_KG..=input::MAX_WEIGHT_KG).contains(&weight_kg));
        Self {
            age,
            gender,
            height_cm,
            weight_kg,
            activity_level,
        }
    }

    /// Age in whole years, within [13, 120]
    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Gender used for formula selection
    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Height in centimeters, within [100, 250]
    #[must_use]
    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Weight in kilograms, within [30, 300]
    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Activity level (defaulted to light when the profile omits it)
    #[must_use]
    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }
}

/// How a set of daily goals was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationSource {
    /// Computed from the profile via the WHO-based formulas
    WhoStandard,
    /// Medically safe defaults substituted by the fallback generator
    FallbackDefault,
    /// Manually adjusted by the user
    UserAdjusted,
}

/// Personalized daily wellness targets.
///
/// All three goals are always within their safety bounds - enforced at
/// construction, never trusted from upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoals {
    /// Owning user
    pub user_id: Uuid,
    /// Daily step target, within [5000, 20000]
    pub steps_goal: u32,
    /// Daily calorie target, within [1200, 4000]
    pub calories_goal: u32,
    /// Daily heart point target, within [15, 50]
    pub heart_points_goal: u32,
    /// When these goals were calculated
    pub calculated_at: DateTime<Utc>,
    /// How these goals were produced
    pub source: CalculationSource,
}

impl DailyGoals {
    /// Construct goals, rejecting any value outside its safety bounds.
    ///
    /// # Errors
    ///
    /// Returns the list of bounds violations when any goal is out of range.
    pub fn new(
        user_id: Uuid,
        steps_goal: u32,
        calories_goal: u32,
        heart_points_goal: u32,
        calculated_at: DateTime<Utc>,
        source: CalculationSource,
    ) -> Result<Self, Vec<String>> {
        let candidate = Self {
            user_id,
            steps_goal,
            calories_goal,
            heart_points_goal,
            calculated_at,
            source,
        };
        let issues = candidate.bounds_issues();
        if issues.is_empty() {
            Ok(candidate)
        } else {
            Err(issues)
        }
    }

    /// Construct goals with each value clamped into its safety bounds.
    /// Total: cannot fail. Used by the fallback generator.
    #[must_use]
    pub fn clamped(
        user_id: Uuid,
        steps_goal: u32,
        calories_goal: u32,
        heart_points_goal: u32,
        calculated_at: DateTime<Utc>,
        source: CalculationSource,
    ) -> Self {
        Self {
            user_id,
            steps_goal: steps_goal.clamp(steps::MIN_STEPS_GOAL, steps::MAX_STEPS_GOAL),
            calories_goal: calories_goal.clamp(calories::MIN_CALORIES_GOAL, calories::MAX_CALORIES_GOAL),
            heart_points_goal: heart_points_goal
                .clamp(heart_points::MIN_HEART_POINTS_GOAL, heart_points::MAX_HEART_POINTS_GOAL),
            calculated_at,
            source,
        }
    }

    /// Bounds violations for the current values, empty when valid
    #[must_use]
    pub fn bounds_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !(steps::MIN_STEPS_GOAL..=steps::MAX_STEPS_GOAL).contains(&self.steps_goal) {
            issues.push(format!(
                "steps goal {} outside [{}, {}]",
                self.steps_goal,
                steps::MIN_STEPS_GOAL,
                steps::MAX_STEPS_GOAL
            ));
        }
        if !(calories::MIN_CALORIES_GOAL..=calories::MAX_CALORIES_GOAL).contains(&self.calories_goal) {
            issues.push(format!(
                "calories goal {} outside [{}, {}]",
                self.calories_goal,
                calories::MIN_CALORIES_GOAL,
                calories::MAX_CALORIES_GOAL
            ));
        }
        if !(heart_points::MIN_HEART_POINTS_GOAL..=heart_points::MAX_HEART_POINTS_GOAL)
            .contains(&self.heart_points_goal)
        {
            issues.push(format!(
                "heart points goal {} outside [{}, {}]",
                self.heart_points_goal,
                heart_points::MIN_HEART_POINTS_GOAL,
                heart_points::MAX_HEART_POINTS_GOAL
            ));
        }
        issues
    }

    /// Whether every goal is within its safety bounds
    #[must_use]
    pub fn within_bounds(&self) -> bool {
        self.bounds_issues().is_empty()
    }

    /// Whether these goals came from the fallback generator
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == CalculationSource::FallbackDefault
    }

    /// Whether the goals are younger than `max_age` as of `now`.
    /// Freshness is derived, not stored.
    #[must_use]
    pub fn is_fresh_within(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now.signed_duration_since(self.calculated_at) < max_age
    }

    /// A superseding copy with a refreshed calculation timestamp.
    /// Goals are never mutated in place.
    #[must_use]
    pub fn refreshed_at(&self, now: DateTime<Utc>) -> Self {
        Self {
            calculated_at: now,
            ..self.clone()
        }
    }
}

/// A single profile field, for change detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileField {
    /// Date of birth
    BirthDate,
    /// Self-reported gender
    Gender,
    /// Height in centimeters
    HeightCm,
    /// Weight in kilograms
    WeightKg,
    /// Self-reported activity level
    ActivityLevel,
}

impl ProfileField {
    /// Whether a change to this field alone warrants goal recalculation
    #[must_use]
    pub fn is_goal_affecting(self) -> bool {
        match self {
            Self::BirthDate | Self::Gender | Self::HeightCm | Self::WeightKg => true,
            Self::ActivityLevel => false,
        }
    }
}

/// Ephemeral result of comparing two profile snapshots. Produced and
/// consumed within a single update operation; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChangeDetection {
    /// Fields whose values differ between the snapshots
    pub changed_fields: Vec<ProfileField>,
    /// Whether calculation validity flipped between the snapshots
    pub validity_changed: bool,
    /// Whether there was no previous snapshot
    pub is_new_profile: bool,
}

impl ProfileChangeDetection {
    /// Compare two profile snapshots as of `today`.
    #[must_use]
    pub fn detect(before: Option<&UserProfile>, after: &UserProfile, today: NaiveDate) -> Self {
        let valid_after = crate::calculators::input::adapt_profile(after, today).is_some();
        let Some(before) = before else {
            return Self {
                changed_fields: Vec::new(),
                validity_changed: valid_after,
                is_new_profile: true,
            };
        };

        let mut changed_fields = Vec::new();
        if before.birth_date != after.birth_date {
            changed_fields.push(ProfileField::BirthDate);
        }
        if before.gender != after.gender {
            changed_fields.push(ProfileField::Gender);
        }
        if option_f64_changed(before.height_cm, after.height_cm) {
            changed_fields.push(ProfileField::HeightCm);
        }
        if option_f64_changed(before.weight_kg, after.weight_kg) {
            changed_fields.push(ProfileField::WeightKg);
        }
        if before.activity_level != after.activity_level {
            changed_fields.push(ProfileField::ActivityLevel);
        }

        let valid_before = crate::calculators::input::adapt_profile(before, today).is_some();

        Self {
            changed_fields,
            validity_changed: valid_before != valid_after,
            is_new_profile: false,
        }
    }

    /// Whether any changed field warrants recalculation
    #[must_use]
    pub fn is_goal_affecting(&self) -> bool {
        self.changed_fields.iter().any(|f| f.is_goal_affecting())
    }

    /// Whether this update should schedule a recalculation at all
    #[must_use]
    pub fn warrants_recalculation(&self) -> bool {
        self.is_new_profile || self.validity_changed || self.is_goal_affecting()
    }
}

fn option_f64_changed(before: Option<f64>, after: Option<f64>) -> bool {
    match (before, after) {
        (Some(b), Some(a)) => (b - a).abs() > f64::EPSILON,
        (None, None) => false,
        _ => true,
    }
}

/// Why a recalculation was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerReason {
    /// First profile snapshot for the user
    ProfileCreated,
    /// A goal-affecting field changed
    GoalAffectingChange,
    /// The profile became valid or invalid for calculation
    ValidityChanged,
    /// Debounce bypassed by an explicit force request
    Forced,
    /// Recorded by the profile update orchestration (dual bookkeeping)
    UpdateCascade,
}

/// Append-only diagnostic entry kept in the trigger service's bounded
/// history buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationTriggerEvent {
    /// User the trigger applies to
    pub user_id: Uuid,
    /// Why the recalculation was triggered
    pub reason: TriggerReason,
    /// When the trigger fired
    pub occurred_at: DateTime<Utc>,
    /// Structured diagnostic detail
    pub detail: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals(steps_goal: u32, calories_goal: u32, heart_points_goal: u32) -> Result<DailyGoals, Vec<String>> {
        DailyGoals::new(
            Uuid::new_v4(),
            steps_goal,
            calories_goal,
            heart_points_goal,
            Utc::now(),
            CalculationSource::WhoStandard,
        )
    }

    #[test]
    fn goals_within_bounds_construct() {
        assert!(goals(10_000, 2_000, 30).is_ok());
        assert!(goals(5_000, 1_200, 15).is_ok());
        assert!(goals(20_000, 4_000, 50).is_ok());
    }

    #[test]
    fn goals_outside_bounds_rejected() {
        assert_eq!(goals(4_999, 2_000, 30).unwrap_err().len(), 1);
        assert_eq!(goals(4_999, 5_000, 51).unwrap_err().len(), 3);
    }

    #[test]
    fn clamped_construction_is_total() {
        let g = DailyGoals::clamped(
            Uuid::new_v4(),
            0,
            10_000,
            200,
            Utc::now(),
            CalculationSource::FallbackDefault,
        );
        assert!(g.within_bounds());
        assert_eq!(g.steps_goal, 5_000);
        assert_eq!(g.calories_goal, 4_000);
        assert_eq!(g.heart_points_goal, 50);
    }

    #[test]
    fn freshness_is_derived_from_timestamp() {
        let now = Utc::now();
        let g = DailyGoals::clamped(
            Uuid::new_v4(),
            7_500,
            1_800,
            21,
            now - Duration::hours(25),
            CalculationSource::WhoStandard,
        );
        assert!(!g.is_fresh_within(now, Duration::hours(24)));
        let refreshed = g.refreshed_at(now);
        assert!(refreshed.is_fresh_within(now, Duration::hours(24)));
        // the original is untouched
        assert!(!g.is_fresh_within(now, Duration::hours(24)));
    }

    #[test]
    fn activity_level_change_alone_is_not_goal_affecting() {
        assert!(!ProfileField::ActivityLevel.is_goal_affecting());
        assert!(ProfileField::WeightKg.is_goal_affecting());
    }
}
