// ABOUTME: Input adapter converting raw profiles into validated calculation input
// ABOUTME: Absence is the only error signal - out-of-range data never constructs an input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! Input adapter.
//!
//! Produces a [`CalculationInput`] iff the profile carries a derivable age
//! in [13, 120], a height in [100, 250] cm, a weight in [30, 300] kg, and
//! a gender. Activity level defaults to lightly active when unset - the
//! WHO population default for sedentary-leaning urban adults. There is no
//! error type here: `None` is the signal the orchestrator routes to
//! fallback.

use crate::constants::input;
use crate::models::{ActivityLevel, CalculationInput, UserProfile};
use chrono::NaiveDate;
use tracing::debug;

/// Adapt a raw profile into validated calculation input as of `today`.
///
/// Returns `None` when any required field is missing or out of range.
#[must_use]
pub fn adapt_profile(profile: &UserProfile, today: NaiveDate) -> Option<CalculationInput> {
    let Some(age) = profile.age_on(today) else {
        debug!(user_id = %profile.user_id, "profile rejected: no derivable age");
        return None;
    };
    if !(input::MIN_AGE..=input::MAX_AGE).contains(&age) {
        debug!(user_id = %profile.user_id, age, "profile rejected: age out of range");
        return None;
    }

    let Some(gender) = profile.gender else {
        debug!(user_id = %profile.user_id, "profile rejected: gender missing");
        return None;
    };

    let Some(height_cm) = profile.height_cm else {
        debug!(user_id = %profile.user_id, "profile rejected: height missing");
        return None;
    };
    if !(input::MIN_HEIGHT_CM..=input::MAX_HEIGHT_CM).contains(&height_cm) {
        debug!(user_id = %profile.user_id, height_cm, "profile rejected: height out of range");
        return None;
    }

    let Some(weight_kg) = profile.weight_kg else {
        debug!(user_id = %profile.user_id, "profile rejected: weight missing");
        return None;
    };
    if !(input::MIN_WEIGHT_KG..=input::MAX_WEIGHT_KG).contains(&weight_kg) {
        debug!(user_id = %profile.user_id, weight_kg, "profile rejected: weight out of range");
        return None;
    }

    // WHO population default for urban adults who report nothing
    let activity_level = profile.activity_level.unwrap_or(ActivityLevel::LightlyActive);

    Some(CalculationInput::new_unchecked(
        age,
        gender,
        height_cm,
        weight_kg,
        activity_level,
    ))
}
