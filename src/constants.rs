// ABOUTME: Physiological constants and safety bounds for daily goal calculation
// ABOUTME: WHO activity guidelines, Harris-Benedict coefficients, and fallback baselines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! Physiological constants based on public health guidelines
//!
//! These values are taken from peer-reviewed sources and WHO physical
//! activity recommendations. Safety bounds exist so that no computed goal
//! can leave the medically reasonable range regardless of input.

/// Daily step goal parameters
///
/// References:
/// - WHO Global Recommendations on Physical Activity for Health (2010)
/// - Tudor-Locke, C. & Bassett, D.R. (2004). How many steps/day are enough?
///   <https://pubmed.ncbi.nlm.nih.gov/14715035/>
pub mod steps {
    /// Population baseline daily step target
    pub const BASE_DAILY_STEPS: f64 = 10_000.0;

    /// Minimum medically useful daily step goal
    pub const MIN_STEPS_GOAL: u32 = 5_000;

    /// Maximum safe daily step goal
    pub const MAX_STEPS_GOAL: u32 = 20_000;

    /// Multiplier for users under 18 (higher activity capacity)
    pub const YOUTH_MULTIPLIER: f64 = 1.2;

    /// Multiplier for users 65 and over (joint-load reduction)
    pub const OLDER_ADULT_MULTIPLIER: f64 = 0.8;

    /// Male step adjustment (stride/gait population averages)
    pub const MALE_MULTIPLIER: f64 = 1.05;

    /// Female step adjustment
    pub const FEMALE_MULTIPLIER: f64 = 0.95;
}

/// Age tier cut-offs shared by the steps and heart point calculators
pub mod age_tiers {
    /// Below this age the youth adjustment applies
    pub const YOUTH_MAX_AGE: u32 = 18;

    /// At and above this age the older-adult adjustment applies
    pub const OLDER_ADULT_MIN_AGE: u32 = 65;
}

/// Daily calorie goal parameters
///
/// References:
/// - Roza, A.M. & Shizgal, H.M. (1984). The Harris Benedict equation
///   reevaluated. <https://doi.org/10.1093/ajcn/40.1.168>
/// - Mifflin, M.D., et al. (1990). A new predictive equation for resting
///   energy expenditure. <https://doi.org/10.1093/ajcn/51.2.241>
pub mod calories {
    /// Harris-Benedict (revised) male constant term
    pub const HB_MALE_BASE: f64 = 88.362;
    /// Harris-Benedict male weight coefficient (per kg)
    pub const HB_MALE_WEIGHT_COEF: f64 = 13.397;
    /// Harris-Benedict male height coefficient (per cm)
    pub const HB_MALE_HEIGHT_COEF: f64 = 4.799;
    /// Harris-Benedict male age coefficient (per year, subtracted)
    pub const HB_MALE_AGE_COEF: f64 = 5.677;

    /// Harris-Benedict (revised) female constant term
    pub const HB_FEMALE_BASE: f64 = 447.593;
    /// Harris-Benedict female weight coefficient (per kg)
    pub const HB_FEMALE_WEIGHT_COEF: f64 = 9.247;
    /// Harris-Benedict female height coefficient (per cm)
    pub const HB_FEMALE_HEIGHT_COEF: f64 = 3.098;
    /// Harris-Benedict female age coefficient (per year, subtracted)
    pub const HB_FEMALE_AGE_COEF: f64 = 4.330;

    /// Mifflin-St Jeor weight coefficient (gender-neutral variant)
    pub const MSJ_WEIGHT_COEF: f64 = 10.0;
    /// Mifflin-St Jeor height coefficient
    pub const MSJ_HEIGHT_COEF: f64 = 6.25;
    /// Mifflin-St Jeor age coefficient (subtracted)
    pub const MSJ_AGE_COEF: f64 = 5.0;
    /// Mifflin-St Jeor constant term used for the neutral variant
    pub const MSJ_NEUTRAL_CONSTANT: f64 = 5.0;

    /// Minimum safe daily calorie goal (below this is a medical concern)
    pub const MIN_CALORIES_GOAL: u32 = 1_200;

    /// Maximum daily calorie goal
    pub const MAX_CALORIES_GOAL: u32 = 4_000;
}

/// Daily heart point goal parameters
///
/// References:
/// - WHO Guidelines on Physical Activity and Sedentary Behaviour (2020):
///   150 minutes of moderate-intensity activity per week
///   <https://www.who.int/publications/i/item/9789240015128>
pub mod heart_points {
    /// WHO recommended moderate-intensity minutes per week
    pub const WHO_WEEKLY_MODERATE_MINUTES: f64 = 150.0;

    /// Heart points earned per moderate-intensity minute
    pub const POINTS_PER_MODERATE_MINUTE: f64 = 1.0;

    /// Minimum daily heart point goal
    pub const MIN_HEART_POINTS_GOAL: u32 = 15;

    /// Maximum daily heart point goal
    pub const MAX_HEART_POINTS_GOAL: u32 = 50;

    /// Youth adjustment (same tier boundaries as steps)
    pub const YOUTH_MULTIPLIER: f64 = 1.2;

    /// Older-adult adjustment
    pub const OLDER_ADULT_MULTIPLIER: f64 = 0.8;
}

/// Fallback goal baselines and bands
///
/// The fallback generator emits goals strictly inside these bands, a
/// narrower and safer range than the full calculator bounds. Used when the
/// profile is missing, invalid, or calculation fails.
pub mod fallback {
    /// Conservative default step goal (no profile data)
    pub const DEFAULT_STEPS: u32 = 7_500;
    /// Conservative default calorie goal
    pub const DEFAULT_CALORIES: u32 = 1_800;
    /// Conservative default heart point goal
    pub const DEFAULT_HEART_POINTS: u32 = 21;

    /// Fallback step band (inclusive)
    pub const STEPS_BAND: (u32, u32) = (6_000, 9_000);
    /// Fallback calorie band (inclusive)
    pub const CALORIES_BAND: (u32, u32) = (1_400, 2_400);
    /// Fallback heart point band (inclusive)
    pub const HEART_POINTS_BAND: (u32, u32) = (17, 25);

    /// Fallback youth tier multiplier (same direction as the calculators)
    pub const YOUTH_MULTIPLIER: f64 = 1.2;
    /// Fallback older-adult tier multiplier
    pub const OLDER_ADULT_MULTIPLIER: f64 = 0.85;

    /// Minimal male calorie delta applied to the fallback baseline
    pub const MALE_CALORIE_DELTA: f64 = 150.0;
    /// Minimal female calorie delta
    pub const FEMALE_CALORIE_DELTA: f64 = -100.0;

    /// Emergency tier: fixed minimum-safe goals used when even fallback
    /// construction is suspect
    pub const EMERGENCY_STEPS: u32 = 6_000;
    /// Emergency calorie goal
    pub const EMERGENCY_CALORIES: u32 = 1_600;
    /// Emergency heart point goal
    pub const EMERGENCY_HEART_POINTS: u32 = 18;
}

/// Post-calculation domain validation thresholds
pub mod validation {
    /// Plausible calories-per-step ratio, lower bound
    pub const MIN_CALORIES_PER_STEP: f64 = 0.1;

    /// Plausible calories-per-step ratio, upper bound
    pub const MAX_CALORIES_PER_STEP: f64 = 0.5;

    /// A youth step goal below this is implausible for the age tier
    pub const YOUTH_MIN_PLAUSIBLE_STEPS: u32 = 8_000;

    /// An older-adult step goal above this is implausible for the age tier
    pub const OLDER_ADULT_MAX_PLAUSIBLE_STEPS: u32 = 15_000;
}

/// Calculation input acceptance ranges
pub mod input {
    /// Minimum supported age in years
    pub const MIN_AGE: u32 = 13;
    /// Maximum supported age in years
    pub const MAX_AGE: u32 = 120;

    /// Minimum supported height in centimeters
    pub const MIN_HEIGHT_CM: f64 = 100.0;
    /// Maximum supported height in centimeters
    pub const MAX_HEIGHT_CM: f64 = 250.0;

    /// Minimum supported weight in kilograms
    pub const MIN_WEIGHT_KG: f64 = 30.0;
    /// Maximum supported weight in kilograms
    pub const MAX_WEIGHT_KG: f64 = 300.0;
}
