// ABOUTME: Property and scenario tests for the three WHO-based metric calculators
// ABOUTME: Bounds over the input space, determinism, age monotonicity, gender ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{init_test_logging, input_for};
use strive_goal_engine::calculators::{
    calculate_calories_goal, calculate_heart_points_goal, calculate_steps_goal,
    CalculationBreakdown,
};
use strive_goal_engine::models::{ActivityLevel, Gender};

const ALL_GENDERS: [Gender; 4] = [
    Gender::Male,
    Gender::Female,
    Gender::Other,
    Gender::Unspecified,
];

const ALL_LEVELS: [ActivityLevel; 5] = [
    ActivityLevel::Sedentary,
    ActivityLevel::LightlyActive,
    ActivityLevel::ModeratelyActive,
    ActivityLevel::VeryActive,
    ActivityLevel::ExtraActive,
];

#[test]
fn every_goal_stays_within_bounds_across_the_input_space() {
    init_test_logging();
    for age in [13, 16, 17, 18, 30, 64, 65, 80, 119] {
        for gender in ALL_GENDERS {
            for level in ALL_LEVELS {
                for (height, weight) in [(100.0, 30.0), (175.0, 70.0), (250.0, 300.0)] {
                    let input = input_for(age, gender, height, weight, level);
                    let steps = calculate_steps_goal(&input);
                    let calories = calculate_calories_goal(&input);
                    let heart_points = calculate_heart_points_goal(&input);
                    assert!(
                        (5_000..=20_000).contains(&steps),
                        "steps {steps} out of bounds for age={age} {gender:?} {level:?}"
                    );
                    assert!(
                        (1_200..=4_000).contains(&calories),
                        "calories {calories} out of bounds for age={age} {gender:?} {level:?} h={height} w={weight}"
                    );
                    assert!(
                        (15..=50).contains(&heart_points),
                        "heart points {heart_points} out of bounds for age={age} {gender:?} {level:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn calculators_are_deterministic() {
    let input = input_for(30, Gender::Female, 165.0, 60.0, ActivityLevel::ModeratelyActive);
    for _ in 0..10 {
        assert_eq!(calculate_steps_goal(&input), calculate_steps_goal(&input));
        assert_eq!(calculate_calories_goal(&input), calculate_calories_goal(&input));
        assert_eq!(
            calculate_heart_points_goal(&input),
            calculate_heart_points_goal(&input)
        );
    }
}

#[test]
fn age_tiers_are_monotonic_for_fixed_biometrics() {
    for gender in ALL_GENDERS {
        let youth = input_for(16, gender, 175.0, 70.0, ActivityLevel::LightlyActive);
        let adult = input_for(30, gender, 175.0, 70.0, ActivityLevel::LightlyActive);
        let older = input_for(75, gender, 175.0, 70.0, ActivityLevel::LightlyActive);

        assert!(calculate_steps_goal(&youth) > calculate_steps_goal(&adult));
        assert!(calculate_steps_goal(&adult) > calculate_steps_goal(&older));

        assert!(calculate_calories_goal(&youth) > calculate_calories_goal(&adult));
        assert!(calculate_calories_goal(&adult) > calculate_calories_goal(&older));
    }
}

#[test]
fn male_calorie_goal_exceeds_female_at_same_biometrics() {
    for level in ALL_LEVELS {
        let male = input_for(30, Gender::Male, 175.0, 70.0, level);
        let female = input_for(30, Gender::Female, 175.0, 70.0, level);
        let male_goal = calculate_calories_goal(&male);
        let female_goal = calculate_calories_goal(&female);
        assert!(
            male_goal > female_goal,
            "Harris-Benedict asymmetry violated at {level:?}: {male_goal} <= {female_goal}"
        );
        assert!((1_200..=4_000).contains(&male_goal));
        assert!((1_200..=4_000).contains(&female_goal));
    }
}

#[test]
fn documented_adult_male_scenario() {
    let input = input_for(30, Gender::Male, 175.0, 70.0, ActivityLevel::LightlyActive);

    // 10000 x 1.0 x 1.05
    assert_eq!(calculate_steps_goal(&input), 10_500);

    // Harris-Benedict: 88.362 + 13.397*70 + 4.799*175 - 5.677*30 = 1695.667
    // x 1.375 = 2331.54
    assert_eq!(calculate_calories_goal(&input), 2_332);

    // (150/7) x 1.0 x 0.95 = 20.36
    assert_eq!(calculate_heart_points_goal(&input), 20);
}

#[test]
fn breakdown_exposes_the_intermediate_arithmetic() {
    let input = input_for(30, Gender::Male, 175.0, 70.0, ActivityLevel::LightlyActive);
    let breakdown = CalculationBreakdown::for_input(&input);

    assert!((breakdown.calories.bmr - 1_695.667).abs() < 1e-3);
    assert!((breakdown.calories.activity_factor - 1.375).abs() < f64::EPSILON);
    assert_eq!(breakdown.calories.goal, 2_332);

    assert!((breakdown.steps.base_steps - 10_000.0).abs() < f64::EPSILON);
    assert!((breakdown.steps.gender_adjustment - 1.05).abs() < f64::EPSILON);
    assert_eq!(breakdown.steps.goal, 10_500);

    assert!((breakdown.heart_points.daily_moderate_minutes - 150.0 / 7.0).abs() < 1e-9);
    assert_eq!(breakdown.heart_points.goal, 20);
}
