// ABOUTME: Shared test utilities - profile builders and instrumented store wrappers
// ABOUTME: Failure injection and gating helpers for retry and concurrency tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `strive_goal_engine` integration tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use strive_goal_engine::calculators::adapt_profile;
use strive_goal_engine::models::{
    ActivityLevel, CalculationInput, DailyGoals, Gender, UserProfile,
};
use strive_goal_engine::storage::memory::{InMemoryGoalStore, InMemoryProfileStore};
use strive_goal_engine::storage::{GoalStore, ProfileStore};
use tokio::sync::Semaphore;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Birth date yielding `age` whole years as of today
pub fn birth_date_for_age(age: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(Utc::now().date_naive().year() - age, 1, 1)
}

/// Complete profile for an adult male: 30y, 175cm, 70kg, lightly active
pub fn adult_male_profile(user_id: Uuid) -> UserProfile {
    UserProfile {
        user_id,
        birth_date: birth_date_for_age(30),
        gender: Some(Gender::Male),
        height_cm: Some(175.0),
        weight_kg: Some(70.0),
        activity_level: Some(ActivityLevel::LightlyActive),
        updated_at: Utc::now(),
    }
}

/// Complete profile with a specific age and otherwise default biometrics
pub fn profile_aged(user_id: Uuid, age: i32) -> UserProfile {
    UserProfile {
        birth_date: birth_date_for_age(age),
        ..adult_male_profile(user_id)
    }
}

/// Profile missing the fields calculation needs
pub fn incomplete_profile(user_id: Uuid) -> UserProfile {
    UserProfile {
        user_id,
        birth_date: None,
        gender: None,
        height_cm: None,
        weight_kg: None,
        activity_level: None,
        updated_at: Utc::now(),
    }
}

/// Validated calculation input built through the adapter
pub fn input_for(
    age: i32,
    gender: Gender,
    height_cm: f64,
    weight_kg: f64,
    activity_level: ActivityLevel,
) -> CalculationInput {
    let profile = UserProfile {
        user_id: Uuid::new_v4(),
        birth_date: birth_date_for_age(age),
        gender: Some(gender),
        height_cm: Some(height_cm),
        weight_kg: Some(weight_kg),
        activity_level: Some(activity_level),
        updated_at: Utc::now(),
    };
    adapt_profile(&profile, Utc::now().date_naive())
        .unwrap_or_else(|| panic!("profile should adapt: age={age} h={height_cm} w={weight_kg}"))
}

/// Goal store wrapper counting persistence calls
#[derive(Default)]
pub struct CountingGoalStore {
    inner: InMemoryGoalStore,
    saves: AtomicUsize,
}

impl CountingGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GoalStore for CountingGoalStore {
    async fn current_goals(&self, user_id: Uuid) -> Result<Option<DailyGoals>> {
        self.inner.current_goals(user_id).await
    }

    async fn save_and_sync_goals(&self, goals: &DailyGoals) -> Result<DailyGoals> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_and_sync_goals(goals).await
    }

    async fn last_calculation_time(&self, user_id: Uuid) -> Result<Option<DateTime<Utc>>> {
        self.inner.last_calculation_time(user_id).await
    }
}

/// Goal store wrapper failing the first `fail_count` saves, then delegating
pub struct FlakyGoalStore {
    inner: InMemoryGoalStore,
    failures_left: AtomicU32,
    attempts: AtomicUsize,
}

impl FlakyGoalStore {
    pub fn failing(fail_count: u32) -> Self {
        Self {
            inner: InMemoryGoalStore::new(),
            failures_left: AtomicU32::new(fail_count),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GoalStore for FlakyGoalStore {
    async fn current_goals(&self, user_id: Uuid) -> Result<Option<DailyGoals>> {
        self.inner.current_goals(user_id).await
    }

    async fn save_and_sync_goals(&self, goals: &DailyGoals) -> Result<DailyGoals> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures_left.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_left.store(remaining - 1, Ordering::SeqCst);
            anyhow::bail!("injected transient goal store failure ({remaining} left)");
        }
        self.inner.save_and_sync_goals(goals).await
    }

    async fn last_calculation_time(&self, user_id: Uuid) -> Result<Option<DateTime<Utc>>> {
        self.inner.last_calculation_time(user_id).await
    }
}

/// Profile store whose saves always fail
#[derive(Default)]
pub struct FailingProfileStore {
    inner: InMemoryProfileStore,
}

impl FailingProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for FailingProfileStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        self.inner.get_profile(user_id).await
    }

    async fn save_profile(&self, _profile: &UserProfile) -> Result<UserProfile> {
        anyhow::bail!("injected profile save failure")
    }
}

/// Profile store that parks inside `save_profile` until released, so a
/// test can hold a user's update in flight deterministically
pub struct GatedProfileStore {
    inner: InMemoryProfileStore,
    entered: Semaphore,
    release: Semaphore,
}

impl GatedProfileStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryProfileStore::new(),
            entered: Semaphore::new(0),
            release: Semaphore::new(0),
        }
    }

    /// Wait until a save has entered the gate.
    pub async fn wait_entered(&self) {
        self.entered.acquire().await.unwrap().forget();
    }

    /// Let one parked save proceed.
    pub fn release_one(&self) {
        self.release.add_permits(1);
    }
}

impl Default for GatedProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for GatedProfileStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        self.inner.get_profile(user_id).await
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<UserProfile> {
        self.entered.add_permits(1);
        self.release.acquire().await?.forget();
        self.inner.save_profile(profile).await
    }
}
