// ABOUTME: In-memory store implementations backed by sharded concurrent maps
// ABOUTME: Reference backends for tests and embedders without a persistence layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! In-memory reference stores.
//!
//! `DashMap` gives lock-free reads and sharded writes, so concurrent
//! operations for different users never contend on a global lock.

use super::{GoalStore, ProfileStore};
use crate::models::{DailyGoals, UserProfile};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// In-memory profile store
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: DashMap<Uuid, UserProfile>,
}

impl InMemoryProfileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        Ok(self.profiles.get(&user_id).map(|p| p.clone()))
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<UserProfile> {
        self.profiles.insert(profile.user_id, profile.clone());
        Ok(profile.clone())
    }
}

/// In-memory goal store
#[derive(Debug, Default)]
pub struct InMemoryGoalStore {
    goals: DashMap<Uuid, DailyGoals>,
}

impl InMemoryGoalStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with stored goals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

#[async_trait]
impl GoalStore for InMemoryGoalStore {
    async fn current_goals(&self, user_id: Uuid) -> Result<Option<DailyGoals>> {
        Ok(self.goals.get(&user_id).map(|g| g.clone()))
    }

    async fn save_and_sync_goals(&self, goals: &DailyGoals) -> Result<DailyGoals> {
        self.goals.insert(goals.user_id, goals.clone());
        Ok(goals.clone())
    }

    async fn last_calculation_time(&self, user_id: Uuid) -> Result<Option<DateTime<Utc>>> {
        Ok(self.goals.get(&user_id).map(|g| g.calculated_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CalculationSource;

    #[tokio::test]
    async fn profile_round_trip() {
        let store = InMemoryProfileStore::new();
        let profile = UserProfile {
            user_id: Uuid::new_v4(),
            birth_date: None,
            gender: None,
            height_cm: None,
            weight_kg: None,
            activity_level: None,
            updated_at: Utc::now(),
        };
        assert!(store.get_profile(profile.user_id).await.unwrap().is_none());
        store.save_profile(&profile).await.unwrap();
        assert_eq!(store.get_profile(profile.user_id).await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn goals_round_trip_with_calculation_time() {
        let store = InMemoryGoalStore::new();
        let goals = DailyGoals::clamped(
            Uuid::new_v4(),
            7_500,
            1_800,
            21,
            Utc::now(),
            CalculationSource::FallbackDefault,
        );
        store.save_and_sync_goals(&goals).await.unwrap();
        assert_eq!(store.current_goals(goals.user_id).await.unwrap(), Some(goals.clone()));
        assert_eq!(
            store.last_calculation_time(goals.user_id).await.unwrap(),
            Some(goals.calculated_at)
        );
    }
}
