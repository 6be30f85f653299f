// ABOUTME: Async store boundary traits for the profile and goal backends
// ABOUTME: The engine's only boundary to excluded collaborators (Room/Firestore plumbing)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! # Store Boundary
//!
//! The engine treats persistence as a black box behind these traits. All
//! methods may suspend (I/O-bound); the calculation service wraps the
//! failure-prone calls in retry with exponential backoff.

use crate::models::{DailyGoals, UserProfile};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod memory;

/// Profile persistence boundary
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a user's profile, `None` when the user has none yet.
    ///
    /// # Errors
    ///
    /// Returns an error on backend I/O failure.
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>>;

    /// Persist a profile, returning the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error on backend I/O failure.
    async fn save_profile(&self, profile: &UserProfile) -> Result<UserProfile>;
}

/// Goal persistence and sync boundary
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Currently persisted goals for a user, if any.
    ///
    /// # Errors
    ///
    /// Returns an error on backend I/O failure.
    async fn current_goals(&self, user_id: Uuid) -> Result<Option<DailyGoals>>;

    /// Persist goals and sync them to the backend, returning the stored
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error on backend I/O failure.
    async fn save_and_sync_goals(&self, goals: &DailyGoals) -> Result<DailyGoals>;

    /// When goals were last calculated for a user, if ever.
    ///
    /// # Errors
    ///
    /// Returns an error on backend I/O failure.
    async fn last_calculation_time(&self, user_id: Uuid) -> Result<Option<DateTime<Utc>>>;
}
