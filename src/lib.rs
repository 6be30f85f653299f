// ABOUTME: Main library entry point for the Strive daily wellness goal engine
// ABOUTME: Computes personalized WHO-based step, calorie, and heart point targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

#![deny(unsafe_code)]

//! # Strive Goal Engine
//!
//! Daily wellness goal calculation for the Strive mobile application.
//! Converts a user's physiological profile into three personalized daily
//! targets - steps, calories, and heart points - using WHO-based formulas
//! with safety bounds, fallback generation, debounced recalculation
//! triggers, and retry-protected persistence.
//!
//! ## Architecture
//!
//! The engine is a library-level subsystem invoked in-process:
//! - **Calculators**: pure, stateless WHO-based metric formulas
//! - **Orchestrator**: validation -> calculation -> result validation, with
//!   fallback substitution on any failure
//! - **Services**: retry-wrapped calculation, debounced recalculation
//!   triggers, and per-user profile update coordination
//! - **Storage**: async trait boundary to the profile and goal backends
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use strive_goal_engine::config::EngineConfig;
//! use strive_goal_engine::engine::WellnessEngine;
//! use strive_goal_engine::storage::memory::{InMemoryGoalStore, InMemoryProfileStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = WellnessEngine::new(
//!         EngineConfig::default(),
//!         Arc::new(InMemoryProfileStore::new()),
//!         Arc::new(InMemoryGoalStore::new()),
//!     );
//!     let user_id = uuid::Uuid::new_v4();
//!     if let Ok(outcome) = engine.calculate_daily_goals(user_id).await {
//!         println!("steps goal: {}", outcome.goals.steps_goal);
//!     }
//! }
//! ```

/// WHO-based metric calculators, input adapter, and fallback generation
pub mod calculators;

/// Engine configuration with documented defaults
pub mod config;

/// Physiological constants and safety bounds
pub mod constants;

/// Composition root assembling the engine once at startup
pub mod engine;

/// Typed error taxonomy for goal calculation operations
pub mod errors;

/// Structured logging setup for embedding processes
pub mod logging;

/// Core data model: profiles, calculation input, daily goals
pub mod models;

/// Calculation orchestration state machine with fallback routing
pub mod orchestrator;

/// Calculation, recalculation trigger, and profile update services
pub mod services;

/// Async store boundary traits and in-memory reference implementations
pub mod storage;
