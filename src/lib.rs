//! # Smart Study Companion Backend
//!
//! Rust backend for the Smart Study Companion, a personal study-planning
//! dashboard. The crate generates weekly study schedules from subject
//! difficulties, tracks mood and habits, and serves trend analytics for the
//! dashboard. The backend exposes a REST API via Axum for the frontend.
//!
//! ## Features
//!
//! - **Schedule Generation**: Randomized proportional allocation of study
//!   hours across the week, driven by subject difficulty weights
//! - **Daily Trackers**: Mood logging (1-10 scale with emoji mapping) and
//!   per-day habit completion
//! - **Dashboard Analytics**: Study-time breakdowns, mood trends, habit
//!   completion counts, and canned motivational insights
//! - **Records**: Row-level listing, editing, and deletion of all logged data
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: Domain value types (weekday handling, mood scale)
//! - [`scheduler`]: The weekly schedule allocator and planner session
//! - [`db`]: Database operations, repository pattern, and persistence layer
//! - [`services`]: High-level business logic and analytics services
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types
//!

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod scheduler;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
