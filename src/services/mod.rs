//! Service layer for business logic and orchestration.
//!
//! This module contains the services that sit between the repository layer
//! and the HTTP handlers: the mood gate around schedule generation, schedule
//! persistence, dashboard trend computations, and insight generation.

pub mod insights;

pub mod planner;

pub mod schedule_saver;

pub mod trends;

pub use insights::generate_insight;
pub use planner::{build_generated_view, evaluate_mood_gate, MoodGate};
pub use schedule_saver::{persist_weekly_schedule, SaveOutcome};
pub use trends::{build_dashboard, TimeFrame};


#[cfg(test)]
#[path = "trends_tests.rs"]
mod trends_tests;
