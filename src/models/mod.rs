pub mod mood;
pub mod week;

pub use mood::*;
pub use week::*;

#[cfg(test)]
#[path = "week_tests.rs"]
mod week_tests;
