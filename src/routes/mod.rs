pub mod dashboard;
pub mod records;
pub mod schedule;
pub mod trackers;
