//! Application state for the HTTP server.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::scheduler::PlannerSession;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// The single planning session for this process.
    ///
    /// The lock is only held for synchronous work; handlers finish their
    /// repository awaits before taking it.
    pub planner: Arc<RwLock<PlannerSession>>,
}

impl AppState {
    /// Create a new application state with the given repository and a fresh
    /// planner session.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            planner: Arc::new(RwLock::new(PlannerSession::new())),
        }
    }
}
