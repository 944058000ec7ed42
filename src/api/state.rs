//! Application state for the Shift Allocation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::session::PlanningSession;

/// Shared application state.
///
/// Holds the loaded facility configuration and the open planning sessions,
/// keyed by session id.
#[derive(Clone)]
pub struct AppState {
    /// The loaded facility configuration.
    config: Arc<ConfigLoader>,
    /// Open planning sessions.
    sessions: Arc<RwLock<HashMap<Uuid, PlanningSession>>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Stores a session and returns its id.
    pub async fn insert_session(&self, session: PlanningSession) -> Uuid {
        let id = session.id();
        self.sessions.write().await.insert(id, session);
        id
    }

    /// Runs `f` against a session under the read lock.
    pub async fn read_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&PlanningSession) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&id).ok_or(EngineError::SessionNotFound { id })?;
        f(session)
    }

    /// Runs `f` against a session under the write lock.
    pub async fn update_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut PlanningSession) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(EngineError::SessionNotFound { id })?;
        f(session)
    }

    /// Number of open sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoleCatalog;
    use chrono::NaiveDate;

    fn create_state() -> AppState {
        AppState::new(ConfigLoader::load("./config/srs7").unwrap())
    }

    fn create_session(state: &AppState) -> PlanningSession {
        PlanningSession::new(
            state.config().shared_config(),
            NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
            "T1",
            vec![],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let state = create_state();
        let first = state.insert_session(create_session(&state)).await;
        let second = state.insert_session(create_session(&state)).await;
        assert_ne!(first, second);

        state
            .update_session(first, |s| s.advance().map(|_| ()))
            .await
            .unwrap();

        let stages = (
            state.read_session(first, |s| Ok(s.stage())).await.unwrap(),
            state.read_session(second, |s| Ok(s.stage())).await.unwrap(),
        );
        assert_ne!(stages.0, stages.1);
        assert_eq!(state.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_session_returns_error() {
        let state = create_state();
        let id = Uuid::new_v4();

        match state.read_session(id, |s| Ok(s.catalog() == &RoleCatalog::standard())).await {
            Err(EngineError::SessionNotFound { id: missing }) => assert_eq!(missing, id),
            other => panic!("Expected SessionNotFound error, got {:?}", other),
        }
    }
}
