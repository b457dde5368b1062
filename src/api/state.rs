//! Application state for the Attendance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::repository::HrRepository;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the loaded
/// shift and policy configuration and the HR document store.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
    /// The document store.
    repository: Arc<dyn HrRepository>,
}

impl AppState {
    /// Creates a new application state over a configuration and a repository.
    pub fn new(config: ConfigLoader, repository: Arc<dyn HrRepository>) -> Self {
        Self {
            config: Arc::new(config),
            repository,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the repository.
    pub fn repository(&self) -> &dyn HrRepository {
        self.repository.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // axum state must be Clone
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }
}
