// Application state (AppState)

use crate::core::config::Config;
use crate::core::error::HelpCenterError;
use crate::services::desk::HelpDesk;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared application state
///
/// The help center core is single-writer: handlers take the lock, run one
/// operation to completion and release it. The lock is never held across an
/// `.await`.
#[derive(Clone)]
pub struct AppState {
    /// The help center core
    desk: Arc<Mutex<HelpDesk>>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, desk: HelpDesk) -> Self {
        Self {
            desk: Arc::new(Mutex::new(desk)),
            config: Arc::new(config),
        }
    }

    pub fn desk(&self) -> Result<MutexGuard<'_, HelpDesk>, HelpCenterError> {
        self.desk
            .lock()
            .map_err(|_| HelpCenterError::Internal("Help desk lock poisoned".to_string()))
    }

    /// Run a CPU-heavy desk operation (password hashing) on the blocking pool
    pub async fn run_blocking<T, F>(self: Arc<Self>, op: F) -> Result<T, HelpCenterError>
    where
        F: FnOnce(&HelpDesk) -> Result<T, HelpCenterError> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let desk = self.desk()?;
            op(&desk)
        })
        .await
        .map_err(|e| HelpCenterError::Internal(format!("Blocking task failed: {}", e)))?
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config::from_toml(
        r#"
        [server]
        port = 8080
        num_threads = 1

        [store]
        bootstrap_admin = "admin@x.com"

        [auth]
        argon2_memory_kib = 64
        argon2_iterations = 1
        "#,
    )
    .unwrap()
}

#[cfg(test)]
pub(crate) fn create_test_state() -> Arc<AppState> {
    Arc::new(AppState::new(test_config(), crate::services::desk::test_desk()))
}
