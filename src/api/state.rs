//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::UserStore;
use crate::services::{AuthService, Authenticator};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Echo OTP codes in request-otp responses (demo-only, from config)
    pub echo_otp: bool,
}

impl AppState {
    /// Create application state over a user record store.
    pub fn from_store<S: UserStore + 'static>(store: Arc<S>, config: &Config) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(store, config)),
            echo_otp: config.echo_otp,
        }
    }

    /// Create application state with a manually injected service.
    pub fn new(auth_service: Arc<dyn AuthService>, echo_otp: bool) -> Self {
        Self {
            auth_service,
            echo_otp,
        }
    }
}
