//! OrganConnect Auth Service
//!
//! JWT-based authentication for a multi-role user directory
//! (donor, hospital, admin): registration, login, identity lookup and a
//! mocked mobile-OTP verification flow over an in-process document store.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations (serve, seeding)
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities (users, password hashing)
//! - **services**: Authentication, token codec and OTP challenge store
//! - **infra**: User record store abstraction
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server with demo accounts
//! cargo run -- serve --seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::{MemoryStore, UserStore};
