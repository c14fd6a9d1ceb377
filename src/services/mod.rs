//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
mod otp_service;
mod token;

pub use auth_service::{AuthService, Authenticator, Registration};
pub use otp_service::OtpStore;
pub use token::{Claims, TokenCodec, TokenResponse};
