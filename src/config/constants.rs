//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default access token lifetime in minutes
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "bearer";

// =============================================================================
// OTP
// =============================================================================

/// OTP codes are exactly this many decimal digits
pub const OTP_LENGTH: usize = 6;

/// Exclusive upper bound for OTP generation ("000000" through "999999")
pub const OTP_CODE_SPACE: u32 = 1_000_000;

// =============================================================================
// User Roles
// =============================================================================

/// Organ donor role
pub const ROLE_DONOR: &str = "donor";

/// Hospital role
pub const ROLE_HOSPITAL: &str = "hospital";

/// Administrator role, provisioned out-of-band (never self-registered)
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;
