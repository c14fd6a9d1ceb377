//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_DONOR, ROLE_HOSPITAL};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Donor,
    Hospital,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Roles allowed through self-registration.
    ///
    /// Admin accounts are provisioned out-of-band (see seeding).
    pub fn can_register(&self) -> bool {
        matches!(self, UserRole::Donor | UserRole::Hospital)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Donor => write!(f, "{}", ROLE_DONOR),
            UserRole::Hospital => write!(f, "{}", ROLE_HOSPITAL),
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_HOSPITAL => UserRole::Hospital,
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::Donor,
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub mobile_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record.
    ///
    /// Registration auto-verifies the mobile number (demo default; a real
    /// deployment would gate this on a completed OTP challenge).
    pub fn new(
        email: String,
        password_hash: String,
        role: UserRole,
        name: String,
        mobile: Option<String>,
        age: Option<u32>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            role,
            name,
            mobile,
            age,
            mobile_verified: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// User response (safe to return to client, never carries the digest)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "donor@organconnect.com")]
    pub email: String,
    /// User role
    #[schema(example = "donor")]
    pub role: UserRole,
    /// User display name
    #[schema(example = "Demo Donor")]
    pub name: String,
    /// Mobile number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Whether the mobile number has been verified
    pub mobile_verified: bool,
    /// Whether the account is active
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            name: user.name,
            mobile: user.mobile,
            age: user.age,
            mobile_verified: user.mobile_verified,
            is_active: user.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display_round_trips() {
        for role in [UserRole::Donor, UserRole::Hospital, UserRole::Admin] {
            assert_eq!(UserRole::from(role.to_string().as_str()), role);
        }
    }

    #[test]
    fn only_donor_and_hospital_can_register() {
        assert!(UserRole::Donor.can_register());
        assert!(UserRole::Hospital.can_register());
        assert!(!UserRole::Admin.can_register());
    }

    #[test]
    fn new_user_is_active_and_mobile_verified() {
        let user = User::new(
            "donor@example.com".to_string(),
            "hashed".to_string(),
            UserRole::Donor,
            "Demo Donor".to_string(),
            Some("9876543210".to_string()),
            Some(30),
        );

        assert!(user.is_active);
        assert!(user.mobile_verified);
        assert!(!user.is_admin());
    }

    #[test]
    fn user_serialization_never_leaks_digest() {
        let user = User::new(
            "donor@example.com".to_string(),
            "$argon2id$not-for-clients".to_string(),
            UserRole::Donor,
            "Demo Donor".to_string(),
            None,
            None,
        );

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }
}
