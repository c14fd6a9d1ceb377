//! Authentication service - Handles user authentication flows.
//!
//! Orchestrates the credential hasher, token codec and OTP challenge
//! store against the user record store: register, login, identify and
//! the mocked mobile-OTP verification flow.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UserStore;
use crate::services::otp_service::OtpStore;
use crate::services::token::{Claims, TokenCodec, TokenResponse};

/// Registration data collected at the public signup boundary.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: UserRole,
    pub name: String,
    pub mobile: String,
    pub age: Option<u32>,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new donor or hospital account and return a session token
    async fn register(&self, registration: Registration) -> AppResult<TokenResponse>;

    /// Login and return a fresh session token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify a session token and extract its claims
    fn decode_token(&self, token: &str) -> AppResult<Claims>;

    /// Resolve a token subject to an existing user record
    async fn current_user(&self, id: Uuid) -> AppResult<User>;

    /// Issue an OTP challenge for a mobile number, returning the code
    async fn request_otp(&self, mobile: &str) -> AppResult<String>;

    /// Validate an OTP submission against the challenge store
    async fn verify_otp(&self, mobile: &str, code: &str) -> AppResult<()>;
}

/// Concrete implementation of AuthService over a user record store.
pub struct Authenticator<S: UserStore> {
    store: Arc<S>,
    tokens: TokenCodec,
    otp: OtpStore,
}

impl<S: UserStore> Authenticator<S> {
    /// Create a new auth service instance.
    ///
    /// The token codec and OTP map are per-instance state, so tests get
    /// isolation by constructing one authenticator per case.
    pub fn new(store: Arc<S>, config: &Config) -> Self {
        Self {
            store,
            tokens: TokenCodec::new(config),
            otp: OtpStore::new(),
        }
    }
}

#[async_trait]
impl<S: UserStore> AuthService for Authenticator<S> {
    async fn register(&self, registration: Registration) -> AppResult<TokenResponse> {
        if registration.password != registration.confirm_password {
            return Err(AppError::validation("Passwords do not match"));
        }

        // Admin accounts are provisioned out-of-band, never self-registered
        if !registration.role.can_register() {
            return Err(AppError::validation("Role must be donor or hospital"));
        }

        if self
            .store
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Email"));
        }

        if self
            .store
            .find_by_mobile(&registration.mobile)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Mobile number"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();
        let user = User::new(
            registration.email,
            password_hash,
            registration.role,
            registration.name,
            Some(registration.mobile),
            registration.age,
        );

        self.store.insert(user.clone()).await?;

        tracing::info!(email = %user.email, role = %user.role, "user registered");

        self.tokens.issue(&user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user_result = self.store.find_by_email(&email).await?;

        // SECURITY: Perform password verification even if the user doesn't
        // exist so unknown-email and wrong-password take the same path.
        // The dummy hash always fails verification.
        let dummy_hash = "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        // Only succeed if both user exists AND password is valid
        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        let user = user_result.unwrap();

        if !user.is_active {
            return Err(AppError::InactiveAccount);
        }

        tracing::info!(email = %user.email, "user logged in");

        self.tokens.issue(&user)
    }

    fn decode_token(&self, token: &str) -> AppResult<Claims> {
        self.tokens.decode(token).ok_or(AppError::Unauthorized)
    }

    async fn current_user(&self, id: Uuid) -> AppResult<User> {
        // An unresolvable subject is "unauthenticated", not "not found"
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    async fn request_otp(&self, mobile: &str) -> AppResult<String> {
        let code = self.otp.request(mobile);
        tracing::info!(%mobile, "otp challenge issued");
        Ok(code)
    }

    async fn verify_otp(&self, mobile: &str, code: &str) -> AppResult<()> {
        if self.otp.verify(mobile, code) {
            Ok(())
        } else {
            Err(AppError::validation("Invalid OTP"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MemoryStore, MockUserStore};

    fn test_config() -> Config {
        Config::with_secret("test-secret-key-for-testing-only-32chars")
    }

    fn authenticator() -> Authenticator<MemoryStore> {
        Authenticator::new(Arc::new(MemoryStore::new()), &test_config())
    }

    fn donor_registration(email: &str, mobile: &str) -> Registration {
        Registration {
            email: email.to_string(),
            password: "pw1".to_string(),
            confirm_password: "pw1".to_string(),
            role: UserRole::Donor,
            name: "Donor A".to_string(),
            mobile: mobile.to_string(),
            age: Some(30),
        }
    }

    #[tokio::test]
    async fn register_returns_decodable_token() {
        let auth = authenticator();
        let token = auth
            .register(donor_registration("a@x.com", "111"))
            .await
            .unwrap();

        assert_eq!(token.token_type, "bearer");
        let claims = auth.decode_token(&token.access_token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, "donor");

        // The subject resolves back to the stored record
        let user = auth.current_user(claims.sub).await.unwrap();
        assert!(user.mobile_verified);
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn register_rejects_password_mismatch() {
        let auth = authenticator();
        let mut registration = donor_registration("a@x.com", "111");
        registration.confirm_password = "pw2".to_string();

        let err = auth.register(registration).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_regardless_of_role() {
        let auth = authenticator();
        auth.register(donor_registration("a@x.com", "111"))
            .await
            .unwrap();

        let mut second = donor_registration("a@x.com", "222");
        second.role = UserRole::Hospital;
        let err = auth.register(second).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_mobile() {
        let auth = authenticator();
        auth.register(donor_registration("a@x.com", "111"))
            .await
            .unwrap();

        let err = auth
            .register(donor_registration("b@x.com", "111"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_rejects_admin_role() {
        let auth = authenticator();
        let mut registration = donor_registration("root@x.com", "999");
        registration.role = UserRole::Admin;

        let err = auth.register(registration).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn login_error_is_identical_for_unknown_email_and_wrong_password() {
        let auth = authenticator();
        auth.register(donor_registration("a@x.com", "111"))
            .await
            .unwrap();

        let unknown = auth
            .login("ghost@x.com".to_string(), "pw1".to_string())
            .await
            .unwrap_err();
        let wrong = auth
            .login("a@x.com".to_string(), "wrong".to_string())
            .await
            .unwrap_err();

        assert!(matches!(unknown, AppError::InvalidCredentials));
        assert!(matches!(wrong, AppError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn login_rejects_inactive_account() {
        let store = Arc::new(MemoryStore::new());
        let auth = Authenticator::new(store.clone(), &test_config());

        let mut user = User::new(
            "inactive@x.com".to_string(),
            Password::new("pw1").unwrap().into_string(),
            UserRole::Donor,
            "Inactive".to_string(),
            Some("333".to_string()),
            None,
        );
        user.is_active = false;
        store.insert(user).await.unwrap();

        let err = auth
            .login("inactive@x.com".to_string(), "pw1".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InactiveAccount));
    }

    #[tokio::test]
    async fn current_user_requires_existing_subject() {
        let auth = authenticator();
        let err = auth.current_user(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn otp_round_trip_is_single_use() {
        let auth = authenticator();
        let code = auth.request_otp("+1000").await.unwrap();

        auth.verify_otp("+1000", &code).await.unwrap();
        let err = auth.verify_otp("+1000", &code).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn register_checks_email_before_mobile() {
        // Uniqueness checks are ordered: a record that clashes on both
        // fields reports the email conflict
        let mut mock = MockUserStore::new();
        mock.expect_find_by_email().returning(|email| {
            let user = User::new(
                email.to_string(),
                "hashed".to_string(),
                UserRole::Donor,
                "Existing".to_string(),
                Some("111".to_string()),
                None,
            );
            Ok(Some(user))
        });
        mock.expect_find_by_mobile().never();

        let auth = Authenticator::new(Arc::new(mock), &test_config());
        let err = auth
            .register(donor_registration("a@x.com", "111"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == "Email"));
    }
}
