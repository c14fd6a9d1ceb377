//! Seed command - Provisions demo accounts.
//!
//! Seeding is also the only path that creates admin accounts; the
//! registration endpoint refuses them.

use crate::domain::{Password, User, UserRole};
use crate::errors::AppResult;
use crate::infra::UserStore;

/// A demo account definition
struct DemoUser {
    email: &'static str,
    password: &'static str,
    role: UserRole,
    name: &'static str,
    mobile: &'static str,
    age: Option<u32>,
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        email: "donor@organconnect.com",
        password: "donor123",
        role: UserRole::Donor,
        name: "Demo Donor",
        mobile: "9876543210",
        age: Some(30),
    },
    DemoUser {
        email: "hospital@organconnect.com",
        password: "hospital123",
        role: UserRole::Hospital,
        name: "Demo Hospital",
        mobile: "9876543211",
        age: None,
    },
    DemoUser {
        email: "admin@organconnect.com",
        password: "admin123",
        role: UserRole::Admin,
        name: "Admin User",
        mobile: "9876543212",
        age: None,
    },
];

/// Insert the demo accounts, skipping any email that already exists.
pub async fn seed_demo_users<S: UserStore>(store: &S) -> AppResult<()> {
    for demo in DEMO_USERS {
        if store.find_by_email(demo.email).await?.is_some() {
            tracing::info!(email = demo.email, "demo user already exists, skipping");
            continue;
        }

        let password_hash = Password::new(demo.password)?.into_string();
        let user = User::new(
            demo.email.to_string(),
            password_hash,
            demo.role,
            demo.name.to_string(),
            Some(demo.mobile.to_string()),
            demo.age,
        );

        store.insert(user).await?;
        tracing::info!(email = demo.email, role = %demo.role, "demo user seeded");
    }

    Ok(())
}
