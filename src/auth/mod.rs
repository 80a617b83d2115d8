//! Credential handling.
//!
//! Passwords are stored as Argon2 hashes; no reversible copy is retained.
//! Login probes the three account tables in a fixed order and the first
//! email match whose password verifies wins, establishing the role.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::db::{self, DbPool};
use crate::session::{Identity, Role};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Probe users, then drivers, then organizations for a matching credential.
/// Returns the identity to put in the session, or None when nothing matched.
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn authenticate(
    pool: &DbPool,
    email: &str,
    password: &str,
) -> Result<Option<Identity>, sqlx::Error> {
    if let Some(user) = db::users::find_by_email(pool, email).await? {
        if verify_password(password, &user.password_hash) {
            return Ok(Some(Identity {
                id: user.id,
                role: Role::User,
                name: user.fullname,
            }));
        }
    }

    if let Some(driver) = db::drivers::find_by_email(pool, email).await? {
        if verify_password(password, &driver.password_hash) {
            return Ok(Some(Identity {
                id: driver.id,
                role: Role::Driver,
                name: driver.fullname,
            }));
        }
    }

    if let Some(org) = db::organizations::find_by_email(pool, email).await? {
        if verify_password(password, &org.password_hash) {
            return Ok(Some(Identity {
                id: org.id,
                role: Role::Organization,
                name: org.company_name,
            }));
        }
    }

    Ok(None)
}
