//! # Account Repository
//!
//! Registration, credential verification and profile reads.
//!
//! ## Credential Handling
//! Passwords are hashed with Argon2id and a per-user random salt before they
//! touch the database. The hash column never leaves this module: every read
//! returns a [`UserView`], which carries no credential material.
//!
//! Login failures are deliberately uniform. "No such phone" and "wrong
//! password" both come back as `Ok(None)` so callers cannot probe which
//! accounts exist.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use busline_core::UserView;

/// Repository for user account operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Creates a new AccountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AccountRepository { pool }
    }

    /// Registers a new user account.
    ///
    /// The wallet starts at zero. Email and phone are unique across all
    /// accounts.
    ///
    /// ## Errors
    /// - `UniqueViolation` - the email or phone is already registered
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> DbResult<UserView> {
        debug!(email, "Registering account");

        let password_hash = hash_password(password)?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, phone, password_hash, wallet_cents)
            VALUES (?1, ?2, ?3, ?4, 0)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(&password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| rewrite_unique_violation(e.into(), email, phone))?;

        let user = UserView {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            wallet_cents: 0,
        };

        info!(user_id = user.id, "Account registered");
        Ok(user)
    }

    /// Verifies login credentials and returns the account on success.
    ///
    /// Riders log in with their phone number.
    ///
    /// ## Returns
    /// - `Ok(Some(user))` - phone exists and the password matches
    /// - `Ok(None)` - unknown phone or wrong password (indistinguishable)
    pub async fn authenticate(&self, phone: &str, password: &str) -> DbResult<Option<UserView>> {
        let row: Option<(i64, String, String, String, String, i64)> = sqlx::query_as(
            r#"
            SELECT id, name, email, phone, password_hash, wallet_cents
            FROM users
            WHERE phone = ?1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, name, email, phone, password_hash, wallet_cents)) = row else {
            return Ok(None);
        };

        if !verify_password(password, &password_hash)? {
            debug!(user_id = id, "Password mismatch");
            return Ok(None);
        }

        Ok(Some(UserView {
            id,
            name,
            email,
            phone,
            wallet_cents,
        }))
    }

    /// Gets a user's profile by ID.
    pub async fn get_by_id(&self, user_id: i64) -> DbResult<Option<UserView>> {
        let user: Option<UserView> = sqlx::query_as::<_, UserView>(
            r#"
            SELECT id, name, email, phone, wallet_cents
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a password with Argon2id and a fresh random salt.
fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored Argon2 hash string.
fn verify_password(password: &str, stored: &str) -> DbResult<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| DbError::Internal(format!("stored hash is malformed: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Turns SQLite's "UNIQUE constraint failed: users.email" into an error that
/// names the colliding value.
fn rewrite_unique_violation(err: DbError, email: &str, phone: &str) -> DbError {
    match err {
        DbError::UniqueViolation { field, .. } if field.contains("email") => {
            DbError::duplicate("email", email)
        }
        DbError::UniqueViolation { field, .. } if field.contains("phone") => {
            DbError::duplicate("phone", phone)
        }
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_register_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let accounts = db.accounts();

        let user = accounts
            .register("Asha", "asha@example.com", "9876543210", "hunter2-secure")
            .await
            .unwrap();

        assert_eq!(user.wallet_cents, 0);

        let fetched = accounts.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "asha@example.com");
        assert_eq!(fetched.phone, "9876543210");

        assert!(accounts.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_and_phone() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let accounts = db.accounts();

        accounts
            .register("Asha", "asha@example.com", "9876543210", "hunter2-secure")
            .await
            .unwrap();

        let err = accounts
            .register("Imposter", "asha@example.com", "9111111111", "hunter2-secure")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, .. } if field == "email"
        ));

        let err = accounts
            .register("Imposter", "other@example.com", "9876543210", "hunter2-secure")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, .. } if field == "phone"
        ));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let accounts = db.accounts();

        accounts
            .register("Asha", "asha@example.com", "9876543210", "hunter2-secure")
            .await
            .unwrap();

        let user = accounts
            .authenticate("9876543210", "hunter2-secure")
            .await
            .unwrap();
        assert!(user.is_some());

        // Wrong password and unknown phone are indistinguishable
        let wrong = accounts
            .authenticate("9876543210", "wrong-password")
            .await
            .unwrap();
        assert!(wrong.is_none());

        let unknown = accounts
            .authenticate("0000000000", "hunter2-secure")
            .await
            .unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_password_is_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();

        // Different salts produce different hash strings
        assert_ne!(a, b);
        assert!(verify_password("same-password", &a).unwrap());
        assert!(verify_password("same-password", &b).unwrap());
        assert!(!verify_password("other", &a).unwrap());
    }
}
