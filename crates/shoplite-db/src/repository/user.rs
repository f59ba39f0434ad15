//! # User Repository
//!
//! Database operations for user accounts. Provisioning policy (who may
//! create accounts, the forced password reset) lives in the workflow
//! layer; this repository only persists.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use shoplite_core::{Role, User};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user account.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - email already registered
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(user_id = %user.id, email = %user.email, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, full_name, role, shop_id,
                must_reset_password, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.role)
        .bind(&user.shop_id)
        .bind(user.must_reset_password)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a user by ID.
    pub async fn get(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, full_name, role, shop_id,
                   must_reset_password, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by email.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, full_name, role, shop_id,
                   must_reset_password, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Reassigns a user's role and shop.
    pub async fn update_role_and_shop(
        &self,
        id: &str,
        role: Role,
        shop_id: Option<&str>,
    ) -> DbResult<()> {
        debug!(user_id = %id, "Updating role and shop");

        let result = sqlx::query("UPDATE users SET role = ?2, shop_id = ?3 WHERE id = ?1")
            .bind(id)
            .bind(role)
            .bind(shop_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Clears the forced-password-reset flag after the user has changed
    /// their provisioned credential.
    pub async fn clear_reset_flag(&self, id: &str) -> DbResult<()> {
        debug!(user_id = %id, "Clearing password-reset flag");

        let result = sqlx::query("UPDATE users SET must_reset_password = 0 WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Lists all users (Admin dashboard view).
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, full_name, role, shop_id,
                   must_reset_password, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
