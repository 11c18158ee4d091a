//! Repository for the `users` table.

use catalog_core::catalog::NewUser;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::UserRow;

/// Provides insert and lookup operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning its public columns.
    ///
    /// The password is stored as submitted (no hashing).
    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<UserRow, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (name, password) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(&input.name)
        .bind(&input.password)
        .fetch_one(pool)
        .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>("SELECT id, name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
