//! User row model.

use catalog_core::catalog::UserProfile;
use catalog_core::types::DbId;
use sqlx::FromRow;

/// The public columns of a `users` row. The password column is never
/// selected into this struct.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}
