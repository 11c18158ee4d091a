//! Repository for the `items` table.

use catalog_core::catalog::NewItem;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::ItemRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category, image, price, price_lower_limit, user_id";

/// Provides insert and read operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewItem) -> Result<ItemRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (name, category, image, price, price_lower_limit, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemRow>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.image)
            .bind(input.price)
            .bind(input.price_lower_limit)
            .bind(input.owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find an item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ItemRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, ItemRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all items in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<ItemRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items ORDER BY id");
        sqlx::query_as::<_, ItemRow>(&query).fetch_all(pool).await
    }

    /// List items whose name starts with `keyword`, in insertion order.
    ///
    /// `%`, `_` and `\` in the keyword match literally.
    pub async fn search_by_name_prefix(
        pool: &PgPool,
        keyword: &str,
    ) -> Result<Vec<ItemRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM items WHERE name LIKE $1 ESCAPE '\\' ORDER BY id");
        sqlx::query_as::<_, ItemRow>(&query)
            .bind(prefix_pattern(keyword))
            .fetch_all(pool)
            .await
    }
}

/// Build a LIKE pattern matching any string that starts with `keyword`.
fn prefix_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 1);
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
