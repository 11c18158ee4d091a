//! Item row model.

use catalog_core::catalog::Item;
use catalog_core::types::DbId;
use sqlx::FromRow;

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub price: i64,
    pub price_lower_limit: i64,
    pub user_id: Option<DbId>,
}

impl From<ItemRow> for Item {
    /// A NULL `image` column becomes the empty string.
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            image: row.image.unwrap_or_default(),
            price: row.price,
            price_lower_limit: row.price_lower_limit,
            owner_id: row.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(image: Option<&str>) -> ItemRow {
        ItemRow {
            id: 4,
            name: "Lamp".into(),
            category: "home".into(),
            image: image.map(str::to_string),
            price: 3000,
            price_lower_limit: 2500,
            user_id: None,
        }
    }

    #[test]
    fn null_image_becomes_empty_string() {
        let item = Item::from(row(None));
        assert_eq!(item.image, "");
    }

    #[test]
    fn present_image_is_kept() {
        let item = Item::from(row(Some("abc.jpg")));
        assert_eq!(item.image, "abc.jpg");
        assert_eq!(item.price, 3000);
        assert_eq!(item.owner_id, None);
    }
}
