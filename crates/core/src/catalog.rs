//! Catalog records and the persistence seam.
//!
//! [`Item`] and [`UserProfile`] are what leaves the service; [`NewItem`]
//! and [`NewUser`] are candidate records that must pass validation before
//! anything is written.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{
    required, required_alphanumeric, required_printable_ascii, Validatable, ValidationResult,
};

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A stored catalog item.
///
/// `image` is always a digest-derived filename or the empty string; a
/// null column never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub image: String,
    pub price: i64,
    pub price_lower_limit: i64,
    #[serde(rename = "user_id")]
    pub owner_id: Option<DbId>,
}

/// Candidate item built from submitted scalar fields.
///
/// `image` stays `None` until the asset store has accepted the upload.
#[derive(Debug, Clone, Default, validator::Validate)]
pub struct NewItem {
    #[validate(
        custom(function = "required_printable_ascii"),
        length(min = 1, max = 20, message = "must be 1 to 20 characters")
    )]
    pub name: String,

    #[validate(
        custom(function = "required"),
        length(min = 1, max = 40, message = "must be 1 to 40 characters")
    )]
    pub category: String,

    pub price: i64,
    pub price_lower_limit: i64,
    pub owner_id: Option<DbId>,
    pub image: Option<String>,
}

impl Validatable for NewItem {
    fn validate(&self) -> ValidationResult {
        validator::Validate::validate(self).into()
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Public projection of a user row. The password never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub name: String,
}

/// Candidate user registration.
///
/// The password is persisted exactly as submitted; there is no hashing
/// step anywhere in the service.
#[derive(Debug, Clone, Default, Deserialize, validator::Validate)]
#[serde(default)]
pub struct NewUser {
    #[validate(
        custom(function = "required"),
        length(min = 1, max = 20, message = "must be 1 to 20 characters")
    )]
    pub name: String,

    #[validate(
        custom(function = "required_alphanumeric"),
        length(min = 4, max = 20, message = "must be 4 to 20 characters")
    )]
    pub password: String,
}

impl Validatable for NewUser {
    fn validate(&self) -> ValidationResult {
        validator::Validate::validate(self).into()
    }
}

// ---------------------------------------------------------------------------
// Repository seam
// ---------------------------------------------------------------------------

/// Relational persistence for items and users.
///
/// Lookups by id return `Ok(None)` on a miss so callers can tell "no such
/// row" apart from a driver failure, which surfaces as
/// [`CoreError::Persistence`].
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Insert a complete item. `item.image` must already be set.
    async fn insert_item(&self, item: &NewItem) -> Result<Item, CoreError>;

    async fn insert_user(&self, user: &NewUser) -> Result<UserProfile, CoreError>;

    async fn list_items(&self) -> Result<Vec<Item>, CoreError>;

    async fn find_item(&self, id: DbId) -> Result<Option<Item>, CoreError>;

    async fn find_user(&self, id: DbId) -> Result<Option<UserProfile>, CoreError>;

    /// Items whose name starts with `keyword`. An empty keyword matches all.
    async fn search_items(&self, keyword: &str) -> Result<Vec<Item>, CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            category: category.to_string(),
            ..NewItem::default()
        }
    }

    fn user(name: &str, password: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_item_passes() {
        let result = item("Book A", "books").validate();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn empty_name_and_category_are_both_reported() {
        let result = item("", "").validate();
        assert!(!result.is_valid);
        assert_eq!(result.failed_fields(), vec!["category", "name"]);
        assert!(result.errors.iter().all(|v| v.rule == "required"));
        assert_eq!(result.errors[0].message, "category is required");
        assert_eq!(result.errors[1].message, "name is required");
    }

    #[test]
    fn name_length_boundary() {
        assert!(item(&"a".repeat(20), "c").validate().is_valid);
        let result = item(&"a".repeat(21), "c").validate();
        assert_eq!(result.failed_fields(), vec!["name"]);
        assert_eq!(result.errors[0].rule, "length");
        assert_eq!(result.errors[0].message, "name must be 1 to 20 characters");
    }

    #[test]
    fn category_length_boundary() {
        assert!(item("n", &"c".repeat(40)).validate().is_valid);
        let result = item("n", &"c".repeat(41)).validate();
        assert_eq!(result.failed_fields(), vec!["category"]);
    }

    #[test]
    fn category_length_counts_characters_not_bytes() {
        assert!(item("n", &"é".repeat(40)).validate().is_valid);
        assert!(!item("n", &"é".repeat(41)).validate().is_valid);
    }

    #[test]
    fn name_must_be_printable_ascii() {
        let result = item("ノート", "stationery").validate();
        assert_eq!(result.failed_fields(), vec!["name"]);
        assert_eq!(result.errors[0].rule, "printable_ascii");
        assert_eq!(
            result.errors[0].message,
            "name must contain printable ASCII characters only"
        );
    }

    #[test]
    fn price_fields_are_not_validated() {
        let mut candidate = item("Lamp", "home");
        candidate.price = -5;
        candidate.price_lower_limit = 1_000;
        assert!(candidate.validate().is_valid);
    }

    #[test]
    fn valid_user_passes() {
        assert!(user("alice", "s3cret").validate().is_valid);
    }

    #[test]
    fn user_password_rules() {
        assert_eq!(user("bob", "abc").validate().failed_fields(), vec!["password"]);
        assert!(user("bob", "abcd").validate().is_valid);
        assert!(user("bob", &"x".repeat(20)).validate().is_valid);
        assert!(!user("bob", &"x".repeat(21)).validate().is_valid);

        let result = user("bob", "pass word").validate();
        assert_eq!(result.errors[0].rule, "alphanumeric");
    }

    #[test]
    fn empty_user_reports_both_fields() {
        let result = user("", "").validate();
        assert_eq!(result.failed_fields(), vec!["name", "password"]);
    }

    #[test]
    fn item_serializes_owner_as_user_id() {
        let item = Item {
            id: 1,
            name: "Book A".into(),
            category: "books".into(),
            image: String::new(),
            price: 100,
            price_lower_limit: 50,
            owner_id: Some(9),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["user_id"], 9);
        assert_eq!(json["image"], "");
        assert!(json.get("owner_id").is_none());
    }
}
