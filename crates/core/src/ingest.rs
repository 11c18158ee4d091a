//! Item ingestion pipeline.
//!
//! A submission moves through four strictly ordered steps:
//!
//! 1. build a [`NewItem`] from the scalar fields (image unset)
//! 2. validate it, reporting every failing field
//! 3. store the image bytes in the [`AssetStore`]
//! 4. insert the row through the [`CatalogRepository`]
//!
//! Nothing is written before validation passes, and no row is written
//! unless the asset write succeeded. A failed insert after a successful
//! asset write leaves an unreferenced asset behind; it is harmless because
//! the next upload of the same bytes reuses it.

use std::sync::Arc;

use crate::assets::AssetStore;
use crate::catalog::{CatalogRepository, Item, NewItem, NewUser, UserProfile};
use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{FieldViolation, Validatable};

/// Raw fields of an item submission.
#[derive(Debug, Clone, Default)]
pub struct ItemSubmission {
    pub name: String,
    pub category: String,
    pub price: i64,
    pub price_lower_limit: i64,
    pub owner_id: Option<DbId>,
    pub image: Option<Vec<u8>>,
}

/// Successful ingestion: the stored record plus a confirmation message.
#[derive(Debug, Clone)]
pub struct Receipt<T> {
    pub record: T,
    pub message: String,
}

/// Orchestrates validation, asset storage and persistence for writes.
#[derive(Clone)]
pub struct IngestionCoordinator {
    repo: Arc<dyn CatalogRepository>,
    assets: AssetStore,
}

impl IngestionCoordinator {
    pub fn new(repo: Arc<dyn CatalogRepository>, assets: AssetStore) -> Self {
        Self { repo, assets }
    }

    /// Run an item submission through the full pipeline.
    pub async fn submit_item(&self, submission: ItemSubmission) -> Result<Receipt<Item>, CoreError> {
        let ItemSubmission {
            name,
            category,
            price,
            price_lower_limit,
            owner_id,
            image,
        } = submission;

        let mut candidate = NewItem {
            name,
            category,
            price,
            price_lower_limit,
            owner_id,
            image: None,
        };

        let report = candidate.validate();
        if !report.is_valid {
            for v in &report.errors {
                tracing::warn!(field = %v.field, rule = %v.rule, "Item rejected: {}", v.message);
            }
        }
        report.into_result()?;

        let bytes = image.ok_or_else(|| {
            CoreError::Validation(vec![FieldViolation::new(
                "image",
                "required",
                "image is required",
            )])
        })?;

        let stored = self.assets.put(&bytes).await?;
        candidate.image = Some(stored.name.clone());

        let item = self.repo.insert_item(&candidate).await.map_err(|e| {
            tracing::warn!(
                asset = %stored.name,
                created = stored.created,
                error = %e,
                "Item insert failed after asset write; asset left unreferenced",
            );
            e
        })?;

        tracing::info!(
            item_id = item.id,
            name = %item.name,
            category = %item.category,
            image = %item.image,
            "Item received",
        );

        let message = format!(
            "item received: {} which belongs to the category {}. image name is {}",
            item.name, item.category, item.image
        );
        Ok(Receipt {
            record: item,
            message,
        })
    }

    /// Validate and persist a user registration.
    pub async fn register_user(&self, user: NewUser) -> Result<Receipt<UserProfile>, CoreError> {
        user.validate().into_result()?;

        let profile = self.repo.insert_user(&user).await?;
        tracing::info!(user_id = profile.id, name = %profile.name, "User registered");

        let message = format!("Hello, {} !!", profile.name);
        Ok(Receipt {
            record: profile,
            message,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::assets::asset_filename;

    /// In-memory repository that records every insert.
    #[derive(Default)]
    pub(crate) struct MemoryRepo {
        pub items: Mutex<Vec<Item>>,
        pub users: Mutex<Vec<(UserProfile, String)>>,
        pub fail_inserts: bool,
    }

    #[async_trait]
    impl CatalogRepository for MemoryRepo {
        async fn insert_item(&self, item: &NewItem) -> Result<Item, CoreError> {
            if self.fail_inserts {
                return Err(CoreError::persistence(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "database unavailable",
                )));
            }
            let mut items = self.items.lock().unwrap();
            let row = Item {
                id: items.len() as DbId + 1,
                name: item.name.clone(),
                category: item.category.clone(),
                image: item.image.clone().unwrap_or_default(),
                price: item.price,
                price_lower_limit: item.price_lower_limit,
                owner_id: item.owner_id,
            };
            items.push(row.clone());
            Ok(row)
        }

        async fn insert_user(&self, user: &NewUser) -> Result<UserProfile, CoreError> {
            let mut users = self.users.lock().unwrap();
            let profile = UserProfile {
                id: users.len() as DbId + 1,
                name: user.name.clone(),
            };
            users.push((profile.clone(), user.password.clone()));
            Ok(profile)
        }

        async fn list_items(&self) -> Result<Vec<Item>, CoreError> {
            Ok(self.items.lock().unwrap().clone())
        }

        async fn find_item(&self, id: DbId) -> Result<Option<Item>, CoreError> {
            Ok(self.items.lock().unwrap().iter().find(|i| i.id == id).cloned())
        }

        async fn find_user(&self, id: DbId) -> Result<Option<UserProfile>, CoreError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|(u, _)| u.id == id)
                .map(|(u, _)| u.clone()))
        }

        async fn search_items(&self, keyword: &str) -> Result<Vec<Item>, CoreError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.name.starts_with(keyword))
                .cloned()
                .collect())
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        repo: Arc<MemoryRepo>,
        assets: AssetStore,
        coordinator: IngestionCoordinator,
    }

    async fn fixture(repo: MemoryRepo) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetStore::open(dir.path().join("images")).await.unwrap();
        let repo = Arc::new(repo);
        let coordinator = IngestionCoordinator::new(repo.clone(), assets.clone());
        Fixture {
            _dir: dir,
            repo,
            assets,
            coordinator,
        }
    }

    fn file_count(assets: &AssetStore) -> usize {
        std::fs::read_dir(assets.root()).map(|d| d.count()).unwrap_or(0)
    }

    fn submission(name: &str, category: &str, image: Option<&[u8]>) -> ItemSubmission {
        ItemSubmission {
            name: name.to_string(),
            category: category.to_string(),
            price: 1200,
            price_lower_limit: 800,
            owner_id: Some(1),
            image: image.map(<[u8]>::to_vec),
        }
    }

    #[tokio::test]
    async fn successful_submission_stores_asset_and_row() {
        let f = fixture(MemoryRepo::default()).await;
        let receipt = f
            .coordinator
            .submit_item(submission("Book A", "books", Some(b"cover")))
            .await
            .unwrap();

        let expected = asset_filename(b"cover");
        assert_eq!(receipt.record.image, expected);
        assert_eq!(
            receipt.message,
            format!("item received: Book A which belongs to the category books. image name is {expected}")
        );
        assert_eq!(file_count(&f.assets), 1);

        let items = f.repo.items.lock().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, 1200);
        assert_eq!(items[0].price_lower_limit, 800);
        assert_eq!(items[0].owner_id, Some(1));
    }

    #[tokio::test]
    async fn validation_failure_writes_nothing() {
        let f = fixture(MemoryRepo::default()).await;
        let err = f
            .coordinator
            .submit_item(submission("", "", Some(b"cover")))
            .await
            .unwrap_err();

        assert_matches!(&err, CoreError::Validation(v) if v.len() == 2);
        assert_eq!(file_count(&f.assets), 0);
        assert!(f.repo.items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_image_is_rejected_before_any_write() {
        let f = fixture(MemoryRepo::default()).await;
        let err = f
            .coordinator
            .submit_item(submission("Lamp", "home", None))
            .await
            .unwrap_err();

        assert_matches!(&err, CoreError::Validation(v) if v[0].field == "image");
        assert_eq!(file_count(&f.assets), 0);
        assert!(f.repo.items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn asset_write_failure_inserts_no_row() {
        let f = fixture(MemoryRepo::default()).await;
        std::fs::remove_dir_all(f.assets.root()).unwrap();

        let err = f
            .coordinator
            .submit_item(submission("Lamp", "home", Some(b"img")))
            .await
            .unwrap_err();

        assert_matches!(err, CoreError::AssetWrite { .. });
        assert!(f.repo.items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_failure_leaves_orphan_asset() {
        let f = fixture(MemoryRepo {
            fail_inserts: true,
            ..MemoryRepo::default()
        })
        .await;

        let err = f
            .coordinator
            .submit_item(submission("Lamp", "home", Some(b"img")))
            .await
            .unwrap_err();

        assert_matches!(err, CoreError::Persistence(_));
        assert_eq!(file_count(&f.assets), 1);
    }

    #[tokio::test]
    async fn identical_images_share_one_asset() {
        let f = fixture(MemoryRepo::default()).await;
        let a = f
            .coordinator
            .submit_item(submission("Book A", "books", Some(b"same")))
            .await
            .unwrap();
        let b = f
            .coordinator
            .submit_item(submission("Book B", "books", Some(b"same")))
            .await
            .unwrap();

        assert_eq!(a.record.image, b.record.image);
        assert_ne!(a.record.id, b.record.id);
        assert_eq!(file_count(&f.assets), 1);
    }

    #[tokio::test]
    async fn register_user_greets_by_name() {
        let f = fixture(MemoryRepo::default()).await;
        let receipt = f
            .coordinator
            .register_user(NewUser {
                name: "alice".into(),
                password: "pass1234".into(),
            })
            .await
            .unwrap();

        assert_eq!(receipt.message, "Hello, alice !!");
        assert_eq!(receipt.record.name, "alice");
    }

    #[tokio::test]
    async fn invalid_user_is_not_inserted() {
        let f = fixture(MemoryRepo::default()).await;
        let err = f
            .coordinator
            .register_user(NewUser {
                name: "alice".into(),
                password: "no".into(),
            })
            .await
            .unwrap_err();

        assert_matches!(&err, CoreError::Validation(v) if v[0].field == "password");
        assert!(f.repo.users.lock().unwrap().is_empty());
    }
}
