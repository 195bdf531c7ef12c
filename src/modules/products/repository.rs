use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::{ProductError, ProductResult};
use super::models::{NewProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in insertion order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Persist a new product; the store assigns the id
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Overwrite the supplied fields; `NotFound` when the id does not resolve
    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether a row was removed
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Product>,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let table = self.table.read().await;
        // Ids only grow, so key order is insertion order
        Ok(table.rows.values().cloned().collect())
    }

    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let mut table = self.table.write().await;

        table.last_id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| ProductError::Internal("product id sequence exhausted".to_string()))?;

        let now = Utc::now();
        let product = Product {
            id: table.last_id,
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let mut table = self.table.write().await;

        let product = table.rows.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut table = self.table.write().await;

        if table.rows.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{} description", name),
            price: 5000.0,
            stock: 20,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(new_product("Tofu")).await.unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Tofu");
        assert_eq!(product.created_at, product.updated_at);

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(fetched, Some(product));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(new_product("Tofu")).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());

        let second = repo.create(new_product("Tempeh")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.list().await.unwrap().is_empty());

        for name in ["Tofu", "Tempeh", "Oncom"] {
            repo.create(new_product(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Tofu", "Tempeh", "Oncom"]);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryProductRepository::new();
        let result = repo.update(42, UpdateProduct::default()).await;
        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_partial_update() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(new_product("Tofu")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateProduct {
                    stock: Some(5),
                    ..UpdateProduct::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.stock, 5);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.price, created.price);
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(new_product("Tofu")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), None);
    }
}
