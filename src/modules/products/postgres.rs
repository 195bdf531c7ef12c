use async_trait::async_trait;
use sqlx::PgPool;

use super::error::{ProductError, ProductResult};
use super::models::{NewProduct, Product, UpdateProduct};
use super::repository::ProductRepository;

const COLUMNS: &str = "id, name, description, price, stock, created_at, updated_at";

/// Table definition applied at startup when the Postgres driver is selected.
pub const PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          BIGSERIAL PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    price       DOUBLE PRECISION NOT NULL,
    stock       INTEGER NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

/// PostgreSQL-backed ProductRepository
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, description, price, stock) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.stock)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        // Single statement: absent fields keep their column value, and an
        // empty update leaves updated_at alone
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 price = COALESCE($4, price), \
                 stock = COALESCE($5, stock), \
                 updated_at = CASE \
                     WHEN $2 IS NULL AND $3 IS NULL AND $4 IS NULL AND $5 IS NULL \
                     THEN updated_at ELSE NOW() END \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(input.name)
        .bind(input.description)
        .bind(input.price)
        .bind(input.stock)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ProductError::NotFound(id))?;

        tracing::info!(product_id = id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
