//! Repository tests against a live PostgreSQL.
//!
//! Skipped unless `DATABASE_URL` points at a database the tests may write to.

use pantry_app::products::{
    NewProduct, PgProductRepository, ProductError, ProductRepository, UpdateProduct,
};
use pantry_kernel::settings::{DatabaseDriver, DatabaseSettings};
use pantry_kernel::Schema;

async fn repository() -> Option<PgProductRepository> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let settings = DatabaseSettings {
        driver: DatabaseDriver::Postgres,
        url,
        ..DatabaseSettings::default()
    };

    let pool = pantry_db::connect(&settings).await.unwrap();
    let schema = vec![(
        "products".to_string(),
        Schema {
            id: "001_products",
            ddl: pantry_app::products::postgres::PRODUCTS_TABLE,
        },
    )];
    pantry_db::bootstrap_schema(&pool, &schema).await.unwrap();

    Some(PgProductRepository::new(pool))
}

fn rice() -> NewProduct {
    NewProduct {
        name: "Rice".to_string(),
        description: "Five kilogram sack".to_string(),
        price: 72500.0,
        stock: 12,
    }
}

#[tokio::test]
async fn test_pg_create_update_delete() {
    let Some(repo) = repository().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };

    let created = repo.create(rice()).await.unwrap();
    assert!(created.id > 0);

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Rice");
    assert_eq!(fetched.stock, 12);

    let updated = repo
        .update(
            created.id,
            UpdateProduct {
                price: Some(70000.0),
                ..UpdateProduct::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 70000.0);
    assert_eq!(updated.description, created.description);
    assert!(updated.updated_at >= created.updated_at);

    let listed = repo.list().await.unwrap();
    assert!(listed.iter().any(|p| p.id == created.id));

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_pg_empty_update_keeps_timestamp() {
    let Some(repo) = repository().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };

    let created = repo.create(rice()).await.unwrap();
    let unchanged = repo
        .update(created.id, UpdateProduct::default())
        .await
        .unwrap();
    assert_eq!(unchanged, created);

    repo.delete(created.id).await.unwrap();
}

#[tokio::test]
async fn test_pg_update_missing_product() {
    let Some(repo) = repository().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };

    let result = repo.update(i64::MAX, UpdateProduct::default()).await;
    assert!(matches!(result, Err(ProductError::NotFound(id)) if id == i64::MAX));
}
