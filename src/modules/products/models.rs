use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Store-assigned identifier, immutable after creation
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Overwrite the fields present in `input`, leaving the rest untouched.
    ///
    /// `updated_at` only moves when at least one field was supplied.
    pub fn apply_update(&mut self, input: UpdateProduct) {
        let mut touched = false;

        if let Some(name) = input.name {
            self.name = name;
            touched = true;
        }
        if let Some(description) = input.description {
            self.description = description;
            touched = true;
        }
        if let Some(price) = input.price {
            self.price = price;
            touched = true;
        }
        if let Some(stock) = input.stock {
            self.stock = stock;
            touched = true;
        }

        if touched {
            self.updated_at = Utc::now();
        }
    }
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
}

/// Partial update; `None` (absent or `null`) keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteProductResponse {
    pub message: String,
}

impl DeleteProductResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Product deleted".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tofu() -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: "Tofu".to_string(),
            description: "Fresh tofu".to_string(),
            price: 5000.0,
            stock: 20,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn apply_update_only_touches_present_fields() {
        let mut product = tofu();
        let before = product.clone();

        product.apply_update(UpdateProduct {
            price: Some(6000.0),
            ..UpdateProduct::default()
        });

        assert_eq!(product.price, 6000.0);
        assert_eq!(product.name, before.name);
        assert_eq!(product.description, before.description);
        assert_eq!(product.stock, before.stock);
        assert_eq!(product.created_at, before.created_at);
        assert!(product.updated_at >= before.updated_at);
    }

    #[test]
    fn empty_update_keeps_timestamps() {
        let mut product = tofu();
        product.updated_at = product.created_at - chrono::Duration::hours(1);
        let before = product.clone();

        product.apply_update(UpdateProduct::default());

        assert_eq!(product, before);
    }

    #[test]
    fn product_serializes_timestamps_as_rfc3339() {
        let json = serde_json::to_value(tofu()).unwrap();
        assert_eq!(json["name"], "Tofu");
        assert_eq!(json["id"], 1);
        assert!(DateTime::parse_from_rfc3339(json["created_at"].as_str().unwrap()).is_ok());
    }
}
