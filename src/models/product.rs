use serde::{Deserialize, Serialize};

use crate::errors::{AppError, Result};

/// Catalog entry. The id is absent until the product has been persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
}

impl Product {
    /// Builds a product, rejecting invalid data up front.
    /// All violations are reported in a single validation error.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Option<i64>,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        size: impl Into<String>,
        color: impl Into<String>,
        price: f64,
        stock: i64,
        description: impl Into<String>,
    ) -> Result<Self> {
        let product = Self {
            id,
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
            size: size.into(),
            color: color.into(),
            price,
            stock,
            description: description.into(),
        };
        product.validate()?;
        Ok(product)
    }

    /// Re-checks the product invariants. Used on construction and again
    /// after merging an update into an existing record.
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();
        if self.price <= 0.0 {
            violations.push("El precio debe ser mayor a 0");
        }
        if self.stock < 0 {
            violations.push("El stock no puede ser negativo");
        }
        if self.name.trim().is_empty() {
            violations.push("El nombre no puede estar vacío");
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations.join("; ")))
        }
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    pub fn reduce_stock(&mut self, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(AppError::Validation(
                "La cantidad a reducir debe ser positiva".to_string(),
            ));
        }
        if quantity > self.stock {
            return Err(AppError::Validation(
                "No hay suficiente stock para reducir la cantidad solicitada".to_string(),
            ));
        }
        self.stock -= quantity;
        Ok(())
    }

    pub fn increase_stock(&mut self, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(AppError::Validation(
                "La cantidad a aumentar debe ser positiva".to_string(),
            ));
        }
        self.stock += quantity;
        Ok(())
    }
}

/// Request body for creating or updating a product
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
}

/// Query parameters accepted by the catalog search endpoint.
/// Parameters outside this set are ignored by the deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilters {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product::new(
            None,
            "Zapato Runner",
            "Nike",
            "Deportivo",
            "42",
            "Rojo",
            100.0,
            5,
            "Zapato deportivo rojo",
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let result = Product::new(None, "Zapato", "Nike", "Deportivo", "42", "Rojo", 0.0, 5, "");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rejects_negative_stock() {
        let result = Product::new(None, "Zapato", "Nike", "Deportivo", "42", "Rojo", 10.0, -1, "");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_aggregates_violations_into_one_message() {
        let result = Product::new(None, "  ", "Nike", "Deportivo", "42", "Rojo", -1.0, -1, "");
        match result {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("precio"));
                assert!(msg.contains("stock"));
                assert!(msg.contains("nombre"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_availability_follows_stock() {
        let mut product = sample();
        assert!(product.is_available());
        product.stock = 0;
        assert!(!product.is_available());
    }

    #[test]
    fn test_reduce_stock() {
        let mut product = sample();
        product.reduce_stock(3).unwrap();
        assert_eq!(product.stock, 2);
        assert!(product.reduce_stock(3).is_err());
        assert!(product.reduce_stock(0).is_err());
    }

    #[test]
    fn test_increase_stock() {
        let mut product = sample();
        product.increase_stock(2).unwrap();
        assert_eq!(product.stock, 7);
        assert!(product.increase_stock(-1).is_err());
    }
}
