use std::sync::Arc;

use crate::errors::{AppError, Result};
use crate::models::{Product, ProductFilters, ProductPayload};
use crate::repositories::ProductRepository;

/// Catalog operations with the business invariants applied on top of
/// the store
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        self.repository.all().await
    }

    pub async fn get(&self, id: i64) -> Result<Product> {
        self.repository
            .by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Producto con ID {} no encontrado", id)))
    }

    /// Case-insensitive catalog search. Each supplied filter narrows
    /// the previous result set: brand and category match whole values,
    /// name, size and color match substrings.
    pub async fn search(&self, filters: ProductFilters) -> Result<Vec<Product>> {
        let mut products = self.repository.all().await?;

        if let Some(brand) = &filters.brand {
            let brand = brand.to_lowercase();
            products.retain(|p| p.brand.to_lowercase() == brand);
        }
        if let Some(category) = &filters.category {
            let category = category.to_lowercase();
            products.retain(|p| p.category.to_lowercase() == category);
        }
        if let Some(name) = &filters.name {
            let name = name.to_lowercase();
            products.retain(|p| p.name.to_lowercase().contains(&name));
        }
        if let Some(size) = &filters.size {
            let size = size.to_lowercase();
            products.retain(|p| p.size.to_lowercase().contains(&size));
        }
        if let Some(color) = &filters.color {
            let color = color.to_lowercase();
            products.retain(|p| p.color.to_lowercase().contains(&color));
        }

        Ok(products)
    }

    pub async fn create(&self, payload: ProductPayload) -> Result<Product> {
        let product = Product::new(
            None,
            payload.name,
            payload.brand,
            payload.category,
            payload.size,
            payload.color,
            payload.price,
            payload.stock,
            payload.description,
        )?;
        self.repository.save(product).await
    }

    /// Merges the payload into the stored record, re-validating the
    /// result before it is persisted
    pub async fn update(&self, id: i64, payload: ProductPayload) -> Result<Product> {
        let mut product = self.get(id).await?;
        product.name = payload.name;
        product.brand = payload.brand;
        product.category = payload.category;
        product.size = payload.size;
        product.color = payload.color;
        product.price = payload.price;
        product.stock = payload.stock;
        product.description = payload.description;
        product.validate()?;
        self.repository.save(product).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Producto con ID {} no encontrado",
                id
            )));
        }
        Ok(())
    }
}
