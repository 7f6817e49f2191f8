use async_trait::async_trait;
use sqlx::Row;

use crate::db::DbPool;
use crate::errors::Result;
use crate::models::Product;
use crate::repositories::ProductRepository;

/// Catalog store backed by the `products` table
#[derive(Clone)]
pub struct SqliteProductRepository {
    pool: DbPool,
}

impl SqliteProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product> {
        Ok(Product {
            id: Some(row.try_get("id")?),
            name: row.try_get("name")?,
            brand: row.try_get("brand")?,
            category: row.try_get("category")?,
            size: row.try_get("size")?,
            color: row.try_get("color")?,
            price: row.try_get("price")?,
            stock: row.try_get("stock")?,
            description: row.try_get("description")?,
        })
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, brand, category, size, color, price, stock, description FROM products";

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::row_to_product).collect()
    }

    async fn by_id(&self, id: i64) -> Result<Option<Product>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn by_brand(&self, brand: &str) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!("{} WHERE brand = ? ORDER BY id", SELECT_COLUMNS))
            .bind(brand)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::row_to_product).collect()
    }

    async fn by_category(&self, category: &str) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!("{} WHERE category = ? ORDER BY id", SELECT_COLUMNS))
            .bind(category)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::row_to_product).collect()
    }

    async fn save(&self, product: Product) -> Result<Product> {
        let mut product = product;
        match product.id {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE products
                    SET name = ?, brand = ?, category = ?, size = ?, color = ?,
                        price = ?, stock = ?, description = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&product.name)
                .bind(&product.brand)
                .bind(&product.category)
                .bind(&product.size)
                .bind(&product.color)
                .bind(product.price)
                .bind(product.stock)
                .bind(&product.description)
                .bind(id)
                .execute(&self.pool)
                .await?;
            }
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO products (name, brand, category, size, color, price, stock, description)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&product.name)
                .bind(&product.brand)
                .bind(&product.category)
                .bind(&product.size)
                .bind(&product.color)
                .bind(product.price)
                .bind(product.stock)
                .bind(&product.description)
                .execute(&self.pool)
                .await?;
                product.id = Some(result.last_insert_rowid());
            }
        }
        Ok(product)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
