//! # Product Repository
//!
//! Database operations for products: lookup by code, batch lookup and the
//! conditional stock decrement checkout relies on.
//!
//! ## Conditional Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UPDATE products                                                        │
//! │     SET quantity = quantity - :qty, updated_at = :now                   │
//! │   WHERE product_code = :code AND quantity >= :qty                       │
//! │                                                                         │
//! │  rows_affected = 1  → stock taken                                       │
//! │  rows_affected = 0  → not enough left, caller rolls back                │
//! │                                                                         │
//! │  Two checkouts that both saw quantity = 1 can never both decrement.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use shelfmark_core::validation::{
    validate_price, validate_product_code, validate_product_name, validate_stock,
};
use shelfmark_core::{Money, Product};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use super::parse_decimal;
use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str =
    "id, product_code, name, price, quantity, barcode_value, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    product_code: String,
    name: String,
    price: String,
    quantity: i64,
    barcode_value: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Self> {
        Ok(Product {
            price: Money::new(parse_decimal("products.price", &row.price)?),
            id: row.id,
            product_code: row.product_code,
            name: row.name,
            quantity: row.quantity,
            barcode_value: row.barcode_value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.get_by_code("SAREE-001").await?;
/// let batch = repo.find_by_codes(&["SAREE-001".into(), "DHOTI-002".into()]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Looks up one product by its unique code.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        debug!(code = %code, "Fetching product by code");

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_code = ?1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Batch lookup by code. Unknown codes are simply absent from the result.
    pub async fn find_by_codes(&self, codes: &[String]) -> DbResult<Vec<Product>> {
        let mut conn = self.pool.acquire().await?;
        self.find_by_codes_in(&mut conn, codes).await
    }

    /// Batch lookup on a caller-owned connection or transaction.
    pub async fn find_by_codes_in(
        &self,
        conn: &mut SqliteConnection,
        codes: &[String],
    ) -> DbResult<Vec<Product>> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = codes.len(), "Fetching products by code");

        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_code IN ("
        ));
        let mut separated = query.separated(", ");
        for code in codes {
            separated.push_bind(code.as_str());
        }
        separated.push_unseparated(")");

        let rows = query
            .build_query_as::<ProductRow>()
            .fetch_all(&mut *conn)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Takes `quantity` units off the shelf if at least that many are left.
    ///
    /// ## Returns
    /// * `Ok(true)` - stock decremented and `updated_at` bumped
    /// * `Ok(false)` - unknown code or not enough stock; nothing changed
    pub async fn decrement_stock(
        &self,
        conn: &mut SqliteConnection,
        code: &str,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> DbResult<bool> {
        debug!(code = %code, quantity = quantity, "Decrementing stock");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity - ?2,
                updated_at = ?3
            WHERE product_code = ?1 AND quantity >= ?2
            "#,
        )
        .bind(code)
        .bind(quantity)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Inserts a new product, trimming its code and name first.
    ///
    /// ## Errors
    /// * `Domain(Validation)` - blank or oversized code/name, negative price or stock
    /// * `UniqueViolation` - the code is already taken
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        let product = Product {
            product_code: validate_product_code(&product.product_code, "productCode")?
                .to_string(),
            name: validate_product_name(&product.name)?.to_string(),
            price: validate_price(product.price)?,
            quantity: validate_stock(product.quantity)?,
            ..product.clone()
        };

        debug!(code = %product.product_code, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, product_code, name, price, quantity,
                barcode_value, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.product_code)
        .bind(&product.name)
        .bind(product.price.amount().to_string())
        .bind(product.quantity)
        .bind(&product.barcode_value)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| match DbError::from(err) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: product.product_code.clone(),
            },
            other => other,
        })?;

        Ok(product)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::test_support::product;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use super::*;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_by_code() {
        let db = db().await;
        let repo = db.products();

        let mut saree = product("SAREE-001", dec!(1499.50), 4);
        saree.barcode_value = Some("8901234567890".into());
        repo.insert(&saree).await.unwrap();

        let found = repo.get_by_code("SAREE-001").await.unwrap().unwrap();
        assert_eq!(found, saree);
        assert_eq!(found.price, Money::new(dec!(1499.5)));

        assert!(repo.get_by_code("NOPE").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_code_is_unique_violation() {
        let db = db().await;
        let repo = db.products();
        repo.insert(&product("A", dec!(10), 1)).await.unwrap();

        let err = repo.insert(&product("A", dec!(20), 1)).await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "products.product_code");
                assert_eq!(value, "A");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_insert_validates_and_trims() {
        let db = db().await;
        let repo = db.products();

        let mut padded = product("  KURTA-7 ", dec!(799), 3);
        padded.name = " Linen Kurta ".into();
        let stored = repo.insert(&padded).await.unwrap();
        assert_eq!(stored.product_code, "KURTA-7");
        assert_eq!(stored.name, "Linen Kurta");
        assert!(repo.get_by_code("KURTA-7").await.unwrap().is_some());

        let negative = repo.insert(&product("NEG", dec!(-1), 1)).await.unwrap_err();
        assert_eq!(negative.kind(), shelfmark_core::ErrorKind::Validation);

        let blank = repo.insert(&product("   ", dec!(1), 1)).await.unwrap_err();
        assert_eq!(blank.kind(), shelfmark_core::ErrorKind::Validation);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_codes_skips_unknown() {
        let db = db().await;
        let repo = db.products();
        repo.insert(&product("A", dec!(10), 1)).await.unwrap();
        repo.insert(&product("B", dec!(20), 2)).await.unwrap();

        let mut found = repo
            .find_by_codes(&["B".into(), "X".into(), "A".into()])
            .await
            .unwrap();
        found.sort_by(|a, b| a.product_code.cmp(&b.product_code));

        let codes: Vec<_> = found.iter().map(|p| p.product_code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B"]);
        assert!(repo.find_by_codes(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decrement_stock_is_conditional() {
        let db = db().await;
        let repo = db.products();
        repo.insert(&product("A", dec!(10), 2)).await.unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();

        let mut conn = db.pool().acquire().await.unwrap();
        assert!(!repo.decrement_stock(&mut conn, "A", 3, later).await.unwrap());
        assert!(repo.decrement_stock(&mut conn, "A", 2, later).await.unwrap());
        assert!(!repo.decrement_stock(&mut conn, "A", 1, later).await.unwrap());
        assert!(!repo.decrement_stock(&mut conn, "X", 1, later).await.unwrap());
        drop(conn);

        let a = repo.get_by_code("A").await.unwrap().unwrap();
        assert_eq!(a.quantity, 0);
        assert_eq!(a.updated_at, later);
    }
}
