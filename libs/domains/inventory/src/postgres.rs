use async_trait::async_trait;
use database::postgres::sql;
use sea_orm::{DatabaseConnection, FromQueryResult, Value};

use crate::{
    error::{ProductError, ProductResult},
    models::{
        CategoryStats, CreateProduct, DashboardStats, LOW_STOCK_THRESHOLD, Pagination, Product,
        ProductFilter, UpdateProduct, round_money,
    },
    query::{PRODUCT_COLUMNS, ProductOrder, QueryBuilder, build_update},
    repository::{ProductRepository, RECENT_DAYS, TOP_CATEGORIES},
};

#[derive(Debug, FromQueryResult)]
struct CategoryRow {
    category: String,
}

#[derive(Debug, FromQueryResult)]
struct Totals {
    total_products: i64,
    total_categories: i64,
    low_stock_count: i64,
    total_inventory_value: f64,
    recent_products: i64,
}

/// PostgreSQL-backed repository using parameterized SQL over the shared pool
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let stmt = sql::statement(
            format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"),
            [Value::from(id)],
        );
        Ok(sql::fetch_optional(&self.db, stmt).await?)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let stmt = sql::statement(
            "INSERT INTO products (name, category, quantity, price, description) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
            [
                Value::from(input.name),
                Value::from(input.category),
                Value::from(input.quantity),
                Value::from(input.price),
                Value::from(input.description),
            ],
        );
        let id = sql::insert_returning_id(&self.db, stmt).await?;

        tracing::info!(product_id = id, "Created product");
        self.fetch_by_id(id)
            .await?
            .ok_or_else(|| ProductError::Database(format!("product {id} missing after insert")))
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        self.fetch_by_id(id).await
    }

    async fn list(
        &self,
        filter: ProductFilter,
        order: ProductOrder,
        page: Option<Pagination>,
    ) -> ProductResult<Vec<Product>> {
        let mut query = QueryBuilder::select().filter(&filter).order_by(order);
        if let Some(page) = page {
            query = query.paginate(page);
        }
        Ok(sql::fetch_all(&self.db, query.into_statement()).await?)
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let stmt = build_update(id, &input)
            .ok_or_else(|| ProductError::InvalidInput("No fields to update".into()))?;
        let updated: Option<Product> = sql::fetch_optional(&self.db, stmt).await?;

        if updated.is_some() {
            tracing::info!(product_id = id, "Updated product");
        }
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let affected = sql::execute(
            &self.db,
            sql::statement("DELETE FROM products WHERE id = $1", [Value::from(id)]),
        )
        .await?;

        if affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(affected > 0)
    }

    async fn categories(&self) -> ProductResult<Vec<String>> {
        let rows: Vec<CategoryRow> = sql::fetch_all(
            &self.db,
            sql::statement("SELECT DISTINCT category FROM products ORDER BY category", []),
        )
        .await?;
        Ok(rows.into_iter().map(|r| r.category).collect())
    }

    async fn dashboard_stats(&self) -> ProductResult<DashboardStats> {
        let totals_sql = format!(
            "SELECT COUNT(*) AS total_products, \
             COUNT(DISTINCT category) AS total_categories, \
             COUNT(*) FILTER (WHERE quantity < {LOW_STOCK_THRESHOLD}) AS low_stock_count, \
             COALESCE(SUM(quantity * price), 0)::float8 AS total_inventory_value, \
             COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '{RECENT_DAYS} days') \
             AS recent_products \
             FROM products"
        );
        let totals: Totals = sql::fetch_optional(&self.db, sql::statement(totals_sql, []))
            .await?
            .ok_or_else(|| ProductError::Database("aggregate query returned no row".into()))?;

        let top_categories: Vec<CategoryStats> = sql::fetch_all(
            &self.db,
            sql::statement(
                "SELECT category AS name, COUNT(*) AS count FROM products \
                 GROUP BY category ORDER BY count DESC, name ASC LIMIT $1",
                [Value::from(TOP_CATEGORIES as i64)],
            ),
        )
        .await?;

        Ok(DashboardStats {
            total_products: totals.total_products,
            total_categories: totals.total_categories,
            low_stock_count: totals.low_stock_count,
            total_inventory_value: round_money(totals.total_inventory_value),
            recent_products: totals.recent_products,
            top_categories,
        })
    }
}
