use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{
    CategoryStats, CreateProduct, DashboardStats, Pagination, Product, ProductFilter,
    UpdateProduct, round_money,
};
use crate::query::ProductOrder;

/// Categories shown on the dashboard
pub const TOP_CATEGORIES: usize = 5;
/// Window for the dashboard's recent-products count
pub const RECENT_DAYS: i64 = 7;

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a validated, normalized product and return the stored row
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Products matching `filter` in `order`; every match when `page` is `None`
    async fn list(
        &self,
        filter: ProductFilter,
        order: ProductOrder,
        page: Option<Pagination>,
    ) -> ProductResult<Vec<Product>>;

    /// Apply the supplied fields and refresh `updated_at`; `None` if the id is unknown
    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// `false` if nothing was deleted
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// Distinct categories in ascending order
    async fn categories(&self) -> ProductResult<Vec<String>>;

    async fn dashboard_stats(&self) -> ProductResult<DashboardStats>;
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<i64, Product>,
    last_id: i64,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_products(products: &mut [Product], order: ProductOrder) {
    match order {
        ProductOrder::NewestFirst => {
            products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
        }
        ProductOrder::ByName => products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
        ProductOrder::LowestStockFirst => {
            products.sort_by(|a, b| a.quantity.cmp(&b.quantity).then(a.name.cmp(&b.name)))
        }
    }
}

/// Category counts ordered by count descending, then name.
pub fn top_categories<'a>(
    categories: impl IntoIterator<Item = &'a str>,
    limit: usize,
) -> Vec<CategoryStats> {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for category in categories {
        *counts.entry(category).or_default() += 1;
    }
    let mut stats: Vec<CategoryStats> = counts
        .into_iter()
        .map(|(name, count)| CategoryStats {
            name: name.to_string(),
            count,
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    stats.truncate(limit);
    stats
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let now = Utc::now();
        let product = Product {
            id: store.last_id,
            name: input.name,
            category: input.category,
            quantity: input.quantity,
            price: input.price,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: ProductFilter,
        order: ProductOrder,
        page: Option<Pagination>,
    ) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;

        let mut result: Vec<Product> = store
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        sort_products(&mut result, order);

        Ok(match page {
            Some(page) => result
                .into_iter()
                .skip(usize::try_from(page.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(page.limit).unwrap_or(0))
                .collect(),
            None => result,
        })
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut store = self.store.write().await;
        let Some(product) = store.products.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = input.name {
            product.name = name;
        }
        if let Some(category) = input.category {
            product.category = category;
        }
        if let Some(quantity) = input.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if let Some(description) = input.description {
            product.description = Some(description);
        }
        product.updated_at = Utc::now();

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.products.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }

    async fn categories(&self) -> ProductResult<Vec<String>> {
        let store = self.store.read().await;
        let categories: BTreeSet<&str> = store
            .products
            .values()
            .map(|p| p.category.as_str())
            .collect();
        Ok(categories.into_iter().map(str::to_string).collect())
    }

    async fn dashboard_stats(&self) -> ProductResult<DashboardStats> {
        let store = self.store.read().await;
        let products = store.products.values();
        let recent_since = Utc::now() - Duration::days(RECENT_DAYS);

        let distinct: BTreeSet<&str> = products.clone().map(|p| p.category.as_str()).collect();

        Ok(DashboardStats {
            total_products: products.len() as i64,
            total_categories: distinct.len() as i64,
            low_stock_count: products.clone().filter(|p| p.is_low_stock()).count() as i64,
            total_inventory_value: round_money(products.clone().map(Product::total_value).sum()),
            recent_products: products
                .clone()
                .filter(|p| p.created_at >= recent_since)
                .count() as i64,
            top_categories: top_categories(
                products.map(|p| p.category.as_str()),
                TOP_CATEGORIES,
            ),
        })
    }
}
