//! Product Service - Business logic layer

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CategoryList, CreateProduct, DashboardStats, DeleteResponse, Product, ProductFilter,
    ProductListQuery, UpdateProduct,
};
use crate::query::ProductOrder;
use crate::reports::{self, Document};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Validates and normalizes input, checks existence before writes and
/// assembles report documents.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        let input = input.normalize()?;

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// One page of products, newest first
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductListQuery) -> ProductResult<Vec<Product>> {
        query.validate()?;
        let (filter, page) = query.into_parts();

        self.repository
            .list(filter, ProductOrder::NewestFirst, Some(page))
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        if input.is_empty() {
            return Err(ProductError::InvalidInput("No fields to update".into()));
        }
        input.validate()?;
        let input = input.normalize()?;

        self.get_product(id).await?;

        // The row can vanish between the existence check and the write.
        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<DeleteResponse> {
        let product = self.get_product(id).await?;

        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(DeleteResponse::for_product(&product.name))
    }

    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> ProductResult<DashboardStats> {
        self.repository.dashboard_stats().await
    }

    #[instrument(skip(self))]
    pub async fn categories(&self) -> ProductResult<CategoryList> {
        Ok(CategoryList {
            categories: self.repository.categories().await?,
        })
    }

    /// Every product, alphabetically, rendered as a PDF
    #[instrument(skip(self))]
    pub async fn full_inventory_report(
        &self,
        generated_at: DateTime<Utc>,
    ) -> ProductResult<Document> {
        let products = self
            .repository
            .list(ProductFilter::default(), ProductOrder::ByName, None)
            .await?;
        tracing::info!(products = products.len(), "Rendering full inventory report");

        render(move || reports::full_inventory(&products, generated_at)).await
    }

    /// Products below the low-stock threshold, emptiest first, rendered as a PDF
    #[instrument(skip(self))]
    pub async fn low_stock_report(&self, generated_at: DateTime<Utc>) -> ProductResult<Document> {
        let products = self
            .repository
            .list(ProductFilter::low_stock(), ProductOrder::LowestStockFirst, None)
            .await?;
        tracing::info!(products = products.len(), "Rendering low stock report");

        render(move || reports::low_stock(&products, generated_at)).await
    }
}

/// Layout is CPU-bound; keep it off the async workers.
async fn render<F>(job: F) -> ProductResult<Document>
where
    F: FnOnce() -> Document + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| ProductError::Report(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pagination;
    use crate::repository::MockProductRepository;
    use chrono::TimeZone;
    use mockall::predicate::{always, eq};

    fn product(id: i64, name: &str, quantity: i32, price: f64) -> Product {
        let ts = Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap();
        Product {
            id,
            name: name.into(),
            category: "Tools".into(),
            quantity,
            price,
            description: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[tokio::test]
    async fn test_create_rounds_price_before_storing() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .withf(|input| input.price == 20.0 && input.name == "Widget")
            .times(1)
            .returning(|input| Ok(product(1, &input.name, input.quantity, input.price)));

        let service = ProductService::new(mock_repo);
        let created = service
            .create_product(CreateProduct {
                name: " Widget ".into(),
                category: "Tools".into(),
                quantity: 3,
                price: 19.999,
                description: None,
            })
            .await
            .unwrap();

        assert_eq!(created.price, 20.0);
    }

    #[tokio::test]
    async fn test_create_invalid_input_never_reaches_storage() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .create_product(CreateProduct {
                name: "Widget".into(),
                category: "Tools".into(),
                quantity: -1,
                price: 0.0,
                description: None,
            })
            .await
            .unwrap_err();

        match err {
            ProductError::Validation(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("quantity"));
                assert!(fields.contains_key("price"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.get_product(42).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_list_uses_newest_first_and_page() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .with(
                always(),
                eq(ProductOrder::NewestFirst),
                eq(Some(Pagination { skip: 10, limit: 5 })),
            )
            .returning(|_, _, _| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let products = service
            .list_products(ProductListQuery {
                skip: 10,
                limit: 5,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_list_rejects_inverted_price_range() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_list().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .list_products(ProductListQuery {
                min_price: Some(50.0),
                max_price: Some(10.0),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_without_fields_is_rejected_before_storage() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().never();
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .update_product(1, UpdateProduct::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::InvalidInput(ref msg) if msg == "No fields to update"));
    }

    #[tokio::test]
    async fn test_update_missing_product_does_not_write() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(9))
            .returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .update_product(
                9,
                UpdateProduct {
                    quantity: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_update_row_vanishing_mid_request_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(product(id, "Saw", 8, 22.5))));
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service
            .update_product(
                3,
                UpdateProduct {
                    price: Some(30.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::NotFound(3)));
    }

    #[tokio::test]
    async fn test_delete_returns_confirmation_with_name() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(5))
            .returning(|id| Ok(Some(product(id, "Hammer", 12, 15.0))));
        mock_repo
            .expect_delete()
            .with(eq(5))
            .returning(|_| Ok(true));

        let service = ProductService::new(mock_repo);
        let response = service.delete_product(5).await.unwrap();

        assert_eq!(response.message, "Product 'Hammer' deleted successfully");
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_database_error() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_categories()
            .returning(|| Err(ProductError::Database("pool timed out".into())));

        let service = ProductService::new(mock_repo);
        let err = service.categories().await.unwrap_err();

        assert!(matches!(err, ProductError::Database(_)));
    }

    #[tokio::test]
    async fn test_low_stock_report_queries_low_items_emptiest_first() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .with(
                eq(ProductFilter::low_stock()),
                eq(ProductOrder::LowestStockFirst),
                eq(None),
            )
            .returning(|_, _, _| Ok(vec![product(2, "Bolt", 3, 4.0)]));

        let service = ProductService::new(mock_repo);
        let generated_at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        let document = service.low_stock_report(generated_at).await.unwrap();

        assert_eq!(document.filename, "low_stock_report_20261016_093000.pdf");
        assert!(document.bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_full_report_lists_everything_by_name() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .with(eq(ProductFilter::default()), eq(ProductOrder::ByName), eq(None))
            .returning(|_, _, _| Ok(vec![product(1, "Anvil", 30, 99.0)]));

        let service = ProductService::new(mock_repo);
        let generated_at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        let document = service.full_inventory_report(generated_at).await.unwrap();

        assert_eq!(document.filename, "product_list_20261016_093000.pdf");
    }
}
