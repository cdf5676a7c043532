use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use chrono::Utc;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    AuditAction, AuditLog, CategoryList, CategoryStats, CreateProduct, DashboardStats,
    DeleteResponse, Product, ProductListQuery, UpdateProduct,
};
use crate::reports::Document;
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const PRODUCTS_TAG: &str = "products";
pub const DASHBOARD_TAG: &str = "dashboard";
pub const DOCUMENTS_TAG: &str = "documents";

/// OpenAPI documentation for the inventory endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        dashboard_stats,
        list_categories,
        full_inventory_document,
        low_stock_document,
    ),
    components(
        schemas(
            Product,
            CreateProduct,
            UpdateProduct,
            DashboardStats,
            CategoryStats,
            CategoryList,
            DeleteResponse,
            AuditLog,
            AuditAction,
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = PRODUCTS_TAG, description = "Product catalogue management"),
        (name = DASHBOARD_TAG, description = "Aggregate inventory figures"),
        (name = DOCUMENTS_TAG, description = "PDF inventory reports")
    )
)]
pub struct ApiDoc;

/// Create the inventory router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/dashboard/stats", get(dashboard_stats))
        .route("/categories", get(list_categories))
        .route("/documents/products/full", get(full_inventory_document))
        .route("/documents/products/low-stock", get(low_stock_document))
        .with_state(shared_service)
}

fn attachment(document: Document) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", document.filename),
            ),
            (header::CONTENT_LENGTH, document.bytes.len().to_string()),
        ],
        document.bytes,
    )
}

/// List products, newest first
#[utoipa::path(
    get,
    path = "/products",
    tag = PRODUCTS_TAG,
    params(ProductListQuery),
    responses(
        (status = 200, description = "One page of products", body = Vec<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ProductListQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products(query).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products",
    tag = PRODUCTS_TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Update the supplied fields of a product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeleteResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<DeleteResponse>> {
    let response = service.delete_product(id).await?;
    Ok(Json(response))
}

/// Inventory totals and top categories
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn dashboard_stats<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<DashboardStats>> {
    let stats = service.dashboard_stats().await?;
    Ok(Json(stats))
}

/// Distinct product categories in ascending order
#[utoipa::path(
    get,
    path = "/categories",
    tag = PRODUCTS_TAG,
    responses(
        (status = 200, description = "Category names", body = CategoryList),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<CategoryList>> {
    let categories = service.categories().await?;
    Ok(Json(categories))
}

/// Complete product inventory as a PDF attachment
#[utoipa::path(
    get,
    path = "/documents/products/full",
    tag = DOCUMENTS_TAG,
    responses(
        (
            status = 200,
            description = "PDF document",
            content_type = "application/pdf",
            body = Vec<u8>
        ),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn full_inventory_document<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<impl IntoResponse> {
    let document = service.full_inventory_report(Utc::now()).await?;
    Ok(attachment(document))
}

/// Low stock alert report as a PDF attachment
#[utoipa::path(
    get,
    path = "/documents/products/low-stock",
    tag = DOCUMENTS_TAG,
    responses(
        (
            status = 200,
            description = "PDF document",
            content_type = "application/pdf",
            body = Vec<u8>
        ),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn low_stock_document<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<impl IntoResponse> {
    let document = service.low_stock_report(Utc::now()).await?;
    Ok(attachment(document))
}
