use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

/// Items below this quantity count as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;
/// Items below this quantity are flagged critical in reports.
pub const CRITICAL_STOCK_THRESHOLD: i32 = 5;
/// Reorder suggestions top stock back up to this level.
pub const REORDER_TARGET: i32 = 20;
/// Smallest reorder suggestion.
pub const MIN_REORDER: i32 = 10;

/// Largest accepted unit price.
pub const MAX_PRICE: f64 = 99_999_999.99;

pub const DEFAULT_PAGE_LIMIT: i64 = 100;
pub const MAX_PAGE_LIMIT: i64 = 1000;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Round to cents, half away from zero.
pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Round a monetary aggregate to cents.
pub fn round_money(value: f64) -> f64 {
    round_price(value)
}

/// A stocked item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    /// Unit price, two fractional digits
    pub price: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    pub fn is_critical(&self) -> bool {
        self.quantity < CRITICAL_STOCK_THRESHOLD
    }

    /// quantity x price
    pub fn total_value(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }

    /// Units to order to get back to [`REORDER_TARGET`], never fewer than [`MIN_REORDER`].
    pub fn reorder_quantity(&self) -> i32 {
        (REORDER_TARGET - self.quantity).max(MIN_REORDER)
    }
}

/// Request body for creating a product
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(
        length(max = 255, message = "name must be at most 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(
        length(max = 100, message = "category must be at most 100 characters"),
        custom(function = "not_blank")
    )]
    pub category: String,
    #[validate(range(min = 0, message = "quantity must be 0 or greater"))]
    pub quantity: i32,
    #[validate(range(
        exclusive_min = 0.0,
        max = 99999999.99,
        message = "price must be greater than 0 and at most 99999999.99"
    ))]
    pub price: f64,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateProduct {
    /// Trimmed name/category and cent-rounded price.
    ///
    /// Fails when the rounded price leaves `0.01..=MAX_PRICE`.
    pub fn normalize(self) -> Result<Self, ValidationErrors> {
        Ok(Self {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            quantity: self.quantity,
            price: normalize_price(self.price)?,
            description: self.description,
        })
    }
}

/// Request body for a partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(
        length(max = 255, message = "name must be at most 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    #[validate(
        length(max = 100, message = "category must be at most 100 characters"),
        custom(function = "not_blank")
    )]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "quantity must be 0 or greater"))]
    pub quantity: Option<i32>,
    #[validate(range(
        exclusive_min = 0.0,
        max = 99999999.99,
        message = "price must be greater than 0 and at most 99999999.99"
    ))]
    pub price: Option<f64>,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
}

impl UpdateProduct {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.description.is_none()
    }

    pub fn normalize(self) -> Result<Self, ValidationErrors> {
        Ok(Self {
            name: self.name.map(|n| n.trim().to_string()),
            category: self.category.map(|c| c.trim().to_string()),
            quantity: self.quantity,
            price: self.price.map(normalize_price).transpose()?,
            description: self.description,
        })
    }
}

fn normalize_price(price: f64) -> Result<f64, ValidationErrors> {
    let rounded = round_price(price);
    if rounded.is_finite() && rounded > 0.0 && rounded <= MAX_PRICE {
        return Ok(rounded);
    }
    let mut errors = ValidationErrors::new();
    errors.add(
        "price",
        ValidationError::new("range")
            .with_message("price must be between 0.01 and 99999999.99 after rounding".into()),
    );
    Err(errors)
}

/// Conditions for selecting products; every present field narrows the result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive substring of name or description
    pub search: Option<String>,
    /// Only items below [`LOW_STOCK_THRESHOLD`]
    pub low_stock: bool,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
}

impl ProductFilter {
    pub fn low_stock() -> Self {
        Self {
            low_stock: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// In-process equivalent of the SQL the query builder emits.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }
        if let Some(min) = self.min_price
            && product.price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && product.price > max
        {
            return false;
        }
        if let Some(min) = self.min_quantity
            && product.quantity < min
        {
            return false;
        }
        if let Some(max) = self.max_quantity
            && product.quantity > max
        {
            return false;
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&term);
            let in_description = product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term));
            if !in_name && !in_description {
                return false;
            }
        }
        !self.low_stock || product.is_low_stock()
    }
}

/// Offset pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

fn validate_bounds(query: &ProductListQuery) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (query.min_price, query.max_price)
        && max < min
    {
        return Err(ValidationError::new("price_range")
            .with_message("max_price must be greater than or equal to min_price".into()));
    }
    if let (Some(min), Some(max)) = (query.min_quantity, query.max_quantity)
        && max < min
    {
        return Err(ValidationError::new("quantity_range").with_message(
            "max_quantity must be greater than or equal to min_quantity".into(),
        ));
    }
    Ok(())
}

/// Query string of `GET /products`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[validate(schema(function = "validate_bounds"))]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Rows to skip
    #[serde(default)]
    #[validate(range(min = 0, message = "skip must be 0 or greater"))]
    pub skip: i64,
    /// Page size, 1..=1000
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: i64,
    pub category: Option<String>,
    /// Substring of name or description
    pub search: Option<String>,
    /// Only items with quantity below 10
    #[serde(default)]
    pub low_stock: bool,
    #[validate(range(
        min = 0.0,
        max = 99999999.99,
        message = "min_price must be between 0 and 99999999.99"
    ))]
    pub min_price: Option<f64>,
    #[validate(range(
        min = 0.0,
        max = 99999999.99,
        message = "max_price must be between 0 and 99999999.99"
    ))]
    pub max_price: Option<f64>,
    #[validate(range(min = 0, message = "min_quantity must be 0 or greater"))]
    pub min_quantity: Option<i32>,
    #[validate(range(min = 0, message = "max_quantity must be 0 or greater"))]
    pub max_quantity: Option<i32>,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
            category: None,
            search: None,
            low_stock: false,
            min_price: None,
            max_price: None,
            min_quantity: None,
            max_quantity: None,
        }
    }
}

impl ProductListQuery {
    /// Splits into filter and page; blank text filters are dropped.
    pub fn into_parts(self) -> (ProductFilter, Pagination) {
        let non_blank =
            |s: Option<String>| s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let filter = ProductFilter {
            category: non_blank(self.category),
            search: non_blank(self.search),
            low_stock: self.low_stock,
            min_price: self.min_price,
            max_price: self.max_price,
            min_quantity: self.min_quantity,
            max_quantity: self.max_quantity,
        };
        let page = Pagination {
            skip: self.skip,
            limit: self.limit,
        };
        (filter, page)
    }
}

/// Product count within one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct CategoryStats {
    pub name: String,
    pub count: i64,
}

/// Aggregate figures for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total_products: i64,
    /// Distinct categories
    pub total_categories: i64,
    pub low_stock_count: i64,
    /// Sum of quantity x price, rounded to cents
    pub total_inventory_value: f64,
    /// Created in the trailing 7 days
    pub recent_products: i64,
    /// Up to 5 categories by product count; ties in name order
    pub top_categories: Vec<CategoryStats>,
}

/// `GET /categories` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryList {
    pub categories: Vec<String>,
}

/// Confirmation body of `DELETE /products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn for_product(name: &str) -> Self {
        Self {
            message: format!("Product '{name}' deleted successfully"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

/// Row shape of `product_audit`. Reserved: nothing writes audit rows yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuditLog {
    pub id: i64,
    pub product_id: Option<i64>,
    pub action: AuditAction,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub changed_by: Option<String>,
    pub changed_at: DateTime<Utc>,
}
