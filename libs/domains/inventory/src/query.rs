//! SQL assembly for product reads and partial updates.
//!
//! Every user-supplied value is bound through a `$n` placeholder; only fixed
//! fragments defined in this module are ever spliced into the SQL text.

use sea_orm::{Statement, Value};

use crate::models::{LOW_STOCK_THRESHOLD, Pagination, ProductFilter, UpdateProduct};

/// Column list shared by every statement that materializes a [`crate::models::Product`].
pub const PRODUCT_COLUMNS: &str =
    "id, name, category, quantity, price, description, created_at, updated_at";

/// Row ordering for product listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductOrder {
    /// Most recently created first
    #[default]
    NewestFirst,
    /// Alphabetical
    ByName,
    /// Emptiest shelves first; used by the low-stock report
    LowestStockFirst,
}

impl ProductOrder {
    fn sql(self) -> &'static str {
        match self {
            Self::NewestFirst => "created_at DESC, id DESC",
            Self::ByName => "name ASC, id ASC",
            Self::LowestStockFirst => "quantity ASC, name ASC",
        }
    }
}

/// Escape `LIKE` wildcards so the term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Incremental `SELECT` builder.
///
/// ```
/// use domain_inventory::query::{ProductOrder, QueryBuilder};
/// use domain_inventory::models::ProductFilter;
///
/// let (sql, values) = QueryBuilder::select()
///     .filter(&ProductFilter::low_stock())
///     .order_by(ProductOrder::LowestStockFirst)
///     .build();
/// assert!(sql.ends_with("WHERE quantity < 10 ORDER BY quantity ASC, name ASC"));
/// assert!(values.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base: String,
    conditions: Vec<String>,
    values: Vec<Value>,
    order: Option<ProductOrder>,
    page: Option<Pagination>,
}

impl QueryBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            conditions: Vec::new(),
            values: Vec::new(),
            order: None,
            page: None,
        }
    }

    /// `SELECT <columns> FROM products`
    pub fn select() -> Self {
        Self::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"))
    }

    fn bind(&mut self, value: impl Into<Value>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }

    /// Append a condition with one bound value; `{}` in `template` becomes the placeholder.
    pub fn push_condition(mut self, template: &str, value: impl Into<Value>) -> Self {
        let placeholder = self.bind(value);
        self.conditions.push(template.replace("{}", &placeholder));
        self
    }

    pub fn filter(mut self, filter: &ProductFilter) -> Self {
        if let Some(category) = &filter.category {
            self = self.push_condition("category = {}", category.clone());
        }
        if let Some(min) = filter.min_price {
            self = self.push_condition("price >= {}", min);
        }
        if let Some(max) = filter.max_price {
            self = self.push_condition("price <= {}", max);
        }
        if let Some(min) = filter.min_quantity {
            self = self.push_condition("quantity >= {}", min);
        }
        if let Some(max) = filter.max_quantity {
            self = self.push_condition("quantity <= {}", max);
        }
        if let Some(term) = &filter.search {
            let pattern = format!("%{}%", escape_like(term));
            let name = self.bind(pattern.clone());
            let description = self.bind(pattern);
            self.conditions.push(format!("(name ILIKE {name} OR description ILIKE {description})"));
        }
        if filter.low_stock {
            self.conditions.push(format!("quantity < {LOW_STOCK_THRESHOLD}"));
        }
        self
    }

    pub fn order_by(mut self, order: ProductOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn paginate(mut self, page: Pagination) -> Self {
        self.page = Some(page);
        self
    }

    /// SQL text and its bound values, in placeholder order.
    pub fn build(mut self) -> (String, Vec<Value>) {
        let mut sql = self.base.clone();
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        if let Some(order) = self.order {
            sql.push_str(" ORDER BY ");
            sql.push_str(order.sql());
        }
        if let Some(page) = self.page {
            let limit = self.bind(page.limit);
            let offset = self.bind(page.skip);
            sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
        }
        (sql, self.values)
    }

    pub fn into_statement(self) -> Statement {
        let (sql, values) = self.build();
        database::postgres::sql::statement(sql, values)
    }
}

/// `UPDATE products SET ... WHERE id = $n RETURNING <columns>` for the supplied fields.
///
/// `None` when the update carries no fields.
pub fn build_update(id: i64, input: &UpdateProduct) -> Option<Statement> {
    let mut assignments = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    let mut set = |column: &str, value: Value| {
        values.push(value);
        assignments.push(format!("{column} = ${}", values.len()));
    };

    if let Some(name) = &input.name {
        set("name", name.clone().into());
    }
    if let Some(category) = &input.category {
        set("category", category.clone().into());
    }
    if let Some(quantity) = input.quantity {
        set("quantity", quantity.into());
    }
    if let Some(price) = input.price {
        set("price", price.into());
    }
    if let Some(description) = &input.description {
        set("description", description.clone().into());
    }

    if assignments.is_empty() {
        return None;
    }

    values.push(id.into());
    let sql = format!(
        "UPDATE products SET {}, updated_at = NOW() WHERE id = ${} RETURNING {PRODUCT_COLUMNS}",
        assignments.join(", "),
        values.len()
    );
    Some(database::postgres::sql::statement(sql, values))
}
