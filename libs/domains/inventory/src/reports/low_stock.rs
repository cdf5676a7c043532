use chrono::{DateTime, Utc};

use super::pdf::{Align, Canvas, Cell, Color, Column, Font, GREY, SLATE, SummaryStyle, TableStyle};
use super::{
    Document, FOOTER, LOW_STOCK_REPORT_PREFIX, format_currency, format_price, generated_on,
    report_filename, truncate,
};
use crate::models::{CRITICAL_STOCK_THRESHOLD, LOW_STOCK_THRESHOLD, Product};

const ACCENT: Color = Color::hex(0xff9800);
const CRITICAL: Color = Color::hex(0xdc2626);
const NAME_LIMIT: usize = 25;

const COLUMNS: [Column; 8] = [
    Column::new("Priority", 64.8, Align::Center),
    Column::new("ID", 28.8, Align::Center),
    Column::new("Name", 129.6, Align::Left),
    Column::new("Category", 79.2, Align::Left),
    Column::new("Qty", 36.0, Align::Center),
    Column::new("Price", 50.4, Align::Center),
    Column::new("Total Value", 64.8, Align::Center),
    Column::new("Reorder", 50.4, Align::Center),
];

const RECOMMENDATIONS: [&str; 4] = [
    "- Critical items (< 5 units): Immediate reorder required",
    "- Low stock items (< 10 units): Schedule reorder within 1-2 weeks",
    "- Suggested reorder quantities: Shown in \"Reorder\" column",
    "- Review pricing: Consider bulk purchase discounts for frequently low-stock items",
];

fn row(product: &Product) -> Vec<Cell> {
    let priority = if product.is_critical() {
        Cell::emphasized("Critical", CRITICAL)
    } else {
        Cell::plain("Low")
    };
    vec![
        priority,
        Cell::plain(product.id.to_string()),
        Cell::plain(truncate(&product.name, NAME_LIMIT)),
        Cell::plain(product.category.as_str()),
        Cell::plain(product.quantity.to_string()),
        Cell::plain(format_price(product.price)),
        Cell::plain(format_price(product.total_value())),
        Cell::plain(format!("+{}", product.reorder_quantity())),
    ]
}

/// Items below the low-stock threshold, emptiest first.
///
/// Any rows may be passed in; the selection happens here.
pub fn low_stock(products: &[Product], generated_at: DateTime<Utc>) -> Document {
    let mut low: Vec<&Product> = products.iter().filter(|p| p.is_low_stock()).collect();
    low.sort_by_key(|p| p.quantity);

    let mut canvas = Canvas::new();
    canvas.centered("Low Stock Alert Report", Font::Bold, 24.0, Color::hex(0x667eea));
    canvas.space(8.0);
    canvas.centered(&generated_on(generated_at), Font::Regular, 12.0, GREY);
    canvas.centered(
        &format!("Low Stock Items: {}", low.len()),
        Font::Regular,
        12.0,
        GREY,
    );
    canvas.space(22.0);

    if low.is_empty() {
        canvas.centered("All products are adequately stocked!", Font::Bold, 12.0, SLATE);
        canvas.space(10.0);
        canvas.centered(
            &format!("No items with quantity below {LOW_STOCK_THRESHOLD}."),
            Font::Regular,
            10.0,
            SLATE,
        );
    } else {
        let critical = low.iter().filter(|p| p.is_critical()).count();
        let at_risk: f64 = low.iter().map(|p| p.total_value()).sum();

        canvas.summary(
            &[
                "Low Stock Items",
                format!("Critical Items (< {CRITICAL_STOCK_THRESHOLD})").as_str(),
                "Total Value at Risk",
            ],
            &[low.len().to_string(), critical.to_string(), format_currency(at_risk)],
            &SummaryStyle {
                header_background: ACCENT,
                body_background: Color::hex(0xfff5f5),
                value_color: ACCENT,
                value_size: 14.0,
                column_width: 144.0,
            },
        );
        canvas.space(29.0);

        canvas.line("Products Requiring Attention", Font::Bold, 14.0, SLATE);
        canvas.space(7.0);

        let rows: Vec<Vec<Cell>> = low.iter().map(|p| row(p)).collect();
        canvas.table(
            &COLUMNS,
            &rows,
            &TableStyle {
                header_background: ACCENT,
                stripes: [Color::hex(0xfff5f5), Color::hex(0xffe8e8)],
                font_size: 9.0,
                header_font_size: 9.0,
                row_height: 20.0,
                header_height: 28.0,
            },
        );

        canvas.space(22.0);
        canvas.line("Recommendations", Font::Bold, 14.0, SLATE);
        for recommendation in RECOMMENDATIONS {
            canvas.line(recommendation, Font::Regular, 10.0, SLATE);
        }
    }

    canvas.space(22.0);
    canvas.centered(FOOTER, Font::Regular, 12.0, GREY);

    Document {
        filename: report_filename(LOW_STOCK_REPORT_PREFIX, generated_at),
        bytes: canvas.finish(),
    }
}
