use chrono::{DateTime, Utc};

use super::pdf::{
    Align, Canvas, Cell, Color, Column, Font, GREY, SLATE, SummaryStyle, TableStyle, WHITE,
};
use super::{
    Document, FOOTER, FULL_REPORT_PREFIX, format_currency, format_price, generated_on,
    report_filename, truncate,
};
use crate::models::Product;

const ACCENT: Color = Color::hex(0x667eea);
const LOW_STOCK: Color = Color::hex(0xff9800);
const NAME_LIMIT: usize = 30;

const COLUMNS: [Column; 7] = [
    Column::new("ID", 28.8, Align::Center),
    Column::new("Name", 144.0, Align::Left),
    Column::new("Category", 86.4, Align::Left),
    Column::new("Quantity", 57.6, Align::Center),
    Column::new("Price", 57.6, Align::Center),
    Column::new("Total Value", 72.0, Align::Center),
    Column::new("Status", 72.0, Align::Center),
];

fn row(product: &Product) -> Vec<Cell> {
    let status = if product.is_low_stock() {
        Cell::emphasized("Low Stock", LOW_STOCK)
    } else {
        Cell::plain("In Stock")
    };
    vec![
        Cell::plain(product.id.to_string()),
        Cell::plain(truncate(&product.name, NAME_LIMIT)),
        Cell::plain(product.category.as_str()),
        Cell::plain(product.quantity.to_string()),
        Cell::plain(format_price(product.price)),
        Cell::plain(format_price(product.total_value())),
        status,
    ]
}

/// Every product with a summary header, in the order given.
pub fn full_inventory(products: &[Product], generated_at: DateTime<Utc>) -> Document {
    let total_quantity: i64 = products.iter().map(|p| i64::from(p.quantity)).sum();
    let total_value: f64 = products.iter().map(Product::total_value).sum();
    let low_stock = products.iter().filter(|p| p.is_low_stock()).count();

    let mut canvas = Canvas::new();
    canvas.centered("Complete Product Inventory", Font::Bold, 24.0, ACCENT);
    canvas.space(8.0);
    canvas.centered(&generated_on(generated_at), Font::Regular, 12.0, GREY);
    canvas.centered(
        &format!("Total Products: {}", products.len()),
        Font::Regular,
        12.0,
        GREY,
    );
    canvas.space(22.0);

    canvas.summary(
        &["Total Products", "Total Quantity", "Total Value", "Low Stock Items"],
        &[
            products.len().to_string(),
            total_quantity.to_string(),
            format_currency(total_value),
            low_stock.to_string(),
        ],
        &SummaryStyle {
            header_background: ACCENT,
            body_background: Color::hex(0xf0f4ff),
            value_color: SLATE,
            value_size: 12.0,
            column_width: 108.0,
        },
    );
    canvas.space(29.0);

    canvas.line("Product Details", Font::Bold, 14.0, SLATE);
    canvas.space(7.0);

    let rows: Vec<Vec<Cell>> = products.iter().map(row).collect();
    canvas.table(
        &COLUMNS,
        &rows,
        &TableStyle {
            header_background: ACCENT,
            stripes: [WHITE, Color::hex(0xf8f9ff)],
            font_size: 9.0,
            header_font_size: 10.0,
            row_height: 20.0,
            header_height: 28.0,
        },
    );

    canvas.space(22.0);
    canvas.centered(FOOTER, Font::Regular, 12.0, GREY);

    Document {
        filename: report_filename(FULL_REPORT_PREFIX, generated_at),
        bytes: canvas.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(id: i64, name: &str, quantity: i32, price: f64) -> Product {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
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

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_full_report_contents() {
        let products = vec![product(1, "Widget", 3, 5.0), product(2, "Gadget", 50, 2.0)];
        let document = full_inventory(&products, ts());
        let text = String::from_utf8_lossy(&document.bytes);

        assert!(document.bytes.starts_with(b"%PDF-"));
        assert_eq!(document.filename, "product_list_20261016_093000.pdf");
        assert!(text.contains("Complete Product Inventory"));
        assert!(text.contains("Generated on October 16, 2026 at 09:30 AM"));
        assert!(text.contains("Total Products: 2"));
        assert!(text.contains("$115.00"));
        assert!(text.contains("Low Stock"));
        assert!(text.contains("In Stock"));
        assert!(text.contains(FOOTER));
    }

    #[test]
    fn test_long_names_are_truncated() {
        let name = "Extra Long Industrial Grade Torque Wrench Set";
        let document = full_inventory(&[product(1, name, 30, 1.0)], ts());
        let text = String::from_utf8_lossy(&document.bytes);

        assert!(!text.contains(name));
        assert!(text.contains("Extra Long"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let products = vec![product(1, "Widget", 3, 5.0)];
        assert_eq!(full_inventory(&products, ts()), full_inventory(&products, ts()));
    }

    #[test]
    fn test_empty_inventory_still_renders() {
        let document = full_inventory(&[], ts());
        let text = String::from_utf8_lossy(&document.bytes);
        assert!(text.contains("Total Products: 0"));
        assert!(text.contains("$0.00"));
    }
}
