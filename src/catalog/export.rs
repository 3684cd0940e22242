//! Catalog export to delimited text (`products.csv`)
//!
//! Quoting follows the `csv` crate defaults: fields containing the
//! delimiter, a double quote or a line break are quoted with inner quotes
//! doubled. A UTF-8 BOM is written first so spreadsheet tools pick up the
//! Arabic category labels.

use super::models::{Category, Product};
use crate::error::{OfferError, OfferResult};
use crate::offer::pricing::format_money;
use rust_decimal::Decimal;
use serde::Deserialize;

/// File name offered for download
pub const CSV_FILE_NAME: &str = "products.csv";

const BOM: char = '\u{FEFF}';

/// Types that can be written as one CSV row
pub trait CsvExportable {
    /// Column headers, in row order
    fn headers() -> Vec<&'static str>;

    /// Cell values for this record
    fn to_csv_row(&self) -> Vec<String>;
}

impl CsvExportable for Product {
    fn headers() -> Vec<&'static str> {
        vec!["id", "name", "category", "price"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.category.label().to_string(),
            format_money(self.price),
        ]
    }
}

/// A product row read back from an exported file
#[derive(Debug, Clone, PartialEq)]
pub struct CsvProductRow {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub price: Decimal,
}

/// Raw cells of one exported row, matched by header name
#[derive(Debug, Deserialize)]
struct CsvRecord {
    id: String,
    name: String,
    category: String,
    price: String,
}

/// Writes records as CSV; an empty slice is rejected.
pub fn export_csv<T: CsvExportable>(records: &[T]) -> OfferResult<String> {
    if records.is_empty() {
        return Err(OfferError::EmptyCatalog);
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(BOM.to_string().into_bytes());

    writer.write_record(T::headers()).map_err(write_error)?;
    for record in records {
        writer.write_record(record.to_csv_row()).map_err(write_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OfferError::Internal(format!("csv flush: {}", e.error())))?;
    String::from_utf8(bytes).map_err(|e| OfferError::Internal(format!("csv utf-8: {}", e)))
}

fn write_error(err: csv::Error) -> OfferError {
    OfferError::Internal(format!("csv write: {}", err))
}

/// Reads a file produced by [`export_csv`] back into product rows.
pub fn parse_csv(text: &str) -> OfferResult<Vec<CsvProductRow>> {
    let text = text.trim_start_matches(BOM);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<CsvRecord>().enumerate() {
        // Line 1 is the header
        let line = index + 2;
        let record = result.map_err(|e| OfferError::Validation(format!("السطر {}: {}", line, e)))?;

        let category = Category::parse(&record.category).ok_or_else(|| {
            OfferError::Validation(format!("السطر {}: فئة غير معروفة {:?}", line, record.category))
        })?;
        let price = record.price.trim().parse::<Decimal>().map_err(|_| {
            OfferError::Validation(format!("السطر {}: سعر غير صالح {:?}", line, record.price))
        })?;

        rows.push(CsvProductRow {
            id: record.id,
            name: record.name,
            category,
            price,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, category: Category, price: Decimal) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            category,
            price,
        }
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let products: Vec<Product> = Vec::new();
        assert_eq!(export_csv(&products), Err(OfferError::EmptyCatalog));
    }

    #[test]
    fn rows_have_bom_header_and_two_decimal_prices() {
        let csv = export_csv(&[product("a1", "Rice", Category::Groceries, Decimal::new(4, 0))]).unwrap();
        assert!(csv.starts_with(BOM));

        let mut lines = csv.trim_start_matches(BOM).split("\r\n");
        assert_eq!(lines.next(), Some("id,name,category,price"));
        assert_eq!(lines.next(), Some("a1,Rice,مواد غذائية,4.00"));
        assert_eq!(lines.next(), Some(""));
    }

    #[test]
    fn quotes_and_delimiters_are_escaped() {
        let csv = export_csv(&[
            product("a", "12\" pizza", Category::Groceries, Decimal::ONE),
            product("b", "Roses, red", Category::Gifts, Decimal::ONE),
        ])
        .unwrap();

        assert!(csv.contains("a,\"12\"\" pizza\",مواد غذائية,1.00"));
        assert!(csv.contains("b,\"Roses, red\",هدايا,1.00"));
    }

    #[test]
    fn export_then_parse_recovers_products() {
        let products = vec![
            product("a", "12\" pizza", Category::Groceries, Decimal::new(899, 2)),
            product("b", "Roses, red", Category::Gifts, Decimal::new(15, 0)),
            product("c", "Line\nbreak", Category::Service, Decimal::new(5, 1)),
            product("d", "Top-up", Category::MobileCredit, Decimal::new(10, 0)),
        ];

        let rows = parse_csv(&export_csv(&products).unwrap()).unwrap();

        let expected: Vec<_> = products
            .iter()
            .map(|p| (p.name.clone(), p.category, p.price))
            .collect();
        let actual: Vec<_> = rows
            .iter()
            .map(|r| (r.name.clone(), r.category, r.price))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn short_rows_and_bad_cells_are_errors() {
        assert!(parse_csv("id,name,category,price\r\na,Rice\r\n").is_err());
        assert!(parse_csv("id,name,category,price\r\na,Rice,furniture,1.00\r\n").is_err());
        assert!(parse_csv("id,name,category,price\r\na,Rice,gifts,cheap\r\n").is_err());
    }
}
