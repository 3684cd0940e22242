//! Preview Renderer
//!
//! Builds the snapshot of an offer shown to customers. A snapshot is taken
//! at one point in time and does not follow later cart changes.

use super::pricing::{compute_total, format_money};
use super::raster;
use crate::catalog::models::Product;
use crate::error::OfferResult;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub const TITLE: &str = "سفير الشام";
pub const SUBTITLE: &str = "عرض اليوم";
pub const TOTAL_LABEL: &str = "المجموع";
pub const DELIVERY_LABEL: &str = "تكلفة التوصيل";
pub const TRANSFER_LABEL: &str = "تكلفة التحويل";
pub const CURRENCY: &str = "€";

/// File name offered when exporting the rendered preview
pub const PREVIEW_FILE_NAME: &str = "offer.png";

const SEPARATOR: &str = "--------------------";

const CARD_WIDTH: u32 = 600;
const PADDING: u32 = 24;
const LINE_HEIGHT: u32 = 28;
const FONT_FAMILY: &str = "Noto Naskh Arabic, Noto Sans Arabic, DejaVu Sans, sans-serif";

/// Materialized rendering of an offer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub title: String,
    pub subtitle: String,
    /// Free-text caption, stored verbatim
    pub caption: String,
    /// One `"<name> — <price> €"` line per cart item, in cart order
    pub lines: Vec<String>,
    pub delivery_line: Option<String>,
    pub transfer_line: Option<String>,
    pub total: Decimal,
    /// `"<total> €"`
    pub total_line: String,
    pub generated_at: DateTime<Utc>,
}

/// True when there is something worth previewing
pub fn has_content(items: &[Product], delivery_cost: Decimal, transfer_cost: Decimal) -> bool {
    !items.is_empty() || delivery_cost > Decimal::ZERO || transfer_cost > Decimal::ZERO
}

fn money(value: Decimal) -> String {
    format!("{} {}", format_money(value), CURRENCY)
}

/// Renders the offer in its fixed layout.
pub fn render(
    items: &[Product],
    caption: &str,
    delivery_cost: Decimal,
    transfer_cost: Decimal,
) -> Snapshot {
    let lines = items
        .iter()
        .map(|p| format!("{} — {}", p.name, money(p.price)))
        .collect();

    let delivery_line =
        (delivery_cost > Decimal::ZERO).then(|| format!("{}: {}", DELIVERY_LABEL, money(delivery_cost)));
    let transfer_line =
        (transfer_cost > Decimal::ZERO).then(|| format!("{}: {}", TRANSFER_LABEL, money(transfer_cost)));

    let total = compute_total(items, delivery_cost, transfer_cost);

    Snapshot {
        title: TITLE.to_string(),
        subtitle: SUBTITLE.to_string(),
        caption: caption.to_string(),
        lines,
        delivery_line,
        transfer_line,
        total,
        total_line: money(total),
        generated_at: Utc::now(),
    }
}

impl Snapshot {
    fn surcharge_lines(&self) -> impl Iterator<Item = &String> {
        self.delivery_line.iter().chain(self.transfer_line.iter())
    }

    /// Plain-text rendering, one element per line
    pub fn to_text(&self) -> String {
        let mut out: Vec<&str> = vec![
            self.title.as_str(),
            self.subtitle.as_str(),
            self.caption.as_str(),
            SEPARATOR,
        ];
        out.extend(self.lines.iter().map(String::as_str));
        out.push(SEPARATOR);
        out.extend(self.surcharge_lines().map(String::as_str));
        out.push(SEPARATOR);

        let mut text = out.join("\n");
        text.push('\n');
        text.push_str(&format!("{}: {}", TOTAL_LABEL, self.total_line));
        text
    }

    /// SVG card used for the exported image.
    ///
    /// Caption and product names are user text and are escaped here; this is
    /// the only place raw text turns into markup.
    pub fn to_svg(&self) -> String {
        let mut body = String::new();
        let mut y = PADDING;

        y += 32;
        body.push_str(&centered(y, 24, "font-weight=\"bold\" fill=\"#0d6efd\"", &self.title));
        y += 34;
        body.push_str(&centered(y, 20, "fill=\"#111827\"", &self.subtitle));
        y += 30;
        body.push_str(&centered(y, 16, "fill=\"#4b5563\"", &self.caption));

        for block in [
            self.lines.iter().collect::<Vec<_>>(),
            self.surcharge_lines().collect::<Vec<_>>(),
        ] {
            y += 20;
            body.push_str(&rule(y));
            for line in block {
                y += LINE_HEIGHT;
                body.push_str(&format!(
                    "<text x=\"{}\" y=\"{}\" font-size=\"16\" text-anchor=\"end\" fill=\"#111827\">{}</text>\n",
                    CARD_WIDTH - PADDING,
                    y,
                    escape_xml(line)
                ));
            }
        }

        y += 48;
        let total = format!("{}: {}", TOTAL_LABEL, self.total_line);
        body.push_str(&centered(y, 28, "font-weight=\"bold\" fill=\"#111827\"", &total));

        let height = y + PADDING;
        format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" ",
                "direction=\"rtl\" font-family=\"{font}\">\n",
                "<rect x=\"1\" y=\"1\" width=\"{inner_w}\" height=\"{inner_h}\" rx=\"12\" ",
                "fill=\"#ffffff\" stroke=\"#2563eb\" stroke-width=\"2\"/>\n",
                "{body}",
                "</svg>\n"
            ),
            width = CARD_WIDTH,
            height = height,
            font = FONT_FAMILY,
            inner_w = CARD_WIDTH - 2,
            inner_h = height - 2,
            body = body,
        )
    }

    /// Rasterizes [`Snapshot::to_svg`] into PNG bytes
    pub fn to_png(&self) -> OfferResult<Vec<u8>> {
        raster::svg_to_png(&self.to_svg())
    }
}

fn centered(y: u32, size: u32, style: &str, text: &str) -> String {
    format!(
        "<text x=\"{}\" y=\"{}\" font-size=\"{}\" text-anchor=\"middle\" {}>{}</text>\n",
        CARD_WIDTH / 2,
        y,
        size,
        style,
        escape_xml(text)
    )
}

fn rule(y: u32) -> String {
    format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#e5e7eb\" stroke-width=\"1\"/>\n",
        PADDING,
        y,
        CARD_WIDTH - PADDING,
        y
    )
}

/// Escapes the five XML-significant characters
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Category;

    fn product(name: &str, price: Decimal) -> Product {
        Product {
            id: name.to_lowercase(),
            name: name.into(),
            category: Category::Groceries,
            price,
        }
    }

    #[test]
    fn lines_follow_cart_order_with_two_decimals() {
        let items = vec![product("Milk", Decimal::new(5, 0)), product("Tea", Decimal::new(75, 1))];
        let snapshot = render(&items, "Fresh today", Decimal::new(2, 0), Decimal::ONE);

        assert_eq!(snapshot.title, TITLE);
        assert_eq!(snapshot.subtitle, SUBTITLE);
        assert_eq!(snapshot.caption, "Fresh today");
        assert_eq!(snapshot.lines, ["Milk — 5.00 €", "Tea — 7.50 €"]);
        assert_eq!(snapshot.total, Decimal::new(155, 1));
        assert_eq!(snapshot.total_line, "15.50 €");
    }

    #[test]
    fn delivery_line_only_when_positive() {
        let items = vec![product("Milk", Decimal::ONE)];

        let without = render(&items, "", Decimal::ZERO, Decimal::new(3, 0));
        assert_eq!(without.delivery_line, None);
        assert_eq!(without.transfer_line.as_deref(), Some("تكلفة التحويل: 3.00 €"));

        let with = render(&items, "", Decimal::new(2, 0), Decimal::ZERO);
        assert_eq!(with.delivery_line.as_deref(), Some("تكلفة التوصيل: 2.00 €"));
        assert_eq!(with.transfer_line, None);
    }

    #[test]
    fn text_rendering_has_fixed_order() {
        let snapshot = render(&[product("Milk", Decimal::ONE)], "hi", Decimal::new(2, 0), Decimal::ZERO);
        let text = snapshot.to_text();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], TITLE);
        assert_eq!(lines[1], SUBTITLE);
        assert_eq!(lines[2], "hi");
        assert_eq!(lines[3], SEPARATOR);
        assert_eq!(lines[4], "Milk — 1.00 €");
        assert_eq!(lines[5], SEPARATOR);
        assert_eq!(lines[6], "تكلفة التوصيل: 2.00 €");
        assert_eq!(lines[7], SEPARATOR);
        assert_eq!(lines[8], "المجموع: 3.00 €");
    }

    #[test]
    fn svg_escapes_user_text() {
        let items = vec![product("<b>Milk</b>", Decimal::ONE)];
        let svg = render(&items, "<script>alert('x')</script>", Decimal::ZERO, Decimal::ZERO).to_svg();

        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(svg.contains("&lt;b&gt;Milk&lt;/b&gt; — 1.00 €"));
    }

    #[test]
    fn svg_card_grows_with_lines() {
        let one = render(&[product("Milk", Decimal::ONE)], "", Decimal::ZERO, Decimal::ZERO);
        let two = render(
            &[product("Milk", Decimal::ONE), product("Tea", Decimal::ONE)],
            "",
            Decimal::ONE,
            Decimal::ZERO,
        );

        let height = |svg: String| -> u32 {
            let start = svg.find("height=\"").unwrap() + 8;
            let end = start + svg[start..].find('"').unwrap();
            svg[start..end].parse().unwrap()
        };
        assert_eq!(height(two.to_svg()) - height(one.to_svg()), 2 * LINE_HEIGHT);
    }

    #[test]
    fn png_export_has_png_signature() {
        let snapshot = render(&[product("Milk", Decimal::ONE)], "Fresh", Decimal::ZERO, Decimal::ZERO);
        let png = snapshot.to_png().unwrap();
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn content_rule() {
        assert!(!has_content(&[], Decimal::ZERO, Decimal::ZERO));
        assert!(has_content(&[], Decimal::ONE, Decimal::ZERO));
        assert!(has_content(&[], Decimal::ZERO, Decimal::ONE));
        assert!(has_content(&[product("Milk", Decimal::ONE)], Decimal::ZERO, Decimal::ZERO));
    }
}
