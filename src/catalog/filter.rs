//! Read-side catalog views
//!
//! Pure projections over a product slice; nothing here mutates the catalog.

use super::models::{Category, CategoryGroup, Product};

/// Case-insensitive substring match on product names.
///
/// A blank term returns every product in its original order.
pub fn filter_by_name<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return products.iter().collect();
    }

    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Partitions products by category.
///
/// Groups appear in the order their category is first seen and each group
/// keeps the relative order of its products.
pub fn group_by_category<'a, I>(products: I) -> Vec<CategoryGroup>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for product in products {
        match groups.iter_mut().find(|g| g.category == product.category) {
            Some(group) => group.products.push(product.clone()),
            None => groups.push(CategoryGroup {
                category: product.category,
                label: product.category.label(),
                products: vec![product.clone()],
            }),
        }
    }

    groups
}

/// Products eligible for random offers: in `category` and priced at most `max_price`
pub fn eligible_for<'a>(
    products: &'a [Product],
    category: Category,
    max_price: rust_decimal::Decimal,
) -> impl Iterator<Item = &'a Product> {
    products
        .iter()
        .filter(move |p| p.category == category && p.price <= max_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(name: &str, category: Category) -> Product {
        Product {
            id: name.to_lowercase(),
            name: name.into(),
            category,
            price: Decimal::ONE,
        }
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        let catalog = vec![
            product("Milk", Category::Groceries),
            product("Card", Category::Gifts),
        ];
        let names: Vec<_> = filter_by_name(&catalog, "")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Milk", "Card"]);
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let catalog = vec![
            product("Milk", Category::Groceries),
            product("milk2", Category::Groceries),
            product("Bread", Category::Groceries),
        ];
        let names: Vec<_> = filter_by_name(&catalog, "mil")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Milk", "milk2"]);
        assert!(filter_by_name(&catalog, "cheese").is_empty());
    }

    #[test]
    fn grouping_keeps_first_seen_category_order() {
        let catalog = vec![
            product("Card", Category::Gifts),
            product("Milk", Category::Groceries),
            product("Flowers", Category::Gifts),
            product("Top-up", Category::MobileCredit),
        ];
        let groups = group_by_category(&catalog);

        let categories: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(
            categories,
            [Category::Gifts, Category::Groceries, Category::MobileCredit]
        );
        let gifts: Vec<_> = groups[0].products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(gifts, ["Card", "Flowers"]);
        assert_eq!(groups[0].label, "هدايا");
    }
}
