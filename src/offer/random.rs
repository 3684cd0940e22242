//! Random bundle selection
//!
//! Picks a "surprise" offer from the target category without exceeding a
//! budget ceiling. The eligible products are shuffled uniformly and then
//! walked greedily: a product is taken when it still fits and skipped
//! otherwise. This does not try to maximize the item count.

use crate::catalog::filter::eligible_for;
use crate::catalog::models::{Category, Product};
use crate::error::{OfferError, OfferResult};
use rand::{seq::SliceRandom, Rng};
use rust_decimal::Decimal;

/// The only category random offers are drawn from
pub const TARGET_CATEGORY: Category = Category::Groceries;

/// Selects a bundle from `catalog` whose total stays within `max_value`.
pub fn select_bundle<R: Rng + ?Sized>(
    catalog: &[Product],
    max_value: Decimal,
    rng: &mut R,
) -> OfferResult<Vec<Product>> {
    if max_value <= Decimal::ZERO {
        return Err(OfferError::InvalidArgument(
            "الرجاء إدخال قيمة قصوى موجبة للعرض العشوائي.".to_string(),
        ));
    }

    let mut candidates: Vec<&Product> = eligible_for(catalog, TARGET_CATEGORY, max_value).collect();
    if candidates.is_empty() {
        return Err(OfferError::EmptySelection { max_value });
    }

    candidates.shuffle(rng);

    let mut running_total = Decimal::ZERO;
    let mut selection = Vec::new();
    for product in candidates {
        match running_total.checked_add(product.price) {
            Some(next) if next <= max_value => {
                running_total = next;
                selection.push(product.clone());
            }
            _ => {}
        }
    }

    tracing::debug!(
        max_value = %max_value,
        selected = selection.len(),
        total = %running_total,
        "Random bundle selected"
    );

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn product(id: &str, category: Category, cents: i64) -> Product {
        Product {
            id: id.into(),
            name: id.into(),
            category,
            price: Decimal::new(cents, 2),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("rice", Category::Groceries, 450),
            product("oil", Category::Groceries, 899),
            product("sugar", Category::Groceries, 210),
            product("tea", Category::Groceries, 375),
            product("dates", Category::Groceries, 1200),
            product("card", Category::Gifts, 100),
            product("sim", Category::MobileCredit, 50),
        ]
    }

    #[test]
    fn non_positive_ceiling_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        for max in [Decimal::ZERO, Decimal::new(-5, 0)] {
            let err = select_bundle(&catalog(), max, &mut rng).unwrap_err();
            assert!(matches!(err, OfferError::InvalidArgument(_)));
        }
    }

    #[test]
    fn ceiling_below_every_price_is_an_empty_selection() {
        let mut rng = StdRng::seed_from_u64(2);
        let max = Decimal::new(2, 0);
        let err = select_bundle(&catalog(), max, &mut rng).unwrap_err();
        assert_eq!(err, OfferError::EmptySelection { max_value: max });
    }

    #[test]
    fn selection_respects_category_and_budget() {
        let catalog = catalog();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let max = Decimal::new(1000 + (seed as i64 % 7) * 150, 2);
            let bundle = select_bundle(&catalog, max, &mut rng).unwrap();

            assert!(!bundle.is_empty());
            assert!(bundle.iter().all(|p| p.category == TARGET_CATEGORY));
            assert!(bundle.iter().all(|p| p.price <= max));
            let total: Decimal = bundle.iter().map(|p| p.price).sum();
            assert!(total <= max, "seed {seed}: {total} > {max}");

            let ids: HashSet<_> = bundle.iter().map(|p| &p.id).collect();
            assert_eq!(ids.len(), bundle.len(), "no product is picked twice");
        }
    }

    #[test]
    fn greedy_walk_takes_everything_that_fits() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(7);
        // Every grocery item together costs 31.34
        let bundle = select_bundle(&catalog, Decimal::new(5000, 2), &mut rng).unwrap();
        assert_eq!(bundle.len(), 5);
    }

    #[test]
    fn ceiling_at_decimal_max_does_not_overflow() {
        let huge = Decimal::MAX - Decimal::ONE;
        let catalog = vec![
            Product {
                price: huge,
                ..product("gold", Category::Groceries, 0)
            },
            Product {
                price: huge,
                ..product("silver", Category::Groceries, 0)
            },
        ];
        let mut rng = StdRng::seed_from_u64(11);

        let bundle = select_bundle(&catalog, Decimal::MAX, &mut rng).unwrap();
        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn different_seeds_produce_different_orders() {
        let catalog = catalog();
        let orders: HashSet<Vec<String>> = (0..50)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                select_bundle(&catalog, Decimal::new(5000, 2), &mut rng)
                    .unwrap()
                    .into_iter()
                    .map(|p| p.id)
                    .collect()
            })
            .collect();
        assert!(orders.len() > 1);
    }
}
