//! Sorting utilities for catalog products

use std::cmp::Ordering;

use crate::models::{Product, SortKey};

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sorting library
pub struct SortLib;

impl SortLib {
    /// Sort products in place by a storefront sort key. The sort is stable.
    pub fn sort_products(products: &mut [Product], key: SortKey) {
        match key {
            SortKey::PriceAsc => Self::sort_by_price(products, SortOrder::Ascending),
            SortKey::PriceDesc => Self::sort_by_price(products, SortOrder::Descending),
            SortKey::Newest => products.sort_by(|a, b| b.id.cmp(&a.id)),
            SortKey::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortKey::Featured => products.sort_by(Self::featured_cmp),
        }
    }

    /// Sort products by effective price
    pub fn sort_by_price(products: &mut [Product], order: SortOrder) {
        products.sort_by(|a, b| {
            let cmp = a.effective_price().total_cmp(&b.effective_price());

            match order {
                SortOrder::Ascending => cmp,
                SortOrder::Descending => cmp.reverse(),
            }
        });
    }

    /// Featured ordering: unpromoted products first, promoted ones
    /// ("New Arrival", "Bestseller") after them, each group by rating
    /// descending.
    ///
    /// Promoted items sinking to the end is how the storefront has always
    /// ordered this view; keep it until product owners decide otherwise.
    fn featured_cmp(a: &Product, b: &Product) -> Ordering {
        a.is_promoted()
            .cmp(&b.is_promoted())
            .then_with(|| b.rating.total_cmp(&a.rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::product;
    use crate::models::{BADGE_BESTSELLER, BADGE_NEW_ARRIVAL};

    fn ids(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.id).collect()
    }

    fn priced() -> Vec<Product> {
        let mut skirt = product(3, "Malong Inspired Skirt", "Skirts", 1999.99);
        skirt.is_on_sale = true;
        skirt.sale_price = Some(1599.99);

        let gown = product(6, "Piña Silk Evening Gown", "Dresses", 8999.99);
        let clutch = product(12, "Beaded Clutch", "Bags", 999.99);

        vec![gown, skirt, clutch]
    }

    #[test]
    fn test_price_ascending_uses_sale_price() {
        let mut products = priced();
        SortLib::sort_products(&mut products, SortKey::PriceAsc);

        let prices: Vec<f64> = products.iter().map(Product::effective_price).collect();
        assert_eq!(prices, vec![999.99, 1599.99, 8999.99]);

        // input order does not matter
        products.reverse();
        SortLib::sort_products(&mut products, SortKey::PriceAsc);
        assert_eq!(ids(&products), vec![12, 3, 6]);
    }

    #[test]
    fn test_price_descending() {
        let mut products = priced();
        SortLib::sort_products(&mut products, SortKey::PriceDesc);
        assert_eq!(ids(&products), vec![6, 3, 12]);
    }

    #[test]
    fn test_newest_and_rating() {
        let mut products = priced();
        products[0].rating = 5.0;
        products[1].rating = 4.7;
        products[2].rating = 4.9;

        SortLib::sort_products(&mut products, SortKey::Newest);
        assert_eq!(ids(&products), vec![12, 6, 3]);

        SortLib::sort_products(&mut products, SortKey::Rating);
        assert_eq!(ids(&products), vec![6, 12, 3]);
    }

    #[test]
    fn test_featured_puts_promoted_last() {
        let mut fresh = product(1, "Filipiniana Modern Dress", "Dresses", 4999.99);
        fresh.badge = Some(BADGE_NEW_ARRIVAL.to_string());
        fresh.rating = 4.8;

        let mut best = product(3, "Malong Inspired Skirt", "Skirts", 1999.99);
        best.badge = Some(BADGE_BESTSELLER.to_string());
        best.rating = 4.7;

        let mut luxury = product(6, "Piña Silk Evening Gown", "Dresses", 8999.99);
        luxury.badge = Some("Luxury".to_string());
        luxury.rating = 5.0;

        let mut plain = product(2, "Barong Tagalog Slim Fit", "Traditional", 3999.99);
        plain.rating = 4.6;

        let mut products = vec![fresh, best, luxury, plain];
        SortLib::sort_products(&mut products, SortKey::Featured);
        assert_eq!(ids(&products), vec![6, 2, 1, 3]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut products = vec![
            product(1, "a", "Tops", 500.0),
            product(2, "b", "Tops", 500.0),
            product(3, "c", "Tops", 500.0),
        ];
        SortLib::sort_products(&mut products, SortKey::PriceAsc);
        assert_eq!(ids(&products), vec![1, 2, 3]);

        SortLib::sort_products(&mut products, SortKey::Rating);
        assert_eq!(ids(&products), vec![1, 2, 3]);
    }
}
