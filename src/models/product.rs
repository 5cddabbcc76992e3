//! Product model

use serde::{Deserialize, Serialize};

/// Badge shown on freshly stocked items
pub const BADGE_NEW_ARRIVAL: &str = "New Arrival";
/// Badge shown on best selling items
pub const BADGE_BESTSELLER: &str = "Bestseller";

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog sequence number, also used as a recency proxy
    pub id: u32,
    pub name: String,
    pub description: String,
    /// List price in pesos
    pub price: f64,
    /// Primary image reference
    pub image: String,
    /// Additional images, in display order
    #[serde(default)]
    pub gallery_images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    /// Promotional tag ("New Arrival", "Bestseller", "Limited Edition", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Average rating, 0 to 5
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default)]
    pub is_on_sale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
}

impl Product {
    /// Price the customer pays: the sale price when on sale, else the list price
    pub fn effective_price(&self) -> f64 {
        match (self.is_on_sale, self.sale_price) {
            (true, Some(sale)) => sale,
            _ => self.price,
        }
    }

    /// Check the badge, ignoring products without one
    pub fn has_badge(&self, badge: &str) -> bool {
        self.badge.as_deref() == Some(badge)
    }

    /// Tagged as a new arrival or a bestseller
    pub fn is_promoted(&self) -> bool {
        self.has_badge(BADGE_NEW_ARRIVAL) || self.has_badge(BADGE_BESTSELLER)
    }

    /// Check the record invariants, returning a description of the first violation
    pub fn validate(&self) -> Result<(), String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("product {} has an invalid price", self.id));
        }

        if !(0.0..=5.0).contains(&self.rating) {
            return Err(format!(
                "product {} has rating {} outside 0-5",
                self.id, self.rating
            ));
        }

        if self.is_on_sale {
            match self.sale_price {
                Some(sale) if sale.is_finite() && sale < self.price => {}
                Some(sale) => {
                    return Err(format!(
                        "product {} sale price {} is not below list price {}",
                        self.id, sale, self.price
                    ))
                }
                None => {
                    return Err(format!(
                        "product {} is on sale without a sale price",
                        self.id
                    ))
                }
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::product;
    use super::*;

    #[test]
    fn test_effective_price() {
        let mut p = product(1, "Skirt", "Skirts", 1999.99);
        assert_eq!(p.effective_price(), 1999.99);

        p.is_on_sale = true;
        p.sale_price = Some(1599.99);
        assert_eq!(p.effective_price(), 1599.99);

        // a stale sale price is ignored once the sale ends
        p.is_on_sale = false;
        assert_eq!(p.effective_price(), 1999.99);
    }

    #[test]
    fn test_promoted_badges() {
        let mut p = product(1, "Dress", "Dresses", 4999.99);
        assert!(!p.is_promoted());

        p.badge = Some(BADGE_BESTSELLER.to_string());
        assert!(p.is_promoted());

        p.badge = Some("Limited Edition".to_string());
        assert!(!p.is_promoted());
    }

    #[test]
    fn test_validate_sale_invariant() {
        let mut p = product(3, "Skirt", "Skirts", 1999.99);
        assert!(p.validate().is_ok());

        p.is_on_sale = true;
        assert!(p.validate().is_err());

        p.sale_price = Some(2500.0);
        assert!(p.validate().is_err());

        p.sale_price = Some(1599.99);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": 7,
            "name": "Abaca Woven Sandals",
            "description": "Handcrafted sandals",
            "price": 1499.99,
            "image": "/products/Abaca Woven Sandals.jpg",
            "galleryImages": [],
            "category": "Shoes",
            "sizes": ["36", "37"],
            "colors": ["Natural", "Black"],
            "stock": 45,
            "rating": 4.3,
            "reviewCount": 32,
            "material": "Abaca",
            "isOnSale": true,
            "salePrice": 1199.99
        }"#;

        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.review_count, 32);
        assert_eq!(p.effective_price(), 1199.99);
        assert_eq!(p.material.as_deref(), Some("Abaca"));
        assert!(p.badge.is_none());
    }
}
