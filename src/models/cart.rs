//! Cart and wishlist models

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Product;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity for product {0} is too large")]
    QuantityOverflow(u32),
}

/// A line in the shopping cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: u32,
    pub name: String,
    /// Unit price at the time the item was added
    pub price: f64,
    pub image: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CartItem {
    /// Build a cart line for a product at its effective price
    pub fn from_product(
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.effective_price(),
            image: product.image.clone(),
            quantity,
            size,
            color,
        }
    }

    fn same_variant(&self, other: &CartItem) -> bool {
        self.id == other.id && self.size == other.size && self.color == other.color
    }
}

/// Cart contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Add an item, merging the quantity into an existing line of the same variant
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.same_variant(&item)) {
            existing.quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CartError::QuantityOverflow(item.id))?;
        } else {
            self.items.push(item);
        }
        Ok(())
    }

    /// Remove every line for a product, returning whether anything was removed
    pub fn remove_item(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Set the quantity on every line of a product; zero or less removes it
    pub fn update_quantity(&mut self, id: u32, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        for item in self.items.iter_mut().filter(|i| i.id == id) {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price times quantity
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.price * i.quantity as f64)
            .sum()
    }

    /// Number of units across all lines
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

/// A saved-for-later product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub is_on_sale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
}

impl From<&Product> for WishlistItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            is_on_sale: product.is_on_sale,
            sale_price: product.sale_price,
        }
    }
}

/// Wishlist contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(default)]
    pub items: Vec<WishlistItem>,
}

impl Wishlist {
    /// Add an item unless it is already listed, returning whether it was added
    pub fn add_item(&mut self, item: WishlistItem) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove_item(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    pub fn contains(&self, id: u32) -> bool {
        self.items.iter().any(|i| i.id == id)
    }
}
