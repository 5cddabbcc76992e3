//! Data models for the storefront
//!
//! This module contains the catalog, search and cart data structures.

mod cart;
mod criteria;
mod product;

pub use cart::{Cart, CartError, CartItem, Wishlist, WishlistItem};
pub use criteria::{PriceBracket, SearchCriteria, SortKey};
pub use product::{Product, BADGE_BESTSELLER, BADGE_NEW_ARRIVAL};

#[cfg(test)]
pub(crate) use product::fixtures;
