//! Cart and wishlist stores persisted as JSON files

use std::path::PathBuf;

use super::persisted::{PersistedStore, StoreError};
use crate::models::{Cart, CartItem, Wishlist, WishlistItem};

/// Shopping cart store
pub struct CartStore {
    inner: PersistedStore<Cart>,
}

impl CartStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistedStore::open(path)?,
        })
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.inner.read(|cart| cart.items.clone())
    }

    pub fn total(&self) -> f64 {
        self.inner.read(Cart::total)
    }

    pub fn snapshot(&self) -> Cart {
        self.inner.read(Cart::clone)
    }

    pub fn add_item(&self, item: CartItem) -> Result<(), StoreError> {
        self.inner
            .try_update(|cart| cart.add_item(item).map_err(StoreError::from))
    }

    pub fn remove_item(&self, id: u32) -> Result<bool, StoreError> {
        self.inner.update(|cart| cart.remove_item(id))
    }

    pub fn update_quantity(&self, id: u32, quantity: i64) -> Result<(), StoreError> {
        self.inner.update(|cart| cart.update_quantity(id, quantity))
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.inner.update(Cart::clear)
    }
}

/// Wishlist store
pub struct WishlistStore {
    inner: PersistedStore<Wishlist>,
}

impl WishlistStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistedStore::open(path)?,
        })
    }

    pub fn items(&self) -> Vec<WishlistItem> {
        self.inner.read(|wishlist| wishlist.items.clone())
    }

    pub fn contains(&self, id: u32) -> bool {
        self.inner.read(|wishlist| wishlist.contains(id))
    }

    pub fn add_item(&self, item: WishlistItem) -> Result<bool, StoreError> {
        self.inner.update(|wishlist| wishlist.add_item(item))
    }

    pub fn remove_item(&self, id: u32) -> Result<bool, StoreError> {
        self.inner.update(|wishlist| wishlist.remove_item(id))
    }
}
