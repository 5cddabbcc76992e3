//! Product repository and persisted shopper state

mod cart_store;
mod persisted;
mod product_store;

pub use cart_store::{CartStore, WishlistStore};
pub use persisted::{PersistedStore, StoreError};
pub use product_store::{
    InMemoryProductRepository, NewProduct, ProductPatch, ProductRepository, RepositoryError,
};
