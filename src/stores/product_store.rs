//! Product repository - CRUD over the working copy of the catalog

use parking_lot::RwLock;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::info;

use crate::models::Product;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("product {0} not found")]
    NotFound(u32),
    #[error("invalid product: {0}")]
    Validation(String),
}

/// Fields required to create a product
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub is_on_sale: bool,
    #[serde(default)]
    pub sale_price: Option<f64>,
}

/// Present-but-null deserializes to `Some(None)`, absent to `None`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update; absent fields keep their current value.
/// The optional product fields are cleared by an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub gallery_images: Option<Vec<String>>,
    pub category: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub stock: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub badge: Option<Option<String>>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub material: Option<Option<String>>,
    pub is_on_sale: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub sale_price: Option<Option<f64>>,
}

impl ProductPatch {
    fn apply(self, product: &mut Product) {
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.description {
            product.description = v;
        }
        if let Some(v) = self.price {
            product.price = v;
        }
        if let Some(v) = self.image {
            product.image = v;
        }
        if let Some(v) = self.gallery_images {
            product.gallery_images = v;
        }
        if let Some(v) = self.category {
            product.category = v;
        }
        if let Some(v) = self.sizes {
            product.sizes = v;
        }
        if let Some(v) = self.colors {
            product.colors = v;
        }
        if let Some(v) = self.stock {
            product.stock = v;
        }
        if let Some(v) = self.badge {
            product.badge = v;
        }
        if let Some(v) = self.rating {
            product.rating = v;
        }
        if let Some(v) = self.review_count {
            product.review_count = v;
        }
        if let Some(v) = self.material {
            product.material = v;
        }
        if let Some(v) = self.is_on_sale {
            product.is_on_sale = v;
        }
        if let Some(v) = self.sale_price {
            product.sale_price = v;
        }
    }
}

/// Storage seam for catalog products
pub trait ProductRepository: Send + Sync {
    /// Every product, in catalog order
    fn list(&self) -> Vec<Product>;

    fn get(&self, id: u32) -> Result<Product, RepositoryError>;

    fn create(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    fn update(&self, id: u32, patch: ProductPatch) -> Result<Product, RepositoryError>;

    fn delete(&self, id: u32) -> Result<(), RepositoryError>;

    /// Products in a category, ignoring case
    fn by_category(&self, category: &str) -> Vec<Product> {
        crate::data::products_by_category(&self.list(), category)
    }
}

/// In-memory product repository; contents reset on restart
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Self {
        info!("Product repository loaded with {} products", products.len());
        Self {
            products: RwLock::new(products),
        }
    }

    /// Repository seeded with the built-in catalog
    pub fn seeded() -> Self {
        Self::new(crate::data::seed_products())
    }

    pub fn count(&self) -> usize {
        self.products.read().len()
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn list(&self) -> Vec<Product> {
        self.products.read().clone()
    }

    fn get(&self, id: u32) -> Result<Product, RepositoryError> {
        self.products
            .read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    fn create(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        if new.name.trim().is_empty()
            || new.description.trim().is_empty()
            || new.image.trim().is_empty()
            || new.price.is_nan()
            || new.price <= 0.0
        {
            return Err(RepositoryError::Validation(
                "name, description, price, and image are required".to_string(),
            ));
        }

        let mut products = self.products.write();
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;

        let product = Product {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            image: new.image,
            gallery_images: Vec::new(),
            category: new.category,
            sizes: new.sizes,
            colors: new.colors,
            stock: new.stock,
            badge: new.badge,
            rating: 0.0,
            review_count: 0,
            material: new.material,
            is_on_sale: new.is_on_sale,
            sale_price: new.sale_price,
        };
        product.validate().map_err(RepositoryError::Validation)?;

        products.push(product.clone());
        info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    fn update(&self, id: u32, patch: ProductPatch) -> Result<Product, RepositoryError> {
        let mut products = self.products.write();
        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound(id))?;

        let mut updated = slot.clone();
        patch.apply(&mut updated);
        updated.id = id;
        updated.validate().map_err(RepositoryError::Validation)?;

        *slot = updated.clone();
        info!("Updated product {}", id);
        Ok(updated)
    }

    fn delete(&self, id: u32) -> Result<(), RepositoryError> {
        let mut products = self.products.write();
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepositoryError::NotFound(id))?;

        products.remove(index);
        info!("Deleted product {}", id);
        Ok(())
    }
}
