//! # Catalog
//!
//! The set of products on sale, in listing order. The catalog owns one
//! [`ProductRef`] per product; carts receive clones of those handles, so the
//! catalog always shows the stock left after each committed checkout.

use serde::Deserialize;

use crate::error::{ValidationError, ValidationResult};
use crate::product::{NewProduct, Product, ProductRef};

#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: Vec<ProductRef>,
}

/// Catalog file layout: `{ "products": [ NewProduct, ... ] }`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<NewProduct>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Builds a catalog, validating every product.
    ///
    /// Fails on the first invalid product or on a repeated name.
    pub fn from_products(inputs: impl IntoIterator<Item = NewProduct>) -> ValidationResult<Self> {
        let mut catalog = Catalog::new();
        for input in inputs {
            catalog.insert(Product::new(input)?)?;
        }
        Ok(catalog)
    }

    /// Parses a JSON catalog document.
    ///
    /// ```rust
    /// use shopline_core::Catalog;
    ///
    /// let catalog = Catalog::from_json(
    ///     r#"{"products":[{"name":"TV","price":15000,"quantity":5,"kind":"shippable","weight_kg":1.0}]}"#,
    /// ).unwrap();
    /// assert_eq!(catalog.get("TV").unwrap().quantity(), 5);
    /// ```
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
                field: "catalog".to_string(),
                reason: e.to_string(),
            })?;
        Catalog::from_products(file.products)
    }

    /// Adds a product and returns its handle.
    ///
    /// Names must be unique within a catalog so that name lookup is
    /// unambiguous.
    pub fn insert(&mut self, product: Product) -> ValidationResult<ProductRef> {
        if self.find_by_name(product.name()).is_some() {
            return Err(ValidationError::Duplicate {
                field: "product name".to_string(),
                value: product.name().to_string(),
            });
        }
        let handle = ProductRef::new(product);
        self.products.push(handle.clone());
        Ok(handle)
    }

    pub fn find_by_name(&self, name: &str) -> Option<ProductRef> {
        self.products
            .iter()
            .find(|p| p.borrow().name() == name)
            .cloned()
    }

    /// Like [`Catalog::find_by_name`], but an unknown name is an error.
    pub fn get(&self, name: &str) -> ValidationResult<ProductRef> {
        self.find_by_name(name)
            .ok_or_else(|| ValidationError::UnknownProduct(name.to_string()))
    }

    pub fn products(&self) -> &[ProductRef] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
