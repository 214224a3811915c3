//! Product records and the code → product index

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use crate::discriminators::Discriminator;

/// Reference to another product that may be added to this one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanAdd {
    pub code: String,
}

/// One catalog product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub code: String,
    pub base_name: String,              // product family, e.g. "Burger"
    #[serde(default)]
    pub discriminators: Vec<Discriminator>,
    #[serde(default)]
    pub can_adds: Vec<CanAdd>,
}

impl Product {
    pub fn new(code: &str, base_name: &str) -> Self {
        Self {
            code: code.to_string(),
            base_name: base_name.to_string(),
            discriminators: Vec::new(),
            can_adds: Vec::new(),
        }
    }

    pub fn with_discriminators(mut self, discriminators: &[&str]) -> Self {
        self.discriminators = discriminators.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_can_add(mut self, code: &str) -> Self {
        self.can_adds.push(CanAdd { code: code.to_string() });
        self
    }
}

/// Read-only view of a product as seen by the choice group core
pub trait ProductView {
    fn code(&self) -> &str;

    fn base_name(&self) -> &str;

    /// Variant tags, in catalog order; may contain duplicates
    fn discriminators(&self) -> &[Discriminator];

    fn can_adds(&self) -> &[CanAdd];
}

impl ProductView for Product {
    fn code(&self) -> &str {
        &self.code
    }

    fn base_name(&self) -> &str {
        &self.base_name
    }

    fn discriminators(&self) -> &[Discriminator] {
        &self.discriminators
    }

    fn can_adds(&self) -> &[CanAdd] {
        &self.can_adds
    }
}

/// Resolves a product code to the base name of that product
pub trait ProductIndex {
    fn base_name_of(&self, code: &str) -> Option<&str>;
}

impl ProductIndex for HashMap<String, Product> {
    fn base_name_of(&self, code: &str) -> Option<&str> {
        self.get(code).map(|p| p.base_name.as_str())
    }
}

/// Loaded catalog: products in file order plus a code index
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_code: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut by_code = HashMap::with_capacity(products.len());
        for (i, product) in products.iter().enumerate() {
            if by_code.insert(product.code.clone(), i).is_some() {
                anyhow::bail!("Duplicate product code in catalog: {}", product.code);
            }
        }
        Ok(Self { products, by_code })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, code: &str) -> Option<&Product> {
        self.by_code.get(code).map(|&i| &self.products[i])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Group products by base name. Groups are ordered by base name and keep
    /// catalog order inside each group.
    pub fn group_by_base_name(&self) -> BTreeMap<&str, Vec<&Product>> {
        let mut groups: BTreeMap<&str, Vec<&Product>> = BTreeMap::new();
        for product in &self.products {
            groups.entry(product.base_name.as_str()).or_default().push(product);
        }
        groups
    }
}

impl ProductIndex for Catalog {
    fn base_name_of(&self, code: &str) -> Option<&str> {
        self.get(code).map(|p| p.base_name.as_str())
    }
}

impl<T: ProductView + ?Sized> ProductView for &T {
    fn code(&self) -> &str {
        (**self).code()
    }

    fn base_name(&self) -> &str {
        (**self).base_name()
    }

    fn discriminators(&self) -> &[Discriminator] {
        (**self).discriminators()
    }

    fn can_adds(&self) -> &[CanAdd] {
        (**self).can_adds()
    }
}
