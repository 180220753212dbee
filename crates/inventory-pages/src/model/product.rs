//! Represents a product in the inventory.
//!
//! Created through the product form and kept, in order, in the cached product list
//! the listing page renders from.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend-assigned product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Farmacia")]
    Pharmacy,
    #[serde(rename = "Dulcería")]
    Confectionery,
    #[serde(rename = "Abarrote")]
    Grocery,
}

impl Category {
    /// Values offered by the category select, as sent on the wire.
    pub const OPTIONS: &'static [&'static str] = &["Farmacia", "Dulcería", "Abarrote"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pharmacy => "Farmacia",
            Category::Confectionery => "Dulcería",
            Category::Grocery => "Abarrote",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Farmacia" => Ok(Category::Pharmacy),
            "Dulcería" => Ok(Category::Confectionery),
            "Abarrote" => Ok(Category::Grocery),
            other => Err(format!("Unknown category: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "presentacion", default, deserialize_with = "null_as_empty")]
    pub presentation: String,
    #[serde(rename = "existencia")]
    pub stock: u32,
    #[serde(rename = "existenciaDeseada")]
    pub desired_stock: u32,
    #[serde(rename = "preCompra")]
    pub purchase_price: f64,
    #[serde(rename = "precio")]
    pub sale_price: f64,
    #[serde(rename = "tipoProducto")]
    pub category: Category,
}

/// Presentation is optional on the backend and comes back as `null` when unset.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    /// Builds the record the backend would return for `params` under `id`.
    pub fn new(id: ProductId, params: ProductCreate) -> Self {
        Self {
            id,
            name: params.name,
            presentation: params.presentation,
            stock: params.stock,
            desired_stock: params.desired_stock,
            purchase_price: params.purchase_price,
            sale_price: params.sale_price,
            category: params.category,
        }
    }

    /// `true` when every submitted field came back unchanged.
    pub fn matches(&self, params: &ProductCreate) -> bool {
        self.name == params.name
            && self.presentation == params.presentation
            && self.stock == params.stock
            && self.desired_stock == params.desired_stock
            && self.purchase_price == params.purchase_price
            && self.sale_price == params.sale_price
            && self.category == params.category
    }
}

/// Payload for creating a new product (`ProductoInput`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCreate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "presentacion")]
    pub presentation: String,
    #[serde(rename = "existencia")]
    pub stock: u32,
    #[serde(rename = "existenciaDeseada")]
    pub desired_stock: u32,
    #[serde(rename = "preCompra")]
    pub purchase_price: f64,
    #[serde(rename = "precio")]
    pub sale_price: f64,
    #[serde(rename = "tipoProducto")]
    pub category: Category,
}
