//! # Product Client
//!
//! Creates products through the `nuevoProducto` mutation. The listing the product
//! page appends to is the cached result of [`PRODUCT_LIST`].
use crate::clients::GraphQlResource;
use crate::model::{Product, ProductCreate};
use form_framework::{GraphQlClient, MutationError, Operation};
use std::sync::Arc;
use tracing::{info, instrument};

pub const NEW_PRODUCT: Operation = Operation::mutation(
    "nuevoProducto",
    "mutation nuevoProducto($input: ProductoInput) {
  nuevoProducto(input: $input) {
    id
    nombre
    presentacion
    existencia
    existenciaDeseada
    preCompra
    precio
    tipoProducto
  }
}",
);

pub const PRODUCT_LIST: Operation = Operation::query(
    "obtenerProductos",
    "query obtenerProductos {
  obtenerProductos {
    id
    nombre
    presentacion
    existencia
    existenciaDeseada
    preCompra
    precio
    tipoProducto
  }
}",
);

#[derive(Clone)]
pub struct ProductClient {
    inner: Arc<dyn GraphQlClient>,
}

impl ProductClient {
    pub fn new(inner: Arc<dyn GraphQlClient>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, MutationError> {
        let product: Product = self.send(&NEW_PRODUCT, &params).await?;
        info!(id = %product.id, "Product created");
        Ok(product)
    }

    /// Fetches the full listing (what the local list cache holds once loaded).
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, MutationError> {
        self.fetch(&PRODUCT_LIST).await
    }
}

impl GraphQlResource for ProductClient {
    fn inner(&self) -> &Arc<dyn GraphQlClient> {
        &self.inner
    }
}
