use crate::clients::ProductClient;
use crate::model::{Category, Product, ProductCreate};
use async_trait::async_trait;
use form_framework::{
    Alert, Completion, Draft, FieldError, FormEntity, ListCache, MutationError, Rule, Schema,
    ValidationErrorKind, ValidationErrors,
};
use std::sync::Arc;
use tracing::{debug, info};

pub const NAME: &str = "name";
pub const PRESENTATION: &str = "presentation";
pub const STOCK: &str = "stock";
pub const DESIRED_STOCK: &str = "desired_stock";
pub const PURCHASE_PRICE: &str = "purchase_price";
pub const SALE_PRICE: &str = "sale_price";
pub const CATEGORY: &str = "category";

/// Largest quantity the backend's integer fields accept.
pub const MAX_QUANTITY: u32 = u32::MAX;

fn quantity_rules(label: &str) -> [Rule; 5] {
    [
        Rule::required(format!("{label} is required")),
        Rule::number(format!("{label} must be a number")),
        Rule::positive(format!("{label} must be greater than zero")),
        Rule::integer(format!("{label} must be a whole number")),
        Rule::max(f64::from(MAX_QUANTITY), format!("{label} is too large")),
    ]
}

fn price_rules(label: &str) -> [Rule; 3] {
    [
        Rule::required(format!("{label} is required")),
        Rule::number(format!("{label} must be a number")),
        Rule::positive(format!("{label} must be greater than zero")),
    ]
}

fn invalid(field: &'static str, kind: ValidationErrorKind, message: String) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    errors.insert(field, FieldError { kind, message });
    errors
}

pub struct ProductForm {
    client: ProductClient,
    products: Arc<dyn ListCache<Product>>,
    products_route: String,
}

impl ProductForm {
    pub fn new(
        client: ProductClient,
        products: Arc<dyn ListCache<Product>>,
        products_route: impl Into<String>,
    ) -> Self {
        Self {
            client,
            products,
            products_route: products_route.into(),
        }
    }

    /// Reads a quantity the schema has already bounded to `1..=MAX_QUANTITY`.
    fn quantity(draft: &Draft, field: &'static str) -> u32 {
        draft.number(field).unwrap_or_default() as u32
    }
}

#[async_trait]
impl FormEntity for ProductForm {
    type Input = ProductCreate;
    type Created = Product;

    fn name(&self) -> &'static str {
        "product"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(NAME, [Rule::required("Name is required")])
            .field(PRESENTATION, std::iter::empty::<Rule>())
            .field(STOCK, quantity_rules("Stock"))
            .field(DESIRED_STOCK, quantity_rules("Desired stock"))
            .field(PURCHASE_PRICE, price_rules("Purchase price"))
            .field(SALE_PRICE, price_rules("Sale price"))
            .field(
                CATEGORY,
                [
                    Rule::required("Category is required"),
                    Rule::one_of(Category::OPTIONS, "Select a category from the list"),
                ],
            )
    }

    fn to_input(&self, draft: &Draft) -> Result<ProductCreate, ValidationErrors> {
        let category = draft
            .text(CATEGORY)
            .parse::<Category>()
            .map_err(|message| invalid(CATEGORY, ValidationErrorKind::InvalidChoice, message))?;

        Ok(ProductCreate {
            name: draft.text(NAME),
            presentation: draft.text(PRESENTATION),
            stock: Self::quantity(draft, STOCK),
            desired_stock: Self::quantity(draft, DESIRED_STOCK),
            purchase_price: draft.number(PURCHASE_PRICE).unwrap_or_default(),
            sale_price: draft.number(SALE_PRICE).unwrap_or_default(),
            category,
        })
    }

    async fn create(&self, input: ProductCreate) -> Result<Product, MutationError> {
        self.client.create_product(input).await
    }

    /// Appends the new product to the cached listing in a single replace.
    fn on_created(&self, created: &Product) {
        let Some(mut products) = self.products.read() else {
            debug!(form = "product", "Product list not cached; skipping append");
            return;
        };
        products.push(created.clone());
        let len = products.len();
        self.products.write(products);
        info!(form = "product", id = %created.id, len, "Product list cache updated");
    }

    fn completion(&self, _created: &Product) -> Completion {
        Completion::Redirect {
            alert: Some(Alert::success(
                "Product created",
                "The product was created successfully",
            )),
            redirect_to: self.products_route.clone(),
        }
    }

    fn cancel_route(&self) -> &str {
        &self.products_route
    }
}
