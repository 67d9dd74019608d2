//! Commands for the cart context.

use courier_core::command::Command;
use uuid::Uuid;

/// Register a product in the catalogue.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The new product.
    pub product_id: Uuid,
    /// Display name, indexed for search.
    pub name: String,
    /// Unit price in cents.
    pub price_cents: u64,
}

/// Put some quantity of a product into a cart.
#[derive(Debug, Clone)]
pub struct AddProductToCart {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The cart being modified.
    pub cart_id: Uuid,
    /// The product being added.
    pub product_id: Uuid,
    /// How many units to add.
    pub quantity: u32,
}

/// Take a product line out of a cart.
#[derive(Debug, Clone)]
pub struct RemoveProductFromCart {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The cart being modified.
    pub cart_id: Uuid,
    /// The product being removed.
    pub product_id: Uuid,
}

/// All commands understood by the cart context.
#[derive(Debug, Clone)]
pub enum CartCommand {
    /// See [`CreateProduct`].
    CreateProduct(CreateProduct),
    /// See [`AddProductToCart`].
    AddProductToCart(AddProductToCart),
    /// See [`RemoveProductFromCart`].
    RemoveProductFromCart(RemoveProductFromCart),
}

impl Command for CartCommand {
    fn command_type(&self) -> &'static str {
        match self {
            Self::CreateProduct(_) => "cart.create_product",
            Self::AddProductToCart(_) => "cart.add_product_to_cart",
            Self::RemoveProductFromCart(_) => "cart.remove_product_from_cart",
        }
    }

    fn correlation_id(&self) -> Uuid {
        match self {
            Self::CreateProduct(c) => c.correlation_id,
            Self::AddProductToCart(c) => c.correlation_id,
            Self::RemoveProductFromCart(c) => c.correlation_id,
        }
    }
}
