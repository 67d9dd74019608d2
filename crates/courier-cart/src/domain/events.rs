//! Domain events for the cart context.

use courier_core::event::{DomainEvent, EventMetadata};
use serde::Serialize;
use uuid::Uuid;

/// Emitted when a product is added to the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCreated {
    /// The product identifier.
    pub product_id: Uuid,
    /// Display name.
    pub name: String,
    /// Unit price in cents.
    pub price_cents: u64,
}

/// Emitted when units of a product are put into a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductAddedToCart {
    /// The cart identifier.
    pub cart_id: Uuid,
    /// The product identifier.
    pub product_id: Uuid,
    /// Units added.
    pub quantity: u32,
}

/// Emitted when a product line is taken out of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRemovedFromCart {
    /// The cart identifier.
    pub cart_id: Uuid,
    /// The product identifier.
    pub product_id: Uuid,
}

/// Event payload variants for the cart context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CartEventKind {
    /// A product was created.
    ProductCreated(ProductCreated),
    /// A product was added to a cart.
    ProductAddedToCart(ProductAddedToCart),
    /// A product was removed from a cart.
    ProductRemovedFromCart(ProductRemovedFromCart),
}

impl CartEventKind {
    /// Returns the event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ProductCreated(_) => "cart.product_created",
            Self::ProductAddedToCart(_) => "cart.product_added_to_cart",
            Self::ProductRemovedFromCart(_) => "cart.product_removed_from_cart",
        }
    }
}

/// Domain event envelope for the cart context.
#[derive(Debug, Clone)]
pub struct CartEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: CartEventKind,
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
