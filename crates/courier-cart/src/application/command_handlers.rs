//! Command handlers for the cart context.
//!
//! Each handler validates its command and returns the resulting events. No
//! state is kept between calls and nothing is persisted here.

use std::fmt;
use std::sync::Arc;

use courier_core::clock::Clock;
use courier_core::error::DomainError;
use courier_core::event::EventMetadata;
use courier_core::handler::CommandHandler;
use uuid::Uuid;

use crate::domain::commands::{AddProductToCart, CartCommand, CreateProduct, RemoveProductFromCart};
use crate::domain::events::{
    CartEvent, CartEventKind, ProductAddedToCart, ProductCreated, ProductRemovedFromCart,
};

fn new_event(
    kind: CartEventKind,
    aggregate_id: Uuid,
    correlation_id: Uuid,
    clock: &dyn Clock,
) -> CartEvent {
    CartEvent {
        metadata: EventMetadata {
            event_id: Uuid::new_v4(),
            event_type: kind.event_type().to_owned(),
            aggregate_id,
            correlation_id,
            causation_id: correlation_id,
            occurred_at: clock.now(),
        },
        kind,
    }
}

/// Handles `CartCommand::CreateProduct`.
pub struct ProductCommandHandler {
    clock: Arc<dyn Clock>,
}

impl ProductCommandHandler {
    /// Creates the handler with the clock used to stamp events.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn create(&self, command: &CreateProduct) -> Result<Vec<CartEvent>, DomainError> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "product name must not be empty".into(),
            ));
        }
        Ok(vec![new_event(
            CartEventKind::ProductCreated(ProductCreated {
                product_id: command.product_id,
                name: name.to_owned(),
                price_cents: command.price_cents,
            }),
            command.product_id,
            command.correlation_id,
            self.clock.as_ref(),
        )])
    }
}

impl fmt::Debug for ProductCommandHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductCommandHandler").finish_non_exhaustive()
    }
}

impl CommandHandler<CartCommand, CartEvent> for ProductCommandHandler {
    fn name(&self) -> &'static str {
        "product_commands"
    }

    fn supports(&self, command: &CartCommand) -> bool {
        matches!(command, CartCommand::CreateProduct(_))
    }

    fn handle(&self, command: &CartCommand) -> Result<Vec<CartEvent>, DomainError> {
        match command {
            CartCommand::CreateProduct(c) => self.create(c),
            _ => Ok(Vec::new()),
        }
    }
}

/// Handles `CartCommand::AddProductToCart` and
/// `CartCommand::RemoveProductFromCart`.
pub struct CartCommandHandler {
    clock: Arc<dyn Clock>,
}

impl CartCommandHandler {
    /// Creates the handler with the clock used to stamp events.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn add(&self, command: &AddProductToCart) -> Result<Vec<CartEvent>, DomainError> {
        if command.quantity == 0 {
            return Err(DomainError::Validation("quantity must be positive".into()));
        }
        Ok(vec![new_event(
            CartEventKind::ProductAddedToCart(ProductAddedToCart {
                cart_id: command.cart_id,
                product_id: command.product_id,
                quantity: command.quantity,
            }),
            command.cart_id,
            command.correlation_id,
            self.clock.as_ref(),
        )])
    }

    fn remove(&self, command: &RemoveProductFromCart) -> Vec<CartEvent> {
        vec![new_event(
            CartEventKind::ProductRemovedFromCart(ProductRemovedFromCart {
                cart_id: command.cart_id,
                product_id: command.product_id,
            }),
            command.cart_id,
            command.correlation_id,
            self.clock.as_ref(),
        )]
    }
}

impl fmt::Debug for CartCommandHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartCommandHandler").finish_non_exhaustive()
    }
}

impl CommandHandler<CartCommand, CartEvent> for CartCommandHandler {
    fn name(&self) -> &'static str {
        "cart_commands"
    }

    fn supports(&self, command: &CartCommand) -> bool {
        matches!(
            command,
            CartCommand::AddProductToCart(_) | CartCommand::RemoveProductFromCart(_)
        )
    }

    fn handle(&self, command: &CartCommand) -> Result<Vec<CartEvent>, DomainError> {
        match command {
            CartCommand::AddProductToCart(c) => self.add(c),
            CartCommand::RemoveProductFromCart(c) => Ok(self.remove(c)),
            CartCommand::CreateProduct(_) => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use courier_core::error::DomainError;
    use courier_core::event::DomainEvent;
    use courier_core::handler::CommandHandler;
    use courier_test_support::FixedClock;
    use uuid::Uuid;

    use super::{CartCommandHandler, ProductCommandHandler};
    use crate::domain::commands::{
        AddProductToCart, CartCommand, CreateProduct, RemoveProductFromCart,
    };
    use crate::domain::events::CartEventKind;

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::default())
    }

    fn add(quantity: u32) -> CartCommand {
        CartCommand::AddProductToCart(AddProductToCart {
            correlation_id: Uuid::new_v4(),
            cart_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            quantity,
        })
    }

    #[test]
    fn test_create_product_produces_product_created_event() {
        // Arrange
        let handler = ProductCommandHandler::new(clock());
        let correlation_id = Uuid::new_v4();
        let product_id = Uuid::new_v4();
        let command = CartCommand::CreateProduct(CreateProduct {
            correlation_id,
            product_id,
            name: "  Teapot ".to_owned(),
            price_cents: 2_500,
        });

        // Act
        let events = handler.handle(&command).unwrap();

        // Assert
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.event_type(), "cart.product_created");

        let meta = event.metadata();
        assert_eq!(meta.event_type, "cart.product_created");
        assert_eq!(meta.aggregate_id, product_id);
        assert_eq!(meta.correlation_id, correlation_id);
        assert_eq!(meta.causation_id, correlation_id);
        assert_eq!(meta.occurred_at, FixedClock::epoch());

        match &event.kind {
            CartEventKind::ProductCreated(payload) => {
                assert_eq!(payload.name, "Teapot");
                assert_eq!(payload.price_cents, 2_500);
            }
            other => panic!("expected ProductCreated, got {other:?}"),
        }
    }

    #[test]
    fn test_create_product_rejects_blank_name() {
        let handler = ProductCommandHandler::new(clock());
        let command = CartCommand::CreateProduct(CreateProduct {
            correlation_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            name: "   ".to_owned(),
            price_cents: 1,
        });

        let result = handler.handle(&command);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_handlers_support_disjoint_variants() {
        let products = ProductCommandHandler::new(clock());
        let carts = CartCommandHandler::new(clock());
        let create = CartCommand::CreateProduct(CreateProduct {
            correlation_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            name: "Mug".to_owned(),
            price_cents: 900,
        });
        let remove = CartCommand::RemoveProductFromCart(RemoveProductFromCart {
            correlation_id: Uuid::new_v4(),
            cart_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
        });

        assert!(products.supports(&create));
        assert!(!products.supports(&add(1)));
        assert!(!products.supports(&remove));
        assert!(!carts.supports(&create));
        assert!(carts.supports(&add(1)));
        assert!(carts.supports(&remove));
    }

    #[test]
    fn test_add_product_to_cart_rejects_zero_quantity() {
        let handler = CartCommandHandler::new(clock());

        let result = handler.handle(&add(0));

        assert_eq!(
            result.unwrap_err(),
            DomainError::Validation("quantity must be positive".into())
        );
    }

    #[test]
    fn test_add_product_to_cart_produces_event_for_cart() {
        // Arrange
        let handler = CartCommandHandler::new(clock());
        let command = add(3);
        let CartCommand::AddProductToCart(inner) = &command else {
            unreachable!()
        };

        // Act
        let events = handler.handle(&command).unwrap();

        // Assert
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].metadata.aggregate_id, inner.cart_id);
        match &events[0].kind {
            CartEventKind::ProductAddedToCart(payload) => {
                assert_eq!(payload.product_id, inner.product_id);
                assert_eq!(payload.quantity, 3);
            }
            other => panic!("expected ProductAddedToCart, got {other:?}"),
        }
    }
}
