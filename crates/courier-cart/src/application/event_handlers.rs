//! Event handlers for the cart context.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use courier_core::error::DomainError;
use courier_core::event::DomainEvent;
use courier_core::handler::EventHandler;
use tracing::debug;
use uuid::Uuid;

use crate::domain::events::{CartEvent, CartEventKind};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    mutex
        .lock()
        .map_err(|_| DomainError::Infrastructure("read model lock poisoned".into()))
}

#[derive(Debug, Default)]
struct CartState {
    prices: HashMap<Uuid, u64>,
    carts: HashMap<Uuid, HashMap<Uuid, u32>>,
    projected: HashSet<Uuid>,
}

/// Read model of catalogue prices and cart contents.
///
/// Registered in the sync group: a command is only acknowledged once this
/// projection reflects its events.
#[derive(Debug, Default)]
pub struct CartProjection {
    state: Mutex<CartState>,
}

impl CartProjection {
    /// Quantity per product currently in `cart_id`.
    #[must_use]
    pub fn cart_lines(&self, cart_id: Uuid) -> HashMap<Uuid, u32> {
        lock(&self.state)
            .map(|s| s.carts.get(&cart_id).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Unit price of a created product, if the projection has seen it.
    #[must_use]
    pub fn price_cents(&self, product_id: Uuid) -> Option<u64> {
        lock(&self.state)
            .ok()
            .and_then(|s| s.prices.get(&product_id).copied())
    }

    /// Sum of quantity times unit price over all lines in `cart_id`.
    /// Products with an unknown price count as zero. Saturates at `u64::MAX`.
    #[must_use]
    pub fn cart_total_cents(&self, cart_id: Uuid) -> u64 {
        let Ok(state) = lock(&self.state) else {
            return 0;
        };
        state.carts.get(&cart_id).map_or(0, |lines| {
            lines.iter().fold(0_u64, |total, (product, qty)| {
                let price = state.prices.get(product).copied().unwrap_or(0);
                total.saturating_add(price.saturating_mul(u64::from(*qty)))
            })
        })
    }

    /// Returns `true` once the event with `event_id` has been projected.
    #[must_use]
    pub fn is_projected(&self, event_id: Uuid) -> bool {
        lock(&self.state).is_ok_and(|s| s.projected.contains(&event_id))
    }
}

#[async_trait]
impl EventHandler<CartEvent> for CartProjection {
    fn name(&self) -> &'static str {
        "cart_projection"
    }

    fn supports(&self, _event: &CartEvent) -> bool {
        true
    }

    async fn handle(&self, event: &CartEvent) -> Result<(), DomainError> {
        let mut state = lock(&self.state)?;
        match &event.kind {
            CartEventKind::ProductCreated(p) => {
                state.prices.insert(p.product_id, p.price_cents);
            }
            CartEventKind::ProductAddedToCart(p) => {
                let line = state
                    .carts
                    .entry(p.cart_id)
                    .or_default()
                    .entry(p.product_id)
                    .or_insert(0);
                *line = line.checked_add(p.quantity).ok_or_else(|| {
                    DomainError::Validation(format!(
                        "quantity of product {} in cart {} would exceed {}",
                        p.product_id,
                        p.cart_id,
                        u32::MAX
                    ))
                })?;
            }
            CartEventKind::ProductRemovedFromCart(p) => {
                let removed = state
                    .carts
                    .get_mut(&p.cart_id)
                    .and_then(|lines| lines.remove(&p.product_id));
                if removed.is_none() {
                    return Err(DomainError::NotFound(format!(
                        "product {} is not in cart {}",
                        p.product_id, p.cart_id
                    )));
                }
            }
        }
        state.projected.insert(event.event_id());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SearchState {
    names: HashMap<Uuid, String>,
    indexed: HashSet<Uuid>,
}

/// Product name search index.
///
/// Registered in the async group: indexing may lag behind the command that
/// created the product.
#[derive(Debug)]
pub struct SearchIndexer {
    delay: Duration,
    state: Mutex<SearchState>,
}

impl SearchIndexer {
    /// Creates an indexer that spends `delay` on every document, standing in
    /// for a remote search service.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: Mutex::new(SearchState::default()),
        }
    }

    /// Products whose name contains `term`, ignoring case.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<Uuid> {
        let term = term.to_lowercase();
        lock(&self.state)
            .map(|s| {
                s.names
                    .iter()
                    .filter(|(_, name)| name.to_lowercase().contains(&term))
                    .map(|(id, _)| *id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns `true` once the event with `event_id` has been indexed.
    #[must_use]
    pub fn is_indexed(&self, event_id: Uuid) -> bool {
        lock(&self.state).is_ok_and(|s| s.indexed.contains(&event_id))
    }
}

#[async_trait]
impl EventHandler<CartEvent> for SearchIndexer {
    fn name(&self) -> &'static str {
        "search_indexer"
    }

    fn supports(&self, event: &CartEvent) -> bool {
        matches!(event.kind, CartEventKind::ProductCreated(_))
    }

    async fn handle(&self, event: &CartEvent) -> Result<(), DomainError> {
        let CartEventKind::ProductCreated(product) = &event.kind else {
            return Ok(());
        };
        tokio::time::sleep(self.delay).await;

        let mut state = lock(&self.state)?;
        state.names.insert(product.product_id, product.name.clone());
        state.indexed.insert(event.event_id());
        debug!(product_id = %product.product_id, "product indexed");
        Ok(())
    }
}
