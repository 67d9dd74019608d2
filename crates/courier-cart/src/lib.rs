//! Courier cart — a small cart/product domain wired onto the dispatch core.
//!
//! A synchronous projection keeps cart contents current before a command is
//! acknowledged; an asynchronous search indexer is allowed to lag behind.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;

use std::sync::Arc;

use courier_core::bus::CommandBus;
use courier_core::clock::Clock;
use courier_core::handler::HandlerGroup;
use courier_core::registry::HandlerRegistry;
use courier_core::router::CommandRouter;

use crate::application::command_handlers::{CartCommandHandler, ProductCommandHandler};
use crate::application::event_handlers::{CartProjection, SearchIndexer};
use crate::config::CartConfig;
use crate::domain::commands::CartCommand;
use crate::domain::events::CartEvent;

/// A wired bus together with the read models its handlers maintain.
#[derive(Debug)]
pub struct CartApp {
    /// The command bus.
    pub bus: CommandBus<CartCommand, CartEvent>,
    /// Synchronously maintained cart read model.
    pub projection: Arc<CartProjection>,
    /// Asynchronously maintained product search index.
    pub search: Arc<SearchIndexer>,
}

/// Registers every command and event handler and freezes them into a bus.
#[must_use]
pub fn build_app(clock: Arc<dyn Clock>, config: &CartConfig) -> CartApp {
    let projection = Arc::new(CartProjection::default());
    let search = Arc::new(SearchIndexer::new(config.search_index_delay));

    let router: CommandRouter<CartCommand, CartEvent> = CommandRouter::new()
        .with(Arc::new(ProductCommandHandler::new(Arc::clone(&clock))))
        .with(Arc::new(CartCommandHandler::new(clock)));

    let registry: HandlerRegistry<CartEvent> = HandlerRegistry::new()
        .with(projection.clone(), HandlerGroup::Sync)
        .with(search.clone(), HandlerGroup::Async);

    CartApp {
        bus: CommandBus::new(router, registry),
        projection,
        search,
    }
}
