//! Courier cart demo entry point.

use std::error::Error;
use std::sync::Arc;

use courier_cart::CartApp;
use courier_cart::config::{CartConfig, LogFormat};
use courier_cart::domain::commands::{
    AddProductToCart, CartCommand, CreateProduct, RemoveProductFromCart,
};
use courier_cart::error::AppError;
use courier_core::clock::SystemClock;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = CartConfig::from_env()?;

    // Initialize tracing subscriber.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).pretty().init(),
    }

    tracing::info!(?config, "Starting Courier cart demo");

    let app = courier_cart::build_app(Arc::new(SystemClock), &config);
    run_session(&app, &config).await?;

    Ok(())
}

/// Creates a product, fills a cart and removes the line twice.
async fn run_session(app: &CartApp, config: &CartConfig) -> Result<(), AppError> {
    let cart_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();

    app.bus
        .handle(CartCommand::CreateProduct(CreateProduct {
            correlation_id: Uuid::new_v4(),
            product_id,
            name: "Espresso Beans".to_owned(),
            price_cents: 1_450,
        }))
        .await?;

    for quantity in [2, 1] {
        app.bus
            .handle(CartCommand::AddProductToCart(AddProductToCart {
                correlation_id: Uuid::new_v4(),
                cart_id,
                product_id,
                quantity,
            }))
            .await?;
    }

    tracing::info!(
        %cart_id,
        total_cents = app.projection.cart_total_cents(cart_id),
        search_hits = app.search.search("espresso").len(),
        "cart projected"
    );

    // Removing a line twice fails in the sync projection on the second call.
    for _ in 0..2 {
        let outcome = app
            .bus
            .handle(CartCommand::RemoveProductFromCart(RemoveProductFromCart {
                correlation_id: Uuid::new_v4(),
                cart_id,
                product_id,
            }))
            .await;
        if let Err(error) = outcome {
            tracing::warn!(%error, "remove rejected");
        }
    }

    // Give the detached indexer a chance to finish before exiting.
    tokio::time::sleep(config.search_index_delay * 2).await;
    tracing::info!(
        search_hits = app.search.search("espresso").len(),
        "search index settled"
    );

    Ok(())
}
