//! Command and event handlers for the cart context.

pub mod command_handlers;
pub mod event_handlers;
