//! Courier Core — command routing and event fan-out.
//!
//! Commands are routed to the first command handler that supports them.
//! The events it returns are fanned out to two handler groups: the
//! synchronous group gates the outcome returned to the caller, the
//! asynchronous group runs detached and is only observed through logs.

pub mod bus;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod fanout;
pub mod handler;
pub mod registry;
pub mod router;
