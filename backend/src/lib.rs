//! Inventory and user-management web application.
//!
//! Layout follows ports and adapters: [`domain`] holds entities, services and
//! port traits; [`inbound`] exposes them over HTTP; [`outbound`] implements
//! the ports against PostgreSQL, the file mirrors and in-memory stores.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

pub use middleware::Trace;
