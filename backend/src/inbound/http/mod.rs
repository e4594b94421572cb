//! HTTP inbound adapter: form-driven handlers answering with JSON.

pub mod auth;
pub mod categories;
pub mod demo_users;
pub mod error;
pub mod health;
pub mod imports;
pub mod mirrors;
pub mod products;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
