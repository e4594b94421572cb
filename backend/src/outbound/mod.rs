//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: in-process repositories used without a database
//! - **mirrors**: the TXT, JSON and CSV product mirror files
//! - **security**: Argon2id password hashing
//!
//! Adapters translate between domain types and their storage representation
//! and carry no business rules.

pub mod memory;
pub mod mirrors;
pub mod persistence;
pub mod security;
