//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! `diesel print-schema` against a migrated database regenerates them.

diesel::table! {
    /// Current product state. Quantity and price carry non-negative checks.
    products (id) {
        id -> Int8,
        name -> Varchar,
        quantity -> Int8,
        /// Unit price in cents.
        price_cents -> Int8,
    }
}

diesel::table! {
    categories (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Registered credentials. `password_hash` is null for legacy rows.
    users (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Nullable<Text>,
    }
}

diesel::table! {
    demo_users (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
    }
}

diesel::allow_tables_to_appear_in_same_query!(products, categories, users, demo_users);
