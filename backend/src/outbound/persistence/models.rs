//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it. Conversions into domain types live next to each repository.

use diesel::prelude::*;

use super::schema::{categories, demo_users, products, users};

/// Row struct for reading from the products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price_cents: i64,
}

/// Insertable and changeset struct for product writes.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductValues<'a> {
    pub name: &'a str,
    pub quantity: i64,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = categories)]
pub(crate) struct CategoryValues<'a> {
    pub name: &'a str,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
}

/// Insertable struct for new credentials.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewCredentialRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = demo_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DemoUserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = demo_users)]
pub(crate) struct NewDemoUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
}
