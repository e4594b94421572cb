//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see ports,
//! so they can be exercised without databases or mirror files.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountQuery, CategoryCommand, CategoryQuery, DemoUserRepository, ImportCommand,
    LoginService, MirrorCommand, MirrorQuery, ProductCommand, ProductQuery, RegistrationService,
};

/// Parameter object bundling every port the handlers use.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub products: Arc<dyn ProductCommand>,
    pub products_query: Arc<dyn ProductQuery>,
    pub mirrors: Arc<dyn MirrorCommand>,
    pub mirrors_query: Arc<dyn MirrorQuery>,
    pub imports: Arc<dyn ImportCommand>,
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub accounts: Arc<dyn AccountQuery>,
    pub categories: Arc<dyn CategoryCommand>,
    pub categories_query: Arc<dyn CategoryQuery>,
    pub demo_users: Arc<dyn DemoUserRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub products: Arc<dyn ProductCommand>,
    pub products_query: Arc<dyn ProductQuery>,
    pub mirrors: Arc<dyn MirrorCommand>,
    pub mirrors_query: Arc<dyn MirrorQuery>,
    pub imports: Arc<dyn ImportCommand>,
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub accounts: Arc<dyn AccountQuery>,
    pub categories: Arc<dyn CategoryCommand>,
    pub categories_query: Arc<dyn CategoryQuery>,
    pub demo_users: Arc<dyn DemoUserRepository>,
    /// Source of "now" for session expiry.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Construct state from the port bundle and a clock.
    pub fn new(ports: HttpStatePorts, clock: Arc<dyn Clock>) -> Self {
        let HttpStatePorts {
            products,
            products_query,
            mirrors,
            mirrors_query,
            imports,
            login,
            registration,
            accounts,
            categories,
            categories_query,
            demo_users,
        } = ports;
        Self {
            products,
            products_query,
            mirrors,
            mirrors_query,
            imports,
            login,
            registration,
            accounts,
            categories,
            categories_query,
            demo_users,
            clock,
        }
    }
}
