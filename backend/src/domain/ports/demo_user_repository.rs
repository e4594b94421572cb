//! Port abstraction for the demo user table.

use async_trait::async_trait;

use crate::domain::{DemoUser, NewDemoUser};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by demo user adapters.
    pub enum DemoUserRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "demo user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "demo user store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DemoUserRepository: Send + Sync {
    async fn create(&self, user: &NewDemoUser) -> Result<DemoUser, DemoUserRepositoryError>;

    /// All demo users ordered by ascending id.
    async fn list(&self) -> Result<Vec<DemoUser>, DemoUserRepositoryError>;
}
