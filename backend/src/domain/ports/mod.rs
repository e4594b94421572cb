//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`MirrorStore`], [`PasswordHasher`]) are
//! implemented by outbound adapters. Driving ports (`*Command`, `*Query`,
//! [`LoginService`], [`RegistrationService`]) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod category_command;
mod category_repository;
mod credential_repository;
mod demo_user_repository;
mod import_command;
mod login_service;
mod mirror_command;
mod mirror_store;
mod password_hasher;
mod product_command;
mod product_repository;

#[cfg(test)]
pub use category_command::{MockCategoryCommand, MockCategoryQuery};
pub use category_command::{CategoryCommand, CategoryQuery};
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use credential_repository::MockCredentialRepository;
pub use credential_repository::{CredentialRepository, CredentialRepositoryError};
#[cfg(test)]
pub use demo_user_repository::MockDemoUserRepository;
pub use demo_user_repository::{DemoUserRepository, DemoUserRepositoryError};
#[cfg(test)]
pub use import_command::MockImportCommand;
pub use import_command::{ImportAllReport, ImportCommand, ImportReport};
#[cfg(test)]
pub use login_service::{MockAccountQuery, MockLoginService, MockRegistrationService};
pub use login_service::{AccountQuery, LoginService, RegistrationService};
#[cfg(test)]
pub use mirror_command::{MockMirrorCommand, MockMirrorQuery};
pub use mirror_command::{MirrorCommand, MirrorQuery};
#[cfg(test)]
pub use mirror_store::MockMirrorStore;
pub use mirror_store::{MirrorStore, MirrorStoreError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use product_command::{MockProductCommand, MockProductQuery};
pub use product_command::{ProductCommand, ProductQuery};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductRepository, ProductRepositoryError};
