//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities for products, categories, mirrors
//! and credentials, plus the services that implement the driving ports. Keep
//! types free of transport and storage concerns.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Product, ProductDraft, InventorySummary: product store records.
//! - MirrorFormat, MirrorRecord, MirrorEntry: file mirror events.
//! - LoginCredentials, Registration, Credential, UserAccount: authentication.
//! - SessionGrant: user id plus expiry carried in the session cookie.
//! - ProductService, CategoryService, MirrorService, ImportService,
//!   AuthService: use-cases.

pub mod auth;
pub mod auth_service;
pub mod category;
pub mod category_service;
pub mod demo_user;
pub mod error;
pub mod mirror;
pub mod mirror_service;
pub mod ports;
pub mod product;
pub mod product_service;
pub mod reconciliation;
pub mod session;
pub mod trace_id;

pub use self::auth::{
    AuthValidationError, Credential, Email, LoginCredentials, MAX_NAME_CHARS,
    MIN_PASSWORD_CHARS, NewCredential, PasswordHash, Registration, UserAccount, UserId,
};
pub use self::auth_service::AuthService;
pub use self::category::{Category, CategoryId, CategoryName, CategoryValidationError};
pub use self::category_service::CategoryService;
pub use self::demo_user::{DEFAULT_DEMO_EMAIL, DEFAULT_DEMO_NAME, DemoUser, NewDemoUser};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::mirror::{
    MirrorEntry, MirrorFormat, MirrorReadout, MirrorRecord, UnknownMirrorFormat, parse_decimal,
};
pub use self::mirror_service::{MIRROR_TIMESTAMP_FORMAT, MirrorService};
pub use self::product::{
    InventorySummary, Product, ProductDraft, ProductId, ProductName, ProductValidationError,
    Quantity, UnitPrice,
};
pub use self::product_service::{ProductService, UpsertOutcome};
pub use self::reconciliation::ImportService;
pub use self::session::{REMEMBER_TTL_DAYS, SESSION_TTL_HOURS, SessionGrant};
pub use self::trace_id::TraceId;
