//! Builders wiring repositories and services into [`HttpState`].

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CategoryRepository, CredentialRepository, DemoUserRepository, MirrorStore, PasswordHasher,
    ProductRepository,
};
use crate::domain::{AuthService, CategoryService, ImportService, MirrorService, ProductService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{
    InMemoryCategoryRepository, InMemoryCredentialRepository, InMemoryDemoUserRepository,
    InMemoryProductRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselCredentialRepository, DieselDemoUserRepository,
    DieselProductRepository,
};

/// The four relational stores behind the HTTP surface.
pub struct Stores<P, C, U, D> {
    pub products: Arc<P>,
    pub categories: Arc<C>,
    pub credentials: Arc<U>,
    pub demo_users: Arc<D>,
}

/// Stores kept in process memory.
pub type InMemoryStores = Stores<
    InMemoryProductRepository,
    InMemoryCategoryRepository,
    InMemoryCredentialRepository,
    InMemoryDemoUserRepository,
>;

/// Stores backed by PostgreSQL.
pub type DieselStores = Stores<
    DieselProductRepository,
    DieselCategoryRepository,
    DieselCredentialRepository,
    DieselDemoUserRepository,
>;

impl InMemoryStores {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            products: Arc::new(InMemoryProductRepository::default()),
            categories: Arc::new(InMemoryCategoryRepository::default()),
            credentials: Arc::new(InMemoryCredentialRepository::default()),
            demo_users: Arc::new(InMemoryDemoUserRepository::default()),
        }
    }
}

impl DieselStores {
    #[must_use]
    pub fn diesel(pool: &DbPool) -> Self {
        Self {
            products: Arc::new(DieselProductRepository::new(pool.clone())),
            categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
            credentials: Arc::new(DieselCredentialRepository::new(pool.clone())),
            demo_users: Arc::new(DieselDemoUserRepository::new(pool.clone())),
        }
    }
}

/// Build the services over `stores` and expose them as handler ports.
pub fn assemble_ports<P, C, U, D, M, H>(
    stores: Stores<P, C, U, D>,
    mirrors: Arc<M>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
    U: CredentialRepository + 'static,
    D: DemoUserRepository + 'static,
    M: MirrorStore + 'static,
    H: PasswordHasher + 'static,
{
    let Stores {
        products,
        categories,
        credentials,
        demo_users,
    } = stores;
    let product_service = Arc::new(ProductService::new(Arc::clone(&products)));
    let category_service = Arc::new(CategoryService::new(categories));
    let mirror_service = Arc::new(MirrorService::new(Arc::clone(&mirrors), clock));
    let imports = Arc::new(ImportService::new(mirrors, ProductService::new(products)));
    let auth = Arc::new(AuthService::new(credentials, hasher));
    HttpStatePorts {
        products: product_service.clone(),
        products_query: product_service,
        mirrors: mirror_service.clone(),
        mirrors_query: mirror_service,
        imports,
        login: auth.clone(),
        registration: auth.clone(),
        accounts: auth,
        categories: category_service.clone(),
        categories_query: category_service,
        demo_users,
    }
}

/// State for the running server: PostgreSQL stores when a pool is
/// configured, in-memory stores otherwise.
pub fn build_http_state<M, H>(
    pool: Option<&DbPool>,
    mirrors: Arc<M>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    M: MirrorStore + 'static,
    H: PasswordHasher + 'static,
{
    let ports = match pool {
        Some(pool) => assemble_ports(
            DieselStores::diesel(pool),
            mirrors,
            hasher,
            Arc::clone(&clock),
        ),
        None => assemble_ports(
            InMemoryStores::in_memory(),
            mirrors,
            hasher,
            Arc::clone(&clock),
        ),
    };
    HttpState::new(ports, clock)
}
