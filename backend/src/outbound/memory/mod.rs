//! In-memory repositories.
//!
//! Used when no database is configured and by integration tests. Each store
//! is a mutex-guarded vector with sequential ids starting at 1, so listing
//! order matches insertion order like the relational tables.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, CredentialRepository, CredentialRepositoryError,
    DemoUserRepository, DemoUserRepositoryError, ProductRepository, ProductRepositoryError,
};
use crate::domain::{
    Category, CategoryId, CategoryName, Credential, DemoUser, Email, NewCredential, NewDemoUser,
    Product, ProductDraft, ProductId, ProductName, UserId,
};

/// Rows plus the next id to hand out.
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn lock<T>(table: &Mutex<Table<T>>) -> MutexGuard<'_, Table<T>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory product store.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    table: Mutex<Table<Product>>,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, draft: &ProductDraft) -> Result<Product, ProductRepositoryError> {
        let mut table = lock(&self.table);
        let id = ProductId::new(table.allocate());
        let product = Product::new(id, draft.clone());
        table.rows.push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(lock(&self.table)
            .rows
            .iter()
            .find(|product| product.id() == id)
            .cloned())
    }

    async fn find_by_name(
        &self,
        name: &ProductName,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(lock(&self.table)
            .rows
            .iter()
            .find(|product| product.name() == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(lock(&self.table).rows.clone())
    }

    async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let mut table = lock(&self.table);
        let Some(slot) = table.rows.iter_mut().find(|product| product.id() == id) else {
            return Ok(None);
        };
        *slot = Product::new(id, draft.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, ProductRepositoryError> {
        let mut table = lock(&self.table);
        let before = table.rows.len();
        table.rows.retain(|product| product.id() != id);
        Ok(table.rows.len() != before)
    }
}

/// In-memory category store.
#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    table: Mutex<Table<Category>>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, name: &CategoryName) -> Result<Category, CategoryRepositoryError> {
        let mut table = lock(&self.table);
        let category = Category {
            id: CategoryId::new(table.allocate()),
            name: name.clone(),
        };
        table.rows.push(category.clone());
        Ok(category)
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        Ok(lock(&self.table)
            .rows
            .iter()
            .find(|category| category.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        Ok(lock(&self.table).rows.clone())
    }

    async fn update(
        &self,
        id: CategoryId,
        name: &CategoryName,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut table = lock(&self.table);
        let Some(slot) = table.rows.iter_mut().find(|category| category.id == id) else {
            return Ok(None);
        };
        slot.name = name.clone();
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryRepositoryError> {
        let mut table = lock(&self.table);
        let before = table.rows.len();
        table.rows.retain(|category| category.id != id);
        Ok(table.rows.len() != before)
    }
}

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct InMemoryCredentialRepository {
    table: Mutex<Table<Credential>>,
}

impl InMemoryCredentialRepository {
    /// Remove a credential, simulating an account deleted out of band.
    pub fn remove(&self, id: UserId) -> bool {
        let mut table = lock(&self.table);
        let before = table.rows.len();
        table.rows.retain(|credential| credential.id != id);
        table.rows.len() != before
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        Ok(lock(&self.table)
            .rows
            .iter()
            .find(|credential| &credential.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Credential>, CredentialRepositoryError> {
        Ok(lock(&self.table)
            .rows
            .iter()
            .find(|credential| credential.id == id)
            .cloned())
    }

    async fn insert(
        &self,
        credential: &NewCredential,
    ) -> Result<Credential, CredentialRepositoryError> {
        let mut table = lock(&self.table);
        let stored = Credential {
            id: UserId::new(table.allocate()),
            name: credential.name.clone(),
            email: credential.email.clone(),
            password_hash: Some(credential.password_hash.clone()),
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }
}

/// In-memory demo user store.
#[derive(Debug, Default)]
pub struct InMemoryDemoUserRepository {
    table: Mutex<Table<DemoUser>>,
}

#[async_trait]
impl DemoUserRepository for InMemoryDemoUserRepository {
    async fn create(&self, user: &NewDemoUser) -> Result<DemoUser, DemoUserRepositoryError> {
        let mut table = lock(&self.table);
        let stored = DemoUser {
            id: table.allocate(),
            name: user.name.clone(),
            email: user.email.clone(),
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<DemoUser>, DemoUserRepositoryError> {
        Ok(lock(&self.table).rows.clone())
    }
}
