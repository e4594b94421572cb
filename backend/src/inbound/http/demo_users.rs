//! Demo user handlers backed by the separate `demo_users` table.
//!
//! ```text
//! GET /usuarios/crear?nombre=Ariel&email=ariel@mail.com
//! GET /usuarios/listar
//! ```
//!
//! These routes are public.

use actix_web::web;
use serde::{Deserialize, Serialize};

use crate::domain::ports::DemoUserRepositoryError;
use crate::domain::{DemoUser, Error, NewDemoUser};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Default, Deserialize)]
pub struct DemoUserQuery {
    pub nombre: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedBody {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DemoUserBody {
    pub id: i64,
    pub nombre: String,
    pub email: String,
}

impl From<DemoUser> for DemoUserBody {
    fn from(user: DemoUser) -> Self {
        Self {
            id: user.id,
            nombre: user.name,
            email: user.email,
        }
    }
}

fn map_demo_user_error(error: DemoUserRepositoryError) -> Error {
    match error {
        DemoUserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("demo user store unavailable: {message}"))
        }
        DemoUserRepositoryError::Query { message } => {
            Error::internal(format!("demo user store error: {message}"))
        }
    }
}

/// `GET /usuarios/crear`
pub async fn create_demo_user(
    state: web::Data<HttpState>,
    query: web::Query<DemoUserQuery>,
) -> ApiResult<web::Json<CreatedBody>> {
    let new_user = NewDemoUser::with_defaults(query.nombre.as_deref(), query.email.as_deref());
    let created = state
        .demo_users
        .create(&new_user)
        .await
        .map_err(map_demo_user_error)?;
    Ok(web::Json(CreatedBody {
        ok: true,
        message: format!("Usuario '{}' creado", created.name),
    }))
}

/// `GET /usuarios/listar`
pub async fn list_demo_users(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<DemoUserBody>>> {
    let users = state
        .demo_users
        .list()
        .await
        .map_err(map_demo_user_error)?;
    Ok(web::Json(users.into_iter().map(DemoUserBody::from).collect()))
}
