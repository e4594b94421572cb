//! Category CRUD handlers under `/mysql/categorias`.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, CategoryId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::CurrentUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_category_form;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CategoryForm {
    pub nombre: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryBody {
    pub id: i64,
    pub nombre: String,
}

impl From<&Category> for CategoryBody {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.get(),
            nombre: category.name.as_ref().to_owned(),
        }
    }
}

/// `GET /mysql/categorias`
pub async fn list_categories(
    _user: CurrentUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryBody>>> {
    let categories = state.categories_query.list().await?;
    Ok(web::Json(categories.iter().map(CategoryBody::from).collect()))
}

/// `GET /mysql/categorias/crear`
pub async fn new_category_form(_user: CurrentUser) -> web::Json<CategoryForm> {
    web::Json(CategoryForm {
        nombre: Some(String::new()),
    })
}

/// `POST /mysql/categorias/crear`
pub async fn create_category(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    form: web::Form<CategoryForm>,
) -> ApiResult<HttpResponse> {
    let name = parse_category_form(form.nombre.as_deref())?;
    let category = state.categories.create(name).await?;
    Ok(HttpResponse::Created().json(CategoryBody::from(&category)))
}

/// `GET /mysql/categorias/editar/{id}`
pub async fn edit_category_form(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CategoryBody>> {
    let category = state
        .categories_query
        .get(CategoryId::new(path.into_inner()))
        .await?;
    Ok(web::Json(CategoryBody::from(&category)))
}

/// `POST /mysql/categorias/editar/{id}`
pub async fn update_category(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    form: web::Form<CategoryForm>,
) -> ApiResult<web::Json<CategoryBody>> {
    let id = CategoryId::new(path.into_inner());
    let name = parse_category_form(form.nombre.as_deref())?;
    let category = state.categories.rename(id, name).await?;
    Ok(web::Json(CategoryBody::from(&category)))
}

/// `POST /mysql/categorias/eliminar/{id}`
pub async fn delete_category(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .categories
        .delete(CategoryId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
