//! Product CRUD and search handlers.
//!
//! ```text
//! GET  /                      list with totals
//! GET  /nuevo                 empty form
//! POST /nuevo                 nombre=Pan&cantidad=3&precio=2,50
//! GET  /editar/{id}           prefilled form
//! POST /editar/{id}
//! POST /eliminar/{id}
//! GET  /buscar?q=pan
//! ```
//!
//! The same handlers also serve `/mysql/productos` and its `crear`, `editar`
//! and `eliminar` sub-paths.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::domain::{InventorySummary, Product, ProductId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::CurrentUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_product_form;

/// Submitted product form. Fields stay textual so validation can name the
/// offending one.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProductForm {
    pub nombre: Option<String>,
    pub cantidad: Option<String>,
    pub precio: Option<String>,
}

/// Form values for rendering the create or edit form.
#[derive(Debug, Serialize)]
pub struct ProductFormView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    pub cantidad: String,
    pub precio: String,
}

impl From<&Product> for ProductFormView {
    fn from(product: &Product) -> Self {
        Self {
            id: Some(product.id().get()),
            nombre: product.name().as_ref().to_owned(),
            cantidad: product.quantity().get().to_string(),
            precio: product.unit_price().to_string(),
        }
    }
}

/// Product as returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: String,
    pub stock_value: Option<String>,
}

impl From<&Product> for ProductBody {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().get(),
            name: product.name().as_ref().to_owned(),
            quantity: product.quantity().get(),
            unit_price: product.unit_price().to_string(),
            stock_value: product.stock_value().map(|value| value.to_string()),
        }
    }
}

/// Listing with aggregate totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryBody {
    pub products: Vec<ProductBody>,
    pub total_items: i64,
    pub total_value: String,
}

impl From<InventorySummary> for InventoryBody {
    fn from(summary: InventorySummary) -> Self {
        Self {
            products: summary.products.iter().map(ProductBody::from).collect(),
            total_items: summary.total_items,
            total_value: summary.total_value.round_dp(2).to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// `GET /`
pub async fn list_products(
    _user: CurrentUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<InventoryBody>> {
    let summary = state.products_query.summary().await?;
    Ok(web::Json(summary.into()))
}

/// `GET /nuevo`
pub async fn new_product_form(_user: CurrentUser) -> web::Json<ProductFormView> {
    web::Json(ProductFormView {
        id: None,
        nombre: String::new(),
        cantidad: String::new(),
        precio: String::new(),
    })
}

/// `POST /nuevo`
pub async fn create_product(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    form: web::Form<ProductForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let draft = parse_product_form(
        form.nombre.as_deref(),
        form.cantidad.as_deref(),
        form.precio.as_deref(),
    )?;
    let product = state.products.create(draft).await?;
    Ok(HttpResponse::Created().json(ProductBody::from(&product)))
}

/// `GET /editar/{id}`
pub async fn edit_product_form(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ProductFormView>> {
    let product = state
        .products_query
        .get(ProductId::new(path.into_inner()))
        .await?;
    Ok(web::Json(ProductFormView::from(&product)))
}

/// `POST /editar/{id}`
pub async fn update_product(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    form: web::Form<ProductForm>,
) -> ApiResult<web::Json<ProductBody>> {
    let form = form.into_inner();
    let draft = parse_product_form(
        form.nombre.as_deref(),
        form.cantidad.as_deref(),
        form.precio.as_deref(),
    )?;
    let product = state
        .products
        .update(ProductId::new(path.into_inner()), draft)
        .await?;
    Ok(web::Json(ProductBody::from(&product)))
}

/// `POST /eliminar/{id}`
pub async fn delete_product(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .products
        .delete(ProductId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /buscar?q=`
pub async fn search_products(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<InventoryBody>> {
    let q = query.into_inner().q.unwrap_or_default();
    let summary = state.products_query.search(&q).await?;
    Ok(web::Json(summary.into()))
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
