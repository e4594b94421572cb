//! Registration, login and logout handlers.
//!
//! ```text
//! GET  /auth/register         empty form
//! POST /auth/register         name=Ana&email=ana@mail.com&password=...
//! GET  /auth/login            empty form
//! POST /auth/login            email=ana@mail.com&password=...&remember=on
//! GET  /auth/logout
//! GET  /auth/me
//! ```
//!
//! Registration never signs the caller in; only a successful login writes a
//! grant into the session cookie.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{LoginCredentials, Registration, SessionGrant, UserAccount};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{CurrentUser, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::auth_validation_error;

/// Submitted registration form.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password: String,
}

/// Submitted login form. `remember` is an HTML checkbox.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub remember: Option<String>,
}

impl LoginForm {
    fn remember(&self) -> bool {
        self.remember.as_deref().is_some_and(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "on" | "true" | "1" | "yes"
            )
        })
    }
}

/// Account as returned to clients; never carries the hash.
#[derive(Debug, Serialize)]
pub struct AccountBody {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<UserAccount> for AccountBody {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id.get(),
            name: account.name,
            email: account.email.as_ref().to_owned(),
        }
    }
}

/// `GET /auth/register`
pub async fn register_form() -> web::Json<RegisterForm> {
    web::Json(RegisterForm::default())
}

/// `POST /auth/register`
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let registration = Registration::try_from_parts(&form.name, &form.email, &form.password)
        .map_err(|err| auth_validation_error(&err))?;
    let account = state.registration.register(&registration).await?;
    Ok(HttpResponse::Created().json(AccountBody::from(account)))
}

/// `GET /auth/login`
pub async fn login_form() -> web::Json<LoginForm> {
    web::Json(LoginForm::default())
}

/// `POST /auth/login`
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<web::Json<AccountBody>> {
    let form = form.into_inner();
    let credentials = LoginCredentials::try_from_parts(&form.email, &form.password, form.remember())
        .map_err(|err| auth_validation_error(&err))?;
    let account = state.login.authenticate(&credentials).await?;
    let grant = SessionGrant::issue(account.id, credentials.remember(), state.clock.utc());
    session.establish(&grant)?;
    info!(user_id = %account.id, remember = credentials.remember(), "user signed in");
    Ok(web::Json(AccountBody::from(account)))
}

/// `GET /auth/logout`
pub async fn logout(CurrentUser(account): CurrentUser, session: SessionContext) -> HttpResponse {
    session.clear();
    info!(user_id = %account.id, "user signed out");
    HttpResponse::NoContent().finish()
}

/// `GET /auth/me`
pub async fn current_user(CurrentUser(account): CurrentUser) -> web::Json<AccountBody> {
    web::Json(AccountBody::from(account))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
