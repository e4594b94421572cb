//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    MockAccountQuery, MockCategoryCommand, MockCategoryQuery, MockDemoUserRepository,
    MockImportCommand, MockLoginService, MockMirrorCommand, MockMirrorQuery, MockProductCommand,
    MockProductQuery, MockRegistrationService,
};

use super::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag so
/// plain HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Clock pinned to one instant.
pub struct FixtureClock(pub DateTime<Utc>);

impl FixtureClock {
    /// 2024-05-01 12:30:00 UTC.
    pub fn fixed() -> Self {
        Self(
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
                .single()
                .expect("valid fixture instant"),
        )
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Ports backed by mocks without expectations; any unexpected call panics.
pub fn mock_ports() -> HttpStatePorts {
    HttpStatePorts {
        products: Arc::new(MockProductCommand::new()),
        products_query: Arc::new(MockProductQuery::new()),
        mirrors: Arc::new(MockMirrorCommand::new()),
        mirrors_query: Arc::new(MockMirrorQuery::new()),
        imports: Arc::new(MockImportCommand::new()),
        login: Arc::new(MockLoginService::new()),
        registration: Arc::new(MockRegistrationService::new()),
        accounts: Arc::new(MockAccountQuery::new()),
        categories: Arc::new(MockCategoryCommand::new()),
        categories_query: Arc::new(MockCategoryQuery::new()),
        demo_users: Arc::new(MockDemoUserRepository::new()),
    }
}

/// State over `ports` with the fixture clock.
pub fn state_with(ports: HttpStatePorts) -> HttpState {
    HttpState::new(ports, Arc::new(FixtureClock::fixed()))
}

/// Accounts port that resolves every id to the same signed-in user.
pub fn signed_in_accounts() -> MockAccountQuery {
    use crate::domain::{Email, UserAccount, UserId};

    let mut accounts = MockAccountQuery::new();
    accounts.expect_find_account().returning(|id: UserId| {
        Ok(Some(UserAccount {
            id,
            name: "Ana".to_owned(),
            email: Email::from_stored("ana@mail.com".to_owned()),
        }))
    });
    accounts
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Path of the helper route installed by [`with_sign_in`].
pub const SIGN_IN_PATH: &str = "/__test/sign-in";

/// Issue a non-remembered grant for user 1 at the fixture instant.
pub async fn sign_in(
    session: super::session::SessionContext,
) -> Result<actix_web::HttpResponse, crate::domain::Error> {
    use crate::domain::{SessionGrant, UserId};

    let grant = SessionGrant::issue(UserId::new(1), false, FixtureClock::fixed().0);
    session.establish(&grant)?;
    Ok(actix_web::HttpResponse::NoContent().finish())
}

/// Register the sign-in helper route on a test service config.
pub fn with_sign_in(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.route(SIGN_IN_PATH, actix_web::web::get().to(sign_in));
}
