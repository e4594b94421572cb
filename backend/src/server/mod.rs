//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::{
    DieselStores, InMemoryStores, Stores, assemble_ports, build_http_state,
};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::routes::configure;
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::mirrors::FileMirrorStore;
use crate::outbound::security::Argon2PasswordHasher;

/// Shared pieces every worker's `App` is built from.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub session: SessionSettings,
}

/// Assemble the application: probes, the route table, sessions and tracing.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session.middleware())
        .wrap(Trace)
        .service(ready)
        .service(live)
        .configure(configure)
}

/// Construct the HTTP server.
///
/// Opens the mirror directory, wires the stores selected by `config` and
/// marks the health state ready once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when the mirror directory cannot be opened
/// or the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let mirrors = Arc::new(FileMirrorStore::open(&config.mirror_dir)?);
    let http_state = web::Data::new(build_http_state(
        config.db_pool.as_ref(),
        mirrors,
        Arc::new(Argon2PasswordHasher::default()),
        Arc::new(DefaultClock),
    ));
    let storage = if config.db_pool.is_some() {
        "postgres"
    } else {
        "memory"
    };
    let ServerConfig {
        session,
        bind_addr,
        mirror_dir,
        db_pool: _,
    } = config;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind((bind_addr.0.as_str(), bind_addr.1))?
    .run();

    info!(
        host = %bind_addr.0,
        port = bind_addr.1,
        storage,
        mirror_dir = %mirror_dir,
        "server listening"
    );
    health_state.mark_ready();
    Ok(server)
}
