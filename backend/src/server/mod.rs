//! Server construction and middleware wiring.

mod config;

pub use config::{AppSettings, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::info;

use faceexpo::Trace;
#[cfg(debug_assertions)]
use faceexpo::doc::ApiDoc;
use faceexpo::inbound::http;
use faceexpo::inbound::http::health::{HealthState, live, ready};
use faceexpo::inbound::http::session_config::SessionSettings;
use faceexpo::inbound::http::state::HttpState;
use faceexpo::outbound::memory::MemoryStore;
use faceexpo::wiring::ServicePorts;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
}

fn build_app(
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

    let api = web::scope("/api/v1")
        .wrap(session.middleware())
        .configure(http::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Build the shared store described by `config`.
fn build_store(config: &ServerConfig, clock: &dyn Clock) -> MemoryStore {
    let store = if config.seed_demo_data {
        MemoryStore::seeded(clock.utc())
    } else {
        MemoryStore::new()
    };
    match config.latency {
        Some(latency) => store.with_latency(latency),
        None => store,
    }
}

/// Construct an Actix HTTP server over an in-memory store.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let store = Arc::new(build_store(&config, clock.as_ref()));
    let http_state = web::Data::new(HttpState::from(ServicePorts::in_memory(store, clock)));
    let session = config.session.clone();
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(config.bind_addr)?;

    info!(
        addrs = ?server.addrs(),
        seeded = config.seed_demo_data,
        latency_ms = config.latency.map(|l| l.as_millis()),
        "listening"
    );
    let server = server.run();
    health_state.mark_ready();
    Ok(server)
}
