//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; each
//! one pulls this module in with `mod support;`.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;

use actix_http::Request;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::Clock;
use serde_json::Value;

use faceexpo::Trace;
use faceexpo::inbound::http;
use faceexpo::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use faceexpo::inbound::http::state::HttpState;
use faceexpo::outbound::memory::MemoryStore;
use faceexpo::test_support::FixtureClock;
use faceexpo::wiring::ServicePorts;

/// Demo ids.
pub const NEON_VIBES: &str = "1";
pub const BEAT_MAKER: &str = "2";
pub const FAN_BOY: &str = "3";

/// Services over a freshly seeded store pinned to the fixture clock.
pub fn seeded_ports() -> ServicePorts {
    let clock = FixtureClock::default();
    let store = Arc::new(MemoryStore::seeded(clock.utc()));
    ServicePorts::in_memory(store, Arc::new(clock))
}

/// The production route table over `ports`, without the `Secure` cookie flag.
pub fn app(
    ports: ServicePorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    App::new()
        .app_data(web::Data::new(HttpState::from(ports)))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session.middleware())
                .configure(http::configure),
        )
}

/// Log in as `username` and return the session cookie.
pub async fn login<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({ "username": username }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login as {username}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie")
}

/// Send `request` with `cookie` and decode the JSON body, if any.
pub async fn send<S>(
    app: &S,
    request: test::TestRequest,
    cookie: &Cookie<'static>,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, request.cookie(cookie.clone()).to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, json)
}

/// `fanCount` of every post by `artist_id` in a feed payload.
pub fn feed_counts(feed: &Value, artist_id: &str) -> Vec<u64> {
    feed.as_array()
        .expect("feed array")
        .iter()
        .filter(|post| post["artistId"] == artist_id)
        .filter_map(|post| post["fanCount"].as_u64())
        .collect()
}
