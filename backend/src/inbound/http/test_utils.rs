//! Helpers shared by the HTTP adapter's unit tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{App, HttpResponse, test, web};

use super::session::SessionContext;
use super::session_config::SESSION_COOKIE_NAME;
use super::state::HttpState;
use crate::domain::ports::{
    MockCaptionCommand, MockContestCommand, MockContestQuery, MockFanCommand, MockFeedQuery,
    MockLoginService, MockPostCommand, MockUserProfileCommand, MockUserProfileQuery,
};
use crate::domain::{Error, UserId};

/// Session middleware with a fresh key and no `Secure` flag.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// State whose ports all panic if called. Override the ports a test needs
/// with struct update syntax.
pub fn unused_state() -> HttpState {
    HttpState {
        login: Arc::new(MockLoginService::new()),
        profile: Arc::new(MockUserProfileQuery::new()),
        profile_command: Arc::new(MockUserProfileCommand::new()),
        feed: Arc::new(MockFeedQuery::new()),
        posts: Arc::new(MockPostCommand::new()),
        fans: Arc::new(MockFanCommand::new()),
        contest: Arc::new(MockContestQuery::new()),
        contest_command: Arc::new(MockContestCommand::new()),
        captions: Arc::new(MockCaptionCommand::new()),
    }
}

/// Route handler that logs in as the id in the path, bypassing the login
/// port.
pub async fn login_as(
    path: web::Path<String>,
    session: SessionContext,
) -> Result<HttpResponse, Error> {
    let id = UserId::new(path.into_inner())?;
    session.persist_user(&id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Serve `request` against `routes` mounted under `/api/v1`, first logging
/// in as `as_user` when given.
pub async fn call_as<F>(
    state: HttpState,
    routes: F,
    request: test::TestRequest,
    as_user: Option<&str>,
) -> ServiceResponse
where
    F: FnOnce(&mut web::ServiceConfig),
{
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .route("/test-login/{id}", web::post().to(login_as))
            .service(web::scope("/api/v1").configure(routes)),
    )
    .await;
    let request = match as_user {
        Some(id) => {
            let login = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri(&format!("/test-login/{id}"))
                    .to_request(),
            )
            .await;
            let cookie = session_cookie(&login).expect("session cookie after test login");
            request.cookie(cookie)
        }
        None => request,
    };
    test::call_service(&app, request.to_request()).await
}
