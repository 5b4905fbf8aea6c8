//! Account and profile handlers.
//!
//! ```text
//! POST  /api/v1/login {"username":"NeonVibes"}
//! POST  /api/v1/logout
//! GET   /api/v1/users/me
//! PATCH /api/v1/users/me {"bio":"Synthwave all day"}
//! GET   /api/v1/users/{id}
//! GET   /api/v1/users/{id}/posts
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Error, Post, User, UserId, UserProfileUpdate, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PostSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Existing username (any case) or the name for a new account.
    #[schema(example = "NeonVibes")]
    pub username: String,
}

/// Body of `PATCH /api/v1/users/me`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    /// New username; must not clash with another account.
    pub username: Option<String>,
    /// New avatar URL; must not be blank.
    pub avatar_url: Option<String>,
    /// An empty string clears the bio.
    pub bio: Option<String>,
}

impl TryFrom<ProfileUpdateRequest> for UserProfileUpdate {
    type Error = Error;

    fn try_from(request: ProfileUpdateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: request.username.map(Username::new).transpose()?,
            avatar_url: request.avatar_url,
            bio: request.bio,
        })
    }
}

fn parse_user_id(raw: String) -> Result<UserId, Error> {
    Ok(UserId::new(raw)?)
}

/// Log in by username, creating an artist account for unknown names.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = UserSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid username", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let username = Username::new(payload.into_inner().username)?;
    let user = state.login.login(&username).await?;
    session.persist_user(user.id())?;
    info!(user_id = %user.id(), "session established");
    Ok(web::Json(user))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Logged out")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.forget();
    HttpResponse::NoContent().finish()
}

/// The logged-in user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Session user no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    state
        .profile
        .find_user(&user_id)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found(format!("user not found: {user_id}")))
}

/// Update the logged-in user's profile.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid field", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateCurrentUser"
)]
#[patch("/users/me")]
pub async fn update_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let update = UserProfileUpdate::try_from(payload.into_inner())?;
    let user = state.profile_command.update_profile(&user_id, update).await?;
    Ok(web::Json(user))
}

/// Any user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    session.require_user_id()?;
    let user_id = parse_user_id(path.into_inner())?;
    state
        .profile
        .find_user(&user_id)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found(format!("user not found: {user_id}")))
}

/// Posts by one artist, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/posts",
    params(("id" = String, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Posts", body = [PostSchema]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getArtistPosts"
)]
#[get("/users/{id}/posts")]
pub async fn artist_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Post>>> {
    session.require_user_id()?;
    let artist_id = parse_user_id(path.into_inner())?;
    Ok(web::Json(state.feed.artist_posts(&artist_id).await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::NaiveDate;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::UserRole;
    use crate::domain::ports::{
        MockLoginService, MockUserProfileCommand, MockUserProfileQuery,
    };
    use crate::inbound::http::test_utils::{call_as, session_cookie, unused_state};

    fn neon() -> User {
        User::new(
            UserId::new("1").expect("id"),
            Username::new("NeonVibes").expect("username"),
            UserRole::Artist,
            "https://picsum.photos/100/100?random=1",
            NaiveDate::from_ymd_opt(2023, 1, 15).expect("date"),
        )
        .with_counts(1240, 5)
    }

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(login)
            .service(logout)
            .service(current_user)
            .service(update_current_user)
            .service(get_user)
            .service(artist_posts);
    }

    async fn call(
        state: HttpState,
        request: test::TestRequest,
        as_user: Option<&str>,
    ) -> ServiceResponse {
        call_as(state, routes, request, as_user).await
    }

    #[actix_web::test]
    async fn login_returns_user_and_sets_cookie() {
        let mut login_port = MockLoginService::new();
        login_port
            .expect_login()
            .withf(|name| name.as_ref() == "NeonVibes")
            .return_once(|_| Ok(neon()));
        let state = HttpState {
            login: Arc::new(login_port),
            ..unused_state()
        };

        let res = call(
            state,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginRequest {
                    username: " NeonVibes ".to_owned(),
                }),
            None,
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(session_cookie(&res).is_some());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["fanCount"], 1240);
        assert_eq!(body["role"], "ARTIST");
    }

    #[rstest]
    #[case("   ", "empty_username")]
    #[case("line\nbreak", "username_invalid_characters")]
    #[actix_web::test]
    async fn login_validates_username(#[case] username: &str, #[case] code: &str) {
        let mut login_port = MockLoginService::new();
        login_port.expect_login().never();
        let state = HttpState {
            login: Arc::new(login_port),
            ..unused_state()
        };

        let res = call(
            state,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginRequest {
                    username: username.to_owned(),
                }),
            None,
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "username");
        assert_eq!(body["details"]["code"], code);
    }

    #[rstest]
    #[case("/api/v1/users/me")]
    #[case("/api/v1/users/1")]
    #[case("/api/v1/users/1/posts")]
    #[actix_web::test]
    async fn reads_require_a_session(#[case] uri: &str) {
        let res = call(unused_state(), test::TestRequest::get().uri(uri), None).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unknown_user_is_not_found() {
        let mut profile = MockUserProfileQuery::new();
        profile.expect_find_user().return_once(|_| Ok(None));
        let state = HttpState {
            profile: Arc::new(profile),
            ..unused_state()
        };

        let res = call(
            state,
            test::TestRequest::get().uri("/api/v1/users/77"),
            Some("3"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn me_resolves_the_session_user() {
        let mut profile = MockUserProfileQuery::new();
        profile
            .expect_find_user()
            .withf(|id| id.as_ref() == "1")
            .return_once(|_| Ok(Some(neon())));
        let state = HttpState {
            profile: Arc::new(profile),
            ..unused_state()
        };

        let res = call(state, test::TestRequest::get().uri("/api/v1/users/me"), Some("1")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["username"], "NeonVibes");
    }

    #[actix_web::test]
    async fn profile_update_targets_the_session_user() {
        let mut command = MockUserProfileCommand::new();
        command
            .expect_update_profile()
            .withf(|id, update| id.as_ref() == "1" && update.bio.as_deref() == Some("New bio"))
            .return_once(|_, _| Ok(neon().with_bio("New bio")));
        let state = HttpState {
            profile_command: Arc::new(command),
            ..unused_state()
        };

        let res = call(
            state,
            test::TestRequest::patch()
                .uri("/api/v1/users/me")
                .set_json(ProfileUpdateRequest {
                    bio: Some("New bio".to_owned()),
                    ..ProfileUpdateRequest::default()
                }),
            Some("1"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["bio"], "New bio");
    }

    #[actix_web::test]
    async fn username_conflict_maps_to_409() {
        let mut command = MockUserProfileCommand::new();
        command
            .expect_update_profile()
            .return_once(|_, _| Err(Error::conflict("username already taken")));
        let state = HttpState {
            profile_command: Arc::new(command),
            ..unused_state()
        };

        let res = call(
            state,
            test::TestRequest::patch()
                .uri("/api/v1/users/me")
                .set_json(ProfileUpdateRequest {
                    username: Some("BeatMakerPro".to_owned()),
                    ..ProfileUpdateRequest::default()
                }),
            Some("1"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }
}
