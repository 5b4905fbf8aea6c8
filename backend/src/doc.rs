//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`] and the session cookie security scheme.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it.

use crate::inbound::http::captions::{CaptionRequest, CaptionResponse};
use crate::inbound::http::contest::SubmitEntryRequest;
use crate::inbound::http::feed::{CommentRequest, CreatePostRequest};
use crate::inbound::http::schemas::{
    ClipSelectionSchema, CommentSchema, ContestCategorySchema, ContestEntrySchema,
    ErrorCodeSchema, ErrorSchema, FanToggleOutcomeSchema, MediaTypeSchema, PostSchema,
    UserRoleSchema, UserSchema, VoteOutcomeSchema,
};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::users::{LoginRequest, ProfileUpdateRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "FaceExpo API",
        description = "Artist feed, fan relationships and the karaoke contest.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::artist_posts,
        crate::inbound::http::feed::feed,
        crate::inbound::http::feed::create_post,
        crate::inbound::http::feed::add_comment,
        crate::inbound::http::captions::generate_caption,
        crate::inbound::http::fans::toggle_fan,
        crate::inbound::http::contest::list_entries,
        crate::inbound::http::contest::submit_entry,
        crate::inbound::http::contest::vote,
        crate::inbound::http::contest::voted_entries,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        UserRoleSchema,
        PostSchema,
        CommentSchema,
        MediaTypeSchema,
        ContestEntrySchema,
        ContestCategorySchema,
        ClipSelectionSchema,
        VoteOutcomeSchema,
        FanToggleOutcomeSchema,
        LoginRequest,
        ProfileUpdateRequest,
        CreatePostRequest,
        CommentRequest,
        CaptionRequest,
        CaptionResponse,
        SubmitEntryRequest,
    )),
    tags(
        (name = "users", description = "Login, logout and profiles"),
        (name = "feed", description = "Posts, comments and caption suggestions"),
        (name = "fans", description = "Fan relationships between users and artists"),
        (name = "contest", description = "Karaoke contest entries and votes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
