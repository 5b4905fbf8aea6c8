//! OpenAPI schemas for domain types.
//!
//! Domain types stay free of `utoipa`. The wrappers below mirror their JSON
//! shape and are registered under the domain type's name via
//! `#[schema(as = ...)]`.

#![allow(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]

use utoipa::ToSchema;

/// Machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error payload.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "username must not be empty")]
    message: String,
    trace_id: Option<String>,
    /// `{ "field": ..., "code": ... }` for validation failures.
    details: Option<serde_json::Value>,
}

/// `ARTIST` or `FAN`.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserRole)]
pub enum UserRoleSchema {
    #[schema(rename = "ARTIST")]
    Artist,
    #[schema(rename = "FAN")]
    Fan,
}

/// Application user.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[schema(rename_all = "camelCase")]
pub struct UserSchema {
    #[schema(example = "1")]
    id: String,
    #[schema(example = "NeonVibes")]
    username: String,
    role: UserRoleSchema,
    avatar_url: String,
    bio: Option<String>,
    fan_count: u64,
    following_count: u64,
    #[schema(value_type = String, format = Date, example = "2023-01-15")]
    joined_date: String,
    fanned_artist_ids: Vec<String>,
}

/// `image` or `video`.
#[derive(ToSchema)]
#[schema(as = crate::domain::MediaType)]
pub enum MediaTypeSchema {
    #[schema(rename = "image")]
    Image,
    #[schema(rename = "video")]
    Video,
}

/// Comment on a post.
#[derive(ToSchema)]
#[schema(as = crate::domain::Comment)]
#[schema(rename_all = "camelCase")]
pub struct CommentSchema {
    id: String,
    user_id: String,
    username: String,
    text: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// Feed post. `fanCount` is the artist's count when last reconciled.
#[derive(ToSchema)]
#[schema(as = crate::domain::Post)]
#[schema(rename_all = "camelCase")]
pub struct PostSchema {
    id: String,
    artist_id: String,
    artist_name: String,
    artist_avatar: String,
    title: String,
    media_url: String,
    media_type: MediaTypeSchema,
    tags: Vec<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    fan_count: u64,
    comments: Vec<CommentSchema>,
}

/// `BEST_IN_SHOW` or `FUNNIEST_VIDEO`.
#[derive(ToSchema)]
#[schema(as = crate::domain::ContestCategory)]
pub enum ContestCategorySchema {
    #[schema(rename = "BEST_IN_SHOW")]
    BestInShow,
    #[schema(rename = "FUNNIEST_VIDEO")]
    FunniestVideo,
}

/// Contest entry.
#[derive(ToSchema)]
#[schema(as = crate::domain::ContestEntry)]
#[schema(rename_all = "camelCase")]
pub struct ContestEntrySchema {
    #[schema(example = "e1")]
    id: String,
    user_id: String,
    username: String,
    user_avatar: String,
    video_url: String,
    thumbnail_url: Option<String>,
    category: ContestCategorySchema,
    votes: u64,
    title: String,
}

/// Result of a vote.
#[derive(ToSchema)]
#[schema(as = crate::domain::VoteOutcome)]
pub struct VoteOutcomeSchema {
    accepted: bool,
    votes: u64,
}

/// Clip bounds in seconds.
#[derive(ToSchema)]
#[schema(as = crate::domain::ClipSelection)]
#[schema(rename_all = "camelCase")]
pub struct ClipSelectionSchema {
    #[schema(example = 60.0)]
    duration_secs: f64,
    #[schema(example = 0.0)]
    start_secs: f64,
    #[schema(example = 30.0)]
    end_secs: f64,
}

/// Result of a fan toggle.
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::FanToggleOutcome)]
#[schema(rename_all = "camelCase")]
pub struct FanToggleOutcomeSchema {
    is_fanned: bool,
    new_fan_count: u64,
}
