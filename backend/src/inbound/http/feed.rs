//! Feed, post and comment handlers.
//!
//! ```text
//! GET  /api/v1/feed
//! POST /api/v1/posts {"title":"Neon Dreams","mediaUrl":"...","mediaType":"image","tags":["neon"]}
//! POST /api/v1/posts/{id}/comments {"text":"Love it"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{CommentText, Error, MediaType, NewPost, Post, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CommentSchema, ErrorSchema, MediaTypeSchema, PostSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/v1/posts`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Post title; trimmed, must not be blank.
    #[schema(example = "Neon Dreams")]
    pub title: String,
    /// Image or video URL.
    pub media_url: String,
    /// Kind of media behind `mediaUrl`.
    #[schema(value_type = MediaTypeSchema)]
    pub media_type: MediaType,
    /// Free-form tags; blanks and duplicates are dropped.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TryFrom<CreatePostRequest> for NewPost {
    type Error = Error;

    fn try_from(request: CreatePostRequest) -> Result<Self, Self::Error> {
        Ok(NewPost::new(
            request.title,
            request.media_url,
            request.media_type,
            request.tags,
        )?)
    }
}

/// Body of `POST /api/v1/posts/{id}/comments`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CommentRequest {
    /// Comment body; must not be blank.
    #[schema(example = "This slaps")]
    pub text: String,
}

/// All posts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/feed",
    responses(
        (status = 200, description = "Feed", body = [PostSchema]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["feed"],
    operation_id = "getFeed"
)]
#[get("/feed")]
pub async fn feed(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Post>>> {
    session.require_user_id()?;
    Ok(web::Json(state.feed.feed().await?))
}

/// Publish a post as the logged-in artist.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Created", body = PostSchema),
        (status = 400, description = "Invalid draft", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Only artists may post", body = ErrorSchema)
    ),
    tags = ["feed"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let draft = NewPost::try_from(payload.into_inner())?;
    let post = state.posts.create_post(&author_id, draft).await?;
    Ok(HttpResponse::Created().json(post))
}

/// Comment on a post as the logged-in user.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/comments",
    params(("id" = String, Path, description = "Post id")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Created", body = CommentSchema),
        (status = 400, description = "Empty comment", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["feed"],
    operation_id = "addComment"
)]
#[post("/posts/{id}/comments")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let post_id = PostId::new(path.into_inner())?;
    let text = CommentText::new(payload.into_inner().text)?;
    let comment = state.posts.add_comment(&post_id, &author_id, text).await?;
    Ok(HttpResponse::Created().json(comment))
}
