//! Caption suggestion handler.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::normalise_tags;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/v1/captions`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CaptionRequest {
    /// Title of the work being captioned.
    #[schema(example = "Neon Dreams")]
    pub title: String,
    /// Tags woven into the caption.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Suggested caption.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CaptionResponse {
    /// Generated or fallback caption text.
    pub caption: String,
}

/// Suggest a caption for a draft post.
///
/// Generator failures are not surfaced: the response then carries a fixed
/// fallback caption.
#[utoipa::path(
    post,
    path = "/api/v1/captions",
    request_body = CaptionRequest,
    responses(
        (status = 200, description = "Suggestion", body = CaptionResponse),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["feed"],
    operation_id = "generateCaption"
)]
#[post("/captions")]
pub async fn generate_caption(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CaptionRequest>,
) -> ApiResult<web::Json<CaptionResponse>> {
    session.require_user_id()?;
    let CaptionRequest { title, tags } = payload.into_inner();
    let tags = normalise_tags(tags);
    let caption = state.captions.generate_caption(title.trim(), &tags).await?;
    Ok(web::Json(CaptionResponse { caption }))
}
