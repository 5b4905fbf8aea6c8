//! Fan toggle handler.
//!
//! ```text
//! POST /api/v1/artists/{id}/fan
//! ```
//!
//! The toggle is not idempotent: each call flips the relationship. The
//! response carries the server's authoritative state so clients can correct
//! any optimistic update they applied.

use actix_web::{post, web};

use crate::domain::UserId;
use crate::domain::ports::FanToggleOutcome;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, FanToggleOutcomeSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Become, or stop being, a fan of an artist.
#[utoipa::path(
    post,
    path = "/api/v1/artists/{id}/fan",
    params(("id" = String, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Toggled", body = FanToggleOutcomeSchema),
        (status = 400, description = "Cannot fan yourself or a non-artist", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such artist", body = ErrorSchema)
    ),
    tags = ["fans"],
    operation_id = "toggleFan"
)]
#[post("/artists/{id}/fan")]
pub async fn toggle_fan(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<FanToggleOutcome>> {
    let viewer_id = session.require_user_id()?;
    let artist_id = UserId::new(path.into_inner())?;
    let outcome = state.fans.toggle_fan(&viewer_id, &artist_id).await?;
    Ok(web::Json(outcome))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::MockFanCommand;
    use crate::inbound::http::test_utils::{call_as, unused_state};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(toggle_fan);
    }

    #[actix_web::test]
    async fn toggle_returns_authoritative_state() {
        let mut fans = MockFanCommand::new();
        fans.expect_toggle_fan()
            .withf(|viewer, artist| viewer.as_ref() == "3" && artist.as_ref() == "2")
            .times(1)
            .return_once(|_, _| {
                Ok(FanToggleOutcome {
                    is_fanned: true,
                    new_fan_count: 891,
                })
            });
        let state = HttpState {
            fans: Arc::new(fans),
            ..unused_state()
        };

        let res = call_as(
            state,
            routes,
            test::TestRequest::post().uri("/api/v1/artists/2/fan"),
            Some("3"),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["isFanned"], true);
        assert_eq!(body["newFanCount"], 891);
    }

    #[actix_web::test]
    async fn self_fan_is_a_bad_request() {
        let mut fans = MockFanCommand::new();
        fans.expect_toggle_fan()
            .return_once(|_, _| Err(Error::invalid_request("cannot fan yourself")));
        let state = HttpState {
            fans: Arc::new(fans),
            ..unused_state()
        };

        let res = call_as(
            state,
            routes,
            test::TestRequest::post().uri("/api/v1/artists/1/fan"),
            Some("1"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn anonymous_toggle_never_reaches_the_port() {
        let mut fans = MockFanCommand::new();
        fans.expect_toggle_fan().never();
        let state = HttpState {
            fans: Arc::new(fans),
            ..unused_state()
        };

        let res = call_as(
            state,
            routes,
            test::TestRequest::post().uri("/api/v1/artists/2/fan"),
            None,
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
