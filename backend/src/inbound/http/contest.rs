//! Contest handlers.
//!
//! ```text
//! GET  /api/v1/contest/entries?category=BEST_IN_SHOW
//! POST /api/v1/contest/entries {"category":"FUNNIEST_VIDEO","clip":{...}}
//! POST /api/v1/contest/entries/{id}/vote
//! GET  /api/v1/contest/votes
//! ```

use std::collections::BTreeSet;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::{
    ClipSelection, ContestCategory, ContestEntry, ContestSubmission, EntryId, Error, VoteOutcome,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ClipSelectionSchema, ContestCategorySchema, ContestEntrySchema, ErrorSchema, VoteOutcomeSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string of `GET /api/v1/contest/entries`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EntriesQuery {
    /// `BEST_IN_SHOW` or `FUNNIEST_VIDEO`; absent or empty lists every entry.
    pub category: Option<String>,
}

impl EntriesQuery {
    fn category(&self) -> Result<Option<ContestCategory>, Error> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<ContestCategory>().map(Some).map_err(|err| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": "category", "code": "invalid_category" }))
            }),
        }
    }
}

/// Body of `POST /api/v1/contest/entries`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEntryRequest {
    /// Category to enter.
    #[schema(value_type = ContestCategorySchema)]
    pub category: ContestCategory,
    /// Entry title; a category default is used when omitted.
    pub title: Option<String>,
    /// Omitted by the demo upload flow; a placeholder video is stored.
    pub video_url: Option<String>,
    /// Selected clip window, validated strictly.
    #[schema(value_type = Option<ClipSelectionSchema>)]
    pub clip: Option<ClipSelection>,
}

impl From<SubmitEntryRequest> for ContestSubmission {
    fn from(request: SubmitEntryRequest) -> Self {
        Self {
            category: request.category,
            title: request.title,
            video_url: request.video_url,
            clip: request.clip,
        }
    }
}

/// Contest entries, optionally filtered by category.
#[utoipa::path(
    get,
    path = "/api/v1/contest/entries",
    params(EntriesQuery),
    responses(
        (status = 200, description = "Entries", body = [ContestEntrySchema]),
        (status = 400, description = "Unknown category", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["contest"],
    operation_id = "listContestEntries"
)]
#[get("/contest/entries")]
pub async fn list_entries(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<EntriesQuery>,
) -> ApiResult<web::Json<Vec<ContestEntry>>> {
    session.require_user_id()?;
    let category = query.category()?;
    Ok(web::Json(state.contest.entries(category).await?))
}

/// Enter the contest as the logged-in user.
#[utoipa::path(
    post,
    path = "/api/v1/contest/entries",
    request_body = SubmitEntryRequest,
    responses(
        (status = 201, description = "Entered", body = ContestEntrySchema),
        (status = 400, description = "Missing video or invalid clip", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["contest"],
    operation_id = "submitContestEntry"
)]
#[post("/contest/entries")]
pub async fn submit_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitEntryRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let entry = state
        .contest_command
        .submit_entry(&user_id, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(entry))
}

/// Vote once for an entry. Repeat votes return `accepted: false`.
#[utoipa::path(
    post,
    path = "/api/v1/contest/entries/{id}/vote",
    params(("id" = String, Path, description = "Entry id")),
    responses(
        (status = 200, description = "Vote recorded or already present", body = VoteOutcomeSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such entry", body = ErrorSchema),
        (status = 503, description = "Vote ledger unavailable", body = ErrorSchema)
    ),
    tags = ["contest"],
    operation_id = "voteForEntry"
)]
#[post("/contest/entries/{id}/vote")]
pub async fn vote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<VoteOutcome>> {
    let voter_id = session.require_user_id()?;
    let entry_id = EntryId::new(path.into_inner())?;
    let outcome = state
        .contest_command
        .vote_for_entry(&voter_id, &entry_id)
        .await?;
    if !outcome.accepted {
        debug!(%entry_id, "repeat vote ignored");
    }
    Ok(web::Json(outcome))
}

/// Entry ids the logged-in user has voted for.
#[utoipa::path(
    get,
    path = "/api/v1/contest/votes",
    responses(
        (status = 200, description = "Voted entry ids", body = [String]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["contest"],
    operation_id = "listVotedEntries"
)]
#[get("/contest/votes")]
pub async fn voted_entries(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<BTreeSet<EntryId>>> {
    let voter_id = session.require_user_id()?;
    Ok(web::Json(state.contest.voted_entries(&voter_id).await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{MockContestCommand, MockContestQuery};
    use crate::inbound::http::test_utils::{call_as, unused_state};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(list_entries)
            .service(submit_entry)
            .service(vote)
            .service(voted_entries);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("BEST_IN_SHOW"), Some(ContestCategory::BestInShow))]
    #[case(Some("FUNNIEST_VIDEO"), Some(ContestCategory::FunniestVideo))]
    fn category_filter_parses(
        #[case] raw: Option<&str>,
        #[case] expected: Option<ContestCategory>,
    ) {
        let query = EntriesQuery {
            category: raw.map(str::to_owned),
        };
        assert_eq!(query.category().expect("valid filter"), expected);
    }

    #[actix_web::test]
    async fn unknown_category_is_rejected() {
        let mut contest = MockContestQuery::new();
        contest.expect_entries().never();
        let state = HttpState {
            contest: Arc::new(contest),
            ..unused_state()
        };

        let res = call_as(
            state,
            routes,
            actix_test::TestRequest::get().uri("/api/v1/contest/entries?category=BEST_DANCE"),
            Some("3"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "invalid_category");
    }

    #[actix_web::test]
    async fn filter_is_forwarded() {
        let mut contest = MockContestQuery::new();
        contest
            .expect_entries()
            .withf(|category| *category == Some(ContestCategory::FunniestVideo))
            .return_once(|_| Ok(Vec::new()));
        let state = HttpState {
            contest: Arc::new(contest),
            ..unused_state()
        };

        let res = call_as(
            state,
            routes,
            actix_test::TestRequest::get().uri("/api/v1/contest/entries?category=FUNNIEST_VIDEO"),
            Some("3"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[case(true, 42)]
    #[case(false, 41)]
    #[actix_web::test]
    async fn vote_reports_outcome(#[case] accepted: bool, #[case] votes: u64) {
        let mut command = MockContestCommand::new();
        command
            .expect_vote_for_entry()
            .withf(|voter, entry| voter.as_ref() == "3" && entry.as_ref() == "e1")
            .return_once(move |_, _| Ok(VoteOutcome { accepted, votes }));
        let state = HttpState {
            contest_command: Arc::new(command),
            ..unused_state()
        };

        let res = call_as(
            state,
            routes,
            actix_test::TestRequest::post().uri("/api/v1/contest/entries/e1/vote"),
            Some("3"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["accepted"], accepted);
        assert_eq!(body["votes"], votes);
    }

    #[actix_web::test]
    async fn ledger_outage_is_service_unavailable() {
        let mut command = MockContestCommand::new();
        command
            .expect_vote_for_entry()
            .return_once(|_, _| Err(Error::service_unavailable("vote ledger unavailable")));
        let state = HttpState {
            contest_command: Arc::new(command),
            ..unused_state()
        };

        let res = call_as(
            state,
            routes,
            actix_test::TestRequest::post().uri("/api/v1/contest/entries/e1/vote"),
            Some("3"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn voted_entries_lists_ids() {
        let mut contest = MockContestQuery::new();
        contest.expect_voted_entries().return_once(|_| {
            Ok(["e2", "e1"]
                .into_iter()
                .map(|id| EntryId::new(id).expect("id"))
                .collect())
        });
        let state = HttpState {
            contest: Arc::new(contest),
            ..unused_state()
        };

        let res = call_as(
            state,
            routes,
            actix_test::TestRequest::get().uri("/api/v1/contest/votes"),
            Some("3"),
        )
        .await;
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!(["e1", "e2"]));
    }

    #[actix_web::test]
    async fn submission_carries_clip_to_the_port() {
        let mut command = MockContestCommand::new();
        command
            .expect_submit_entry()
            .withf(|user, submission| {
                user.as_ref() == "3"
                    && submission.category == ContestCategory::BestInShow
                    && submission.clip.is_some_and(|clip| clip.end_secs == 30.0)
            })
            .return_once(|_, _| Err(Error::service_unavailable("entries unavailable")));
        let state = HttpState {
            contest_command: Arc::new(command),
            ..unused_state()
        };

        let res = call_as(
            state,
            routes,
            actix_test::TestRequest::post()
                .uri("/api/v1/contest/entries")
                .set_json(serde_json::json!({
                    "category": "BEST_IN_SHOW",
                    "clip": { "durationSecs": 60.0, "startSecs": 0.0, "endSecs": 30.0 },
                })),
            Some("3"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
