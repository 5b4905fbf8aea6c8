//! One vote per user per entry, end to end.

mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use faceexpo::client::{ClientSession, LocalStore, VOTES_KEY};
use faceexpo::domain::EntryId;
use faceexpo::outbound::local_store::MemoryLocalStore;
use support::{app, login, seeded_ports, send};

fn ids(entries: &Value) -> Vec<&str> {
    entries
        .as_array()
        .expect("entries array")
        .iter()
        .filter_map(|entry| entry["id"].as_str())
        .collect()
}

#[actix_web::test]
async fn repeat_votes_leave_the_tally_unchanged() {
    let app = test::init_service(app(seeded_ports())).await;
    let fan = login(&app, "FanBoy01").await;
    let vote = || test::TestRequest::post().uri("/api/v1/contest/entries/e1/vote");

    let (status, first) = send(&app, vote(), &fan).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, json!({ "accepted": true, "votes": 43 }));

    let (_, repeat) = send(&app, vote(), &fan).await;
    assert_eq!(repeat, json!({ "accepted": false, "votes": 43 }));

    let neon = login(&app, "NeonVibes").await;
    let (_, other) = send(&app, vote(), &neon).await;
    assert_eq!(other["votes"], 44);

    let (_, voted) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/contest/votes"),
        &fan,
    )
    .await;
    assert_eq!(voted, json!(["e1"]));
}

#[actix_web::test]
async fn category_filter_and_unknown_entry() {
    let app = test::init_service(app(seeded_ports())).await;
    let fan = login(&app, "FanBoy01").await;

    let (_, funniest) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/contest/entries?category=FUNNIEST_VIDEO"),
        &fan,
    )
    .await;
    let mut funniest = ids(&funniest);
    funniest.sort_unstable();
    assert_eq!(funniest, ["e2", "e3"]);

    let (_, all) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/contest/entries?category="),
        &fan,
    )
    .await;
    assert_eq!(ids(&all).len(), 3);

    let (status, _) = send(
        &app,
        test::TestRequest::post().uri("/api/v1/contest/entries/e404/vote"),
        &fan,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn submission_validates_the_clip_and_lists_the_entry() {
    let app = test::init_service(app(seeded_ports())).await;
    let fan = login(&app, "FanBoy01").await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/contest/entries")
            .set_json(json!({
                "category": "BEST_IN_SHOW",
                "clip": { "durationSecs": 120.0, "startSecs": 10.0, "endSecs": 70.0 },
            })),
        &fan,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "clip");

    let (status, entry) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/contest/entries")
            .set_json(json!({
                "category": "BEST_IN_SHOW",
                "clip": { "durationSecs": 120.0, "startSecs": 10.0, "endSecs": 40.0 },
            })),
        &fan,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["votes"], 0);
    assert_eq!(entry["userId"], "3");
    let new_id = entry["id"].as_str().expect("entry id").to_owned();

    let (_, listed) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/contest/entries?category=BEST_IN_SHOW"),
        &fan,
    )
    .await;
    assert!(ids(&listed).contains(&new_id.as_str()));
}

#[tokio::test]
async fn client_ledger_persists_across_sessions() {
    let ports = seeded_ports();
    let local = Arc::new(MemoryLocalStore::new());
    let entry = EntryId::new("e1").expect("id");

    let first = ClientSession::new(Arc::new(ports.clone()), local.clone());
    first.login("FanBoy01").await.expect("login");
    first.open_contest(None).await.expect("entries");
    assert!(first.vote(&entry).await.expect("vote"));
    let views = first.votes().entries();
    let shown = views
        .iter()
        .find(|view| view.entry.id == entry)
        .expect("entry shown");
    assert!(shown.has_voted);
    assert_eq!(shown.entry.votes, 43);
    assert!(local.get(VOTES_KEY).expect("read").is_some());

    let second = ClientSession::new(Arc::new(ports), local);
    assert!(second.votes().has_voted(&entry));
    second.login("FanBoy01").await.expect("login");
    assert!(!second.vote(&entry).await.expect("repeat vote"));
    assert!(second.sync_votes().await.expect("sync").is_empty());
}
