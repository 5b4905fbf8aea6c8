//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every route except login and the health checks requires a session.

pub mod captions;
pub mod contest;
pub mod error;
pub mod fans;
pub mod feed;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Register every session-scoped route. Mount under `/api/v1`.
///
/// `/users/me` is registered ahead of `/users/{id}` so `me` never resolves
/// as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(users::update_current_user)
        .service(users::get_user)
        .service(users::artist_posts)
        .service(feed::feed)
        .service(feed::create_post)
        .service(feed::add_comment)
        .service(captions::generate_caption)
        .service(fans::toggle_fan)
        .service(contest::list_entries)
        .service(contest::submit_entry)
        .service(contest::vote)
        .service(contest::voted_entries);
}
