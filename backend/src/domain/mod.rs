//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed FaceExpo entities and the use-case services
//! that operate on them. Adapters talk to this layer exclusively through the
//! driving ports in [`ports`]; services reach storage through driven ports.
//!
//! Public surface:
//! - Identifiers ([`UserId`], [`PostId`], [`CommentId`], [`EntryId`]).
//! - Entities ([`User`], [`Post`], [`Comment`], [`ContestEntry`]).
//! - Clip selection ([`ClipWindow`], [`ClipPreview`]).
//! - [`Error`] / [`ErrorCode`], the transport-agnostic failure payload.
//! - Services implementing the driving ports.

pub mod clip_window;
pub mod contest;
pub mod error;
pub mod ids;
pub mod ports;
pub mod post;
pub mod trace_id;
pub mod user;

mod account_service;
mod caption_service;
mod contest_service;
mod fan_service;
mod feed_service;

pub use self::account_service::{AccountService, NEW_USER_BIO};
pub use self::caption_service::{CAPTION_FALLBACK, CaptionService};
pub use self::clip_window::{
    ClipPreview, ClipWindow, ClipWindowError, DragOutcome, DragRejection, END_SEEK_LEAD,
    MAX_CLIP, MIN_CLIP, TimeUpdate, format_clock,
};
pub use self::contest::{
    ClipSelection, ContestCategory, ContestEntry, ContestSubmission, ParseContestCategoryError,
    VoteOutcome,
};
pub use self::contest_service::ContestService;
pub use self::error::{Error, ErrorCode};
pub use self::fan_service::FanService;
pub use self::feed_service::FeedService;
pub use self::ids::{CommentId, EntryId, IdValidationError, PostId, UserId};
pub use self::post::{
    Comment, CommentText, MediaType, NewPost, Post, PostValidationError, normalise_tags,
    parse_tag_list,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    ParseUserRoleError, User, UserProfileUpdate, UserRole, UserValidationError,
    Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use faceexpo::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
