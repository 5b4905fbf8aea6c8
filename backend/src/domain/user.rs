//! User accounts: artists and fans.
//!
//! A [`User`] owns the set of artists it fans. That set is only mutated by
//! the user's own toggle actions, while the aggregate `fan_count` is mutated
//! by other users' toggles.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::UserId;

/// Validation errors returned while building user values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username contained control or formatting characters.
    #[error("username must not contain control characters")]
    UsernameInvalidCharacters,
    /// Avatar URL was blank.
    #[error("avatar url must not be empty")]
    EmptyAvatarUrl,
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Any printable text, in any script.
        Regex::new(r"^[^\p{Cc}\p{Cf}]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Public handle shown next to posts and entries.
///
/// Stored trimmed; comparisons for login are case-insensitive via
/// [`Username::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Examples
    /// ```
    /// use faceexpo::domain::Username;
    ///
    /// let name = Username::new("  NeonVibes ").expect("valid");
    /// assert_eq!(name.as_ref(), "NeonVibes");
    /// assert!(Username::new("   ").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if !username_regex().is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Case-insensitive comparison used to resolve logins.
    pub fn matches(&self, other: &Username) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Publishes work and can be fanned.
    Artist,
    /// Follows artists.
    Fan,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Artist => f.write_str("ARTIST"),
            Self::Fan => f.write_str("FAN"),
        }
    }
}

/// Error returned when parsing an unknown role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(String);

impl FromStr for UserRole {
    type Err = ParseUserRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ARTIST" => Ok(Self::Artist),
            "FAN" => Ok(Self::Fan),
            other => Err(ParseUserRoleError(other.to_owned())),
        }
    }
}

/// Fields a user may change from the settings screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfileUpdate {
    /// Replacement username.
    pub username: Option<Username>,
    /// Replacement avatar URL.
    pub avatar_url: Option<String>,
    /// Replacement bio; an empty string clears it.
    pub bio: Option<String>,
}

impl UserProfileUpdate {
    /// True when nothing would change.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.avatar_url.is_none() && self.bio.is_none()
    }

    /// Reject values no stored profile may take.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        match self.avatar_url.as_deref() {
            Some(url) if url.trim().is_empty() => Err(UserValidationError::EmptyAvatarUrl),
            _ => Ok(()),
        }
    }
}

/// Application user.
///
/// ## Invariants
/// - `fanned_artist_ids` never contains the user's own id.
/// - Adding an already-fanned artist or removing an absent one is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: Username,
    role: UserRole,
    avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bio: Option<String>,
    fan_count: u64,
    following_count: u64,
    joined_date: NaiveDate,
    #[serde(default)]
    fanned_artist_ids: BTreeSet<UserId>,
}

impl User {
    /// Build a user with zero counts and no fanned artists.
    pub fn new(
        id: UserId,
        username: Username,
        role: UserRole,
        avatar_url: impl Into<String>,
        joined_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            username,
            role,
            avatar_url: avatar_url.into(),
            bio: None,
            fan_count: 0,
            following_count: 0,
            joined_date,
            fanned_artist_ids: BTreeSet::new(),
        }
    }

    /// Attach a bio.
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Override the aggregate fan and following counts.
    #[must_use]
    pub fn with_counts(mut self, fan_count: u64, following_count: u64) -> Self {
        self.fan_count = fan_count;
        self.following_count = following_count;
        self
    }

    /// Seed the fanned-artist set.
    #[must_use]
    pub fn with_fanned_artists(mut self, artists: impl IntoIterator<Item = UserId>) -> Self {
        self.fanned_artist_ids = artists.into_iter().filter(|id| id != &self.id).collect();
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Public handle.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Account role.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// True for artist accounts.
    pub fn is_artist(&self) -> bool {
        matches!(self.role, UserRole::Artist)
    }

    /// Avatar image URL.
    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    /// Optional free-text bio.
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    /// Number of fans this user has.
    pub fn fan_count(&self) -> u64 {
        self.fan_count
    }

    /// Number of artists this user fans.
    pub fn following_count(&self) -> u64 {
        self.following_count
    }

    /// Date the account was created.
    pub fn joined_date(&self) -> NaiveDate {
        self.joined_date
    }

    /// Artists this user is a fan of.
    pub fn fanned_artist_ids(&self) -> &BTreeSet<UserId> {
        &self.fanned_artist_ids
    }

    /// True when this user fans `artist_id`.
    pub fn is_fan_of(&self, artist_id: &UserId) -> bool {
        self.fanned_artist_ids.contains(artist_id)
    }

    /// Record that this user fans `artist_id`.
    ///
    /// Returns `false` (and changes nothing) when already fanned or when
    /// `artist_id` is the user's own id.
    pub fn add_fanned_artist(&mut self, artist_id: UserId) -> bool {
        if artist_id == self.id || !self.fanned_artist_ids.insert(artist_id) {
            return false;
        }
        self.following_count = self.following_count.saturating_add(1);
        true
    }

    /// Remove `artist_id` from the fanned set; `false` when absent.
    pub fn remove_fanned_artist(&mut self, artist_id: &UserId) -> bool {
        if !self.fanned_artist_ids.remove(artist_id) {
            return false;
        }
        self.following_count = self.following_count.saturating_sub(1);
        true
    }

    /// Increment the aggregate fan count, returning the new value.
    pub fn gain_fan(&mut self) -> u64 {
        self.fan_count = self.fan_count.saturating_add(1);
        self.fan_count
    }

    /// Decrement the aggregate fan count (floored at zero), returning the new value.
    pub fn lose_fan(&mut self) -> u64 {
        self.fan_count = self.fan_count.saturating_sub(1);
        self.fan_count
    }

    /// Apply a settings update. Empty bios clear the field.
    pub fn apply_update(&mut self, update: UserProfileUpdate) -> Result<(), UserValidationError> {
        update.validate()?;
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(avatar_url) = update.avatar_url {
            self.avatar_url = avatar_url.trim().to_owned();
        }
        if let Some(bio) = update.bio {
            let bio = bio.trim();
            self.bio = (!bio.is_empty()).then(|| bio.to_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
