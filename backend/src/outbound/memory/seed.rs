//! Demo data loaded into a fresh [`super::MemoryStore`].

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use tracing::warn;

use super::Tables;
use crate::domain::{
    Comment, CommentId, ContestCategory, ContestEntry, EntryId, MediaType, Post, PostId, User,
    UserId, UserRole, Username,
};

struct SeedUser {
    id: &'static str,
    username: &'static str,
    role: UserRole,
    bio: Option<&'static str>,
    fan_count: u64,
    following_count: u64,
    joined: (i32, u32, u32),
    fans_of: &'static [&'static str],
}

const USERS: &[SeedUser] = &[
    SeedUser {
        id: "1",
        username: "NeonVibes",
        role: UserRole::Artist,
        bio: Some("Digital artist creating cyber-reality."),
        fan_count: 1240,
        following_count: 5,
        joined: (2023, 1, 15),
        fans_of: &[],
    },
    SeedUser {
        id: "2",
        username: "BeatMakerPro",
        role: UserRole::Artist,
        bio: Some("Synthwave producer. Future sounds."),
        fan_count: 8900,
        following_count: 20,
        joined: (2023, 3, 10),
        fans_of: &[],
    },
    SeedUser {
        id: "3",
        username: "FanBoy01",
        role: UserRole::Fan,
        bio: None,
        fan_count: 0,
        following_count: 45,
        joined: (2023, 6, 20),
        fans_of: &["1"],
    },
];

struct SeedPost {
    id: &'static str,
    artist: &'static str,
    title: &'static str,
    media_seed: u32,
    tags: &'static [&'static str],
    age_days: i64,
    fan_count: u64,
}

const POSTS: &[SeedPost] = &[
    SeedPost {
        id: "101",
        artist: "1",
        title: "Cyberpunk City 2077",
        media_seed: 10,
        tags: &["cyberpunk", "art", "neon"],
        age_days: 0,
        fan_count: 1240,
    },
    SeedPost {
        id: "102",
        artist: "2",
        title: "Studio Session - Night Shift",
        media_seed: 11,
        tags: &["music", "studio", "synth"],
        age_days: 1,
        fan_count: 8900,
    },
    SeedPost {
        id: "103",
        artist: "1",
        title: "Glitch in the Matrix",
        media_seed: 12,
        tags: &["glitch", "abstract"],
        age_days: 2,
        fan_count: 1250,
    },
];

struct SeedEntry {
    id: &'static str,
    user: &'static str,
    category: ContestCategory,
    title: &'static str,
    votes: u64,
}

const ENTRIES: &[SeedEntry] = &[
    SeedEntry {
        id: "e1",
        user: "1",
        category: ContestCategory::BestInShow,
        title: "Neon Nights Karaoke",
        votes: 42,
    },
    SeedEntry {
        id: "e2",
        user: "2",
        category: ContestCategory::FunniestVideo,
        title: "Autotune Gone Wrong",
        votes: 17,
    },
    SeedEntry {
        id: "e3",
        user: "3",
        category: ContestCategory::FunniestVideo,
        title: "Cat Duet",
        votes: 88,
    },
];

fn avatar_url(id: &str) -> String {
    format!("https://picsum.photos/100/100?random={id}")
}

fn build_user(seed: &SeedUser) -> Option<User> {
    let (year, month, day) = seed.joined;
    let id = UserId::new(seed.id).ok()?;
    let user = User::new(
        id,
        Username::new(seed.username).ok()?,
        seed.role,
        avatar_url(seed.id),
        NaiveDate::from_ymd_opt(year, month, day)?,
    )
    .with_counts(seed.fan_count, seed.following_count)
    .with_fanned_artists(seed.fans_of.iter().filter_map(|id| UserId::new(*id).ok()));
    Some(match seed.bio {
        Some(bio) => user.with_bio(bio),
        None => user,
    })
}

fn build_post(seed: &SeedPost, users: &[User], now: DateTime<Utc>) -> Option<Post> {
    let artist = users.iter().find(|user| user.id().as_ref() == seed.artist)?;
    let comments = if seed.id == "101" {
        vec![Comment {
            id: CommentId::new("c1").ok()?,
            user_id: UserId::new("3").ok()?,
            username: "FanBoy01".to_owned(),
            text: "This is incredible!".to_owned(),
            created_at: now,
        }]
    } else {
        Vec::new()
    };
    Some(Post {
        id: PostId::new(seed.id).ok()?,
        artist_id: artist.id().clone(),
        artist_name: artist.username().to_string(),
        artist_avatar: artist.avatar_url().to_owned(),
        title: seed.title.to_owned(),
        media_url: format!("https://picsum.photos/800/600?random={}", seed.media_seed),
        media_type: MediaType::Image,
        tags: seed.tags.iter().map(|tag| (*tag).to_owned()).collect(),
        created_at: now - TimeDelta::days(seed.age_days),
        fan_count: seed.fan_count,
        comments,
    })
}

fn build_entry(seed: &SeedEntry, users: &[User]) -> Option<ContestEntry> {
    let user = users.iter().find(|user| user.id().as_ref() == seed.user)?;
    Some(ContestEntry {
        id: EntryId::new(seed.id).ok()?,
        user_id: user.id().clone(),
        username: user.username().to_string(),
        user_avatar: user.avatar_url().to_owned(),
        video_url: format!("/media/contest/{}.mp4", seed.id),
        thumbnail_url: Some(format!("https://picsum.photos/400/300?random={}", seed.id)),
        category: seed.category,
        votes: seed.votes,
        title: seed.title.to_owned(),
    })
}

/// Build the demo tables. Records that fail validation are skipped with a
/// warning.
pub(super) fn demo_tables(now: DateTime<Utc>) -> Tables {
    let users: Vec<User> = USERS
        .iter()
        .filter_map(|seed| {
            let user = build_user(seed);
            if user.is_none() {
                warn!(user_id = seed.id, "skipping invalid demo user");
            }
            user
        })
        .collect();
    let posts: VecDeque<Post> = POSTS
        .iter()
        .filter_map(|seed| build_post(seed, &users, now))
        .collect();
    let entries: Vec<ContestEntry> = ENTRIES
        .iter()
        .filter_map(|seed| build_entry(seed, &users))
        .collect();
    Tables {
        users,
        posts,
        entries,
        votes: BTreeMap::new(),
    }
}
