//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

fn joined() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 15).expect("valid date")
}

fn id(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

#[fixture]
fn artist() -> User {
    User::new(
        id("1"),
        Username::new("NeonVibes").expect("username"),
        UserRole::Artist,
        "https://picsum.photos/100/100?random=1",
        joined(),
    )
    .with_counts(1240, 5)
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("   ", UserValidationError::EmptyUsername)]
#[case("bad\u{7}bell", UserValidationError::UsernameInvalidCharacters)]
#[case("zero\u{200b}width", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
#[case("Zoë")]
#[case("Björk Guðmundsdóttir")]
#[case("坂本龍一")]
#[case("DJ <Neon> & the $ynth Collective featuring Everyone On Stage")]
fn username_accepts_any_printable_name(#[case] raw: &str) {
    let name = Username::new(raw).expect("printable names are valid");
    assert_eq!(name.as_ref(), raw);
}

#[test]
fn non_ascii_names_still_match_case_insensitively() {
    let stored = Username::new("Zoë").expect("username");
    assert!(stored.matches(&Username::new("ZOË").expect("username")));
}

#[rstest]
#[case("neonvibes")]
#[case("NEONVIBES")]
#[case("NeonVibes")]
fn username_matches_case_insensitively(#[case] raw: &str) {
    let stored = Username::new("NeonVibes").expect("username");
    assert!(stored.matches(&Username::new(raw).expect("username")));
}

#[rstest]
fn adding_a_fanned_artist_is_idempotent(artist: User) {
    let mut fan = artist;
    let target = id("2");
    assert!(fan.add_fanned_artist(target.clone()));
    assert!(!fan.add_fanned_artist(target.clone()));
    assert!(fan.is_fan_of(&target));
    assert_eq!(fan.following_count(), 6);
}

#[rstest]
fn removing_an_absent_artist_is_a_no_op(artist: User) {
    let mut fan = artist;
    assert!(!fan.remove_fanned_artist(&id("2")));
    assert_eq!(fan.following_count(), 5);
}

#[rstest]
fn users_cannot_fan_themselves(artist: User) {
    let mut fan = artist;
    assert!(!fan.add_fanned_artist(id("1")));
    assert!(fan.fanned_artist_ids().is_empty());
}

#[rstest]
fn fan_count_never_goes_negative(artist: User) {
    let mut user = artist.with_counts(0, 0);
    assert_eq!(user.lose_fan(), 0);
    assert_eq!(user.gain_fan(), 1);
}

#[rstest]
fn apply_update_replaces_fields_and_clears_blank_bio(artist: User) {
    let mut user = artist.with_bio("Digital artist");
    user.apply_update(UserProfileUpdate {
        username: Some(Username::new("NeonWaves").expect("username")),
        avatar_url: Some(" https://picsum.photos/200/200?random=7 ".to_owned()),
        bio: Some("  ".to_owned()),
    })
    .expect("valid update");

    assert_eq!(user.username().as_ref(), "NeonWaves");
    assert_eq!(user.avatar_url(), "https://picsum.photos/200/200?random=7");
    assert!(user.bio().is_none());
}

#[rstest]
fn apply_update_rejects_blank_avatar(artist: User) {
    let mut user = artist;
    let result = user.apply_update(UserProfileUpdate {
        avatar_url: Some(String::new()),
        ..UserProfileUpdate::default()
    });
    assert_eq!(result, Err(UserValidationError::EmptyAvatarUrl));
    assert_eq!(user.avatar_url(), "https://picsum.photos/100/100?random=1");
}

#[rstest]
fn serialises_with_camel_case_fields(artist: User) {
    let user = artist.with_fanned_artists([id("2")]);
    let value = serde_json::to_value(&user).expect("serialise");
    assert_eq!(value["fanCount"], json!(1240));
    assert_eq!(value["role"], json!("ARTIST"));
    assert_eq!(value["fannedArtistIds"], json!(["2"]));
    assert_eq!(value["joinedDate"], json!("2023-01-15"));
    assert!(value.get("bio").is_none());
}

#[test]
fn role_parses_wire_names() {
    assert_eq!("FAN".parse::<UserRole>(), Ok(UserRole::Fan));
    assert!("fan".parse::<UserRole>().is_err());
}
