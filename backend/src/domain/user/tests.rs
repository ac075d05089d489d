//! Tests for the domain user model.

use super::*;
use rstest::rstest;
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn user_id_round_trips_uuid() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(UserId::from_uuid(*id.as_uuid()), id);
    assert_eq!(id.to_string(), VALID_ID);
}

#[rstest]
#[case("user@example.com", "user@example.com")]
#[case("  Test@EXAMPLE.com ", "Test@example.com")]
#[case("first.last+tag@Sub.Example.org", "first.last+tag@sub.example.org")]
fn email_normalises_domain(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(Email::new(raw).expect("valid email").as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("no-at-sign", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("user@", UserValidationError::InvalidEmail)]
#[case("a@b@c", UserValidationError::InvalidEmail)]
#[case("user name@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Email::new(raw).expect_err("invalid email"), expected);
}

#[rstest]
fn email_rejects_overlong_input() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    assert_eq!(
        Email::new(raw).expect_err("too long"),
        UserValidationError::EmailTooLong { max: EMAIL_MAX }
    );
}

#[rstest]
#[case("", UserValidationError::EmptyDisplayName)]
#[case("   ", UserValidationError::EmptyDisplayName)]
fn display_name_rejects_blank(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(DisplayName::new(raw).expect_err("blank name"), expected);
}

#[rstest]
fn display_name_trims_and_limits_length() {
    assert_eq!(
        DisplayName::new("  Test Name ").expect("valid").as_ref(),
        "Test Name"
    );
    assert_eq!(
        DisplayName::new("a".repeat(DISPLAY_NAME_MAX + 1)).expect_err("too long"),
        UserValidationError::DisplayNameTooLong {
            max: DISPLAY_NAME_MAX
        }
    );
}

#[rstest]
fn user_serialises_public_fields_only() {
    let user = User::try_from_strings(VALID_ID, "test@example.com", "Test Name").expect("user");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({ "id": VALID_ID, "email": "test@example.com", "name": "Test Name" })
    );
}

#[rstest]
fn user_deserialisation_validates_fields() {
    let payload = json!({ "id": VALID_ID, "email": "broken", "name": "Test" });
    assert!(serde_json::from_value::<User>(payload).is_err());
}
