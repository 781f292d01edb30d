//! Tests for the account holder model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn ada() -> User {
    User::try_from_strings(VALID_ID, "Ada Lovelace", "ada@example.com").expect("valid user")
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn rejects_bad_user_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn from_uuid_matches_textual_form() {
    let id = UserId::random();
    let again = UserId::from_uuid(*id.as_uuid());
    assert_eq!(id, again);
    assert_eq!(again.as_ref(), id.as_uuid().to_string());
}

#[rstest]
fn rejects_blank_names() {
    assert_eq!(
        UserName::new("   ").expect_err("blank name"),
        UserValidationError::EmptyName
    );
}

#[rstest]
fn rejects_overlong_names() {
    let raw = "x".repeat(USER_NAME_MAX + 1);
    assert_eq!(
        UserName::new(raw).expect_err("long name"),
        UserValidationError::NameTooLong {
            max: USER_NAME_MAX
        }
    );
    assert!(UserName::new("x".repeat(USER_NAME_MAX)).is_ok());
}

#[rstest]
fn trims_names() {
    let name = UserName::new("  Grace Hopper ").expect("valid name");
    assert_eq!(name.as_ref(), "Grace Hopper");
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("nobody", UserValidationError::InvalidEmail)]
#[case("a@b", UserValidationError::InvalidEmail)]
#[case("a b@example.com", UserValidationError::InvalidEmail)]
fn rejects_bad_emails(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw).expect_err("invalid email"), expected);
}

#[rstest]
fn normalises_email_case_and_whitespace() {
    let email = EmailAddress::new("  Ada@Example.COM\t").expect("valid email");
    assert_eq!(email.as_ref(), "ada@example.com");
}

#[rstest]
fn serialises_without_password_material(ada: User) {
    let value = serde_json::to_value(&ada).expect("serialise user");
    assert_eq!(
        value,
        json!({ "id": VALID_ID, "name": "Ada Lovelace", "email": "ada@example.com" })
    );
}

#[rstest]
fn deserialising_validates_fields() {
    let bad = json!({ "id": VALID_ID, "name": "Ada", "email": "nope" });
    assert!(serde_json::from_value::<User>(bad).is_err());

    let extra = json!({ "id": VALID_ID, "name": "Ada", "email": "a@b.io", "password": "x" });
    assert!(serde_json::from_value::<User>(extra).is_err());
}
