use crate::{CoreError, Credentials, Role, SignUpRequest};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};

#[test]
fn given_valid_credentials_when_validate_then_ok() {
    let credentials = Credentials::new("a@example.com", "hunter2");
    assert_that!(credentials.validate(), ok(anything()));
}

#[test]
fn given_blank_email_when_validate_then_email_error() {
    let result = Credentials::new("   ", "hunter2").validate();
    assert_that!(result, err(anything()));
    assert_eq!(result.unwrap_err().field(), Some("email"));
}

#[test]
fn given_email_without_at_when_validate_then_error() {
    let result = Credentials::new("not-an-email", "hunter2").validate();
    assert!(matches!(
        result,
        Err(CoreError::Validation { field: "email", .. })
    ));
}

#[test]
fn given_empty_password_when_validate_then_password_error() {
    let result = Credentials::new("a@example.com", "").validate();
    assert_eq!(result.unwrap_err().field(), Some("password"));
}

#[test]
fn given_credentials_when_debug_formatted_then_password_hidden() {
    let debug = format!("{:?}", Credentials::new("a@example.com", "hunter2"));
    assert!(!debug.contains("hunter2"));
}

#[test]
fn given_sign_up_without_name_when_validate_then_name_error() {
    let request = SignUpRequest::new("a@example.com", "pw", "  ", Role::Citizen);
    assert_eq!(request.validate().unwrap_err().field(), Some("name"));
}

#[test]
fn given_sign_up_request_when_credentials_then_same_email_and_password() {
    let request = SignUpRequest::new("a@example.com", "pw", "Asha", Role::Worker);
    let credentials = request.credentials();
    assert_eq!(credentials.email, "a@example.com");
    assert_eq!(credentials.password, "pw");
    assert_that!(request.validate(), ok(anything()));
}
