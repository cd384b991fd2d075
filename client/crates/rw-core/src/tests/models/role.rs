use crate::{AuthEventKind, CoreError, Role};

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Citizen.as_str(), "citizen");
    assert_eq!(Role::Worker.as_str(), "worker");
    assert_eq!(Role::Admin.as_str(), "admin");
}

#[test]
fn test_role_from_str() {
    for role in Role::ALL {
        assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
    }
    assert!(matches!(
        Role::from_str("Admin"),
        Err(CoreError::InvalidRole { .. })
    ));
    assert!(Role::from_str("superuser").is_err());
}

#[test]
fn test_role_default() {
    assert_eq!(Role::default(), Role::Citizen);
}

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Worker).unwrap(), "\"worker\"");
    let role: Role = serde_json::from_str("\"admin\"").unwrap();
    assert_eq!(role, Role::Admin);
}

#[test]
fn test_auth_event_kind_from_str() {
    assert_eq!(
        AuthEventKind::from_str("token_refreshed").unwrap(),
        AuthEventKind::TokenRefreshed
    );
    assert_eq!(AuthEventKind::SignedOut.to_string(), "signed_out");
    assert!(AuthEventKind::from_str("SIGNED_IN").is_err());
}
