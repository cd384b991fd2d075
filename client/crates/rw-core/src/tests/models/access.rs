use crate::{Access, Identity, Metadata, Role};

fn identity(role: Option<&str>) -> Identity {
    let mut metadata = Metadata::new();
    if let Some(role) = role {
        metadata.insert("role", role);
    }
    Identity::new("user-1", "a@example.com", metadata)
}

#[test]
fn test_access_pending_while_loading() {
    let admin = identity(Some("admin"));
    assert_eq!(
        Access::evaluate(true, Some(&admin), Some(Role::Admin)),
        Access::Pending
    );
    assert_eq!(Access::evaluate(true, None, None), Access::Pending);
}

#[test]
fn test_access_unauthenticated_without_identity() {
    assert_eq!(
        Access::evaluate(false, None, Some(Role::Worker)),
        Access::Unauthenticated
    );
    assert_eq!(Access::evaluate(false, None, None), Access::Unauthenticated);
}

#[test]
fn test_access_granted_without_required_role() {
    let citizen = identity(Some("citizen"));
    assert!(Access::evaluate(false, Some(&citizen), None).is_granted());
}

#[test]
fn test_access_role_comparison_is_exact() {
    let admin = identity(Some("admin"));
    assert_eq!(
        Access::evaluate(false, Some(&admin), Some(Role::Worker)),
        Access::Forbidden {
            required: Role::Worker,
            actual: Some(Role::Admin),
        }
    );
    assert!(Access::evaluate(false, Some(&admin), Some(Role::Admin)).is_granted());
}

#[test]
fn test_access_forbidden_when_role_missing() {
    let anonymous_role = identity(None);
    assert_eq!(
        Access::evaluate(false, Some(&anonymous_role), Some(Role::Citizen)),
        Access::Forbidden {
            required: Role::Citizen,
            actual: None,
        }
    );
}
