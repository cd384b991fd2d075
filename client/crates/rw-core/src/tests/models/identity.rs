use crate::{Identity, Metadata, Profile, Role};

use googletest::assert_that;
use googletest::prelude::eq;
use serde_json::json;

fn identity_with(name: &str, role: &str) -> Identity {
    let mut metadata = Metadata::new();
    metadata.insert("name", name);
    metadata.insert("role", role);
    metadata.insert("avatar_url", "https://cdn.example/a.png");
    Identity::new("user-1", "a@example.com", metadata)
}

#[test]
fn given_metadata_with_name_and_role_when_read_then_typed_accessors_work() {
    let identity = identity_with("Asha", "worker");

    assert_eq!(identity.name(), Some("Asha"));
    assert_eq!(identity.role(), Some(Role::Worker));
    assert!(identity.has_role(Role::Worker));
    assert!(!identity.has_role(Role::Admin));
}

#[test]
fn given_unknown_role_tag_when_read_then_role_is_none() {
    let identity = identity_with("Asha", "mayor");

    assert_eq!(identity.role(), None);
    assert_eq!(identity.metadata.role_str(), Some("mayor"));
}

#[test]
fn given_matching_profile_when_compared_then_matches() {
    let identity = identity_with("A", "citizen");

    assert!(identity.matches_profile(&Profile::new("A", Role::Citizen)));
    assert!(!identity.matches_profile(&Profile::new("A", Role::Worker)));
    assert!(!identity.matches_profile(&Profile::new("B", Role::Citizen)));
}

#[test]
fn given_profile_when_merged_then_other_keys_preserved() {
    let identity = identity_with("A", "citizen");

    let merged = identity.with_profile(&Profile::new("B", Role::Worker));

    assert_eq!(merged.id, "user-1");
    assert_eq!(merged.name(), Some("B"));
    assert_eq!(merged.role(), Some(Role::Worker));
    assert_eq!(
        merged.metadata.get("avatar_url"),
        Some(&json!("https://cdn.example/a.png"))
    );
    assert_that!(merged.metadata.len(), eq(3));
    // original untouched
    assert_eq!(identity.name(), Some("A"));
}

#[test]
fn given_empty_metadata_when_merged_then_name_and_role_added() {
    let identity = Identity::new("user-2", "b@example.com", Metadata::new());

    let merged = identity.with_profile(&Profile::new("Bo", Role::Admin));

    assert_that!(merged.metadata.len(), eq(2));
    assert!(merged.has_role(Role::Admin));
}

#[test]
fn given_identity_json_without_metadata_when_deserialized_then_empty_metadata() {
    let identity: Identity = serde_json::from_value(json!({ "id": "u-9" })).unwrap();

    assert!(identity.metadata.is_empty());
    assert!(identity.email.is_empty());
}
