use crate::{METADATA_NAME_KEY, METADATA_ROLE_KEY, Profile, Role};

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open key/value metadata attached to an identity.
///
/// `name` and `role` have typed accessors; every other key is carried through
/// untouched so fields added by the auth provider survive round trips.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Display name, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.get(METADATA_NAME_KEY).and_then(Value::as_str)
    }

    /// Raw role tag, if present and a string
    pub fn role_str(&self) -> Option<&str> {
        self.get(METADATA_ROLE_KEY).and_then(Value::as_str)
    }

    /// Parsed role. Unknown tags read as `None`.
    pub fn role(&self) -> Option<Role> {
        self.role_str().and_then(|s| Role::from_str(s).ok())
    }

    /// True when both `name` and `role` already equal the profile's values
    pub fn matches_profile(&self, profile: &Profile) -> bool {
        self.name() == Some(profile.name.as_str()) && self.role_str() == Some(profile.role.as_str())
    }

    /// Copy with `name` and `role` overwritten from the profile; other keys kept.
    pub fn with_profile(&self, profile: &Profile) -> Self {
        let mut merged = self.clone();
        merged.insert(METADATA_NAME_KEY, profile.name.clone());
        merged.insert(METADATA_ROLE_KEY, profile.role.as_str());
        merged
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Metadata> for Value {
    fn from(metadata: Metadata) -> Self {
        Value::Object(metadata.0)
    }
}

impl FromIterator<(String, Value)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
