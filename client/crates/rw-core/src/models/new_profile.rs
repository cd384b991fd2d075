use crate::{Identity, Role, SignUpRequest};

use serde::{Deserialize, Serialize};

/// Profile row written once at registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl NewProfile {
    pub fn from_sign_up(identity: &Identity, request: &SignUpRequest) -> Self {
        Self {
            id: identity.id.clone(),
            email: request.email.trim().to_string(),
            name: request.name.trim().to_string(),
            role: request.role,
        }
    }
}
