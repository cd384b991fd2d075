pub mod error;
pub mod models;

pub use error::{CoreError, Result as CoreResult};
pub use models::access::Access;
pub use models::auth_event_kind::AuthEventKind;
pub use models::credentials::Credentials;
pub use models::identity::Identity;
pub use models::metadata::Metadata;
pub use models::new_profile::NewProfile;
pub use models::profile::Profile;
pub use models::role::Role;
pub use models::session::Session;
pub use models::sign_up_request::SignUpRequest;


/// Metadata key holding the display name
pub const METADATA_NAME_KEY: &str = "name";
/// Metadata key holding the role tag
pub const METADATA_ROLE_KEY: &str = "role";
