
use rw_core::{Identity, Metadata};

pub(crate) fn identity(id: &str, name: &str, role: &str) -> Identity {
    let mut metadata = Metadata::new();
    metadata.insert("name", name);
    metadata.insert("role", role);
    Identity::new(id, format!("{id}@example.com"), metadata)
}
