// Shared document model.
// Both back-ends (paginated PDF and flow markup) consume the same ordered list
// of normalized sections, so presence rules and ordering live in one place.

pub mod filename;
pub mod sections;

pub use filename::{derive_file_name, FileFormat};
pub use sections::DocumentModel;
