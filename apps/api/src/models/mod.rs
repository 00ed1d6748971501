pub mod export;
pub mod resume;

pub use export::{ExportOptions, Template};
pub use resume::{ResumeData, UserType};
