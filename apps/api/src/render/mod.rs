// Output back-ends.
// pdf: serializes the paginated page model through printpdf.
// flow: Word-compatible HTML built from the shared document model.

pub mod flow;
pub mod pdf;
pub mod templates;

pub use flow::{export_flow_document, export_flow_document_with_font};
pub use pdf::export_pdf;
