// Export API: HTTP surface over the layout engine and the two back-ends.
// Handlers validate, run the CPU-bound work on the blocking pool, then hand the
// bytes to delivery, which picks the download headers for the client.

pub mod delivery;
pub mod handlers;
