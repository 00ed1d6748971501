// Paginated layout engine.
// Config → measurement → cursor → block renderers → assembler. Everything here
// is synchronous and CPU-bound; the host runs it inside spawn_blocking.

pub mod assembler;
pub mod blocks;
pub mod config;
pub mod cursor;
pub mod font_metrics;
pub mod wrap;

pub use assembler::{export_paginated_document, LayoutReport};
