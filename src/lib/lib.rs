#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Compose, preview and send order mail from templates, and keep a history of what was sent

pub mod domain;
pub mod infrastructure;
