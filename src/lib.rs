//! Image hosting API: accepts image uploads, stores them as flat files in one
//! directory, lists and deletes them, and serves them back under `/uploads`.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod services;

pub use adapters::{router::create_router, state::AppState};
