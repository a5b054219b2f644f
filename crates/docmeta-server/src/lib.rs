//! DocMeta server — HTTP upload API and one-shot CLI extraction.

pub mod cli;
pub mod error;
pub mod routes;
pub mod state;

pub use state::AppState;
