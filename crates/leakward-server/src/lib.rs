//! Leakward HTTP API
//!
//! Exposes local and GitHub deployment of the GitLeaks configuration, plus
//! bundle downloads, over a JSON API under `/api`.

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use server::Server;
pub use state::AppState;
