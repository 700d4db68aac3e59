//! Core server components

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{setup_environment, Config, ImportPolicy};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
