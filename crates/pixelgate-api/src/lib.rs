//! Pixelgate HTTP API
//!
//! Thin HTTP front for the operation registry: `POST /{operation}` takes the
//! image as the raw request body and options in the query string.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use routes::setup_routes;
pub use state::AppState;
