//! HTTP surface: router, handlers, and shared application state

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

pub use handlers::options::QuoteOptionsResponse;
pub use router::create_router;
pub use state::AppState;
