//! REST API surface

mod handlers;
mod router;
pub mod state;

pub use router::create_router;
