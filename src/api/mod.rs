//! HTTP surface of the booking service.
//!
//! Exposes availability and booking logic as HTTP endpoints for the
//! booking form and the admin panel. Admin routes are protected by a
//! middleware stack: Auth → Audit → Handler.
//!
//! The router is composable: `booking_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::booking_router;
pub use server::{start_server, BookingServer};
pub use types::ApiContext;
