pub mod container;
pub mod controller;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod router;
pub mod server;

pub use container::Container;
pub use error::ApiError;
pub use rate_limit::{RateLimit, RateLimiter};
pub use router::build_router;
pub use server::{serve, shutdown_signal};
