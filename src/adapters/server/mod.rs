//! Server Adapter
//!
//! HTTP request/response boundary between the adapters and the dashboard UI.

mod routes;

pub use routes::{router, DashboardServer};
