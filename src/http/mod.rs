//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, body limit, JSON extraction)
//!     → RelayHandler (spawned, runs to completion)
//!     → response.rs (RelayOutcome → status + JSON body)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use server::{build_router, AppState, HttpServer};
