//! Move advisors for the pigpen board engine
//!
//! Implementations of [`pigpen_board::Advisor`] plus the HTTP surface they
//! share.
//!
//! # Architecture
//!
//! - **Lookahead**: local two-ply search over candidate blocks
//! - **HTTP client**: asks a remote `/api/move` endpoint
//! - **Server**: exposes any advisor as `/api/move` with `axum`
//! - **Wire**: the JSON bodies both sides agree on

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod http;
mod lookahead;
mod server;
mod wire;

// Crate-level exports - Advisors
pub use http::HttpAdvisor;
pub use lookahead::LookaheadAdvisor;

// Crate-level exports - Server
pub use server::{Health, SharedAdvisor, advisory_router, serve};

// Crate-level exports - Wire format
pub use wire::{MoveRequest, MoveResponse, NO_VALID_MOVES, WireCell};
