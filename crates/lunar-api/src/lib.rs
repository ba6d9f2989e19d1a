//! lunar-api library target.
//!
//! Exposes the router so `tests/` can drive it without binding a socket.
//! The binary `main.rs` depends on this library target.

pub mod errors;
pub mod routes;
