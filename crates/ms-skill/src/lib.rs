//! Meraki voice skill: library crate for the intent-handling server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `ms-e2e-tests`) can reach `IntentRouter`, `build_router`, and the
//! handlers.

pub mod config;
pub mod error;
pub mod handlers;
pub mod intents;
pub mod lifecycle;
pub mod router;
pub mod routes;
pub mod state;
