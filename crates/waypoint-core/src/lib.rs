//! Core types and decision logic for the Waypoint location quest.
//!
//! This crate is deliberately free of HTTP and storage dependencies. The chat
//! transport, the allow-list and the user store are all injected; everything
//! here is the quest itself: task progression, geofencing and the moderation
//! protocol.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod access;
pub mod command;
pub mod decision;
pub mod error;
pub mod event;
pub mod geo;
pub mod messages;
pub mod notify;
pub mod progress;
pub mod quest;
pub mod store;
pub mod task;
pub mod user;

pub use error::{Error, Result};
pub use quest::Quest;
