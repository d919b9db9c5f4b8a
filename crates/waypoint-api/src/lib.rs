//! Read-only JSON API over a running quest.
//!
//! Exposes an axum [`Router`] backed by any [`waypoint_core::Quest`], for
//! organizers who want to watch progress outside the chat. Auth, TLS, and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", waypoint_api::api_router(quest.clone()))
//! ```

pub mod catalog;
pub mod error;
pub mod users;

use axum::{Router, routing::get};
use waypoint_core::{Quest, store::UserStore};

pub use error::ApiError;

/// Build the API router for `quest`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(quest: Quest<S>) -> Router<()>
where
  S: UserStore + 'static,
{
  Router::new()
    // Participants
    .route("/users", get(users::list::<S>))
    .route("/users/{id}", get(users::get_one::<S>))
    // Catalog
    .route("/tasks", get(catalog::tasks::<S>))
    .route("/zones", get(catalog::zones::<S>))
    .with_state(quest)
}
