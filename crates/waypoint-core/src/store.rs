//! The `UserStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `waypoint-store-memory`). [`Quest`](crate::Quest) depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::user::{UserId, UserState};

/// Per-user keyed state store.
///
/// Every mutation runs as a closure over one user's record while the backend
/// holds that user's exclusive lock, so two events for the same user never
/// interleave their read-modify-write. Records of different users are
/// independent; no operation locks more than one user.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// A snapshot of one user's state. Returns `None` if never seen.
  fn get(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Option<UserState>, Self::Error>> + Send + '_;

  /// Snapshots of all known users, ordered by user id.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<UserState>, Self::Error>> + Send + '_;

  /// Run `f` on the user's record, creating it at the first task if the user
  /// has never been seen.
  fn upsert_with<F, R>(
    &self,
    user_id: UserId,
    f: F,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_
  where
    F: FnOnce(&mut UserState) -> R + Send + 'static,
    R: Send + 'static;

  /// Run `f` on an existing user's record. Returns `None` without calling `f`
  /// if the user has never been seen.
  fn update_with<F, R>(
    &self,
    user_id: UserId,
    f: F,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_
  where
    F: FnOnce(&mut UserState) -> R + Send + 'static,
    R: Send + 'static;
}
