//! Error types for `waypoint-core`.

use thiserror::Error;

use crate::user::UserId;

#[derive(Debug, Error)]
pub enum Error {
  /// A decision or command referenced a user that never joined the quest.
  #[error("unknown user: {0}")]
  UnknownUser(UserId),

  /// The decision refers to an answer that was superseded or already decided.
  #[error("stale decision for user {0}")]
  StaleDecision(UserId),

  /// Malformed moderator command. The message is shown to the moderator as-is.
  #[error("{0}")]
  InvalidCommandArgs(String),

  /// Internal guard: a task lookup past the end of the catalog.
  #[error("task index {0} is past the end of the catalog")]
  TaskIndexExhausted(u32),

  #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
  InvalidCoordinate { latitude: f64, longitude: f64 },

  #[error("invalid zone {name:?}: {reason}")]
  InvalidZone { name: String, reason: String },

  #[error("the task catalog must contain at least one task")]
  EmptyCatalog,

  #[error("invalid decision token: {0:?}")]
  InvalidToken(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error from a [`UserStore`](crate::store::UserStore).
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
