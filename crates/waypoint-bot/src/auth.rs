//! Who may talk to the quest, and who may talk to the server.
//!
//! [`AllowList`] is the static participant/moderator roster injected into the
//! quest. [`WebhookSecret`] guards the HTTP endpoint the chat transport posts
//! events to.

use std::collections::HashSet;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use sha2::{Digest, Sha256};
use waypoint_core::{access::Access, store::UserStore, user::UserId};

use crate::{AppState, error::Error};

/// Header carrying the shared webhook secret.
pub const SECRET_HEADER: &str = "x-waypoint-secret";

// ─── Allow-list ──────────────────────────────────────────────────────────────

/// A fixed roster: one moderator plus the users allowed to play.
#[derive(Debug, Clone)]
pub struct AllowList {
  moderator:    UserId,
  participants: HashSet<UserId>,
}

impl AllowList {
  pub fn new(moderator: UserId, participants: impl IntoIterator<Item = UserId>) -> Self {
    Self { moderator, participants: participants.into_iter().collect() }
  }
}

impl Access for AllowList {
  fn is_moderator(&self, user_id: UserId) -> bool { user_id == self.moderator }

  fn is_participant(&self, user_id: UserId) -> bool { self.participants.contains(&user_id) }
}

// ─── Webhook secret ──────────────────────────────────────────────────────────

/// Shared secret the transport adapter presents with every event.
///
/// Only the SHA-256 digest is kept; presented values are hashed before
/// comparison so the comparison time does not depend on a common prefix.
#[derive(Clone)]
pub struct WebhookSecret {
  digest: [u8; 32],
}

impl WebhookSecret {
  pub fn new(secret: &str) -> Self {
    Self { digest: Sha256::digest(secret.as_bytes()).into() }
  }

  pub fn matches(&self, presented: &str) -> bool {
    let digest: [u8; 32] = Sha256::digest(presented.as_bytes()).into();
    digest == self.digest
  }
}

/// Zero-size marker: present in the handler means the request carried the
/// webhook secret (or none is configured).
pub struct Verified;

/// Check the secret header against the configured secret, if any.
pub fn verify_secret(headers: &HeaderMap, secret: Option<&WebhookSecret>) -> Result<(), Error> {
  let Some(secret) = secret else {
    return Ok(());
  };
  let presented = headers
    .get(SECRET_HEADER)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;
  if !secret.matches(presented) {
    return Err(Error::Unauthorized);
  }
  Ok(())
}

impl<S> FromRequestParts<AppState<S>> for Verified
where
  S: UserStore + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    verify_secret(&parts.headers, state.secret.as_deref()).inspect_err(|_| {
      tracing::warn!(uri = %parts.uri, "rejected event without a valid webhook secret");
    })?;
    Ok(Verified)
  }
}
