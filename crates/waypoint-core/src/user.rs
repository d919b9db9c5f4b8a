//! Per-participant quest state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque chat-transport identifier of a participant.
pub type UserId = i64;

/// Everything the quest remembers about one participant.
///
/// Created on first authorized contact and kept for the lifetime of the
/// process. Whether an answer is awaiting review is tracked through
/// `pending_review`: it holds the `answer_version` a decision must carry to
/// be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
  pub user_id:        UserId,
  /// 1-based index into the task catalog; `len + 1` once completed.
  pub current_task:   u32,
  pub last_answer:    Option<String>,
  /// Requested live-location broadcast state. Only moderator toggles set it.
  pub live_location:  bool,
  /// Number of text answers submitted so far.
  pub answer_version: u64,
  pub pending_review: Option<u64>,
  pub first_seen_at:  DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl UserState {
  /// A freshly joined participant, assigned to the first task.
  pub fn new(user_id: UserId) -> Self {
    let now = Utc::now();
    Self {
      user_id,
      current_task: 1,
      last_answer: None,
      live_location: false,
      answer_version: 0,
      pending_review: None,
      first_seen_at: now,
      updated_at: now,
    }
  }

  pub fn is_awaiting_review(&self) -> bool { self.pending_review.is_some() }

  pub fn touch(&mut self) { self.updated_at = Utc::now(); }
}
