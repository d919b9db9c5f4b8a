//! Authorization predicate injected into [`Quest`](crate::Quest).
//!
//! Who may play and who moderates is decided outside the core; the quest only
//! asks.

use crate::user::UserId;

pub trait Access: Send + Sync {
  /// Whether `user_id` is the quest moderator.
  fn is_moderator(&self, user_id: UserId) -> bool;

  /// Whether `user_id` may take part in the quest.
  fn is_participant(&self, user_id: UserId) -> bool;
}
