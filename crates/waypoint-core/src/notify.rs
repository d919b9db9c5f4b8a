//! Outbound notification requests.
//!
//! The core never formats presentation. It states who should be told what,
//! and which moderator actions (buttons, in most chat transports) should be
//! offered alongside the text.

use serde::{Deserialize, Serialize};

use crate::{decision::DecisionToken, user::UserId};

/// An action the moderator can trigger from a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModeratorAction {
  /// Accept or reject a reviewed answer.
  Decide { token: DecisionToken },
  /// Ask a participant to start or stop broadcasting live location.
  LiveLocation { user_id: UserId, enabled: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "to", rename_all = "snake_case")]
pub enum Notification {
  User {
    user_id: UserId,
    text:    String,
  },
  Moderator {
    text:    String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    actions: Vec<ModeratorAction>,
  },
}

impl Notification {
  pub fn user(user_id: UserId, text: impl Into<String>) -> Self {
    Self::User { user_id, text: text.into() }
  }

  pub fn moderator(text: impl Into<String>) -> Self {
    Self::Moderator { text: text.into(), actions: Vec::new() }
  }

  pub fn moderator_with(
    text: impl Into<String>,
    actions: impl IntoIterator<Item = ModeratorAction>,
  ) -> Self {
    Self::Moderator { text: text.into(), actions: actions.into_iter().collect() }
  }

  pub fn text(&self) -> &str {
    match self {
      Self::User { text, .. } | Self::Moderator { text, .. } => text,
    }
  }

  /// The addressed participant, or `None` for moderator notifications.
  pub fn user_id(&self) -> Option<UserId> {
    match self {
      Self::User { user_id, .. } => Some(*user_id),
      Self::Moderator { .. } => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn wire_shape() {
    let [accept, _] = DecisionToken::pair(9, 1);
    let out = vec![
      Notification::user(9, "hi"),
      Notification::moderator("plain"),
      Notification::moderator_with("review", [ModeratorAction::Decide { token: accept }]),
    ];
    assert_eq!(
      serde_json::to_value(&out).unwrap(),
      json!([
        { "to": "user", "user_id": 9, "text": "hi" },
        { "to": "moderator", "text": "plain" },
        {
          "to": "moderator",
          "text": "review",
          "actions": [{
            "type": "decide",
            "token": { "user_id": 9, "kind": "accept", "version": 1 }
          }]
        }
      ])
    );
  }
}
