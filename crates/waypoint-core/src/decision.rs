//! Moderator decisions and the tokens that carry them.
//!
//! A [`DecisionToken`] is minted when an answer is forwarded for review and
//! travels with the moderator notification until the moderator acts on it.
//! The `version` ties it to exactly one submitted answer, so a decision on a
//! superseded answer can be recognised by a plain comparison.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, user::UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
  Accept,
  Reject,
}

impl DecisionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Accept => "accept",
      Self::Reject => "reject",
    }
  }
}

impl fmt::Display for DecisionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Binds a moderator action to one user and one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionToken {
  pub user_id: UserId,
  pub kind:    DecisionKind,
  /// The `answer_version` of the answer under review.
  pub version: u64,
}

impl DecisionToken {
  /// The accept/reject pair offered for one answer.
  pub fn pair(user_id: UserId, version: u64) -> [Self; 2] {
    [
      Self { user_id, kind: DecisionKind::Accept, version },
      Self { user_id, kind: DecisionKind::Reject, version },
    ]
  }
}

/// Compact form `<kind>:<user_id>:<version>`, short enough for chat
/// callback payloads.
impl fmt::Display for DecisionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}:{}", self.kind, self.user_id, self.version)
  }
}

impl FromStr for DecisionToken {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || Error::InvalidToken(s.to_string());

    let mut parts = s.split(':');
    let (Some(kind), Some(user_id), Some(version), None) =
      (parts.next(), parts.next(), parts.next(), parts.next())
    else {
      return Err(invalid());
    };

    let kind = match kind {
      "accept" => DecisionKind::Accept,
      "reject" => DecisionKind::Reject,
      _ => return Err(invalid()),
    };
    Ok(Self {
      user_id: user_id.parse().map_err(|_| invalid())?,
      kind,
      version: version.parse().map_err(|_| invalid())?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn compact_form() {
    let [accept, reject] = DecisionToken::pair(42, 7);
    assert_eq!(accept.to_string(), "accept:42:7");
    assert_eq!(reject.to_string(), "reject:42:7");
    assert_eq!("reject:42:7".parse::<DecisionToken>().unwrap(), reject);
  }

  #[test]
  fn negative_user_ids_parse() {
    // Group chats on some transports use negative identifiers.
    let token: DecisionToken = "accept:-100123:1".parse().unwrap();
    assert_eq!(token.user_id, -100123);
  }

  #[test]
  fn malformed_tokens_are_rejected() {
    for raw in ["", "accept", "accept:1", "accept:1:2:3", "approve:1:2", "accept:x:2", "accept:1:-2"] {
      assert!(
        matches!(raw.parse::<DecisionToken>(), Err(Error::InvalidToken(_))),
        "accepted {raw:?}"
      );
    }
  }

  #[test]
  fn json_shape() {
    let token = DecisionToken { user_id: 5, kind: DecisionKind::Accept, version: 2 };
    let json = serde_json::to_value(token).unwrap();
    assert_eq!(json, serde_json::json!({ "user_id": 5, "kind": "accept", "version": 2 }));
  }
}
