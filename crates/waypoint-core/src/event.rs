//! Inbound events and participant submissions.

use serde::{Deserialize, Serialize};

use crate::{geo::Coordinate, notify::ModeratorAction, user::UserId};

/// An event delivered by the chat transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
  Text {
    from: UserId,
    text: String,
  },
  Photo {
    from: UserId,
  },
  Location {
    from:      UserId,
    latitude:  f64,
    longitude: f64,
  },
  /// The moderator pressed a button attached to an earlier notification.
  Action {
    from:   UserId,
    action: ModeratorAction,
  },
}

impl InboundEvent {
  pub fn sender(&self) -> UserId {
    match self {
      Self::Text { from, .. }
      | Self::Photo { from }
      | Self::Location { from, .. }
      | Self::Action { from, .. } => *from,
    }
  }
}

/// Something a participant sent in that the moderator should hear about.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
  Text { user_id: UserId, text: String },
  Photo { user_id: UserId },
  Location { user_id: UserId, point: Coordinate },
  HintRequest { user_id: UserId },
}

impl Submission {
  pub fn user_id(&self) -> UserId {
    match self {
      Self::Text { user_id, .. }
      | Self::Photo { user_id }
      | Self::Location { user_id, .. }
      | Self::HintRequest { user_id } => *user_id,
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Self::Text { .. } => "text",
      Self::Photo { .. } => "photo",
      Self::Location { .. } => "location",
      Self::HintRequest { .. } => "hint_request",
    }
  }
}
