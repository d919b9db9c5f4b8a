//! Text of every message the quest sends.

use crate::{
  geo::Coordinate,
  progress::Stage,
  user::{UserId, UserState},
};

// ─── To participants ─────────────────────────────────────────────────────────

pub const NO_ACCESS: &str = "Sorry, you don't have access to this quest.";
pub const ANSWER_RECEIVED: &str = "Answer received. Please wait for review.";
pub const ANSWER_ACCEPTED: &str = "Your answer was accepted.";
pub const ANSWER_REJECTED: &str = "Your answer was rejected. Try again.";
pub const QUEST_COMPLETED: &str = "You have completed all tasks! Congratulations!";
pub const PHOTO_RECEIVED: &str = "Photo received. Thanks!";
pub const HINT_REQUESTED: &str = "Your hint request was sent to the organizer.";
pub const OUTSIDE_ZONES: &str = "Your location is outside the quest zones.";

pub fn welcome(description: &str) -> String {
  format!("Hi! Your task:\n{description}")
}

pub fn new_task(description: &str) -> String {
  format!("New task:\n{description}")
}

pub fn current_task(description: &str) -> String {
  format!("Your task:\n{description}")
}

pub fn in_zone(zone: &str) -> String {
  format!("You are in the zone: {zone}")
}

pub fn hint(text: &str) -> String {
  format!("Hint: {text}")
}

pub fn live_location_request(enabled: bool) -> &'static str {
  if enabled {
    "The organizer asked you to turn on live location sharing."
  } else {
    "The organizer asked you to turn off live location sharing."
  }
}

// ─── To the moderator ────────────────────────────────────────────────────────

pub const HELP: &str = "\
Commands:
/send_hint <user_id> <text> - send a hint
/start_loc <user_id> - ask to turn on live location
/stop_loc <user_id> - ask to turn off live location
/loc_status <user_id> - show the requested live location state
/progress <user_id> - show quest progress
/help - this message";

pub const UNKNOWN_COMMAND: &str = "Unknown command. Send /help for the list.";

pub fn answer_for_review(user_id: UserId, task: u32, text: &str, superseded: bool) -> String {
  let note = if superseded { " (replaces the previous answer)" } else { "" };
  format!("Answer from user {user_id} for task {task}{note}:\n{text}")
}

pub fn advanced(user_id: UserId, task: u32) -> String {
  format!("Accepted the answer from user {user_id}; they are now on task {task}.")
}

pub fn completed(user_id: UserId) -> String {
  format!("Accepted the answer from user {user_id}; they have completed the quest.")
}

pub fn retry(user_id: UserId, task: u32) -> String {
  format!("Rejected the answer from user {user_id}; task {task} was sent again.")
}

pub fn user_in_zone(user_id: UserId, zone: &str, distance_m: f64) -> String {
  format!("User {user_id} is in zone '{zone}' (distance {distance_m:.0} m)")
}

pub fn user_outside_zones(user_id: UserId, point: Coordinate) -> String {
  format!(
    "User {user_id} is outside all zones ({:.5}, {:.5})",
    point.latitude, point.longitude
  )
}

pub fn hint_request(user_id: UserId) -> String {
  format!("User {user_id} requested a hint.")
}

pub fn photo(user_id: UserId) -> String {
  format!("User {user_id} sent a photo.")
}

pub fn hint_sent(user_id: UserId) -> String {
  format!("Hint sent to {user_id}.")
}

pub fn live_location_requested(user_id: UserId, enabled: bool) -> String {
  let action = if enabled { "on" } else { "off" };
  format!("Asked user {user_id} to turn {action} live location.")
}

pub fn live_location_status(user_id: UserId, enabled: bool) -> String {
  let state = if enabled { "on" } else { "off" };
  format!("Live location for user {user_id}: requested {state}.")
}

pub fn progress(state: &UserState, stage: &Stage) -> String {
  let stage = match stage {
    Stage::Assigned { task } => format!("working on task {task}"),
    Stage::AwaitingReview { task, .. } => format!("answer for task {task} awaiting review"),
    Stage::Completed => "completed the quest".to_string(),
  };
  let live = if state.live_location { "on" } else { "off" };
  format!("User {}: {stage}; live location requested {live}.", state.user_id)
}

pub fn unknown_user(user_id: UserId) -> String {
  format!("User {user_id} has not joined the quest.")
}
