//! Handlers for the fixed quest content.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/tasks` | Tasks in quest order |
//! | `GET`  | `/zones` | Zones in evaluation order |

use axum::{Json, extract::State};
use waypoint_core::{Quest, geo::Zone, store::UserStore, task::Task};

/// `GET /tasks`
pub async fn tasks<S: UserStore>(State(quest): State<Quest<S>>) -> Json<Vec<Task>> {
  Json(quest.catalog().tasks().to_vec())
}

/// `GET /zones`
pub async fn zones<S: UserStore>(State(quest): State<Quest<S>>) -> Json<Vec<Zone>> {
  Json(quest.zones().to_vec())
}
