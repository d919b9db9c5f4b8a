//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/users` | Optional `?stage=assigned\|awaiting_review\|completed` |
//! | `GET`  | `/users/:id` | 404 if the user never joined |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use waypoint_core::{
  Quest,
  progress::{self, Stage},
  store::UserStore,
  user::{UserId, UserState},
};

use crate::error::ApiError;

/// A participant's stored state together with its derived stage.
#[derive(Debug, Serialize)]
pub struct UserView {
  #[serde(flatten)]
  pub state: UserState,
  pub stage: Stage,
}

fn view<S: UserStore>(quest: &Quest<S>, state: UserState) -> UserView {
  let stage = progress::stage(&state, quest.catalog());
  UserView { state, stage }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageFilter {
  Assigned,
  AwaitingReview,
  Completed,
}

impl StageFilter {
  fn matches(self, stage: &Stage) -> bool {
    matches!(
      (self, stage),
      (Self::Assigned, Stage::Assigned { .. })
        | (Self::AwaitingReview, Stage::AwaitingReview { .. })
        | (Self::Completed, Stage::Completed)
    )
  }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub stage: Option<StageFilter>,
}

/// `GET /users[?stage=<stage>]`
pub async fn list<S: UserStore>(
  State(quest): State<Quest<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<UserView>>, ApiError> {
  let users = quest
    .store()
    .list()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let views = users
    .into_iter()
    .map(|state| view(&quest, state))
    .filter(|v| params.stage.is_none_or(|filter| filter.matches(&v.stage)))
    .collect();
  Ok(Json(views))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /users/:id`
pub async fn get_one<S: UserStore>(
  State(quest): State<Quest<S>>,
  Path(id): Path<UserId>,
) -> Result<Json<UserView>, ApiError> {
  let state = quest
    .store()
    .get(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
  Ok(Json(view(&quest, state)))
}
