//! `POST /events`: the chat transport's way into the quest.
//!
//! The body is one [`InboundEvent`]; the response lists the notifications the
//! transport should deliver, in order.

use axum::{Json, extract::State};
use waypoint_core::{event::InboundEvent, notify::Notification, store::UserStore};

use crate::{AppState, auth::Verified, error::Error};

pub async fn handler<S>(
  _: Verified,
  State(state): State<AppState<S>>,
  Json(event): Json<InboundEvent>,
) -> Result<Json<Vec<Notification>>, Error>
where
  S: UserStore + 'static,
{
  let sender = event.sender();
  let out = state.quest.handle(event).await?;
  tracing::debug!(user_id = sender, notifications = out.len(), "event handled");
  Ok(Json(out))
}
