//! HTTP front end for a Waypoint quest.
//!
//! The chat transport adapter posts each inbound message to `POST /events`
//! and delivers the notifications returned in the response. A read-only view
//! of the quest is mounted under `/api`.

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use waypoint_core::{
  Quest,
  geo::{Coordinate, Zone},
  quest::DEFAULT_HINT_LABEL,
  store::UserStore,
  task::TaskCatalog,
  user::UserId,
};

use auth::{AllowList, WebhookSecret};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `config.toml` and `WAYPOINT_*`
/// environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct BotConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  /// Shared secret expected in the `x-waypoint-secret` header. Unset means
  /// the endpoint is open (e.g. bound to localhost behind the adapter).
  #[serde(default)]
  pub webhook_secret: Option<String>,
  pub moderator_id:   UserId,
  #[serde(default)]
  pub participants:   Vec<UserId>,
  #[serde(default = "default_hint_label")]
  pub hint_label:     String,
  pub tasks:          Vec<String>,
  #[serde(default)]
  pub zones:          Vec<ZoneConfig>,
}

/// One `[[zones]]` table.
#[derive(Deserialize, Clone, Debug)]
pub struct ZoneConfig {
  pub name:      String,
  pub latitude:  f64,
  pub longitude: f64,
  pub radius_m:  f64,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_hint_label() -> String { DEFAULT_HINT_LABEL.to_string() }

impl BotConfig {
  pub fn zones(&self) -> Result<Vec<Zone>, waypoint_core::Error> {
    self
      .zones
      .iter()
      .map(|z| Zone::new(&z.name, Coordinate::new(z.latitude, z.longitude)?, z.radius_m))
      .collect()
  }

  /// Validate the quest content and assemble a [`Quest`] over `store`.
  pub fn build_quest<S: UserStore>(&self, store: S) -> Result<Quest<S>, waypoint_core::Error> {
    let catalog = TaskCatalog::new(self.tasks.iter().cloned())?;
    let access = AllowList::new(self.moderator_id, self.participants.iter().copied());
    Ok(
      Quest::new(store, access, catalog, self.zones()?)
        .with_hint_label(self.hint_label.clone()),
    )
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub quest:  Quest<S>,
  pub secret: Option<Arc<WebhookSecret>>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { quest: self.quest.clone(), secret: self.secret.clone() }
  }
}

impl<S: UserStore> AppState<S> {
  pub fn new(quest: Quest<S>, secret: Option<&str>) -> Self {
    Self { quest, secret: secret.map(|s| Arc::new(WebhookSecret::new(s))) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the bot server.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: UserStore + 'static,
{
  let api = waypoint_api::api_router(state.quest.clone());
  Router::new()
    .route("/health", get(handlers::health::handler))
    .route("/events", post(handlers::events::handler::<S>))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
