//! [`MemoryStore`]: the in-memory implementation of [`UserStore`].

use std::{collections::BTreeMap, convert::Infallible, sync::Arc};

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use waypoint_core::{
  store::UserStore,
  user::{UserId, UserState},
};

type Slot = Arc<Mutex<UserState>>;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A user store held entirely in memory.
///
/// The outer map lock is only held long enough to find or insert a user's
/// slot; the closure passed to [`UserStore::upsert_with`] or
/// [`UserStore::update_with`] runs under that user's own lock.
///
/// Cloning is cheap; the inner map is reference-counted.
#[derive(Clone, Default)]
pub struct MemoryStore {
  users: Arc<RwLock<BTreeMap<UserId, Slot>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Number of users seen so far.
  pub async fn len(&self) -> usize { self.users.read().await.len() }

  pub async fn is_empty(&self) -> bool { self.users.read().await.is_empty() }

  async fn slot(&self, user_id: UserId) -> Option<Slot> {
    self.users.read().await.get(&user_id).cloned()
  }

  async fn slot_or_insert(&self, user_id: UserId) -> Slot {
    if let Some(slot) = self.slot(user_id).await {
      return slot;
    }
    // Another task may have inserted the user between the two locks; the
    // entry API keeps whichever slot got there first.
    let mut users = self.users.write().await;
    Arc::clone(users.entry(user_id).or_insert_with(|| {
      debug!(user_id, "new participant");
      Arc::new(Mutex::new(UserState::new(user_id)))
    }))
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, user_id: UserId) -> Result<Option<UserState>, Infallible> {
    let Some(slot) = self.slot(user_id).await else {
      return Ok(None);
    };
    let state = slot.lock().await.clone();
    Ok(Some(state))
  }

  async fn list(&self) -> Result<Vec<UserState>, Infallible> {
    let slots: Vec<Slot> = self.users.read().await.values().cloned().collect();
    let mut out = Vec::with_capacity(slots.len());
    for slot in slots {
      out.push(slot.lock().await.clone());
    }
    Ok(out)
  }

  async fn upsert_with<F, R>(&self, user_id: UserId, f: F) -> Result<R, Infallible>
  where
    F: FnOnce(&mut UserState) -> R + Send + 'static,
    R: Send + 'static,
  {
    let slot = self.slot_or_insert(user_id).await;
    let mut state = slot.lock().await;
    Ok(f(&mut *state))
  }

  async fn update_with<F, R>(&self, user_id: UserId, f: F) -> Result<Option<R>, Infallible>
  where
    F: FnOnce(&mut UserState) -> R + Send + 'static,
    R: Send + 'static,
  {
    let Some(slot) = self.slot(user_id).await else {
      return Ok(None);
    };
    let mut state = slot.lock().await;
    Ok(Some(f(&mut *state)))
  }
}
