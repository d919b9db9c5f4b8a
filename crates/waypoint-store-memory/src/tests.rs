//! Tests for `MemoryStore`, including per-user serialisation under
//! concurrent access.

use std::time::Duration;

use waypoint_core::{store::UserStore, user::UserState};

use crate::MemoryStore;

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_user_is_absent() {
  let s = MemoryStore::new();
  assert_eq!(s.get(1).await.unwrap(), None);
  assert!(s.list().await.unwrap().is_empty());
  assert!(s.is_empty().await);
}

#[tokio::test]
async fn upsert_creates_user_at_first_task() {
  let s = MemoryStore::new();
  let task = s.upsert_with(7, |state| state.current_task).await.unwrap();
  assert_eq!(task, 1);

  let state = s.get(7).await.unwrap().unwrap();
  assert_eq!(state.user_id, 7);
  assert_eq!(state.current_task, 1);
  assert!(!state.live_location);
  assert_eq!(state.last_answer, None);
  assert_eq!(s.len().await, 1);
}

#[tokio::test]
async fn upsert_reuses_existing_record() {
  let s = MemoryStore::new();
  s.upsert_with(7, |state| state.current_task = 3).await.unwrap();
  let task = s.upsert_with(7, |state| state.current_task).await.unwrap();
  assert_eq!(task, 3);
  assert_eq!(s.len().await, 1);
}

#[tokio::test]
async fn update_skips_unknown_user() {
  let s = MemoryStore::new();
  let result = s
    .update_with(9, |state: &mut UserState| {
      state.live_location = true;
    })
    .await
    .unwrap();
  assert_eq!(result, None);
  assert_eq!(s.get(9).await.unwrap(), None);
}

#[tokio::test]
async fn update_mutates_known_user() {
  let s = MemoryStore::new();
  s.upsert_with(9, UserState::touch).await.unwrap();
  let result = s
    .update_with(9, |state| {
      state.live_location = true;
      state.live_location
    })
    .await
    .unwrap();
  assert_eq!(result, Some(true));
  assert!(s.get(9).await.unwrap().unwrap().live_location);
}

#[tokio::test]
async fn list_is_ordered_by_user_id() {
  let s = MemoryStore::new();
  for id in [30, -5, 12] {
    s.upsert_with(id, UserState::touch).await.unwrap();
  }
  let ids: Vec<_> = s.list().await.unwrap().into_iter().map(|u| u.user_id).collect();
  assert_eq!(ids, vec![-5, 12, 30]);
}

#[tokio::test]
async fn snapshots_are_detached() {
  let s = MemoryStore::new();
  s.upsert_with(1, UserState::touch).await.unwrap();
  let mut snapshot = s.get(1).await.unwrap().unwrap();
  snapshot.current_task = 99;
  assert_eq!(s.get(1).await.unwrap().unwrap().current_task, 1);
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn same_user_updates_do_not_interleave() {
  let s = MemoryStore::new();
  let mut handles = Vec::new();
  for _ in 0..64 {
    let s = s.clone();
    handles.push(tokio::spawn(async move {
      s.upsert_with(1, |state| {
        // Read, yield the CPU, then write back: any interleaving would lose
        // increments.
        let seen = state.answer_version;
        std::thread::yield_now();
        state.answer_version = seen + 1;
      })
      .await
      .unwrap();
    }));
  }
  for handle in handles {
    handle.await.unwrap();
  }
  assert_eq!(s.get(1).await.unwrap().unwrap().answer_version, 64);
  assert_eq!(s.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn other_users_are_not_blocked_by_a_held_lock() {
  let s = MemoryStore::new();
  s.upsert_with(1, UserState::touch).await.unwrap();

  // Hold user 1's lock from a blocking thread for a while.
  let held = s.clone();
  let blocker = tokio::spawn(async move {
    held
      .update_with(1, |_| std::thread::sleep(Duration::from_millis(300)))
      .await
      .unwrap();
  });
  tokio::time::sleep(Duration::from_millis(50)).await;

  let other = tokio::time::timeout(
    Duration::from_millis(200),
    s.upsert_with(2, |state| state.current_task),
  )
  .await
  .expect("user 2 should not wait for user 1");
  assert_eq!(other.unwrap(), 1);

  blocker.await.unwrap();
}
