//! The task-progression state machine.
//!
//! Per user:
//!
//! ```text
//! AssignedTask(n) --answer--> AwaitingReview(n) --accept--> AssignedTask(n+1) | Completed
//!                                  |   ^
//!                                  |   +--answer (supersedes)
//!                                  +--reject--> AssignedTask(n)
//! ```
//!
//! `AwaitingReview` is not a stored state of its own: it is
//! [`UserState::pending_review`] being set. The functions here are pure
//! transitions over one user's record and are meant to run inside
//! [`UserStore`](crate::store::UserStore) closures.

use serde::Serialize;

use crate::{
  Error, Result,
  decision::{DecisionKind, DecisionToken},
  task::TaskCatalog,
  user::UserState,
};

/// Where a user stands, derived from their record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Stage {
  Assigned { task: u32 },
  AwaitingReview { task: u32, version: u64 },
  Completed,
}

pub fn stage(state: &UserState, catalog: &TaskCatalog) -> Stage {
  if catalog.is_completed(state.current_task) {
    return Stage::Completed;
  }
  match state.pending_review {
    Some(version) => Stage::AwaitingReview { task: state.current_task, version },
    None => Stage::Assigned { task: state.current_task },
  }
}

// ─── Answers ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
  /// The answer now awaits review under `version`.
  Pending {
    task:       u32,
    version:    u64,
    /// A previous answer was still awaiting review and has been replaced.
    superseded: bool,
  },
  /// The user has no task left to answer; nothing was recorded.
  Completed,
}

/// Record a text answer for the user's current task.
///
/// An answer arriving while another is awaiting review replaces it; the
/// replaced answer's decision tokens become stale.
pub fn record_answer(
  state: &mut UserState,
  catalog: &TaskCatalog,
  text: String,
) -> AnswerOutcome {
  if catalog.is_completed(state.current_task) {
    return AnswerOutcome::Completed;
  }
  let superseded = state.pending_review.is_some();
  state.answer_version += 1;
  state.pending_review = Some(state.answer_version);
  state.last_answer = Some(text);
  state.touch();
  AnswerOutcome::Pending {
    task: state.current_task,
    version: state.answer_version,
    superseded,
  }
}

// ─── Decisions ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
  /// Accepted; the user moved on to `task`.
  Advanced { task: u32, description: String },
  /// Accepted at the last task; the quest is over for this user.
  Completed,
  /// Rejected; the user stays on `task` and gets it again.
  Retry { task: u32, description: String },
}

/// Apply a moderator decision.
///
/// Fails with [`Error::StaleDecision`] unless `token` refers to the answer
/// currently awaiting review. Applying a decision clears the pending review,
/// so redelivery of the same token is stale as well.
pub fn apply_decision(
  state: &mut UserState,
  catalog: &TaskCatalog,
  token: DecisionToken,
) -> Result<DecisionOutcome> {
  if catalog.is_completed(state.current_task)
    || state.pending_review != Some(token.version)
  {
    return Err(Error::StaleDecision(state.user_id));
  }
  state.pending_review = None;
  state.touch();

  match token.kind {
    DecisionKind::Accept => {
      let next = state.current_task + 1;
      match catalog.describe(next) {
        Ok(description) => {
          state.current_task = next;
          Ok(DecisionOutcome::Advanced { task: next, description: description.to_string() })
        }
        Err(Error::TaskIndexExhausted(_)) => {
          state.current_task = catalog.completed_index();
          Ok(DecisionOutcome::Completed)
        }
        Err(e) => Err(e),
      }
    }
    DecisionKind::Reject => {
      state.last_answer = None;
      let description = catalog.describe(state.current_task)?.to_string();
      Ok(DecisionOutcome::Retry { task: state.current_task, description })
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn catalog() -> TaskCatalog {
    TaskCatalog::new(["find the monument", "scan the QR code", "reach the park"]).unwrap()
  }

  fn token(state: &UserState, kind: DecisionKind) -> DecisionToken {
    DecisionToken { user_id: state.user_id, kind, version: state.pending_review.unwrap() }
  }

  #[test]
  fn answer_then_accept_advances() {
    let catalog = catalog();
    let mut state = UserState::new(1);
    assert_eq!(stage(&state, &catalog), Stage::Assigned { task: 1 });

    let outcome = record_answer(&mut state, &catalog, "abc".into());
    assert_eq!(outcome, AnswerOutcome::Pending { task: 1, version: 1, superseded: false });
    assert_eq!(stage(&state, &catalog), Stage::AwaitingReview { task: 1, version: 1 });
    assert_eq!(state.last_answer.as_deref(), Some("abc"));

    let decision = token(&state, DecisionKind::Accept);
    let outcome = apply_decision(&mut state, &catalog, decision).unwrap();
    assert_eq!(
      outcome,
      DecisionOutcome::Advanced { task: 2, description: "scan the QR code".into() }
    );
    assert_eq!(stage(&state, &catalog), Stage::Assigned { task: 2 });
  }

  #[test]
  fn reject_holds_task_and_clears_answer() {
    let catalog = catalog();
    let mut state = UserState::new(1);
    record_answer(&mut state, &catalog, "wrong".into());

    let decision = token(&state, DecisionKind::Reject);
    let outcome = apply_decision(&mut state, &catalog, decision).unwrap();
    assert_eq!(
      outcome,
      DecisionOutcome::Retry { task: 1, description: "find the monument".into() }
    );
    assert_eq!(state.current_task, 1);
    assert_eq!(state.last_answer, None);
    assert!(!state.is_awaiting_review());
  }

  #[test]
  fn newer_answer_makes_older_token_stale() {
    let catalog = catalog();
    let mut state = UserState::new(1);
    record_answer(&mut state, &catalog, "first".into());
    let old = token(&state, DecisionKind::Accept);

    let outcome = record_answer(&mut state, &catalog, "second".into());
    assert_eq!(outcome, AnswerOutcome::Pending { task: 1, version: 2, superseded: true });
    let new = token(&state, DecisionKind::Reject);

    assert!(matches!(apply_decision(&mut state, &catalog, old), Err(Error::StaleDecision(1))));
    assert_eq!(state.current_task, 1);

    apply_decision(&mut state, &catalog, new).unwrap();
    assert_eq!(state.current_task, 1);
  }

  #[test]
  fn redelivered_decision_is_a_no_op() {
    let catalog = catalog();
    let mut state = UserState::new(1);
    record_answer(&mut state, &catalog, "abc".into());
    let accept = token(&state, DecisionKind::Accept);

    apply_decision(&mut state, &catalog, accept).unwrap();
    let before = state.clone();
    assert!(matches!(apply_decision(&mut state, &catalog, accept), Err(Error::StaleDecision(_))));
    assert_eq!(state, before);
  }

  #[test]
  fn accepting_last_task_completes() {
    let catalog = TaskCatalog::new(["one", "two"]).unwrap();
    let mut state = UserState::new(1);

    for expected in [DecisionOutcome::Advanced { task: 2, description: "two".into() }, DecisionOutcome::Completed] {
      record_answer(&mut state, &catalog, "ok".into());
      let decision = token(&state, DecisionKind::Accept);
      let outcome = apply_decision(&mut state, &catalog, decision).unwrap();
      assert_eq!(outcome, expected);
    }
    assert_eq!(state.current_task, 3);
    assert_eq!(stage(&state, &catalog), Stage::Completed);

    // Nothing further is recorded or decided.
    assert_eq!(record_answer(&mut state, &catalog, "more".into()), AnswerOutcome::Completed);
    let late = DecisionToken { user_id: 1, kind: DecisionKind::Accept, version: state.answer_version };
    assert!(matches!(apply_decision(&mut state, &catalog, late), Err(Error::StaleDecision(1))));
    assert_eq!(state.current_task, 3);
  }

  #[test]
  fn task_index_never_decreases() {
    let catalog = catalog();
    let mut state = UserState::new(1);
    let script = [
      DecisionKind::Reject,
      DecisionKind::Accept,
      DecisionKind::Reject,
      DecisionKind::Reject,
      DecisionKind::Accept,
      DecisionKind::Accept,
      DecisionKind::Reject,
    ];
    let mut last = state.current_task;
    for kind in script {
      record_answer(&mut state, &catalog, "x".into());
      let version = state.pending_review.unwrap_or(state.answer_version);
      let _ = apply_decision(&mut state, &catalog, DecisionToken { user_id: 1, kind, version });
      assert!(state.current_task >= last);
      assert!(state.current_task <= catalog.completed_index());
      last = state.current_task;
    }
    assert_eq!(state.current_task, catalog.completed_index());
  }
}
