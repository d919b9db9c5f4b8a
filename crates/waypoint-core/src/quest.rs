//! [`Quest`]: the moderation router and live-location controller, wired to
//! the progression state machine.
//!
//! Every operation returns the notifications it wants delivered, in order.
//! The participant's acknowledgement always comes first, followed by whatever
//! the moderator needs to see.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  access::Access,
  command::{ModeratorCommand, split_command},
  decision::DecisionToken,
  event::{InboundEvent, Submission},
  geo::{self, Coordinate, Zone},
  messages,
  notify::{ModeratorAction, Notification},
  progress::{self, AnswerOutcome, DecisionOutcome, Stage},
  store::UserStore,
  task::TaskCatalog,
  user::{UserId, UserState},
};

/// Label of the keyboard button participants press to ask for a hint.
pub const DEFAULT_HINT_LABEL: &str = "Request a hint";

/// The quest coordinator. Cheap to clone; all state lives in the store.
pub struct Quest<S> {
  store:      Arc<S>,
  access:     Arc<dyn Access>,
  catalog:    Arc<TaskCatalog>,
  zones:      Arc<[Zone]>,
  hint_label: Arc<str>,
}

impl<S> Clone for Quest<S> {
  fn clone(&self) -> Self {
    Self {
      store:      Arc::clone(&self.store),
      access:     Arc::clone(&self.access),
      catalog:    Arc::clone(&self.catalog),
      zones:      Arc::clone(&self.zones),
      hint_label: Arc::clone(&self.hint_label),
    }
  }
}

impl<S: UserStore> Quest<S> {
  pub fn new(
    store: S,
    access: impl Access + 'static,
    catalog: TaskCatalog,
    zones: Vec<Zone>,
  ) -> Self {
    Self {
      store:      Arc::new(store),
      access:     Arc::new(access),
      catalog:    Arc::new(catalog),
      zones:      zones.into(),
      hint_label: DEFAULT_HINT_LABEL.into(),
    }
  }

  pub fn with_hint_label(mut self, label: impl Into<String>) -> Self {
    let label: String = label.into();
    self.hint_label = label.into();
    self
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn catalog(&self) -> &TaskCatalog { &self.catalog }

  pub fn zones(&self) -> &[Zone] { &self.zones }

  pub fn hint_label(&self) -> &str { &self.hint_label }

  // ── Entry point ───────────────────────────────────────────────────────

  /// Process one inbound transport event.
  ///
  /// Failures scoped to a single interaction are turned into replies here:
  /// unknown users and malformed commands are reported to the moderator,
  /// stale decisions are dropped. Only store failures and invalid event
  /// payloads come back as errors.
  pub async fn handle(&self, event: InboundEvent) -> Result<Vec<Notification>> {
    match self.dispatch(event).await {
      Ok(out) => Ok(out),
      Err(Error::StaleDecision(user_id)) => {
        debug!(user_id, "ignoring stale decision");
        Ok(Vec::new())
      }
      Err(Error::UnknownUser(user_id)) => {
        Ok(vec![Notification::moderator(messages::unknown_user(user_id))])
      }
      Err(Error::InvalidCommandArgs(message)) => {
        Ok(vec![Notification::moderator(message)])
      }
      Err(e) => Err(e),
    }
  }

  async fn dispatch(&self, event: InboundEvent) -> Result<Vec<Notification>> {
    let sender = event.sender();
    let is_moderator = self.access.is_moderator(sender);
    let is_participant = self.access.is_participant(sender);

    match event {
      InboundEvent::Action { action, .. } => {
        if !is_moderator {
          warn!(user_id = sender, "moderator action from another user ignored");
          return Ok(Vec::new());
        }
        self.run_action(action).await
      }
      InboundEvent::Text { text, .. } => {
        if is_moderator {
          if let Some(command) = ModeratorCommand::parse(&text) {
            return self.run_command(command?).await;
          }
          let for_participants =
            matches!(split_command(&text), None | Some(("start" | "hint", _)));
          if !is_participant || !for_participants {
            return Ok(vec![Notification::moderator(messages::UNKNOWN_COMMAND)]);
          }
        }
        if !is_participant {
          return Ok(no_access(sender));
        }
        self.participant_text(sender, text).await
      }
      InboundEvent::Photo { .. } => {
        if !is_participant {
          return Ok(no_access(sender));
        }
        self.route(Submission::Photo { user_id: sender }).await
      }
      InboundEvent::Location { latitude, longitude, .. } => {
        if !is_participant {
          return Ok(no_access(sender));
        }
        let point = Coordinate::new(latitude, longitude)?;
        self.route(Submission::Location { user_id: sender, point }).await
      }
    }
  }

  async fn participant_text(&self, user_id: UserId, text: String) -> Result<Vec<Notification>> {
    let command = split_command(&text).map(|(name, _)| name);
    if command == Some("start") {
      return self.start(user_id).await;
    }
    let submission = if command == Some("hint") || text.trim() == &*self.hint_label {
      Submission::HintRequest { user_id }
    } else {
      Submission::Text { user_id, text }
    };
    self.route(submission).await
  }

  // ── Participants ──────────────────────────────────────────────────────

  /// Join the quest (or rejoin it) and receive the current task.
  ///
  /// Rejoining never resets progress.
  pub async fn start(&self, user_id: UserId) -> Result<Vec<Notification>> {
    let catalog = Arc::clone(&self.catalog);
    let reply = self
      .store
      .upsert_with(user_id, move |state| {
        state.touch();
        catalog
          .describe(state.current_task)
          .map_or_else(|_| messages::QUEST_COMPLETED.to_string(), messages::welcome)
      })
      .await
      .map_err(Error::store)?;
    info!(user_id, "participant started the quest");
    Ok(vec![Notification::user(user_id, reply)])
  }

  /// Forward a participant submission to wherever it belongs.
  pub async fn route(&self, submission: Submission) -> Result<Vec<Notification>> {
    debug!(user_id = submission.user_id(), kind = submission.kind(), "routing submission");
    match submission {
      Submission::Text { user_id, text } => self.submit_answer(user_id, text).await,
      Submission::Location { user_id, point } => self.submit_location(user_id, point).await,
      Submission::Photo { user_id } => self.submit_photo(user_id).await,
      Submission::HintRequest { user_id } => self.request_hint(user_id).await,
    }
  }

  /// Record a text answer and ask the moderator to review it.
  pub async fn submit_answer(&self, user_id: UserId, text: String) -> Result<Vec<Notification>> {
    let catalog = Arc::clone(&self.catalog);
    let answer = text.clone();
    let outcome = self
      .store
      .upsert_with(user_id, move |state| progress::record_answer(state, &catalog, answer))
      .await
      .map_err(Error::store)?;

    match outcome {
      AnswerOutcome::Completed => {
        Ok(vec![Notification::user(user_id, messages::QUEST_COMPLETED)])
      }
      AnswerOutcome::Pending { task, version, superseded } => {
        info!(user_id, task, version, superseded, "answer forwarded for review");
        let actions = DecisionToken::pair(user_id, version)
          .map(|token| ModeratorAction::Decide { token });
        Ok(vec![
          Notification::user(user_id, messages::ANSWER_RECEIVED),
          Notification::moderator_with(
            messages::answer_for_review(user_id, task, &text, superseded),
            actions,
          ),
        ])
      }
    }
  }

  /// Check a reported location against the quest zones.
  ///
  /// Reports never need a decision and never touch the live-location flag;
  /// the moderator gets toggle actions to act on it if they want.
  pub async fn submit_location(
    &self,
    user_id: UserId,
    point: Coordinate,
  ) -> Result<Vec<Notification>> {
    self.store.upsert_with(user_id, UserState::touch).await.map_err(Error::store)?;

    let toggles = [true, false].map(|enabled| ModeratorAction::LiveLocation { user_id, enabled });
    let out = match geo::evaluate(point, &self.zones) {
      Some(found) => {
        info!(user_id, zone = %found.name, distance_m = found.distance_m, "participant inside zone");
        vec![
          Notification::user(user_id, messages::in_zone(&found.name)),
          Notification::moderator_with(
            messages::user_in_zone(user_id, &found.name, found.distance_m),
            toggles,
          ),
        ]
      }
      None => vec![
        Notification::user(user_id, messages::OUTSIDE_ZONES),
        Notification::moderator_with(messages::user_outside_zones(user_id, point), toggles),
      ],
    };
    Ok(out)
  }

  /// Acknowledge a photo. Photos are neither stored nor reviewed.
  pub async fn submit_photo(&self, user_id: UserId) -> Result<Vec<Notification>> {
    self.store.upsert_with(user_id, UserState::touch).await.map_err(Error::store)?;
    Ok(vec![
      Notification::user(user_id, messages::PHOTO_RECEIVED),
      Notification::moderator(messages::photo(user_id)),
    ])
  }

  /// Pass a hint request on to the moderator. Task progress is unaffected.
  pub async fn request_hint(&self, user_id: UserId) -> Result<Vec<Notification>> {
    self.store.upsert_with(user_id, UserState::touch).await.map_err(Error::store)?;
    info!(user_id, "hint requested");
    Ok(vec![
      Notification::user(user_id, messages::HINT_REQUESTED),
      Notification::moderator(messages::hint_request(user_id)),
    ])
  }

  // ── Moderator ─────────────────────────────────────────────────────────

  pub async fn run_action(&self, action: ModeratorAction) -> Result<Vec<Notification>> {
    match action {
      ModeratorAction::Decide { token } => self.apply_decision(token).await,
      ModeratorAction::LiveLocation { user_id, enabled } => {
        self.set_live_location(user_id, enabled).await
      }
    }
  }

  pub async fn run_command(&self, command: ModeratorCommand) -> Result<Vec<Notification>> {
    match command {
      ModeratorCommand::SendHint { user_id, text } => self.send_hint(user_id, &text).await,
      ModeratorCommand::StartLocation { user_id } => self.set_live_location(user_id, true).await,
      ModeratorCommand::StopLocation { user_id } => self.set_live_location(user_id, false).await,
      ModeratorCommand::LocationStatus { user_id } => {
        let enabled = self.live_location(user_id).await?;
        Ok(vec![Notification::moderator(messages::live_location_status(user_id, enabled))])
      }
      ModeratorCommand::Progress { user_id } => {
        let (state, stage) = self.progress(user_id).await?;
        Ok(vec![Notification::moderator(messages::progress(&state, &stage))])
      }
      ModeratorCommand::Help => Ok(vec![Notification::moderator(messages::HELP)]),
    }
  }

  /// Accept or reject the answer `token` was issued for.
  ///
  /// Fails with [`Error::StaleDecision`] when the answer has since been
  /// superseded or already decided.
  pub async fn apply_decision(&self, token: DecisionToken) -> Result<Vec<Notification>> {
    let user_id = token.user_id;
    let catalog = Arc::clone(&self.catalog);
    let outcome = self
      .store
      .update_with(user_id, move |state| progress::apply_decision(state, &catalog, token))
      .await
      .map_err(Error::store)?
      .ok_or(Error::UnknownUser(user_id))??;

    info!(user_id, decision = %token.kind, version = token.version, "decision applied");
    let out = match outcome {
      DecisionOutcome::Advanced { task, description } => vec![
        Notification::user(user_id, messages::ANSWER_ACCEPTED),
        Notification::user(user_id, messages::new_task(&description)),
        Notification::moderator(messages::advanced(user_id, task)),
      ],
      DecisionOutcome::Completed => vec![
        Notification::user(user_id, messages::ANSWER_ACCEPTED),
        Notification::user(user_id, messages::QUEST_COMPLETED),
        Notification::moderator(messages::completed(user_id)),
      ],
      DecisionOutcome::Retry { task, description } => vec![
        Notification::user(user_id, messages::ANSWER_REJECTED),
        Notification::user(user_id, messages::current_task(&description)),
        Notification::moderator(messages::retry(user_id, task)),
      ],
    };
    Ok(out)
  }

  pub async fn send_hint(&self, user_id: UserId, text: &str) -> Result<Vec<Notification>> {
    self
      .store
      .get(user_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::UnknownUser(user_id))?;
    info!(user_id, "hint sent");
    Ok(vec![
      Notification::user(user_id, messages::hint(text)),
      Notification::moderator(messages::hint_sent(user_id)),
    ])
  }

  /// Record the requested live-location state and ask the participant to
  /// comply. Whether they actually do is not observable here.
  pub async fn set_live_location(
    &self,
    user_id: UserId,
    enabled: bool,
  ) -> Result<Vec<Notification>> {
    self
      .store
      .update_with(user_id, move |state| {
        state.live_location = enabled;
        state.touch();
      })
      .await
      .map_err(Error::store)?
      .ok_or(Error::UnknownUser(user_id))?;

    info!(user_id, enabled, "live location requested");
    Ok(vec![
      Notification::user(user_id, messages::live_location_request(enabled)),
      Notification::moderator(messages::live_location_requested(user_id, enabled)),
    ])
  }

  /// The requested live-location state for `user_id`.
  pub async fn live_location(&self, user_id: UserId) -> Result<bool> {
    let state = self
      .store
      .get(user_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::UnknownUser(user_id))?;
    Ok(state.live_location)
  }

  pub async fn progress(&self, user_id: UserId) -> Result<(UserState, Stage)> {
    let state = self
      .store
      .get(user_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::UnknownUser(user_id))?;
    let stage = progress::stage(&state, &self.catalog);
    Ok((state, stage))
  }
}

fn no_access(user_id: UserId) -> Vec<Notification> {
  vec![Notification::user(user_id, messages::NO_ACCESS)]
}
