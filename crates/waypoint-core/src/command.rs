//! Slash-command parsing.
//!
//! Commands look like `/name arg…`. Chat clients in group conversations
//! append the bot handle (`/name@quest_bot`), which is stripped.

use crate::{Error, Result, user::UserId};

/// Split `text` into a command name and the remaining argument string.
///
/// Returns `None` when `text` is not a slash command.
pub fn split_command(text: &str) -> Option<(&str, &str)> {
  let rest = text.trim().strip_prefix('/')?;
  let (head, args) = match rest.split_once(char::is_whitespace) {
    Some((head, args)) => (head, args.trim()),
    None => (rest, ""),
  };
  let name = head.split_once('@').map_or(head, |(name, _)| name);
  if name.is_empty() {
    return None;
  }
  Some((name, args))
}

/// Commands only the moderator may issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeratorCommand {
  SendHint { user_id: UserId, text: String },
  StartLocation { user_id: UserId },
  StopLocation { user_id: UserId },
  LocationStatus { user_id: UserId },
  Progress { user_id: UserId },
  Help,
}

impl ModeratorCommand {
  /// Parse a moderator command.
  ///
  /// `None` means the text is not a moderator command at all (plain text or
  /// a participant command such as `/start`); `Some(Err(_))` means it is one
  /// but the arguments are malformed.
  pub fn parse(text: &str) -> Option<Result<Self>> {
    let (name, args) = split_command(text)?;
    let parsed = match name {
      "send_hint" => parse_send_hint(args),
      "start_loc" => single_user(name, args).map(|user_id| Self::StartLocation { user_id }),
      "stop_loc" => single_user(name, args).map(|user_id| Self::StopLocation { user_id }),
      "loc_status" => single_user(name, args).map(|user_id| Self::LocationStatus { user_id }),
      "progress" => single_user(name, args).map(|user_id| Self::Progress { user_id }),
      "help" => Ok(Self::Help),
      _ => return None,
    };
    Some(parsed)
  }
}

fn parse_user_id(raw: &str) -> Result<UserId> {
  raw
    .parse()
    .map_err(|_| Error::InvalidCommandArgs(format!("`{raw}` is not a user id")))
}

fn single_user(name: &str, args: &str) -> Result<UserId> {
  let mut words = args.split_whitespace();
  match (words.next(), words.next()) {
    (Some(raw), None) => parse_user_id(raw),
    _ => Err(Error::InvalidCommandArgs(format!("usage: /{name} <user_id>"))),
  }
}

fn parse_send_hint(args: &str) -> Result<ModeratorCommand> {
  let usage = || Error::InvalidCommandArgs("usage: /send_hint <user_id> <text>".to_string());

  let (raw_id, text) = args.split_once(char::is_whitespace).ok_or_else(usage)?;
  let text = text.trim();
  if text.is_empty() {
    return Err(usage());
  }
  Ok(ModeratorCommand::SendHint {
    user_id: parse_user_id(raw_id)?,
    text:    text.to_string(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn split_strips_bot_handle() {
    assert_eq!(split_command("/start"), Some(("start", "")));
    assert_eq!(split_command("  /start@quest_bot  "), Some(("start", "")));
    assert_eq!(split_command("/send_hint@quest_bot 1 look up"), Some(("send_hint", "1 look up")));
    assert_eq!(split_command("hello"), None);
    assert_eq!(split_command("/"), None);
  }

  #[test]
  fn send_hint_keeps_text_whole() {
    let cmd = ModeratorCommand::parse("/send_hint 123 look behind the  fountain").unwrap().unwrap();
    assert_eq!(
      cmd,
      ModeratorCommand::SendHint { user_id: 123, text: "look behind the  fountain".into() }
    );
  }

  #[test]
  fn location_commands() {
    assert_eq!(
      ModeratorCommand::parse("/start_loc 7").unwrap().unwrap(),
      ModeratorCommand::StartLocation { user_id: 7 }
    );
    assert_eq!(
      ModeratorCommand::parse("/stop_loc 7").unwrap().unwrap(),
      ModeratorCommand::StopLocation { user_id: 7 }
    );
    assert_eq!(
      ModeratorCommand::parse("/loc_status 7").unwrap().unwrap(),
      ModeratorCommand::LocationStatus { user_id: 7 }
    );
  }

  #[test]
  fn malformed_arguments_are_reported() {
    for text in ["/send_hint", "/send_hint 12", "/send_hint abc hint", "/start_loc", "/start_loc x", "/stop_loc 1 2"] {
      let parsed = ModeratorCommand::parse(text).expect("recognised as a command");
      assert!(matches!(parsed, Err(Error::InvalidCommandArgs(_))), "{text}: {parsed:?}");
    }
  }

  #[test]
  fn non_moderator_text_is_not_a_command() {
    assert!(ModeratorCommand::parse("/start").is_none());
    assert!(ModeratorCommand::parse("the answer is 42").is_none());
  }
}
