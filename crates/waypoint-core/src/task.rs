//! The task catalog: a fixed, ordered list of quest steps.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One step of the quest. Indices start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
  pub index:       u32,
  pub description: String,
}

/// Immutable ordered list of tasks, loaded once at startup.
///
/// A user whose task index is `len() + 1` has completed the quest.
#[derive(Debug, Clone)]
pub struct TaskCatalog {
  tasks: Vec<Task>,
}

impl TaskCatalog {
  pub fn new<I, D>(descriptions: I) -> Result<Self>
  where
    I: IntoIterator<Item = D>,
    D: Into<String>,
  {
    let tasks: Vec<Task> = descriptions
      .into_iter()
      .zip(1..)
      .map(|(description, index)| Task { index, description: description.into() })
      .collect();
    if tasks.is_empty() {
      return Err(Error::EmptyCatalog);
    }
    Ok(Self { tasks })
  }

  pub fn len(&self) -> u32 { self.tasks.len() as u32 }

  pub fn is_empty(&self) -> bool { self.tasks.is_empty() }

  pub fn tasks(&self) -> &[Task] { &self.tasks }

  pub fn get(&self, index: u32) -> Option<&Task> {
    let slot = index.checked_sub(1)?;
    self.tasks.get(slot as usize)
  }

  /// The description of task `index`, or [`Error::TaskIndexExhausted`] when
  /// the index points past the last task.
  pub fn describe(&self, index: u32) -> Result<&str> {
    self
      .get(index)
      .map(|task| task.description.as_str())
      .ok_or(Error::TaskIndexExhausted(index))
  }

  /// The index that marks a user as having finished every task.
  pub fn completed_index(&self) -> u32 { self.len() + 1 }

  pub fn is_completed(&self, index: u32) -> bool { index > self.len() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn indices_start_at_one() {
    let catalog = TaskCatalog::new(["find the monument", "scan the QR code"]).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(0), None);
    assert_eq!(catalog.get(1).unwrap().description, "find the monument");
    assert_eq!(catalog.get(2).unwrap().index, 2);
    assert_eq!(catalog.get(3), None);
  }

  #[test]
  fn describe_past_the_end_is_exhausted() {
    let catalog = TaskCatalog::new(["only"]).unwrap();
    assert_eq!(catalog.describe(1).unwrap(), "only");
    assert!(matches!(catalog.describe(2), Err(Error::TaskIndexExhausted(2))));
    assert_eq!(catalog.completed_index(), 2);
    assert!(catalog.is_completed(2));
    assert!(!catalog.is_completed(1));
  }

  #[test]
  fn empty_catalog_is_rejected() {
    let empty: [&str; 0] = [];
    assert!(matches!(TaskCatalog::new(empty), Err(Error::EmptyCatalog)));
  }
}
