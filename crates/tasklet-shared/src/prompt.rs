use std::collections::VecDeque;

pub const CONFIRM_DELETE_MESSAGE: &str =
  "Are you sure?";
pub const EDIT_PROMPT_MESSAGE: &str =
  "Edit task:";

/// Blocking modal dialogs. Each call suspends the caller until the user
/// answers.
pub trait Prompter {
  fn confirm(
    &mut self,
    message: &str
  ) -> bool;

  /// `None` means the user cancelled, which is distinct from answering
  /// with an empty string.
  fn prompt_text(
    &mut self,
    message: &str,
    default: &str
  ) -> Option<String>;
}

/// Answers from queues filled up front, for callers that already know the
/// reply (a `--yes` flag, edit text given inline). Once a queue runs dry
/// it declines confirmations and cancels prompts.
#[derive(Debug, Clone, Default)]
pub struct CannedPrompter {
  confirms: VecDeque<bool>,
  texts:    VecDeque<Option<String>>,
  pub asked: Vec<String>
}

impl CannedPrompter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn confirming(
    mut self,
    answer: bool
  ) -> Self {
    self.confirms.push_back(answer);
    self
  }

  pub fn answering(
    mut self,
    answer: Option<&str>
  ) -> Self {
    self
      .texts
      .push_back(answer.map(str::to_string));
    self
  }
}

impl Prompter for CannedPrompter {
  fn confirm(
    &mut self,
    message: &str
  ) -> bool {
    self.asked.push(message.to_string());
    self.confirms.pop_front().unwrap_or(false)
  }

  fn prompt_text(
    &mut self,
    message: &str,
    default: &str
  ) -> Option<String> {
    self
      .asked
      .push(format!("{message} [{default}]"));
    self.texts.pop_front().flatten()
  }
}
