use tracing::{
  debug,
  info
};

use crate::bridge::PersistenceBridge;
use crate::prompt::{
  CONFIRM_DELETE_MESSAGE,
  EDIT_PROMPT_MESSAGE,
  Prompter
};
use crate::store::KeyValueStore;
use crate::theme::Theme;
use crate::view::{
  Control,
  RenderedItem,
  TaskListView,
  render
};

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct UiState {
  pub tasks: TaskListView,
  pub input: String,
  pub theme: Theme
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Outcome {
  Changed,
  Unchanged
}

/// Delegated event from the list container.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ListEvent {
  Click {
    position: usize,
    control:  Option<Control>
  }
}

/// Owns the task list view-model and keeps the store in step with it.
#[derive(Debug)]
pub struct ListController<S> {
  state:  UiState,
  bridge: PersistenceBridge<S>
}

impl<S: KeyValueStore> ListController<S> {
  /// Restores tasks and theme from the store. Nothing stored, or nothing
  /// readable, yields an empty light-themed list.
  #[tracing::instrument(skip_all)]
  pub fn load(store: S) -> Self {
    let bridge = PersistenceBridge::new(store);
    let tasks = bridge.load_tasks();
    let theme = bridge.load_theme();

    info!(
      count = tasks.len(),
      theme = theme.storage_value(),
      "restored task list"
    );

    Self {
      state: UiState {
        tasks,
        input: String::new(),
        theme
      },
      bridge
    }
  }

  pub fn state(&self) -> &UiState {
    &self.state
  }

  pub fn tasks(&self) -> &TaskListView {
    &self.state.tasks
  }

  pub fn theme(&self) -> Theme {
    self.state.theme
  }

  pub fn input(&self) -> &str {
    &self.state.input
  }

  pub fn set_input(
    &mut self,
    text: impl Into<String>
  ) {
    self.state.input = text.into();
  }

  pub fn rendered(
    &self
  ) -> Vec<RenderedItem> {
    render(&self.state.tasks)
  }

  pub fn store(&self) -> &S {
    self.bridge.store()
  }

  pub fn into_store(self) -> S {
    self.bridge.into_store()
  }

  /// Form submission: adds whatever is in the input field.
  pub fn submit(
    &mut self
  ) -> anyhow::Result<Outcome> {
    let text = self.state.input.clone();
    self.add(&text)
  }

  /// Empty text is ignored without touching the store. Text is stored as
  /// given, untrimmed.
  #[tracing::instrument(skip(self, text), fields(len = text.len()))]
  pub fn add(
    &mut self,
    text: &str
  ) -> anyhow::Result<Outcome> {
    if text.is_empty() {
      debug!("ignoring empty task");
      return Ok(Outcome::Unchanged);
    }

    self.state.tasks.push(text.to_string());
    self.bridge.save_append(text)?;
    self.state.input.clear();

    info!(
      count = self.state.tasks.len(),
      "task added"
    );
    Ok(Outcome::Changed)
  }

  #[tracing::instrument(skip(self, prompter))]
  pub fn delete(
    &mut self,
    position: usize,
    prompter: &mut dyn Prompter
  ) -> anyhow::Result<Outcome> {
    if self.state.tasks.get(position).is_none()
    {
      debug!("no task at position");
      return Ok(Outcome::Unchanged);
    }

    if !prompter.confirm(CONFIRM_DELETE_MESSAGE)
    {
      debug!("delete declined");
      return Ok(Outcome::Unchanged);
    }

    self.state.tasks.remove(position);
    self.bridge.save_all(&self.state.tasks)?;

    info!(
      count = self.state.tasks.len(),
      "task deleted"
    );
    Ok(Outcome::Changed)
  }

  /// Unlike [`Self::add`], an empty answer is accepted and stored.
  #[tracing::instrument(skip(self, prompter))]
  pub fn edit(
    &mut self,
    position: usize,
    prompter: &mut dyn Prompter
  ) -> anyhow::Result<Outcome> {
    let Some(current) =
      self.state.tasks.get(position)
    else {
      debug!("no task at position");
      return Ok(Outcome::Unchanged);
    };

    let Some(next) = prompter
      .prompt_text(EDIT_PROMPT_MESSAGE, current)
    else {
      debug!("edit cancelled");
      return Ok(Outcome::Unchanged);
    };

    self.state.tasks.replace(position, next);
    self.bridge.save_all(&self.state.tasks)?;

    info!("task edited");
    Ok(Outcome::Changed)
  }

  pub fn dispatch(
    &mut self,
    event: ListEvent,
    prompter: &mut dyn Prompter
  ) -> anyhow::Result<Outcome> {
    match event {
      | ListEvent::Click {
        position,
        control: Some(Control::Delete)
      } => self.delete(position, prompter),
      | ListEvent::Click {
        position,
        control: Some(Control::Edit)
      } => self.edit(position, prompter),
      | ListEvent::Click {
        control: None,
        ..
      } => Ok(Outcome::Unchanged)
    }
  }

  /// Flips the theme and persists the new value.
  #[tracing::instrument(skip(self))]
  pub fn toggle_theme(
    &mut self
  ) -> anyhow::Result<Theme> {
    self.state.theme = self.state.theme.toggled();
    self.bridge.save_theme(self.state.theme)?;
    info!(
      theme = self.state.theme.storage_value(),
      "theme toggled"
    );
    Ok(self.state.theme)
  }
}
