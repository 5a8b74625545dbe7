use anyhow::Context;
use tracing::{
  debug,
  warn
};

use crate::codec::{
  decode_tasks,
  encode_tasks
};
use crate::store::{
  KeyValueStore,
  TASKS_KEY,
  THEME_KEY
};
use crate::theme::Theme;
use crate::view::TaskListView;

/// Mirrors the task list and theme preference into a [`KeyValueStore`].
#[derive(Debug)]
pub struct PersistenceBridge<S> {
  store: S
}

impl<S: KeyValueStore> PersistenceBridge<S> {
  pub fn new(store: S) -> Self {
    Self { store }
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  pub fn into_store(self) -> S {
    self.store
  }

  #[tracing::instrument(skip(self))]
  pub fn load_tasks(&self) -> TaskListView {
    let tasks = decode_tasks(
      self.read(TASKS_KEY).as_deref()
    );
    debug!(
      count = tasks.len(),
      "loaded stored tasks"
    );
    tasks
  }

  /// Appends to whatever the store currently holds rather than to the
  /// in-memory list.
  #[tracing::instrument(skip(self, text))]
  pub fn save_append(
    &mut self,
    text: &str
  ) -> anyhow::Result<()> {
    let mut stored = decode_tasks(
      self.read(TASKS_KEY).as_deref()
    );
    stored.push(text.to_string());
    debug!(
      count = stored.len(),
      "appending task to store"
    );
    self.write_tasks(&stored).context(
      "failed to append task to store"
    )
  }

  #[tracing::instrument(skip(self, tasks))]
  pub fn save_all(
    &mut self,
    tasks: &TaskListView
  ) -> anyhow::Result<()> {
    debug!(
      count = tasks.len(),
      "rewriting stored task list"
    );
    self
      .write_tasks(tasks)
      .context("failed to rewrite task list")
  }

  pub fn load_theme(&self) -> Theme {
    Theme::from_stored(
      self.read(THEME_KEY).as_deref()
    )
  }

  #[tracing::instrument(skip(self))]
  pub fn save_theme(
    &mut self,
    theme: Theme
  ) -> anyhow::Result<()> {
    self
      .store
      .set(THEME_KEY, theme.storage_value())
      .context("failed to save theme")
  }

  fn write_tasks(
    &mut self,
    tasks: &TaskListView
  ) -> anyhow::Result<()> {
    let encoded = encode_tasks(tasks)?;
    self.store.set(TASKS_KEY, &encoded)
  }

  fn read(
    &self,
    key: &str
  ) -> Option<String> {
    match self.store.get(key) {
      | Ok(value) => value,
      | Err(error) => {
        warn!(
          key,
          error = %format!("{error:#}"),
          "store read failed; treating \
           key as absent"
        );
        None
      }
    }
  }
}
