//! Platform-neutral task list model shared by the terminal host and the
//! browser frontend.
//!
//! Hosts supply two ports: a [`KeyValueStore`] for durable state and a
//! [`Prompter`] for the blocking confirmation and edit dialogs. Everything
//! else (the view-model, the list controller, the persistence bridge and
//! the theme preference) lives here so both hosts behave identically.

pub mod bridge;
pub mod codec;
pub mod controller;
pub mod prompt;
pub mod store;
pub mod theme;
pub mod view;

pub use bridge::PersistenceBridge;
pub use controller::{
  ListController,
  ListEvent,
  Outcome,
  UiState
};
pub use prompt::{
  Prompter,
  CannedPrompter
};
pub use store::{
  KeyValueStore,
  MemoryStore,
  TASKS_KEY,
  THEME_KEY
};
pub use theme::Theme;
pub use view::{
  Control,
  RenderedItem,
  TaskListView
};
