use serde::{
  Deserialize,
  Serialize
};

/// Ordered task texts. Duplicates are allowed; items are addressed by
/// position only.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct TaskListView {
  items: Vec<String>
}

impl TaskListView {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn get(
    &self,
    position: usize
  ) -> Option<&str> {
    self
      .items
      .get(position)
      .map(String::as_str)
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = &str> {
    self.items.iter().map(String::as_str)
  }

  pub fn push(&mut self, text: String) {
    self.items.push(text);
  }

  pub fn remove(
    &mut self,
    position: usize
  ) -> Option<String> {
    (position < self.items.len())
      .then(|| self.items.remove(position))
  }

  /// Replaces the text in place and returns the previous value.
  pub fn replace(
    &mut self,
    position: usize,
    text: String
  ) -> Option<String> {
    self.items.get_mut(position).map(
      |slot| std::mem::replace(slot, text)
    )
  }

  pub fn as_slice(&self) -> &[String] {
    &self.items
  }
}

impl From<Vec<String>> for TaskListView {
  fn from(items: Vec<String>) -> Self {
    Self { items }
  }
}

/// Per-item affordance. Clicks on the list are routed by the role of the
/// control that was hit.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Control {
  Delete,
  Edit
}

impl Control {
  pub const ALL: [Self; 2] =
    [Self::Delete, Self::Edit];

  pub fn class_name(
    self
  ) -> &'static str {
    match self {
      | Self::Delete => "delete-btn",
      | Self::Edit => "edit-btn"
    }
  }

  pub fn glyph(self) -> &'static str {
    match self {
      | Self::Delete => "❌",
      | Self::Edit => "🖊️"
    }
  }

  pub fn from_class(
    class: &str
  ) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|control| {
        control.class_name() == class
      })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
  pub position: usize,
  pub text:     String,
  pub controls: [Control; 2]
}

/// Projects the view-model into renderable items. Calling it twice on the
/// same list yields the same output.
pub fn render(
  tasks: &TaskListView
) -> Vec<RenderedItem> {
  tasks
    .iter()
    .enumerate()
    .map(|(position, text)| RenderedItem {
      position,
      text: text.to_string(),
      controls: Control::ALL
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::{
    Control,
    TaskListView,
    render
  };

  #[test]
  fn render_keeps_order_and_duplicates() {
    let tasks = TaskListView::from(vec![
      "a".to_string(),
      "b".to_string(),
      "a".to_string(),
    ]);

    let first = render(&tasks);
    assert_eq!(first, render(&tasks));
    assert_eq!(
      first
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>(),
      vec!["a", "b", "a"]
    );
    assert_eq!(first[2].position, 2);
    assert_eq!(
      first[2].controls,
      [Control::Delete, Control::Edit]
    );
  }

  #[test]
  fn control_classes_round_trip() {
    for control in Control::ALL {
      assert_eq!(
        Control::from_class(
          control.class_name()
        ),
        Some(control)
      );
    }
    assert_eq!(Control::from_class("row"), None);
  }

  #[test]
  fn out_of_range_edits_are_rejected() {
    let mut tasks = TaskListView::from(vec![
      "only".to_string(),
    ]);
    assert_eq!(tasks.remove(3), None);
    assert_eq!(
      tasks.replace(1, "x".to_string()),
      None
    );
    assert_eq!(tasks.len(), 1);
  }
}
