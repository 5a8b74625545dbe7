use tasklet_shared::RenderedItem;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub items:    Vec<RenderedItem>,
  /// One listener for the whole list; rows carry their position.
  pub on_click: Callback<MouseEvent>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <ul id="task-list" onclick={props.on_click.clone()}>
          {
              for props.items.iter().map(|item| html! {
                  <TaskListRow item={item.clone()} />
              })
          }
      </ul>
  }
}
