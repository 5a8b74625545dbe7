use tasklet_shared::RenderedItem;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub item: RenderedItem
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let position =
    props.item.position.to_string();

  html! {
      <li data-position={position}>
          <span class="task-text">{ &props.item.text }</span>
          {
              for props.item.controls.iter().map(|control| html! {
                  <span class={control.class_name()}>{ control.glyph() }</span>
              })
          }
      </li>
  }
}
