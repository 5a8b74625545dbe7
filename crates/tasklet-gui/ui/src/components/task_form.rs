use yew::{
  AttrValue,
  Callback,
  Html,
  InputEvent,
  Properties,
  SubmitEvent,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub value:     AttrValue,
  pub on_input:  Callback<InputEvent>,
  pub on_submit: Callback<SubmitEvent>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  html! {
      <form id="task-form" onsubmit={props.on_submit.clone()}>
          <input
              id="task-input"
              type="text"
              placeholder="New task"
              value={props.value.clone()}
              oninput={props.on_input.clone()}
          />
          <button type="submit" class="btn">{ "Add" }</button>
      </form>
  }
}
