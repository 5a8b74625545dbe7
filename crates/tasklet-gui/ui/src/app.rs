mod dialogs;
mod storage;

use tasklet_shared::{
  Control,
  ListController,
  ListEvent,
  Outcome
};
use web_sys::{
  Element,
  HtmlInputElement
};
use yew::{
  Callback,
  Html,
  InputEvent,
  MouseEvent,
  SubmitEvent,
  TargetCast,
  function_component,
  html,
  use_force_update,
  use_mut_ref
};

use self::dialogs::BrowserPrompter;
use self::storage::{
  LocalStore,
  apply_root_theme
};
use crate::components::{
  TaskForm,
  TaskList,
  ThemeToggle
};

#[function_component(App)]
pub fn app() -> Html {
  let controller = use_mut_ref(|| {
    let controller =
      ListController::load(LocalStore);
    apply_root_theme(controller.theme());
    controller
  });
  let refresh = use_force_update();

  let on_input = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      controller
        .borrow_mut()
        .set_input(input.value());
      refresh.force_update();
    })
  };

  let on_submit = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      let result =
        controller.borrow_mut().submit();
      report(result);
      refresh.force_update();
    })
  };

  let on_list_click = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(move |e: MouseEvent| {
      let Some(event) = list_event(&e)
      else {
        return;
      };
      let result = controller
        .borrow_mut()
        .dispatch(
          event,
          &mut BrowserPrompter
        );
      report(result);
      refresh.force_update();
    })
  };

  let on_toggle_theme = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(move |_: MouseEvent| {
      let mut controller =
        controller.borrow_mut();
      // The class flips even when the store write fails.
      let result = controller.toggle_theme();
      apply_root_theme(controller.theme());
      if let Err(error) = result {
        tracing::error!(
          error = %format!("{error:#}"),
          "failed to save theme"
        );
      }
      refresh.force_update();
    })
  };

  let controller = controller.borrow();

  html! {
      <main class="tasklet">
          <header class="tasklet-header">
              <h1>{ "Tasks" }</h1>
              <ThemeToggle
                  label={controller.theme().toggle_label()}
                  on_toggle={on_toggle_theme}
              />
          </header>
          <TaskForm
              value={controller.input().to_string()}
              on_input={on_input}
              on_submit={on_submit}
          />
          <TaskList
              items={controller.rendered()}
              on_click={on_list_click}
          />
      </main>
  }
}

/// Maps a click anywhere in the list to the item it landed in and the
/// control that was hit, if any.
fn list_event(
  e: &MouseEvent
) -> Option<ListEvent> {
  let target: Element =
    e.target_dyn_into()?;
  let control =
    Control::ALL.into_iter().find(
      |control| {
        target
          .class_list()
          .contains(control.class_name())
      }
    );
  let position = target
    .closest("li[data-position]")
    .ok()
    .flatten()?
    .get_attribute("data-position")?
    .parse()
    .ok()?;

  Some(ListEvent::Click {
    position,
    control
  })
}

fn report(
  result: anyhow::Result<Outcome>
) {
  match result {
    | Ok(outcome) => {
      tracing::debug!(?outcome, "list updated");
    }
    | Err(error) => {
      tracing::error!(
        error = %format!("{error:#}"),
        "failed to persist task list"
      );
    }
  }
}
