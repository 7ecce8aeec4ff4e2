use web_sys::{
  HtmlInputElement,
  InputEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct NewTaskFormProps {
  pub value:     String,
  pub on_input:  Callback<String>,
  pub on_submit: Callback<()>
}

/// Title box above the board. Enter or the
/// button submits; the parent clears the
/// value once the task exists.
#[function_component(NewTaskForm)]
pub fn new_task_form(
  props: &NewTaskFormProps
) -> Html {
  let oninput = {
    let on_input = props.on_input.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_input.emit(input.value());
    })
  };

  let onsubmit = {
    let on_submit = props.on_submit.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit(());
    })
  };

  html! {
      <form class="new-task-form" {onsubmit}>
          <input
              class="new-task-input"
              value={props.value.clone()}
              placeholder="Add a new task"
              aria-label="New task title"
              {oninput}
          />
          <button type="submit" class="btn btn-primary">{ "Add Task" }</button>
      </form>
  }
}
