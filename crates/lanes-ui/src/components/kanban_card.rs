use lanes_core::{
  Card,
  TaskId
};
use web_sys::{
  DragEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::KanbanCardMeta;

#[derive(Properties, PartialEq)]
pub struct KanbanCardProps {
  pub card:                 Card,
  pub is_dragging:          bool,
  pub on_drag_start:        Callback<TaskId>,
  pub on_drag_end:          Callback<()>,
  pub on_open:              Callback<TaskId>,
  pub on_toggle_importance: Callback<TaskId>
}

#[function_component(KanbanCard)]
pub fn kanban_card(
  props: &KanbanCardProps
) -> Html {
  let task_id = props.card.id.clone();

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |event: DragEvent| {
        if let Some(data_transfer) =
          event.data_transfer()
        {
          let _ = data_transfer.set_data(
            "text/plain",
            task_id.as_str()
          );
          data_transfer
            .set_effect_allowed("move");
        }
        on_drag_start.emit(task_id.clone());
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(move |_| {
      on_drag_end.emit(());
    })
  };

  let onclick = {
    let on_open = props.on_open.clone();
    let task_id = task_id.clone();
    Callback::from(move |_| {
      on_open.emit(task_id.clone());
    })
  };

  let on_star = {
    let on_toggle_importance =
      props.on_toggle_importance.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        on_toggle_importance
          .emit(task_id.clone());
      }
    )
  };

  let important = props.card.important;
  let star_label = if important {
    "Remove importance"
  } else {
    "Mark as important"
  };

  html! {
      <div
          class={classes!(
              "kanban-card",
              props.is_dragging.then_some("dragging"),
              props.card.completed.then_some("completed"),
              important.then_some("important")
          )}
          data-task-id={props.card.id.to_string()}
          data-importance={if important { "high" } else { "normal" }}
          draggable="true"
          {ondragstart}
          {ondragend}
          {onclick}
      >
          <div class="kanban-card-header">
              <div class="kanban-card-title">{ &props.card.title }</div>
              <button
                  type="button"
                  class={classes!("importance-toggle", important.then_some("active"))}
                  aria-label={star_label}
                  aria-pressed={important.to_string()}
                  onclick={on_star}
              >
                  { if important { "★" } else { "☆" } }
              </button>
          </div>
          <KanbanCardMeta card={props.card.clone()} />
      </div>
  }
}
