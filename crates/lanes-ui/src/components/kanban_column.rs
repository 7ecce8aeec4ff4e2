use lanes_core::{
  Column,
  Lane,
  TaskId
};
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::KanbanCard;

#[derive(Properties, PartialEq)]
pub struct KanbanColumnProps {
  pub lane:                 Lane,
  pub dragging_task:        Option<TaskId>,
  pub is_drop_hint:         bool,
  pub on_drag_over_lane:
    Callback<Column>,
  pub on_drop:              Callback<Column>,
  pub on_drag_start:        Callback<TaskId>,
  pub on_drag_end:          Callback<()>,
  pub on_open:              Callback<TaskId>,
  pub on_toggle_importance: Callback<TaskId>
}

#[function_component(KanbanColumn)]
pub fn kanban_column(
  props: &KanbanColumnProps
) -> Html {
  let column = props.lane.column;

  let ondragover = {
    let on_drag_over_lane =
      props.on_drag_over_lane.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        event.stop_propagation();
        on_drag_over_lane.emit(column);
      }
    )
  };

  let ondragenter = {
    let on_drag_over_lane =
      props.on_drag_over_lane.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        event.stop_propagation();
        on_drag_over_lane.emit(column);
      }
    )
  };

  let ondrop = {
    let on_drop = props.on_drop.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        event.stop_propagation();
        on_drop.emit(column);
      }
    )
  };

  html! {
      <div class={classes!("kanban-column", props.is_drop_hint.then_some("drop-hint"))} data-column={column.slug()}>
          <div class="kanban-column-header">
              <span>{ column.label() }</span>
              <span class="badge">{ props.lane.cards.len() }</span>
          </div>
          <div class="kanban-column-body" {ondragover} {ondragenter} {ondrop}>
              {
                  if props.lane.shows_placeholder() {
                      html! { <div class="kanban-empty">{ "No tasks" }</div> }
                  } else {
                      html! {
                          <>
                              {
                                  for props.lane.cards.iter().map(|card| html! {
                                      <KanbanCard
                                          key={card.id.as_str()}
                                          card={card.clone()}
                                          is_dragging={props.dragging_task.as_ref() == Some(&card.id)}
                                          on_drag_start={props.on_drag_start.clone()}
                                          on_drag_end={props.on_drag_end.clone()}
                                          on_open={props.on_open.clone()}
                                          on_toggle_importance={props.on_toggle_importance.clone()}
                                      />
                                  })
                              }
                          </>
                      }
                  }
              }
          </div>
      </div>
  }
}
