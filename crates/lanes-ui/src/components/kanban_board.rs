use lanes_core::drag::DropTarget;
use lanes_core::{
  Board,
  Column,
  TaskId
};
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_state
};

use super::KanbanColumn;

#[derive(Properties, PartialEq)]
pub struct KanbanBoardProps {
  pub board:                Board,
  pub dragging_task:        Option<TaskId>,
  pub on_drag_start:        Callback<TaskId>,
  pub on_drag_end:          Callback<()>,
  pub on_drop: Callback<DropTarget>,
  pub on_open:              Callback<TaskId>,
  pub on_toggle_importance: Callback<TaskId>
}

#[function_component(KanbanBoard)]
pub fn kanban_board(
  props: &KanbanBoardProps
) -> Html {
  let drag_over_lane =
    use_state(|| None::<Column>);

  let on_drag_over_lane = {
    let drag_over_lane =
      drag_over_lane.clone();
    Callback::from(move |column: Column| {
      if *drag_over_lane != Some(column) {
        drag_over_lane.set(Some(column));
      }
    })
  };

  let on_lane_drop = {
    let drag_over_lane =
      drag_over_lane.clone();
    let on_drop = props.on_drop.clone();
    Callback::from(move |column: Column| {
      drag_over_lane.set(None);
      on_drop.emit(DropTarget::Lane(column));
    })
  };

  let on_drag_end = {
    let drag_over_lane =
      drag_over_lane.clone();
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(move |()| {
      drag_over_lane.set(None);
      on_drag_end.emit(());
    })
  };

  // Anything that reaches the board itself
  // missed every lane body.
  let ondragover =
    Callback::from(|event: DragEvent| {
      event.prevent_default();
    });
  let ondrop = {
    let drag_over_lane =
      drag_over_lane.clone();
    let on_drop = props.on_drop.clone();
    Callback::from(move |event: DragEvent| {
      event.prevent_default();
      drag_over_lane.set(None);
      on_drop.emit(DropTarget::Outside);
    })
  };

  html! {
      <div class="kanban-board" {ondragover} {ondrop}>
          {
              for props.board.lanes().iter().map(|lane| html! {
                  <KanbanColumn
                      key={lane.column.slug()}
                      lane={lane.clone()}
                      dragging_task={props.dragging_task.clone()}
                      is_drop_hint={*drag_over_lane == Some(lane.column)}
                      on_drag_over_lane={on_drag_over_lane.clone()}
                      on_drop={on_lane_drop.clone()}
                      on_drag_start={props.on_drag_start.clone()}
                      on_drag_end={on_drag_end.clone()}
                      on_open={props.on_open.clone()}
                      on_toggle_importance={props.on_toggle_importance.clone()}
                  />
              })
          }
      </div>
  }
}
