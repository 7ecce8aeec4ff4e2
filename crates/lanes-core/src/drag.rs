use lanes_shared::{
  Column,
  TaskId
};

/// Where a drag gesture ended. Each lane
/// body maps to its own column; anything
/// else is `Outside`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
  Lane(Column),
  Outside
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
  #[default]
  Idle,
  Dragging {
    task:   TaskId,
    origin: Column
  },
  /// Dropped on a lane, move request in
  /// flight.
  Dropped {
    task:   TaskId,
    target: Column
  }
}

/// A drop that should become a move
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveIntent {
  pub task: TaskId,
  pub from: Column,
  pub to:   Column
}

impl DragState {
  pub fn start(
    &mut self,
    task: TaskId,
    origin: Column
  ) {
    *self =
      Self::Dragging { task, origin };
  }

  /// The card carrying the "dragging"
  /// decoration, if any.
  pub fn dragging_task(
    &self
  ) -> Option<&TaskId> {
    match self {
      | Self::Dragging { task, .. } => {
        Some(task)
      }
      | _ => None
    }
  }

  /// Gesture ended without a drop.
  pub fn end(&mut self) {
    if matches!(self, Self::Dragging { .. })
    {
      *self = Self::Idle;
    }
  }

  /// Finish the gesture. Only a drop on a
  /// lane while dragging yields a move.
  pub fn drop_on(
    &mut self,
    target: DropTarget
  ) -> Option<MoveIntent> {
    let Self::Dragging { task, origin } =
      std::mem::take(self)
    else {
      return None;
    };
    match target {
      | DropTarget::Lane(column) => {
        *self = Self::Dropped {
          task:   task.clone(),
          target: column
        };
        Some(MoveIntent {
          task,
          from: origin,
          to: column
        })
      }
      | DropTarget::Outside => None
    }
  }

  /// Move request for `task` settled.
  pub fn settle(&mut self, task: &TaskId) {
    if matches!(
      &*self,
      Self::Dropped { task: pending, .. }
        if pending == task
    ) {
      *self = Self::Idle;
    }
  }
}
