use std::cell::RefCell;
use std::rc::Rc;

use lanes_shared::{
  Column,
  CreateTaskForm,
  DeleteTaskForm,
  ListId,
  MoveTaskForm,
  TaskId,
  TaskQuery,
  ToggleImportanceForm
};
use tracing::{
  debug,
  info,
  warn
};

use crate::api::TaskApi;
use crate::board::Board;
use crate::busy::Busy;
use crate::drag::{
  DragState,
  DropTarget
};
use crate::error::{
  ApiError,
  BoardError
};
use crate::modal::{
  EditForm,
  ModalState
};
use crate::notice::Notices;
use crate::reconcile::reconcile;
use crate::task::{
  TaskDetails,
  TaskView
};

/// Called after every state change so the
/// view can re-render.
pub type Notifier = Rc<dyn Fn()>;

const MOVE_FAILED: &str =
  "Failed to update task. Please try again.";
const IMPORTANCE_FAILED: &str =
  "Failed to update task importance. Please try again.";
const DETAILS_FAILED: &str =
  "Failed to load task details. Please try again.";
const SAVE_FAILED: &str =
  "Failed to save task. Please try again.";
const CREATE_FAILED: &str =
  "Failed to create task. Please try again.";
const DELETE_FAILED: &str =
  "Failed to delete task. Please try again.";
const EMPTY_TITLE: &str =
  "Task title cannot be empty";

/// Everything the board view renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
  pub board:   Board,
  pub modal:   ModalState,
  pub drag:    DragState,
  pub notices: Notices
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
  Ignored,
  Moved(Column)
}

/// The board's single owner of state,
/// transport and busy indicator. Built once
/// at startup and shared by reference with
/// every handler.
///
/// State borrows never span an `.await`;
/// the last response to arrive wins.
pub struct Controller<A> {
  api:     A,
  list_id: ListId,
  state:   RefCell<BoardState>,
  busy:    Busy,
  notify:  Notifier
}

impl<A: TaskApi> Controller<A> {
  pub fn new(
    api: A,
    list_id: ListId,
    board: Board,
    dismiss_ms: u32,
    notify: Notifier
  ) -> Self {
    Self {
      api,
      list_id,
      state: RefCell::new(BoardState {
        board,
        modal: ModalState::Closed,
        drag: DragState::Idle,
        notices: Notices::new(dismiss_ms)
      }),
      busy: Busy::new(notify.clone()),
      notify
    }
  }

  pub fn snapshot(&self) -> BoardState {
    self.state.borrow().clone()
  }

  pub fn is_busy(&self) -> bool {
    self.busy.is_busy()
  }

  fn read<R>(
    &self,
    f: impl FnOnce(&BoardState) -> R
  ) -> R {
    f(&self.state.borrow())
  }

  fn update<R>(
    &self,
    f: impl FnOnce(&mut BoardState) -> R
  ) -> R {
    let result = {
      let mut state =
        self.state.borrow_mut();
      f(&mut state)
    };
    (self.notify)();
    result
  }

  pub fn dismiss_notice(&self, id: u64) {
    self.update(|state| {
      state.notices.dismiss(id);
    });
  }

  pub fn drag_start(&self, task: &TaskId) {
    self.update(|state| {
      match state.board.column_of(task) {
        | Some(origin) => {
          debug!(%task, %origin, "drag start");
          state.drag.start(task.clone(), origin);
        }
        | None => {
          debug!(%task, "drag start for unknown card ignored");
        }
      }
    });
  }

  pub fn drag_end(&self) {
    self.update(|state| state.drag.end());
  }

  /// Finish a drag gesture. Drops outside a
  /// lane, or of a card that has left the
  /// board, change nothing.
  #[tracing::instrument(skip(self))]
  pub async fn drop_on(
    &self,
    target: DropTarget
  ) -> Result<DropOutcome, BoardError> {
    let intent = self.update(|state| {
      let intent = state.drag.drop_on(target)?;
      if state.board.card(&intent.task).is_none() {
        state.drag.settle(&intent.task);
        return None;
      }
      Some(intent)
    });
    let Some(intent) = intent else {
      debug!("drop ignored");
      return Ok(DropOutcome::Ignored);
    };

    let form = MoveTaskForm {
      list_id: self.list_id.clone(),
      task_id: intent.task.clone(),
      column:  intent.to
    };
    let _busy = self.busy.begin();
    let result = self.api.move_task(&form).await;

    self.update(|state| {
      state.drag.settle(&intent.task);
      match result {
        | Ok(()) => {
          if let Some(card) =
            state.board.card(&intent.task)
          {
            let view = card.view_with_progress(
              intent.to.progress()
            );
            reconcile(&mut state.board, &view);
          }
          info!(
            task = %intent.task,
            from = %intent.from,
            to = %intent.to,
            "task moved"
          );
          state
            .notices
            .success("Task moved successfully!");
          Ok(DropOutcome::Moved(intent.to))
        }
        | Err(error) => {
          warn!(task = %intent.task, %error, "move failed");
          state
            .notices
            .error(error.user_message(MOVE_FAILED));
          Err(error.into())
        }
      }
    })
  }

  /// Flip the importance flag once the
  /// server has accepted it. Returns the new
  /// value.
  #[tracing::instrument(skip(self))]
  pub async fn toggle_importance(
    &self,
    task: &TaskId
  ) -> Result<bool, BoardError> {
    let Some(current) = self.read(|state| {
      state
        .board
        .card(task)
        .map(|card| card.important)
    }) else {
      return Err(BoardError::CardNotFound(
        task.clone()
      ));
    };
    let important = !current;
    let form = ToggleImportanceForm {
      list_id:      self.list_id.clone(),
      task_id:      task.clone(),
      is_important: important
    };

    let _busy = self.busy.begin();
    let result =
      self.api.toggle_importance(&form).await;

    self.update(|state| match result {
      | Ok(()) => {
        let view = state
          .board
          .column_of(task)
          .zip(state.board.card(task))
          .map(|(column, card)| {
            let mut view = card
              .view_with_progress(
                column.progress()
              );
            view.important = important;
            view
          });
        if let Some(view) = view {
          reconcile(&mut state.board, &view);
        }
        info!(%task, important, "importance toggled");
        state.notices.success(if important {
          "Task marked as important"
        } else {
          "Task importance removed"
        });
        Ok(important)
      }
      | Err(error) => {
        warn!(%task, %error, "importance toggle failed");
        state
          .notices
          .error(error.user_message(IMPORTANCE_FAILED));
        Err(error.into())
      }
    })
  }

  /// Create a task and append a default
  /// card under Not Started without
  /// re-fetching it.
  #[tracing::instrument(skip(self))]
  pub async fn create_task(
    &self,
    title: &str
  ) -> Result<TaskId, BoardError> {
    let title = title.trim();
    if title.is_empty() {
      self.update(|state| {
        state.notices.error(EMPTY_TITLE);
      });
      return Err(BoardError::EmptyTitle);
    }
    let form = CreateTaskForm {
      list_id: self.list_id.clone(),
      title:   title.to_string()
    };

    let _busy = self.busy.begin();
    let result = self
      .api
      .create_task(&form)
      .await
      .and_then(|created| {
        let id = created.task_id.trim();
        if id.is_empty() {
          Err(ApiError::Decode(
            "response has no taskId"
              .to_string()
          ))
        } else {
          Ok(TaskId::new(id))
        }
      });

    self.update(|state| match result {
      | Ok(id) => {
        let view = TaskView::new_default(
          id.clone(),
          title
        );
        reconcile(&mut state.board, &view);
        info!(task = %id, "task created");
        state
          .notices
          .success("Task created successfully");
        Ok(id)
      }
      | Err(error) => {
        warn!(%error, "create failed");
        state
          .notices
          .error(error.user_message(CREATE_FAILED));
        Err(error.into())
      }
    })
  }

  /// Open the modal in view mode. The modal
  /// stays closed if the details cannot be
  /// loaded.
  #[tracing::instrument(skip(self))]
  pub async fn open_task(
    &self,
    task: &TaskId
  ) -> Result<(), BoardError> {
    if self.read(|state| {
      state.board.card(task).is_none()
    }) {
      self.update(|state| {
        state.notices.error(DETAILS_FAILED);
      });
      return Err(BoardError::CardNotFound(
        task.clone()
      ));
    }

    let _busy = self.busy.begin();
    let result = self.fetch_details(task).await;

    self.update(|state| match result {
      | Ok(details) => {
        debug!(%task, "modal opened");
        state.modal = ModalState::Viewing(details);
        Ok(())
      }
      | Err(error) => {
        warn!(%task, %error, "details fetch failed");
        state
          .notices
          .error(error.user_message(DETAILS_FAILED));
        Err(error.into())
      }
    })
  }

  pub fn begin_edit(
    &self
  ) -> Result<(), BoardError> {
    self.update(|state| state.modal.begin_edit())
  }

  pub fn cancel_edit(
    &self
  ) -> Result<(), BoardError> {
    self.update(|state| state.modal.cancel_edit())
  }

  /// Apply a change from an edit form input.
  pub fn edit_form(
    &self,
    f: impl FnOnce(&mut EditForm)
  ) {
    self.update(|state| {
      if let Some(form) = state.modal.form_mut() {
        f(form);
      }
    });
  }

  /// Close from view mode. Refused while
  /// editing; the form is left untouched.
  pub fn close_modal(
    &self
  ) -> Result<(), BoardError> {
    self.update(|state| {
      let mode = state.modal.mode_name();
      let result = state.modal.close();
      match &result {
        | Ok(()) => debug!(mode, "modal closed"),
        | Err(_) => {
          debug!(mode, "close ignored while editing")
        }
      }
      result
    })
  }

  /// Submit the edit form. On success the
  /// task is re-fetched, its card reconciled
  /// and the modal returns to view mode. On
  /// any failure the modal stays in edit
  /// mode with the form untouched.
  #[tracing::instrument(skip(self))]
  pub async fn save_edit(
    &self
  ) -> Result<(), BoardError> {
    let editing = self.read(|state| {
      match &state.modal {
        | ModalState::Editing {
          snapshot,
          form
        } => Some((
          snapshot.id.clone(),
          form.clone()
        )),
        | _ => None
      }
    });
    let Some((task, form)) = editing else {
      return Err(BoardError::WrongMode {
        expected: "edit"
      });
    };

    let update = match form
      .to_update(self.list_id.clone(), task.clone())
    {
      | Ok(update) => update,
      | Err(error) => {
        self.update(|state| {
          state.notices.error(EMPTY_TITLE);
        });
        return Err(error);
      }
    };

    let _busy = self.busy.begin();
    if let Err(error) =
      self.api.update_task_details(&update).await
    {
      warn!(%task, %error, "save failed");
      self.update(|state| {
        state
          .notices
          .error(error.user_message(SAVE_FAILED));
      });
      return Err(error.into());
    }

    let refreshed = self.fetch_details(&task).await;
    self.update(|state| match refreshed {
      | Ok(details) => {
        reconcile(&mut state.board, &details.view());
        if state.modal.task_id() == Some(&task) {
          state.modal = ModalState::Viewing(details);
        }
        info!(%task, "task updated");
        state
          .notices
          .success("Task updated successfully");
        Ok(())
      }
      | Err(error) => {
        warn!(%task, %error, "reload after save failed");
        state.notices.error(format!(
          "Task saved, but reloading it failed: {}",
          error.user_message(DETAILS_FAILED)
        ));
        Err(error.into())
      }
    })
  }

  /// Delete the task shown in view mode.
  #[tracing::instrument(skip(self))]
  pub async fn delete_open_task(
    &self
  ) -> Result<(), BoardError> {
    let task = self.read(|state| {
      match &state.modal {
        | ModalState::Viewing(details) => {
          Some(details.id.clone())
        }
        | _ => None
      }
    });
    let Some(task) = task else {
      return Err(BoardError::NoOpenTask);
    };
    let form = DeleteTaskForm {
      list_id: self.list_id.clone(),
      task_id: task.clone()
    };

    let _busy = self.busy.begin();
    let result = self.api.delete_task(&form).await;

    self.update(|state| match result {
      | Ok(()) => {
        state.board.remove(&task);
        if state.modal.task_id() == Some(&task) {
          state.modal = ModalState::Closed;
        }
        info!(%task, "task deleted");
        state.notices.success("Task deleted");
        Ok(())
      }
      | Err(error) => {
        warn!(%task, %error, "delete failed");
        state
          .notices
          .error(error.user_message(DELETE_FAILED));
        Err(error.into())
      }
    })
  }

  async fn fetch_details(
    &self,
    task: &TaskId
  ) -> Result<TaskDetails, ApiError> {
    let query = TaskQuery {
      list_id: self.list_id.clone(),
      task_id: task.clone()
    };
    let dto = self.api.task_details(&query).await?;
    Ok(TaskDetails::from_dto(task.clone(), dto))
  }
}
