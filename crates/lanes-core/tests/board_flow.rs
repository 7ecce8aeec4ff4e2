use std::cell::RefCell;
use std::collections::{
  BTreeMap,
  BTreeSet
};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{
  Context,
  Poll
};

use futures::executor::block_on;
use lanes_core::controller::DropOutcome;
use lanes_core::drag::DropTarget;
use lanes_core::modal::ModalState;
use lanes_core::notice::NoticeKind;
use lanes_core::reconcile::reconcile;
use lanes_core::task::TaskView;
use lanes_core::{
  ApiError,
  Board,
  BoardError,
  Column,
  Controller,
  ListId,
  Progress,
  TaskApi,
  TaskId
};
use lanes_shared::{
  CreateTaskForm,
  CreatedTaskDto,
  DOING_CATEGORY,
  DeleteTaskForm,
  MoveTaskForm,
  TaskDetailsDto,
  TaskQuery,
  ToggleImportanceForm,
  UpdateTaskDetailsForm,
  is_doing_category
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
  Move(MoveTaskForm),
  Toggle(ToggleImportanceForm),
  Details(TaskQuery),
  Update(UpdateTaskDetailsForm),
  Create(CreateTaskForm),
  Delete(DeleteTaskForm)
}

/// In-memory stand-in for the task server,
/// applying the same status/category rules.
#[derive(Default)]
struct FakeServer {
  tasks:   RefCell<BTreeMap<String, TaskDetailsDto>>,
  calls:   RefCell<Vec<Call>>,
  failing: RefCell<BTreeSet<&'static str>>,
  next_id: RefCell<u32>,
  /// Update requests stay pending while set.
  holding: RefCell<bool>
}

impl FakeServer {
  fn insert(
    &self,
    id: &str,
    status: &str,
    categories: &[&str]
  ) {
    self.tasks.borrow_mut().insert(
      id.to_string(),
      TaskDetailsDto {
        id: Some(id.to_string()),
        title: format!("task {id}"),
        status: status.to_string(),
        importance: "normal".to_string(),
        due_date_time: None,
        due_date_time_raw: None,
        categories: Some(
          categories
            .iter()
            .map(|c| c.to_string())
            .collect()
        )
      }
    );
  }

  fn fail(&self, endpoint: &'static str) {
    self.failing.borrow_mut().insert(endpoint);
  }

  fn hold_updates(&self, hold: bool) {
    *self.holding.borrow_mut() = hold;
  }

  fn check(
    &self,
    endpoint: &'static str
  ) -> Result<(), ApiError> {
    if self.failing.borrow().contains(endpoint) {
      return Err(ApiError::Server {
        status:  500,
        message: format!("{endpoint} unavailable")
      });
    }
    Ok(())
  }

  fn task(&self, id: &str) -> TaskDetailsDto {
    self
      .tasks
      .borrow()
      .get(id)
      .cloned()
      .expect("task on server")
  }

  fn calls(&self) -> Vec<Call> {
    self.calls.borrow().clone()
  }
}

struct FakeApi(Rc<FakeServer>);

impl TaskApi for FakeApi {
  async fn move_task(
    &self,
    form: &MoveTaskForm
  ) -> Result<(), ApiError> {
    let server = &self.0;
    server
      .calls
      .borrow_mut()
      .push(Call::Move(form.clone()));
    server.check("move")?;
    let mut tasks = server.tasks.borrow_mut();
    let task = tasks
      .get_mut(form.task_id.as_str())
      .ok_or_else(|| ApiError::Server {
        status:  404,
        message: "Task not found".to_string()
      })?;
    let mut categories: Vec<String> = task
      .categories
      .take()
      .unwrap_or_default()
      .into_iter()
      .filter(|c| !is_doing_category(c))
      .collect();
    task.status = match form.column {
      | Column::Done => "completed",
      | Column::Doing => {
        categories
          .push(DOING_CATEGORY.to_string());
        "notStarted"
      }
      | Column::NotStarted => "notStarted"
    }
    .to_string();
    task.categories = Some(categories);
    Ok(())
  }

  async fn toggle_importance(
    &self,
    form: &ToggleImportanceForm
  ) -> Result<(), ApiError> {
    let server = &self.0;
    server
      .calls
      .borrow_mut()
      .push(Call::Toggle(form.clone()));
    server.check("toggle")?;
    if let Some(task) = server
      .tasks
      .borrow_mut()
      .get_mut(form.task_id.as_str())
    {
      task.importance = if form.is_important {
        "high"
      } else {
        "normal"
      }
      .to_string();
    }
    Ok(())
  }

  async fn task_details(
    &self,
    query: &TaskQuery
  ) -> Result<TaskDetailsDto, ApiError> {
    let server = &self.0;
    server
      .calls
      .borrow_mut()
      .push(Call::Details(query.clone()));
    server.check("details")?;
    server
      .tasks
      .borrow()
      .get(query.task_id.as_str())
      .cloned()
      .ok_or_else(|| ApiError::Server {
        status:  404,
        message: String::new()
      })
  }

  async fn update_task_details(
    &self,
    form: &UpdateTaskDetailsForm
  ) -> Result<(), ApiError> {
    let server = &self.0;
    server
      .calls
      .borrow_mut()
      .push(Call::Update(form.clone()));
    futures::future::poll_fn(|_| {
      if *server.holding.borrow() {
        Poll::Pending
      } else {
        Poll::Ready(())
      }
    })
    .await;
    server.check("update")?;
    if let Some(task) = server
      .tasks
      .borrow_mut()
      .get_mut(form.task_id.as_str())
    {
      task.title = form.title.clone();
      task.status =
        if form.status == Progress::Completed {
          "completed"
        } else {
          "notStarted"
        }
        .to_string();
      task.importance =
        form.importance.as_wire().to_string();
      if let Some(due) = &form.due_date {
        task.due_date_time_raw =
          Some(format!("{due}T00:00:00Z"));
      }
      task.categories =
        Some(form.categories.clone());
    }
    Ok(())
  }

  async fn create_task(
    &self,
    form: &CreateTaskForm
  ) -> Result<CreatedTaskDto, ApiError> {
    let server = &self.0;
    server
      .calls
      .borrow_mut()
      .push(Call::Create(form.clone()));
    server.check("create")?;
    let id = {
      let mut next = server.next_id.borrow_mut();
      *next += 1;
      format!("new-{next}")
    };
    server.insert(&id, "notStarted", &[]);
    Ok(CreatedTaskDto { task_id: id })
  }

  async fn delete_task(
    &self,
    form: &DeleteTaskForm
  ) -> Result<(), ApiError> {
    let server = &self.0;
    server
      .calls
      .borrow_mut()
      .push(Call::Delete(form.clone()));
    server.check("delete")?;
    server
      .tasks
      .borrow_mut()
      .remove(form.task_id.as_str());
    Ok(())
  }
}

struct Harness {
  server:     Rc<FakeServer>,
  controller: Controller<FakeApi>
}

/// Board and server seeded with the same
/// tasks: (id, status, comma-separated
/// categories).
fn harness(
  tasks: &[(&str, &str, &str)]
) -> Harness {
  let server = Rc::new(FakeServer::default());
  let mut board = Board::new();
  for (id, status, categories) in tasks {
    let categories: Vec<&str> = categories
      .split(',')
      .filter(|c| !c.is_empty())
      .collect();
    server.insert(id, status, &categories);
    let dto = server.task(id);
    let details =
      lanes_core::task::TaskDetails::from_dto(
        TaskId::new(*id),
        dto
      );
    reconcile(&mut board, &details.view());
  }
  let controller = Controller::new(
    FakeApi(server.clone()),
    ListId::new("L"),
    board,
    3_000,
    Rc::new(|| {})
  );
  Harness { server, controller }
}

/// Single poll with a no-op waker; lets a
/// test interleave work with a pending
/// request.
fn poll_once<F: Future>(
  future: Pin<&mut F>
) -> Poll<F::Output> {
  let waker = futures::task::noop_waker();
  let mut cx = Context::from_waker(&waker);
  future.poll(&mut cx)
}

fn id(raw: &str) -> TaskId {
  TaskId::new(raw)
}

fn last_notice(
  controller: &Controller<FakeApi>
) -> (NoticeKind, String) {
  let state = controller.snapshot();
  let notice = state
    .notices
    .latest()
    .expect("a notice was posted");
  (notice.kind, notice.message.clone())
}

#[test]
fn dragging_not_started_card_to_doing_adds_doing_tag(
) {
  let h = harness(&[(
    "T",
    "notStarted",
    "home"
  )]);
  h.controller.drag_start(&id("T"));
  let outcome = block_on(
    h.controller
      .drop_on(DropTarget::Lane(Column::Doing))
  )
  .expect("move succeeds");
  assert_eq!(outcome, DropOutcome::Moved(Column::Doing));

  assert_eq!(h.server.calls(), vec![Call::Move(
    MoveTaskForm {
      list_id: ListId::new("L"),
      task_id: id("T"),
      column:  Column::Doing
    }
  )]);
  let state = h.controller.snapshot();
  assert_eq!(
    state.board.column_of(&id("T")),
    Some(Column::Doing)
  );
  let card =
    state.board.card(&id("T")).expect("card");
  assert_eq!(card.tags, vec![
    "home".to_string(),
    "Doing".to_string()
  ]);
  assert!(!card.completed);
  assert_eq!(state.drag.dragging_task(), None);
  assert!(!h.controller.is_busy());
  assert_eq!(
    last_notice(&h.controller),
    (
      NoticeKind::Success,
      "Task moved successfully!".to_string()
    )
  );
}

#[test]
fn dragging_doing_card_back_to_not_started_drops_tag(
) {
  let h = harness(&[(
    "T",
    "notStarted",
    "Doing,work"
  )]);
  h.controller.drag_start(&id("T"));
  block_on(h.controller.drop_on(DropTarget::Lane(
    Column::NotStarted
  )))
  .expect("move succeeds");

  let state = h.controller.snapshot();
  let card =
    state.board.card(&id("T")).expect("card");
  assert_eq!(card.tags, vec!["work".to_string()]);
  assert!(!card.completed);
  assert_eq!(
    state.board.column_of(&id("T")),
    Some(Column::NotStarted)
  );
  assert!(
    state.board.lane(Column::Doing).shows_placeholder()
  );
}

#[test]
fn dropping_outside_a_lane_changes_nothing(
) {
  let h =
    harness(&[("T", "notStarted", "")]);
  let before = h.controller.snapshot().board;
  h.controller.drag_start(&id("T"));
  assert_eq!(
    h.controller.snapshot().drag.dragging_task(),
    Some(&id("T"))
  );

  let outcome = block_on(
    h.controller.drop_on(DropTarget::Outside)
  )
  .expect("ignored drop is not an error");
  assert_eq!(outcome, DropOutcome::Ignored);
  let state = h.controller.snapshot();
  assert_eq!(state.board, before);
  assert_eq!(state.drag.dragging_task(), None);
  assert!(h.server.calls().is_empty());
  assert_eq!(
    h.server.task("T").status,
    "notStarted"
  );
}

#[test]
fn failed_move_leaves_card_in_place(
) {
  let h = harness(&[("T", "notStarted", "")]);
  h.server.fail("move");
  h.controller.drag_start(&id("T"));
  let result = block_on(
    h.controller
      .drop_on(DropTarget::Lane(Column::Done))
  );
  assert!(matches!(result, Err(BoardError::Api(_))));

  let state = h.controller.snapshot();
  assert_eq!(
    state.board.column_of(&id("T")),
    Some(Column::NotStarted)
  );
  assert!(!h.controller.is_busy());
  assert_eq!(
    last_notice(&h.controller),
    (NoticeKind::Error, "move unavailable".to_string())
  );
}

#[test]
fn toggling_importance_twice_restores_original_state(
) {
  let h =
    harness(&[("T", "notStarted", "")]);
  let original = h.controller.snapshot().board;

  assert_eq!(
    block_on(h.controller.toggle_importance(&id("T"))),
    Ok(true)
  );
  assert!(
    h.controller
      .snapshot()
      .board
      .card(&id("T"))
      .expect("card")
      .important
  );
  assert_eq!(
    last_notice(&h.controller).1,
    "Task marked as important"
  );

  assert_eq!(
    block_on(h.controller.toggle_importance(&id("T"))),
    Ok(false)
  );
  assert_eq!(h.controller.snapshot().board, original);
  assert_eq!(h.server.task("T").importance, "normal");
  assert_eq!(h.server.calls().len(), 2);
}

#[test]
fn failed_importance_toggle_leaves_decoration(
) {
  let h =
    harness(&[("T", "notStarted", "")]);
  h.server.fail("toggle");
  let before = h.controller.snapshot().board;
  assert!(
    block_on(h.controller.toggle_importance(&id("T")))
      .is_err()
  );
  assert_eq!(h.controller.snapshot().board, before);
  assert!(!h.controller.is_busy());
}

#[test]
fn blank_title_is_rejected_before_any_request(
) {
  let h = harness(&[]);
  assert_eq!(
    block_on(h.controller.create_task("   ")),
    Err(BoardError::EmptyTitle)
  );
  assert!(h.server.calls().is_empty());
  assert_eq!(
    last_notice(&h.controller),
    (
      NoticeKind::Error,
      "Task title cannot be empty".to_string()
    )
  );
}

#[test]
fn created_task_is_appended_under_not_started(
) {
  let h =
    harness(&[("A", "notStarted", "home")]);
  let created = block_on(
    h.controller.create_task("  Water plants ")
  )
  .expect("create succeeds");

  assert_eq!(h.server.calls(), vec![Call::Create(
    CreateTaskForm {
      list_id: ListId::new("L"),
      title:   "Water plants".to_string()
    }
  )]);
  let state = h.controller.snapshot();
  let lane = state.board.lane(Column::NotStarted);
  assert_eq!(
    lane.cards.last().map(|card| &card.id),
    Some(&created)
  );
  let card = lane.cards.last().expect("card");
  assert_eq!(card.title, "Water plants");
  assert!(!card.important);
  assert!(!card.completed);
  assert!(card.tags.is_empty());
}

#[test]
fn completing_a_task_through_edit_moves_it_to_done(
) {
  let h = harness(&[(
    "T",
    "notStarted",
    "Doing,errands"
  )]);
  block_on(h.controller.open_task(&id("T")))
    .expect("details load");
  h.controller.begin_edit().expect("edit mode");
  h.controller.edit_form(|form| {
    form.status = Progress::Completed;
    form.categories = String::new();
  });
  block_on(h.controller.save_edit())
    .expect("save succeeds");

  let calls = h.server.calls();
  let Some(Call::Update(update)) = calls.get(1)
  else {
    panic!("expected an update call, got {calls:?}");
  };
  assert!(update.categories.is_empty());
  assert!(matches!(calls.get(2), Some(Call::Details(_))));

  let state = h.controller.snapshot();
  assert_eq!(
    state.board.column_of(&id("T")),
    Some(Column::Done)
  );
  let card =
    state.board.card(&id("T")).expect("card");
  assert!(card.completed);
  assert!(!card.tags.iter().any(|t| t == "Doing"));
  let ModalState::Viewing(details) = &state.modal
  else {
    panic!("expected view mode");
  };
  assert_eq!(details.progress, Progress::Completed);
  assert_eq!(
    last_notice(&h.controller).1,
    "Task updated successfully"
  );
}

#[test]
fn failed_save_keeps_edit_form_intact(
) {
  let h =
    harness(&[("T", "notStarted", "")]);
  block_on(h.controller.open_task(&id("T")))
    .expect("details load");
  h.controller.begin_edit().expect("edit mode");
  h.controller.edit_form(|form| {
    form.title = "Renamed".to_string();
    form.categories = "home, work".to_string();
  });
  h.server.fail("update");

  assert!(block_on(h.controller.save_edit()).is_err());
  let state = h.controller.snapshot();
  let ModalState::Editing { form, .. } = &state.modal
  else {
    panic!("expected edit mode");
  };
  assert_eq!(form.title, "Renamed");
  assert_eq!(form.categories, "home, work");
  assert_eq!(
    state.board.card(&id("T")).expect("card").title,
    "task T"
  );
  assert_eq!(
    last_notice(&h.controller).0,
    NoticeKind::Error
  );
  assert!(!h.controller.is_busy());
}

#[test]
fn saving_blank_title_stays_in_edit_without_request(
) {
  let h =
    harness(&[("T", "notStarted", "")]);
  block_on(h.controller.open_task(&id("T")))
    .expect("details load");
  h.controller.begin_edit().expect("edit mode");
  h.controller.edit_form(|form| {
    form.title = " ".to_string();
  });

  assert_eq!(
    block_on(h.controller.save_edit()),
    Err(BoardError::EmptyTitle)
  );
  assert_eq!(
    h.controller.snapshot().modal.mode_name(),
    "edit"
  );
  assert_eq!(h.server.calls().len(), 1);
}

#[test]
fn cancel_returns_to_view_without_network(
) {
  let h =
    harness(&[("T", "notStarted", "")]);
  block_on(h.controller.open_task(&id("T")))
    .expect("details load");
  h.controller.begin_edit().expect("edit mode");
  h.controller.edit_form(|form| {
    form.title = "Draft".to_string();
  });
  h.controller.cancel_edit().expect("cancel");

  let state = h.controller.snapshot();
  let ModalState::Viewing(details) = &state.modal
  else {
    panic!("expected view mode");
  };
  assert_eq!(details.title, "task T");
  assert_eq!(h.server.calls().len(), 1);
  h.controller
    .close_modal()
    .expect("close from view");
  assert!(!h.controller.snapshot().modal.is_open());
}

#[test]
fn failed_details_fetch_keeps_modal_closed(
) {
  let h =
    harness(&[("T", "notStarted", "")]);
  h.server.fail("details");
  assert!(block_on(h.controller.open_task(&id("T"))).is_err());
  assert!(!h.controller.snapshot().modal.is_open());
  assert_eq!(
    last_notice(&h.controller).0,
    NoticeKind::Error
  );

  assert_eq!(
    block_on(h.controller.open_task(&id("missing"))),
    Err(BoardError::CardNotFound(id("missing")))
  );
}

#[test]
fn deleting_open_task_removes_card_and_closes_modal(
) {
  let h =
    harness(&[("T", "completed", "")]);
  block_on(h.controller.open_task(&id("T")))
    .expect("details load");
  block_on(h.controller.delete_open_task())
    .expect("delete succeeds");

  let state = h.controller.snapshot();
  assert!(state.board.is_empty());
  assert!(state.board.lane(Column::Done).shows_placeholder());
  assert!(!state.modal.is_open());
  assert!(!h.server.tasks.borrow().contains_key("T"));
}

#[test]
fn new_task_view_defaults_to_not_started(
) {
  let view = TaskView::new_default(id("X"), "Fresh");
  assert_eq!(view.column(), Column::NotStarted);
}

#[test]
fn close_while_editing_keeps_typed_changes(
) {
  let h =
    harness(&[("T", "notStarted", "")]);
  block_on(h.controller.open_task(&id("T")))
    .expect("details load");
  h.controller.begin_edit().expect("edit mode");
  h.controller.edit_form(|form| {
    form.title = "Half typed".to_string();
  });

  assert_eq!(
    h.controller.close_modal(),
    Err(BoardError::WrongMode {
      expected: "view"
    })
  );
  let state = h.controller.snapshot();
  let ModalState::Editing { form, .. } = &state.modal
  else {
    panic!("expected edit mode");
  };
  assert_eq!(form.title, "Half typed");
  assert_eq!(h.server.calls().len(), 1);
}

#[test]
fn save_landing_after_another_task_opened_only_reconciles_card(
) {
  let h = harness(&[
    ("T", "notStarted", ""),
    ("U", "notStarted", "")
  ]);
  block_on(h.controller.open_task(&id("T")))
    .expect("details load");
  h.controller.begin_edit().expect("edit mode");
  h.controller.edit_form(|form| {
    form.title = "Renamed".to_string();
    form.status = Progress::Completed;
  });

  h.server.hold_updates(true);
  let mut save = Box::pin(h.controller.save_edit());
  assert!(poll_once(save.as_mut()).is_pending());
  assert!(h.controller.is_busy());

  h.controller.cancel_edit().expect("cancel");
  h.controller
    .close_modal()
    .expect("close from view");
  block_on(h.controller.open_task(&id("U")))
    .expect("details load");

  h.server.hold_updates(false);
  let Poll::Ready(result) =
    poll_once(save.as_mut())
  else {
    panic!("save still pending after release");
  };
  assert_eq!(result, Ok(()));
  drop(save);

  let state = h.controller.snapshot();
  let card =
    state.board.card(&id("T")).expect("card");
  assert_eq!(card.title, "Renamed");
  assert_eq!(
    state.board.column_of(&id("T")),
    Some(Column::Done)
  );
  let ModalState::Viewing(details) = &state.modal
  else {
    panic!("expected view mode");
  };
  assert_eq!(details.id, id("U"));
  assert!(!h.controller.is_busy());
}

#[test]
fn save_landing_after_modal_closed_leaves_it_closed(
) {
  let h =
    harness(&[("T", "notStarted", "")]);
  block_on(h.controller.open_task(&id("T")))
    .expect("details load");
  h.controller.begin_edit().expect("edit mode");
  h.controller.edit_form(|form| {
    form.title = "Renamed".to_string();
  });

  h.server.hold_updates(true);
  let mut save = Box::pin(h.controller.save_edit());
  assert!(poll_once(save.as_mut()).is_pending());
  h.controller.cancel_edit().expect("cancel");
  h.controller
    .close_modal()
    .expect("close from view");

  h.server.hold_updates(false);
  assert_eq!(
    poll_once(save.as_mut()),
    Poll::Ready(Ok(()))
  );
  drop(save);

  let state = h.controller.snapshot();
  assert!(!state.modal.is_open());
  assert_eq!(
    state.board.card(&id("T")).expect("card").title,
    "Renamed"
  );
  assert!(!h.controller.is_busy());
}

#[test]
fn reload_failure_after_save_stays_in_edit(
) {
  let h =
    harness(&[("T", "notStarted", "")]);
  block_on(h.controller.open_task(&id("T")))
    .expect("details load");
  h.controller.begin_edit().expect("edit mode");
  h.controller.edit_form(|form| {
    form.title = "Renamed".to_string();
  });
  h.server.fail("details");

  assert!(matches!(
    block_on(h.controller.save_edit()),
    Err(BoardError::Api(_))
  ));
  assert_eq!(h.server.task("T").title, "Renamed");

  let state = h.controller.snapshot();
  let ModalState::Editing { form, .. } = &state.modal
  else {
    panic!("expected edit mode");
  };
  assert_eq!(form.title, "Renamed");
  assert_eq!(
    state.board.card(&id("T")).expect("card").title,
    "task T"
  );
  let (kind, message) = last_notice(&h.controller);
  assert_eq!(kind, NoticeKind::Error);
  assert!(message.starts_with(
    "Task saved, but reloading it failed"
  ));
  assert!(!h.controller.is_busy());
}

#[test]
fn failed_delete_keeps_card_and_view(
) {
  let h =
    harness(&[("T", "notStarted", "")]);
  block_on(h.controller.open_task(&id("T")))
    .expect("details load");
  h.server.fail("delete");

  assert!(
    block_on(h.controller.delete_open_task())
      .is_err()
  );
  let state = h.controller.snapshot();
  assert!(state.board.card(&id("T")).is_some());
  assert_eq!(state.modal.mode_name(), "view");
  assert_eq!(
    last_notice(&h.controller),
    (
      NoticeKind::Error,
      "delete unavailable".to_string()
    )
  );
  assert!(!h.controller.is_busy());
}
