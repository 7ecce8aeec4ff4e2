use std::future::Future;
use std::rc::Rc;

use gloo::console::log;
use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use lanes_core::config::ClientConfig;
use lanes_core::drag::DropTarget;
use lanes_core::theme::Announcement;
use lanes_core::{
  BoardError,
  Controller,
  TaskId
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_memo,
  use_mut_ref,
  use_state
};

use crate::api::HttpTaskApi;
use crate::components::{
  FormEdit,
  KanbanBoard,
  LoadingOverlay,
  NewTaskForm,
  TaskModal,
  ThemeToggle,
  ToastStack
};

mod page;
mod theme;

const CLIENT_CONFIG_TOML: &str =
  include_str!("../client.toml");

/// How long the theme announcement stays in
/// the live region.
const ANNOUNCEMENT_CLEAR_MS: u32 = 3_000;

type BoardController =
  Controller<HttpTaskApi>;

#[function_component(App)]
pub fn app() -> Html {
  let force_update = use_force_update();
  let config = use_memo((), |_| {
    ClientConfig::load(CLIENT_CONFIG_TOML)
  });

  let controller: Rc<BoardController> = {
    let config = config.clone();
    let force_update = force_update.clone();
    use_memo((), move |_| {
      let list_id =
        page::read_list_id(&config.page);
      let board =
        page::read_board(&config.page);
      ui_debug(
        "board.ready",
        &format!(
          "list={list_id} cards={}",
          board.len()
        )
      );
      Controller::new(
        HttpTaskApi::new((*config).clone()),
        list_id,
        board,
        config.notifications.dismiss_ms,
        Rc::new(move || {
          force_update.force_update()
        })
      )
    })
  };

  let theme = {
    let storage_key =
      config.theme.storage_key.clone();
    use_state(move || {
      theme::load_theme(&storage_key)
    })
  };
  let announcement =
    use_mut_ref(Announcement::default);
  let new_title = use_state(String::new);

  use_effect_with(*theme, |theme| {
    theme::apply_theme(*theme);
    || ()
  });

  {
    let controller = controller.clone();
    use_effect_with((), move |_| {
      let listener = web_sys::window()
        .and_then(|window| window.document())
        .map(|document| {
          EventListener::new(
            &document,
            "keydown",
            move |event| {
              let is_escape = event
                .dyn_ref::<web_sys::KeyboardEvent>()
                .is_some_and(|event| {
                  event.key() == "Escape"
                });
              if is_escape
                && controller
                  .snapshot()
                  .modal
                  .is_open()
                && let Err(error) =
                  controller.close_modal()
              {
                ui_debug(
                  "modal.escape",
                  &error.to_string()
                );
              }
            }
          )
        });
      move || drop(listener)
    });
  }

  let on_toggle_theme = {
    let theme = theme.clone();
    let announcement = announcement.clone();
    let force_update = force_update.clone();
    let storage_key =
      config.theme.storage_key.clone();
    Callback::from(move |()| {
      let next = theme.toggled();
      theme::save_theme(&storage_key, next);
      ui_debug(
        "theme.toggle",
        next.storage_value()
      );
      let generation =
        announcement.borrow_mut().announce(next);
      theme.set(next);
      let announcement = announcement.clone();
      let force_update = force_update.clone();
      spawn_local(async move {
        TimeoutFuture::new(
          ANNOUNCEMENT_CLEAR_MS
        )
        .await;
        if announcement
          .borrow_mut()
          .expire(generation)
        {
          force_update.force_update();
        }
      });
    })
  };

  let on_new_title = {
    let new_title = new_title.clone();
    Callback::from(move |value: String| {
      new_title.set(value);
    })
  };

  let on_create = {
    let controller = controller.clone();
    let new_title = new_title.clone();
    Callback::from(move |()| {
      let controller = controller.clone();
      let new_title = new_title.clone();
      let title = (*new_title).clone();
      spawn_local(async move {
        match controller
          .create_task(&title)
          .await
        {
          | Ok(task) => {
            ui_debug(
              "task.create",
              task.as_str()
            );
            new_title.set(String::new());
          }
          | Err(error) => {
            ui_debug(
              "task.create",
              &error.to_string()
            );
          }
        }
      });
    })
  };

  let on_drag_start = {
    let controller = controller.clone();
    Callback::from(move |task: TaskId| {
      ui_debug("drag.start", task.as_str());
      controller.drag_start(&task);
    })
  };

  let on_drag_end = {
    let controller = controller.clone();
    Callback::from(move |()| {
      controller.drag_end();
    })
  };

  let on_drop = {
    let controller = controller.clone();
    Callback::from(move |target: DropTarget| {
      let controller = controller.clone();
      run("drag.drop", async move {
        controller.drop_on(target).await
      });
    })
  };

  let on_open = {
    let controller = controller.clone();
    Callback::from(move |task: TaskId| {
      let controller = controller.clone();
      run("modal.open", async move {
        controller.open_task(&task).await
      });
    })
  };

  let on_toggle_importance = {
    let controller = controller.clone();
    Callback::from(move |task: TaskId| {
      let controller = controller.clone();
      run("task.importance", async move {
        controller
          .toggle_importance(&task)
          .await
      });
    })
  };

  let on_close = {
    let controller = controller.clone();
    Callback::from(move |()| {
      if let Err(error) =
        controller.close_modal()
      {
        ui_debug(
          "modal.close",
          &error.to_string()
        );
      }
    })
  };

  let on_edit = {
    let controller = controller.clone();
    Callback::from(move |()| {
      if let Err(error) =
        controller.begin_edit()
      {
        ui_debug(
          "modal.edit",
          &error.to_string()
        );
      }
    })
  };

  let on_cancel = {
    let controller = controller.clone();
    Callback::from(move |()| {
      if let Err(error) =
        controller.cancel_edit()
      {
        ui_debug(
          "modal.cancel",
          &error.to_string()
        );
      }
    })
  };

  let on_save = {
    let controller = controller.clone();
    Callback::from(move |()| {
      let controller = controller.clone();
      run("modal.save", async move {
        controller.save_edit().await
      });
    })
  };

  let on_delete = {
    let controller = controller.clone();
    Callback::from(move |()| {
      let controller = controller.clone();
      run("modal.delete", async move {
        controller.delete_open_task().await
      });
    })
  };

  let on_form = {
    let controller = controller.clone();
    Callback::from(move |edit: FormEdit| {
      controller
        .edit_form(|form| edit.apply(form));
    })
  };

  let on_dismiss = {
    let controller = controller.clone();
    Callback::from(move |id: u64| {
      controller.dismiss_notice(id);
    })
  };

  let state = controller.snapshot();

  html! {
      <div class="app">
          <header class="board-header">
              <h1 class="board-title">{ "Tasks" }</h1>
              <ThemeToggle
                  theme={*theme}
                  announcement={announcement.borrow().text().map(str::to_string)}
                  on_toggle={on_toggle_theme}
              />
          </header>
          <NewTaskForm
              value={(*new_title).clone()}
              on_input={on_new_title}
              on_submit={on_create}
          />
          <KanbanBoard
              board={state.board.clone()}
              dragging_task={state.drag.dragging_task().cloned()}
              {on_drag_start}
              {on_drag_end}
              {on_drop}
              {on_open}
              {on_toggle_importance}
          />
          <TaskModal
              modal={state.modal.clone()}
              can_delete={config.features.delete_task}
              {on_close}
              {on_edit}
              {on_cancel}
              {on_save}
              {on_delete}
              {on_form}
          />
          <ToastStack
              notices={state.notices.items().to_vec()}
              dismiss_ms={state.notices.dismiss_ms()}
              {on_dismiss}
          />
          <LoadingOverlay visible={controller.is_busy()} />
      </div>
  }
}

/// Run a controller operation off the event
/// handler. Failures have already been
/// surfaced as notices.
fn run<T, F>(event: &'static str, action: F)
where
  F: Future<Output = Result<T, BoardError>>
    + 'static
{
  spawn_local(async move {
    match action.await {
      | Ok(_) => ui_debug(event, "ok"),
      | Err(error) => {
        ui_debug(event, &error.to_string())
      }
    }
  });
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
