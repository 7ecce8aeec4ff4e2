use lanes_core::modal::{
  EditForm,
  ModalState
};
use lanes_core::task::TaskDetails;
use lanes_shared::Progress;
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  InputEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

/// One change from the edit form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
  Title(String),
  Status(Progress),
  Important(bool),
  DueDate(String),
  Categories(String)
}

impl FormEdit {
  pub fn apply(self, form: &mut EditForm) {
    match self {
      | Self::Title(title) => form.title = title,
      | Self::Status(status) => {
        form.status = status;
      }
      | Self::Important(important) => {
        form.important = important;
      }
      | Self::DueDate(date) => form.due_date = date,
      | Self::Categories(raw) => {
        form.categories = raw;
      }
    }
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  pub modal:      ModalState,
  pub can_delete: bool,
  pub on_close:   Callback<()>,
  pub on_edit:    Callback<()>,
  pub on_cancel:  Callback<()>,
  pub on_save:    Callback<()>,
  pub on_delete:  Callback<()>,
  pub on_form:    Callback<FormEdit>
}

fn emit_unit(
  callback: &Callback<()>
) -> Callback<MouseEvent> {
  let callback = callback.clone();
  Callback::from(move |_| callback.emit(()))
}

#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  let body = match &props.modal {
    | ModalState::Closed => return html! {},
    | ModalState::Viewing(details) => {
      view_body(details, props)
    }
    | ModalState::Editing { form, .. } => {
      edit_body(form, props)
    }
  };

  // Edit mode leaves only through Cancel or
  // Save.
  let viewing =
    matches!(props.modal, ModalState::Viewing(_));
  let on_backdrop = if viewing {
    emit_unit(&props.on_close)
  } else {
    Callback::noop()
  };

  html! {
      <div class="modal-backdrop" onclick={on_backdrop}>
          <div
              class="modal task-modal"
              role="dialog"
              aria-modal="true"
              data-mode={props.modal.mode_name()}
              onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
          >
              {
                  if viewing {
                      html! {
                          <button type="button" class="modal-close" aria-label="Close" onclick={emit_unit(&props.on_close)}>
                              { "×" }
                          </button>
                      }
                  } else {
                      html! {}
                  }
              }
              { body }
          </div>
      </div>
  }
}

fn view_body(
  details: &TaskDetails,
  props: &TaskModalProps
) -> Html {
  let due = details
    .due
    .as_ref()
    .map(|due| due.label.clone())
    .unwrap_or_else(|| {
      "No due date".to_string()
    });

  html! {
      <>
          <div class="header">{ &details.title }</div>
          <div class="content">
              <div class="field">
                  <label>{ "Status" }</label>
                  <span class={format!("status status-{}", details.progress.as_wire())}>
                      { details.progress.label() }
                  </span>
              </div>
              <div class="field">
                  <label>{ "Importance" }</label>
                  <span>{ if details.important { "High" } else { "Normal" } }</span>
              </div>
              <div class="field">
                  <label>{ "Due" }</label>
                  <span>{ due }</span>
              </div>
              <div class="field">
                  <label>{ "Categories" }</label>
                  {
                      if details.categories.is_empty() {
                          html! { <span class="muted">{ "None" }</span> }
                      } else {
                          html! {
                              <div class="tag-list">
                                  {
                                      for details.categories.iter().map(|category| html! {
                                          <span class="badge tag">{ category }</span>
                                      })
                                  }
                              </div>
                          }
                      }
                  }
              </div>
          </div>
          <div class="footer">
              {
                  if props.can_delete {
                      html! {
                          <button type="button" class="btn btn-danger" onclick={emit_unit(&props.on_delete)}>{ "Delete" }</button>
                      }
                  } else {
                      html! {}
                  }
              }
              <button type="button" class="btn" onclick={emit_unit(&props.on_close)}>{ "Close" }</button>
              <button type="button" class="btn btn-primary" onclick={emit_unit(&props.on_edit)}>{ "Edit" }</button>
          </div>
      </>
  }
}

fn edit_body(
  form: &EditForm,
  props: &TaskModalProps
) -> Html {
  let on_title = {
    let on_form = props.on_form.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_form.emit(FormEdit::Title(
        input.value()
      ));
    })
  };

  let on_status = {
    let on_form = props.on_form.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      if let Some(status) =
        Progress::from_wire(&select.value())
      {
        on_form.emit(FormEdit::Status(status));
      }
    })
  };

  let on_important = {
    let on_form = props.on_form.clone();
    Callback::from(move |e: Event| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_form.emit(FormEdit::Important(
        input.checked()
      ));
    })
  };

  let on_due = {
    let on_form = props.on_form.clone();
    Callback::from(move |e: Event| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_form.emit(FormEdit::DueDate(
        input.value()
      ));
    })
  };

  let on_categories = {
    let on_form = props.on_form.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_form.emit(FormEdit::Categories(
        input.value()
      ));
    })
  };

  html! {
      <>
          <div class="header">{ "Edit Task" }</div>
          <div class="content">
              <div class="field">
                  <label>{ "Title" }</label>
                  <input
                      value={form.title.clone()}
                      placeholder="Required task title"
                      oninput={on_title}
                  />
              </div>
              <div class="field">
                  <label>{ "Status" }</label>
                  <select onchange={on_status}>
                      {
                          for Progress::ALL.into_iter().map(|status| html! {
                              <option value={status.as_wire()} selected={status == form.status}>
                                  { status.label() }
                              </option>
                          })
                      }
                  </select>
              </div>
              <div class="field field-inline">
                  <input type="checkbox" id="task-important" checked={form.important} onchange={on_important} />
                  <label for="task-important">{ "Important" }</label>
              </div>
              <div class="field">
                  <label>{ "Due date" }</label>
                  <input type="date" value={form.due_date.clone()} onchange={on_due} />
              </div>
              <div class="field">
                  <label>{ "Categories" }</label>
                  <input
                      value={form.categories.clone()}
                      placeholder="Comma separated, e.g. home, errands"
                      oninput={on_categories}
                  />
              </div>
          </div>
          <div class="footer">
              <button type="button" class="btn" onclick={emit_unit(&props.on_cancel)}>{ "Cancel" }</button>
              <button type="button" class="btn btn-primary" onclick={emit_unit(&props.on_save)}>{ "Save" }</button>
          </div>
      </>
  }
}
