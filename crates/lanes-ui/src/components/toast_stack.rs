use gloo::timers::future::TimeoutFuture;
use lanes_core::notice::{
  Notice,
  NoticeKind
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_effect_with
};

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
  pub notices:    Vec<Notice>,
  pub dismiss_ms: u32,
  pub on_dismiss: Callback<u64>
}

#[function_component(ToastStack)]
pub fn toast_stack(
  props: &ToastStackProps
) -> Html {
  html! {
      <div class="toast-stack" aria-live="polite">
          {
              for props.notices.iter().map(|notice| html! {
                  <Toast
                      key={notice.id}
                      notice={notice.clone()}
                      dismiss_ms={props.dismiss_ms}
                      on_dismiss={props.on_dismiss.clone()}
                  />
              })
          }
      </div>
  }
}

#[derive(Properties, PartialEq)]
struct ToastProps {
  notice:     Notice,
  dismiss_ms: u32,
  on_dismiss: Callback<u64>
}

#[function_component(Toast)]
fn toast(props: &ToastProps) -> Html {
  let id = props.notice.id;

  {
    let on_dismiss = props.on_dismiss.clone();
    let dismiss_ms = props.dismiss_ms;
    use_effect_with(id, move |id| {
      let id = *id;
      wasm_bindgen_futures::spawn_local(
        async move {
          TimeoutFuture::new(dismiss_ms)
            .await;
          on_dismiss.emit(id);
        }
      );
      || ()
    });
  }

  let onclick = {
    let on_dismiss = props.on_dismiss.clone();
    Callback::from(move |_| {
      on_dismiss.emit(id);
    })
  };

  let role = match props.notice.kind {
    | NoticeKind::Error => "alert",
    | NoticeKind::Success => "status"
  };

  html! {
      <div class={classes!("toast", props.notice.kind.as_class())} {role}>
          <span class="toast-message">{ &props.notice.message }</span>
          <button type="button" class="toast-close" aria-label="Dismiss" {onclick}>{ "×" }</button>
      </div>
  }
}
