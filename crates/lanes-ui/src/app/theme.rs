use lanes_core::theme::Theme;

fn storage() -> Option<web_sys::Storage> {
  web_sys::window().and_then(|window| {
    window.local_storage().ok().flatten()
  })
}

fn prefers_dark() -> bool {
  web_sys::window()
    .and_then(|window| {
      window
        .match_media(
          "(prefers-color-scheme: dark)"
        )
        .ok()
        .flatten()
    })
    .is_some_and(|query| query.matches())
}

pub fn load_theme(storage_key: &str) -> Theme {
  let stored = storage().and_then(|storage| {
    storage.get_item(storage_key).ok().flatten()
  });
  let choice = Theme::resolve(
    stored.as_deref(),
    prefers_dark()
  );
  if choice.persist {
    save_theme(storage_key, choice.theme);
  }
  choice.theme
}

pub fn save_theme(
  storage_key: &str,
  theme: Theme
) {
  if let Some(storage) = storage() {
    let _ = storage.set_item(
      storage_key,
      theme.storage_value()
    );
  }
}

pub fn apply_theme(theme: Theme) {
  let root = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.document_element()
    });
  if let Some(root) = root {
    let _ = root.set_attribute(
      "data-theme",
      theme.storage_value()
    );
  }
}
