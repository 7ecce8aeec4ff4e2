use lanes_core::Board;
use lanes_core::config::PageConfig;
use lanes_shared::{
  BoardSeedDto,
  ListId
};
use wasm_bindgen::JsCast;

fn element_by_id(
  id: &str
) -> Option<web_sys::Element> {
  web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.get_element_by_id(id)
    })
}

/// List id from the hidden form field the
/// server renders into the page.
pub fn read_list_id(
  page: &PageConfig
) -> ListId {
  let value = element_by_id(
    &page.list_id_field
  )
  .and_then(|element| {
    element
      .dyn_into::<web_sys::HtmlInputElement>()
      .ok()
  })
  .map(|input| input.value())
  .unwrap_or_default();

  if value.trim().is_empty() {
    tracing::warn!(
      field = %page.list_id_field,
      "list id field missing or empty"
    );
  }
  ListId::new(value.trim())
}

/// Initial board from the embedded JSON
/// model. Missing or malformed data gives
/// an empty board.
pub fn read_board(
  page: &PageConfig
) -> Board {
  let Some(raw) = element_by_id(
    &page.board_data_field
  )
  .and_then(|element| element.text_content())
  .filter(|raw| !raw.trim().is_empty())
  else {
    tracing::warn!(
      field = %page.board_data_field,
      "no board data embedded; starting empty"
    );
    return Board::new();
  };

  match serde_json::from_str::<BoardSeedDto>(
    &raw
  ) {
    | Ok(seed) => {
      tracing::info!(
        list = %seed.list_name,
        columns = seed.columns.len(),
        "loaded board seed"
      );
      Board::from_seed(seed)
    }
    | Err(error) => {
      tracing::warn!(
        %error,
        "failed parsing board data; starting empty"
      );
      Board::new()
    }
  }
}
