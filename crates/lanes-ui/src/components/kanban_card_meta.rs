use lanes_core::Card;
use lanes_shared::is_doing_category;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct KanbanCardMetaProps {
  pub card: Card
}

#[function_component(KanbanCardMeta)]
pub fn kanban_card_meta(
  props: &KanbanCardMetaProps
) -> Html {
  if props.card.tags.is_empty()
    && props.card.due_badge.is_none()
  {
    return html! {};
  }

  html! {
      <div class="kanban-card-meta">
          {
              for props.card.tags.iter().map(|tag| html! {
                  <span class={classes!("badge", "tag", is_doing_category(tag).then_some("tag-doing"))}>
                      { tag }
                  </span>
              })
          }
          {
              if let Some(due) = props.card.due_badge.clone() {
                  html! { <span class="badge due">{ due }</span> }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
