use lanes_shared::{
  Column,
  Progress
};
use tracing::debug;

use crate::board::{
  Board,
  Card
};
use crate::task::TaskView;

/// One change the reconciler made to a
/// card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardPatch {
  Inserted { column: Column },
  Title(String),
  Important(bool),
  Completed(bool),
  Tags(Vec<String>),
  DueBadge(Option<String>),
  Moved { from: Column, to: Column }
}

/// Bring the card for `view.id` in line
/// with `view`, creating it at the end of
/// its column when it is not on the board.
///
/// Only fields that differ are touched, so
/// a second call with the same view returns
/// no patches.
pub fn reconcile(
  board: &mut Board,
  view: &TaskView
) -> Vec<CardPatch> {
  let target = view.column();
  let Some(current) =
    board.column_of(&view.id)
  else {
    board.append(
      target,
      Card::from_view(view)
    );
    debug!(
      task = %view.id,
      column = %target,
      "inserted card"
    );
    return vec![CardPatch::Inserted {
      column: target
    }];
  };

  let mut patches = Vec::new();
  if let Some(card) =
    board.card_mut(&view.id)
  {
    decorate(card, view, &mut patches);
  }

  if current != target
    && let Some(card) =
      board.remove(&view.id)
  {
    board.append(target, card);
    patches.push(CardPatch::Moved {
      from: current,
      to:   target
    });
  }

  if !patches.is_empty() {
    debug!(
      task = %view.id,
      ?patches,
      "reconciled card"
    );
  }
  patches
}

fn decorate(
  card: &mut Card,
  view: &TaskView,
  patches: &mut Vec<CardPatch>
) {
  if card.title != view.title {
    card.title = view.title.clone();
    patches.push(CardPatch::Title(
      view.title.clone()
    ));
  }

  if card.important != view.important {
    card.important = view.important;
    patches.push(CardPatch::Important(
      view.important
    ));
  }

  let completed =
    view.progress == Progress::Completed;
  if card.completed != completed {
    card.completed = completed;
    patches.push(CardPatch::Completed(
      completed
    ));
  }

  let tags = view.display_tags();
  if card.tags != tags {
    card.tags = tags.clone();
    patches.push(CardPatch::Tags(tags));
  }

  if card.due_badge != view.due_label {
    card.due_badge =
      view.due_label.clone();
    patches.push(CardPatch::DueBadge(
      view.due_label.clone()
    ));
  }
}
