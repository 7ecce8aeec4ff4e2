use lanes_shared::{
  BoardSeedDto,
  Column,
  Progress,
  TaskId
};

use crate::reconcile::reconcile;
use crate::task::{
  TaskView,
  strip_sentinel
};

/// On-board presentation of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
  pub id:        TaskId,
  pub title:     String,
  pub important: bool,
  pub completed: bool,
  pub tags:      Vec<String>,
  pub due_badge: Option<String>
}

impl Card {
  pub fn from_view(
    view: &TaskView
  ) -> Self {
    Self {
      id:        view.id.clone(),
      title:     view.title.clone(),
      important: view.important,
      completed: view.progress
        == Progress::Completed,
      tags:      view.display_tags(),
      due_badge: view.due_label.clone()
    }
  }

  /// Rebuild the task fields this card
  /// shows, taking progress from the
  /// caller. Used where the column itself
  /// stands in for the status.
  pub fn view_with_progress(
    &self,
    progress: Progress
  ) -> TaskView {
    TaskView {
      id: self.id.clone(),
      title: self.title.clone(),
      progress,
      important: self.important,
      due_label: self.due_badge.clone(),
      categories: strip_sentinel(
        self.tags.clone()
      )
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
  pub column: Column,
  pub cards:  Vec<Card>
}

impl Lane {
  fn empty(column: Column) -> Self {
    Self {
      column,
      cards: Vec::new()
    }
  }

  /// The "No tasks" placeholder follows
  /// emptiness, so it comes back whenever
  /// the last card leaves.
  pub fn shows_placeholder(
    &self
  ) -> bool {
    self.cards.is_empty()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
  lanes: Vec<Lane>
}

impl Default for Board {
  fn default() -> Self {
    Self::new()
  }
}

impl Board {
  pub fn new() -> Self {
    Self {
      lanes: Column::ALL
        .into_iter()
        .map(Lane::empty)
        .collect()
    }
  }

  /// Place seeded tasks by their own
  /// fields; the column the server listed
  /// them under is ignored.
  pub fn from_seed(
    seed: BoardSeedDto
  ) -> Self {
    let mut board = Self::new();
    for column in seed.columns {
      for task in
        column.tasks.unwrap_or_default()
      {
        if task.id.trim().is_empty() {
          tracing::warn!(
            column = %column.title,
            "skipping seeded task without id"
          );
          continue;
        }
        let view =
          TaskView::from_seed(task);
        reconcile(&mut board, &view);
      }
    }
    tracing::debug!(
      cards = board.len(),
      "hydrated board from seed"
    );
    board
  }

  pub fn lanes(&self) -> &[Lane] {
    &self.lanes
  }

  pub fn lane(
    &self,
    column: Column
  ) -> &Lane {
    &self.lanes[lane_index(column)]
  }

  pub fn len(&self) -> usize {
    self
      .lanes
      .iter()
      .map(|lane| lane.cards.len())
      .sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn column_of(
    &self,
    id: &TaskId
  ) -> Option<Column> {
    self
      .lanes
      .iter()
      .find(|lane| {
        lane
          .cards
          .iter()
          .any(|card| &card.id == id)
      })
      .map(|lane| lane.column)
  }

  pub fn card(
    &self,
    id: &TaskId
  ) -> Option<&Card> {
    self
      .lanes
      .iter()
      .flat_map(|lane| lane.cards.iter())
      .find(|card| &card.id == id)
  }

  pub(crate) fn card_mut(
    &mut self,
    id: &TaskId
  ) -> Option<&mut Card> {
    self
      .lanes
      .iter_mut()
      .flat_map(|lane| {
        lane.cards.iter_mut()
      })
      .find(|card| &card.id == id)
  }

  pub(crate) fn append(
    &mut self,
    column: Column,
    card: Card
  ) {
    self.lanes[lane_index(column)]
      .cards
      .push(card);
  }

  /// Detach a card, keeping it for
  /// reattachment elsewhere.
  pub fn remove(
    &mut self,
    id: &TaskId
  ) -> Option<Card> {
    for lane in &mut self.lanes {
      if let Some(position) = lane
        .cards
        .iter()
        .position(|card| &card.id == id)
      {
        return Some(
          lane.cards.remove(position)
        );
      }
    }
    None
  }
}

fn lane_index(column: Column) -> usize {
  match column {
    | Column::NotStarted => 0,
    | Column::Doing => 1,
    | Column::Done => 2
  }
}
