use lanes_shared::{
  DOING_CATEGORY,
  Importance,
  ListId,
  Progress,
  TaskId,
  UpdateTaskDetailsForm,
  is_doing_category
};

use crate::error::BoardError;
use crate::task::TaskDetails;

/// Detail modal for one task. Viewing and
/// editing are exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
  #[default]
  Closed,
  Viewing(TaskDetails),
  Editing {
    snapshot: TaskDetails,
    form:     EditForm
  }
}

impl ModalState {
  pub fn is_open(&self) -> bool {
    !matches!(self, Self::Closed)
  }

  pub fn task_id(&self) -> Option<&TaskId> {
    match self {
      | Self::Closed => None,
      | Self::Viewing(details) => {
        Some(&details.id)
      }
      | Self::Editing { snapshot, .. } => {
        Some(&snapshot.id)
      }
    }
  }

  pub fn mode_name(&self) -> &'static str {
    match self {
      | Self::Closed => "closed",
      | Self::Viewing(_) => "view",
      | Self::Editing { .. } => "edit"
    }
  }

  /// View → edit, seeding the form from the
  /// last fetched snapshot.
  pub fn begin_edit(
    &mut self
  ) -> Result<(), BoardError> {
    let Self::Viewing(details) = self else {
      return Err(BoardError::WrongMode {
        expected: "view"
      });
    };
    let snapshot = details.clone();
    let form = EditForm::from_details(&snapshot);
    *self = Self::Editing { snapshot, form };
    Ok(())
  }

  /// Edit → view, discarding the form.
  pub fn cancel_edit(
    &mut self
  ) -> Result<(), BoardError> {
    let Self::Editing { snapshot, .. } = self
    else {
      return Err(BoardError::WrongMode {
        expected: "edit"
      });
    };
    *self = Self::Viewing(snapshot.clone());
    Ok(())
  }

  pub fn form_mut(
    &mut self
  ) -> Option<&mut EditForm> {
    match self {
      | Self::Editing { form, .. } => Some(form),
      | _ => None
    }
  }

  /// View → closed. Edit mode only exits
  /// through cancel or save, so a stray
  /// close keeps the form.
  pub fn close(
    &mut self
  ) -> Result<(), BoardError> {
    match self {
      | Self::Closed => Ok(()),
      | Self::Viewing(_) => {
        *self = Self::Closed;
        Ok(())
      }
      | Self::Editing { .. } => {
        Err(BoardError::WrongMode {
          expected: "view"
        })
      }
    }
  }
}

/// Editable copy of a task. Categories are
/// kept as the comma-separated text the
/// user types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
  pub title:      String,
  pub status:     Progress,
  pub important:  bool,
  /// `YYYY-MM-DD` or empty.
  pub due_date:   String,
  pub categories: String
}

impl EditForm {
  pub fn from_details(
    details: &TaskDetails
  ) -> Self {
    Self {
      title:      details.title.clone(),
      status:     details.progress,
      important:  details.important,
      due_date:   details
        .due
        .as_ref()
        .map(|due| due.input_value())
        .unwrap_or_default(),
      categories: details.categories.join(", ")
    }
  }

  /// Build the update request. The title is
  /// the only field validated locally.
  pub fn to_update(
    &self,
    list_id: ListId,
    task_id: TaskId
  ) -> Result<UpdateTaskDetailsForm, BoardError>
  {
    let title = self.title.trim();
    if title.is_empty() {
      return Err(BoardError::EmptyTitle);
    }
    let due_date =
      Some(self.due_date.trim().to_string())
        .filter(|date| !date.is_empty());
    Ok(UpdateTaskDetailsForm {
      list_id,
      task_id,
      title: title.to_string(),
      status: self.status,
      importance: Importance::from_flag(
        self.important
      ),
      due_date,
      categories: wire_categories(
        self.status,
        parse_categories(&self.categories)
      )
    })
  }
}

/// Split a comma-separated list, dropping
/// blank entries and any typed `Doing`.
pub fn parse_categories(
  raw: &str
) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|entry| {
      !entry.is_empty()
        && !is_doing_category(entry)
    })
    .map(str::to_string)
    .collect()
}

/// Categories as the server stores them:
/// in-progress is carried by the `Doing`
/// label.
pub fn wire_categories(
  status: Progress,
  mut categories: Vec<String>
) -> Vec<String> {
  categories.retain(|category| {
    !is_doing_category(category)
  });
  if status == Progress::InProgress {
    categories.push(DOING_CATEGORY.to_string());
  }
  categories
}
