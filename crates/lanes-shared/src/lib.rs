use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

/// Category label the server uses to mark
/// a task as in progress.
pub const DOING_CATEGORY: &str = "Doing";

pub mod endpoints {
  pub const UPDATE_TASK: &str =
    "/api/updateTask";
  pub const TOGGLE_IMPORTANCE: &str =
    "/api/toggleImportance";
  pub const TASK_DETAILS: &str =
    "/api/getTaskDetails";
  pub const UPDATE_TASK_DETAILS: &str =
    "/api/updateTaskDetails";
  pub const CREATE_TASK: &str =
    "/api/createTask";
  pub const DELETE_TASK: &str =
    "/api/deleteTask";
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
  pub fn new(
    raw: impl Into<String>
  ) -> Self {
    Self(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for TaskId {
  fn from(raw: &str) -> Self {
    Self::new(raw)
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
  pub fn new(
    raw: impl Into<String>
  ) -> Self {
    Self(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ListId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// The three fixed board lanes.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
pub enum Column {
  NotStarted,
  Doing,
  Done
}

impl Column {
  pub const ALL: [Column; 3] = [
    Column::NotStarted,
    Column::Doing,
    Column::Done
  ];

  /// Wire and display label, also the
  /// `column` field of a move request.
  pub fn label(self) -> &'static str {
    match self {
      | Self::NotStarted => {
        "Not Started"
      }
      | Self::Doing => "Doing",
      | Self::Done => "Done"
    }
  }

  pub fn slug(self) -> &'static str {
    match self {
      | Self::NotStarted => {
        "not-started"
      }
      | Self::Doing => "doing",
      | Self::Done => "done"
    }
  }

  /// Status a card takes on when it is
  /// dropped into this column.
  pub fn progress(self) -> Progress {
    match self {
      | Self::NotStarted => {
        Progress::NotStarted
      }
      | Self::Doing => {
        Progress::InProgress
      }
      | Self::Done => {
        Progress::Completed
      }
    }
  }
}

impl fmt::Display for Column {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
pub enum Progress {
  NotStarted,
  InProgress,
  Completed
}

impl Progress {
  pub const ALL: [Progress; 3] = [
    Progress::NotStarted,
    Progress::InProgress,
    Progress::Completed
  ];

  /// Derive progress from the raw server
  /// status and categories. Only
  /// `completed` is trusted from the
  /// status string; in-progress is
  /// signalled by the `Doing` category.
  pub fn derive(
    status: &str,
    categories: &[String]
  ) -> Self {
    if status
      .trim()
      .eq_ignore_ascii_case("completed")
    {
      Self::Completed
    } else if has_doing_category(
      categories
    ) {
      Self::InProgress
    } else {
      Self::NotStarted
    }
  }

  pub fn as_wire(self) -> &'static str {
    match self {
      | Self::NotStarted => {
        "notStarted"
      }
      | Self::InProgress => {
        "inProgress"
      }
      | Self::Completed => "completed"
    }
  }

  pub fn from_wire(
    raw: &str
  ) -> Option<Self> {
    Self::ALL.into_iter().find(
      |progress| {
        progress
          .as_wire()
          .eq_ignore_ascii_case(
            raw.trim()
          )
      }
    )
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::NotStarted => {
        "Not started"
      }
      | Self::InProgress => {
        "In progress"
      }
      | Self::Completed => "Completed"
    }
  }

  pub fn column(self) -> Column {
    match self {
      | Self::NotStarted => {
        Column::NotStarted
      }
      | Self::InProgress => {
        Column::Doing
      }
      | Self::Completed => Column::Done
    }
  }
}

/// Column membership as a pure function of
/// the server fields.
pub fn column_for(
  status: &str,
  categories: &[String]
) -> Column {
  Progress::derive(status, categories)
    .column()
}

pub fn is_doing_category(
  category: &str
) -> bool {
  category
    .trim()
    .eq_ignore_ascii_case(DOING_CATEGORY)
}

pub fn has_doing_category(
  categories: &[String]
) -> bool {
  categories
    .iter()
    .any(|category| {
      is_doing_category(category)
    })
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub enum Importance {
  Normal,
  High
}

impl Importance {
  pub fn from_flag(
    important: bool
  ) -> Self {
    if important {
      Self::High
    } else {
      Self::Normal
    }
  }

  /// `low` and anything unknown count as
  /// not important.
  pub fn from_wire(raw: &str) -> Self {
    if raw
      .trim()
      .eq_ignore_ascii_case("high")
    {
      Self::High
    } else {
      Self::Normal
    }
  }

  pub fn as_wire(self) -> &'static str {
    match self {
      | Self::Normal => "normal",
      | Self::High => "high"
    }
  }

  pub fn is_high(self) -> bool {
    self == Self::High
  }
}

/// Body of `/api/getTaskDetails`.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetailsDto {
  #[serde(default)]
  pub id:                Option<String>,
  #[serde(default)]
  pub title:             String,
  #[serde(default)]
  pub status:            String,
  #[serde(default)]
  pub importance:        String,
  #[serde(default)]
  pub due_date_time:     Option<String>,
  #[serde(default)]
  pub due_date_time_raw: Option<String>,
  #[serde(default)]
  pub categories:
    Option<Vec<String>>
}

/// Body of `/api/createTask`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct CreatedTaskDto {
  #[serde(rename = "taskId")]
  pub task_id: String
}

/// Initial board model embedded in the
/// page by the server.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct BoardSeedDto {
  #[serde(rename = "ListID", default)]
  pub list_id:   String,
  #[serde(rename = "ListName", default)]
  pub list_name: String,
  #[serde(rename = "Columns", default)]
  pub columns:   Vec<SeedColumnDto>
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct SeedColumnDto {
  #[serde(rename = "Title", default)]
  pub title: String,
  #[serde(rename = "Tasks", default)]
  pub tasks: Option<Vec<SeedTaskDto>>
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct SeedTaskDto {
  #[serde(rename = "ID")]
  pub id:            String,
  #[serde(rename = "Title", default)]
  pub title:         String,
  /// True when completed.
  #[serde(rename = "Status", default)]
  pub status:        bool,
  #[serde(
    rename = "Importance",
    default
  )]
  pub importance:    bool,
  #[serde(
    rename = "DueDateTime",
    default
  )]
  pub due_date_time: String,
  #[serde(
    rename = "Categories",
    default
  )]
  pub categories:
    Option<Vec<String>>
}

/// Request payloads are sent as
/// url-encoded forms (or a query string
/// for the one GET).
pub trait FormFields {
  fn fields(
    &self
  ) -> Vec<(&'static str, String)>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveTaskForm {
  pub list_id: ListId,
  pub task_id: TaskId,
  pub column:  Column
}

impl FormFields for MoveTaskForm {
  fn fields(
    &self
  ) -> Vec<(&'static str, String)> {
    vec![
      ("listId", self.list_id.to_string()),
      ("taskId", self.task_id.to_string()),
      (
        "column",
        self.column.label().to_string()
      ),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleImportanceForm {
  pub list_id:      ListId,
  pub task_id:      TaskId,
  pub is_important: bool
}

impl FormFields
  for ToggleImportanceForm
{
  fn fields(
    &self
  ) -> Vec<(&'static str, String)> {
    vec![
      ("listId", self.list_id.to_string()),
      ("taskId", self.task_id.to_string()),
      (
        "isImportant",
        self.is_important.to_string()
      ),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskQuery {
  pub list_id: ListId,
  pub task_id: TaskId
}

impl FormFields for TaskQuery {
  fn fields(
    &self
  ) -> Vec<(&'static str, String)> {
    vec![
      ("listId", self.list_id.to_string()),
      ("taskId", self.task_id.to_string()),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTaskDetailsForm {
  pub list_id:    ListId,
  pub task_id:    TaskId,
  pub title:      String,
  pub status:     Progress,
  pub importance: Importance,
  /// `YYYY-MM-DD`, omitted when absent.
  pub due_date:   Option<String>,
  pub categories: Vec<String>
}

impl FormFields
  for UpdateTaskDetailsForm
{
  fn fields(
    &self
  ) -> Vec<(&'static str, String)> {
    let mut fields = vec![
      ("listId", self.list_id.to_string()),
      ("taskId", self.task_id.to_string()),
      ("title", self.title.clone()),
      (
        "status",
        self.status.as_wire().to_string()
      ),
      (
        "importance",
        self
          .importance
          .as_wire()
          .to_string()
      ),
    ];
    if let Some(due_date) =
      &self.due_date
    {
      fields
        .push(("dueDate", due_date.clone()));
    }
    let categories =
      serde_json::to_string(
        &self.categories
      )
      .unwrap_or_else(|_| {
        "[]".to_string()
      });
    fields
      .push(("categories", categories));
    fields
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskForm {
  pub list_id: ListId,
  pub title:   String
}

impl FormFields for CreateTaskForm {
  fn fields(
    &self
  ) -> Vec<(&'static str, String)> {
    vec![
      ("listId", self.list_id.to_string()),
      ("title", self.title.clone()),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteTaskForm {
  pub list_id: ListId,
  pub task_id: TaskId
}

impl FormFields for DeleteTaskForm {
  fn fields(
    &self
  ) -> Vec<(&'static str, String)> {
    vec![
      ("listId", self.list_id.to_string()),
      ("taskId", self.task_id.to_string()),
    ]
  }
}
