use chrono::NaiveDate;
use lanes_shared::{
  Column,
  DOING_CATEGORY,
  Progress,
  SeedTaskDto,
  TaskDetailsDto,
  TaskId,
  is_doing_category
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDate {
  pub label: String,
  pub date:  Option<NaiveDate>
}

impl DueDate {
  fn from_dto(
    label: Option<String>,
    raw: Option<String>
  ) -> Option<Self> {
    let date = raw
      .as_deref()
      .and_then(parse_due_date);
    let label = label
      .filter(|label| {
        !label.trim().is_empty()
      })
      .or_else(|| {
        date.map(format_due_label)
      })?;
    Some(Self { label, date })
  }

  /// Value for a date input.
  pub fn input_value(&self) -> String {
    self
      .date
      .map(|date| {
        date.format("%Y-%m-%d").to_string()
      })
      .unwrap_or_default()
  }
}

/// Accepts RFC 3339 and the fractional
/// local form the server forwards
/// (`2025-03-01T00:00:00.0000000`); only
/// the calendar date is kept.
pub fn parse_due_date(
  raw: &str
) -> Option<NaiveDate> {
  let day = raw.trim().get(..10)?;
  NaiveDate::parse_from_str(
    day, "%Y-%m-%d"
  )
  .ok()
}

pub fn format_due_label(
  date: NaiveDate
) -> String {
  date.format("%b %-d, %Y").to_string()
}

/// Full task as returned by the details
/// endpoint, with status folded into a
/// single [`Progress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
  pub id:         TaskId,
  pub title:      String,
  pub progress:   Progress,
  pub important:  bool,
  pub due:        Option<DueDate>,
  /// Without the `Doing` sentinel.
  pub categories: Vec<String>
}

impl TaskDetails {
  pub fn from_dto(
    id: TaskId,
    dto: TaskDetailsDto
  ) -> Self {
    let categories =
      dto.categories.unwrap_or_default();
    let progress = Progress::derive(
      &dto.status,
      &categories
    );
    Self {
      id,
      title: dto.title,
      progress,
      important: lanes_shared::Importance::from_wire(
        &dto.importance
      )
      .is_high(),
      due: DueDate::from_dto(
        dto.due_date_time,
        dto.due_date_time_raw
      ),
      categories: strip_sentinel(
        categories
      )
    }
  }

  pub fn view(&self) -> TaskView {
    TaskView {
      id:         self.id.clone(),
      title:      self.title.clone(),
      progress:   self.progress,
      important:  self.important,
      due_label:  self
        .due
        .as_ref()
        .map(|due| due.label.clone()),
      categories: self.categories.clone()
    }
  }
}

/// Authoritative fields the reconciler
/// renders a card from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
  pub id:         TaskId,
  pub title:      String,
  pub progress:   Progress,
  pub important:  bool,
  pub due_label:  Option<String>,
  pub categories: Vec<String>
}

impl TaskView {
  /// A freshly created task: not
  /// important, not started, nothing else.
  pub fn new_default(
    id: TaskId,
    title: impl Into<String>
  ) -> Self {
    Self {
      id,
      title: title.into(),
      progress: Progress::NotStarted,
      important: false,
      due_label: None,
      categories: Vec::new()
    }
  }

  pub fn from_seed(
    seed: SeedTaskDto
  ) -> Self {
    let categories =
      seed.categories.unwrap_or_default();
    let status = if seed.status {
      Progress::Completed.as_wire()
    } else {
      ""
    };
    let progress = Progress::derive(
      status,
      &categories
    );
    let due_label = Some(
      seed.due_date_time.trim().to_string()
    )
    .filter(|label| !label.is_empty());
    Self {
      id: TaskId::new(seed.id),
      title: seed.title,
      progress,
      important: seed.importance,
      due_label,
      categories: strip_sentinel(
        categories
      )
    }
  }

  pub fn column(&self) -> Column {
    self.progress.column()
  }

  pub fn display_tags(
    &self
  ) -> Vec<String> {
    display_tags(
      self.progress,
      &self.categories
    )
  }
}

/// Tags shown on a card. The `Doing` tag is
/// derived from progress, never taken from
/// the stored categories.
pub fn display_tags(
  progress: Progress,
  categories: &[String]
) -> Vec<String> {
  let mut tags: Vec<String> = categories
    .iter()
    .filter(|category| {
      !is_doing_category(category)
    })
    .cloned()
    .collect();
  if progress == Progress::InProgress {
    tags.push(DOING_CATEGORY.to_string());
  }
  tags
}

pub fn strip_sentinel(
  categories: Vec<String>
) -> Vec<String> {
  categories
    .into_iter()
    .filter(|category| {
      !is_doing_category(category)
    })
    .collect()
}
