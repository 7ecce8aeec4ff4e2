use lanes_shared::{
  CreateTaskForm,
  CreatedTaskDto,
  DeleteTaskForm,
  MoveTaskForm,
  TaskDetailsDto,
  TaskQuery,
  ToggleImportanceForm,
  UpdateTaskDetailsForm
};

use crate::error::ApiError;

/// The server endpoints the board talks to.
///
/// Implementations run on the single UI
/// thread, so the futures are not required
/// to be `Send`.
#[allow(async_fn_in_trait)]
pub trait TaskApi {
  async fn move_task(
    &self,
    form: &MoveTaskForm
  ) -> Result<(), ApiError>;

  async fn toggle_importance(
    &self,
    form: &ToggleImportanceForm
  ) -> Result<(), ApiError>;

  async fn task_details(
    &self,
    query: &TaskQuery
  ) -> Result<TaskDetailsDto, ApiError>;

  async fn update_task_details(
    &self,
    form: &UpdateTaskDetailsForm
  ) -> Result<(), ApiError>;

  async fn create_task(
    &self,
    form: &CreateTaskForm
  ) -> Result<CreatedTaskDto, ApiError>;

  async fn delete_task(
    &self,
    form: &DeleteTaskForm
  ) -> Result<(), ApiError>;
}
