use gloo::net::http::{
  Request,
  Response
};
use lanes_core::config::ClientConfig;
use lanes_core::{
  ApiError,
  TaskApi
};
use lanes_shared::{
  CreateTaskForm,
  CreatedTaskDto,
  DeleteTaskForm,
  FormFields,
  MoveTaskForm,
  TaskDetailsDto,
  TaskQuery,
  ToggleImportanceForm,
  UpdateTaskDetailsForm,
  endpoints
};
use web_sys::{
  RequestCredentials,
  UrlSearchParams
};

/// Same-origin HTTP transport; the session
/// cookie rides along with every request.
pub struct HttpTaskApi {
  config: ClientConfig
}

impl HttpTaskApi {
  pub fn new(config: ClientConfig) -> Self {
    Self { config }
  }

  async fn post(
    &self,
    path: &str,
    form: &impl FormFields
  ) -> Result<Response, ApiError> {
    let url = self.config.endpoint(path);
    let body = url_encoded(form)?;
    tracing::debug!(%url, "POST");
    let response = Request::post(&url)
      .credentials(
        RequestCredentials::SameOrigin
      )
      .body(body)
      .map_err(network)?
      .send()
      .await
      .map_err(network)?;
    checked(response).await
  }

  async fn get(
    &self,
    path: &str,
    query: &impl FormFields
  ) -> Result<Response, ApiError> {
    let url = self.config.endpoint(path);
    tracing::debug!(%url, "GET");
    let response = Request::get(&url)
      .credentials(
        RequestCredentials::SameOrigin
      )
      .query(query.fields())
      .send()
      .await
      .map_err(network)?;
    checked(response).await
  }
}

fn url_encoded(
  form: &impl FormFields
) -> Result<UrlSearchParams, ApiError> {
  let params = UrlSearchParams::new()
    .map_err(|error| {
      ApiError::Network(format!(
        "failed building form body: \
         {error:?}"
      ))
    })?;
  for (name, value) in form.fields() {
    params.append(name, &value);
  }
  Ok(params)
}

fn network(
  error: gloo::net::Error
) -> ApiError {
  ApiError::Network(error.to_string())
}

/// Non-2xx answers carry a plain-text
/// message in the body.
async fn checked(
  response: Response
) -> Result<Response, ApiError> {
  if response.ok() {
    return Ok(response);
  }
  let status = response.status();
  let message =
    response.text().await.unwrap_or_default();
  tracing::warn!(
    status,
    url = %response.url(),
    message = %message.trim(),
    "request rejected"
  );
  Err(ApiError::Server { status, message })
}

async fn decode<T>(
  response: Response
) -> Result<T, ApiError>
where
  T: serde::de::DeserializeOwned
{
  let raw = response
    .text()
    .await
    .map_err(network)?;
  serde_json::from_str(&raw).map_err(|error| {
    ApiError::Decode(error.to_string())
  })
}

impl TaskApi for HttpTaskApi {
  async fn move_task(
    &self,
    form: &MoveTaskForm
  ) -> Result<(), ApiError> {
    self
      .post(endpoints::UPDATE_TASK, form)
      .await
      .map(drop)
  }

  async fn toggle_importance(
    &self,
    form: &ToggleImportanceForm
  ) -> Result<(), ApiError> {
    self
      .post(endpoints::TOGGLE_IMPORTANCE, form)
      .await
      .map(drop)
  }

  async fn task_details(
    &self,
    query: &TaskQuery
  ) -> Result<TaskDetailsDto, ApiError> {
    let response = self
      .get(endpoints::TASK_DETAILS, query)
      .await?;
    decode(response).await
  }

  async fn update_task_details(
    &self,
    form: &UpdateTaskDetailsForm
  ) -> Result<(), ApiError> {
    self
      .post(
        endpoints::UPDATE_TASK_DETAILS,
        form
      )
      .await
      .map(drop)
  }

  async fn create_task(
    &self,
    form: &CreateTaskForm
  ) -> Result<CreatedTaskDto, ApiError> {
    let response = self
      .post(endpoints::CREATE_TASK, form)
      .await?;
    decode(response).await
  }

  async fn delete_task(
    &self,
    form: &DeleteTaskForm
  ) -> Result<(), ApiError> {
    self
      .post(endpoints::DELETE_TASK, form)
      .await
      .map(drop)
  }
}
