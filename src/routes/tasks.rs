use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{CompletionUpdate, NewTask, TaskInput},
    response::ApiResponse,
    state::AppState,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use validator::Validate;

/// Retrieves the authenticated user's tasks, newest first.
///
/// ## Responses:
/// - `200 OK`: `data` is an array of `Task` objects.
/// - `401 Unauthorized`: no valid session cookie.
/// - `500 Internal Server Error`: storage failure.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = state.db.list_tasks(user.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Tasks retrieved successfully", tasks)))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, non-blank after trimming.
/// - `description` (optional): trimmed; blank is stored as absent.
/// - `priority` (optional): `low`, `medium` or `high`; defaults to `medium`.
///
/// ## Responses:
/// - `201 Created`: `data` is the new `Task`, with `completed: false`.
/// - `400 Bad Request`: missing title, unknown priority or over-long fields.
/// - `401 Unauthorized`: no valid session cookie.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let new_task = parse_task_input(task_data.into_inner())?;

    let task = state
        .db
        .insert_task(
            user.0,
            &new_task.title,
            new_task.description.as_deref(),
            new_task.priority,
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok("Task created successfully", task)))
}

/// Sets the completion flag of a task owned by the authenticated user.
///
/// ## Request Body:
/// `{ "completed": true | false }`
///
/// ## Responses:
/// - `200 OK`: the task was updated.
/// - `400 Bad Request`: non-numeric id, or `completed` missing or not a boolean.
/// - `404 Not Found`: no such task, or it belongs to another user.
#[patch("/{id}/complete")]
pub async fn update_task_completion(
    state: web::Data<AppState>,
    task_id: web::Path<i64>,
    update: web::Json<CompletionUpdate>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let completed = update
        .completed()
        .ok_or_else(|| AppError::BadRequest("Completed status must be a boolean".into()))?;

    if !state
        .db
        .set_task_completion(task_id.into_inner(), user.0, completed)
        .await?
    {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("Task updated successfully")))
}

/// Deletes a task owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: the task was deleted.
/// - `400 Bad Request`: non-numeric id.
/// - `404 Not Found`: no such task, or it belongs to another user.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<i64>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    if !state.db.delete_task(task_id.into_inner(), user.0).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("Task deleted successfully")))
}

/// Trims and checks a create request.
fn parse_task_input(input: TaskInput) -> Result<NewTask, AppError> {
    let title = input
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| AppError::BadRequest("Task title is required".into()))?
        .to_string();

    let priority = input
        .priority()
        .ok_or_else(|| AppError::BadRequest("Priority must be low, medium, or high".into()))?;

    let description = input
        .description
        .as_deref()
        .map(str::trim)
        .filter(|description| !description.is_empty())
        .map(str::to_string);

    let trimmed = TaskInput {
        title: Some(title),
        description,
        priority: None,
    };
    trimmed.validate()?;

    Ok(NewTask {
        title: trimmed.title.unwrap_or_default(),
        description: trimmed.description,
        priority,
    })
}
