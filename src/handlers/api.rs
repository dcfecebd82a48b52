use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use crate::db::{
    complete_todo, create_todo, delete_completed, delete_todo, get_todo, list_completed,
    list_todos, update_todo,
};
use crate::error::AppError;
use crate::middleware::JsonBody;
use crate::models::{Completed, Todo, TodoBody};
use crate::AppState;

pub async fn list_all_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = list_todos(&state.db)?;
    info!(count = todos.len(), "Listed todos");
    Ok(Json(todos))
}

pub async fn create_new_todo(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TodoBody>,
) -> Result<Json<Todo>, AppError> {
    let todo = create_todo(&state.db, &req.description)?;
    info!(id = todo.todo_id, "Created todo");
    Ok(Json(todo))
}

pub async fn get_single_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, AppError> {
    match get_todo(&state.db, id)? {
        Some(todo) => Ok(Json(todo)),
        None => Err(AppError::NotFound("Todo not found")),
    }
}

pub async fn update_existing_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(req): JsonBody<TodoBody>,
) -> Result<Json<&'static str>, AppError> {
    if update_todo(&state.db, id, &req.description)? {
        info!(id, "Updated todo");
        Ok(Json("Todo was updated!"))
    } else {
        Err(AppError::NotFound("Todo not found"))
    }
}

pub async fn delete_existing_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<&'static str>, AppError> {
    if delete_todo(&state.db, id)? {
        info!(id, "Deleted todo");
        Ok(Json("Todo was deleted!"))
    } else {
        Err(AppError::NotFound("Todo not found"))
    }
}

pub async fn complete_existing_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<&'static str>, AppError> {
    match complete_todo(&state.db, id)? {
        Some(completed) => {
            info!(id, comp_id = completed.comp_id, "Completed todo");
            Ok(Json("Todo marked as complete!"))
        }
        None => Err(AppError::NotFound("Todo not found")),
    }
}

pub async fn list_all_completed(
    State(state): State<AppState>,
) -> Result<Json<Vec<Completed>>, AppError> {
    let completed = list_completed(&state.db)?;
    info!(count = completed.len(), "Listed completed todos");
    Ok(Json(completed))
}

pub async fn delete_existing_completed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<&'static str>, AppError> {
    if delete_completed(&state.db, id)? {
        info!(id, "Deleted completed todo");
        Ok(Json("Completed todo deleted successfully!"))
    } else {
        Err(AppError::NotFound("Completed todo not found"))
    }
}
