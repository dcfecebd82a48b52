use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row};

use crate::error::AppError;
use crate::models::{Completed, Todo, User};

pub type DbPool = Arc<Mutex<Connection>>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS todo (
        todo_id INTEGER PRIMARY KEY,
        description TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS complete (
        comp_id INTEGER PRIMARY KEY,
        description TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY,
        username TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL
    );
";

pub fn init_db(path: impl AsRef<Path>) -> Result<DbPool> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub fn init_in_memory() -> Result<DbPool> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn todo_from_row(row: &Row<'_>) -> Result<Todo> {
    Ok(Todo {
        todo_id: row.get(0)?,
        description: row.get(1)?,
    })
}

fn completed_from_row(row: &Row<'_>) -> Result<Completed> {
    Ok(Completed {
        comp_id: row.get(0)?,
        description: row.get(1)?,
    })
}

fn user_from_row(row: &Row<'_>) -> Result<User> {
    Ok(User {
        user_id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

// Todo operations
pub fn create_todo(pool: &DbPool, description: &str) -> Result<Todo, AppError> {
    let conn = pool.lock()?;
    let todo = conn.query_row(
        "INSERT INTO todo (description) VALUES (?1) RETURNING todo_id, description",
        [description],
        todo_from_row,
    )?;
    Ok(todo)
}

pub fn list_todos(pool: &DbPool) -> Result<Vec<Todo>, AppError> {
    let conn = pool.lock()?;
    let mut stmt = conn.prepare("SELECT todo_id, description FROM todo ORDER BY todo_id ASC")?;
    let todos = stmt
        .query_map([], todo_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(todos)
}

pub fn get_todo(pool: &DbPool, id: i64) -> Result<Option<Todo>, AppError> {
    let conn = pool.lock()?;
    let todo = conn
        .query_row(
            "SELECT todo_id, description FROM todo WHERE todo_id = ?1",
            [id],
            todo_from_row,
        )
        .optional()?;
    Ok(todo)
}

pub fn update_todo(pool: &DbPool, id: i64, description: &str) -> Result<bool, AppError> {
    let conn = pool.lock()?;
    let rows = conn.execute(
        "UPDATE todo SET description = ?1 WHERE todo_id = ?2",
        (description, id),
    )?;
    Ok(rows > 0)
}

pub fn delete_todo(pool: &DbPool, id: i64) -> Result<bool, AppError> {
    let conn = pool.lock()?;
    let rows = conn.execute("DELETE FROM todo WHERE todo_id = ?1", [id])?;
    Ok(rows > 0)
}

/// Moves a todo into the completed table. The read, insert and delete run in
/// one transaction; `None` means the todo did not exist and nothing was written.
pub fn complete_todo(pool: &DbPool, id: i64) -> Result<Option<Completed>, AppError> {
    let mut conn = pool.lock()?;
    let tx = conn.transaction()?;

    let description: Option<String> = tx
        .query_row(
            "SELECT description FROM todo WHERE todo_id = ?1",
            [id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(description) = description else {
        return Ok(None);
    };

    let completed = tx.query_row(
        "INSERT INTO complete (description) VALUES (?1) RETURNING comp_id, description",
        [&description],
        completed_from_row,
    )?;
    tx.execute("DELETE FROM todo WHERE todo_id = ?1", [id])?;
    tx.commit()?;

    Ok(Some(completed))
}

// Completed operations
pub fn list_completed(pool: &DbPool) -> Result<Vec<Completed>, AppError> {
    let conn = pool.lock()?;
    let mut stmt =
        conn.prepare("SELECT comp_id, description FROM complete ORDER BY comp_id ASC")?;
    let completed = stmt
        .query_map([], completed_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(completed)
}

pub fn delete_completed(pool: &DbPool, id: i64) -> Result<bool, AppError> {
    let conn = pool.lock()?;
    let rows = conn.execute("DELETE FROM complete WHERE comp_id = ?1", [id])?;
    Ok(rows > 0)
}

// User operations
pub fn get_user_by_username(pool: &DbPool, username: &str) -> Result<Option<User>, AppError> {
    let conn = pool.lock()?;
    let user = conn
        .query_row(
            "SELECT user_id, username, password FROM users WHERE username = ?1",
            [username],
            user_from_row,
        )
        .optional()?;
    Ok(user)
}

/// Returns `None` when the username is already taken.
pub fn create_user(
    pool: &DbPool,
    username: &str,
    password_hash: &str,
) -> Result<Option<User>, AppError> {
    let conn = pool.lock()?;
    let inserted = conn.query_row(
        "INSERT INTO users (username, password) VALUES (?1, ?2) RETURNING user_id, username, password",
        (username, password_hash),
        user_from_row,
    );

    match inserted {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
