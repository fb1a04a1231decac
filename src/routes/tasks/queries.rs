use chrono::{DateTime, Utc};

use super::dto::{CreateTask, TaskPage, UpdateTask};
use super::model::Task;
use super::store::TaskTable;
use super::{validate_create, validate_update, TaskFilter};
use crate::error::AppError;

fn task_not_found() -> AppError {
    AppError::not_found("task not found")
}

fn matches_search(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle) || task.description.to_lowercase().contains(needle)
}

pub fn list_tasks(table: &TaskTable, filter: &TaskFilter) -> TaskPage {
    let needle = filter.search.as_ref().map(|s| s.to_lowercase());

    let filtered: Vec<&Task> = table
        .all()
        .iter()
        .filter(|t| filter.completed.map_or(true, |c| t.completed == c))
        .filter(|t| needle.as_deref().map_or(true, |n| matches_search(t, n)))
        .collect();

    let total = filtered.len();
    let page = filter.page.unwrap_or(1);
    let limit = filter.limit.unwrap_or(total);
    let start = page.saturating_sub(1).saturating_mul(limit);

    let data = filtered
        .into_iter()
        .skip(start)
        .take(limit)
        .cloned()
        .collect();

    TaskPage {
        total,
        page,
        limit,
        data,
    }
}

pub fn create_task(
    table: &mut TaskTable,
    payload: CreateTask,
    now: DateTime<Utc>,
) -> Result<Task, AppError> {
    let new = validate_create(payload).map_err(AppError::BadRequest)?;

    let task = Task {
        id: table.allocate_id(),
        title: new.title,
        description: new.description,
        completed: false,
        priority: new.priority,
        created_at: now,
        completed_at: None,
    };
    table.insert(task.clone());

    Ok(task)
}

pub fn get_task(table: &TaskTable, id: i64) -> Result<Task, AppError> {
    table.find_by_id(id).cloned().ok_or_else(task_not_found)
}

/// Validates the payload, then looks the task up, then applies only the given fields.
pub fn update_task(
    table: &mut TaskTable,
    id: i64,
    payload: UpdateTask,
    now: DateTime<Utc>,
) -> Result<Task, AppError> {
    let changes = validate_update(payload).map_err(AppError::BadRequest)?;
    let task = table.find_by_id_mut(id).ok_or_else(task_not_found)?;

    if let Some(title) = changes.title {
        task.title = title;
    }
    if let Some(description) = changes.description {
        task.description = description;
    }
    if let Some(completed) = changes.completed {
        task.set_completed(completed, now);
    }
    if let Some(priority) = changes.priority {
        task.priority = priority;
    }

    Ok(task.clone())
}

pub fn delete_task(table: &mut TaskTable, id: i64) -> Result<(), AppError> {
    if table.remove(id) {
        Ok(())
    } else {
        Err(task_not_found())
    }
}
